use indexmap::IndexMap;

use crate::parse::schema::Schema;

/// Schemas collected across files for the trailing shared section. The first definition of a
/// name wins.
#[derive(Debug, Default)]
pub struct PendingSchemas {
    schemas: IndexMap<String, Schema>,
}

impl PendingSchemas {
    /// Returns `false` if the name was already stashed; the earlier schema is kept.
    pub fn stash(&mut self, name: &str, schema: &Schema) -> bool {
        if self.schemas.contains_key(name) {
            return false;
        }
        self.schemas.insert(name.to_string(), schema.clone());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn take_all(&mut self) -> IndexMap<String, Schema> {
        std::mem::take(&mut self.schemas)
    }
}
