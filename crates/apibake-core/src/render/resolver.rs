use std::fmt;

use indexmap::IndexMap;

use crate::parse::ref_name;
use crate::parse::schema::Schema;
use crate::writer::TypeRef;

/// Namespace of schema anchors: shared across files in merge mode, per section otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorScope {
    Shared,
    Section(String),
}

impl fmt::Display for AnchorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorScope::Shared => f.write_str("schemas"),
            AnchorScope::Section(name) => f.write_str(name),
        }
    }
}

/// Turns schema nodes into display-ready [`TypeRef`]s against one component schema map.
#[derive(Debug, Clone)]
pub struct SchemaResolver<'a> {
    schemas: &'a IndexMap<String, Schema>,
    scope: AnchorScope,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(schemas: &'a IndexMap<String, Schema>, scope: AnchorScope) -> Self {
        Self { schemas, scope }
    }

    pub fn schemas(&self) -> &'a IndexMap<String, Schema> {
        self.schemas
    }

    pub fn lookup(&self, name: &str) -> Option<&'a Schema> {
        self.schemas.get(name)
    }

    /// Jump target of a schema heading. Used for both the heading and every link to it.
    pub fn anchor(&self, name: &str) -> String {
        format!("{}:{}", self.scope, name)
    }

    /// `type` wins over `$ref`; arrays wrap their resolved items.
    pub fn resolve(&self, schema: &Schema) -> TypeRef {
        if schema.is_array() {
            if let Some(items) = &schema.items {
                return TypeRef::Array(Box::new(self.resolve(items)));
            }
        }
        if let Some(type_name) = schema.type_name() {
            return TypeRef::Primitive(type_name);
        }
        if let Some(ref_path) = &schema.ref_path {
            let name = ref_name(ref_path, "schemas");
            let anchor = self.schemas.contains_key(name).then(|| self.anchor(name));
            return TypeRef::named(name, anchor);
        }
        TypeRef::Undefined
    }
}
