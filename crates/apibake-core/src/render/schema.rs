use super::walker::Walker;
use crate::error::LayoutError;
use crate::parse::schema::Schema;
use crate::text::single_line;
use crate::writer::{DataField, DocWriter};

impl<'a, W: DocWriter> Walker<'a, W> {
    /// Heading "Schemas" at `level`, then every component schema one level deeper under its anchor.
    pub(crate) fn schemas_section(&mut self, level: usize) -> Result<(), LayoutError> {
        log::info!("Schemas:");
        self.doc.new_section("Schemas");
        self.doc.header(level, "Schemas", None)?;

        let schemas = self.resolver.schemas();
        for (name, schema) in schemas {
            log::info!(" - {name}");
            let anchor = self.resolver.anchor(name);
            self.doc.header(level + 1, name, Some(&anchor))?;
            if let Some(description) = &schema.description {
                self.doc.description(description);
            }
            self.expanding.insert(name.as_str());
            self.render_schema(schema);
            self.expanding.remove(name.as_str());
            self.doc.line_break(2.0);
        }
        Ok(())
    }

    /// Render a schema node: composition, type line with inline expansion of the referenced
    /// component, then object fields or enum values.
    pub(crate) fn render_schema(&mut self, schema: &'a Schema) {
        if let Some((kind, members)) = schema.composition() {
            self.composition(kind.label(), kind.connective(), members);
            return;
        }

        let type_ref = self.resolve(schema);
        if !type_ref.is_undefined() && type_ref.display_text() != "object" {
            self.doc.schema_type(&type_ref);
        }

        if let Some(name) = type_ref.referenced_name() {
            let schemas = self.resolver.schemas();
            match schemas.get_key_value(name) {
                Some((key, target)) if has_detail(target) => {
                    if self.expanding.insert(key.as_str()) {
                        self.detail(target);
                        self.expanding.remove(key.as_str());
                    } else {
                        log::debug!("`{name}` is already being expanded, linking only");
                    }
                }
                _ => {}
            }
            return;
        }

        self.detail(schema);
    }

    fn composition(&mut self, label: &str, connective: &str, members: &'a [Schema]) {
        self.doc.composition(label);
        self.doc.indent_start();
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                self.doc.connective(connective);
            }
            self.render_schema(member);
        }
        self.doc.indent_end();
    }

    /// The body of a schema without its type line.
    fn detail(&mut self, schema: &'a Schema) {
        if let Some((kind, members)) = schema.composition() {
            self.composition(kind.label(), kind.connective(), members);
        } else if !schema.properties.is_empty() {
            let fields = self.fields(schema);
            self.doc.object_schema(&fields);
        } else if let Some(values) = schema.enum_strings() {
            self.doc.line_break(0.5);
            self.doc.enum_values(&values);
        } else if let Some(items) = schema.items.as_deref().filter(|_| schema.is_array()) {
            self.detail(items);
        }
    }

    fn fields(&mut self, schema: &'a Schema) -> Vec<DataField> {
        schema
            .properties
            .iter()
            .map(|(name, property)| DataField {
                name: name.clone(),
                type_ref: Some(self.resolve(property)),
                description: property.description.as_deref().map(single_line),
                required: Some(schema.is_required(name)),
            })
            .collect()
    }
}

/// Whether a schema has a body worth expanding inline.
fn has_detail(schema: &Schema) -> bool {
    !schema.properties.is_empty() || schema.enum_values.is_some() || schema.composition().is_some()
}
