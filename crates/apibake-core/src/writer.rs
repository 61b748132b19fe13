use std::fmt;

use crate::error::LayoutError;

/// A resolved schema type, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A `type` keyword taken verbatim (`string`, `integer`, `string | null`, ...).
    Primitive(String),
    Array(Box<TypeRef>),
    /// A `$ref` to a component schema. `anchor` is set only if the schema exists.
    Named { name: String, anchor: Option<String> },
    Undefined,
}

impl TypeRef {
    pub fn named(name: impl Into<String>, anchor: Option<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            anchor,
        }
    }

    /// `Array<...>` wrapped display text, `undefined` for unresolvable types.
    pub fn display_text(&self) -> String {
        match self {
            TypeRef::Primitive(name) => name.clone(),
            TypeRef::Array(inner) => format!("Array<{}>", inner.display_text()),
            TypeRef::Named { name, .. } => name.clone(),
            TypeRef::Undefined => "undefined".to_string(),
        }
    }

    /// Innermost type name, seen through arrays.
    pub fn schema_name(&self) -> Option<&str> {
        match self {
            TypeRef::Primitive(name) => Some(name),
            TypeRef::Array(inner) => inner.schema_name(),
            TypeRef::Named { name, .. } => Some(name),
            TypeRef::Undefined => None,
        }
    }

    /// Name of the referenced component schema, seen through arrays.
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            TypeRef::Array(inner) => inner.referenced_name(),
            TypeRef::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Jump target of the innermost named schema.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            TypeRef::Array(inner) => inner.anchor(),
            TypeRef::Named { anchor, .. } => anchor.as_deref(),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, TypeRef::Undefined)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// A named, typed value: a parameter or an object property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    pub name: String,
    pub type_ref: Option<TypeRef>,
    pub description: Option<String>,
    /// Absent means required.
    pub required: Option<bool>,
}

impl DataField {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }

    /// The name, with a `?` suffix when optional.
    pub fn display_name(&self) -> String {
        if self.is_required() {
            self.name.clone()
        } else {
            format!("{}?", self.name)
        }
    }
}

/// Sink for the document primitives emitted while walking an API description.
///
/// Only the header methods can fail: they enforce the outline nesting rule.
pub trait DocWriter {
    /// Start a new page-break-delimited section labelled `label`.
    fn new_section(&mut self, label: &str);
    fn header(&mut self, level: usize, text: &str, anchor: Option<&str>) -> Result<(), LayoutError>;
    fn api_header(&mut self, method: &str, path: &str, level: usize) -> Result<(), LayoutError>;
    fn sub_header(&mut self, text: &str);
    fn description(&mut self, text: &str);
    fn para(&mut self, text: &str);
    fn line_break(&mut self, lines: f32);
    fn indent_start(&mut self);
    fn indent_end(&mut self);
    fn data_fields(&mut self, fields: &[DataField]);
    fn object_schema(&mut self, fields: &[DataField]);
    fn enum_values(&mut self, values: &[String]);
    fn schema_type(&mut self, type_ref: &TypeRef);
    fn content_type(&mut self, mime: &str);
    fn example(&mut self, name: &str, body: &str);
    fn composition(&mut self, label: &str);
    fn connective(&mut self, word: &str);
    /// Finalize and write out the document. Fails when called twice.
    fn finish(&mut self) -> Result<(), LayoutError>;
}

impl<W: DocWriter + ?Sized> DocWriter for &mut W {
    fn new_section(&mut self, label: &str) {
        (**self).new_section(label)
    }
    fn header(&mut self, level: usize, text: &str, anchor: Option<&str>) -> Result<(), LayoutError> {
        (**self).header(level, text, anchor)
    }
    fn api_header(&mut self, method: &str, path: &str, level: usize) -> Result<(), LayoutError> {
        (**self).api_header(method, path, level)
    }
    fn sub_header(&mut self, text: &str) {
        (**self).sub_header(text)
    }
    fn description(&mut self, text: &str) {
        (**self).description(text)
    }
    fn para(&mut self, text: &str) {
        (**self).para(text)
    }
    fn line_break(&mut self, lines: f32) {
        (**self).line_break(lines)
    }
    fn indent_start(&mut self) {
        (**self).indent_start()
    }
    fn indent_end(&mut self) {
        (**self).indent_end()
    }
    fn data_fields(&mut self, fields: &[DataField]) {
        (**self).data_fields(fields)
    }
    fn object_schema(&mut self, fields: &[DataField]) {
        (**self).object_schema(fields)
    }
    fn enum_values(&mut self, values: &[String]) {
        (**self).enum_values(values)
    }
    fn schema_type(&mut self, type_ref: &TypeRef) {
        (**self).schema_type(type_ref)
    }
    fn content_type(&mut self, mime: &str) {
        (**self).content_type(mime)
    }
    fn example(&mut self, name: &str, body: &str) {
        (**self).example(name, body)
    }
    fn composition(&mut self, label: &str) {
        (**self).composition(label)
    }
    fn connective(&mut self, word: &str) {
        (**self).connective(word)
    }
    fn finish(&mut self) -> Result<(), LayoutError> {
        (**self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_array_display() {
        let t = TypeRef::Array(Box::new(TypeRef::Array(Box::new(TypeRef::Primitive(
            "string".to_string(),
        )))));
        assert_eq!(t.display_text(), "Array<Array<string>>");
        assert_eq!(t.schema_name(), Some("string"));
        assert_eq!(t.referenced_name(), None);
        assert!(t.is_array());
    }

    #[test]
    fn test_named_array_propagates_anchor() {
        let t = TypeRef::Array(Box::new(TypeRef::named("Pet", Some("Demo:Pet".to_string()))));
        assert_eq!(t.to_string(), "Array<Pet>");
        assert_eq!(t.anchor(), Some("Demo:Pet"));
        assert_eq!(t.referenced_name(), Some("Pet"));
        assert_eq!(TypeRef::Undefined.display_text(), "undefined");
    }

    #[test]
    fn test_optional_field_name() {
        let mut field = DataField {
            name: "limit".to_string(),
            type_ref: None,
            description: None,
            required: None,
        };
        assert_eq!(field.display_name(), "limit");
        field.required = Some(false);
        assert_eq!(field.display_name(), "limit?");
    }
}
