use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

/// Schema composition keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    AllOf,
    AnyOf,
    OneOf,
}

impl Composition {
    /// Label introducing the member list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllOf => "All of:",
            Self::AnyOf => "Any of:",
            Self::OneOf => "One of:",
        }
    }

    /// Word placed between consecutive members.
    pub fn connective(&self) -> &'static str {
        match self {
            Self::AllOf => "and",
            Self::AnyOf | Self::OneOf => "or",
        }
    }
}

/// A JSON Schema object. A `$ref` is kept on the same struct instead of an
/// untagged wrapper so that siblings like `description` survive next to it.
///
/// Boolean schemas (`true`/`false`, allowed since 3.1) read as an empty schema.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(remote = "Self")]
pub struct Schema {
    #[serde(rename = "$ref", default)]
    pub ref_path: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub schema_type: Option<TypeSet>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub format: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub description: Option<String>,

    #[serde(rename = "default", default)]
    pub default_value: Option<Value>,

    #[serde(default, deserialize_with = "super::lenient_bool")]
    pub nullable: Option<bool>,

    // Object properties
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,

    #[serde(default, deserialize_with = "super::lenient_string_list")]
    pub required: Option<Vec<String>>,

    // Array items
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    // Composition
    #[serde(rename = "allOf", default)]
    pub all_of: Option<Vec<Schema>>,

    #[serde(rename = "anyOf", default)]
    pub any_of: Option<Vec<Schema>>,

    #[serde(rename = "oneOf", default)]
    pub one_of: Option<Vec<Schema>>,

    // Enum values
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default)]
    pub example: Option<Value>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Schema::deserialize(Value::Object(map)).map_err(D::Error::custom),
            Value::Bool(_) | Value::Null => Ok(Schema::default()),
            other => Err(D::Error::custom(format!("expected a schema object, found `{other}`"))),
        }
    }
}

/// A `type` that is neither a string nor a list of strings reads as absent.
fn lenient_type<'de, D>(deserializer: D) -> Result<Option<TypeSet>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| TypeSet::deserialize(value).ok()))
}

impl Schema {
    /// The `type` keyword as text; multiple types are joined with ` | `.
    pub fn type_name(&self) -> Option<String> {
        match self.schema_type.as_ref()? {
            TypeSet::Single(t) => Some(t.clone()),
            TypeSet::Multiple(ts) if ts.is_empty() => None,
            TypeSet::Multiple(ts) => Some(ts.join(" | ")),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(&self.schema_type, Some(TypeSet::Single(t)) if t == "array")
    }

    /// First present composition in `allOf`, `anyOf`, `oneOf` order.
    pub fn composition(&self) -> Option<(Composition, &[Schema])> {
        [
            (Composition::AllOf, &self.all_of),
            (Composition::AnyOf, &self.any_of),
            (Composition::OneOf, &self.one_of),
        ]
        .into_iter()
        .find_map(|(kind, list)| list.as_deref().map(|members| (kind, members)))
    }

    /// Whether a property is required. A schema without a `required` list marks all of them required.
    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_none_or(|names| names.iter().any(|n| n == property))
    }

    /// Enum values as display strings; strings are shown without quotes.
    pub fn enum_strings(&self) -> Option<Vec<String>> {
        let values = self.enum_values.as_ref()?;
        Some(
            values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_keeps_siblings() {
        let s: Schema = serde_json::from_value(json!({
            "$ref": "#/components/schemas/Pet",
            "description": "the pet"
        }))
        .unwrap();
        assert_eq!(s.ref_path.as_deref(), Some("#/components/schemas/Pet"));
        assert_eq!(s.description.as_deref(), Some("the pet"));
    }

    #[test]
    fn test_composition_precedence() {
        let s: Schema = serde_json::from_value(json!({
            "oneOf": [{ "type": "string" }],
            "allOf": [{ "type": "integer" }, { "type": "number" }]
        }))
        .unwrap();
        let (kind, members) = s.composition().unwrap();
        assert_eq!(kind, Composition::AllOf);
        assert_eq!(members.len(), 2);
        assert_eq!(kind.connective(), "and");
    }

    #[test]
    fn test_required_defaults_to_all() {
        let open: Schema = serde_json::from_value(json!({ "type": "object" })).unwrap();
        assert!(open.is_required("anything"));

        let listed: Schema =
            serde_json::from_value(json!({ "type": "object", "required": ["id"] })).unwrap();
        assert!(listed.is_required("id"));
        assert!(!listed.is_required("name"));

        let legacy: Schema = serde_json::from_value(json!({ "required": true })).unwrap();
        assert_eq!(legacy.required, None);
    }

    #[test]
    fn test_boolean_subschemas_read_as_empty() {
        let s: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": { "extra": true, "never": false, "id": { "type": "string" } },
            "items": true,
            "anyOf": [true, { "type": "integer" }]
        }))
        .unwrap();
        assert_eq!(s.properties["extra"], Schema::default());
        assert_eq!(s.properties["never"], Schema::default());
        assert_eq!(s.properties["id"].type_name().as_deref(), Some("string"));
        assert_eq!(s.items.as_deref(), Some(&Schema::default()));
        assert_eq!(s.any_of.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_loose_keywords_do_not_reject_the_schema() {
        let s: Schema = serde_json::from_value(json!({
            "type": 7,
            "description": 42,
            "nullable": "yes",
            "properties": { "id": { "type": "string" } }
        }))
        .unwrap();
        assert_eq!(s.schema_type, None);
        assert_eq!(s.description.as_deref(), Some("42"));
        assert_eq!(s.nullable, None);
        assert_eq!(s.properties.len(), 1);

        assert!(serde_json::from_value::<Schema>(json!("string")).is_err());
    }

    #[test]
    fn test_type_names() {
        let s: Schema = serde_json::from_value(json!({ "type": ["string", "null"] })).unwrap();
        assert_eq!(s.type_name().as_deref(), Some("string | null"));

        let s: Schema = serde_json::from_value(json!({ "enum": ["a", 1, true] })).unwrap();
        assert_eq!(s.enum_strings().unwrap(), ["a", "1", "true"]);
    }
}
