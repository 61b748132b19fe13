use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::schema::Schema;

/// Media type object: the schema and examples of one content type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,

    #[serde(default)]
    pub example: Option<Value>,

    #[serde(default)]
    pub examples: IndexMap<String, Example>,
}

/// Named example of a media type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Example {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub value: Option<Value>,
}

impl Example {
    /// The example value pretty-printed with a two-space indent.
    pub fn pretty_value(&self) -> Option<String> {
        self.value.as_ref().map(pretty_json)
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
