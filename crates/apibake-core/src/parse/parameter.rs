use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::schema::Schema;

/// Parameter location. Values outside OpenAPI 3 (swagger's `formData`, `body`, ...) are kept
/// as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    Other(String),
}

impl ParameterLocation {
    pub fn from_name(name: &str) -> Self {
        match name {
            "query" => Self::Query,
            "header" => Self::Header,
            "path" => Self::Path,
            "cookie" => Self::Cookie,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
            Self::Other(name) => name,
        }
    }
}

fn lenient_location<'de, D>(deserializer: D) -> Result<Option<ParameterLocation>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|v| v.as_str().map(ParameterLocation::from_name)))
}

/// An API parameter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Parameter {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: Option<String>,

    #[serde(rename = "in", default, deserialize_with = "lenient_location")]
    pub location: Option<ParameterLocation>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub description: Option<String>,

    /// Absent reads as required.
    #[serde(default, deserialize_with = "super::lenient_bool")]
    pub required: Option<bool>,

    #[serde(default, deserialize_with = "super::lenient_bool")]
    pub deprecated: Option<bool>,

    #[serde(default)]
    pub schema: Option<Schema>,

    #[serde(rename = "anyOf", default)]
    pub any_of: Option<Vec<Schema>>,

    #[serde(rename = "allOf", default)]
    pub all_of: Option<Vec<Schema>>,

    #[serde(rename = "oneOf", default)]
    pub one_of: Option<Vec<Schema>>,
}

impl Parameter {
    /// First member of the first present parameter-level composition (`anyOf`, `allOf`, `oneOf`).
    pub fn composition_member(&self) -> Option<&Schema> {
        [&self.any_of, &self.all_of, &self.one_of]
            .into_iter()
            .find_map(|list| list.as_ref())
            .and_then(|list| list.first())
    }

    /// Identity used to let operation parameters override path parameters.
    pub fn key(&self) -> (Option<&str>, Option<&ParameterLocation>) {
        (self.name.as_deref(), self.location.as_ref())
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}
