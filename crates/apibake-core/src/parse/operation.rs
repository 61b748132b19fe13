use std::fmt;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::body::BodyOrRef;
use super::parameter::ParameterOrRef;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    /// Match a path item key, case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default, deserialize_with = "super::lenient_string")]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", default)]
    pub request_body: Option<BodyOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, BodyOrRef>,

    #[serde(default, deserialize_with = "super::lenient_bool")]
    pub deprecated: Option<bool>,
}

/// A path item: shared parameters plus operations keyed by HTTP method, in input order.
///
/// Keys that are not HTTP methods (`servers`, `x-*` extensions, ...) are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ParameterOrRef>,
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut item = PathItem::default();
        for (key, value) in raw {
            match key.as_str() {
                "summary" => item.summary = value.as_str().map(str::to_string),
                "description" => item.description = value.as_str().map(str::to_string),
                "parameters" => {
                    item.parameters = serde_json::from_value(value).map_err(D::Error::custom)?;
                }
                other => {
                    if let Some(method) = HttpMethod::from_key(other) {
                        let op = serde_json::from_value(value).map_err(|e| {
                            D::Error::custom(format!("{} operation: {e}", method.as_str()))
                        })?;
                        item.operations.insert(method, op);
                    }
                }
            }
        }
        Ok(item)
    }
}
