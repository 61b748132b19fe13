use indexmap::IndexMap;
use serde::Deserialize;

use super::media_type::MediaType;

/// A request body or a response: both are a description plus content by MIME type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Body {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default, deserialize_with = "super::lenient_bool")]
    pub required: Option<bool>,
}

/// A reference or inline body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Body(Box<Body>),
}
