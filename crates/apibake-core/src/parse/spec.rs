use indexmap::IndexMap;
use serde::Deserialize;

use super::components::Components;
use super::operation::PathItem;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "super::lenient_string")]
    pub version: Option<String>,

    #[serde(rename = "termsOfService", default, deserialize_with = "super::lenient_string")]
    pub terms_of_service: Option<String>,

    #[serde(default)]
    pub contact: Option<Contact>,

    #[serde(default)]
    pub license: Option<License>,

    /// Remaining fields (`x-logo`, vendor keys, ...) in input order.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Contact information.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub email: Option<String>,
}

impl Contact {
    /// `name <email> (url)`, skipping the parts that are absent.
    pub fn display_text(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        if let Some(email) = &self.email {
            parts.push(format!("<{email}>"));
        }
        if let Some(url) = &self.url {
            parts.push(format!("({url})"));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// License information.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct License {
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_string")]
    pub url: Option<String>,
}

/// Top-level OpenAPI 3.x document, as far as the renderer reads it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OpenApiSpec {
    /// Filled from `openapi` (or `swagger`) by [`super::load`] after validation.
    #[serde(skip)]
    pub version: String,

    #[serde(default)]
    pub info: Option<Info>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,
}

impl OpenApiSpec {
    pub fn title(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.title.as_deref())
    }
}
