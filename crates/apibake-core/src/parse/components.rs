use indexmap::IndexMap;
use serde::Deserialize;

use super::body::{Body, BodyOrRef};
use super::parameter::{Parameter, ParameterOrRef};
use super::ref_name;
use super::schema::Schema;

/// Hops followed through refs that point at other refs before giving up.
const MAX_REF_HOPS: usize = 8;

/// Components object holding reusable definitions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,

    #[serde(default)]
    pub responses: IndexMap<String, BodyOrRef>,

    #[serde(default)]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, BodyOrRef>,
}

impl Components {
    /// Resolve a parameter ref to its definition. Returns `None` if it does not resolve.
    pub fn parameter(&self, ref_path: &str) -> Option<&Parameter> {
        let mut current = ref_path;
        for _ in 0..MAX_REF_HOPS {
            match self.parameters.get(ref_name(current, "parameters"))? {
                ParameterOrRef::Parameter(p) => return Some(p),
                ParameterOrRef::Ref { ref_path } => current = ref_path,
            }
        }
        None
    }

    /// Resolve a request body ref to its definition.
    pub fn request_body(&self, ref_path: &str) -> Option<&Body> {
        resolve_body(&self.request_bodies, ref_path, "requestBodies")
    }

    /// Resolve a response ref to its definition.
    pub fn response(&self, ref_path: &str) -> Option<&Body> {
        resolve_body(&self.responses, ref_path, "responses")
    }
}

fn resolve_body<'a>(
    map: &'a IndexMap<String, BodyOrRef>,
    ref_path: &str,
    section: &str,
) -> Option<&'a Body> {
    let mut current = ref_path;
    for _ in 0..MAX_REF_HOPS {
        match map.get(ref_name(current, section))? {
            BodyOrRef::Body(b) => return Some(b),
            BodyOrRef::Ref { ref_path } => current = ref_path,
        }
    }
    None
}
