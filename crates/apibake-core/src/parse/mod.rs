pub mod body;
pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod schema;
pub mod spec;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Decode YAML text into a generic tree.
pub fn from_yaml(input: &str) -> Result<Value, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Decode JSON text into a generic tree.
pub fn from_json(input: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Decode text by file extension: `json` is JSON, anything else is YAML.
pub fn decode(input: &str, extension: &str) -> Result<Value, ParseError> {
    match extension {
        "json" => from_json(input),
        _ => from_yaml(input),
    }
}

/// Validate the version of a decoded tree and convert it into the typed model.
pub fn load(tree: &Value) -> Result<OpenApiSpec, ParseError> {
    let version = spec_version(tree)?;
    validate_version(&version)?;
    let mut spec = OpenApiSpec::deserialize(tree).map_err(ParseError::Malformed)?;
    spec.version = version;
    Ok(spec)
}

/// Read `openapi`, falling back to `swagger`. YAML turns an unquoted `3.0` into a number.
fn spec_version(tree: &Value) -> Result<String, ParseError> {
    let field = ["openapi", "swagger"]
        .iter()
        .filter_map(|key| tree.get(key))
        .find(|v| !v.is_null());
    match field {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ParseError::InvalidSpec),
    }
}

fn validate_version(version: &str) -> Result<(), ParseError> {
    if !version.trim_start().starts_with('3') {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}

/// Accept any scalar where a string is expected (`version: 1.0` in YAML is a number).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

/// Accept `true`/`false`; any other value reads as absent.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_bool()))
}

/// Accept a list of strings; anything else (e.g. swagger-style `required: true`) reads as absent.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    })
}

/// Extract the name from a `$ref` like `#/components/<section>/Foo`.
/// A ref without that prefix is used whole as the name.
pub fn ref_name<'a>(ref_path: &'a str, section: &str) -> &'a str {
    let prefix = format!("#/components/{section}/");
    match ref_path.find(&prefix) {
        Some(start) => &ref_path[start + prefix.len()..],
        None => ref_path,
    }
}
