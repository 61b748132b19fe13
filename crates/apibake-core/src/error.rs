use std::fmt;

use thiserror::Error;

/// Per-file failures: the input could not be decoded or is not an OpenAPI 3 document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid OpenAPI specification: no `openapi` or `swagger` version field")]
    InvalidSpec,

    #[error("unsupported OpenAPI version: {0}, supported: 3.0.0+")]
    UnsupportedVersion(String),

    #[error("malformed OpenAPI document: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Failures raised by a document writer.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(
        "a header can only be nested inside headers with level - 1: level={level}, outline depth={depth}"
    )]
    OutlineStructure { level: usize, depth: usize },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("unsupported font: {0}")]
    UnsupportedFont(String),

    #[error("document already finished")]
    Finished,

    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

#[derive(Debug, Error)]
pub enum BakeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl BakeError {
    /// Structural errors mean the traversal itself is broken; they abort the whole run
    /// instead of being reported against a single input file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BakeError::Layout(LayoutError::OutlineStructure { .. }))
    }
}

/// Recoverable conditions recorded while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A `$ref` names something absent from the components of its document.
    UnresolvedReference { section: String, name: String },
    /// Merge mode met a schema name already stashed from an earlier file.
    DuplicateSchema { section: String, name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnresolvedReference { section, name } => {
                write!(f, "{section}: unresolved reference `{name}`")
            }
            Warning::DuplicateSchema { section, name } => {
                write!(f, "{section}: duplicated schema `{name}`, keeping the first one")
            }
        }
    }
}
