//! Traversal of OpenAPI documents into [`DocWriter`] calls.

mod pending;
mod resolver;
mod schema;
mod walker;

pub use pending::PendingSchemas;
pub use resolver::{AnchorScope, SchemaResolver};

use serde_json::Value;

use crate::error::{BakeError, Warning};
use crate::parse;
use crate::parse::components::Components;
use crate::parse::spec::OpenApiSpec;
use crate::writer::DocWriter;
use walker::Walker;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Collect the schemas of all documents into one trailing section.
    pub merge_schemas: bool,
    /// Render "Empty body." for bodies without content.
    pub empty_body_marker: bool,
}

/// Renders any number of OpenAPI documents into one writer, one section per document.
///
/// Call [`parse`](Self::parse) per document, then [`done`](Self::done) exactly once.
pub struct OpenApiRenderer<W: DocWriter> {
    writer: W,
    options: RenderOptions,
    pending: PendingSchemas,
    warnings: Vec<Warning>,
}

impl<W: DocWriter> OpenApiRenderer<W> {
    pub fn new(writer: W, options: RenderOptions) -> Self {
        Self {
            writer,
            options,
            pending: PendingSchemas::default(),
            warnings: Vec::new(),
        }
    }

    /// Render one decoded document as a section named `section_name`.
    ///
    /// Version and model errors leave the writer untouched. Layout errors are structural and
    /// should abort the whole run (see [`BakeError::is_fatal`]).
    pub fn parse(&mut self, tree: &Value, section_name: &str) -> Result<(), BakeError> {
        let spec = parse::load(tree)?;
        let label = section_label(section_name, &spec);
        log::info!("{label}: OpenAPI {}", spec.version);

        let fallback = Components::default();
        let components = spec.components.as_ref().unwrap_or(&fallback);
        let scope = if self.options.merge_schemas {
            AnchorScope::Shared
        } else {
            AnchorScope::Section(label.clone())
        };

        let mut walker = Walker::new(
            &mut self.writer,
            components,
            SchemaResolver::new(&components.schemas, scope),
            &label,
            self.options,
        );
        walker.document(&spec)?;
        if !self.options.merge_schemas && !components.schemas.is_empty() {
            walker.schemas_section(1)?;
        }
        let warnings = walker.into_warnings();
        self.warnings.extend(warnings);

        if self.options.merge_schemas {
            for (name, schema) in &components.schemas {
                if !self.pending.stash(name, schema) {
                    let warning = Warning::DuplicateSchema {
                        section: label.clone(),
                        name: name.clone(),
                    };
                    log::warn!("{warning}");
                    self.warnings.push(warning);
                }
            }
        }
        Ok(())
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Render the shared schema section in merge mode, then finish the writer.
    pub fn done(mut self) -> Result<Vec<Warning>, BakeError> {
        if self.options.merge_schemas && !self.pending.is_empty() {
            let components = Components {
                schemas: self.pending.take_all(),
                ..Components::default()
            };
            let mut walker = Walker::new(
                &mut self.writer,
                &components,
                SchemaResolver::new(&components.schemas, AnchorScope::Shared),
                "Schemas",
                self.options,
            );
            walker.schemas_section(0)?;
            let warnings = walker.into_warnings();
            self.warnings.extend(warnings);
        }
        self.writer.finish()?;
        Ok(self.warnings)
    }
}

/// The section name, else the document title, else "API".
fn section_label(section_name: &str, spec: &OpenApiSpec) -> String {
    let name = section_name.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    match spec.title().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => "API".to_string(),
    }
}
