use std::collections::HashSet;

use serde_json::Value;

use super::RenderOptions;
use super::resolver::SchemaResolver;
use crate::error::{LayoutError, Warning};
use crate::parse::body::{Body, BodyOrRef};
use crate::parse::components::Components;
use crate::parse::media_type::{MediaType, pretty_json};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::ref_name;
use crate::parse::schema::Schema;
use crate::parse::spec::{Info, OpenApiSpec};
use crate::text::{capitalize_first, single_line};
use crate::writer::{DataField, DocWriter, TypeRef};

/// Walks one document (or the merged schema set) and emits writer calls.
pub(crate) struct Walker<'a, W: DocWriter> {
    pub(super) doc: &'a mut W,
    pub(super) components: &'a Components,
    pub(super) resolver: SchemaResolver<'a>,
    pub(super) section: &'a str,
    pub(super) options: RenderOptions,
    /// Component schemas currently being expanded inline.
    pub(super) expanding: HashSet<&'a str>,
    pub(super) warnings: Vec<Warning>,
}

impl<'a, W: DocWriter> Walker<'a, W> {
    pub(crate) fn new(
        doc: &'a mut W,
        components: &'a Components,
        resolver: SchemaResolver<'a>,
        section: &'a str,
        options: RenderOptions,
    ) -> Self {
        Self {
            doc,
            components,
            resolver,
            section,
            options,
            expanding: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub(super) fn unresolved(&mut self, name: &str) {
        let warning = Warning::UnresolvedReference {
            section: self.section.to_string(),
            name: name.to_string(),
        };
        if !self.warnings.contains(&warning) {
            log::warn!("{warning}");
            self.warnings.push(warning);
        }
    }

    /// Resolve a schema, recording a warning when it names a missing component.
    pub(super) fn resolve(&mut self, schema: &Schema) -> TypeRef {
        let type_ref = self.resolver.resolve(schema);
        if type_ref.anchor().is_none() {
            if let Some(name) = type_ref.referenced_name() {
                self.unresolved(name);
            }
        }
        type_ref
    }

    /// Section heading, info block and every operation of the document.
    pub(crate) fn document(&mut self, spec: &'a OpenApiSpec) -> Result<(), LayoutError> {
        self.doc.new_section(self.section);
        self.doc.header(0, self.section, None)?;

        if let Some(info) = &spec.info {
            self.info(info);
        }

        if !spec.paths.is_empty() {
            log::info!("Endpoints:");
        }
        for (path, item) in &spec.paths {
            for (method, operation) in &item.operations {
                log::info!(" - {method} {path}");
                self.doc.api_header(method.as_str(), path, 1)?;
                self.operation(item, operation);
                self.doc.line_break(2.0);
            }
        }
        Ok(())
    }

    fn info(&mut self, info: &Info) {
        let mut rendered = false;
        if let Some(summary) = &info.summary {
            self.doc.para(summary);
            rendered = true;
        }
        if let Some(description) = &info.description {
            self.doc.description(description);
            rendered = true;
        }

        let mut lines = Vec::new();
        if let Some(version) = &info.version {
            lines.push(format!("Version: {version}"));
        }
        if let Some(terms) = &info.terms_of_service {
            lines.push(format!("Terms of service: {terms}"));
        }
        if let Some(contact) = info.contact.as_ref().and_then(|c| c.display_text()) {
            lines.push(format!("Contact: {contact}"));
        }
        if let Some(license) = &info.license {
            match (&license.name, &license.url) {
                (Some(name), Some(url)) => lines.push(format!("License: {name} ({url})")),
                (Some(name), None) => lines.push(format!("License: {name}")),
                (None, Some(url)) => lines.push(format!("License: {url}")),
                (None, None) => {}
            }
        }
        for (key, value) in &info.extra {
            match value {
                Value::String(s) => lines.push(format!("{}: {s}", capitalize_first(key))),
                Value::Number(_) | Value::Bool(_) => {
                    lines.push(format!("{}: {value}", capitalize_first(key)))
                }
                _ => log::debug!("skipping non-scalar info field `{key}`"),
            }
        }
        for line in &lines {
            self.doc.para(line);
        }

        if rendered || !lines.is_empty() {
            self.doc.line_break(1.0);
        }
    }

    fn operation(&mut self, item: &'a PathItem, operation: &'a Operation) {
        if let Some(summary) = &operation.summary {
            self.doc.para(summary);
        }
        if let Some(description) = &operation.description {
            self.doc.description(description);
        }

        let parameters = self.parameters(item, operation);
        if !parameters.is_empty() {
            self.doc.sub_header("Request Parameters:");
            self.doc.indent_start();
            for parameter in parameters {
                self.parameter(parameter);
            }
            self.doc.indent_end();
            self.doc.line_break(1.0);
        }

        if let Some(body) = &operation.request_body {
            let body = self.body_ref(body, "requestBodies");
            if body.is_none_or(|b| b.description.is_some() || !b.content.is_empty()) {
                self.doc.sub_header("Request Body:");
                self.doc.indent_start();
                self.body(body);
                self.doc.indent_end();
            }
        }

        for (code, response) in &operation.responses {
            let body = self.body_ref(response, "responses");
            self.doc.sub_header(&format!("Response {code}:"));
            self.doc.indent_start();
            self.body(body);
            self.doc.indent_end();
        }
    }

    /// Path-level parameters first, operation-level ones overriding entries with the same
    /// `(name, in)` in place. Refs are resolved; nameless parameters are dropped.
    fn parameters(&mut self, item: &'a PathItem, operation: &'a Operation) -> Vec<&'a Parameter> {
        let mut merged: Vec<&'a Parameter> = Vec::new();
        for entry in item.parameters.iter().chain(&operation.parameters) {
            let Some(parameter) = self.parameter_ref(entry) else {
                continue;
            };
            if parameter.name.is_none() {
                log::debug!("skipping parameter without a name");
                continue;
            }
            match merged.iter().position(|p| p.key() == parameter.key()) {
                Some(index) => merged[index] = parameter,
                None => merged.push(parameter),
            }
        }
        merged
    }

    fn parameter_ref(&mut self, entry: &'a ParameterOrRef) -> Option<&'a Parameter> {
        match entry {
            ParameterOrRef::Parameter(p) => Some(&**p),
            ParameterOrRef::Ref { ref_path } => {
                let components = self.components;
                let found = components.parameter(ref_path);
                if found.is_none() {
                    self.unresolved(ref_name(ref_path, "parameters"));
                }
                found
            }
        }
    }

    fn parameter(&mut self, parameter: &Parameter) {
        let Some(name) = &parameter.name else {
            return;
        };
        let mut type_ref = parameter.schema.as_ref().map(|s| self.resolve(s));
        if type_ref.as_ref().is_none_or(TypeRef::is_undefined) {
            let member = parameter.composition_member().or_else(|| {
                parameter
                    .schema
                    .as_ref()
                    .and_then(|s| s.composition())
                    .and_then(|(_, members)| members.first())
            });
            if let Some(member) = member {
                type_ref = Some(self.resolve(member));
            }
        }
        self.doc.data_fields(&[DataField {
            name: name.clone(),
            type_ref,
            description: parameter.description.as_deref().map(single_line),
            required: parameter.required,
        }]);
    }

    fn body_ref(&mut self, body: &'a BodyOrRef, section: &str) -> Option<&'a Body> {
        match body {
            BodyOrRef::Body(b) => Some(&**b),
            BodyOrRef::Ref { ref_path } => {
                let components = self.components;
                let found = match section {
                    "requestBodies" => components.request_body(ref_path),
                    _ => components.response(ref_path),
                };
                if found.is_none() {
                    self.unresolved(ref_name(ref_path, section));
                }
                found
            }
        }
    }

    fn body(&mut self, body: Option<&'a Body>) {
        if let Some(description) = body.and_then(|b| b.description.as_deref()) {
            self.doc.description(&capitalize_first(description));
            self.doc.line_break(0.5);
        }

        let content = body.map(|b| &b.content).filter(|c| !c.is_empty());
        match content {
            Some(content) => {
                for (mime, media) in content {
                    self.doc.content_type(mime);
                    self.media(media);
                }
            }
            None if self.options.empty_body_marker => self.doc.para("Empty body."),
            None => {}
        }
        self.doc.line_break(1.0);
    }

    fn media(&mut self, media: &'a MediaType) {
        if let Some(schema) = &media.schema {
            self.render_schema(schema);
        }
        if let Some(example) = &media.example {
            self.doc.example("example", &example_text(example));
        }
        for (name, example) in &media.examples {
            match &example.value {
                Some(value) => self.doc.example(name, &example_text(value)),
                None => log::debug!("skipping example `{name}` without an inline value"),
            }
        }
    }
}

/// Strings are shown verbatim, everything else as indented JSON.
fn example_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => pretty_json(other),
    }
}
