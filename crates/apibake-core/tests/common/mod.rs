use apibake_core::{DataField, DocWriter, LayoutError, TypeRef};

/// Records writer calls as indented text lines. Line breaks are not recorded.
#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<String>,
    depth: usize,
    pub finished: bool,
}

impl Transcript {
    fn push(&mut self, line: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", "  ".repeat(self.depth), line.as_ref()));
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of lines equal to `line`, ignoring indentation.
    pub fn count(&self, line: &str) -> usize {
        self.lines.iter().filter(|l| l.trim() == line).count()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.count(line) > 0
    }

    fn field_line(field: &DataField) -> String {
        let mut line = format!("field {}", field.display_name());
        if let Some(type_ref) = &field.type_ref {
            line.push_str(&format!(": {};", type_text(type_ref)));
        }
        if let Some(description) = &field.description {
            line.push_str(&format!(" // {description}"));
        }
        line
    }
}

fn type_text(type_ref: &TypeRef) -> String {
    match type_ref.anchor() {
        Some(anchor) => format!("{type_ref} -> {anchor}"),
        None => type_ref.to_string(),
    }
}

impl DocWriter for Transcript {
    fn new_section(&mut self, label: &str) {
        self.depth = 0;
        self.push(format!("section {label}"));
    }

    fn header(&mut self, level: usize, text: &str, anchor: Option<&str>) -> Result<(), LayoutError> {
        match anchor {
            Some(anchor) => self.push(format!("h{level} {text} #{anchor}")),
            None => self.push(format!("h{level} {text}")),
        }
        Ok(())
    }

    fn api_header(&mut self, method: &str, path: &str, level: usize) -> Result<(), LayoutError> {
        self.push(format!("h{level} [{method}] {path}"));
        Ok(())
    }

    fn sub_header(&mut self, text: &str) {
        self.push(format!("sub {text}"));
    }

    fn description(&mut self, text: &str) {
        self.push(format!("desc {text}"));
    }

    fn para(&mut self, text: &str) {
        self.push(format!("para {text}"));
    }

    fn line_break(&mut self, _lines: f32) {}

    fn indent_start(&mut self) {
        self.depth += 1;
    }

    fn indent_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn data_fields(&mut self, fields: &[DataField]) {
        for field in fields {
            self.push(Self::field_line(field));
        }
    }

    fn object_schema(&mut self, fields: &[DataField]) {
        self.push("{");
        self.depth += 1;
        self.data_fields(fields);
        self.depth -= 1;
        self.push("}");
    }

    fn enum_values(&mut self, values: &[String]) {
        self.push(format!("values {}", values.join(", ")));
    }

    fn schema_type(&mut self, type_ref: &TypeRef) {
        self.push(format!("type {}", type_text(type_ref)));
    }

    fn content_type(&mut self, mime: &str) {
        self.push(format!("content {mime}"));
    }

    fn example(&mut self, name: &str, body: &str) {
        let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
        self.push(format!("example {name}: {flat}"));
    }

    fn composition(&mut self, label: &str) {
        self.push(label);
    }

    fn connective(&mut self, word: &str) {
        self.push(word);
    }

    fn finish(&mut self) -> Result<(), LayoutError> {
        if self.finished {
            return Err(LayoutError::Finished);
        }
        self.finished = true;
        self.depth = 0;
        self.push("finish");
        Ok(())
    }
}
