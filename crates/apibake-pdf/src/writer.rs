use apibake_core::config::{ColorTheme, FontFamily, FooterOptions, Theme};
use apibake_core::{DataField, DocWriter, LayoutError, TypeRef};

use crate::canvas::{Canvas, Color, FontFace, Rect};
use crate::metrics::{BASELINE, line_height, text_width};
use crate::outline::OutlineTracker;
use crate::style::{Style, StyleOverride, StyleStack};

/// Space after headers and paragraphs, in lines.
const HEADER_GAP: f32 = 0.7;
const PARA_GAP: f32 = 0.5;

const TITLE_SIZE: f32 = 20.0;
const SUBTITLE_SIZE: f32 = 14.0;
const DATE_SIZE: f32 = 12.0;
const PAGE_LABEL_SIZE: f32 = 9.0;

const BADGE_PADDING: f32 = 4.0;
/// Minimum space between a data field and its trailing comment.
const COMMENT_GAP: f32 = 12.0;
/// Text never gets narrower than this, however deep the indentation.
const MIN_TEXT_WIDTH: f32 = 72.0;

struct Palette {
    main: Color,
    secondary: Color,
    highlight: Color,
    headers: Color,
    sub_headers: Color,
    methods: Vec<(&'static str, Color)>,
    other_methods: Color,
}

impl Palette {
    fn from_theme(colors: &ColorTheme) -> Result<Self, LayoutError> {
        let methods = ["get", "put", "post", "patch", "delete"]
            .into_iter()
            .map(|m| Ok((m, Color::from_hex(colors.for_method(m))?)))
            .collect::<Result<Vec<_>, LayoutError>>()?;
        Ok(Self {
            main: Color::from_hex(&colors.main)?,
            secondary: Color::from_hex(&colors.secondary)?,
            highlight: Color::from_hex(&colors.highlight)?,
            headers: Color::from_hex(&colors.headers)?,
            sub_headers: Color::from_hex(&colors.sub_headers)?,
            methods,
            other_methods: Color::from_hex(&colors.other_methods)?,
        })
    }

    fn for_method(&self, method: &str) -> Color {
        self.methods
            .iter()
            .find(|(m, _)| m.eq_ignore_ascii_case(method))
            .map_or(self.other_methods, |(_, c)| *c)
    }
}

struct Family {
    norm: FontFace,
    bold: FontFace,
    italic: FontFace,
}

impl Family {
    fn from_theme(family: &FontFamily) -> Result<Self, LayoutError> {
        Ok(Self {
            norm: FontFace::from_name(&family.norm)?,
            bold: FontFace::from_name(&family.bold)?,
            italic: FontFace::from_name(&family.italic)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

/// A piece of text with its own look.
#[derive(Debug, Clone)]
struct Span {
    text: String,
    font: FontFace,
    size: f32,
    color: Color,
    link: Option<String>,
    underline: bool,
}

/// Part of a line taken from one span.
#[derive(Debug)]
struct Run {
    span: usize,
    text: String,
    width: f32,
}

#[derive(Debug, Default)]
struct Line {
    runs: Vec<Run>,
    width: f32,
    size: f32,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    fn push(&mut self, span: usize, text: &str, width: f32) {
        self.width += width;
        match self.runs.last_mut() {
            Some(run) if run.span == span => {
                run.text.push_str(text);
                run.width += width;
            }
            _ => self.runs.push(Run {
                span,
                text: text.to_string(),
                width,
            }),
        }
    }

    /// Drop trailing whitespace so alignment and wrapping see the visible width.
    fn trim_end(&mut self, spans: &[Span]) {
        while let Some(run) = self.runs.last_mut() {
            let trimmed = run.text.trim_end();
            if trimmed.len() == run.text.len() {
                break;
            }
            let span = &spans[run.span];
            let width = text_width(trimmed, span.font, span.size);
            self.width -= run.width - width;
            run.width = width;
            run.text.truncate(trimmed.len());
            if run.text.is_empty() {
                self.runs.pop();
            } else {
                break;
            }
        }
    }
}

/// Split into words that keep their trailing whitespace; leading whitespace is its own token.
fn tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_ws = false;
    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        if prev_ws && !ws && i > start {
            out.push(&text[start..i]);
            start = i;
        }
        prev_ws = ws;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Cut a token wider than a line into pieces that fit.
fn split_wide(token: &str, font: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in token.chars() {
        current.push(c);
        if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Greedy line breaking on word boundaries; `\n` always breaks.
fn break_lines(spans: &[Span], max_width: f32) -> Vec<Line> {
    let mut lines = vec![Line::default()];
    for (i, span) in spans.iter().enumerate() {
        for (n, segment) in span.text.split('\n').enumerate() {
            if n > 0 {
                lines.push(Line::default());
            }
            for token in tokens(segment) {
                let width = text_width(token, span.font, span.size);
                let visible = text_width(token.trim_end(), span.font, span.size);
                let fits = lines
                    .last()
                    .is_none_or(|l| l.is_blank() || l.width + visible <= max_width);
                if !fits {
                    if let Some(line) = lines.last_mut() {
                        line.trim_end(spans);
                    }
                    lines.push(Line::default());
                    if token.trim().is_empty() {
                        continue;
                    }
                }
                let pieces = if width > max_width {
                    split_wide(token, span.font, span.size, max_width)
                } else {
                    vec![token.to_string()]
                };
                for (k, piece) in pieces.iter().enumerate() {
                    if k > 0 {
                        lines.push(Line::default());
                    }
                    let piece_width = text_width(piece, span.font, span.size);
                    if let Some(line) = lines.last_mut() {
                        line.push(i, piece, piece_width);
                    }
                }
            }
            if let Some(line) = lines.last_mut() {
                line.size = line.size.max(span.size);
            }
        }
    }
    for line in &mut lines {
        line.trim_end(spans);
    }
    lines
}

fn unbroken(spans: &[Span]) -> Line {
    break_lines(spans, f32::INFINITY)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Lays out API documentation on a [`Canvas`]: pages, text flow, headers with outline items
/// and jump targets, running section labels and page numbers.
pub struct PdfWriter<C: Canvas> {
    canvas: C,
    palette: Palette,
    main: Family,
    mono: Family,
    base_size: f32,
    indent_step: f32,
    h_margin: f32,
    v_margin: f32,
    footer: FooterOptions,
    styles: StyleStack,
    outline: OutlineTracker,
    /// Top of the next line, from the top of the page.
    y: f32,
    section: Option<String>,
    page_labels: Vec<Option<String>>,
    finished: bool,
}

impl<C: Canvas> PdfWriter<C> {
    /// Fails if the theme names an invalid color or a font that is not a standard PDF font.
    pub fn new(canvas: C, theme: &Theme, footer: FooterOptions) -> Result<Self, LayoutError> {
        let palette = Palette::from_theme(&theme.color)?;
        let main = Family::from_theme(&theme.font.main)?;
        let mono = Family::from_theme(&theme.font.mono)?;
        let base = Style {
            font: main.norm,
            size: theme.font.base_size,
            color: palette.main,
            indent: 0.0,
            line_gap: 0.0,
        };
        Ok(Self {
            canvas,
            palette,
            main,
            mono,
            base_size: theme.font.base_size,
            indent_step: theme.format.indent_step,
            h_margin: theme.format.horizontal_margin,
            v_margin: theme.format.vertical_margin,
            footer,
            styles: StyleStack::new(base),
            outline: OutlineTracker::default(),
            y: theme.format.vertical_margin,
            section: None,
            page_labels: Vec::new(),
            finished: false,
        })
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Centered title page; it gets no section label or page number.
    pub fn title_page(&mut self, title: &str, subtitle: Option<&str>, date: Option<&str>) {
        self.section = None;
        self.styles.reset();
        self.new_page();
        let (_, height) = self.canvas.page_size();
        self.y = height * 0.3;

        let bold = self.main.bold;
        self.with_style(StyleOverride::default().font(bold).size(TITLE_SIZE), |w| {
            w.write_aligned(title, Align::Center);
        });
        if let Some(subtitle) = subtitle.filter(|s| !s.trim().is_empty()) {
            self.line_break(PARA_GAP);
            self.with_style(StyleOverride::default().size(SUBTITLE_SIZE), |w| {
                w.write_aligned(subtitle, Align::Center);
            });
        }
        if let Some(date) = date {
            self.line_break(3.0);
            let secondary = self.palette.secondary;
            let style = StyleOverride::default().size(DATE_SIZE).color(secondary);
            self.with_style(style, |w| w.write_aligned(date, Align::Center));
        }
    }

    /// A line of highlighted text, linked and underlined when `anchor` is given.
    pub fn text_ref(&mut self, text: &str, anchor: Option<&str>) {
        let span = self.reference(text, anchor);
        self.write_spans(&[span], Align::Left);
    }

    fn with_style<R>(&mut self, style: StyleOverride, f: impl FnOnce(&mut Self) -> R) -> R {
        self.styles.push(&style);
        let result = f(self);
        self.styles.pop();
        result
    }

    fn header_size(&self, level: usize) -> f32 {
        (self.base_size + 4.0 - 2.0 * level as f32).max(self.base_size)
    }

    fn span(&self, text: impl Into<String>) -> Span {
        let style = self.styles.current();
        Span {
            text: text.into(),
            font: style.font,
            size: style.size,
            color: style.color,
            link: None,
            underline: false,
        }
    }

    fn colored(&self, text: impl Into<String>, color: Color) -> Span {
        Span {
            color,
            ..self.span(text)
        }
    }

    /// Highlighted text, linked and underlined when it has a target.
    fn reference(&self, text: impl Into<String>, anchor: Option<&str>) -> Span {
        Span {
            link: anchor.map(str::to_string),
            underline: anchor.is_some(),
            ..self.colored(text, self.palette.highlight)
        }
    }

    /// Left edge and width of the text column at the current indentation.
    fn text_box(&self) -> (f32, f32) {
        let (page_width, _) = self.canvas.page_size();
        let left = self.h_margin + self.styles.current().indent;
        let right = page_width - self.h_margin;
        (left, (right - left).max(MIN_TEXT_WIDTH))
    }

    fn new_page(&mut self) {
        self.canvas.add_page();
        self.page_labels.push(self.section.clone());
        self.y = self.v_margin;
        log::debug!("page {}", self.canvas.page_count());
    }

    fn ensure_page(&mut self) {
        if self.canvas.page_count() == 0 {
            self.new_page();
        }
    }

    /// Make room for `height` on the current page, breaking the page if needed.
    /// Returns the top of the reserved space.
    fn reserve(&mut self, height: f32) -> f32 {
        self.ensure_page();
        let (_, page_height) = self.canvas.page_size();
        if self.y + height > page_height - self.v_margin && self.y > self.v_margin {
            self.new_page();
        }
        self.y
    }

    fn line_height_of(&self, line: &Line) -> f32 {
        let size = if line.size > 0.0 {
            line.size
        } else {
            self.styles.current().size
        };
        line_height(size)
    }

    fn draw_line(&mut self, spans: &[Span], line: &Line, x: f32, top: f32) {
        let baseline = top + line.size * BASELINE;
        let mut x = x;
        for run in &line.runs {
            let span = &spans[run.span];
            if !run.text.trim().is_empty() {
                self.canvas
                    .draw_text(&run.text, x, baseline, span.font, span.size, span.color);
            }
            if let Some(destination) = &span.link {
                let rect = Rect {
                    x,
                    y: top,
                    width: run.width,
                    height: line_height(span.size),
                };
                self.canvas.add_link(rect, destination);
            }
            if span.underline {
                let rect = Rect {
                    x,
                    y: baseline + 1.0,
                    width: run.width,
                    height: 0.5,
                };
                self.canvas.fill_rect(rect, span.color);
            }
            x += run.width;
        }
    }

    fn write_spans(&mut self, spans: &[Span], align: Align) {
        let (left, width) = self.text_box();
        for line in break_lines(spans, width) {
            let height = self.line_height_of(&line);
            let top = self.reserve(height);
            let x = match align {
                Align::Left => left,
                Align::Center => left + ((width - line.width) / 2.0).max(0.0),
                Align::Right => left + (width - line.width).max(0.0),
            };
            self.draw_line(spans, &line, x, top);
            self.y = top + height + self.styles.current().line_gap;
        }
    }

    fn write_aligned(&mut self, text: &str, align: Align) {
        let span = self.span(text);
        self.write_spans(&[span], align);
    }

    fn write_text(&mut self, text: &str) {
        self.write_aligned(text, Align::Left);
    }

    fn data_field(&mut self, field: &DataField) {
        let head = match &field.type_ref {
            Some(type_ref) => vec![
                self.span(format!("{}: ", field.display_name())),
                self.reference(format!("{};", type_ref.display_text()), type_ref.anchor()),
            ],
            None => vec![self.span(field.display_name())],
        };
        let Some(description) = field.description.as_deref().filter(|d| !d.is_empty()) else {
            self.write_spans(&head, Align::Left);
            return;
        };

        let comment = [self.colored(format!("// {description}"), self.palette.secondary)];
        let (left, width) = self.text_box();
        let head_line = unbroken(&head);
        let comment_line = unbroken(&comment);
        let single = !description.contains('\n')
            && head_line.width + COMMENT_GAP + comment_line.width <= width;

        if single {
            let height = line_height(self.styles.current().size);
            let top = self.reserve(height);
            self.draw_line(&head, &head_line, left, top);
            self.draw_line(&comment, &comment_line, left + width - comment_line.width, top);
            self.y = top + height + self.styles.current().line_gap;
        } else {
            self.write_spans(&head, Align::Left);
            self.write_spans(&comment, Align::Right);
        }
    }
}

impl<C: Canvas> DocWriter for PdfWriter<C> {
    fn new_section(&mut self, label: &str) {
        self.section = Some(label.to_string());
        self.styles.reset();
        self.new_page();
    }

    fn header(&mut self, level: usize, text: &str, anchor: Option<&str>) -> Result<(), LayoutError> {
        self.outline.check(level)?;
        let size = self.header_size(level);
        let parent = self.outline.parent(level);
        let style = StyleOverride::default()
            .font(self.main.bold)
            .size(size)
            .color(self.palette.headers);

        let base_line = line_height(self.base_size);
        let id = self.with_style(style, |w| {
            // Keep the heading together with the start of its content
            let top = w.reserve(line_height(size) + 2.0 * base_line);
            if let Some(anchor) = anchor {
                w.canvas.add_destination(anchor, top);
            }
            let id = w.canvas.add_outline_item(parent, text, top);
            w.write_text(text);
            id
        });
        self.outline.open(level, id);
        self.line_break(HEADER_GAP);
        Ok(())
    }

    fn api_header(&mut self, method: &str, path: &str, level: usize) -> Result<(), LayoutError> {
        self.outline.check(level)?;
        let size = self.base_size + 2.0;
        let bold = self.main.bold;
        let badge = method.to_ascii_uppercase();
        let badge_width = text_width(&badge, bold, size) + 2.0 * BADGE_PADDING;
        let parent = self.outline.parent(level);

        let (left, _) = self.text_box();
        let top = self.reserve(line_height(size) + 2.0 * line_height(self.base_size));
        let badge_rect = Rect {
            x: left,
            y: top - 0.1 * size,
            width: badge_width,
            height: 1.1 * size,
        };
        self.canvas
            .fill_rect(badge_rect, self.palette.for_method(method));
        self.canvas.draw_text(
            &badge,
            left + BADGE_PADDING,
            top + size * BASELINE,
            bold,
            size,
            Color::WHITE,
        );
        let id = self
            .canvas
            .add_outline_item(parent, &format!("{badge} {path}"), top);
        self.outline.open(level, id);

        let style = StyleOverride::default()
            .font(bold)
            .size(size)
            .color(self.palette.headers)
            .indent(badge_width + BADGE_PADDING);
        self.with_style(style, |w| w.write_text(path));
        self.line_break(HEADER_GAP);
        Ok(())
    }

    fn sub_header(&mut self, text: &str) {
        let style = StyleOverride::default()
            .font(self.main.bold)
            .size(self.base_size)
            .color(self.palette.sub_headers);
        self.with_style(style, |w| {
            w.write_text(text);
            w.line_break(HEADER_GAP);
        });
    }

    fn description(&mut self, text: &str) {
        let secondary = self.palette.secondary;
        self.with_style(StyleOverride::default().color(secondary), |w| {
            w.write_text(text);
            w.line_break(PARA_GAP);
        });
    }

    fn para(&mut self, text: &str) {
        self.write_text(text);
        self.line_break(PARA_GAP);
    }

    fn line_break(&mut self, lines: f32) {
        self.ensure_page();
        self.y += lines * line_height(self.styles.current().size);
    }

    fn indent_start(&mut self) {
        let step = self.indent_step;
        self.styles.push(&StyleOverride::default().indent(step));
    }

    fn indent_end(&mut self) {
        self.styles.pop();
    }

    fn data_fields(&mut self, fields: &[DataField]) {
        for field in fields {
            self.data_field(field);
        }
    }

    fn object_schema(&mut self, fields: &[DataField]) {
        self.write_text("{");
        self.indent_start();
        self.data_fields(fields);
        self.indent_end();
        self.write_text("}");
    }

    fn enum_values(&mut self, values: &[String]) {
        let spans = [
            self.span("Values: "),
            self.colored(values.join(", "), self.palette.highlight),
        ];
        self.write_spans(&spans, Align::Left);
        self.line_break(PARA_GAP);
    }

    fn schema_type(&mut self, type_ref: &TypeRef) {
        let spans = [
            self.span("Type: "),
            self.reference(type_ref.display_text(), type_ref.anchor()),
        ];
        self.write_spans(&spans, Align::Left);
        self.line_break(PARA_GAP);
    }

    fn content_type(&mut self, mime: &str) {
        let spans = [
            self.span("Content: "),
            self.colored(mime, self.palette.highlight),
        ];
        self.write_spans(&spans, Align::Left);
    }

    fn example(&mut self, name: &str, body: &str) {
        let bold = self.main.bold;
        self.with_style(StyleOverride::default().font(bold), |w| {
            w.write_text(&format!("Example \"{name}\":"));
        });
        self.line_break(PARA_GAP);
        let style = StyleOverride::default()
            .font(self.mono.bold)
            .size((self.base_size - 2.0).max(1.0))
            .color(self.palette.secondary);
        self.with_style(style, |w| w.write_text(body));
        self.line_break(PARA_GAP);
    }

    fn composition(&mut self, label: &str) {
        let bold = self.main.bold;
        self.with_style(StyleOverride::default().font(bold), |w| w.write_text(label));
    }

    fn connective(&mut self, word: &str) {
        let style = StyleOverride::default()
            .font(self.main.italic)
            .color(self.palette.secondary);
        self.with_style(style, |w| w.write_text(word));
    }

    fn finish(&mut self) -> Result<(), LayoutError> {
        if self.finished {
            return Err(LayoutError::Finished);
        }
        self.finished = true;
        self.ensure_page();

        let count = self.canvas.page_count();
        let (page_width, page_height) = self.canvas.page_size();
        let right = page_width - self.h_margin;
        let font = self.main.norm;
        let color = self.palette.secondary;
        for page in 1..count {
            self.canvas.switch_to_page(page);
            if let Some(Some(label)) = self.page_labels.get(page) {
                let x = right - text_width(label, font, PAGE_LABEL_SIZE);
                self.canvas
                    .draw_text(label, x, self.v_margin / 2.0, font, PAGE_LABEL_SIZE, color);
            }
            if self.footer.page_numbers {
                let text = format!("Page {} / {}", page, count - 1);
                let x = right - text_width(&text, font, PAGE_LABEL_SIZE);
                let baseline = page_height - self.v_margin / 2.0;
                self.canvas
                    .draw_text(&text, x, baseline, font, PAGE_LABEL_SIZE, color);
            }
        }
        log::info!("finishing document with {count} pages");
        self.canvas.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCanvas;

    fn writer() -> PdfWriter<RecordingCanvas> {
        PdfWriter::new(
            RecordingCanvas::default(),
            &Theme::default(),
            FooterOptions { page_numbers: true },
        )
        .unwrap()
    }

    fn spans(text: &str) -> Vec<Span> {
        vec![Span {
            text: text.to_string(),
            font: FontFace::Helvetica,
            size: 10.0,
            color: Color::BLACK,
            link: None,
            underline: false,
        }]
    }

    fn line_texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.runs.iter().map(|r| r.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_tokens_keep_whitespace() {
        assert_eq!(tokens("  \"id\": 1"), ["  ", "\"id\": ", "1"]);
        assert_eq!(tokens("a b"), ["a ", "b"]);
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_break_lines_wraps_on_words() {
        let width = text_width("alpha beta", FontFace::Helvetica, 10.0) + 1.0;
        let lines = break_lines(&spans("alpha beta gamma"), width);
        assert_eq!(line_texts(&lines), ["alpha beta", "gamma"]);
        assert!(lines[0].width <= width);
    }

    #[test]
    fn test_break_lines_hard_breaks_and_indentation() {
        let lines = break_lines(&spans("{\n  \"id\": 1\n}"), 500.0);
        assert_eq!(line_texts(&lines), ["{", "  \"id\": 1", "}"]);
    }

    #[test]
    fn test_break_lines_splits_long_words() {
        let lines = break_lines(&spans("abcdefghijklmnopqrstuvwxyz"), 30.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width <= 30.0));
        assert_eq!(line_texts(&lines).concat(), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_header_nesting_rule() {
        let mut w = writer();
        w.new_section("Demo");
        w.header(0, "Demo", None).unwrap();
        let err = w.header(2, "Too deep", None).unwrap_err();
        assert!(matches!(err, LayoutError::OutlineStructure { level: 2, depth: 1 }));
        // Nothing drawn for the rejected header
        assert!(!w.canvas().texts.iter().any(|t| t.text == "Too deep"));
    }

    #[test]
    fn test_outline_siblings() {
        let mut w = writer();
        w.new_section("Demo");
        w.header(0, "Demo", None).unwrap();
        w.header(1, "First", None).unwrap();
        w.header(1, "Second", None).unwrap();
        w.api_header("get", "/pets", 1).unwrap();

        let outline = &w.canvas().outline;
        assert_eq!(outline[0], (None, "Demo".to_string()));
        assert_eq!(outline[1], (Some(0), "First".to_string()));
        assert_eq!(outline[2], (Some(0), "Second".to_string()));
        assert_eq!(outline[3], (Some(0), "GET /pets".to_string()));
    }

    #[test]
    fn test_header_registers_anchor_and_size() {
        let mut w = writer();
        w.new_section("Demo");
        w.header(0, "Schemas", None).unwrap();
        w.header(1, "Pet", Some("Demo:Pet")).unwrap();

        let canvas = w.canvas();
        assert_eq!(canvas.destinations, ["Demo:Pet"]);
        let pet = canvas.texts.iter().find(|t| t.text == "Pet").unwrap();
        assert_eq!(pet.size, 12.0);
        assert_eq!(pet.font, FontFace::HelveticaBold);
        let schemas = canvas.texts.iter().find(|t| t.text == "Schemas").unwrap();
        assert_eq!(schemas.size, 14.0);
    }

    #[test]
    fn test_api_header_badge() {
        let mut w = writer();
        w.new_section("Demo");
        w.header(0, "Demo", None).unwrap();
        w.api_header("delete", "/pets/{id}", 1).unwrap();

        let canvas = w.canvas();
        let badge = canvas.texts.iter().find(|t| t.text == "DELETE").unwrap();
        assert_eq!(badge.color, Color::WHITE);
        assert_eq!(canvas.rects[0].1, Color::from_hex("#D0021B").unwrap());
        let path = canvas.texts.iter().find(|t| t.text == "/pets/{id}").unwrap();
        assert!(path.x > badge.x);
        assert_eq!(path.baseline, badge.baseline);
    }

    #[test]
    fn test_linked_type_in_data_field() {
        let mut w = writer();
        w.new_section("Demo");
        w.data_fields(&[DataField {
            name: "owner".to_string(),
            type_ref: Some(TypeRef::named("User", Some("Demo:User".to_string()))),
            description: Some("who owns it".to_string()),
            required: Some(false),
        }]);

        let canvas = w.canvas();
        let texts: Vec<&str> = canvas.texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["owner?: ", "User;", "// who owns it"]);
        assert_eq!(canvas.links.len(), 1);
        assert_eq!(canvas.links[0].1, "Demo:User");

        // Comment is right-aligned on the same line
        let comment = &canvas.texts[2];
        assert_eq!(comment.baseline, canvas.texts[0].baseline);
        let right = 612.0 - 70.0;
        let end = comment.x + text_width(&comment.text, FontFace::Helvetica, 10.0);
        assert!((end - right).abs() < 0.01);
    }

    #[test]
    fn test_text_ref_links_only_with_anchor() {
        let mut w = writer();
        w.new_section("Demo");
        w.text_ref("Pet", Some("Demo:Pet"));
        w.text_ref("Missing", None);

        let canvas = w.canvas();
        let highlight = Color::from_hex(&Theme::default().color.highlight).unwrap();
        assert_eq!(canvas.texts.len(), 2);
        assert!(canvas.texts.iter().all(|t| t.color == highlight));
        assert_eq!(canvas.links.len(), 1);
        assert_eq!(canvas.links[0].1, "Demo:Pet");
        assert!(canvas.texts[1].baseline > canvas.texts[0].baseline);
    }

    #[test]
    fn test_long_comment_moves_below() {
        let mut w = writer();
        w.new_section("Demo");
        let description = "word ".repeat(60);
        w.data_fields(&[DataField {
            name: "notes".to_string(),
            type_ref: Some(TypeRef::Primitive("string".to_string())),
            description: Some(description.trim().to_string()),
            required: None,
        }]);

        let canvas = w.canvas();
        let name = &canvas.texts[0];
        let first_comment = canvas.texts.iter().find(|t| t.text.starts_with("//")).unwrap();
        assert!(first_comment.baseline > name.baseline);
    }

    #[test]
    fn test_indentation_moves_text() {
        let mut w = writer();
        w.new_section("Demo");
        w.para("outer");
        w.indent_start();
        w.para("inner");
        w.indent_end();
        w.indent_end(); // unbalanced pops are ignored
        w.para("outer again");

        let x = |s: &str| w.canvas().texts.iter().find(|t| t.text == s).unwrap().x;
        assert_eq!(x("inner") - x("outer"), 12.0);
        assert_eq!(x("outer again"), x("outer"));
    }

    #[test]
    fn test_text_flows_onto_new_pages_with_labels() {
        let mut w = writer();
        w.title_page("API Spec", Some("v1"), Some("2024-01-01"));
        w.new_section("Store");
        for i in 0..120 {
            w.para(&format!("line {i}"));
        }
        w.finish().unwrap();

        let canvas = w.canvas();
        let pages = canvas.pages;
        assert!(pages > 2);
        assert!(canvas.finished);
        let numbers: Vec<&str> = canvas
            .texts
            .iter()
            .filter(|t| t.text.starts_with("Page "))
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(numbers.len(), pages - 1);
        assert_eq!(numbers[0], format!("Page 1 / {}", pages - 1));
        let labels = canvas.texts.iter().filter(|t| t.text == "Store").count();
        assert_eq!(labels, pages - 1);
        // Title page carries neither
        assert!(canvas.texts.iter().filter(|t| t.page == 0).all(|t| !t.text.starts_with("Page")));
    }

    #[test]
    fn test_second_finish_fails() {
        let mut w = writer();
        w.finish().unwrap();
        assert!(matches!(w.finish(), Err(LayoutError::Finished)));
    }

    #[test]
    fn test_invalid_theme() {
        let mut theme = Theme::default();
        theme.color.highlight = "teal".to_string();
        assert!(matches!(
            PdfWriter::new(RecordingCanvas::default(), &theme, FooterOptions::default()),
            Err(LayoutError::InvalidColor(_))
        ));

        let mut theme = Theme::default();
        theme.font.mono.bold = "Fira Code".to_string();
        assert!(matches!(
            PdfWriter::new(RecordingCanvas::default(), &theme, FooterOptions::default()),
            Err(LayoutError::UnsupportedFont(_))
        ));
    }
}
