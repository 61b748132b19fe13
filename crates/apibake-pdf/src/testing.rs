use apibake_core::LayoutError;

use crate::canvas::{Canvas, Color, FontFace, OutlineId, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub page: usize,
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub font: FontFace,
    pub size: f32,
    pub color: Color,
}

/// Canvas that records draw calls instead of producing a file.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub pages: usize,
    pub current: usize,
    pub texts: Vec<DrawnText>,
    pub rects: Vec<(Rect, Color)>,
    pub links: Vec<(Rect, String)>,
    pub destinations: Vec<String>,
    pub outline: Vec<(Option<OutlineId>, String)>,
    pub finished: bool,
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (f32, f32) {
        (612.0, 792.0)
    }

    fn add_page(&mut self) {
        self.pages += 1;
        self.current = self.pages - 1;
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn switch_to_page(&mut self, index: usize) {
        assert!(index < self.pages, "no page {index}");
        self.current = index;
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font: FontFace, size: f32, color: Color) {
        self.texts.push(DrawnText {
            page: self.current,
            text: text.to_string(),
            x,
            baseline,
            font,
            size,
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }

    fn add_destination(&mut self, name: &str, _y: f32) {
        self.destinations.push(name.to_string());
    }

    fn add_link(&mut self, rect: Rect, destination: &str) {
        self.links.push((rect, destination.to_string()));
    }

    fn add_outline_item(&mut self, parent: Option<OutlineId>, title: &str, _y: f32) -> OutlineId {
        self.outline.push((parent, title.to_string()));
        self.outline.len() - 1
    }

    fn finish(&mut self) -> Result<(), LayoutError> {
        self.finished = true;
        Ok(())
    }
}
