use crate::canvas::{Color, FontFace};

/// Effective text style: one frame of the style stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font: FontFace,
    pub size: f32,
    pub color: Color,
    /// Offset from the page's left margin.
    pub indent: f32,
    /// Extra space after each line.
    pub line_gap: f32,
}

/// Partial style. Unset fields are inherited from the frame below; `indent` adds up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverride {
    pub font: Option<FontFace>,
    pub size: Option<f32>,
    pub color: Option<Color>,
    pub indent: Option<f32>,
    pub line_gap: Option<f32>,
}

impl StyleOverride {
    pub fn font(mut self, font: FontFace) -> Self {
        self.font = Some(font);
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = Some(indent);
        self
    }
}

#[derive(Debug, Clone)]
pub struct StyleStack {
    frames: Vec<Style>,
}

impl StyleStack {
    pub fn new(base: Style) -> Self {
        Self { frames: vec![base] }
    }

    pub fn current(&self) -> &Style {
        // The base frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn push(&mut self, o: &StyleOverride) {
        let top = self.current();
        let next = Style {
            font: o.font.unwrap_or(top.font),
            size: o.size.unwrap_or(top.size),
            color: o.color.unwrap_or(top.color),
            indent: top.indent + o.indent.unwrap_or(0.0),
            line_gap: o.line_gap.unwrap_or(top.line_gap),
        };
        self.frames.push(next);
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        } else {
            log::warn!("style stack underflow, keeping the base style");
        }
    }

    /// Drop everything but the base frame.
    pub fn reset(&mut self) {
        self.frames.truncate(1);
    }
}
