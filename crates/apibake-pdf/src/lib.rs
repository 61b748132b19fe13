pub mod canvas;
pub mod encoding;
pub mod lopdf_canvas;
pub mod metrics;
pub mod outline;
pub mod style;
pub mod writer;

#[cfg(test)]
mod testing;

pub use canvas::{Canvas, Color, FontFace, OutlineId, Rect};
pub use lopdf_canvas::PdfCanvas;
pub use writer::PdfWriter;
