pub mod config;
pub mod error;
pub mod parse;
pub mod render;
pub mod text;
pub mod writer;

pub use error::{BakeError, LayoutError, ParseError, Warning};
pub use render::{OpenApiRenderer, RenderOptions};
pub use writer::{DataField, DocWriter, TypeRef};
