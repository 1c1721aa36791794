//! SVG input: the document element tree and the path interpreter.

pub mod document;
pub mod path;

pub use document::{parse_translate, Document, Element, Layer, LABEL_ATTR};
pub use path::{interpret_path, parse_path, Mode, PathCommand};
