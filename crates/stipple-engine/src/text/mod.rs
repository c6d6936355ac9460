//! Bitmap-font text layout.
//!
//! Pipeline: [`FontDescriptor`](stipple_bmfont::FontDescriptor) + text +
//! [`LayoutOptions`] → [`break_lines`] → [`layout_text`] → [`TextMesh`].
//!
//! All offsets are char offsets into the input string.

mod font_cache;
mod layout;
mod measure;
mod mesh;
mod options;
mod wrap;

pub use font_cache::{FontCache, FontId};
pub use layout::{layout_text, LayoutResult, PositionedGlyph};
pub use measure::{GlyphMeasure, LineSpan, Measure};
pub use mesh::{GlyphVertex, MeshOptions, TextMesh};
pub use options::{Align, LayoutOptions, WrapMode};
pub use wrap::break_lines;
