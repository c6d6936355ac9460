//! Bitmap-font (**BMFont**) descriptors for the stipple toolkit.
//!
//! This crate has no engine or GPU dependencies so atlas tooling can read
//! fonts without pulling in a renderer.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`descriptor`] | `FontDescriptor`, `GlyphRecord`, `CommonMetrics`, `Kerning`, JSON parsing |
//! | [`metrics`] | glyph / kerning lookups, space and tab fallbacks, x-height and cap-height |
//! | [`error`] | `FontError`, `ParseError` |
//!
//! ASCII `.fnt` files are read with [`FontDescriptor::from_fnt_str`].
//!
//! # Quick start
//!
//! ```rust
//! use stipple_bmfont::FontDescriptor;
//!
//! let font = FontDescriptor::from_json_str(r#"{
//!     "common": { "lineHeight": 32, "base": 26, "scaleW": 256, "scaleH": 256 },
//!     "chars": [
//!         { "id": 65, "x": 0, "y": 0, "width": 18, "height": 20,
//!           "xoffset": 0, "yoffset": 6, "xadvance": 17 }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(font.glyph('A' as u32).unwrap().xadvance, 17);
//! assert_eq!(font.kerning('A' as u32, 'A' as u32), 0);
//! ```

pub mod descriptor;
pub mod error;
mod fnt;
pub mod metrics;

pub use descriptor::{CommonMetrics, FontDescriptor, FontInfo, GlyphRecord, Kerning};
pub use error::{FontError, ParseError};
pub use metrics::{FallbackGlyphs, SPACE_ID, TAB_ID};
