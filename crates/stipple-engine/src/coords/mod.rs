//! Geometry types shared by the layout engine and mesh builder.
//!
//! Layout space:
//! - pixels of the font atlas (unscaled)
//! - +X right, +Y down (BMFont convention)
//! - a laid-out block sits above its origin: `y` runs from `-height` to `0`

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
