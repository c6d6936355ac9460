//! Stipple engine crate.
//!
//! Turns a bitmap font plus a string into positioned glyphs and GPU-ready
//! glyph meshes. Everything here is CPU-side and allocation-per-call; no
//! device or window is created.

pub mod coords;
pub mod logging;
pub mod text;
