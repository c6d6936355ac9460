use stipple_bmfont::{FontDescriptor, GlyphRecord};

use crate::coords::{Rect, Vec2};

use super::measure::{GlyphMeasure, LineSpan};
use super::options::{Align, LayoutOptions};
use super::wrap::break_lines;

/// A glyph placed by the layout engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionedGlyph {
    /// Pen position including the line's alignment offset.
    pub position: Vec2,
    pub data: GlyphRecord,
    /// Char offset of the glyph in the source text.
    pub index: usize,
    /// Line the glyph sits on.
    pub line: usize,
}

impl PositionedGlyph {
    /// Screen-space box of the glyph's atlas image.
    pub fn quad(&self) -> Rect {
        Rect::new(
            self.position.x + self.data.xoffset as f32,
            self.position.y + self.data.yoffset as f32,
            self.data.width as f32,
            self.data.height as f32,
        )
    }
}

/// Output of [`layout_text`]: block metrics plus glyphs in visual order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub width: f32,
    pub height: f32,
    pub descender: f32,
    pub baseline: f32,
    pub x_height: f32,
    pub cap_height: f32,
    pub line_height: f32,
    pub ascender: f32,
    pub lines_total: usize,
    pub lines: Vec<LineSpan>,
    pub glyphs: Vec<PositionedGlyph>,
}

impl LayoutResult {
    /// Union of every glyph quad; `None` when nothing was placed.
    pub fn bounds(&self) -> Option<Rect> {
        self.glyphs.iter().map(PositionedGlyph::quad).reduce(Rect::union)
    }

    /// Glyphs on `line`, in left-to-right order.
    pub fn line_glyphs(&self, line: usize) -> impl Iterator<Item = &PositionedGlyph> {
        self.glyphs.iter().filter(move |g| g.line == line)
    }
}

/// Lays `text` out with `font`.
///
/// Pure function of its inputs. A font without glyphs produces an empty
/// layout (zero width, height and lines) and a warning rather than an error.
pub fn layout_text(font: &FontDescriptor, text: &str, options: &LayoutOptions) -> LayoutResult {
    let text: Vec<char> = text.chars().collect();

    let line_height = options.line_height.unwrap_or(font.common().line_height);
    let baseline = font.common().base;
    let descender = line_height - baseline;
    let x_height = font.x_height();
    let cap_height = font.cap_height();

    let metrics = LayoutResult {
        descender,
        baseline,
        x_height,
        cap_height,
        line_height,
        ascender: line_height - descender - x_height,
        ..LayoutResult::default()
    };

    if font.is_empty() {
        log::warn!("layout_text: font has no glyphs; producing an empty layout");
        return metrics;
    }

    let measure = GlyphMeasure::new(font, options.tab_size, options.letter_spacing);
    let lines = break_lines(&measure, &text, options);
    if lines.is_empty() {
        return metrics;
    }

    let min_width = options.width.unwrap_or(0.0);
    let width = lines.iter().fold(0.0f32, |acc, l| acc.max(l.width).max(min_width));
    let height = line_height * lines.len() as f32 - descender;

    let mut glyphs = Vec::with_capacity(text.len());
    let mut unresolved = 0usize;
    let mut y = -height;

    for (line_index, line) in lines.iter().enumerate() {
        let align_offset = match options.align {
            Align::Left => 0.0,
            Align::Center => (width - line.width) / 2.0,
            Align::Right => width - line.width,
        };

        let mut x = 0.0f32;
        let mut last: Option<&GlyphRecord> = None;

        for (index, &ch) in text.iter().enumerate().take(line.end).skip(line.start) {
            let Some(glyph) = measure.glyph(ch) else {
                unresolved += 1;
                continue;
            };

            x += measure.kerning(last, glyph);
            glyphs.push(PositionedGlyph {
                position: Vec2::new(x + align_offset, y),
                data: *glyph,
                index,
                line: line_index,
            });
            x += glyph.xadvance as f32 + measure.letter_spacing();
            last = Some(glyph);
        }

        y += line_height;
    }

    if unresolved > 0 {
        log::debug!("layout_text: skipped {unresolved} char(s) with no glyph");
    }

    LayoutResult {
        width,
        height,
        lines_total: lines.len(),
        lines,
        glyphs,
        ..metrics
    }
}
