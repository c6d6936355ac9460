use stipple_bmfont::{FallbackGlyphs, FontDescriptor, GlyphRecord};

/// A contiguous char range of the input and its measured pixel width.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineSpan {
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    pub width: f32,
}

impl LineSpan {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Measures how much of `text[start..end]` fits within `width` pixels.
///
/// The returned span always begins at `start`; its `end` is the first char
/// that did not fit (or `end`). The line breaker only depends on this trait,
/// so it can be exercised without a font.
pub trait Measure {
    fn measure(&self, text: &[char], start: usize, end: usize, width: f32) -> LineSpan;
}

/// Glyph resolution and advance math for one font and option set.
///
/// Built once per layout call: the space/tab fallbacks are resolved up front
/// and shared by measuring and placement.
pub struct GlyphMeasure<'f> {
    font: &'f FontDescriptor,
    fallbacks: FallbackGlyphs,
    letter_spacing: f32,
}

impl<'f> GlyphMeasure<'f> {
    pub fn new(font: &'f FontDescriptor, tab_size: u32, letter_spacing: f32) -> Self {
        Self {
            font,
            fallbacks: FallbackGlyphs::new(font, tab_size),
            letter_spacing,
        }
    }

    /// Glyph for `ch`, or `None` when the font cannot draw it.
    #[inline]
    pub fn glyph(&self, ch: char) -> Option<&GlyphRecord> {
        self.fallbacks.resolve(self.font, ch as u32)
    }

    /// Kerning applied before `next` when it follows `prev` on a line.
    #[inline]
    pub fn kerning(&self, prev: Option<&GlyphRecord>, next: &GlyphRecord) -> f32 {
        prev.map_or(0.0, |p| self.font.kerning(p.id, next.id) as f32)
    }

    #[inline]
    pub fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }
}

impl Measure for GlyphMeasure<'_> {
    fn measure(&self, text: &[char], start: usize, end: usize, width: f32) -> LineSpan {
        if self.font.is_empty() {
            return LineSpan { start, end: start, width: 0.0 };
        }

        let end = end.min(text.len());
        let mut pen = 0.0f32;
        let mut extent = 0.0f32;
        let mut count = 0;
        let mut last: Option<&GlyphRecord> = None;

        for &ch in text.get(start..end).unwrap_or_default() {
            if let Some(glyph) = self.glyph(ch) {
                pen += self.kerning(last, glyph);

                let next_pen = pen + glyph.xadvance as f32 + self.letter_spacing;
                let next_extent = pen + glyph.width as f32;

                // The next glyph no longer fits.
                if next_extent >= width || next_pen >= width {
                    break;
                }

                pen = next_pen;
                extent = next_extent;
                last = Some(glyph);
            }
            // Unresolved chars take no space but still belong to the line.
            count += 1;
        }

        // Right edge lines up with the rendered glyph box.
        if let Some(glyph) = last {
            extent += glyph.xoffset as f32;
        }

        LineSpan { start, end: start + count, width: extent }
    }
}
