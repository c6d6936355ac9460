//! Glyph metrics table: code-point and kerning lookups plus whitespace
//! fallbacks for fonts that omit them.
//!
//! Every lookup degrades to a sentinel (`None` / `0`) instead of erroring;
//! bitmap fonts are routinely incomplete.

use crate::descriptor::{FontDescriptor, GlyphRecord};

pub const SPACE_ID: u32 = 0x20;
pub const TAB_ID: u32 = 0x09;

/// Stand-ins for a missing space glyph, tried in order.
const SPACE_FALLBACKS: [char; 2] = ['m', 'w'];

const X_HEIGHT_CHARS: [char; 13] = ['x', 'e', 'a', 'o', 'n', 's', 'r', 'c', 'u', 'm', 'v', 'w', 'z'];
const CAP_HEIGHT_CHARS: [char; 14] =
    ['H', 'I', 'N', 'E', 'F', 'K', 'L', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];

impl FontDescriptor {
    /// Returns the glyph for `id`, if the atlas has one.
    #[inline]
    pub fn glyph(&self, id: u32) -> Option<&GlyphRecord> {
        self.glyph_index(id).map(|i| &self.chars()[i])
    }

    /// Kerning adjustment between two glyph ids; `0` when the pair is unknown.
    #[inline]
    pub fn kerning(&self, first: u32, second: u32) -> i32 {
        self.kerning_amount(first, second).unwrap_or(0)
    }

    /// Glyph used in place of a missing space: the literal space, else the
    /// first of `m`/`w`, else the first glyph in source order.
    ///
    /// `None` only for a font with no glyphs at all.
    pub fn space_glyph(&self) -> Option<GlyphRecord> {
        self.glyph(SPACE_ID)
            .or_else(|| SPACE_FALLBACKS.iter().find_map(|&c| self.glyph(c as u32)))
            .or_else(|| self.chars().first())
            .copied()
    }

    /// Height of the first lowercase reference glyph present; `0.0` if none.
    pub fn x_height(&self) -> f32 {
        self.reference_height(&X_HEIGHT_CHARS)
    }

    /// Height of the first uppercase reference glyph present; `0.0` if none.
    pub fn cap_height(&self) -> f32 {
        self.reference_height(&CAP_HEIGHT_CHARS)
    }

    fn reference_height(&self, candidates: &[char]) -> f32 {
        candidates
            .iter()
            .find_map(|&c| self.glyph(c as u32))
            .map_or(0.0, |g| g.height as f32)
    }
}

impl GlyphRecord {
    /// Derives a tab glyph from a space glyph: `tab_size` spaces of advance,
    /// no visible box.
    pub fn to_tab(&self, tab_size: u32) -> GlyphRecord {
        GlyphRecord {
            id: TAB_ID,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            xoffset: 0,
            yoffset: 0,
            xadvance: self.xadvance.saturating_mul(i32::try_from(tab_size).unwrap_or(i32::MAX)),
            page: self.page,
        }
    }
}

/// Space and tab glyphs resolved once per layout.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FallbackGlyphs {
    pub space: Option<GlyphRecord>,
    pub tab: Option<GlyphRecord>,
}

impl FallbackGlyphs {
    pub fn new(font: &FontDescriptor, tab_size: u32) -> Self {
        let space = font.space_glyph();
        let tab = space.map(|s| s.to_tab(tab_size));
        Self { space, tab }
    }

    /// Resolves `id` against the font, falling back to the synthesized
    /// space/tab glyphs for those two code points.
    pub fn resolve<'a>(&'a self, font: &'a FontDescriptor, id: u32) -> Option<&'a GlyphRecord> {
        font.glyph(id).or(match id {
            TAB_ID => self.tab.as_ref(),
            SPACE_ID => self.space.as_ref(),
            _ => None,
        })
    }
}
