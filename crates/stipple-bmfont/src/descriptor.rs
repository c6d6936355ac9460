use std::collections::HashMap;

use serde::Deserialize;

use crate::error::FontError;

// ── records ───────────────────────────────────────────────────────────────

/// One glyph of a bitmap font: its atlas rectangle plus draw metrics.
///
/// Field names match the BMFont export so atlas coordinates map directly
/// onto texture UVs.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlyphRecord {
    /// Unicode code point.
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub xoffset: i32,
    pub yoffset: i32,
    /// Horizontal pen advance after drawing this glyph.
    pub xadvance: i32,
    /// Atlas page the glyph lives on.
    #[serde(default)]
    pub page: u32,
}

/// Metrics shared by every glyph (`common` block).
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonMetrics {
    pub line_height: f32,
    /// Distance from the top of a line to the baseline.
    pub base: f32,
    /// Atlas page width in pixels.
    #[serde(default)]
    pub scale_w: u32,
    /// Atlas page height in pixels.
    #[serde(default)]
    pub scale_h: u32,
    #[serde(default)]
    pub pages: u32,
}

impl CommonMetrics {
    pub const fn new(line_height: f32, base: f32) -> Self {
        Self { line_height, base, scale_w: 0, scale_h: 0, pages: 0 }
    }

    pub const fn with_atlas_size(mut self, scale_w: u32, scale_h: u32) -> Self {
        self.scale_w = scale_w;
        self.scale_h = scale_h;
        self
    }
}

/// Descriptive `info` block. Only the fields layout tooling cares about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FontInfo {
    #[serde(default)]
    pub face: String,
    /// Rendered size; BMFont writes a negative value for "match char height".
    #[serde(default)]
    pub size: i32,
}

/// A single kerning pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct Kerning {
    pub first: u32,
    pub second: u32,
    pub amount: i32,
}

// ── descriptor ────────────────────────────────────────────────────────────

/// A parsed bitmap font.
///
/// Glyphs are kept in source order so "first glyph in the font" is well
/// defined; a code-point index sits alongside for O(1) lookup. Immutable
/// once built, so a descriptor can be shared freely between layouts.
#[derive(Debug, Clone, Default)]
pub struct FontDescriptor {
    info: FontInfo,
    common: CommonMetrics,
    pages: Vec<String>,
    chars: Vec<GlyphRecord>,
    index: HashMap<u32, usize>,
    kernings: HashMap<(u32, u32), i32>,
}

impl FontDescriptor {
    /// Builds a descriptor in code.
    ///
    /// Duplicate glyph ids keep the first occurrence; duplicate kerning pairs
    /// keep the first amount.
    pub fn new(
        common: CommonMetrics,
        chars: impl IntoIterator<Item = GlyphRecord>,
        kernings: impl IntoIterator<Item = Kerning>,
    ) -> Self {
        let chars: Vec<GlyphRecord> = chars.into_iter().collect();

        let mut index = HashMap::with_capacity(chars.len());
        for (i, glyph) in chars.iter().enumerate() {
            index.entry(glyph.id).or_insert(i);
        }

        let mut table = HashMap::new();
        for k in kernings {
            table.entry((k.first, k.second)).or_insert(k.amount);
        }

        Self {
            info: FontInfo::default(),
            common,
            pages: Vec::new(),
            chars,
            index,
            kernings: table,
        }
    }

    pub fn with_info(mut self, info: FontInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_pages(mut self, pages: Vec<String>) -> Self {
        self.pages = pages;
        self
    }

    /// Parses the BMFont JSON export.
    ///
    /// `kernings` may be either a list of `{first, second, amount}` or a
    /// nested `{"first": {"second": amount}}` mapping.
    pub fn from_json_str(src: &str) -> Result<Self, FontError> {
        let raw: RawFont = serde_json::from_str(src)?;
        raw.into_descriptor()
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, FontError> {
        let raw: RawFont = serde_json::from_slice(bytes)?;
        raw.into_descriptor()
    }

    #[inline]
    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    #[inline]
    pub fn common(&self) -> &CommonMetrics {
        &self.common
    }

    /// Atlas page file names, indexed by `GlyphRecord::page`.
    #[inline]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Glyphs in source order.
    #[inline]
    pub fn chars(&self) -> &[GlyphRecord] {
        &self.chars
    }

    /// `true` when the font has no glyphs and cannot lay out anything.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn has_kernings(&self) -> bool {
        !self.kernings.is_empty()
    }

    #[inline]
    pub(crate) fn glyph_index(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[inline]
    pub(crate) fn kerning_amount(&self, first: u32, second: u32) -> Option<i32> {
        self.kernings.get(&(first, second)).copied()
    }
}

// ── JSON shape ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawFont {
    #[serde(default)]
    pages: Vec<String>,
    #[serde(default)]
    chars: Vec<GlyphRecord>,
    #[serde(default)]
    info: FontInfo,
    common: CommonMetrics,
    #[serde(default)]
    kernings: Option<RawKernings>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKernings {
    List(Vec<Kerning>),
    Nested(HashMap<String, HashMap<String, i32>>),
}

impl RawFont {
    fn into_descriptor(self) -> Result<FontDescriptor, FontError> {
        let kernings = match self.kernings {
            None => Vec::new(),
            Some(RawKernings::List(list)) => list,
            Some(RawKernings::Nested(map)) => {
                let mut list = Vec::new();
                for (first, seconds) in map {
                    let first = parse_code_point(&first)?;
                    for (second, amount) in seconds {
                        list.push(Kerning { first, second: parse_code_point(&second)?, amount });
                    }
                }
                list
            }
        };

        if self.chars.is_empty() {
            log::debug!("font descriptor has no chars; layouts will be empty");
        }

        Ok(FontDescriptor::new(self.common, self.chars, kernings)
            .with_info(self.info)
            .with_pages(self.pages))
    }
}

fn parse_code_point(key: &str) -> Result<u32, FontError> {
    key.trim()
        .parse::<u32>()
        .map_err(|_| FontError::InvalidField(format!("kerning key {key:?} is not a code point")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pages": ["sheet.png"],
        "info": { "face": "Roboto", "size": 32, "bold": 0 },
        "common": { "lineHeight": 38, "base": 30, "scaleW": 256, "scaleH": 128, "pages": 1, "packed": 0 },
        "chars": [
            { "id": 65, "index": 36, "char": "A", "x": 0, "y": 0, "width": 20, "height": 24,
              "xoffset": 0, "yoffset": 6, "xadvance": 19, "chnl": 15, "page": 0 },
            { "id": 86, "x": 21, "y": 0, "width": 20, "height": 24,
              "xoffset": -1, "yoffset": 6, "xadvance": 18, "page": 0 }
        ],
        "kernings": [ { "first": 65, "second": 86, "amount": -2 } ]
    }"#;

    #[test]
    fn parses_json_export() {
        let font = FontDescriptor::from_json_str(SAMPLE).unwrap();
        assert_eq!(font.info().face, "Roboto");
        assert_eq!(font.common().line_height, 38.0);
        assert_eq!(font.common().base, 30.0);
        assert_eq!(font.common().scale_w, 256);
        assert_eq!(font.common().scale_h, 128);
        assert_eq!(font.pages(), ["sheet.png".to_string()]);
        assert_eq!(font.chars().len(), 2);
        assert_eq!(font.chars()[1].xoffset, -1);
        assert_eq!(font.kerning_amount(65, 86), Some(-2));
    }

    #[test]
    fn parses_nested_kernings() {
        let src = r#"{
            "common": { "lineHeight": 10, "base": 8 },
            "chars": [],
            "kernings": { "65": { "86": -3, "87": -1 } }
        }"#;
        let font = FontDescriptor::from_json_str(src).unwrap();
        assert_eq!(font.kerning_amount(65, 86), Some(-3));
        assert_eq!(font.kerning_amount(65, 87), Some(-1));
        assert_eq!(font.kerning_amount(86, 65), None);
    }

    #[test]
    fn missing_chars_parses_as_empty_font() {
        let font = FontDescriptor::from_json_str(r#"{ "common": { "lineHeight": 10, "base": 8 } }"#)
            .unwrap();
        assert!(font.is_empty());
        assert!(!font.has_kernings());
    }

    #[test]
    fn missing_common_is_an_error() {
        let err = FontDescriptor::from_json_str(r#"{ "chars": [] }"#).unwrap_err();
        assert!(matches!(err, FontError::Json(_)));
    }

    #[test]
    fn bad_nested_kerning_key_is_an_error() {
        let src = r#"{ "common": { "lineHeight": 1, "base": 1 }, "kernings": { "A": { "86": 1 } } }"#;
        let err = FontDescriptor::from_json_str(src).unwrap_err();
        assert!(matches!(err, FontError::InvalidField(_)));
    }

    #[test]
    fn duplicate_ids_keep_first_glyph() {
        let a = GlyphRecord { id: 65, xadvance: 10, ..GlyphRecord::default() };
        let dup = GlyphRecord { id: 65, xadvance: 99, ..GlyphRecord::default() };
        let font = FontDescriptor::new(CommonMetrics::new(10.0, 8.0), [a, dup], []);
        assert_eq!(font.glyph_index(65), Some(0));
        assert_eq!(font.chars().len(), 2);
    }
}
