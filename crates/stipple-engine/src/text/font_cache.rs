use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stipple_bmfont::FontDescriptor;

use super::layout::{layout_text, LayoutResult};
use super::options::LayoutOptions;

/// Opaque handle to a font stored in a [`FontCache`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of parsed fonts.
///
/// The cache is created and passed around by the application; there is no
/// process-wide instance. Fonts are immutable once inserted, so layouts can
/// borrow them concurrently.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: Vec<FontDescriptor>,
    by_path: HashMap<PathBuf, FontId>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an already-built descriptor.
    pub fn insert(&mut self, font: FontDescriptor) -> FontId {
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        id
    }

    /// Returns the font for `id`, if `id` came from this cache.
    pub fn get(&self, id: FontId) -> Option<&FontDescriptor> {
        self.fonts.get(id.0)
    }

    /// Returns the id of the font at `path`, reading and parsing it on the
    /// first request only.
    ///
    /// Files ending in `.fnt` are read as AngelCode text; anything else as
    /// BMFont JSON.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>) -> Result<FontId> {
        let path = path.as_ref();
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }

        log::debug!("font cache miss: loading {}", path.display());

        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;

        let is_fnt = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("fnt"));
        let parsed = if is_fnt {
            FontDescriptor::from_fnt_str(&src)
        } else {
            FontDescriptor::from_json_str(&src)
        };
        let font = parsed.with_context(|| format!("failed to parse font {}", path.display()))?;

        let id = self.insert(font);
        self.by_path.insert(path.to_path_buf(), id);
        Ok(id)
    }

    /// Lays out `text` with a cached font. `None` for an unknown id.
    pub fn layout(&self, id: FontId, text: &str, options: &LayoutOptions) -> Option<LayoutResult> {
        let Some(font) = self.get(id) else {
            log::warn!("FontCache: unknown FontId {:?}, skipping layout", id);
            return None;
        };
        Some(layout_text(font, text, options))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stipple_bmfont::{CommonMetrics, GlyphRecord};

    const JSON_FONT: &str = r#"{
        "common": { "lineHeight": 20, "base": 16, "scaleW": 64, "scaleH": 64 },
        "chars": [ { "id": 72, "x": 0, "y": 0, "width": 9, "height": 12,
                     "xoffset": 0, "yoffset": 4, "xadvance": 10 } ]
    }"#;

    const FNT_FONT: &str = "common lineHeight=20 base=16 scaleW=64 scaleH=64\n\
                            char id=72 x=0 y=0 width=9 height=12 xoffset=0 yoffset=4 xadvance=10\n";

    /// Writes `contents` to a per-test file in the system temp dir.
    fn temp_font(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stipple-font-cache-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn insert_and_get() {
        let mut cache = FontCache::new();
        let font = FontDescriptor::new(CommonMetrics::new(10.0, 8.0), [GlyphRecord::default()], []);
        let id = cache.insert(font);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(id).map(|f| f.common().line_height), Some(10.0));
        assert!(cache.get(FontId(7)).is_none());
    }

    #[test]
    fn get_or_load_reads_each_path_once() {
        let path = temp_font("once.json", JSON_FONT);
        let mut cache = FontCache::new();
        let a = cache.get_or_load(&path).unwrap();

        // A cache hit must not touch the file again.
        std::fs::remove_file(&path).unwrap();
        let b = cache.get_or_load(&path).unwrap();

        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_or_load_picks_format_by_extension() {
        let mut cache = FontCache::new();
        let json = cache.get_or_load(temp_font("ext.json", JSON_FONT)).unwrap();
        let fnt = cache.get_or_load(temp_font("ext.FNT", FNT_FONT)).unwrap();
        assert_ne!(json, fnt);
        assert_eq!(cache.get(json).unwrap().chars(), cache.get(fnt).unwrap().chars());
    }

    #[test]
    fn get_or_load_reports_missing_file() {
        let mut cache = FontCache::new();
        let err = cache.get_or_load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("failed to read font"));
        assert!(cache.is_empty());
    }

    #[test]
    fn get_or_load_reports_parse_errors() {
        let mut cache = FontCache::new();
        let err = cache.get_or_load(temp_font("broken.json", "{ not json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse font"));
    }

    #[test]
    fn layout_through_cache() {
        let mut cache = FontCache::new();
        let id = cache.get_or_load(temp_font("layout.json", JSON_FONT)).unwrap();
        let r = cache.layout(id, "HH", &LayoutOptions::default()).unwrap();
        assert_eq!(r.glyphs.len(), 2);
        assert_eq!(r.glyphs[1].position.x, 10.0);
        assert!(cache.layout(FontId(99), "HH", &LayoutOptions::default()).is_none());
    }
}
