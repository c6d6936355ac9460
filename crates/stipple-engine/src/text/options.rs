use serde::Deserialize;

/// Line-breaking mode.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Break at whitespace when a line would exceed `width`.
    Wrap,
    /// Break only at `'\n'`; `width` is ignored.
    #[default]
    NoWrap,
}

/// Horizontal alignment of each line within the block width.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Options for a single layout call.
///
/// Offsets (`start`, `end`) are char offsets into the laid-out string.
/// Deserializes from the camelCase keys used alongside BMFont JSON files:
///
/// ```json
/// { "width": 240, "mode": "wrap", "align": "center", "letterSpacing": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Maximum line width in pixels. `None` = unbounded.
    pub width: Option<f32>,
    pub start: usize,
    /// Exclusive end offset. `None` = end of text.
    pub end: Option<usize>,
    pub mode: WrapMode,
    /// Extra advance added after every glyph.
    pub letter_spacing: f32,
    /// Tab advance, in spaces.
    pub tab_size: u32,
    pub align: Align,
    /// Overrides the font's `common.lineHeight`.
    pub line_height: Option<f32>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: None,
            start: 0,
            end: None,
            mode: WrapMode::NoWrap,
            letter_spacing: 0.0,
            tab_size: 4,
            align: Align::Left,
            line_height: None,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Shorthand for `.width(w).mode(WrapMode::Wrap)`.
    pub fn wrap(self, width: f32) -> Self {
        self.width(width).mode(WrapMode::Wrap)
    }

    pub fn mode(mut self, mode: WrapMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn letter_spacing(mut self, px: f32) -> Self {
        self.letter_spacing = px;
        self
    }

    pub fn tab_size(mut self, spaces: u32) -> Self {
        self.tab_size = spaces;
        self
    }

    pub fn line_height(mut self, px: f32) -> Self {
        self.line_height = Some(px);
        self
    }

    pub fn range(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = Some(end);
        self
    }

    /// Width used when testing whether the next glyph still fits.
    ///
    /// `NoWrap` is unbounded regardless of `width`.
    pub(crate) fn test_width(&self) -> f32 {
        match (self.mode, self.width) {
            (WrapMode::Wrap, Some(w)) => w,
            _ => f32::MAX,
        }
    }
}
