//! Greedy word wrap (the libGDX `BitmapFontCache` algorithm).
//!
//! Lines break at `'\n'`, and in `Wrap` mode also at the last whitespace
//! before the measured width runs out. Leading whitespace of a line and
//! trailing whitespace before a wrap point are dropped from the spans.

use super::measure::{LineSpan, Measure};
use super::options::{LayoutOptions, WrapMode};

/// Splits `text` into line spans according to `options`.
pub fn break_lines<M: Measure + ?Sized>(
    measure: &M,
    text: &[char],
    options: &LayoutOptions,
) -> Vec<LineSpan> {
    // Zero width leaves nothing visible.
    if options.mode == WrapMode::Wrap && options.width == Some(0.0) {
        return Vec::new();
    }

    let width = options.test_width();
    let end = options.end.map_or(text.len(), |e| e.min(text.len()));
    let mut start = options.start;
    let mut lines = Vec::new();

    while start < end {
        let newline = text[start..end]
            .iter()
            .position(|&c| c == '\n')
            .map_or(end, |i| start + i);

        while start < newline && text[start].is_whitespace() {
            start += 1;
        }

        let fitted = measure.measure(text, start, newline, width);
        let mut line_end = start + fitted.len();
        let mut next_start = line_end + 1;

        // Ran out of width before the newline: back up to a break point.
        if line_end < newline {
            while line_end > start && !text[line_end].is_whitespace() {
                line_end -= 1;
            }

            if line_end == start {
                // One word wider than the line: keep the whole run on this
                // line and let it overflow.
                line_end = start + fitted.len();
                while line_end < newline && !text[line_end].is_whitespace() {
                    line_end += 1;
                }
                next_start = if line_end == newline { newline + 1 } else { line_end };
            } else {
                next_start = line_end;
                while line_end > start && text[line_end - 1].is_whitespace() {
                    line_end -= 1;
                }
            }
        }

        // Re-measure the final range for an exact width. The range is already
        // decided, so it is measured unbounded and never clipped again.
        lines.push(measure.measure(text, start, line_end, f32::MAX));
        start = next_start;
    }

    lines
}
