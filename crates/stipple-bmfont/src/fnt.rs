//! AngelCode ASCII `.fnt` reader.
//!
//! Each line is a tag followed by `key=value` pairs. Values are either bare
//! (`lineHeight=32`, `padding=0,0,0,0`) or double-quoted (`face="Open Sans"`).

use crate::descriptor::{CommonMetrics, FontDescriptor, FontInfo, GlyphRecord, Kerning};
use crate::error::ParseError;

// ── line tokenizer ────────────────────────────────────────────────────────

struct Pair<'s> {
    key: &'s str,
    value: String,
    /// 1-based column of the value, for error reporting.
    col: usize,
}

struct Line<'s> {
    tag: &'s str,
    pairs: Vec<Pair<'s>>,
    line: usize,
}

struct LineLexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
}

impl<'s> LineLexer<'s> {
    fn new(src: &'s str, line: usize) -> Self {
        Self { src, pos: 0, line }
    }

    fn col(&self) -> usize {
        self.src[..self.pos].chars().count() + 1
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col())
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn word(&mut self) -> &'s str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !c.is_whitespace() && c != '=') {
            self.advance();
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn value(&mut self) -> Result<String, ParseError> {
        if self.peek() != Some('"') {
            let start = self.pos;
            while matches!(self.peek(), Some(c) if !c.is_whitespace()) {
                self.advance();
            }
            let src = self.src;
            return Ok(src[start..self.pos].to_string());
        }

        self.advance(); // opening quote
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Err(self.err("unterminated string value")),
                Some('"') => break,
                Some(c) => s.push(c),
            }
        }
        Ok(s)
    }

    fn tokenize(mut self) -> Result<Option<Line<'s>>, ParseError> {
        self.skip_whitespace();
        let tag = self.word();
        if tag.is_empty() {
            return Ok(None);
        }

        let mut pairs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            let key = self.word();
            if key.is_empty() || self.advance() != Some('=') {
                return Err(self.err(format!("expected key=value after {tag:?}")));
            }
            let col = self.col();
            let value = self.value()?;
            pairs.push(Pair { key, value, col });
        }

        Ok(Some(Line { tag, pairs, line: self.line }))
    }
}

// ── typed field access ────────────────────────────────────────────────────

impl Line<'_> {
    fn find(&self, key: &str) -> Option<&Pair<'_>> {
        self.pairs.iter().find(|p| p.key == key)
    }

    /// Integer field; absent keys read as `0`.
    fn int(&self, key: &str) -> Result<i32, ParseError> {
        match self.find(key) {
            None => Ok(0),
            Some(p) => p.value.parse::<i32>().map_err(|_| {
                ParseError::new(format!("{key}: invalid integer {:?}", p.value), self.line, p.col)
            }),
        }
    }

    fn uint(&self, key: &str) -> Result<u32, ParseError> {
        let v = self.int(key)?;
        u32::try_from(v).map_err(|_| {
            let col = self.find(key).map_or(1, |p| p.col);
            ParseError::new(format!("{key}: expected a non-negative value, got {v}"), self.line, col)
        })
    }

    fn text(&self, key: &str) -> String {
        self.find(key).map(|p| p.value.clone()).unwrap_or_default()
    }
}

// ── entry point ───────────────────────────────────────────────────────────

/// Upper bound on atlas pages when `common` does not declare a count.
const MAX_PAGES: u32 = 256;

fn page_limit(common: Option<&CommonMetrics>) -> u32 {
    match common {
        Some(c) if c.pages > 0 => c.pages.min(MAX_PAGES),
        _ => MAX_PAGES,
    }
}

pub(crate) fn parse(src: &str) -> Result<FontDescriptor, ParseError> {
    let mut info = FontInfo::default();
    let mut common = None;
    let mut pages: Vec<String> = Vec::new();
    let mut chars = Vec::new();
    let mut kernings = Vec::new();

    for (i, raw) in src.lines().enumerate() {
        let Some(line) = LineLexer::new(raw, i + 1).tokenize()? else {
            continue;
        };

        match line.tag {
            "info" => {
                info = FontInfo { face: line.text("face"), size: line.int("size")? };
            }
            "common" => {
                common = Some(CommonMetrics {
                    line_height: line.int("lineHeight")? as f32,
                    base: line.int("base")? as f32,
                    scale_w: line.uint("scaleW")?,
                    scale_h: line.uint("scaleH")?,
                    pages: line.uint("pages")?,
                });
            }
            "page" => {
                let id = line.uint("id")?;
                let limit = page_limit(common.as_ref());
                if id >= limit {
                    let col = line.find("id").map_or(1, |p| p.col);
                    return Err(ParseError::new(
                        format!("page id {id} out of range (limit {limit})"),
                        line.line,
                        col,
                    ));
                }
                let id = id as usize;
                if pages.len() <= id {
                    pages.resize(id + 1, String::new());
                }
                pages[id] = line.text("file");
            }
            "char" => chars.push(GlyphRecord {
                id: line.uint("id")?,
                x: line.int("x")?,
                y: line.int("y")?,
                width: line.int("width")?,
                height: line.int("height")?,
                xoffset: line.int("xoffset")?,
                yoffset: line.int("yoffset")?,
                xadvance: line.int("xadvance")?,
                page: line.uint("page")?,
            }),
            "kerning" => kernings.push(Kerning {
                first: line.uint("first")?,
                second: line.uint("second")?,
                amount: line.int("amount")?,
            }),
            // counts only
            "chars" | "kernings" => {}
            other => log::debug!("fnt line {}: ignoring unknown tag {other:?}", line.line),
        }
    }

    let common = common.ok_or_else(|| ParseError::new("missing `common` line", 1, 1))?;

    Ok(FontDescriptor::new(common, chars, kernings).with_info(info).with_pages(pages))
}

impl FontDescriptor {
    /// Parses the AngelCode ASCII `.fnt` format.
    pub fn from_fnt_str(src: &str) -> Result<Self, crate::FontError> {
        Ok(parse(src)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
info face=\"Open Sans\" size=32 bold=0 italic=0 charset=\"\" unicode=1 padding=0,0,0,0 spacing=1,1
common lineHeight=36 base=29 scaleW=256 scaleH=256 pages=1 packed=0
page id=0 file=\"open-sans.png\"
chars count=2
char id=32   x=0    y=0    width=0    height=0    xoffset=0    yoffset=29   xadvance=8    page=0  chnl=15
char id=65   x=10   y=20   width=19   height=23   xoffset=-1   yoffset=6    xadvance=18   page=0  chnl=15
kernings count=1
kerning first=65  second=32  amount=-1
";

    #[test]
    fn parses_ascii_fnt() {
        let font = parse(SAMPLE).unwrap();
        assert_eq!(font.info().face, "Open Sans");
        assert_eq!(font.info().size, 32);
        assert_eq!(font.common().line_height, 36.0);
        assert_eq!(font.common().base, 29.0);
        assert_eq!(font.common().scale_w, 256);
        assert_eq!(font.pages(), ["open-sans.png".to_string()]);
        assert_eq!(font.chars().len(), 2);

        let a = font.glyph(65).unwrap();
        assert_eq!((a.x, a.y, a.width, a.height), (10, 20, 19, 23));
        assert_eq!((a.xoffset, a.yoffset, a.xadvance), (-1, 6, 18));
        assert_eq!(font.kerning(65, 32), -1);
    }

    #[test]
    fn blank_lines_and_unknown_tags_are_skipped() {
        let src = "\n\ncommon lineHeight=10 base=8\nmeta author=\"someone\"\n\n";
        let font = parse(src).unwrap();
        assert!(font.is_empty());
        assert_eq!(font.common().line_height, 10.0);
    }

    #[test]
    fn err_missing_common() {
        let err = parse("info face=\"x\"\n").unwrap_err();
        assert!(err.message.contains("common"));
    }

    #[test]
    fn err_bad_number_reports_position() {
        let err = parse("common lineHeight=abc base=8\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 19);
    }

    #[test]
    fn err_unterminated_quote() {
        let err = parse("common lineHeight=1 base=1\ninfo face=\"Open Sans\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn err_page_id_out_of_range() {
        let err = parse("common lineHeight=1 base=1\npage id=2000000000 file=\"x.png\"\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.col, 9);
        assert!(err.message.contains("out of range"));

        let err = parse("common lineHeight=1 base=1 pages=2\npage id=2 file=\"c.png\"\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn page_ids_within_declared_count() {
        let src = "common lineHeight=1 base=1 pages=2\npage id=1 file=\"b.png\"\npage id=0 file=\"a.png\"\n";
        let font = parse(src).unwrap();
        assert_eq!(font.pages(), ["a.png".to_string(), "b.png".to_string()]);
    }

    #[test]
    fn err_missing_equals() {
        parse("common lineHeight 10\n").unwrap_err();
    }
}
