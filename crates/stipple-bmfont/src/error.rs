use std::fmt;

/// A parse error from the ASCII `.fnt` format.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
    /// 1-based column (in chars) where the error occurred.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fnt parse error at {}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Error returned when a font descriptor cannot be built from its source.
#[derive(Debug)]
pub enum FontError {
    /// The JSON export was malformed or missing required fields.
    Json(serde_json::Error),
    /// The ASCII `.fnt` file was malformed.
    Parse(ParseError),
    /// A field parsed but holds a value the descriptor cannot represent.
    InvalidField(String),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Json(e) => write!(f, "font json error: {e}"),
            FontError::Parse(e) => e.fmt(f),
            FontError::InvalidField(msg) => write!(f, "invalid font field: {msg}"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Json(e) => Some(e),
            FontError::Parse(e) => Some(e),
            FontError::InvalidField(_) => None,
        }
    }
}

impl From<serde_json::Error> for FontError {
    fn from(e: serde_json::Error) -> Self {
        FontError::Json(e)
    }
}

impl From<ParseError> for FontError {
    fn from(e: ParseError) -> Self {
        FontError::Parse(e)
    }
}
