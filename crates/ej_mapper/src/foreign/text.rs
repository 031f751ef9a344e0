use alloc::string::String;

use ej_node::JsonNode;
use thiserror::Error;

// -----------------------------------------------------------------------------
// TextParser

/// Parses JSON text into a tree.
pub trait TextParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<JsonNode, ParseError>;
}

/// JSON text that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at line {line} column {column}")]
pub struct ParseError {
    message: String,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Creates an error at a 1-based `line` and `column`.
    #[inline]
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }
}

// -----------------------------------------------------------------------------
// JsonTextParser

/// A [`TextParser`] backed by `serde_json`.
///
/// ```
/// use ej_mapper::foreign::{JsonTextParser, TextParser};
///
/// let node = JsonTextParser.parse(r#"{"a": [1, 2]}"#).unwrap();
/// assert_eq!(node["a"][0].as_u64(), Some(1));
///
/// let err = JsonTextParser.parse("[1,").unwrap_err();
/// assert_eq!(err.line(), 1);
/// ```
#[cfg(feature = "serde_json")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTextParser;

#[cfg(feature = "serde_json")]
impl TextParser for JsonTextParser {
    fn parse(&self, text: &str) -> Result<JsonNode, ParseError> {
        serde_json::from_str(text).map_err(|err| {
            // serde_json already appends the position to its message.
            let full = alloc::format!("{err}");
            let suffix = alloc::format!(" at line {} column {}", err.line(), err.column());
            let message = full.strip_suffix(suffix.as_str()).unwrap_or(full.as_str());
            ParseError::new(message, err.line(), err.column())
        })
    }
}

#[cfg(feature = "serde_json")]
static DEFAULT_PARSER: JsonTextParser = JsonTextParser;

#[inline]
pub(super) fn default_parser() -> Option<&'static dyn TextParser> {
    #[cfg(feature = "serde_json")]
    {
        Some(&DEFAULT_PARSER)
    }
    #[cfg(not(feature = "serde_json"))]
    {
        None
    }
}
