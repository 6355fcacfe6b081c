use std::{error::Error, fmt::Display};

pub type JsonPathResult<T> = Result<T, JsonPathError>;

/// What the JSON parser was looking at when it gave up.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The grammar required something else at this point, e.g. "',' or '}'".
    Expected(&'static str),
    /// Arrays and objects were nested deeper than the configured limit.
    DepthLimitExceeded(usize),
}

/// A malformed JSON document. `offset` is a byte offset into the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    offset: usize,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn expected(offset: usize, expected: &'static str) -> Self {
        ParseError {
            offset,
            kind: ParseErrorKind::Expected(expected),
        }
    }

    pub(crate) fn too_deep(offset: usize, max_depth: usize) -> Self {
        ParseError {
            offset,
            kind: ParseErrorKind::DepthLimitExceeded(max_depth),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Description of the expected token, if the failure was a grammar violation.
    pub fn expected_token(&self) -> Option<&'static str> {
        match self.kind {
            ParseErrorKind::Expected(e) => Some(e),
            ParseErrorKind::DepthLimitExceeded(_) => None,
        }
    }
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::Expected(e) => {
                f.write_fmt(format_args!("Invalid JSON: expected {} at {}", e, self.offset))
            }
            ParseErrorKind::DepthLimitExceeded(max) => f.write_fmt(format_args!(
                "Invalid JSON: nesting deeper than {} levels at {}",
                max, self.offset
            )),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum JsonPathError {
    /// The path text is not in the supported grammar; carries the byte offset.
    InvalidJsonPath(String, usize),
    /// The caller broke the contract of an entry point, e.g. an empty path.
    InvalidArgument(String),
    /// The document could not be parsed.
    Parse(ParseError),
}

impl Error for JsonPathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JsonPathError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for JsonPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonPathError::InvalidJsonPath(e, pos) => {
                f.write_fmt(format_args!("Invalid JsonPath: {} at {}", e, pos))
            }
            JsonPathError::InvalidArgument(e) => {
                f.write_fmt(format_args!("Invalid argument: {}", e))
            }
            JsonPathError::Parse(e) => Display::fmt(e, f),
        }
    }
}

impl From<ParseError> for JsonPathError {
    fn from(value: ParseError) -> Self {
        JsonPathError::Parse(value)
    }
}
