#![forbid(unsafe_code)]

//! Label errors.

use typist_markup::ParseError;

/// Failure to load text into a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The markup could not be parsed.
    Parse(ParseError),
}

impl From<ParseError> for LabelError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid label markup: {}", err),
        }
    }
}

impl std::error::Error for LabelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
