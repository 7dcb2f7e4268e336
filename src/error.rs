//! Error types for the filter engine

#[cfg(feature = "python")]
use pyo3::exceptions::{PyRuntimeError, PyValueError};
#[cfg(feature = "python")]
use pyo3::PyErr;
use thiserror::Error;

/// Errors raised while splitting a filter string into tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected quote {quote:?} at offset {offset}")]
    UnexpectedQuote { quote: char, offset: usize },

    #[error("incomplete token {text:?} starting at offset {offset}")]
    IncompleteToken { text: String, offset: usize },
}

/// Errors raised while building an expression tree from tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected close paren at offset {offset}")]
    UnexpectedCloseParen { offset: usize },

    #[error("unclosed paren at offset {offset}")]
    UnclosedParen { offset: usize },

    #[error("empty group at offset {offset}")]
    EmptyGroup { offset: usize },

    #[error("missing: AND before {token} at offset {offset}")]
    MissingAnd { token: String, offset: usize },

    #[error("missing term after AND at offset {offset}")]
    MissingTerm { offset: usize },

    #[error("parentheses nested too deep at offset {offset}")]
    TooDeep { offset: usize },

    #[error("missing operation after field at offset {offset}")]
    MissingOperation { offset: usize },

    #[error("invalid operation: {token} at offset {offset}")]
    InvalidOperation { token: String, offset: usize },

    #[error("missing value after operation at offset {offset}")]
    MissingValue { offset: usize },
}

/// Main error type for the filter engine
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<FilterError> for PyErr {
    fn from(err: FilterError) -> PyErr {
        match err {
            FilterError::Lex(e) => PyValueError::new_err(format!("Lex error: {}", e)),
            FilterError::Parse(e) => PyValueError::new_err(format!("Parse error: {}", e)),
            FilterError::InvalidConfig(msg) => {
                PyValueError::new_err(format!("Invalid config: {}", msg))
            }
            FilterError::Serialization(msg) => {
                PyRuntimeError::new_err(format!("Serialization error: {}", msg))
            }
        }
    }
}

/// Result type alias for the filter engine
pub type Result<T> = std::result::Result<T, FilterError>;
