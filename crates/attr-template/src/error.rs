//! Parse errors for paths and templates

use thiserror::Error;

/// Malformed path or template source.
///
/// `line` and `column` are 1-based and point at the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("attribute template syntax error at line {line} column {column}: {message}")]
pub struct SyntaxError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}
