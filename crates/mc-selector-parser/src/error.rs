//! Selector syntax errors.

use std::fmt;

/// Stable failure codes reported to command feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidSyntax,
    OnlySingleEntity,
    OnlyPlayers,
    InvalidArgumentName,
    InvalidArgumentValue,
}

impl ErrorCode {
    /// Numeric code as exposed to the command framework.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidSyntax => -2,
            Self::OnlySingleEntity => -3,
            Self::OnlyPlayers => -4,
            Self::InvalidArgumentName => -5,
            Self::InvalidArgumentValue => -6,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidSyntax => "INVALID_SYNTAX",
            Self::OnlySingleEntity => "ONLY_SINGLE_ENTITY_ERROR",
            Self::OnlyPlayers => "ONLY_PLAYERS_ERROR",
            Self::InvalidArgumentName => "INVALID_ARGUMENT_NAME",
            Self::InvalidArgumentValue => "INVALID_ARGUMENT_VALUE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selector string that could not be parsed.
///
/// `input` holds the offending text: the whole selector for structural
/// problems, the argument name for unknown names, the value for bad values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({code}): '{input}'")]
pub struct SyntaxError {
    pub code: ErrorCode,
    pub message: String,
    pub input: String,
}

impl SyntaxError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>, input: &str) -> Self {
        Self {
            code,
            message: message.into(),
            input: input.to_string(),
        }
    }
}
