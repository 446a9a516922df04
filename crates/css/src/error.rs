//! Stylesheet parsing error types

use thiserror::Error;

use crate::tokenizer::SpecialToken;

/// Stylesheet parsing result type
pub type CssResult<T> = Result<T, CssError>;

/// Stylesheet parsing errors
///
/// Every variant means the same thing to callers: the stylesheet is malformed
/// and no document was produced. Source positions are not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("Unexpected {token} while in {state}")]
    UnexpectedToken {
        token: SpecialToken,
        state: &'static str,
    },

    #[error("Empty token before {token}")]
    EmptyToken {
        token: SpecialToken,
    },

    #[error("Nested media query '{rule}'")]
    NestedMediaQuery {
        rule: String,
    },

    #[error("Unexpected end of stylesheet while in {state}")]
    UnexpectedEof {
        state: &'static str,
    },
}

impl CssError {
    pub fn unexpected(token: SpecialToken, state: &'static str) -> Self {
        Self::UnexpectedToken { token, state }
    }

    pub fn empty(token: SpecialToken) -> Self {
        Self::EmptyToken { token }
    }

    pub fn unexpected_eof(state: &'static str) -> Self {
        Self::UnexpectedEof { state }
    }
}
