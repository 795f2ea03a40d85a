//! Errors for malformed inflection patterns.

use thiserror::Error;

/// A pattern whose syntax is broken.
///
/// These point at bad translation data and are reported regardless of the
/// `raises` switch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed inflection pattern '{pattern}': {kind}")]
pub struct PatternError {
    /// The offending text, starting at the pattern's `@`.
    pub pattern: String,
    pub kind: PatternErrorKind,
}

impl PatternError {
    pub fn new(pattern: impl Into<String>, kind: PatternErrorKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }
}

/// What is wrong with a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    #[error("missing closing '}}'")]
    Unclosed,

    #[error("unexpected '{{' inside the pattern body")]
    NestedBrace,

    #[error("empty token specifier")]
    EmptyToken,

    #[error("invalid token name '{name}'")]
    InvalidTokenName { name: String },

    #[error("negated and plain tokens mixed in one group")]
    MixedNegation,

    #[error("expected {expected} '+'-joined tokens per entry, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("free text must be the last segment")]
    FreeTextNotLast,

    #[error("wildcard '*' needs a named or complex pattern")]
    WildcardWithoutKind,

    #[error("pattern has no token segments")]
    NoSegments,
}
