//! Error types for registry construction and pattern resolution.

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::PatternError;

/// Errors detected while building an inflection registry.
///
/// These are never tolerated: a failed build leaves the previously published
/// registry for the locale untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The locale designator is not a valid language identifier.
    #[error("invalid locale '{locale}'")]
    InvalidLocale { locale: String },

    /// A kind name is not an identifier.
    #[error("malformed kind name '{kind}'")]
    MalformedKind { kind: String },

    /// A token or alias definition is unusable.
    #[error("malformed token '{token}' in kind '{kind}': {reason}")]
    MalformedToken {
        kind: String,
        token: String,
        reason: String,
    },

    /// The same token name is defined by two kinds.
    #[error("token '{token}' is defined in both '{first_kind}' and '{second_kind}'")]
    DuplicateToken {
        token: String,
        first_kind: String,
        second_kind: String,
    },

    /// An alias points at a name that is not defined anywhere.
    #[error("alias '{alias}' in kind '{kind}' points to unknown token '{target}'")]
    DanglingAlias {
        kind: String,
        alias: String,
        target: String,
    },

    /// Following an alias chain came back to a name already visited.
    #[error("alias cycle in kind '{kind}': {}", chain.join(" -> "))]
    AliasCycle { kind: String, chain: Vec<String> },

    /// An alias chain reaches a token of a different kind.
    #[error("alias '{alias}' in kind '{kind}' points to '{target}' of kind '{target_kind}'")]
    AliasKindMismatch {
        kind: String,
        alias: String,
        target: String,
        target_kind: String,
    },

    /// The default of a kind names an unknown token.
    #[error("default of kind '{kind}' points to unknown token '{target}'")]
    DanglingDefault { kind: String, target: String },

    /// The default of a kind resolves to a token of another kind.
    #[error("default of kind '{kind}' points to '{target}' of kind '{target_kind}'")]
    DefaultOutsideKind {
        kind: String,
        target: String,
        target_kind: String,
    },
}

/// Errors raised while resolving a pattern with the `raises` switch enabled.
///
/// With `raises` disabled these situations fall back to default tokens, free
/// text or empty output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No option was supplied for a kind and no usable default exists.
    #[error("no option given for kind '{kind}' in pattern '{pattern}'")]
    MissingOption { kind: String, pattern: String },

    /// The option value is not a token of the kind and no usable default exists.
    #[error("option '{token}' is not a token of kind '{kind}' in pattern '{pattern}'")]
    InvalidOption {
        kind: String,
        token: String,
        pattern: String,
    },

    /// The pattern names a token the registry does not know.
    #[error(
        "unknown token '{token}' in pattern '{pattern}'{}",
        format_suggestions(suggestions)
    )]
    UnknownToken {
        token: String,
        pattern: String,
        suggestions: Vec<String>,
    },

    /// The pattern names an alias while aliased patterns are disabled.
    #[error("alias '{token}' used in pattern '{pattern}' (aliased patterns are disabled)")]
    AliasInPattern { token: String, pattern: String },

    /// The pattern places a token where a different kind is expected.
    #[error(
        "token '{token}' of kind '{actual_kind}' used where kind '{expected_kind}' is expected in pattern '{pattern}'"
    )]
    WrongKind {
        token: String,
        expected_kind: String,
        actual_kind: String,
        pattern: String,
    },

    /// A named or complex pattern declares a kind the locale does not have.
    #[error("unknown kind '{kind}' in pattern '{pattern}'")]
    UnknownKind { kind: String, pattern: String },
}

/// Any failure of an inflection call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InflectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The host backend has no template for this key.
    #[error("translation not found: '{key}' in locale '{locale}'")]
    TranslationNotFound { locale: String, key: String },
}

pub(crate) fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute "did you mean" suggestions for a misspelled name.
///
/// Returns up to three candidates within edit distance 1 (short names) or 2,
/// closest first.
pub fn compute_suggestions<S: AsRef<str>>(key: &str, available: &[S]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &str)> = available
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| *candidate != key)
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort_unstable();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
