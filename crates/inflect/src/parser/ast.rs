//! Public AST types for templates containing inflection patterns.
//!
//! These types are public so tooling can inspect patterns without resolving
//! them.

use crate::types::TokenName;

/// A parsed template: literal runs and patterns in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub pieces: Vec<Piece>,
}

impl Template {
    /// Iterate over the patterns of the template.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Pattern(pattern) => Some(pattern),
            Piece::Literal(_) => None,
        })
    }
}

/// A piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Text copied to the output unchanged (escapes already consumed).
    Literal(String),
    /// An inflection pattern to resolve.
    Pattern(Pattern),
}

/// The kinds a pattern declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindSpec {
    /// `@{...}`: the kind is inferred from the pattern's tokens.
    Inferred,
    /// `@gender{...}`
    Named(String),
    /// `@gender+number{...}`: segments use positional `+` tuples.
    Complex(Vec<String>),
}

impl KindSpec {
    /// Number of tokens each group entry carries.
    pub fn arity(&self) -> usize {
        match self {
            KindSpec::Inferred | KindSpec::Named(_) => 1,
            KindSpec::Complex(kinds) => kinds.len(),
        }
    }
}

/// A parsed `@...{...}` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub kinds: KindSpec,
    pub segments: Vec<Segment>,
    /// The trailing segment without a token specifier.
    pub free_text: Option<Text>,
    /// The pattern exactly as written, for error messages.
    pub source: String,
}

impl Pattern {
    /// Every named token in the pattern with its tuple position, in order.
    pub fn token_names(&self) -> impl Iterator<Item = (usize, &TokenName)> {
        self.segments
            .iter()
            .flat_map(|segment| segment.group.iter())
            .flat_map(|entry| entry.iter().enumerate())
            .filter_map(|(position, matcher)| match matcher {
                TokenMatcher::Name(name) => Some((position, name)),
                TokenMatcher::Wildcard => None,
            })
    }
}

/// One `tokens:text` pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Alternatives; any one matching is enough. Each entry holds one matcher
    /// per declared kind.
    pub group: Vec<Vec<TokenMatcher>>,
    /// Match when the caller's token is *not* in the group.
    pub negated: bool,
    pub text: Text,
}

/// A single position inside a group entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMatcher {
    Name(TokenName),
    /// `*`: any token of the position's kind.
    Wildcard,
}

/// What a segment emits when it wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Literal(String),
    /// `~`: the description of the matched token(s).
    Loud,
}
