//! Template scanner using winnow.
//!
//! Splits a template string into pieces. Handles:
//! - Literal text, passed through unchanged
//! - Patterns: `@{...}`, `@kind{...}` and `@kind+kind{...}`
//! - Escaped markers: `\@` and `@@` in front of a would-be pattern emit `@`
//! - Inside pattern bodies: `\` escapes and the loud marker `~`

use winnow::combinator::{alt, cut_err, fail, opt, peek, preceded, repeat, separated, terminated};
use winnow::error::StrContext;
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::ast::{KindSpec, Pattern, Piece, Segment, Template, Text, TokenMatcher};
use super::error::{PatternError, PatternErrorKind};
use crate::types::{TokenName, is_identifier};

/// Scan `input` lazily, one piece per iteration.
///
/// The returned iterator is `Clone`, so a scan can be restarted from any
/// point. After the first malformed pattern it yields the error and stops.
///
/// # Example
///
/// ```
/// use inflect::parser::{Piece, parse};
///
/// let pieces: Vec<_> = parse("Dear @{f:Madam|m:Sir}!").collect::<Result<_, _>>().unwrap();
/// assert_eq!(pieces.len(), 3);
/// assert!(matches!(&pieces[1], Piece::Pattern(p) if p.segments.len() == 2));
/// ```
pub fn parse(input: &str) -> Pieces<'_> {
    Pieces { remaining: input }
}

/// Parse a whole template, merging adjacent literal runs.
pub fn parse_template(input: &str) -> Result<Template, PatternError> {
    let mut pieces: Vec<Piece> = Vec::new();
    for piece in parse(input) {
        match piece? {
            Piece::Literal(text) => {
                if let Some(Piece::Literal(prev)) = pieces.last_mut() {
                    prev.push_str(&text);
                } else {
                    pieces.push(Piece::Literal(text));
                }
            }
            pattern @ Piece::Pattern(_) => pieces.push(pattern),
        }
    }
    Ok(Template { pieces })
}

/// Lazy sequence of template pieces. See [`parse`].
#[derive(Debug, Clone)]
pub struct Pieces<'a> {
    remaining: &'a str,
}

impl Pieces<'_> {
    /// The input not yet scanned.
    pub fn remaining(&self) -> &str {
        self.remaining
    }
}

impl Iterator for Pieces<'_> {
    type Item = Result<Piece, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let start = self.remaining;
        let result = match piece.parse_next(&mut self.remaining) {
            Ok(RawPiece::Literal(text)) => Ok(Piece::Literal(text)),
            Ok(RawPiece::Pattern(raw)) => build_pattern(raw).map(Piece::Pattern),
            Err(_) => Err(PatternError::new(start, PatternErrorKind::Unclosed)),
        };
        if result.is_err() {
            self.remaining = "";
        }
        Some(result)
    }
}

enum RawPiece {
    Literal(String),
    Pattern(RawPattern),
}

struct RawPattern {
    kinds: Vec<String>,
    /// The segments, or why the body is malformed.
    body: Result<Vec<RawSegment>, PatternErrorKind>,
    source: String,
}

struct RawSegment {
    spec: Option<String>,
    text: Text,
}

/// Parse one piece (escaped marker, pattern, or literal run).
fn piece(input: &mut &str) -> ModalResult<RawPiece> {
    alt((escaped_marker, raw_pattern.map(RawPiece::Pattern), literal_run)).parse_next(input)
}

/// Parse `\@` or `@@` when a pattern would follow.
fn escaped_marker(input: &mut &str) -> ModalResult<RawPiece> {
    terminated(alt(("\\@", "@@")), peek(pattern_head))
        .map(|_| RawPiece::Literal("@".to_string()))
        .parse_next(input)
}

/// What follows `@` in a pattern: optional kinds, then `{`.
fn pattern_head(input: &mut &str) -> ModalResult<()> {
    (opt(kind_spec), '{').void().parse_next(input)
}

/// Parse text up to the next possible marker, or a lone marker character.
fn literal_run(input: &mut &str) -> ModalResult<RawPiece> {
    alt((
        take_while(1.., |c: char| c != '@' && c != '\\'),
        one_of(['@', '\\']).take(),
    ))
    .map(|text: &str| RawPiece::Literal(text.to_string()))
    .parse_next(input)
}

/// Parse a pattern: `@` kinds? `{` segments `}`
fn raw_pattern(input: &mut &str) -> ModalResult<RawPattern> {
    (preceded('@', opt(kind_spec)), preceded('{', pattern_body))
        .with_taken()
        .map(|((kinds, body), source)| RawPattern {
            kinds: kinds.unwrap_or_default(),
            body,
            source: source.to_string(),
        })
        .parse_next(input)
}

/// Parse a kind specifier: `gender` or `gender+number`.
fn kind_spec(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(1.., identifier.map(str::to_string), '+').parse_next(input)
}

/// Parse `|`-separated segments and the closing brace.
///
/// A nested `{` ends the body and is reported through the result, so the
/// pattern span stops at it. Running out of input is fatal for the template.
fn pattern_body(input: &mut &str) -> ModalResult<Result<Vec<RawSegment>, PatternErrorKind>> {
    let mut segments = vec![raw_segment.parse_next(input)?];
    while opt('|').parse_next(input)?.is_some() {
        segments.push(raw_segment.parse_next(input)?);
    }
    Ok(closing_brace(input)?.map(|()| segments))
}

fn closing_brace(input: &mut &str) -> ModalResult<Result<(), PatternErrorKind>> {
    alt((
        '}'.value(Ok(())),
        '{'.value(Err(PatternErrorKind::NestedBrace)),
        cut_err(fail.context(StrContext::Label("closing brace"))),
    ))
    .parse_next(input)
}

/// Parse `spec:text` or bare free text.
fn raw_segment(input: &mut &str) -> ModalResult<RawSegment> {
    let spec = opt(terminated(take_while(0.., is_spec_char), ':')).parse_next(input)?;
    let text = segment_text.parse_next(input)?;
    Ok(RawSegment {
        spec: spec.map(str::to_string),
        text,
    })
}

fn is_spec_char(c: char) -> bool {
    !matches!(c, ':' | '|' | '{' | '}' | '\\')
}

/// Parse segment text: a lone `~`, or literal text with `\` escapes.
fn segment_text(input: &mut &str) -> ModalResult<Text> {
    alt((
        terminated('~', peek(one_of(['|', '}']))).value(Text::Loud),
        repeat(0.., text_fragment).map(|fragments: Vec<&str>| Text::Literal(fragments.concat())),
    ))
    .parse_next(input)
}

fn text_fragment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        preceded('\\', any.take()),
        take_while(1.., |c: char| !matches!(c, '|' | '{' | '}' | '\\')),
    ))
    .parse_next(input)
}

/// Parse an identifier.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Check the raw segments and turn them into a [`Pattern`].
fn build_pattern(raw: RawPattern) -> Result<Pattern, PatternError> {
    let RawPattern {
        mut kinds,
        body,
        source,
    } = raw;
    let raw_segments = match body {
        Ok(segments) => segments,
        Err(kind) => return Err(PatternError::new(source, kind)),
    };
    let kinds = match kinds.len() {
        0 => KindSpec::Inferred,
        1 => KindSpec::Named(kinds.remove(0)),
        _ => KindSpec::Complex(kinds),
    };

    let count = raw_segments.len();
    let mut segments = Vec::with_capacity(count);
    let mut free_text = None;
    for (index, raw_segment) in raw_segments.into_iter().enumerate() {
        match raw_segment.spec {
            None if index + 1 == count => free_text = Some(raw_segment.text),
            None => {
                return Err(PatternError::new(source, PatternErrorKind::FreeTextNotLast));
            }
            Some(spec) => match parse_group(&spec, &kinds) {
                Ok((group, negated)) => segments.push(Segment {
                    group,
                    negated,
                    text: raw_segment.text,
                }),
                Err(kind) => return Err(PatternError::new(source, kind)),
            },
        }
    }
    if segments.is_empty() {
        return Err(PatternError::new(source, PatternErrorKind::NoSegments));
    }

    Ok(Pattern {
        kinds,
        segments,
        free_text,
        source,
    })
}

/// Parse a token specifier such as `f,m`, `!n` or `f+s,m+p`.
fn parse_group(
    spec: &str,
    kinds: &KindSpec,
) -> Result<(Vec<Vec<TokenMatcher>>, bool), PatternErrorKind> {
    let arity = kinds.arity();
    let mut negation = None;
    let mut group = Vec::new();

    for entry in spec.split(',').map(str::trim) {
        let (negated, body) = match entry.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, entry),
        };
        if body.is_empty() {
            return Err(PatternErrorKind::EmptyToken);
        }
        if negation.is_some_and(|previous| previous != negated) {
            return Err(PatternErrorKind::MixedNegation);
        }
        negation = Some(negated);

        let parts: Vec<&str> = body.split('+').map(str::trim).collect();
        if parts.len() != arity {
            return Err(PatternErrorKind::ArityMismatch {
                expected: arity,
                found: parts.len(),
            });
        }
        let tuple = parts
            .into_iter()
            .map(|part| token_matcher(part, kinds))
            .collect::<Result<Vec<_>, _>>()?;
        group.push(tuple);
    }

    Ok((group, negation.unwrap_or(false)))
}

fn token_matcher(part: &str, kinds: &KindSpec) -> Result<TokenMatcher, PatternErrorKind> {
    match part {
        "" => Err(PatternErrorKind::EmptyToken),
        "*" if *kinds == KindSpec::Inferred => Err(PatternErrorKind::WildcardWithoutKind),
        "*" => Ok(TokenMatcher::Wildcard),
        name if is_identifier(name) => Ok(TokenMatcher::Name(TokenName::new(name))),
        name => Err(PatternErrorKind::InvalidTokenName {
            name: name.to_string(),
        }),
    }
}
