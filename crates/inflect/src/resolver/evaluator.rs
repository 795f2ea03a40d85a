//! Pattern resolution.
//!
//! For each pattern: find the governing kinds, turn the caller's options into
//! effective tokens, pick the first matching segment, and fall back through
//! excluded defaults, free text and finally empty output.

use std::slice;

use tracing::debug;

use crate::error::{InflectError, ResolutionError, compute_suggestions};
use crate::parser::{KindSpec, Pattern, Piece, Template, Text, TokenMatcher, parse};
use crate::registry::{InflectionRegistry, Kind, RealToken};
use crate::resolver::context::{Requested, ResolveContext};
use crate::types::{TokenId, TokenName};

/// Parse `template` and resolve every pattern in it.
///
/// Malformed patterns are always errors. Resolution problems are errors only
/// when the `raises` switch is on.
///
/// # Example
///
/// ```
/// use inflect::{InflectionConfig, InflectionRegistry, KindConfig, Options, ResolveContext, Switches, interpolate};
///
/// let config = InflectionConfig::new().kind(
///     "gender",
///     KindConfig::new().token("f", "female").token("m", "male").default_token("m"),
/// );
/// let registry = InflectionRegistry::build("en", &config).unwrap();
/// let options = Options::new().with("gender", "f");
/// let ctx = ResolveContext::new(&registry, &options, Switches::default());
///
/// assert_eq!(interpolate("Dear @{f:Madam|m:Sir}", &ctx).unwrap(), "Dear Madam");
/// ```
pub fn interpolate(template: &str, ctx: &ResolveContext<'_>) -> Result<String, InflectError> {
    let mut output = String::with_capacity(template.len());
    for piece in parse(template) {
        match piece? {
            Piece::Literal(text) => output.push_str(&text),
            Piece::Pattern(pattern) => output.push_str(&resolve_pattern(&pattern, ctx)?),
        }
    }
    Ok(output)
}

/// Resolve an already parsed template.
pub fn resolve_template(
    template: &Template,
    ctx: &ResolveContext<'_>,
) -> Result<String, ResolutionError> {
    let mut output = String::new();
    for piece in &template.pieces {
        match piece {
            Piece::Literal(text) => output.push_str(text),
            Piece::Pattern(pattern) => output.push_str(&resolve_pattern(pattern, ctx)?),
        }
    }
    Ok(output)
}

/// A pattern position after looking its token up in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Token(TokenId),
    Any,
    /// Unknown, misplaced or disallowed token: never matches.
    Never,
}

impl Slot {
    fn matches(self, token: Option<TokenId>) -> bool {
        match self {
            Slot::Token(id) => token == Some(id),
            Slot::Any => token.is_some(),
            Slot::Never => false,
        }
    }
}

struct CompiledSegment {
    entries: Vec<Vec<Slot>>,
    negated: bool,
}

/// Resolve a single pattern to the text that replaces it.
pub fn resolve_pattern(
    pattern: &Pattern,
    ctx: &ResolveContext<'_>,
) -> Result<String, ResolutionError> {
    let Some(kinds) = governing_kinds(pattern, ctx)? else {
        return Ok(render_free_text(pattern, &[], ctx));
    };
    let compiled = compile_segments(pattern, &kinds, ctx)?;
    let switches = ctx.switches();

    let requested: Vec<Requested> = kinds.iter().map(|kind| ctx.requested(kind)).collect();
    let effective: Vec<Option<TokenId>> = kinds
        .iter()
        .zip(&requested)
        .map(|(kind, request)| ctx.effective(kind, request))
        .collect();

    if switches.raises {
        check_required(pattern, &kinds, &requested, &compiled, ctx)?;
    }

    if let Some(index) = first_match(&compiled, &effective) {
        return Ok(render(&pattern.segments[index].text, &effective, ctx));
    }

    if switches.excluded_defaults {
        if let Some(substituted) = substitute_excluded(&kinds, &requested, &compiled, &effective) {
            if let Some(index) = first_match(&compiled, &substituted) {
                debug!(
                    pattern = %pattern.source,
                    "option not mentioned in pattern; using default token"
                );
                return Ok(render(&pattern.segments[index].text, &substituted, ctx));
            }
        }
    }

    Ok(render_free_text(pattern, &effective, ctx))
}

/// Find the kinds governing `pattern`.
///
/// Returns `Ok(None)` when they cannot be determined and errors are not
/// raised; the pattern then resolves to its free text.
fn governing_kinds<'r>(
    pattern: &Pattern,
    ctx: &ResolveContext<'r>,
) -> Result<Option<Vec<&'r Kind>>, ResolutionError> {
    let registry = ctx.registry();
    let names = match &pattern.kinds {
        KindSpec::Inferred => {
            if let Some(kind) = infer_kind(registry, pattern, ctx.switches().aliased_patterns) {
                return Ok(Some(vec![kind]));
            }
            if ctx.switches().raises {
                if let Some((_, name)) = pattern.token_names().next() {
                    return Err(match registry.resolve_token(name) {
                        Some(_) => ResolutionError::AliasInPattern {
                            token: name.to_string(),
                            pattern: pattern.source.clone(),
                        },
                        None => unknown_token(name, None, pattern, ctx),
                    });
                }
            }
            debug!(pattern = %pattern.source, "no known token in pattern");
            return Ok(None);
        }
        KindSpec::Named(name) => slice::from_ref(name),
        KindSpec::Complex(names) => names.as_slice(),
    };

    let mut kinds = Vec::with_capacity(names.len());
    for name in names {
        match registry.lookup_kind(name) {
            Some(kind) => kinds.push(kind),
            None if ctx.switches().raises => {
                return Err(ResolutionError::UnknownKind {
                    kind: name.clone(),
                    pattern: pattern.source.clone(),
                });
            }
            None => {
                debug!(pattern = %pattern.source, kind = %name, "unknown kind in pattern");
                return Ok(None);
            }
        }
    }
    Ok(Some(kinds))
}

/// The kind of a simple pattern: that of its first eligible token.
///
/// Real tokens are always eligible, aliases only with `aliased_patterns`.
pub(super) fn infer_kind<'r>(
    registry: &'r InflectionRegistry,
    pattern: &Pattern,
    aliased_patterns: bool,
) -> Option<&'r Kind> {
    pattern
        .token_names()
        .filter_map(|(_, name)| registry.resolve_token(name))
        .find(|resolved| aliased_patterns || !resolved.via_alias)
        .map(|resolved| resolved.kind)
}

fn compile_segments(
    pattern: &Pattern,
    kinds: &[&Kind],
    ctx: &ResolveContext<'_>,
) -> Result<Vec<CompiledSegment>, ResolutionError> {
    pattern
        .segments
        .iter()
        .map(|segment| {
            let entries = segment
                .group
                .iter()
                .map(|entry| {
                    entry
                        .iter()
                        .zip(kinds)
                        .map(|(matcher, kind)| compile_matcher(matcher, kind, pattern, ctx))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CompiledSegment {
                entries,
                negated: segment.negated,
            })
        })
        .collect()
}

fn compile_matcher(
    matcher: &TokenMatcher,
    kind: &Kind,
    pattern: &Pattern,
    ctx: &ResolveContext<'_>,
) -> Result<Slot, ResolutionError> {
    let TokenMatcher::Name(name) = matcher else {
        return Ok(Slot::Any);
    };
    let switches = ctx.switches();
    let error = match ctx.registry().resolve_token(name) {
        None => unknown_token(name, Some(kind), pattern, ctx),
        Some(resolved) if resolved.kind.name() != kind.name() => ResolutionError::WrongKind {
            token: name.to_string(),
            expected_kind: kind.name().to_string(),
            actual_kind: resolved.kind.name().to_string(),
            pattern: pattern.source.clone(),
        },
        Some(resolved) if resolved.via_alias && !switches.aliased_patterns => {
            ResolutionError::AliasInPattern {
                token: name.to_string(),
                pattern: pattern.source.clone(),
            }
        }
        Some(resolved) => return Ok(Slot::Token(resolved.id)),
    };

    if switches.raises {
        Err(error)
    } else {
        debug!(%error, "ignoring pattern token");
        Ok(Slot::Never)
    }
}

fn unknown_token(
    name: &TokenName,
    kind: Option<&Kind>,
    pattern: &Pattern,
    ctx: &ResolveContext<'_>,
) -> ResolutionError {
    let registry = ctx.registry();
    let available: Vec<&str> = match kind {
        Some(kind) => registry
            .real_tokens(kind.name())
            .into_iter()
            .map(|token| token.name().as_str())
            .collect(),
        None => registry.token_names(),
    };
    ResolutionError::UnknownToken {
        token: name.to_string(),
        pattern: pattern.source.clone(),
        suggestions: compute_suggestions(name, &available),
    }
}

/// With `raises`, every kind needs a known option or a default the pattern
/// mentions.
fn check_required(
    pattern: &Pattern,
    kinds: &[&Kind],
    requested: &[Requested],
    compiled: &[CompiledSegment],
    ctx: &ResolveContext<'_>,
) -> Result<(), ResolutionError> {
    for (position, (kind, request)) in kinds.iter().zip(requested).enumerate() {
        if matches!(request, Requested::Known(_)) {
            continue;
        }
        let default_usable = ctx.switches().unknown_defaults
            && kind
                .default_id()
                .is_some_and(|id| mentions(compiled, position, id));
        if default_usable {
            continue;
        }
        return Err(match request {
            Requested::Unknown(token) => ResolutionError::InvalidOption {
                kind: kind.name().to_string(),
                token: token.to_string(),
                pattern: pattern.source.clone(),
            },
            Requested::Absent | Requested::Nil | Requested::Known(_) => {
                ResolutionError::MissingOption {
                    kind: kind.name().to_string(),
                    pattern: pattern.source.clone(),
                }
            }
        });
    }
    Ok(())
}

/// Index of the first segment matching the tokens, in declaration order.
fn first_match(compiled: &[CompiledSegment], tokens: &[Option<TokenId>]) -> Option<usize> {
    compiled.iter().position(|segment| {
        let hit = segment.entries.iter().any(|entry| {
            entry
                .iter()
                .zip(tokens)
                .all(|(slot, token)| slot.matches(*token))
        });
        hit != segment.negated
    })
}

/// Returns true if some segment names token `id` at `position`.
fn mentions(compiled: &[CompiledSegment], position: usize, id: TokenId) -> bool {
    compiled
        .iter()
        .flat_map(|segment| segment.entries.iter())
        .any(|entry| entry.get(position) == Some(&Slot::Token(id)))
}

/// Replace valid but unmentioned tokens by their kind's default.
///
/// Returns `None` when nothing was replaced.
fn substitute_excluded(
    kinds: &[&Kind],
    requested: &[Requested],
    compiled: &[CompiledSegment],
    effective: &[Option<TokenId>],
) -> Option<Vec<Option<TokenId>>> {
    let mut substituted = effective.to_vec();
    let mut changed = false;
    for (position, (kind, request)) in kinds.iter().zip(requested).enumerate() {
        let Requested::Known(id) = request else {
            continue;
        };
        if mentions(compiled, position, *id) {
            continue;
        }
        if let Some(default) = kind.default_id() {
            substituted[position] = Some(default);
            changed = true;
        }
    }
    changed.then_some(substituted)
}

fn render(text: &Text, tokens: &[Option<TokenId>], ctx: &ResolveContext<'_>) -> String {
    match text {
        Text::Literal(text) => text.clone(),
        Text::Loud => tokens
            .iter()
            .flatten()
            .filter_map(|id| ctx.registry().token(*id))
            .map(RealToken::description)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn render_free_text(
    pattern: &Pattern,
    tokens: &[Option<TokenId>],
    ctx: &ResolveContext<'_>,
) -> String {
    pattern
        .free_text
        .as_ref()
        .map(|text| render(text, tokens, ctx))
        .unwrap_or_default()
}
