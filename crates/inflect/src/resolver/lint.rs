//! Static checks of templates against a registry.
//!
//! Looks at patterns without any options and reports tokens that can never
//! match, kinds that cannot be found, and patterns that may silently resolve
//! to nothing.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::error::{compute_suggestions, format_suggestions};
use crate::parser::{KindSpec, Pattern, PatternError, TokenMatcher, parse_template};
use crate::registry::{InflectionRegistry, Kind, TokenClass};
use crate::resolver::evaluator::infer_kind;

/// A problem found by [`check_template`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateWarning {
    #[error("pattern '{pattern}': unknown token '{token}'{}", format_suggestions(suggestions))]
    UnknownToken {
        pattern: String,
        token: String,
        suggestions: Vec<String>,
    },

    #[error(
        "pattern '{pattern}': '{token}' is an alias of '{target}' and only matches with aliased patterns enabled"
    )]
    AliasToken {
        pattern: String,
        token: String,
        target: String,
    },

    #[error("pattern '{pattern}': token '{token}' belongs to kind '{actual_kind}', expected '{expected_kind}'")]
    WrongKind {
        pattern: String,
        token: String,
        expected_kind: String,
        actual_kind: String,
    },

    #[error("pattern '{pattern}': unknown kind '{kind}'")]
    UnknownKind { pattern: String, kind: String },

    #[error("pattern '{pattern}': no known token to infer the kind from")]
    UninferableKind { pattern: String },

    #[error("pattern '{pattern}': '{entry}' appears in more than one segment; only the first can match")]
    DuplicateEntry { pattern: String, entry: String },

    #[error("pattern '{pattern}': no free text and no default token of kind '{kind}' in the pattern")]
    NoFallback { pattern: String, kind: String },
}

/// Check every pattern of `template` against `registry`.
///
/// `aliased_patterns` decides, as during resolution, whether alias names in
/// patterns can match. Malformed patterns are returned as errors, everything
/// else as warnings in source order.
pub fn check_template(
    registry: &InflectionRegistry,
    template: &str,
    aliased_patterns: bool,
) -> Result<Vec<TemplateWarning>, PatternError> {
    let template = parse_template(template)?;
    let mut warnings = Vec::new();
    for pattern in template.patterns() {
        check_pattern(registry, pattern, aliased_patterns, &mut warnings);
    }
    Ok(warnings)
}

fn check_pattern(
    registry: &InflectionRegistry,
    pattern: &Pattern,
    aliased_patterns: bool,
    warnings: &mut Vec<TemplateWarning>,
) {
    let Some(kinds) = pattern_kinds(registry, pattern, aliased_patterns, warnings) else {
        return;
    };

    for (position, name) in pattern.token_names() {
        let Some(kind) = kinds.get(position) else {
            continue;
        };
        match registry.classify_in(kind.name(), name) {
            TokenClass::Real => {}
            TokenClass::Alias if aliased_patterns => {}
            TokenClass::Alias => {
                let target = registry
                    .resolve_token(name)
                    .map(|resolved| resolved.token.name().to_string())
                    .unwrap_or_default();
                warnings.push(TemplateWarning::AliasToken {
                    pattern: pattern.source.clone(),
                    token: name.to_string(),
                    target,
                });
            }
            TokenClass::Unknown => match registry.kind_of(name) {
                Some(actual_kind) => warnings.push(TemplateWarning::WrongKind {
                    pattern: pattern.source.clone(),
                    token: name.to_string(),
                    expected_kind: kind.name().to_string(),
                    actual_kind: actual_kind.to_string(),
                }),
                None => {
                    let available: Vec<&str> = registry
                        .real_tokens(kind.name())
                        .into_iter()
                        .map(|token| token.name().as_str())
                        .collect();
                    warnings.push(TemplateWarning::UnknownToken {
                        pattern: pattern.source.clone(),
                        token: name.to_string(),
                        suggestions: compute_suggestions(name, &available),
                    });
                }
            },
        }
    }

    check_duplicates(pattern, warnings);
    check_fallback(registry, pattern, &kinds, warnings);
}

fn pattern_kinds<'r>(
    registry: &'r InflectionRegistry,
    pattern: &Pattern,
    aliased_patterns: bool,
    warnings: &mut Vec<TemplateWarning>,
) -> Option<Vec<&'r Kind>> {
    let names: Vec<&String> = match &pattern.kinds {
        KindSpec::Inferred => {
            let kind = infer_kind(registry, pattern, aliased_patterns);
            if kind.is_none() {
                warnings.push(TemplateWarning::UninferableKind {
                    pattern: pattern.source.clone(),
                });
            }
            return kind.map(|kind| vec![kind]);
        }
        KindSpec::Named(name) => vec![name],
        KindSpec::Complex(names) => names.iter().collect(),
    };

    let mut kinds = Vec::with_capacity(names.len());
    let mut complete = true;
    for name in names {
        match registry.lookup_kind(name) {
            Some(kind) => kinds.push(kind),
            None => {
                complete = false;
                warnings.push(TemplateWarning::UnknownKind {
                    pattern: pattern.source.clone(),
                    kind: name.clone(),
                });
            }
        }
    }
    complete.then_some(kinds)
}

/// Non-negated entries repeated in a later segment can never win there.
fn check_duplicates(pattern: &Pattern, warnings: &mut Vec<TemplateWarning>) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for segment in pattern.segments.iter().filter(|segment| !segment.negated) {
        let mut in_segment = BTreeSet::new();
        for entry in &segment.group {
            let key = entry
                .iter()
                .map(|matcher| match matcher {
                    TokenMatcher::Name(name) => name.as_str(),
                    TokenMatcher::Wildcard => "*",
                })
                .collect::<Vec<_>>()
                .join("+");
            if seen.contains(&key) && reported.insert(key.clone()) {
                warnings.push(TemplateWarning::DuplicateEntry {
                    pattern: pattern.source.clone(),
                    entry: key.clone(),
                });
            }
            in_segment.insert(key);
        }
        seen.extend(in_segment);
    }
}

fn check_fallback(
    registry: &InflectionRegistry,
    pattern: &Pattern,
    kinds: &[&Kind],
    warnings: &mut Vec<TemplateWarning>,
) {
    if pattern.free_text.is_some() {
        return;
    }
    for (position, kind) in kinds.iter().enumerate() {
        let default = registry.default_token(kind.name());
        let mentioned = pattern
            .segments
            .iter()
            .flat_map(|segment| segment.group.iter())
            .filter_map(|entry| entry.get(position))
            .any(|matcher| match matcher {
                TokenMatcher::Wildcard => default.is_some(),
                TokenMatcher::Name(name) => default.is_some_and(|default| {
                    registry
                        .resolve_token(name)
                        .is_some_and(|resolved| resolved.token == default)
                }),
            });
        if !mentioned {
            warnings.push(TemplateWarning::NoFallback {
                pattern: pattern.source.clone(),
                kind: kind.name().to_string(),
            });
        }
    }
}
