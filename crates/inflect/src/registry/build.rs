//! Validation and alias flattening for [`InflectionRegistry::build`].

use std::collections::{BTreeMap, HashMap};

use icu_locale_core::LanguageIdentifier;
use tracing::{debug, warn};

use super::{InflectionConfig, InflectionRegistry, Kind, RealToken, TokenEntry, TokenSpec};
use crate::error::ConfigError;
use crate::types::{TokenId, TokenName, is_identifier};

/// Where a configured name was declared.
struct Declared<'c> {
    kind: &'c str,
    spec: &'c TokenSpec,
}

impl InflectionRegistry {
    /// Build and validate the registry of one locale.
    ///
    /// Fails with a [`ConfigError`] on the first broken invariant: an invalid
    /// locale, malformed names, a token defined by two kinds, dangling or
    /// cyclic aliases, aliases leaving their kind, or a default outside its
    /// kind. Nothing of a failed build is kept.
    pub fn build(locale: &str, config: &InflectionConfig) -> Result<Self, ConfigError> {
        validate_locale(locale)?;

        let mut declared: HashMap<&str, Declared<'_>> = HashMap::new();
        let mut tokens = Vec::new();
        let mut kinds = BTreeMap::new();
        let mut entries = HashMap::new();
        let mut pending_aliases = Vec::new();

        for (kind_name, kind_config) in config.kinds() {
            if !is_identifier(kind_name) {
                return Err(ConfigError::MalformedKind {
                    kind: kind_name.clone(),
                });
            }
            if kind_config.is_empty() {
                warn!(locale, kind = %kind_name, "inflection kind has no tokens");
            }

            let mut kind = Kind::new(kind_name);
            for (name, spec) in kind_config.tokens() {
                check_token(kind_name, name, spec)?;
                if let Some(first) = declared.get(name) {
                    return Err(ConfigError::DuplicateToken {
                        token: name.to_string(),
                        first_kind: first.kind.to_string(),
                        second_kind: kind_name.clone(),
                    });
                }
                declared.insert(
                    name,
                    Declared {
                        kind: kind_name,
                        spec,
                    },
                );

                match spec {
                    TokenSpec::Description(description) => {
                        let id = TokenId::from_index(tokens.len());
                        tokens.push(RealToken {
                            name: TokenName::new(name),
                            description: description.clone(),
                            kind: kind_name.clone(),
                        });
                        kind.tokens.push(id);
                        entries.insert(TokenName::new(name), TokenEntry { id, alias: false });
                    }
                    TokenSpec::Alias(_) => pending_aliases.push((kind_name.as_str(), name)),
                }
            }
            kinds.insert(kind_name.clone(), kind);
        }

        let real_ids: HashMap<&str, TokenId> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (token.name.as_str(), TokenId::from_index(index)))
            .collect();

        for (kind_name, alias) in pending_aliases {
            let id = flatten(kind_name, alias, &declared, &real_ids)?;
            if let Some(kind) = kinds.get_mut(kind_name) {
                kind.aliases.insert(TokenName::new(alias), id);
            }
            entries.insert(TokenName::new(alias), TokenEntry { id, alias: true });
        }

        for (kind_name, kind_config) in config.kinds() {
            let Some(default) = kind_config.default_entry() else {
                continue;
            };
            let target = default.reference();
            if target.is_empty() {
                return Err(ConfigError::MalformedToken {
                    kind: kind_name.clone(),
                    token: super::DEFAULT_KEY.to_string(),
                    reason: "default does not name a token".to_string(),
                });
            }
            let Some(found) = declared.get(target) else {
                return Err(ConfigError::DanglingDefault {
                    kind: kind_name.clone(),
                    target: target.to_string(),
                });
            };
            if found.kind != kind_name.as_str() {
                return Err(ConfigError::DefaultOutsideKind {
                    kind: kind_name.clone(),
                    target: target.to_string(),
                    target_kind: found.kind.to_string(),
                });
            }
            let id = flatten(kind_name, target, &declared, &real_ids)?;
            if let Some(kind) = kinds.get_mut(kind_name) {
                kind.default = Some(id);
            }
        }

        debug!(
            locale,
            kinds = kinds.len(),
            tokens = tokens.len(),
            aliases = entries.len() - tokens.len(),
            "built inflection registry"
        );

        Ok(Self {
            locale: locale.to_string(),
            tokens,
            kinds,
            entries,
        })
    }
}

fn validate_locale(locale: &str) -> Result<(), ConfigError> {
    locale
        .parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidLocale {
            locale: locale.to_string(),
        })
}

fn check_token(kind: &str, name: &str, spec: &TokenSpec) -> Result<(), ConfigError> {
    let reason = if !is_identifier(name) {
        Some("token names may only contain letters, digits and '_'")
    } else {
        match spec {
            TokenSpec::Description(text) if text.trim().is_empty() => {
                Some("real tokens need a description")
            }
            TokenSpec::Alias(target) if target.is_empty() => Some("alias has no target"),
            TokenSpec::Description(_) | TokenSpec::Alias(_) => None,
        }
    };
    match reason {
        Some(reason) => Err(ConfigError::MalformedToken {
            kind: kind.to_string(),
            token: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Follow an alias chain from `start` to the real token it ends at.
fn flatten(
    kind: &str,
    start: &str,
    declared: &HashMap<&str, Declared<'_>>,
    real_ids: &HashMap<&str, TokenId>,
) -> Result<TokenId, ConfigError> {
    let mut chain = vec![start];
    let mut current = start;
    loop {
        let Some(entry) = declared.get(current) else {
            return Err(ConfigError::DanglingAlias {
                kind: kind.to_string(),
                alias: start.to_string(),
                target: current.to_string(),
            });
        };
        let target = match entry.spec {
            TokenSpec::Description(_) => {
                return real_ids
                    .get(current)
                    .copied()
                    .ok_or_else(|| ConfigError::DanglingAlias {
                        kind: kind.to_string(),
                        alias: start.to_string(),
                        target: current.to_string(),
                    });
            }
            TokenSpec::Alias(target) => target.as_str(),
        };

        let Some(next) = declared.get(target) else {
            return Err(ConfigError::DanglingAlias {
                kind: kind.to_string(),
                alias: current.to_string(),
                target: target.to_string(),
            });
        };
        if next.kind != kind {
            return Err(ConfigError::AliasKindMismatch {
                kind: kind.to_string(),
                alias: current.to_string(),
                target: target.to_string(),
                target_kind: next.kind.to_string(),
            });
        }
        let revisits = chain.contains(&target);
        chain.push(target);
        if revisits {
            return Err(ConfigError::AliasCycle {
                kind: kind.to_string(),
                chain: chain.into_iter().map(str::to_string).collect(),
            });
        }
        current = target;
    }
}
