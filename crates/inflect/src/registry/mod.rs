//! Per-locale registry of inflection kinds, tokens and aliases.
//!
//! A registry is built once from an [`InflectionConfig`] and never modified
//! afterwards. Real tokens live in an arena indexed by [`TokenId`]; aliases are
//! flattened at build time and store the id of the real token they end at, so
//! lookups never walk alias chains.

mod build;
mod config;

use std::collections::{BTreeMap, HashMap};

pub use config::{ALIAS_MARKER, DEFAULT_KEY, InflectionConfig, KindConfig, TokenSpec};

use crate::types::{TokenId, TokenName};

/// A real token: a name, its description, and the kind it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealToken {
    name: TokenName,
    description: String,
    kind: String,
}

impl RealToken {
    pub fn name(&self) -> &TokenName {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// A category of mutually exclusive tokens, such as `gender`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kind {
    name: String,
    tokens: Vec<TokenId>,
    aliases: BTreeMap<TokenName, TokenId>,
    default: Option<TokenId>,
}

impl Kind {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tokens: Vec::new(),
            aliases: BTreeMap::new(),
            default: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the kind's real tokens, in name order.
    pub fn token_ids(&self) -> &[TokenId] {
        &self.tokens
    }

    /// Aliases of this kind with the real token each resolves to.
    pub fn alias_ids(&self) -> &BTreeMap<TokenName, TokenId> {
        &self.aliases
    }

    /// The resolved default token, if the kind configures one.
    pub fn default_id(&self) -> Option<TokenId> {
        self.default
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.tokens.contains(&id)
    }
}

/// How a name is known to a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// A real token with a description.
    Real,
    /// An alias of a real token.
    Alias,
    /// Not a token of the registry (or of the requested kind).
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenEntry {
    id: TokenId,
    alias: bool,
}

/// The result of looking a name up: the real token it denotes and its kind.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedToken<'r> {
    pub id: TokenId,
    pub token: &'r RealToken,
    pub kind: &'r Kind,
    /// True when the looked-up name was an alias.
    pub via_alias: bool,
}

/// Immutable inflection data of one locale.
///
/// # Example
///
/// ```
/// use inflect::{InflectionConfig, InflectionRegistry, KindConfig};
///
/// let config = InflectionConfig::new().kind(
///     "gender",
///     KindConfig::new()
///         .token("f", "female")
///         .token("m", "male")
///         .alias("lady", "f")
///         .default_token("m"),
/// );
/// let registry = InflectionRegistry::build("en", &config).unwrap();
///
/// let resolved = registry.resolve_token("lady").unwrap();
/// assert_eq!(resolved.token.name().as_str(), "f");
/// assert_eq!(resolved.kind.name(), "gender");
/// assert!(registry.is_token_of_kind("lady", "gender"));
/// ```
#[derive(Debug, Clone)]
pub struct InflectionRegistry {
    locale: String,
    tokens: Vec<RealToken>,
    kinds: BTreeMap<String, Kind>,
    entries: HashMap<TokenName, TokenEntry>,
}

impl InflectionRegistry {
    /// The locale this registry was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Look a kind up by name.
    pub fn lookup_kind(&self, name: &str) -> Option<&Kind> {
        self.kinds.get(name)
    }

    /// All kinds, in name order.
    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.kinds.values()
    }

    /// All kind names, in order.
    pub fn kind_names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Get a real token by id.
    pub fn token(&self, id: TokenId) -> Option<&RealToken> {
        self.tokens.get(id.index())
    }

    /// Resolve a token or alias name to its real token and kind.
    pub fn resolve_token(&self, name: &str) -> Option<ResolvedToken<'_>> {
        let entry = self.entries.get(name.trim())?;
        let token = self.tokens.get(entry.id.index())?;
        let kind = self.kinds.get(&token.kind)?;
        Some(ResolvedToken {
            id: entry.id,
            token,
            kind,
            via_alias: entry.alias,
        })
    }

    /// Returns true if `name` is a token or alias of `kind`.
    pub fn is_token_of_kind(&self, name: &str, kind: &str) -> bool {
        self.resolve_token(name)
            .is_some_and(|resolved| resolved.kind.name() == kind)
    }

    /// The kind a token or alias belongs to.
    pub fn kind_of(&self, name: &str) -> Option<&str> {
        self.resolve_token(name)
            .map(|resolved| resolved.kind.name.as_str())
    }

    /// Classify a name across all kinds.
    pub fn classify(&self, name: &str) -> TokenClass {
        match self.entries.get(name.trim()) {
            None => TokenClass::Unknown,
            Some(entry) if entry.alias => TokenClass::Alias,
            Some(_) => TokenClass::Real,
        }
    }

    /// Classify a name within one kind; names of other kinds are unknown.
    pub fn classify_in(&self, kind: &str, name: &str) -> TokenClass {
        if self.is_token_of_kind(name, kind) {
            self.classify(name)
        } else {
            TokenClass::Unknown
        }
    }

    /// Returns true if `name` is a real token, optionally within `kind`.
    pub fn is_true_token(&self, name: &str, kind: Option<&str>) -> bool {
        self.class_matches(name, kind, TokenClass::Real)
    }

    /// Returns true if `name` is an alias, optionally within `kind`.
    pub fn is_alias(&self, name: &str, kind: Option<&str>) -> bool {
        self.class_matches(name, kind, TokenClass::Alias)
    }

    /// Returns true if `name` is a token or alias, optionally within `kind`.
    pub fn has_token(&self, name: &str, kind: Option<&str>) -> bool {
        match kind {
            Some(kind) => self.is_token_of_kind(name, kind),
            None => self.entries.contains_key(name.trim()),
        }
    }

    fn class_matches(&self, name: &str, kind: Option<&str>, class: TokenClass) -> bool {
        let actual = match kind {
            Some(kind) => self.classify_in(kind, name),
            None => self.classify(name),
        };
        actual == class
    }

    /// Real tokens of a kind, in name order. Empty for unknown kinds.
    pub fn real_tokens(&self, kind: &str) -> Vec<&RealToken> {
        self.kinds
            .get(kind)
            .map(|kind| {
                kind.tokens
                    .iter()
                    .filter_map(|id| self.token(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Aliases of a kind paired with the real token they resolve to.
    pub fn aliases(&self, kind: &str) -> Vec<(&TokenName, &RealToken)> {
        self.kinds
            .get(kind)
            .map(|kind| {
                kind.aliases
                    .iter()
                    .filter_map(|(alias, id)| self.token(*id).map(|token| (alias, token)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The default token of a kind.
    pub fn default_token(&self, kind: &str) -> Option<&RealToken> {
        self.kinds
            .get(kind)
            .and_then(|kind| kind.default)
            .and_then(|id| self.token(id))
    }

    /// Names of all real tokens in the registry, used for suggestions.
    pub(crate) fn token_names(&self) -> Vec<&str> {
        self.tokens.iter().map(|token| token.name.as_str()).collect()
    }

    /// Number of real tokens across all kinds.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
