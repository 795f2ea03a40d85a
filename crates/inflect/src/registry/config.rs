//! Raw inflection configuration as handed over by the host.

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use serde::{Deserialize, Serialize};

/// Key that names a kind's default token instead of defining a token.
pub const DEFAULT_KEY: &str = "default";

/// Prefix that turns a token value into an alias marker.
pub const ALIAS_MARKER: char = '@';

/// The value of one entry in a kind's configuration.
///
/// Strings starting with `@` are alias markers (`"@f"`), anything else is the
/// description of a real token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenSpec {
    /// A real token with its human-readable description.
    Description(String),
    /// An alias pointing at another token or alias.
    Alias(String),
}

impl TokenSpec {
    pub fn description(text: impl Into<String>) -> Self {
        TokenSpec::Description(text.into())
    }

    pub fn alias(target: impl Into<String>) -> Self {
        TokenSpec::Alias(target.into().trim().to_string())
    }

    /// The token this entry refers to when used as a `default` value.
    ///
    /// Defaults may be written plainly (`n`) or as an alias marker (`@n`).
    pub fn reference(&self) -> &str {
        match self {
            TokenSpec::Description(name) => name.trim(),
            TokenSpec::Alias(target) => target,
        }
    }
}

impl From<String> for TokenSpec {
    fn from(value: String) -> Self {
        match value.strip_prefix(ALIAS_MARKER) {
            Some(target) => TokenSpec::alias(target),
            None => TokenSpec::Description(value),
        }
    }
}

impl From<&str> for TokenSpec {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<TokenSpec> for String {
    fn from(spec: TokenSpec) -> Self {
        match spec {
            TokenSpec::Description(text) => text,
            TokenSpec::Alias(target) => format!("{ALIAS_MARKER}{target}"),
        }
    }
}

/// The entries of one kind: token name to [`TokenSpec`], plus an optional
/// `default` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindConfig {
    entries: BTreeMap<String, TokenSpec>,
}

impl KindConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a real token.
    #[must_use]
    pub fn token(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.insert(name, TokenSpec::description(description));
        self
    }

    /// Add an alias.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(name, TokenSpec::alias(target));
        self
    }

    /// Set the default token.
    #[must_use]
    pub fn default_token(mut self, name: impl Into<String>) -> Self {
        self.insert(DEFAULT_KEY, TokenSpec::alias(name));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<TokenSpec>) {
        self.entries.insert(name.into(), spec.into());
    }

    /// The `default` entry, if any.
    pub fn default_entry(&self) -> Option<&TokenSpec> {
        self.entries.get(DEFAULT_KEY)
    }

    /// All entries except `default`, in name order.
    pub fn tokens(&self) -> impl Iterator<Item = (&str, &TokenSpec)> {
        self.entries
            .iter()
            .filter(|(name, _)| name.as_str() != DEFAULT_KEY)
            .map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().next().is_none()
    }
}

impl<K: Into<String>, V: Into<TokenSpec>> FromIterator<(K, V)> for KindConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, spec)| (name.into(), spec.into()))
                .collect(),
        }
    }
}

/// Inflection configuration of one locale: kind name to [`KindConfig`].
///
/// The crate owns no file format; hosts deserialize this from whatever they
/// store, for example:
///
/// ```
/// use inflect::InflectionConfig;
///
/// let config: InflectionConfig = serde_json::from_str(r#"{
///     "gender": { "f": "female", "m": "male", "female": "@f", "default": "m" }
/// }"#).unwrap();
/// assert_eq!(config.kinds().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InflectionConfig {
    kinds: BTreeMap<String, KindConfig>,
}

impl InflectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind, returning the updated configuration.
    #[must_use]
    pub fn kind(mut self, name: impl Into<String>, kind: KindConfig) -> Self {
        self.insert_kind(name, kind);
        self
    }

    pub fn insert_kind(&mut self, name: impl Into<String>, kind: KindConfig) {
        self.kinds.insert(name.into(), kind);
    }

    /// Kinds in name order.
    pub fn kinds(&self) -> Iter<'_, String, KindConfig> {
        self.kinds.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
