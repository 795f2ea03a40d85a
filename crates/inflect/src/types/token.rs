use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A normalized token name.
///
/// Token names arrive from configuration, from pattern text and from caller
/// options. All three are funnelled through this type so that surrounding
/// whitespace never makes two spellings of the same token compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TokenName(String);

impl TokenName {
    /// Create a token name, trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns true if `name` is a valid kind or token identifier.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Deref for TokenName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for TokenName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TokenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TokenName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<TokenName> for String {
    fn from(name: TokenName) -> Self {
        name.0
    }
}

impl Display for TokenName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Stable index of a real token inside one registry's token arena.
///
/// Identifiers are only meaningful for the registry that produced them.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct TokenId(u32);

impl TokenId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of the token in its registry's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TokenId({})", self.0)
    }
}
