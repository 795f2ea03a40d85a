use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use serde::{Deserialize, Serialize};

use super::TokenName;

/// The value a caller supplied for one kind.
///
/// A kind that is missing from [`Options`] altogether is *absent*; a kind
/// mapped to [`OptionValue::Nil`] was mentioned but left empty. Whether a
/// [`OptionValue::Token`] names something the registry knows is decided at
/// resolution time.
///
/// # Example
///
/// ```
/// use inflect::OptionValue;
///
/// assert_eq!(OptionValue::from("m"), OptionValue::Token("m".into()));
/// assert_eq!(OptionValue::from(""), OptionValue::Nil);
/// assert_eq!(OptionValue::from(None::<&str>), OptionValue::Nil);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum OptionValue {
    /// Explicitly empty.
    Nil,
    /// A token or alias name.
    Token(TokenName),
}

impl OptionValue {
    /// Get the token name, if one was given.
    pub fn as_token(&self) -> Option<&TokenName> {
        match self {
            OptionValue::Nil => None,
            OptionValue::Token(name) => Some(name),
        }
    }
}

impl From<TokenName> for OptionValue {
    fn from(name: TokenName) -> Self {
        if name.is_empty() {
            OptionValue::Nil
        } else {
            OptionValue::Token(name)
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        TokenName::new(s).into()
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        TokenName::new(s).into()
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::Nil, Into::into)
    }
}

impl From<OptionValue> for Option<String> {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::Nil => None,
            OptionValue::Token(name) => Some(name.into()),
        }
    }
}

/// Caller-supplied inflection options: kind name to token.
///
/// Entries whose key is not a kind of the active locale are ignored, so hosts
/// may pass their whole interpolation option set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, OptionValue>);

impl Options {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, returning the updated set.
    #[must_use]
    pub fn with(mut self, kind: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(kind, value);
        self
    }

    /// Set the option for a kind, replacing any previous value.
    pub fn insert(&mut self, kind: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(kind.into(), value.into());
    }

    /// Remove the option for a kind.
    pub fn remove(&mut self, kind: &str) -> Option<OptionValue> {
        self.0.remove(kind)
    }

    /// Get the value supplied for a kind. `None` means the kind is absent.
    pub fn get(&self, kind: &str) -> Option<&OptionValue> {
        self.0.get(kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, OptionValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(kind, value)| (kind.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
