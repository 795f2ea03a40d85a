use bon::Builder;
use serde::{Deserialize, Serialize};

/// Policy switches consulted while resolving patterns.
///
/// Every switch can be overridden per call with [`SwitchOverrides`]; the
/// effective value is the per-call override if present, otherwise the
/// process-wide (or per-inflector) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Switches {
    /// Escalate missing options and bad pattern tokens to errors instead of
    /// falling back silently.
    pub raises: bool,
    /// Let alias names appear inside patterns, not only real token names.
    pub aliased_patterns: bool,
    /// Use the kind's default token when the option is absent, nil or names
    /// an unknown token.
    pub unknown_defaults: bool,
    /// Use the kind's default token when the option names a valid token that
    /// the pattern does not mention.
    pub excluded_defaults: bool,
}

impl Default for Switches {
    fn default() -> Self {
        Self {
            raises: false,
            aliased_patterns: false,
            unknown_defaults: true,
            excluded_defaults: false,
        }
    }
}

impl Switches {
    /// Apply per-call overrides on top of these switches.
    #[must_use]
    pub fn apply(self, overrides: &SwitchOverrides) -> Self {
        Self {
            raises: overrides.raises.unwrap_or(self.raises),
            aliased_patterns: overrides.aliased_patterns.unwrap_or(self.aliased_patterns),
            unknown_defaults: overrides.unknown_defaults.unwrap_or(self.unknown_defaults),
            excluded_defaults: overrides
                .excluded_defaults
                .unwrap_or(self.excluded_defaults),
        }
    }
}

/// A partial set of switches; unset fields keep the underlying value.
///
/// # Example
///
/// ```
/// use inflect::{SwitchOverrides, Switches};
///
/// let overrides = SwitchOverrides::builder().unknown_defaults(false).build();
/// let switches = Switches::default().apply(&overrides);
/// assert!(!switches.unknown_defaults);
/// assert!(!switches.raises);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchOverrides {
    pub raises: Option<bool>,
    pub aliased_patterns: Option<bool>,
    pub unknown_defaults: Option<bool>,
    pub excluded_defaults: Option<bool>,
}

impl SwitchOverrides {
    /// Overrides that change nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Layer `higher` on top of `self`; fields set in `higher` win.
    #[must_use]
    pub fn merge(self, higher: &SwitchOverrides) -> Self {
        Self {
            raises: higher.raises.or(self.raises),
            aliased_patterns: higher.aliased_patterns.or(self.aliased_patterns),
            unknown_defaults: higher.unknown_defaults.or(self.unknown_defaults),
            excluded_defaults: higher.excluded_defaults.or(self.excluded_defaults),
        }
    }
}

impl From<Switches> for SwitchOverrides {
    fn from(switches: Switches) -> Self {
        Self {
            raises: Some(switches.raises),
            aliased_patterns: Some(switches.aliased_patterns),
            unknown_defaults: Some(switches.unknown_defaults),
            excluded_defaults: Some(switches.excluded_defaults),
        }
    }
}
