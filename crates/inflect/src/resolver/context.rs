//! Inputs shared by every pattern of one resolution call.

use crate::registry::{InflectionRegistry, Kind};
use crate::types::{OptionValue, Options, Switches, TokenId, TokenName};

/// What the caller asked for, for one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requested {
    /// The kind is not in the options.
    Absent,
    /// The kind is in the options but empty.
    Nil,
    /// The option names something that is not a token of the kind.
    Unknown(TokenName),
    /// A token of the kind (aliases already resolved).
    Known(TokenId),
}

/// Resolution context: registry snapshot, caller options and effective
/// switches.
///
/// Resolution never mutates the context, so one context can serve any number
/// of templates.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    registry: &'a InflectionRegistry,
    options: &'a Options,
    switches: Switches,
}

impl<'a> ResolveContext<'a> {
    pub fn new(registry: &'a InflectionRegistry, options: &'a Options, switches: Switches) -> Self {
        Self {
            registry,
            options,
            switches,
        }
    }

    pub fn registry(&self) -> &'a InflectionRegistry {
        self.registry
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    pub fn switches(&self) -> Switches {
        self.switches
    }

    /// Classify the caller's option for `kind`.
    pub fn requested(&self, kind: &Kind) -> Requested {
        match self.options.get(kind.name()) {
            None => Requested::Absent,
            Some(OptionValue::Nil) => Requested::Nil,
            Some(OptionValue::Token(name)) => match self.registry.resolve_token(name) {
                Some(resolved) if resolved.kind.name() == kind.name() => {
                    Requested::Known(resolved.id)
                }
                _ => Requested::Unknown(name.clone()),
            },
        }
    }

    /// The token used for matching: the requested token, or the kind's
    /// default when `unknown_defaults` is enabled.
    pub fn effective(&self, kind: &Kind, requested: &Requested) -> Option<TokenId> {
        match requested {
            Requested::Known(id) => Some(*id),
            Requested::Absent | Requested::Nil | Requested::Unknown(_)
                if self.switches.unknown_defaults =>
            {
                kind.default_id()
            }
            Requested::Absent | Requested::Nil | Requested::Unknown(_) => None,
        }
    }
}
