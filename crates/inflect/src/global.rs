//! Process-wide switch values.
//!
//! Inflectors that were not given their own [`Switches`] read these values on
//! every call. Each switch is stored in its own atomic, so concurrent reads and
//! writes are memory-safe; flipping switches while translations are in flight
//! still makes the outcome of those calls depend on timing.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::{SwitchOverrides, Switches};

static RAISES: AtomicBool = AtomicBool::new(false);
static ALIASED_PATTERNS: AtomicBool = AtomicBool::new(false);
static UNKNOWN_DEFAULTS: AtomicBool = AtomicBool::new(true);
static EXCLUDED_DEFAULTS: AtomicBool = AtomicBool::new(false);

/// Returns the current process-wide switches.
pub fn switches() -> Switches {
    Switches {
        raises: RAISES.load(Ordering::Relaxed),
        aliased_patterns: ALIASED_PATTERNS.load(Ordering::Relaxed),
        unknown_defaults: UNKNOWN_DEFAULTS.load(Ordering::Relaxed),
        excluded_defaults: EXCLUDED_DEFAULTS.load(Ordering::Relaxed),
    }
}

/// Replaces all process-wide switches.
pub fn set_switches(switches: Switches) {
    RAISES.store(switches.raises, Ordering::Relaxed);
    ALIASED_PATTERNS.store(switches.aliased_patterns, Ordering::Relaxed);
    UNKNOWN_DEFAULTS.store(switches.unknown_defaults, Ordering::Relaxed);
    EXCLUDED_DEFAULTS.store(switches.excluded_defaults, Ordering::Relaxed);
}

/// Changes only the switches set in `overrides`.
pub fn update_switches(overrides: &SwitchOverrides) {
    set_switches(switches().apply(overrides));
}

/// Restores the documented defaults.
pub fn reset_switches() {
    set_switches(Switches::default());
}
