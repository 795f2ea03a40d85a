//! Resolution of parsed patterns against a registry and caller options.

mod context;
mod evaluator;
mod lint;

pub use context::{Requested, ResolveContext};
pub use evaluator::{interpolate, resolve_pattern, resolve_template};
pub use lint::{TemplateWarning, check_template};
