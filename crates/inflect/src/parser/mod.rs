//! Inflection pattern parser.
//!
//! Splits template strings into literal text and parsed [`Pattern`]s. The
//! result is independent of any option values, so a parsed template can be
//! resolved many times.

pub mod ast;
pub mod error;
mod template;

pub use ast::*;
pub use error::{PatternError, PatternErrorKind};
pub use template::{Pieces, parse, parse_template};
