pub mod backend;
pub mod error;
pub mod global;
pub mod inflector;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod types;

pub use backend::{ConfigStore, MemoryBackend, TranslationBackend};
pub use error::{ConfigError, InflectError, ResolutionError, compute_suggestions};
pub use inflector::{BackendMut, Inflector};
pub use parser::{PatternError, PatternErrorKind};
pub use registry::{
    InflectionConfig, InflectionRegistry, Kind, KindConfig, RealToken, ResolvedToken, TokenClass,
    TokenSpec,
};
pub use resolver::{ResolveContext, TemplateWarning, check_template, interpolate};
pub use types::{OptionValue, Options, SwitchOverrides, Switches, TokenId, TokenName};

/// Creates an [`Options`] map from kind/token pairs.
///
/// Values are converted via `Into<OptionValue>`, so string slices, owned
/// strings, token names and `Option`s all work; `None` and `""` become nil.
///
/// # Example
///
/// ```
/// use inflect::{OptionValue, options};
///
/// let o = options! { "gender" => "f", "number" => None::<&str> };
/// assert_eq!(o.len(), 2);
/// assert_eq!(o.get("gender").and_then(OptionValue::as_token).map(|t| t.as_str()), Some("f"));
/// assert_eq!(o.get("number"), Some(&OptionValue::Nil));
/// ```
#[macro_export]
macro_rules! options {
    {} => {
        $crate::Options::new()
    };
    { $($kind:expr => $value:expr),+ $(,)? } => {
        {
            let mut options = $crate::Options::new();
            $(
                options.insert($kind, ::std::convert::Into::<$crate::OptionValue>::into($value));
            )+
            options
        }
    };
}
