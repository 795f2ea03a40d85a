//! Host-facing inflection API.
//!
//! The [`Inflector`] owns a [`TranslationBackend`] and one registry snapshot per
//! locale. Snapshots are immutable and published atomically, so readers on any
//! thread always see a complete registry while a rebuild is in progress.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use arc_swap::ArcSwap;
use bon::Builder;
use tracing::{debug, warn};

use crate::backend::{ConfigStore, TranslationBackend};
use crate::error::{ConfigError, InflectError};
use crate::global;
use crate::registry::{InflectionConfig, InflectionRegistry, TokenClass};
use crate::resolver::{self, ResolveContext, TemplateWarning, check_template};
use crate::types::{Options, SwitchOverrides, Switches};

type Snapshots = BTreeMap<String, Arc<InflectionRegistry>>;

/// Resolves inflection patterns in translations served by a backend.
///
/// Registries are built lazily on first use of a locale and rebuilt on
/// [`reload`](Self::reload). A failed rebuild keeps the previous registry.
///
/// Switches come from, in increasing priority: the process-wide values in
/// [`global`](crate::global) (unless the inflector was built with its own),
/// then the per-call [`SwitchOverrides`].
///
/// # Example
///
/// ```
/// use inflect::{Inflector, InflectionConfig, KindConfig, MemoryBackend, Options, SwitchOverrides};
///
/// let backend = MemoryBackend::new()
///     .with_translation("en", "welcome", "Dear @{f:Madam|m:Sir|n:You|All}")
///     .with_config("en", InflectionConfig::new().kind(
///         "gender",
///         KindConfig::new()
///             .token("f", "female")
///             .token("m", "male")
///             .token("n", "neuter")
///             .default_token("n"),
///     ));
/// let inflector = Inflector::new(backend);
///
/// let options = Options::new().with("gender", "m");
/// let text = inflector.inflect("en", "welcome", &options, &SwitchOverrides::none()).unwrap();
/// assert_eq!(text, "Dear Sir");
/// ```
#[derive(Builder)]
pub struct Inflector<B> {
    /// Source of templates and inflection configuration.
    backend: B,

    /// Switches used instead of the process-wide ones.
    switches: Option<Switches>,

    #[builder(skip = ArcSwap::from_pointee(BTreeMap::new()))]
    registries: ArcSwap<Snapshots>,
}

impl<B: TranslationBackend> Inflector<B> {
    /// Create an inflector that follows the process-wide switches.
    pub fn new(backend: B) -> Self {
        Inflector::builder().backend(backend).build()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    ///
    /// When the returned guard is dropped, every loaded locale is rebuilt from
    /// the backend. Locales whose new configuration fails to build keep their
    /// previous registry.
    pub fn backend_mut(&mut self) -> BackendMut<'_, B> {
        BackendMut { inflector: self }
    }

    /// The switches in effect before per-call overrides.
    pub fn switches(&self) -> Switches {
        self.switches.unwrap_or_else(global::switches)
    }

    /// Pin this inflector's switches, or pass `None` to follow the
    /// process-wide values again.
    pub fn set_switches(&mut self, switches: Option<Switches>) {
        self.switches = switches;
    }

    // =========================================================================
    // Registry lifecycle
    // =========================================================================

    /// Rebuild the registry of `locale` from the backend and publish it.
    ///
    /// A locale without inflection configuration gets an empty registry. On
    /// error the previously published registry stays in place.
    pub fn reload(&self, locale: &str) -> Result<Arc<InflectionRegistry>, ConfigError> {
        let registry = Arc::new(self.build(locale)?);
        self.registries.rcu(|current| {
            let mut next = Snapshots::clone(current);
            next.insert(locale.to_string(), Arc::clone(&registry));
            next
        });
        debug!(locale, "published inflection registry");
        Ok(registry)
    }

    /// Rebuild every locale the backend has configuration for.
    ///
    /// All registries are built before anything is published; if one fails,
    /// nothing changes and the first error is returned.
    pub fn reload_all(&self) -> Result<usize, ConfigError> {
        let mut built = Vec::new();
        for locale in self.backend.locales() {
            let registry = self.build(&locale)?;
            built.push((locale, Arc::new(registry)));
        }
        let count = built.len();
        self.registries.rcu(|current| {
            let mut next = Snapshots::clone(current);
            for (locale, registry) in &built {
                next.insert(locale.clone(), Arc::clone(registry));
            }
            next
        });
        debug!(count, "published inflection registries");
        Ok(count)
    }

    /// The current registry of `locale`, building it on first use.
    ///
    /// A first-use build only fills an empty slot: if another thread published
    /// the locale in the meantime, that registry wins.
    pub fn registry(&self, locale: &str) -> Result<Arc<InflectionRegistry>, ConfigError> {
        if let Some(registry) = self.loaded_registry(locale) {
            return Ok(registry);
        }
        let built = Arc::new(self.build(locale)?);
        let previous = self.registries.rcu(|current| {
            if current.contains_key(locale) {
                return Arc::clone(current);
            }
            let mut next = Snapshots::clone(current);
            next.insert(locale.to_string(), Arc::clone(&built));
            Arc::new(next)
        });
        match previous.get(locale) {
            Some(published) => Ok(Arc::clone(published)),
            None => {
                debug!(locale, "published inflection registry");
                Ok(built)
            }
        }
    }

    /// The published registry of `locale`, without building one.
    pub fn loaded_registry(&self, locale: &str) -> Option<Arc<InflectionRegistry>> {
        self.registries.load().get(locale).cloned()
    }

    /// Locales with a published registry, in order.
    pub fn loaded_locales(&self) -> Vec<String> {
        self.registries.load().keys().cloned().collect()
    }

    fn build(&self, locale: &str) -> Result<InflectionRegistry, ConfigError> {
        let config = self.backend.inflection_config(locale).unwrap_or_default();
        InflectionRegistry::build(locale, &config).inspect_err(|error| {
            warn!(locale, %error, "inflection registry rebuild failed");
        })
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Look `key` up in the backend and resolve its patterns.
    pub fn inflect(
        &self,
        locale: &str,
        key: &str,
        options: &Options,
        overrides: &SwitchOverrides,
    ) -> Result<String, InflectError> {
        let template = self.template(locale, key)?;
        self.interpolate(locale, &template, options, overrides)
    }

    /// Resolve the patterns of a template the caller already has.
    pub fn interpolate(
        &self,
        locale: &str,
        template: &str,
        options: &Options,
        overrides: &SwitchOverrides,
    ) -> Result<String, InflectError> {
        let registry = self.registry(locale)?;
        let ctx = ResolveContext::new(&registry, options, self.switches().apply(overrides));
        resolver::interpolate(template, &ctx)
    }

    /// Check the template stored under `key` against the locale's registry,
    /// judging alias tokens by this inflector's switches.
    pub fn check(&self, locale: &str, key: &str) -> Result<Vec<TemplateWarning>, InflectError> {
        let template = self.template(locale, key)?;
        let registry = self.registry(locale)?;
        let aliased_patterns = self.switches().aliased_patterns;
        Ok(check_template(&registry, &template, aliased_patterns)?)
    }

    fn template(&self, locale: &str, key: &str) -> Result<String, InflectError> {
        self.backend
            .raw_template(locale, key)
            .ok_or_else(|| InflectError::TranslationNotFound {
                locale: locale.to_string(),
                key: key.to_string(),
            })
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Kind names of a locale.
    pub fn kinds(&self, locale: &str) -> Result<Vec<String>, ConfigError> {
        self.with_registry(locale, |registry| {
            registry.kind_names().map(str::to_string).collect()
        })
    }

    /// Real tokens of a kind mapped to their descriptions.
    pub fn real_tokens(
        &self,
        locale: &str,
        kind: &str,
    ) -> Result<BTreeMap<String, String>, ConfigError> {
        self.with_registry(locale, |registry| {
            registry
                .real_tokens(kind)
                .into_iter()
                .map(|token| (token.name().to_string(), token.description().to_string()))
                .collect()
        })
    }

    /// Aliases of a kind mapped to the real token they resolve to.
    pub fn aliases(&self, locale: &str, kind: &str) -> Result<BTreeMap<String, String>, ConfigError> {
        self.with_registry(locale, |registry| {
            registry
                .aliases(kind)
                .into_iter()
                .map(|(alias, token)| (alias.to_string(), token.name().to_string()))
                .collect()
        })
    }

    pub fn default_token(&self, locale: &str, kind: &str) -> Result<Option<String>, ConfigError> {
        self.with_registry(locale, |registry| {
            registry
                .default_token(kind)
                .map(|token| token.name().to_string())
        })
    }

    pub fn classify(&self, locale: &str, name: &str) -> Result<TokenClass, ConfigError> {
        self.with_registry(locale, |registry| registry.classify(name))
    }

    pub fn classify_in(
        &self,
        locale: &str,
        kind: &str,
        name: &str,
    ) -> Result<TokenClass, ConfigError> {
        self.with_registry(locale, |registry| registry.classify_in(kind, name))
    }

    pub fn is_true_token(
        &self,
        locale: &str,
        name: &str,
        kind: Option<&str>,
    ) -> Result<bool, ConfigError> {
        self.with_registry(locale, |registry| registry.is_true_token(name, kind))
    }

    pub fn is_alias(
        &self,
        locale: &str,
        name: &str,
        kind: Option<&str>,
    ) -> Result<bool, ConfigError> {
        self.with_registry(locale, |registry| registry.is_alias(name, kind))
    }

    pub fn has_token(
        &self,
        locale: &str,
        name: &str,
        kind: Option<&str>,
    ) -> Result<bool, ConfigError> {
        self.with_registry(locale, |registry| registry.has_token(name, kind))
    }

    /// The kind a token or alias belongs to.
    pub fn kind_of(&self, locale: &str, name: &str) -> Result<Option<String>, ConfigError> {
        self.with_registry(locale, |registry| registry.kind_of(name).map(str::to_string))
    }

    /// Backend locales that have inflection data, optionally only those
    /// defining `kind`.
    ///
    /// Locales whose configuration fails to build are skipped.
    pub fn inflected_locales(&self, kind: Option<&str>) -> Vec<String> {
        self.backend
            .locales()
            .into_iter()
            .filter(|locale| match self.registry(locale) {
                Ok(registry) => match kind {
                    Some(kind) => registry.lookup_kind(kind).is_some(),
                    None => !registry.is_empty(),
                },
                Err(_) => false,
            })
            .collect()
    }

    /// Union of kind names over all loaded locales.
    pub fn all_kinds(&self) -> BTreeSet<String> {
        self.registries
            .load()
            .values()
            .flat_map(|registry| registry.kind_names().map(str::to_string))
            .collect()
    }

    /// Rebuild every loaded locale; failures are logged and skipped.
    fn refresh_loaded(&self) {
        for locale in self.loaded_locales() {
            if self.reload(&locale).is_err() {
                debug!(locale, "keeping previous inflection registry");
            }
        }
    }

    fn with_registry<T>(
        &self,
        locale: &str,
        f: impl FnOnce(&InflectionRegistry) -> T,
    ) -> Result<T, ConfigError> {
        let registry = self.registry(locale)?;
        Ok(f(&registry))
    }
}

impl<B: TranslationBackend + ConfigStore> Inflector<B> {
    /// Replace the configuration of `locale` and publish its new registry.
    ///
    /// The configuration is stored even when it fails to build; the error is
    /// returned and the previous registry stays published.
    pub fn store_config(
        &mut self,
        locale: &str,
        config: InflectionConfig,
    ) -> Result<Arc<InflectionRegistry>, ConfigError> {
        self.backend.store_config(locale, config);
        self.reload(locale)
    }
}

/// Mutable backend access that republishes loaded registries when dropped.
///
/// Returned by [`Inflector::backend_mut`].
pub struct BackendMut<'a, B: TranslationBackend> {
    inflector: &'a mut Inflector<B>,
}

impl<B: TranslationBackend> Deref for BackendMut<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.inflector.backend
    }
}

impl<B: TranslationBackend> DerefMut for BackendMut<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.inflector.backend
    }
}

impl<B: TranslationBackend> Drop for BackendMut<'_, B> {
    fn drop(&mut self) {
        self.inflector.refresh_loaded();
    }
}
