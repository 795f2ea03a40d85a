//! The interface consumed from the host translation store.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::registry::InflectionConfig;

/// Source of raw templates and inflection configuration.
///
/// Templates are expected to have their `%{}` placeholders resolved already.
pub trait TranslationBackend {
    /// The template stored under `key` for `locale`.
    fn raw_template(&self, locale: &str, key: &str) -> Option<String>;

    /// The inflection configuration of `locale`, if it has any.
    fn inflection_config(&self, locale: &str) -> Option<InflectionConfig>;

    /// Locales that carry inflection configuration.
    fn locales(&self) -> Vec<String>;
}

/// A backend whose inflection configuration can be replaced at run time.
///
/// [`Inflector::store_config`](crate::Inflector::store_config) stores through
/// this trait and republishes the locale's registry in the same call.
pub trait ConfigStore {
    /// Store (or replace) the configuration of a locale.
    fn store_config(&mut self, locale: &str, config: InflectionConfig);
}

impl<T: TranslationBackend + ?Sized> TranslationBackend for Arc<T> {
    fn raw_template(&self, locale: &str, key: &str) -> Option<String> {
        (**self).raw_template(locale, key)
    }

    fn inflection_config(&self, locale: &str) -> Option<InflectionConfig> {
        (**self).inflection_config(locale)
    }

    fn locales(&self) -> Vec<String> {
        (**self).locales()
    }
}

/// A [`TranslationBackend`] over in-memory maps.
///
/// # Example
///
/// ```
/// use inflect::{InflectionConfig, KindConfig, MemoryBackend, TranslationBackend};
///
/// let backend = MemoryBackend::new()
///     .with_translation("en", "welcome", "Dear @{f:Madam|m:Sir}")
///     .with_config("en", InflectionConfig::new().kind(
///         "gender",
///         KindConfig::new().token("f", "female").token("m", "male"),
///     ));
///
/// assert_eq!(backend.locales(), vec!["en".to_string()]);
/// assert!(backend.raw_template("en", "welcome").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    translations: BTreeMap<String, BTreeMap<String, String>>,
    configs: BTreeMap<String, InflectionConfig>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a template, returning the updated backend.
    #[must_use]
    pub fn with_translation(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.store_translation(locale, key, template);
        self
    }

    /// Store a configuration, returning the updated backend.
    #[must_use]
    pub fn with_config(mut self, locale: impl Into<String>, config: InflectionConfig) -> Self {
        self.configs.insert(locale.into(), config);
        self
    }

    pub fn store_translation(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.translations
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    pub fn remove_config(&mut self, locale: &str) -> Option<InflectionConfig> {
        self.configs.remove(locale)
    }
}

impl TranslationBackend for MemoryBackend {
    fn raw_template(&self, locale: &str, key: &str) -> Option<String> {
        self.translations.get(locale)?.get(key).cloned()
    }

    fn inflection_config(&self, locale: &str) -> Option<InflectionConfig> {
        self.configs.get(locale).cloned()
    }

    fn locales(&self) -> Vec<String> {
        self.configs.keys().cloned().collect()
    }
}

impl ConfigStore for MemoryBackend {
    fn store_config(&mut self, locale: &str, config: InflectionConfig) {
        self.configs.insert(locale.to_string(), config);
    }
}
