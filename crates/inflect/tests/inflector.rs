//! Tests for the host-facing `Inflector`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use inflect::{
    ConfigError, ConfigStore, InflectError, InflectionConfig, Inflector, KindConfig, MemoryBackend, Options,
    SwitchOverrides, Switches, TemplateWarning, TokenClass, options,
};
use insta::assert_snapshot;
use serde_json::json;

fn english_config() -> InflectionConfig {
    serde_json::from_value(json!({
        "gender": {
            "f": "female",
            "m": "male",
            "n": "neuter",
            "lady": "@f",
            "default": "n"
        },
        "number": { "s": "singular", "p": "plural", "default": "s" }
    }))
    .unwrap()
}

fn german_config() -> InflectionConfig {
    InflectionConfig::new().kind(
        "case",
        KindConfig::new()
            .token("nom", "nominative")
            .token("acc", "accusative")
            .default_token("nom"),
    )
}

fn backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_translation("en", "welcome", "Dear @{f:Madam|m:Sir|n:You|All}")
        .with_translation("en", "items", "@{s:one item|p:many items}")
        .with_translation("en", "typo", "@{f:Madam|mm:Sir}")
        .with_translation("de", "greeting", "Hallo @case{nom:der|acc:den} Nutzer")
        .with_config("en", english_config())
        .with_config("de", german_config())
}

fn inflector() -> Inflector<MemoryBackend> {
    Inflector::builder()
        .backend(backend())
        .switches(Switches::default())
        .build()
}

fn none() -> SwitchOverrides {
    SwitchOverrides::none()
}

// =========================================================================
// Resolution
// =========================================================================

#[test]
fn inflect_resolves_stored_template() {
    let inflector = inflector();
    let text = inflector
        .inflect("en", "welcome", &options! { "gender" => "f" }, &none())
        .unwrap();
    assert_eq!(text, "Dear Madam");

    let text = inflector
        .inflect("de", "greeting", &options! { "case" => "acc" }, &none())
        .unwrap();
    assert_eq!(text, "Hallo den Nutzer");
}

#[test]
fn missing_translation_is_an_error() {
    let error = inflector()
        .inflect("en", "missing", &Options::new(), &none())
        .unwrap_err();
    assert_snapshot!(error, @"translation not found: 'missing' in locale 'en'");
}

#[test]
fn interpolate_uses_locale_registry() {
    let inflector = inflector();
    let text = inflector
        .interpolate("en", "@{s:a cat|p:cats}", &options! { "number" => "p" }, &none())
        .unwrap();
    assert_eq!(text, "cats");
}

#[test]
fn locale_without_config_resolves_free_text() {
    let inflector = inflector();
    let text = inflector
        .interpolate("fr", "Cher @{f:Madame|m:Monsieur|ami}", &Options::new(), &none())
        .unwrap();
    assert_eq!(text, "Cher ami");
}

#[test]
fn invalid_locale_is_a_config_error() {
    let error = inflector()
        .interpolate("not a locale", "text", &Options::new(), &none())
        .unwrap_err();
    assert!(matches!(
        error,
        InflectError::Config(ConfigError::InvalidLocale { .. })
    ));
}

#[test]
fn per_call_overrides_win() {
    let inflector = inflector();
    let overrides = SwitchOverrides::builder().unknown_defaults(false).build();
    let text = inflector
        .inflect("en", "welcome", &options! { "gender" => "x" }, &overrides)
        .unwrap();
    assert_eq!(text, "Dear All");

    let text = inflector
        .inflect("en", "welcome", &options! { "gender" => "x" }, &none())
        .unwrap();
    assert_eq!(text, "Dear You");
}

#[test]
fn pinned_switches_apply_to_every_call() {
    let mut inflector = inflector();
    inflector.set_switches(Some(Switches {
        raises: true,
        ..Switches::default()
    }));
    assert!(inflector.switches().raises);

    let error = inflector
        .inflect("en", "typo", &options! { "gender" => "f" }, &none())
        .unwrap_err();
    assert!(matches!(error, InflectError::Resolution(_)));

    let overrides = SwitchOverrides::builder().raises(false).build();
    let text = inflector
        .inflect("en", "typo", &options! { "gender" => "f" }, &overrides)
        .unwrap();
    assert_eq!(text, "Madam");
}

// =========================================================================
// Registry lifecycle
// =========================================================================

#[test]
fn registries_are_built_lazily() {
    let inflector = inflector();
    assert!(inflector.loaded_registry("en").is_none());
    inflector
        .inflect("en", "welcome", &Options::new(), &none())
        .unwrap();
    assert!(inflector.loaded_registry("en").is_some());
    assert_eq!(inflector.loaded_locales(), vec!["en".to_string()]);
}

fn male_default_config() -> InflectionConfig {
    InflectionConfig::new().kind(
        "gender",
        KindConfig::new()
            .token("f", "female")
            .token("m", "male")
            .default_token("m"),
    )
}

#[test]
fn store_config_republishes_the_locale() {
    let mut inflector = inflector();
    let before = inflector.registry("en").unwrap();

    let after = inflector.store_config("en", male_default_config()).unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(Arc::ptr_eq(&after, &inflector.loaded_registry("en").unwrap()));

    let text = inflector
        .inflect("en", "welcome", &Options::new(), &none())
        .unwrap();
    assert_eq!(text, "Dear Sir");
}

#[test]
fn backend_changes_apply_to_loaded_locales() {
    let mut inflector = inflector();
    let text = inflector
        .inflect("en", "welcome", &Options::new(), &none())
        .unwrap();
    assert_eq!(text, "Dear You");

    inflector
        .backend_mut()
        .store_config("en", male_default_config());

    let text = inflector
        .inflect("en", "welcome", &Options::new(), &none())
        .unwrap();
    assert_eq!(text, "Dear Sir");
}

#[test]
fn failed_store_keeps_previous_registry() {
    let mut inflector = inflector();
    let before = inflector.registry("en").unwrap();

    let broken: InflectionConfig =
        serde_json::from_value(json!({ "gender": { "a": "@b", "b": "@a" } })).unwrap();
    let error = inflector.store_config("en", broken).unwrap_err();
    assert!(matches!(error, ConfigError::AliasCycle { .. }));

    let current = inflector.loaded_registry("en").unwrap();
    assert!(Arc::ptr_eq(&before, &current));
    let text = inflector
        .inflect("en", "welcome", &options! { "gender" => "m" }, &none())
        .unwrap();
    assert_eq!(text, "Dear Sir");

    assert!(inflector.reload("en").is_err());
    assert!(Arc::ptr_eq(&before, &inflector.loaded_registry("en").unwrap()));
}

#[test]
fn failed_backend_change_keeps_previous_registry() {
    let mut inflector = inflector();
    let before = inflector.registry("en").unwrap();

    let broken: InflectionConfig =
        serde_json::from_value(json!({ "gender": { "f": "female", "default": "x" } })).unwrap();
    inflector.backend_mut().store_config("en", broken);

    assert!(Arc::ptr_eq(&before, &inflector.loaded_registry("en").unwrap()));
}

#[test]
fn reload_all_publishes_every_locale() {
    let inflector = inflector();
    assert_eq!(inflector.reload_all().unwrap(), 2);
    assert_eq!(
        inflector.loaded_locales(),
        vec!["de".to_string(), "en".to_string()]
    );
}

#[test]
fn reload_all_is_all_or_nothing() {
    let mut inflector = inflector();
    let broken: InflectionConfig =
        serde_json::from_value(json!({ "case": { "nom": "nominative", "default": "dat" } }))
            .unwrap();
    inflector.backend_mut().store_config("de", broken);
    let before = inflector.registry("en").unwrap();

    assert!(matches!(
        inflector.reload_all(),
        Err(ConfigError::DanglingDefault { .. })
    ));
    assert!(inflector.loaded_registry("de").is_none());
    assert!(Arc::ptr_eq(&before, &inflector.registry("en").unwrap()));
}

#[test]
fn concurrent_first_use_publishes_one_registry() {
    let inflector = inflector();
    let registries: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| inflector.registry("en").unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let published = inflector.loaded_registry("en").unwrap();
    for registry in &registries {
        assert!(Arc::ptr_eq(registry, &published));
    }
}

#[test]
fn first_use_does_not_replace_reloaded_registry() {
    let inflector = inflector();
    let reloaded = inflector.reload("en").unwrap();
    assert!(Arc::ptr_eq(&reloaded, &inflector.registry("en").unwrap()));
}

#[test]
fn readers_see_complete_snapshots_during_reloads() {
    let inflector = inflector();
    inflector.reload_all().unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let text = inflector
                        .inflect("en", "welcome", &options! { "gender" => "m" }, &none())
                        .unwrap();
                    assert_eq!(text, "Dear Sir");
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..50 {
                inflector.reload("en").unwrap();
            }
        });
    });
}

// =========================================================================
// Introspection
// =========================================================================

#[test]
fn kinds_and_tokens() {
    let inflector = inflector();
    assert_eq!(
        inflector.kinds("en").unwrap(),
        vec!["gender".to_string(), "number".to_string()]
    );

    let expected: BTreeMap<String, String> = [("p", "plural"), ("s", "singular")]
        .into_iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect();
    assert_eq!(inflector.real_tokens("en", "number").unwrap(), expected);

    let aliases = inflector.aliases("en", "gender").unwrap();
    assert_eq!(aliases.get("lady").map(String::as_str), Some("f"));
    assert_eq!(aliases.len(), 1);

    assert_eq!(
        inflector.default_token("en", "gender").unwrap(),
        Some("n".to_string())
    );
    assert_eq!(inflector.default_token("en", "mood").unwrap(), None);
}

#[test]
fn token_queries() {
    let inflector = inflector();
    assert_eq!(inflector.classify("en", "lady").unwrap(), TokenClass::Alias);
    assert_eq!(
        inflector.classify_in("en", "number", "f").unwrap(),
        TokenClass::Unknown
    );
    assert!(inflector.is_true_token("en", "f", Some("gender")).unwrap());
    assert!(inflector.is_alias("en", "lady", None).unwrap());
    assert!(!inflector.has_token("en", "nom", None).unwrap());
    assert!(inflector.has_token("de", "nom", Some("case")).unwrap());
    assert_eq!(
        inflector.kind_of("en", "lady").unwrap(),
        Some("gender".to_string())
    );
}

#[test]
fn inflected_locales_filter_by_kind() {
    let inflector = inflector();
    assert_eq!(
        inflector.inflected_locales(None),
        vec!["de".to_string(), "en".to_string()]
    );
    assert_eq!(inflector.inflected_locales(Some("case")), vec!["de".to_string()]);
    assert!(inflector.inflected_locales(Some("mood")).is_empty());
}

#[test]
fn all_kinds_covers_loaded_locales() {
    let inflector = inflector();
    assert!(inflector.all_kinds().is_empty());
    inflector.reload_all().unwrap();
    let kinds: Vec<String> = inflector.all_kinds().into_iter().collect();
    assert_eq!(kinds, vec!["case", "gender", "number"]);
}

// =========================================================================
// Checks
// =========================================================================

#[test]
fn check_reports_template_problems() {
    let inflector = inflector();
    let warnings = inflector.check("en", "typo").unwrap();
    assert!(warnings.iter().any(|warning| matches!(
        warning,
        TemplateWarning::UnknownToken { token, .. } if token == "mm"
    )));
    assert!(inflector.check("en", "welcome").unwrap().is_empty());
    assert!(matches!(
        inflector.check("en", "missing"),
        Err(InflectError::TranslationNotFound { .. })
    ));
}
