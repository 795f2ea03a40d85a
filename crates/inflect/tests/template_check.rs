//! Tests for static template checks.

use inflect::{
    InflectionConfig, InflectionRegistry, PatternErrorKind, TemplateWarning, check_template,
};
use insta::assert_snapshot;
use serde_json::json;

fn registry() -> InflectionRegistry {
    let config: InflectionConfig = serde_json::from_value(json!({
        "gender": { "f": "female", "m": "male", "n": "neuter", "lady": "@f", "default": "n" },
        "number": { "s": "singular", "p": "plural" }
    }))
    .unwrap();
    InflectionRegistry::build("en", &config).unwrap()
}

fn report(template: &str) -> String {
    check_template(&registry(), template, false)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn clean_template_has_no_warnings() {
    assert!(
        check_template(
            &registry(),
            "Dear @{f:Madam|m:Sir|n:You} and @{s:one|p:many|some}",
            false
        )
        .unwrap()
            .is_empty()
    );
}

#[test]
fn default_in_pattern_counts_as_fallback() {
    assert_eq!(report("@{f:Madam|n:You}"), "");
    assert_eq!(report("@gender{f:Madam|*:You}"), "");
}

#[test]
fn wildcard_without_default_is_no_fallback() {
    let config: InflectionConfig = serde_json::from_value(json!({
        "formality": { "formal": "formal", "casual": "casual" }
    }))
    .unwrap();
    let registry = InflectionRegistry::build("en", &config).unwrap();
    let warnings = check_template(&registry, "@formality{*:Hi}", false).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_snapshot!(
        warnings[0],
        @"pattern '@formality{*:Hi}': no free text and no default token of kind 'formality' in the pattern"
    );
}

#[test]
fn reports_unknown_duplicate_and_missing_fallback() {
    assert_snapshot!(report("@{f:Madam|mm:Sir|f:Again}"), @r"
    pattern '@{f:Madam|mm:Sir|f:Again}': unknown token 'mm'; did you mean: m?
    pattern '@{f:Madam|mm:Sir|f:Again}': 'f' appears in more than one segment; only the first can match
    pattern '@{f:Madam|mm:Sir|f:Again}': no free text and no default token of kind 'gender' in the pattern
    ");
}

#[test]
fn reports_alias_tokens() {
    let warnings = check_template(&registry(), "@{lady:Madam|m:Sir|Hi}", false).unwrap();
    assert_eq!(
        warnings,
        vec![TemplateWarning::AliasToken {
            pattern: "@{lady:Madam|m:Sir|Hi}".to_string(),
            token: "lady".to_string(),
            target: "f".to_string(),
        }]
    );
}

#[test]
fn aliases_are_accepted_with_aliased_patterns() {
    assert!(
        check_template(&registry(), "@{lady:Madam|m:Sir|Hi}", true)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn lone_alias_cannot_infer_kind() {
    assert_snapshot!(
        report("@{lady:Madam|Sir}"),
        @"pattern '@{lady:Madam|Sir}': no known token to infer the kind from"
    );
}

#[test]
fn inferred_kind_follows_aliased_patterns() {
    assert_snapshot!(
        report("@{lady:x|s:y|z}"),
        @"pattern '@{lady:x|s:y|z}': token 'lady' belongs to kind 'gender', expected 'number'"
    );

    let warnings = check_template(&registry(), "@{lady:x|s:y|z}", true).unwrap();
    assert_eq!(
        warnings,
        vec![TemplateWarning::WrongKind {
            pattern: "@{lady:x|s:y|z}".to_string(),
            token: "s".to_string(),
            expected_kind: "gender".to_string(),
            actual_kind: "number".to_string(),
        }]
    );
}

#[test]
fn reports_wrong_kind() {
    assert_snapshot!(
        report("@gender{f:x|s:y|z}"),
        @"pattern '@gender{f:x|s:y|z}': token 's' belongs to kind 'number', expected 'gender'"
    );
}

#[test]
fn reports_unknown_kind() {
    assert_snapshot!(report("@mood{a:b|c}"), @"pattern '@mood{a:b|c}': unknown kind 'mood'");
}

#[test]
fn reports_uninferable_kind() {
    assert_snapshot!(
        report("@{zz:b|c}"),
        @"pattern '@{zz:b|c}': no known token to infer the kind from"
    );
}

#[test]
fn kind_without_default_needs_free_text() {
    assert_snapshot!(
        report("@{s:one|p:many}"),
        @"pattern '@{s:one|p:many}': no free text and no default token of kind 'number' in the pattern"
    );
}

#[test]
fn negated_repeats_are_not_duplicates() {
    assert_eq!(report("@{!f:a|!f:b|c}"), "");
}

#[test]
fn malformed_template_is_an_error() {
    let error = check_template(&registry(), "@{f:a", false).unwrap_err();
    assert_eq!(error.kind, PatternErrorKind::Unclosed);
}
