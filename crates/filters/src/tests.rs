use std::io::Cursor;

use super::*;

fn compiled(spec: FilterSpec) -> FilterRules {
    FilterRules::compile(&spec).expect("patterns compile")
}

#[test]
fn no_rules_track_and_keep_everything() {
    let rules = compiled(FilterSpec::new());
    assert!(rules.should_track("anything.log"));
    assert!(rules.should_keep(Cursor::new(b"no patterns configured")));
    assert!(!rules.has_keep_if());
}

#[test]
fn include_rule_rejects_non_matching_names() {
    let rules = compiled(FilterSpec::new().include("^nginx-"));
    assert!(rules.should_track("nginx-abc_default_web-0.log"));
    assert!(!rules.should_track("redis-abc_default_cache-0.log"));
}

#[test]
fn include_matches_anywhere_not_full_match() {
    let rules = compiled(FilterSpec::new().include("default"));
    assert!(rules.should_track("nginx-abc_default_web-0.log"));
}

#[test]
fn exclude_rule_rejects_matching_names() {
    let rules = compiled(FilterSpec::new().exclude("sidecar"));
    assert!(!rules.should_track("web_default_sidecar-0.log"));
    assert!(rules.should_track("web_default_app-0.log"));
}

#[test]
fn exclude_wins_when_both_rules_fire() {
    let rules = compiled(FilterSpec::new().include("web").exclude("sidecar"));
    assert!(!rules.should_track("web_default_sidecar-0.log"));
    assert!(rules.should_track("web_default_app-0.log"));
}

#[test]
fn empty_pattern_means_rule_absent() {
    let rules = compiled(FilterSpec::new().include("").exclude("").keep_if(""));
    assert!(rules.should_track("anything"));
    assert!(!rules.has_keep_if());
    assert!(rules.should_keep(Cursor::new(b"unscanned")));
}

#[test]
fn keep_if_matches_any_line() {
    let rules = compiled(FilterSpec::new().keep_if("panic"));
    assert!(rules.should_keep(Cursor::new(b"line one\nthread panic: oops\nline three\n")));
    assert!(!rules.should_keep(Cursor::new(b"line one\nline two\n")));
}

#[test]
fn keep_if_short_circuits_on_first_match() {
    let rules = compiled(FilterSpec::new().keep_if("^hit"));
    assert!(rules.should_keep(Cursor::new(b"hit\n")));
}

#[test]
fn keep_if_scans_binary_content() {
    let rules = compiled(FilterSpec::new().keep_if("ERROR"));
    let content = b"\xff\xfe garbage\nERROR \xf0 partial utf8\n";
    assert!(rules.should_keep(Cursor::new(&content[..])));
}

#[test]
fn keep_if_handles_content_without_trailing_newline() {
    let rules = compiled(FilterSpec::new().keep_if("tail"));
    assert!(rules.should_keep(Cursor::new(b"head\ntail")));
}

#[test]
fn malformed_pattern_reports_offender() {
    let error = FilterRules::compile(&FilterSpec::new().include("(unclosed"))
        .expect_err("pattern must not compile");
    assert_eq!(error.pattern(), "(unclosed");
    assert!(error.to_string().contains("(unclosed"));
}

#[test]
fn malformed_keep_if_pattern_fails_compilation() {
    assert!(FilterRules::compile(&FilterSpec::new().keep_if("[")).is_err());
}
