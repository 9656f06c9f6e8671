//! Shared/exported/ambiguous types must never be expanded.

use unpack_analyzer::{AnalyzerConfig, SiteReport, analyze_source};

fn analyze_with(source: &str, config: &AnalyzerConfig) -> Vec<SiteReport> {
    analyze_source("test.ts", source, config).unwrap()
}

fn analyze(source: &str) -> Vec<SiteReport> {
    analyze_with(source, &AnalyzerConfig::default())
}

#[test]
fn test_type_used_by_two_sites_never_diagnoses() {
    let source = "type T = { a: string; b: string };\nfunction f({ a }: T) {}\nfunction g({ b }: T) {}";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_second_reference_outside_any_site_still_shares() {
    let source = "type T = { a: string; b: string };\ntype Other = { t: T };\nfunction f({ a }: T) {}";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_exported_type_is_skipped() {
    let source = "export type T = { a: string; b: string };\nfunction f({ a }: T) {}";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_always_check_overrides_export() {
    let source = "export type T = { a: string; b: string };\nfunction f({ a }: T) {}";
    let config = AnalyzerConfig {
        always_check: vec!["T".to_string()],
        ..AnalyzerConfig::default()
    };
    let reports = analyze_with(source, &config);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].diagnostics[0].property, "b");
}

#[test]
fn test_always_check_overrides_sharing() {
    let source = "type Props = { a: string; b: string };\nfunction f({ a }: Props) {}\nfunction g({ a }: Props) {}";
    let config = AnalyzerConfig {
        always_check: vec!["Props*".to_string()],
        ..AnalyzerConfig::default()
    };
    let reports = analyze_with(source, &config);
    // Both sites diagnose once the oracle is overridden.
    assert_eq!(reports.len(), 2);
}

#[test]
fn test_duplicate_declarations_are_skipped() {
    let source = "interface T { a: string }\ninterface T { b: string }\nfunction f({ a }: T) {}";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_shadowed_local_type_is_private() {
    let source = "type T = { x: string };\nfunction f() {\n  type T = { a: string; b: string };\n  function g({ a }: T) {}\n}";
    let reports = analyze(source);
    // The annotation resolves to the inner T, which has exactly one use.
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].diagnostics[0].property, "b");
}

#[test]
fn test_interface_annotation_resolves() {
    let source = "interface Opts { a: string; b: string }\nfunction f({ a }: Opts) {}";
    let reports = analyze(source);
    assert_eq!(reports[0].diagnostics[0].property, "b");
}
