//! Insertion-fix synthesis and idempotence.

use unpack_analyzer::{AnalyzerConfig, SiteReport, analyze_source, apply_fixes};

fn analyze(source: &str) -> Vec<SiteReport> {
    analyze_source("test.ts", source, &AnalyzerConfig::default()).unwrap()
}

fn fixed(source: &str) -> String {
    apply_fixes(source, &analyze(source))
}

#[test]
fn test_fix_appends_after_last_element() {
    let source = "type T = { a: string; b: number };\nfunction f({ a }: T) {}";
    assert_eq!(
        fixed(source),
        "type T = { a: string; b: number };\nfunction f({ a, b }: T) {}"
    );
}

#[test]
fn test_fix_fills_empty_pattern() {
    let source = "function f({}: { a: string; b: string }) {}";
    assert_eq!(fixed(source), "function f({a, b}: { a: string; b: string }) {}");
}

#[test]
fn test_fix_preserves_renamed_and_defaulted_elements() {
    let source = "function f({ a: x, b = 1 }: { a: string; b: number; c: boolean }) {}";
    assert_eq!(
        fixed(source),
        "function f({ a: x, b = 1, c }: { a: string; b: number; c: boolean }) {}"
    );
}

#[test]
fn test_fix_names_follow_declaration_order() {
    let source = "function f({ b }: { a: string; b: string; c: string; d: string }) {}";
    assert_eq!(
        fixed(source),
        "function f({ b, a, c, d }: { a: string; b: string; c: string; d: string }) {}"
    );
}

#[test]
fn test_one_fix_per_site() {
    let source = "function f({ a }: { a: string; b: string; c: string }) {}";
    let reports = analyze(source);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].diagnostics.len(), 2);
    assert_eq!(reports[0].fix.text, ", b, c");
}

#[test]
fn test_fixes_apply_across_multiple_sites() {
    let source = "function f({ a }: { a: string; b: string }) {}\nfunction g({ x }: { x: string; y: string }) {}";
    assert_eq!(
        fixed(source),
        "function f({ a, b }: { a: string; b: string }) {}\nfunction g({ x, y }: { x: string; y: string }) {}"
    );
}

#[test]
fn test_fix_is_idempotent() {
    let source = "type T = { a: string; b: number };\nfunction f({ a }: T) {}\nconst C: FC<{ x: string; y: string }> = memo(({ x }) => null);";
    let patched = fixed(source);
    assert_ne!(patched, source);
    assert!(analyze(&patched).is_empty());
}

#[test]
fn test_annotated_component_parameter_gets_one_insertion() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x }: { x: string; y: string }) => null;";
    assert_eq!(
        fixed(source),
        "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x, y }: { x: string; y: string }) => null;"
    );
}

#[test]
fn test_component_fix() {
    let source = "const C: FC<{ x: string; y: string }> = memo(({ x }) => null);";
    assert_eq!(
        fixed(source),
        "const C: FC<{ x: string; y: string }> = memo(({ x, y }) => null);"
    );
}
