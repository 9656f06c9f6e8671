//! Component-style binding sites: `const C: FC<P> = ...`.

use unpack_analyzer::{AnalyzerConfig, SiteReport, analyze_source};

fn analyze(source: &str) -> Vec<SiteReport> {
    analyze_source("test.ts", source, &AnalyzerConfig::default()).unwrap()
}

fn missing(source: &str) -> Vec<String> {
    analyze(source)
        .iter()
        .flat_map(|report| report.diagnostics.iter())
        .map(|diag| diag.property.clone())
        .collect()
}

#[test]
fn test_plain_component_binding() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x }) => null;";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_memo_wrapper_unwraps() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = memo(({ x }) => null);";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_nested_wrappers_unwrap() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = memo(forwardRef(({ x }) => null));";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_cast_and_parens_unwrap() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = (({ x }) => null) as any;";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_satisfies_and_nonnull_unwrap() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = (({ x }) => null) satisfies unknown;";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_inline_props_literal() {
    let source = "const C: FC<{ x: string; y: string }> = ({ x }) => null;";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_qualified_component_type_matches_last_segment() {
    let source = "type Props = { x: string; y: string };\nconst C: React.FC<Props> = ({ x }) => null;";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_type_argument_wins_over_parameter_annotation() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x }: { x: string }) => null;";
    // The parameter's own annotation is complete for itself; Props still
    // governs the component site.
    let reports = analyze(source);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].diagnostics[0].property, "y");
}

#[test]
fn test_incomplete_parameter_annotation_reports_once() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x }: { x: string; y: string }) => null;";
    // Both Props and the annotation miss `y`; the pattern is one site, so
    // only the component check runs and `y` is reported exactly once.
    let reports = analyze(source);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].diagnostics.len(), 1);
    assert_eq!(reports[0].diagnostics[0].property, "y");
}

#[test]
fn test_function_expression_component() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = function ({ x }) { return null; };";
    assert_eq!(missing(source), ["y"]);
}

#[test]
fn test_unknown_call_wrapper_is_not_unwrapped() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = mystery(({ x }) => null);";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_non_component_annotation_is_not_a_site() {
    let source = "type Props = { x: string; y: string };\nconst C: Box<Props> = ({ x }) => null;";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_rest_pattern_component_is_silent() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x, ...rest }) => null;";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_shared_props_type_is_silent() {
    let source = "type Props = { x: string; y: string };\nconst C: FC<Props> = ({ x }) => null;\nconst D: FC<Props> = ({ y }) => null;";
    assert!(analyze(source).is_empty());
}

#[test]
fn test_custom_component_types_and_wrappers() {
    let source = "type Props = { x: string; y: string };\nconst C: Widget<Props> = observe(({ x }) => null);";
    let config = AnalyzerConfig {
        component_types: vec!["Widget".to_string()],
        wrapper_calls: vec!["observe".to_string()],
        always_check: Vec::new(),
    };
    let reports = analyze_source("test.ts", source, &config).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].diagnostics[0].property, "y");
}
