//! Scope/reference index tests.

use unpack_binder::{BinderState, DeclKind, ScopeId, ScopeIndex};
use unpack_parser::{NodeArena, NodeId, ParserState};

fn bind(source: &str) -> (NodeArena, BinderState, NodeId) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let file = parser.parse_source_file();
    let mut binder = BinderState::new();
    binder.bind_source_file(parser.arena(), file);
    (parser.into_arena(), binder, file)
}

fn root(binder: &BinderState) -> ScopeId {
    binder.root_scope().expect("bound")
}

#[test]
fn test_resolve_and_reference_count() {
    let (_, binder, _) = bind("type T = { a: string };\nfunction f({ a }: T) {}");
    let decl = binder.resolve_binding("T", root(&binder)).expect("T resolves");
    assert_eq!(binder.declaration(decl).kind, DeclKind::TypeAlias);
    assert_eq!(binder.reference_count(decl), 1);
}

#[test]
fn test_two_references_counted() {
    let (_, binder, _) = bind(
        "type T = { a: string };\nfunction f({ a }: T) {}\nfunction g({ a }: T) {}",
    );
    let decl = binder.resolve_binding("T", root(&binder)).unwrap();
    assert_eq!(binder.reference_count(decl), 2);
}

#[test]
fn test_reference_inside_member_type_counts() {
    let (_, binder, _) = bind("type A = { x: string };\ntype B = { y: A };");
    let decl = binder.resolve_binding("A", root(&binder)).unwrap();
    assert_eq!(binder.reference_count(decl), 1);
}

#[test]
fn test_reference_in_type_arguments_counts() {
    let (_, binder, _) = bind("type P = { a: string };\nconst c: FC<P> = x;");
    let decl = binder.resolve_binding("P", root(&binder)).unwrap();
    assert_eq!(binder.reference_count(decl), 1);
}

#[test]
fn test_duplicate_declarations_are_ambiguous() {
    let (_, binder, _) = bind("interface I { a: string }\ninterface I { b: string }");
    assert!(binder.resolve_binding("I", root(&binder)).is_none());
}

#[test]
fn test_export_flag() {
    let (_, binder, _) = bind("export type T = { a: string };\ntype U = { b: string };");
    let t = binder.resolve_binding("T", root(&binder)).unwrap();
    let u = binder.resolve_binding("U", root(&binder)).unwrap();
    assert!(binder.declaration(t).is_exported);
    assert!(!binder.declaration(u).is_exported);
}

#[test]
fn test_function_scope_shadowing() {
    let source = "type T = { outer: string };\nfunction f() { type T = { inner: string };\n  function g({ inner }: T) {} }";
    let (arena, binder, file) = bind(source);
    // The outer T is never referenced; the inner one is.
    let outer = binder.resolve_binding("T", root(&binder)).unwrap();
    assert_eq!(binder.reference_count(outer), 0);

    let stmts = arena.statements_of(file).unwrap().to_vec();
    let f_scope = binder.scope_of(stmts[1]).expect("f has a scope");
    let inner = binder.resolve_binding("T", f_scope).expect("inner T");
    assert_ne!(inner, outer);
    assert_eq!(binder.reference_count(inner), 1);
}

#[test]
fn test_qualified_references_do_not_count() {
    let (_, binder, _) = bind("type FC = { irrelevant: string };\nconst c: React.FC<{ a: string }> = x;");
    let decl = binder.resolve_binding("FC", root(&binder)).unwrap();
    assert_eq!(binder.reference_count(decl), 0);
}

#[test]
fn test_unbound_name_resolves_to_none() {
    let (_, binder, _) = bind("function f({ a }: Missing) {}");
    assert!(binder.resolve_binding("Missing", root(&binder)).is_none());
}

#[test]
fn test_parameter_declared_in_function_scope() {
    let (arena, binder, file) = bind("function f(x: number) {}");
    let stmts = arena.statements_of(file).unwrap().to_vec();
    let f_scope = binder.scope_of(stmts[0]).expect("f has a scope");
    let x = binder.resolve_binding("x", f_scope).expect("x in f scope");
    assert_eq!(binder.declaration(x).kind, DeclKind::Parameter);
    assert!(binder.resolve_binding("x", root(&binder)).is_none());
}
