//! Binder walk: declaration collection and reference counting.
//!
//! Declarations are collected scope-by-scope before references inside that
//! scope are counted, so a type may be used above its declaration (TypeScript
//! hoists type declarations). Block statements do not open scopes here;
//! their declarations land in the nearest enclosing function scope.

use tracing::debug;
use unpack_parser::{NodeArena, NodeData, NodeId};

use crate::state::{BinderState, DeclKind, ScopeId, ScopeIndex};

impl BinderState {
    /// Bind one compilation unit. Must be called exactly once.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeId) {
        let scope = self.new_scope(None);
        self.root = Some(scope);
        self.node_scopes.insert(root.0, scope);
        if let Some(statements) = arena.statements_of(root) {
            let statements = statements.to_vec();
            self.declare_statements(arena, &statements, scope);
            for stmt in &statements {
                self.bind_statement(arena, *stmt, scope);
            }
        }
        debug!(
            declarations = self.decls.len(),
            scopes = self.scopes.len(),
            "bound source file"
        );
    }

    /// Shallow declaration collection for one scope, flattening through
    /// blocks.
    fn declare_statements(&mut self, arena: &NodeArena, statements: &[NodeId], scope: ScopeId) {
        for &stmt in statements {
            let Some(node) = arena.get(stmt) else { continue };
            match &node.data {
                NodeData::TypeAliasDeclaration {
                    name, is_exported, ..
                } => {
                    if let Some(text) = arena.identifier_text(*name) {
                        self.declare(scope, text, DeclKind::TypeAlias, stmt, *is_exported);
                    }
                }
                NodeData::InterfaceDeclaration {
                    name, is_exported, ..
                } => {
                    if let Some(text) = arena.identifier_text(*name) {
                        self.declare(scope, text, DeclKind::Interface, stmt, *is_exported);
                    }
                }
                NodeData::FunctionDeclaration {
                    name, is_exported, ..
                } => {
                    if let Some(text) = arena.identifier_text(*name) {
                        self.declare(scope, text, DeclKind::Function, stmt, *is_exported);
                    }
                }
                NodeData::VariableStatement {
                    declarations,
                    is_exported,
                } => {
                    for &decl in declarations {
                        if let Some(decl_node) = arena.get(decl)
                            && let NodeData::VariableDeclaration { name, .. } = &decl_node.data
                            && let Some(text) = arena.identifier_text(*name)
                        {
                            self.declare(scope, text, DeclKind::Variable, decl, *is_exported);
                        }
                    }
                }
                NodeData::Block { statements } => {
                    let statements = statements.clone();
                    self.declare_statements(arena, &statements, scope);
                }
                _ => {}
            }
        }
    }

    fn bind_statement(&mut self, arena: &NodeArena, stmt: NodeId, scope: ScopeId) {
        let Some(node) = arena.get(stmt) else { return };
        match node.data.clone() {
            NodeData::TypeAliasDeclaration { type_node, .. } => {
                self.visit_type(arena, type_node, scope);
            }
            NodeData::InterfaceDeclaration {
                heritage, members, ..
            } => {
                for h in heritage {
                    self.visit_type(arena, h, scope);
                }
                for m in members {
                    self.visit_member(arena, m, scope);
                }
            }
            NodeData::FunctionDeclaration {
                parameters,
                return_type,
                body,
                ..
            } => {
                self.bind_function_like(arena, stmt, &parameters, return_type, body, scope);
            }
            NodeData::VariableStatement { declarations, .. } => {
                for decl in declarations {
                    if let Some(decl_node) = arena.get(decl)
                        && let NodeData::VariableDeclaration {
                            type_annotation,
                            initializer,
                            ..
                        } = decl_node.data
                    {
                        self.visit_type(arena, type_annotation, scope);
                        self.bind_expression(arena, initializer, scope);
                    }
                }
            }
            NodeData::Block { statements } => {
                for stmt in statements {
                    self.bind_statement(arena, stmt, scope);
                }
            }
            _ => {}
        }
    }

    /// Enter a fresh scope for a function-like node, declare its
    /// parameters, count annotation references, then bind the body.
    fn bind_function_like(
        &mut self,
        arena: &NodeArena,
        node: NodeId,
        parameters: &[NodeId],
        return_type: NodeId,
        body: NodeId,
        parent: ScopeId,
    ) {
        let scope = self.new_scope(Some(parent));
        self.node_scopes.insert(node.0, scope);

        for &param in parameters {
            if let Some(param_node) = arena.get(param)
                && let NodeData::Parameter {
                    name,
                    type_annotation,
                    ..
                } = param_node.data
            {
                if let Some(text) = arena.identifier_text(name) {
                    self.declare(scope, text, DeclKind::Parameter, param, false);
                }
                self.visit_type(arena, type_annotation, scope);
            }
        }
        self.visit_type(arena, return_type, scope);

        if let Some(statements) = arena.statements_of(body) {
            let statements = statements.to_vec();
            self.declare_statements(arena, &statements, scope);
            for stmt in &statements {
                self.bind_statement(arena, *stmt, scope);
            }
        } else if body.is_some() {
            // Expression-bodied arrow.
            self.bind_expression(arena, body, scope);
        }
    }

    fn bind_expression(&mut self, arena: &NodeArena, expr: NodeId, scope: ScopeId) {
        let Some(node) = arena.get(expr) else { return };
        match node.data.clone() {
            NodeData::ArrowFunction {
                parameters,
                return_type,
                body,
            }
            | NodeData::FunctionExpression {
                parameters,
                return_type,
                body,
            } => {
                self.bind_function_like(arena, expr, &parameters, return_type, body, scope);
            }
            NodeData::CallExpression { arguments, .. } => {
                for arg in arguments {
                    self.bind_expression(arena, arg, scope);
                }
            }
            NodeData::OuterExpression { expression } => {
                self.bind_expression(arena, expression, scope);
            }
            _ => {}
        }
    }

    fn visit_member(&mut self, arena: &NodeArena, member: NodeId, scope: ScopeId) {
        let Some(node) = arena.get(member) else { return };
        match node.data {
            NodeData::PropertySignature { type_node, .. }
            | NodeData::IndexSignature { type_node } => {
                self.visit_type(arena, type_node, scope);
            }
            _ => {}
        }
    }

    /// Count type-position references. Only unqualified names resolve;
    /// `ns.Name` has no local binding to count against.
    fn visit_type(&mut self, arena: &NodeArena, ty: NodeId, scope: ScopeId) {
        let Some(node) = arena.get(ty) else { return };
        match node.data.clone() {
            NodeData::TypeReference {
                name,
                type_args,
                qualified,
            } => {
                if !qualified
                    && let Some(text) = arena.identifier_text(name)
                    && let Some(decl) = self.resolve_binding(text, scope)
                {
                    self.record_reference(decl);
                }
                for arg in type_args {
                    self.visit_type(arena, arg, scope);
                }
            }
            NodeData::TypeLiteral { members } => {
                for member in members {
                    self.visit_member(arena, member, scope);
                }
            }
            NodeData::IntersectionType { branches } | NodeData::UnionType { branches } => {
                for branch in branches {
                    self.visit_type(arena, branch, scope);
                }
            }
            NodeData::OtherType { children } => {
                for child in children {
                    self.visit_type(arena, child, scope);
                }
            }
            _ => {}
        }
    }
}
