//! Binding-site location.
//!
//! Finds every destructuring pattern worth checking: typed object-pattern
//! parameters of function-likes at any depth, and component-style variable
//! bindings (`const C: FC<P> = ...`) whose initializer unwraps to a
//! function taking an object pattern. Patterns with rest or computed
//! elements are discarded here and never reach the checker.

use tracing::debug;
use unpack_binder::{BinderState, ScopeId};
use unpack_parser::{NodeArena, NodeData, NodeId};

use crate::config::AnalyzerConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteKind {
    /// A typed object-pattern parameter: `function f({a}: T)`.
    Param,
    /// A component pattern checked against the annotation's type argument.
    ComponentProp,
}

/// One destructuring pattern paired with the type that governs it.
#[derive(Clone, Copy, Debug)]
pub struct BindingSite {
    pub pattern: NodeId,
    pub declared_type: NodeId,
    /// Scope the declared type resolves in.
    pub scope: ScopeId,
    pub kind: SiteKind,
}

pub(crate) struct SiteLocator<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
    config: &'a AnalyzerConfig,
    sites: Vec<BindingSite>,
}

impl<'a> SiteLocator<'a> {
    pub(crate) fn locate(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        config: &'a AnalyzerConfig,
        file: NodeId,
    ) -> Vec<BindingSite> {
        let mut locator = SiteLocator {
            arena,
            binder,
            config,
            sites: Vec::new(),
        };
        if let Some(root) = binder.root_scope()
            && let Some(statements) = arena.statements_of(file)
        {
            for &stmt in statements {
                locator.walk_statement(stmt, root);
            }
        }
        debug!(sites = locator.sites.len(), "located binding sites");
        locator.sites
    }

    fn walk_statement(&mut self, stmt: NodeId, scope: ScopeId) {
        let Some(node) = self.arena.get(stmt) else {
            return;
        };
        match &node.data {
            NodeData::FunctionDeclaration {
                parameters, body, ..
            } => {
                self.walk_function_like(stmt, parameters, *body, scope);
            }
            NodeData::VariableStatement { declarations, .. } => {
                for &decl in declarations {
                    self.walk_variable_declaration(decl, scope);
                }
            }
            NodeData::Block { statements } => {
                for &inner in statements {
                    self.walk_statement(inner, scope);
                }
            }
            _ => {}
        }
    }

    fn walk_variable_declaration(&mut self, decl: NodeId, scope: ScopeId) {
        let Some(node) = self.arena.get(decl) else {
            return;
        };
        let NodeData::VariableDeclaration {
            type_annotation,
            initializer,
            ..
        } = node.data
        else {
            return;
        };
        if let Some(site) = self.component_site(type_annotation, initializer, scope) {
            self.sites.push(site);
        }
        self.walk_expression(initializer, scope);
    }

    /// `const C: W<P> = wrap((pattern) => ...)` with `W` in
    /// `component_types` yields a site checking `pattern` against `P`.
    fn component_site(
        &self,
        type_annotation: NodeId,
        initializer: NodeId,
        scope: ScopeId,
    ) -> Option<BindingSite> {
        let annotation = self.arena.get(type_annotation)?;
        let NodeData::TypeReference {
            name, type_args, ..
        } = &annotation.data
        else {
            return None;
        };
        let wrapper = self.arena.identifier_text(*name)?;
        if !self.config.is_component_type(wrapper) {
            return None;
        }
        let declared_type = *type_args.first()?;

        let mut value = self.arena.skip_outer_expressions(initializer);
        loop {
            let node = self.arena.get(value)?;
            match &node.data {
                NodeData::CallExpression { callee, arguments } => {
                    let callee = self.arena.skip_outer_expressions(*callee);
                    let callee_name = self.arena.identifier_text(callee)?;
                    if !self.config.is_wrapper_call(callee_name) {
                        return None;
                    }
                    value = self.arena.skip_outer_expressions(*arguments.first()?);
                }
                NodeData::ArrowFunction { parameters, .. }
                | NodeData::FunctionExpression { parameters, .. } => {
                    let pattern = self.parameter_pattern(*parameters.first()?)?;
                    return Some(BindingSite {
                        pattern,
                        declared_type,
                        scope,
                        kind: SiteKind::ComponentProp,
                    });
                }
                _ => return None,
            }
        }
    }

    fn walk_expression(&mut self, expr: NodeId, scope: ScopeId) {
        let Some(node) = self.arena.get(expr) else {
            return;
        };
        match &node.data {
            NodeData::ArrowFunction {
                parameters, body, ..
            }
            | NodeData::FunctionExpression {
                parameters, body, ..
            } => {
                self.walk_function_like(expr, parameters, *body, scope);
            }
            NodeData::CallExpression { arguments, .. } => {
                for &arg in arguments {
                    self.walk_expression(arg, scope);
                }
            }
            NodeData::OuterExpression { expression } => {
                self.walk_expression(*expression, scope);
            }
            _ => {}
        }
    }

    fn walk_function_like(
        &mut self,
        node: NodeId,
        parameters: &[NodeId],
        body: NodeId,
        enclosing: ScopeId,
    ) {
        let scope = self.binder.scope_of(node).unwrap_or(enclosing);
        for &param in parameters {
            self.param_site(param, scope);
        }
        if let Some(statements) = self.arena.statements_of(body) {
            for &stmt in statements {
                self.walk_statement(stmt, scope);
            }
        } else if body.is_some() {
            self.walk_expression(body, scope);
        }
    }

    fn param_site(&mut self, param: NodeId, scope: ScopeId) {
        let Some(node) = self.arena.get(param) else {
            return;
        };
        let NodeData::Parameter {
            type_annotation, ..
        } = node.data
        else {
            return;
        };
        if type_annotation.is_none() {
            return;
        }
        if let Some(pattern) = self.parameter_pattern(param) {
            // A component site already claims this pattern; the wrapper's
            // type argument governs it, not the parameter annotation.
            if self.sites.iter().any(|site| site.pattern == pattern) {
                return;
            }
            self.sites.push(BindingSite {
                pattern,
                declared_type: type_annotation,
                scope,
                kind: SiteKind::Param,
            });
        }
    }

    /// The parameter's object pattern, unless it carries rest or computed
    /// elements (either can consume arbitrary properties).
    fn parameter_pattern(&self, param: NodeId) -> Option<NodeId> {
        let node = self.arena.get(param)?;
        let NodeData::Parameter { name, .. } = node.data else {
            return None;
        };
        let pattern = self.arena.get(name)?;
        let NodeData::ObjectBindingPattern {
            has_rest,
            has_computed,
            ..
        } = pattern.data
        else {
            return None;
        };
        if has_rest || has_computed {
            return None;
        }
        Some(name)
    }
}
