//! Binder state, declaration storage, and the `ScopeIndex` contract.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;
use unpack_parser::NodeId;

/// Handle to a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Handle to a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    TypeAlias,
    Interface,
    Function,
    Variable,
    Parameter,
}

/// One named declaration in some scope.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    /// The declaring node: the alias/interface/function statement, the
    /// variable declaration, or the parameter.
    pub node: NodeId,
    pub is_exported: bool,
    pub scope: ScopeId,
}

pub(crate) struct Scope {
    pub(crate) parent: Option<ScopeId>,
    /// Name -> declarations in this scope. More than one entry for a name
    /// makes it ambiguous; ambiguous names never resolve.
    pub(crate) decls: FxHashMap<String, SmallVec<[DeclId; 1]>>,
}

/// Resolution interface the analyzer depends on.
///
/// The real implementation is `BinderState`; tests drive the analyzer with
/// a fake index to exercise sharing decisions in isolation.
pub trait ScopeIndex {
    /// The unique declaration `name` resolves to from `scope`, walking the
    /// parent chain. `None` when unbound or ambiguous.
    fn resolve_binding(&self, name: &str, scope: ScopeId) -> Option<DeclId>;

    /// Number of observed use-references (the declaration itself excluded).
    fn reference_count(&self, decl: DeclId) -> usize;

    fn declaration(&self, decl: DeclId) -> &Declaration;
}

/// Scope/reference index over one compilation unit.
pub struct BinderState {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) decls: Vec<Declaration>,
    pub(crate) ref_counts: Vec<usize>,
    /// Scope introduced by a function-like or source-file node.
    pub(crate) node_scopes: FxHashMap<u32, ScopeId>,
    pub(crate) root: Option<ScopeId>,
}

impl BinderState {
    #[must_use]
    pub fn new() -> BinderState {
        BinderState {
            scopes: Vec::new(),
            decls: Vec::new(),
            ref_counts: Vec::new(),
            node_scopes: FxHashMap::default(),
            root: None,
        }
    }

    /// Scope of the whole compilation unit; `None` before binding.
    #[must_use]
    pub fn root_scope(&self) -> Option<ScopeId> {
        self.root
    }

    /// The scope a function-like (or source-file) node introduces.
    #[must_use]
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.node_scopes.get(&node.0).copied()
    }

    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.decls.len()
    }

    pub(crate) fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            decls: FxHashMap::default(),
        });
        id
    }

    pub(crate) fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: DeclKind,
        node: NodeId,
        is_exported: bool,
    ) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(Declaration {
            name: name.to_string(),
            kind,
            node,
            is_exported,
            scope,
        });
        self.ref_counts.push(0);
        self.scopes[scope.0 as usize]
            .decls
            .entry(name.to_string())
            .or_default()
            .push(id);
        trace!(name, ?kind, exported = is_exported, "declared");
        id
    }

    pub(crate) fn record_reference(&mut self, decl: DeclId) {
        self.ref_counts[decl.0 as usize] += 1;
    }
}

impl ScopeIndex for BinderState {
    fn resolve_binding(&self, name: &str, scope: ScopeId) -> Option<DeclId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0 as usize];
            if let Some(candidates) = scope.decls.get(name) {
                // Duplicate declarations of one name (interface merging,
                // type/value collisions) are ambiguous on purpose.
                return if candidates.len() == 1 {
                    Some(candidates[0])
                } else {
                    None
                };
            }
            current = scope.parent;
        }
        None
    }

    fn reference_count(&self, decl: DeclId) -> usize {
        self.ref_counts[decl.0 as usize]
    }

    fn declaration(&self, decl: DeclId) -> &Declaration {
        &self.decls[decl.0 as usize]
    }
}
