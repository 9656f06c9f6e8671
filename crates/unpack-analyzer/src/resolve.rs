//! Shape resolution: turn a declared type node into a `ResolvedShape`.
//!
//! One worklist walk covers literal member extraction, named-reference
//! expansion, and intersection merging. Anything the walk does not
//! recognize contributes nothing; the result is an under-approximation by
//! construction.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::trace;
use unpack_binder::{DeclKind, ScopeId, ScopeIndex};
use unpack_parser::{NodeArena, NodeData, NodeId};

use crate::config::AnalyzerConfig;
use crate::oracle::{SharingVerdict, sharing_verdict};
use crate::shape::{ResolvedShape, TypeMember};

/// References are expanded at the annotation itself (hop 0) and one level
/// into its expansion (hop 1); names surfacing at hop 2 stay opaque.
const MAX_REFERENCE_HOP: u8 = 1;

pub struct ShapeResolver<'a, I: ScopeIndex> {
    arena: &'a NodeArena,
    index: &'a I,
    config: &'a AnalyzerConfig,
}

impl<'a, I: ScopeIndex> ShapeResolver<'a, I> {
    pub fn new(arena: &'a NodeArena, index: &'a I, config: &'a AnalyzerConfig) -> Self {
        ShapeResolver {
            arena,
            index,
            config,
        }
    }

    /// Resolve the shape of `ty` as seen from `scope`.
    #[must_use]
    pub fn resolve(&self, ty: NodeId, scope: ScopeId) -> ResolvedShape {
        let mut shape = ResolvedShape::new();
        let mut visited: FxHashSet<_> = FxHashSet::default();
        // Queue order keeps later branches overwriting earlier anchors.
        let mut worklist = VecDeque::new();
        worklist.push_back((ty, scope, 0u8));

        while let Some((node_id, scope, hop)) = worklist.pop_front() {
            let Some(node) = self.arena.get(node_id) else {
                continue;
            };
            match &node.data {
                NodeData::TypeLiteral { members } => {
                    self.extract_members(members, &mut shape);
                }
                NodeData::IntersectionType { branches } => {
                    for &branch in branches {
                        worklist.push_back((branch, scope, hop));
                    }
                }
                NodeData::TypeReference {
                    name, qualified, ..
                } => {
                    if *qualified || hop > MAX_REFERENCE_HOP {
                        continue;
                    }
                    let Some(text) = self.arena.identifier_text(*name) else {
                        continue;
                    };
                    let Some(decl_id) = self.index.resolve_binding(text, scope) else {
                        trace!(name = text, "reference did not resolve, skipping");
                        continue;
                    };
                    if !visited.insert(decl_id) {
                        continue;
                    }
                    let decl = self.index.declaration(decl_id);
                    if !matches!(decl.kind, DeclKind::TypeAlias | DeclKind::Interface) {
                        continue;
                    }
                    let always = self.config.is_always_checked(&decl.name);
                    if decl.is_exported && !always {
                        trace!(name = text, "exported type, skipping expansion");
                        continue;
                    }
                    if sharing_verdict(self.index, decl_id, self.config) == SharingVerdict::Shared
                    {
                        trace!(name = text, "shared type, skipping expansion");
                        continue;
                    }
                    let decl_scope = decl.scope;
                    let Some(decl_node) = self.arena.get(decl.node) else {
                        continue;
                    };
                    match &decl_node.data {
                        NodeData::TypeAliasDeclaration { type_node, .. } => {
                            worklist.push_back((*type_node, decl_scope, hop + 1));
                        }
                        NodeData::InterfaceDeclaration {
                            heritage, members, ..
                        } => {
                            self.extract_members(members, &mut shape);
                            for &base in heritage {
                                worklist.push_back((base, decl_scope, hop + 1));
                            }
                        }
                        _ => {}
                    }
                }
                // Unions, operator types, functions, tuples: unsupported
                // shapes resolve to nothing.
                _ => {}
            }
        }
        shape
    }

    fn extract_members(&self, members: &[NodeId], shape: &mut ResolvedShape) {
        for &member in members {
            if let Some(node) = self.arena.get(member)
                && let NodeData::PropertySignature { name, .. } = &node.data
                && let Some(text) = self.arena.identifier_text(*name)
            {
                shape.insert(TypeMember {
                    name: text.to_string(),
                    anchor: member,
                });
            }
        }
    }
}
