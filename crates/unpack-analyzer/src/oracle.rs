//! Sharing verdicts.
//!
//! A type is only safe to check when this compilation unit owns it: a
//! second reference means another binding site (or another use entirely)
//! may rely on partial destructuring, so the declaration is left alone.

use unpack_binder::{DeclId, ScopeIndex};

use crate::config::AnalyzerConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharingVerdict {
    /// Exactly one use-reference, or an `always_check` match.
    Private,
    Shared,
}

/// Classify a declaration from the index's reference counts. Recomputed at
/// every reference; verdicts are never cached.
pub fn sharing_verdict<I: ScopeIndex>(
    index: &I,
    decl: DeclId,
    config: &AnalyzerConfig,
) -> SharingVerdict {
    if config.is_always_checked(&index.declaration(decl).name) {
        return SharingVerdict::Private;
    }
    if index.reference_count(decl) == 1 {
        SharingVerdict::Private
    } else {
        SharingVerdict::Shared
    }
}

#[cfg(test)]
mod tests {
    use unpack_binder::{DeclKind, Declaration, ScopeId};
    use unpack_parser::NodeId;

    use super::*;

    /// Index over a fixed declaration table; names resolve nowhere.
    struct FakeIndex {
        decls: Vec<(Declaration, usize)>,
    }

    impl FakeIndex {
        fn with(name: &str, refs: usize) -> FakeIndex {
            FakeIndex {
                decls: vec![(
                    Declaration {
                        name: name.to_string(),
                        kind: DeclKind::TypeAlias,
                        node: NodeId::NONE,
                        is_exported: false,
                        scope: ScopeId(0),
                    },
                    refs,
                )],
            }
        }
    }

    impl ScopeIndex for FakeIndex {
        fn resolve_binding(&self, _name: &str, _scope: ScopeId) -> Option<DeclId> {
            None
        }

        fn reference_count(&self, decl: DeclId) -> usize {
            self.decls[decl.0 as usize].1
        }

        fn declaration(&self, decl: DeclId) -> &Declaration {
            &self.decls[decl.0 as usize].0
        }
    }

    #[test]
    fn test_single_reference_is_private() {
        let index = FakeIndex::with("T", 1);
        let verdict = sharing_verdict(&index, DeclId(0), &AnalyzerConfig::default());
        assert_eq!(verdict, SharingVerdict::Private);
    }

    #[test]
    fn test_multiple_references_are_shared() {
        let index = FakeIndex::with("T", 2);
        let verdict = sharing_verdict(&index, DeclId(0), &AnalyzerConfig::default());
        assert_eq!(verdict, SharingVerdict::Shared);
    }

    #[test]
    fn test_zero_references_are_shared() {
        // Unreferenced means the count pre-pass never saw a use; stay out.
        let index = FakeIndex::with("T", 0);
        let verdict = sharing_verdict(&index, DeclId(0), &AnalyzerConfig::default());
        assert_eq!(verdict, SharingVerdict::Shared);
    }

    #[test]
    fn test_always_check_overrides_sharing() {
        let index = FakeIndex::with("DialogProps", 5);
        let config = AnalyzerConfig {
            always_check: vec!["Dialog*".to_string()],
            ..AnalyzerConfig::default()
        };
        let verdict = sharing_verdict(&index, DeclId(0), &config);
        assert_eq!(verdict, SharingVerdict::Private);
    }
}
