//! Resolved object shapes.

use indexmap::IndexMap;
use unpack_parser::NodeId;

/// One named member of a resolved shape. The anchor is the declaring
/// member node; diagnostics point at it, nothing else reads it.
#[derive(Clone, Debug)]
pub struct TypeMember {
    pub name: String,
    pub anchor: NodeId,
}

/// The property set a declared type resolves to, in declaration order.
///
/// Duplicate names keep their first position but take the latest anchor
/// (intersection branches overwrite left to right). An empty shape means
/// nothing resolved confidently; callers skip the site rather than treat
/// it as "no properties".
#[derive(Debug, Default)]
pub struct ResolvedShape {
    members: IndexMap<String, TypeMember>,
}

impl ResolvedShape {
    #[must_use]
    pub fn new() -> ResolvedShape {
        ResolvedShape::default()
    }

    pub fn insert(&mut self, member: TypeMember) {
        self.members.insert(member.name.clone(), member);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeMember> {
        self.members.values()
    }
}
