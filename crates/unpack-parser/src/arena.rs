//! Node storage and typed accessors.

use unpack_common::Span;

use crate::node::{Node, NodeData, NodeId};

/// Flat arena of AST nodes. Children are allocated before parents, so a
/// `NodeId` always refers to an earlier slot.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn alloc(&mut self, span: Span, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { span, data });
        id
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Span of a node; `Span::EMPTY` for `NodeId::NONE`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).map_or(Span::EMPTY, |n| n.span)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text of an `Identifier` node, or the cooked value of a
    /// `StringLiteral` used in name position.
    #[must_use]
    pub fn identifier_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Identifier { text } => Some(text),
            NodeData::StringLiteral { value } => Some(value),
            _ => None,
        }
    }

    /// Unwrap `OuterExpression` chains (`as`, `satisfies`, `!`, parens)
    /// down to the underlying expression.
    #[must_use]
    pub fn skip_outer_expressions(&self, mut id: NodeId) -> NodeId {
        while let Some(node) = self.get(id) {
            match &node.data {
                NodeData::OuterExpression { expression } => id = *expression,
                _ => break,
            }
        }
        id
    }

    /// The statements of a `SourceFile` or `Block`, if `id` is one.
    #[must_use]
    pub fn statements_of(&self, id: NodeId) -> Option<&[NodeId]> {
        match &self.get(id)?.data {
            NodeData::SourceFile { statements } | NodeData::Block { statements } => {
                Some(statements)
            }
            _ => None,
        }
    }
}
