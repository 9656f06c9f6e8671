//! AST node types.
//!
//! Nodes are stored in a `NodeArena` and referenced through `NodeId`
//! handles. Optional child slots hold `NodeId::NONE`.

use unpack_common::Span;

/// Handle into the `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    #[must_use]
    pub const fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }
}

/// One AST node: source span plus kind-specific payload.
#[derive(Clone, Debug)]
pub struct Node {
    pub span: Span,
    pub data: NodeData,
}

/// Kind-specific payload.
///
/// `Other*` variants stand in for syntax outside the analyzed subset; they
/// keep the tree well-formed while contributing nothing to resolution.
#[derive(Clone, Debug)]
pub enum NodeData {
    SourceFile {
        statements: Vec<NodeId>,
    },
    Identifier {
        text: String,
    },
    StringLiteral {
        value: String,
    },

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------
    TypeLiteral {
        members: Vec<NodeId>,
    },
    /// Named member of a type literal or interface body. Method-style and
    /// accessor members also land here; only the name matters for
    /// extraction, but the member type stays reachable so reference
    /// counting sees type names used inside it.
    PropertySignature {
        name: NodeId,
        optional: bool,
        type_node: NodeId,
    },
    /// Index signatures and computed-key members: not representable as a
    /// discrete property name, so extraction ignores them.
    IndexSignature {
        type_node: NodeId,
    },
    IntersectionType {
        branches: Vec<NodeId>,
    },
    UnionType {
        branches: Vec<NodeId>,
    },
    /// `Name` or `Name<Args>`. For qualified names (`ns.Name`) only the
    /// last segment is kept and `qualified` is set; qualified references
    /// never resolve to a local declaration.
    TypeReference {
        name: NodeId,
        type_args: Vec<NodeId>,
        qualified: bool,
    },
    /// Tuple, array, function, literal, operator types: opaque to
    /// extraction, but nested type nodes are kept as children so their
    /// references still count.
    OtherType {
        children: Vec<NodeId>,
    },

    // ------------------------------------------------------------------
    // Declarations and statements
    // ------------------------------------------------------------------
    TypeAliasDeclaration {
        name: NodeId,
        type_node: NodeId,
        is_exported: bool,
    },
    InterfaceDeclaration {
        name: NodeId,
        heritage: Vec<NodeId>,
        members: Vec<NodeId>,
        is_exported: bool,
    },
    FunctionDeclaration {
        name: NodeId,
        parameters: Vec<NodeId>,
        return_type: NodeId,
        body: NodeId,
        is_exported: bool,
    },
    VariableStatement {
        declarations: Vec<NodeId>,
        is_exported: bool,
    },
    VariableDeclaration {
        name: NodeId,
        type_annotation: NodeId,
        initializer: NodeId,
    },
    Block {
        statements: Vec<NodeId>,
    },

    // ------------------------------------------------------------------
    // Binding patterns
    // ------------------------------------------------------------------
    Parameter {
        name: NodeId,
        type_annotation: NodeId,
        dot_dot_dot: bool,
    },
    ObjectBindingPattern {
        elements: Vec<NodeId>,
        has_rest: bool,
        has_computed: bool,
    },
    /// `key`, `key: alias`, `key = default`, `'key': alias` — the span
    /// covers the whole element so patches can anchor after it.
    BindingElement {
        property_name: String,
    },
    /// Array patterns and anything else we do not analyze.
    OtherPattern,

    // ------------------------------------------------------------------
    // Expressions (initializer subset)
    // ------------------------------------------------------------------
    ArrowFunction {
        parameters: Vec<NodeId>,
        return_type: NodeId,
        body: NodeId,
    },
    FunctionExpression {
        parameters: Vec<NodeId>,
        return_type: NodeId,
        body: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    /// Cast-like wrappers that forward their operand: `e as T`,
    /// `e satisfies T`, `e!`, `(e)`.
    OuterExpression {
        expression: NodeId,
    },
    OtherExpression,
}
