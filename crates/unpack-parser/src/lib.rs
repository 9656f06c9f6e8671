//! Lenient parser and AST types for the unpack analyzer.
//!
//! The parser recognizes exactly the TypeScript shapes the destructuring
//! analysis consumes: type aliases, interfaces, object type literals,
//! intersections, type references, functions with typed object-pattern
//! parameters, and component-style variable bindings. Everything else is
//! skipped with balanced-delimiter recovery and never fails the parse; the
//! analyzer's contract is to under-report on syntax it does not understand,
//! never to error.
//!
//! Nodes live in a `NodeArena` and are addressed by `NodeId` handles.

pub mod node;
pub use node::{Node, NodeData, NodeId};

pub mod arena;
pub use arena::NodeArena;

pub mod state;
pub use state::ParserState;

mod state_expressions;
mod state_statements;
mod state_types;
