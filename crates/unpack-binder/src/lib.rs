//! Scope and reference index for the unpack analyzer.
//!
//! A single pass over one parsed tree records every declaration the subset
//! models (type aliases, interfaces, functions, variables, parameters) with
//! its scope and export flag, and counts type-position references to each
//! declaration. The analyzer consumes the result through the `ScopeIndex`
//! trait so tests can substitute a fake index.

pub mod state;
pub use state::{BinderState, DeclId, DeclKind, Declaration, ScopeId, ScopeIndex};

mod state_binding;
