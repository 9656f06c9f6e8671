//! Common types and utilities for the unpack destructuring analyzer.
//!
//! This crate provides foundational types used across all unpack crates:
//! - Source spans (`Span`)
//! - Diagnostic and fix types (`Diagnostic`, `InsertFix`)

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostic and fix types produced by the analyzer
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, InsertFix};
