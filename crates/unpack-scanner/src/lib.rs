//! Tokenizer for the TypeScript subset understood by the unpack analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with save/restore snapshots
//!
//! The scanner is deliberately lenient: any character sequence it does not
//! recognize becomes a single `Unknown` token so that the parser's
//! balanced-delimiter recovery can step over it.

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, text_to_keyword, token_is_identifier_or_keyword};

pub mod state;
pub use state::{ScannerSnapshot, ScannerState};
