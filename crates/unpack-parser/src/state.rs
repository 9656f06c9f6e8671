//! Parser state - token buffer, lookahead, and recovery helpers.

use tracing::trace;
use unpack_common::Span;
use unpack_scanner::{ScannerSnapshot, ScannerState, SyntaxKind, token_is_identifier_or_keyword};

use crate::arena::NodeArena;
use crate::node::{NodeData, NodeId};

/// Recursive-descent parser over one compilation unit.
///
/// The parser never fails: statements it cannot classify are skipped with
/// balanced-delimiter recovery and simply do not appear in the tree.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) current_token: SyntaxKind,
    /// End offset of the most recently consumed token; spans of list-like
    /// nodes close here.
    pub(crate) prev_token_end: u32,
    file_name: String,
}

/// Saved parser position for speculative parsing.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    current_token: SyntaxKind,
    prev_token_end: u32,
    arena_len: usize,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source: String) -> ParserState {
        ParserState {
            scanner: ScannerState::new(source),
            arena: NodeArena::new(),
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            file_name,
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn source(&self) -> &str {
        self.scanner.source()
    }

    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Parse the whole compilation unit and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeId {
        self.next_token();
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.scanner.token_pos();
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            // A statement parser that consumed nothing would loop forever.
            if self.scanner.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }
        trace!(file = %self.file_name, statements = statements.len(), "parsed source file");
        let end = self.prev_token_end;
        self.arena
            .alloc(Span::new(0, end), NodeData::SourceFile { statements })
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.current_token = self.scanner.next_token();
        self.current_token
    }

    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        token_is_identifier_or_keyword(self.current_token)
    }

    /// Consume the token if it matches; report whether it did.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            return true;
        }
        false
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    pub(crate) fn token_text(&self) -> &str {
        self.scanner.token_text()
    }

    pub(crate) fn save_state(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            current_token: self.current_token,
            prev_token_end: self.prev_token_end,
            arena_len: self.arena.len(),
        }
    }

    /// Rewind to a snapshot. Nodes allocated since are abandoned in place;
    /// they are unreachable from the final tree.
    pub(crate) fn restore_state(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.current_token = snapshot.current_token;
        self.prev_token_end = snapshot.prev_token_end;
        let _ = snapshot.arena_len;
    }

    /// Parse an identifier-like token into an `Identifier` node.
    /// Returns `NodeId::NONE` when the current token cannot be a name.
    pub(crate) fn parse_identifier(&mut self) -> NodeId {
        if !self.is_identifier_or_keyword() {
            return NodeId::NONE;
        }
        let span = Span::new(self.token_pos(), self.token_end());
        let text = self.token_text().to_string();
        self.next_token();
        self.arena.alloc(span, NodeData::Identifier { text })
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Skip tokens with delimiter balancing until the statement plausibly
    /// ends: a `;` at depth zero (consumed), a `}` at depth zero (left for
    /// the enclosing block), a statement-start keyword at depth zero, or a
    /// `}` that closes a brace opened inside the skipped region.
    pub(crate) fn skip_statement(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::ReturnKeyword
                    if depth == 0 =>
                {
                    return;
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => {
                    depth += 1;
                    self.next_token();
                }
                SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.next_token();
                    if depth == 0 {
                        // A top-level `{...}` just closed; treat it as the
                        // end of the statement (function body, object, ...).
                        return;
                    }
                }
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.next_token();
                }
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// Skip a balanced `(...)` or `[...]` group, including the delimiters.
    /// The current token must be the opening delimiter.
    pub(crate) fn skip_balanced(&mut self) {
        let close = match self.current_token {
            SyntaxKind::OpenParenToken => SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken => SyntaxKind::CloseBracketToken,
            SyntaxKind::OpenBraceToken => SyntaxKind::CloseBraceToken,
            _ => return,
        };
        let mut depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => {
                    depth += 1;
                    self.next_token();
                }
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    let kind = self.current_token;
                    depth = depth.saturating_sub(1);
                    self.next_token();
                    if depth == 0 && kind == close {
                        return;
                    }
                }
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// Skip `<...>` type arguments/parameters with angle balancing.
    /// The current token must be `<`. Returns false (without a defined
    /// resting position) when the group never closes; callers that are
    /// speculating should save/restore around this.
    pub(crate) fn skip_type_args(&mut self) -> bool {
        let mut angle_depth = 0u32;
        let mut group_depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken | SyntaxKind::SemicolonToken => return false,
                SyntaxKind::LessThanToken => {
                    angle_depth += 1;
                    self.next_token();
                }
                SyntaxKind::GreaterThanToken => {
                    if angle_depth == 0 {
                        return false;
                    }
                    angle_depth -= 1;
                    self.next_token();
                    if angle_depth == 0 {
                        return group_depth == 0;
                    }
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => {
                    group_depth += 1;
                    self.next_token();
                }
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    if group_depth == 0 {
                        return false;
                    }
                    group_depth -= 1;
                    self.next_token();
                }
                _ => {
                    self.next_token();
                }
            }
        }
    }
}
