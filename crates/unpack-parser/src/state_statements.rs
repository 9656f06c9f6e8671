//! Parser state - statements, declarations, parameters, binding patterns.

use tracing::trace;
use unpack_common::Span;
use unpack_scanner::SyntaxKind;

use crate::node::{NodeData, NodeId};
use crate::state::ParserState;

impl ParserState {
    /// Parse one statement, or skip it when it is outside the subset.
    pub(crate) fn parse_statement(&mut self) -> Option<NodeId> {
        match self.current_token {
            SyntaxKind::ExportKeyword => self.parse_export_statement(),
            SyntaxKind::TypeKeyword => self.parse_type_alias_statement(false),
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(false),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(false),
            SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => {
                self.parse_variable_statement(false)
            }
            SyntaxKind::OpenBraceToken => Some(self.parse_block()),
            SyntaxKind::ImportKeyword | SyntaxKind::ReturnKeyword => {
                self.next_token();
                self.skip_statement();
                None
            }
            _ => {
                self.skip_statement();
                None
            }
        }
    }

    fn parse_export_statement(&mut self) -> Option<NodeId> {
        self.next_token();
        match self.current_token {
            SyntaxKind::TypeKeyword => self.parse_type_alias_statement(true),
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(true),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(true),
            SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => {
                self.parse_variable_statement(true)
            }
            // `export default ...`, `export { ... }`, `export * from ...`
            _ => {
                self.skip_statement();
                None
            }
        }
    }

    /// `type Name<...> = Type;` — `type` is contextual, so bail out unless
    /// an identifier follows.
    fn parse_type_alias_statement(&mut self, is_exported: bool) -> Option<NodeId> {
        let start = self.token_pos();
        self.next_token();
        if !self.is_identifier_or_keyword() {
            self.skip_statement();
            return None;
        }
        let name = self.parse_identifier();
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_args();
        }
        if !self.parse_optional(SyntaxKind::EqualsToken) {
            self.skip_statement();
            return None;
        }
        let type_node = self.parse_type();
        self.parse_optional(SyntaxKind::SemicolonToken);
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::TypeAliasDeclaration {
                name,
                type_node,
                is_exported,
            },
        ))
    }

    fn parse_interface_declaration(&mut self, is_exported: bool) -> Option<NodeId> {
        let start = self.token_pos();
        self.next_token();
        if !self.is_identifier_or_keyword() {
            self.skip_statement();
            return None;
        }
        let name = self.parse_identifier();
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_args();
        }

        let mut heritage = Vec::new();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            loop {
                if !self.is_identifier_or_keyword() {
                    break;
                }
                heritage.push(self.parse_type_reference());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }

        if !self.parse_optional(SyntaxKind::OpenBraceToken) {
            self.skip_statement();
            return None;
        }
        let members = self.parse_type_members();
        self.parse_optional(SyntaxKind::CloseBraceToken);
        trace!(members = members.len(), "parsed interface");
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::InterfaceDeclaration {
                name,
                heritage,
                members,
                is_exported,
            },
        ))
    }

    pub(crate) fn parse_function_declaration(&mut self, is_exported: bool) -> Option<NodeId> {
        let start = self.token_pos();
        self.next_token();
        // Generator star scans as an opaque token.
        if self.is_token(SyntaxKind::Unknown) && self.token_text() == "*" {
            self.next_token();
        }
        let name = self.parse_identifier();
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_args();
        }
        let Some(parameters) = self.parse_parameter_list() else {
            self.skip_statement();
            return None;
        };
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            // Overload signature or declaration without body.
            self.parse_optional(SyntaxKind::SemicolonToken);
            NodeId::NONE
        };
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::FunctionDeclaration {
                name,
                parameters,
                return_type,
                body,
                is_exported,
            },
        ))
    }

    pub(crate) fn parse_block(&mut self) -> NodeId {
        let start = self.token_pos();
        self.next_token();
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            if self.token_pos() == before
                && !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                self.next_token();
            }
        }
        self.parse_optional(SyntaxKind::CloseBraceToken);
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::Block { statements },
        )
    }

    fn parse_variable_statement(&mut self, is_exported: bool) -> Option<NodeId> {
        let start = self.token_pos();
        self.next_token();
        let mut declarations = Vec::new();
        loop {
            match self.parse_variable_declaration() {
                Some(decl) => declarations.push(decl),
                None => break,
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_optional(SyntaxKind::SemicolonToken);
        if declarations.is_empty() {
            self.skip_statement();
            return None;
        }
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::VariableStatement {
                declarations,
                is_exported,
            },
        ))
    }

    fn parse_variable_declaration(&mut self) -> Option<NodeId> {
        let start = self.token_pos();
        let name = match self.current_token {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => {
                let pat_start = self.token_pos();
                self.skip_balanced();
                self.arena.alloc(
                    Span::new(pat_start, self.prev_token_end),
                    NodeData::OtherPattern,
                )
            }
            _ if self.is_identifier_or_keyword() => self.parse_identifier(),
            _ => return None,
        };
        // Definite-assignment assertion: `let x!: T`.
        self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeId::NONE
        };
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::VariableDeclaration {
                name,
                type_annotation,
                initializer,
            },
        ))
    }

    // =========================================================================
    // Parameters and binding patterns
    // =========================================================================

    /// Parse `( param, ... )`. Returns `None` (position unspecified) when
    /// the list is malformed; speculative callers save/restore around this.
    pub(crate) fn parse_parameter_list(&mut self) -> Option<Vec<NodeId>> {
        if !self.parse_optional(SyntaxKind::OpenParenToken) {
            return None;
        }
        let mut parameters = Vec::new();
        loop {
            match self.current_token {
                SyntaxKind::CloseParenToken => {
                    self.next_token();
                    return Some(parameters);
                }
                SyntaxKind::EndOfFileToken => return None,
                SyntaxKind::CommaToken => {
                    self.next_token();
                }
                _ => {
                    parameters.push(self.parse_parameter()?);
                    if !self.is_token(SyntaxKind::CommaToken)
                        && !self.is_token(SyntaxKind::CloseParenToken)
                    {
                        return None;
                    }
                }
            }
        }
    }

    fn parse_parameter(&mut self) -> Option<NodeId> {
        let start = self.token_pos();
        let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = match self.current_token {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => {
                let pat_start = self.token_pos();
                self.skip_balanced();
                self.arena.alloc(
                    Span::new(pat_start, self.prev_token_end),
                    NodeData::OtherPattern,
                )
            }
            _ if self.is_identifier_or_keyword() => self.parse_identifier(),
            _ => return None,
        };
        self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.skip_expression();
        }
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::Parameter {
                name,
                type_annotation,
                dot_dot_dot,
            },
        ))
    }

    /// Parse `{ a, b: alias, c = default, 'd-e': f, ...rest }`.
    ///
    /// The pattern span covers both braces; element spans cover the whole
    /// element including rename and default, which is what the patch
    /// synthesizer anchors insertions after.
    pub(crate) fn parse_object_binding_pattern(&mut self) -> NodeId {
        let start = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        let mut has_rest = false;
        let mut has_computed = false;
        loop {
            match self.current_token {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    self.next_token();
                }
                SyntaxKind::DotDotDotToken => {
                    has_rest = true;
                    self.next_token();
                    if self.is_identifier_or_keyword() {
                        self.next_token();
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    has_computed = true;
                    self.skip_balanced();
                    self.skip_binding_element_tail();
                }
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                    let elem_start = self.token_pos();
                    let key = if self.is_token(SyntaxKind::StringLiteral) {
                        self.scanner.token_value_ref().to_string()
                    } else {
                        self.token_text().to_string()
                    };
                    self.next_token();
                    self.finish_binding_element(&mut elements, elem_start, key);
                }
                _ if self.is_identifier_or_keyword() => {
                    let elem_start = self.token_pos();
                    let key = self.token_text().to_string();
                    self.next_token();
                    self.finish_binding_element(&mut elements, elem_start, key);
                }
                _ => {
                    self.next_token();
                }
            }
        }
        self.parse_optional(SyntaxKind::CloseBraceToken);
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::ObjectBindingPattern {
                elements,
                has_rest,
                has_computed,
            },
        )
    }

    fn finish_binding_element(&mut self, elements: &mut Vec<NodeId>, start: u32, key: String) {
        self.skip_binding_element_tail();
        elements.push(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::BindingElement { property_name: key },
        ));
    }

    /// Consume the rename (`: target`) and default (`= expr`) parts of a
    /// binding element, whatever shape the target takes.
    fn skip_binding_element_tail(&mut self) {
        if self.parse_optional(SyntaxKind::ColonToken) {
            match self.current_token {
                SyntaxKind::OpenBraceToken => {
                    self.parse_object_binding_pattern();
                }
                SyntaxKind::OpenBracketToken => self.skip_balanced(),
                _ if self.is_identifier_or_keyword() => {
                    self.next_token();
                }
                _ => {}
            }
        }
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.skip_expression();
        }
    }
}
