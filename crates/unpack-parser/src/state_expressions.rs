//! Parser state - initializer expressions.
//!
//! Only the shapes the binding-site locator cares about are modeled:
//! function/arrow expressions, wrapper calls, and cast-like outer
//! expressions. Everything else is consumed as `OtherExpression`.

use unpack_common::Span;
use unpack_scanner::SyntaxKind;

use crate::node::{NodeData, NodeId};
use crate::state::ParserState;

impl ParserState {
    /// Parse one assignment-level expression, leniently. Always consumes at
    /// least up to the next `,`/`;`/closer at depth zero.
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeId {
        let start = self.token_pos();
        let mut expr = self.parse_primary_expression();

        loop {
            match self.current_token {
                SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword => {
                    self.next_token();
                    let _ty = self.parse_type();
                    expr = self.arena.alloc(
                        Span::new(start, self.prev_token_end),
                        NodeData::OuterExpression { expression: expr },
                    );
                }
                SyntaxKind::ExclamationToken => {
                    self.next_token();
                    expr = self.arena.alloc(
                        Span::new(start, self.prev_token_end),
                        NodeData::OuterExpression { expression: expr },
                    );
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary_expression(&mut self) -> NodeId {
        let start = self.token_pos();
        match self.current_token {
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::OpenParenToken => self.parse_paren_or_arrow(),
            _ if self.is_identifier_or_keyword() => self.parse_identifier_led_expression(),
            _ => self.skip_expression_from(start),
        }
    }

    fn parse_function_expression(&mut self) -> NodeId {
        let start = self.token_pos();
        self.next_token();
        if self.is_token(SyntaxKind::Unknown) && self.token_text() == "*" {
            self.next_token();
        }
        let _name = if self.is_identifier_or_keyword() {
            self.parse_identifier()
        } else {
            NodeId::NONE
        };
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_args();
        }
        let Some(parameters) = self.parse_parameter_list() else {
            return self.skip_expression_from(start);
        };
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            NodeId::NONE
        };
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::FunctionExpression {
                parameters,
                return_type,
                body,
            },
        )
    }

    /// `( ... ) => body` arrow, or `( expr )` as an outer expression.
    fn parse_paren_or_arrow(&mut self) -> NodeId {
        let start = self.token_pos();
        let snapshot = self.save_state();
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }
        self.restore_state(snapshot);

        let paren_snapshot = self.save_state();
        self.next_token();
        let inner = self.parse_assignment_expression();
        if self.parse_optional(SyntaxKind::CloseParenToken) {
            return self.arena.alloc(
                Span::new(start, self.prev_token_end),
                NodeData::OuterExpression { expression: inner },
            );
        }
        self.restore_state(paren_snapshot);
        self.skip_expression_from(start)
    }

    /// Current token must be `(`. Returns `None` (caller restores) when
    /// this is not actually an arrow function head.
    fn try_parse_arrow_function(&mut self) -> Option<NodeId> {
        let start = self.token_pos();
        let parameters = self.parse_parameter_list()?;
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };
        if !self.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
            return None;
        }
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_assignment_expression()
        };
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::ArrowFunction {
                parameters,
                return_type,
                body,
            },
        ))
    }

    fn parse_identifier_led_expression(&mut self) -> NodeId {
        let start = self.token_pos();

        // `async` before an arrow head or single-parameter arrow.
        if self.is_token(SyntaxKind::Identifier) && self.token_text() == "async" {
            let snapshot = self.save_state();
            self.next_token();
            if self.is_token(SyntaxKind::OpenParenToken) {
                if let Some(arrow) = self.try_parse_arrow_function() {
                    return arrow;
                }
                self.restore_state(snapshot);
            } else if self.is_identifier_or_keyword() {
                if let Some(arrow) = self.try_parse_single_param_arrow() {
                    return arrow;
                }
                self.restore_state(snapshot);
            } else {
                self.restore_state(snapshot);
            }
        }

        // `x => body`
        if let Some(arrow) = {
            let snapshot = self.save_state();
            let arrow = self.try_parse_single_param_arrow();
            if arrow.is_none() {
                self.restore_state(snapshot);
            }
            arrow
        } {
            return arrow;
        }

        let callee = self.parse_identifier();

        // `wrapper<T>(...)`: speculative type arguments before a call.
        if self.is_token(SyntaxKind::LessThanToken) {
            let snapshot = self.save_state();
            if !(self.skip_type_args() && self.is_token(SyntaxKind::OpenParenToken)) {
                self.restore_state(snapshot);
            }
        }

        if self.is_token(SyntaxKind::OpenParenToken) {
            let arguments = self.parse_arguments();
            return self.arena.alloc(
                Span::new(start, self.prev_token_end),
                NodeData::CallExpression { callee, arguments },
            );
        }

        // Plain identifier or something more complex; consume the rest of
        // the expression opaquely.
        self.skip_expression_from(start)
    }

    fn try_parse_single_param_arrow(&mut self) -> Option<NodeId> {
        if !self.is_identifier_or_keyword() {
            return None;
        }
        let start = self.token_pos();
        let name = self.parse_identifier();
        if !self.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
            return None;
        }
        let parameter = self.arena.alloc(
            self.arena.span(name),
            NodeData::Parameter {
                name,
                type_annotation: NodeId::NONE,
                dot_dot_dot: false,
            },
        );
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_assignment_expression()
        };
        Some(self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::ArrowFunction {
                parameters: vec![parameter],
                return_type: NodeId::NONE,
                body,
            },
        ))
    }

    fn parse_arguments(&mut self) -> Vec<NodeId> {
        self.next_token();
        let mut arguments = Vec::new();
        loop {
            match self.current_token {
                SyntaxKind::CloseParenToken => {
                    self.next_token();
                    return arguments;
                }
                SyntaxKind::EndOfFileToken => return arguments,
                SyntaxKind::CommaToken => {
                    self.next_token();
                }
                _ => {
                    let before = self.token_pos();
                    arguments.push(self.parse_assignment_expression());
                    if !self.is_token(SyntaxKind::CommaToken)
                        && !self.is_token(SyntaxKind::CloseParenToken)
                    {
                        // Lenient: treat whatever is left as consumed.
                        self.skip_expression();
                        if self.token_pos() == before {
                            self.next_token();
                        }
                    }
                }
            }
        }
    }

    /// Consume tokens with delimiter balancing until the expression ends at
    /// depth zero: `,`, `;`, or any closer.
    pub(crate) fn skip_expression(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::CommaToken | SyntaxKind::SemicolonToken if depth == 0 => return,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseBracketToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.next_token();
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => {
                    depth += 1;
                    self.next_token();
                }
                _ => {
                    self.next_token();
                }
            }
        }
    }

    fn skip_expression_from(&mut self, start: u32) -> NodeId {
        self.skip_expression();
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::OtherExpression,
        )
    }
}
