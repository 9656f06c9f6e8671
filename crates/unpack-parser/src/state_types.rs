//! Parser state - type parsing (literals, references, intersections).

use unpack_common::Span;
use unpack_scanner::SyntaxKind;

use crate::node::{NodeData, NodeId};
use crate::state::ParserState;

impl ParserState {
    /// Parse a type. Union binds looser than intersection; anything the
    /// subset does not model becomes `OtherType` with its nested type
    /// nodes preserved as children.
    pub(crate) fn parse_type(&mut self) -> NodeId {
        let start = self.token_pos();
        // Leading `|` or `&` on multi-line types.
        self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type();
        if !self.is_token(SyntaxKind::BarToken) {
            return first;
        }
        let mut branches = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            branches.push(self.parse_intersection_type());
        }
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::UnionType { branches },
        )
    }

    fn parse_intersection_type(&mut self) -> NodeId {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operand();
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return first;
        }
        let mut branches = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            branches.push(self.parse_type_operand());
        }
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::IntersectionType { branches },
        )
    }

    fn parse_type_operand(&mut self) -> NodeId {
        let start = self.token_pos();
        let operand = match self.current_token {
            SyntaxKind::OpenBraceToken => self.parse_type_literal(),
            SyntaxKind::OpenParenToken => self.parse_paren_or_function_type(),
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                self.next_token();
                self.alloc_other_type(start, Vec::new())
            }
            _ if self.is_type_operator_name() => {
                // `typeof x`, `keyof T`, `readonly T[]`, `infer U`
                self.next_token();
                let inner = self.parse_type_operand();
                self.alloc_other_type(start, vec![inner])
            }
            _ if self.is_identifier_or_keyword() => self.parse_type_reference(),
            _ => {
                self.next_token();
                self.alloc_other_type(start, Vec::new())
            }
        };
        self.parse_type_suffixes(start, operand)
    }

    /// `T[]` array and `T[K]` indexed-access suffixes.
    fn parse_type_suffixes(&mut self, start: u32, mut operand: NodeId) -> NodeId {
        while self.is_token(SyntaxKind::OpenBracketToken) {
            self.next_token();
            let mut children = vec![operand];
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                children.push(self.parse_type());
            }
            self.parse_optional(SyntaxKind::CloseBracketToken);
            operand = self.alloc_other_type(start, children);
        }
        operand
    }

    fn is_type_operator_name(&self) -> bool {
        self.is_token(SyntaxKind::Identifier)
            && matches!(
                self.token_text(),
                "typeof" | "keyof" | "readonly" | "infer" | "unique"
            )
    }

    fn alloc_other_type(&mut self, start: u32, children: Vec<NodeId>) -> NodeId {
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::OtherType { children },
        )
    }

    /// `Name`, `ns.Name`, `Name<Args>`. Qualified references keep only the
    /// last segment and never resolve locally.
    pub(crate) fn parse_type_reference(&mut self) -> NodeId {
        let start = self.token_pos();
        let mut name = self.parse_identifier();
        let mut qualified = false;
        while self.parse_optional(SyntaxKind::DotToken) {
            if !self.is_identifier_or_keyword() {
                break;
            }
            name = self.parse_identifier();
            qualified = true;
        }
        let mut type_args = Vec::new();
        if self.parse_optional(SyntaxKind::LessThanToken) {
            loop {
                if self.is_token(SyntaxKind::GreaterThanToken)
                    || self.is_token(SyntaxKind::EndOfFileToken)
                {
                    break;
                }
                type_args.push(self.parse_type());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_optional(SyntaxKind::GreaterThanToken);
        }
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::TypeReference {
                name,
                type_args,
                qualified,
            },
        )
    }

    /// `(T)` parenthesized type, `() => R` / `(x: T) => R` function types.
    fn parse_paren_or_function_type(&mut self) -> NodeId {
        let start = self.token_pos();
        let snapshot = self.save_state();
        self.next_token();

        // Empty parameter list is unambiguous.
        if !self.is_token(SyntaxKind::CloseParenToken) {
            let inner = self.parse_type();
            if self.parse_optional(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EqualsGreaterThanToken)
            {
                return inner;
            }
            // `(T) => R` or a parameter list; rewind and reparse as params.
            self.restore_state(snapshot);
            self.next_token();
        }

        let mut children = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.parse_optional(SyntaxKind::DotDotDotToken);
            if self.is_identifier_or_keyword() {
                let param_snapshot = self.save_state();
                self.next_token();
                self.parse_optional(SyntaxKind::QuestionToken);
                if !self.parse_optional(SyntaxKind::ColonToken) {
                    // Not `name: Type`; the whole thing is a type.
                    self.restore_state(param_snapshot);
                    children.push(self.parse_type());
                } else {
                    children.push(self.parse_type());
                }
            } else {
                children.push(self.parse_type());
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_optional(SyntaxKind::CloseParenToken);
        if self.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
            children.push(self.parse_type());
        }
        self.alloc_other_type(start, children)
    }

    fn parse_tuple_type(&mut self) -> NodeId {
        let start = self.token_pos();
        self.next_token();
        let mut children = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.parse_optional(SyntaxKind::DotDotDotToken);
            // Named tuple member: `name: Type`.
            if self.is_identifier_or_keyword() {
                let snapshot = self.save_state();
                self.next_token();
                self.parse_optional(SyntaxKind::QuestionToken);
                if self.parse_optional(SyntaxKind::ColonToken) {
                    children.push(self.parse_type());
                } else {
                    self.restore_state(snapshot);
                    children.push(self.parse_type());
                }
            } else {
                children.push(self.parse_type());
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_optional(SyntaxKind::CloseBracketToken);
        self.alloc_other_type(start, children)
    }

    pub(crate) fn parse_type_literal(&mut self) -> NodeId {
        let start = self.token_pos();
        self.next_token();
        let members = self.parse_type_members();
        self.parse_optional(SyntaxKind::CloseBraceToken);
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::TypeLiteral { members },
        )
    }

    /// Members of a type literal or interface body, up to the closing `}`
    /// (not consumed).
    pub(crate) fn parse_type_members(&mut self) -> Vec<NodeId> {
        let mut members = Vec::new();
        loop {
            match self.current_token {
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken | SyntaxKind::CommaToken => {
                    self.next_token();
                }
                SyntaxKind::OpenBracketToken => {
                    members.push(self.parse_index_or_computed_member());
                }
                _ if self.is_member_name_start() => {
                    members.push(self.parse_named_member());
                }
                _ => {
                    self.next_token();
                }
            }
        }
        members
    }

    fn is_member_name_start(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.current_token,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::ConstKeyword
                    | SyntaxKind::LetKeyword
                    | SyntaxKind::VarKeyword
                    | SyntaxKind::FunctionKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::ExportKeyword
                    | SyntaxKind::ImportKeyword
                    | SyntaxKind::ReturnKeyword
            )
    }

    /// `[k: string]: T` index signatures and `[K in ...]` / computed keys:
    /// no discrete name, extraction ignores them.
    fn parse_index_or_computed_member(&mut self) -> NodeId {
        let start = self.token_pos();
        self.skip_balanced();
        self.parse_optional(SyntaxKind::QuestionToken);
        let type_node = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };
        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::IndexSignature { type_node },
        )
    }

    fn parse_named_member(&mut self) -> NodeId {
        let start = self.token_pos();

        // `readonly` prefix, and `get`/`set` accessor keywords, only when a
        // member name follows (otherwise they *are* the member name).
        loop {
            if self.is_token(SyntaxKind::Identifier)
                && matches!(self.token_text(), "readonly" | "get" | "set")
            {
                let snapshot = self.save_state();
                self.next_token();
                if self.is_member_name_start() || self.is_token(SyntaxKind::OpenBracketToken) {
                    continue;
                }
                self.restore_state(snapshot);
            }
            break;
        }

        if self.is_token(SyntaxKind::OpenBracketToken) {
            return self.parse_index_or_computed_member();
        }

        let name_span = Span::new(self.token_pos(), self.token_end());
        let name = match self.current_token {
            SyntaxKind::StringLiteral => {
                let value = self.scanner.token_value_ref().to_string();
                self.next_token();
                self.arena.alloc(name_span, NodeData::StringLiteral { value })
            }
            SyntaxKind::NumericLiteral => {
                let value = self.token_text().to_string();
                self.next_token();
                self.arena.alloc(name_span, NodeData::StringLiteral { value })
            }
            _ => {
                let text = self.token_text().to_string();
                self.next_token();
                self.arena.alloc(name_span, NodeData::Identifier { text })
            }
        };

        let optional = self.parse_optional(SyntaxKind::QuestionToken);

        // Method signature: optional generics, then a parenthesized
        // parameter list, then an optional return type.
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_type_args();
        }
        let type_node = if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced();
            if self.parse_optional(SyntaxKind::ColonToken) {
                self.parse_type()
            } else {
                NodeId::NONE
            }
        } else if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeId::NONE
        };

        self.arena.alloc(
            Span::new(start, self.prev_token_end),
            NodeData::PropertySignature {
                name,
                optional,
                type_node,
            },
        )
    }
}
