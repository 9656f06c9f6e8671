//! Tokenizer state machine.

use memchr::memchr;

use crate::syntax_kind::{SyntaxKind, text_to_keyword};

/// Saved scanner position for parser lookahead.
///
/// `restore_state` rewinds the scanner exactly to where `save_state` was
/// taken, including the current token.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_pos: usize,
    token_end: usize,
    token_value: String,
}

/// Tokenizer over one compilation unit.
///
/// Positions are byte offsets into the source. The scanner owns the source
/// text; the parser and analyzer borrow it back through `source()`.
pub struct ScannerState {
    source: String,
    pos: usize,
    token: SyntaxKind,
    token_pos: usize,
    token_end: usize,
    /// Unescaped value for string literals; raw text otherwise.
    token_value: String,
}

impl ScannerState {
    #[must_use]
    pub fn new(source: String) -> ScannerState {
        ScannerState {
            source,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_pos: 0,
            token_end: 0,
            token_value: String::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start offset of the current token (after leading trivia).
    #[must_use]
    pub fn token_pos(&self) -> u32 {
        self.token_pos as u32
    }

    /// End offset (exclusive) of the current token.
    #[must_use]
    pub fn token_end(&self) -> u32 {
        self.token_end as u32
    }

    /// Raw source text of the current token.
    #[must_use]
    pub fn token_text(&self) -> &str {
        &self.source[self.token_pos..self.token_end]
    }

    /// Cooked value: unescaped content for string literals, raw text for
    /// identifiers and keywords.
    #[must_use]
    pub fn token_value_ref(&self) -> &str {
        &self.token_value
    }

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_pos: self.token_pos,
            token_end: self.token_end,
            token_value: self.token_value.clone(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_pos = snapshot.token_pos;
        self.token_end = snapshot.token_end;
        self.token_value = snapshot.token_value;
    }

    fn byte(&self, at: usize) -> u8 {
        *self.source.as_bytes().get(at).unwrap_or(&0)
    }

    /// Skip whitespace and comments. Unterminated block comments run to EOF.
    fn skip_trivia(&mut self) {
        loop {
            match self.byte(self.pos) {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.byte(self.pos + 1) == b'/' => {
                    let rest = &self.source.as_bytes()[self.pos..];
                    match memchr(b'\n', rest) {
                        Some(nl) => self.pos += nl + 1,
                        None => self.pos = self.source.len(),
                    }
                }
                b'/' if self.byte(self.pos + 1) == b'*' => {
                    self.pos += 2;
                    while self.pos < self.source.len() {
                        if self.byte(self.pos) == b'*' && self.byte(self.pos + 1) == b'/' {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
            if self.pos >= self.source.len() {
                break;
            }
        }
    }

    /// Scan the next token and make it current.
    pub fn next_token(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.token_pos = self.pos;
        self.token_value.clear();

        if self.pos >= self.source.len() {
            self.token = SyntaxKind::EndOfFileToken;
            self.token_end = self.pos;
            return self.token;
        }

        let b = self.byte(self.pos);
        self.token = match b {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'=' => self.scan_equals(),
            b'&' => self.scan_pair(b'&', SyntaxKind::AmpersandToken),
            b'|' => self.scan_pair(b'|', SyntaxKind::BarToken),
            b'?' => self.scan_question(),
            b'!' => self.scan_exclamation(),
            b'<' => self.scan_angle(SyntaxKind::LessThanToken),
            b'>' => self.scan_angle(SyntaxKind::GreaterThanToken),
            b'.' => self.scan_dot(),
            b'"' | b'\'' => self.scan_string(b),
            b'`' => self.scan_template(),
            b'0'..=b'9' => self.scan_number(),
            _ if is_identifier_start(b) => self.scan_identifier(),
            _ => self.single(SyntaxKind::Unknown),
        };
        self.token_end = self.pos;
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        if self.byte(self.pos + 1) == b'>' {
            self.pos += 2;
            return SyntaxKind::EqualsGreaterThanToken;
        }
        if self.byte(self.pos + 1) == b'=' {
            // == or ===
            self.pos += if self.byte(self.pos + 2) == b'=' { 3 } else { 2 };
            return SyntaxKind::Unknown;
        }
        self.single(SyntaxKind::EqualsToken)
    }

    /// `&`/`|` alone are type operators; doubled (or compound-assigned) they
    /// are logical operators the parser treats as opaque.
    fn scan_pair(&mut self, ch: u8, kind: SyntaxKind) -> SyntaxKind {
        if self.byte(self.pos + 1) == ch || self.byte(self.pos + 1) == b'=' {
            self.pos += 2;
            if self.byte(self.pos) == b'=' {
                self.pos += 1;
            }
            return SyntaxKind::Unknown;
        }
        self.single(kind)
    }

    fn scan_question(&mut self) -> SyntaxKind {
        let next = self.byte(self.pos + 1);
        if next == b'.' || next == b'?' {
            self.pos += 2;
            if self.byte(self.pos) == b'=' {
                self.pos += 1;
            }
            return SyntaxKind::Unknown;
        }
        self.single(SyntaxKind::QuestionToken)
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.byte(self.pos + 1) == b'=' {
            self.pos += if self.byte(self.pos + 2) == b'=' { 3 } else { 2 };
            return SyntaxKind::Unknown;
        }
        self.single(SyntaxKind::ExclamationToken)
    }

    /// `<` and `>` never combine with themselves: `W<X<Y>>` must close as
    /// two `>` tokens (shift operators in skipped expressions just become
    /// two opaque-ish angle tokens, which the parser steps over anyway).
    fn scan_angle(&mut self, kind: SyntaxKind) -> SyntaxKind {
        if self.byte(self.pos + 1) == b'=' {
            self.pos += 2;
            return SyntaxKind::Unknown;
        }
        self.single(kind)
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.byte(self.pos + 1) == b'.' && self.byte(self.pos + 2) == b'.' {
            self.pos += 3;
            return SyntaxKind::DotDotDotToken;
        }
        self.single(SyntaxKind::DotToken)
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        self.pos += 1;
        let mut run_start = self.pos;
        while self.pos < self.source.len() {
            let b = self.byte(self.pos);
            if b == b'\\' {
                self.token_value.push_str(&self.source[run_start..self.pos]);
                // Keep the escaped character verbatim; enough for
                // property-name keys, which never use \n-style escapes.
                if let Some(escaped) = self.source[self.pos + 1..].chars().next() {
                    self.token_value.push(escaped);
                    self.pos += 1 + escaped.len_utf8();
                } else {
                    self.pos = self.source.len();
                }
                run_start = self.pos;
                continue;
            }
            if b == quote || b == b'\n' {
                // A line break means the string is unterminated; stop there.
                break;
            }
            self.pos += 1;
        }
        self.token_value
            .push_str(&self.source[run_start..self.pos.min(self.source.len())]);
        if self.byte(self.pos) == quote {
            self.pos += 1;
        }
        SyntaxKind::StringLiteral
    }

    /// Templates scan as one opaque token. `${ ... }` interpolations are
    /// tracked by brace depth so an inner `}` does not end the template.
    fn scan_template(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut depth = 0usize;
        while self.pos < self.source.len() {
            match self.byte(self.pos) {
                // A trailing backslash must not push pos past the end.
                b'\\' => self.pos = (self.pos + 2).min(self.source.len()),
                b'$' if self.byte(self.pos + 1) == b'{' => {
                    depth += 1;
                    self.pos += 2;
                }
                b'}' if depth > 0 => {
                    depth -= 1;
                    self.pos += 1;
                }
                b'`' if depth == 0 => {
                    self.pos += 1;
                    return SyntaxKind::Unknown;
                }
                _ => self.pos += 1,
            }
        }
        SyntaxKind::Unknown
    }

    fn scan_number(&mut self) -> SyntaxKind {
        while matches!(self.byte(self.pos), b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'.') {
            self.pos += 1;
        }
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.source.len() && is_identifier_part(self.byte(self.pos)) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        self.token_value.push_str(text);
        text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }
}

/// Non-ASCII bytes count as identifier characters; UTF-8 continuation bytes
/// then stay inside one token and slicing never splits a code point.
fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_identifier_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}
