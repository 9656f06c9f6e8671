//! Token kinds produced by the scanner.

/// Token types for the TypeScript subset the analyzer understands.
///
/// Anything outside the subset scans as `Unknown`; the parser treats such
/// tokens as opaque and skips them with balanced-delimiter recovery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[default]
    Unknown = 0,
    EndOfFileToken,
    Identifier,
    StringLiteral,
    NumericLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    LessThanToken,
    GreaterThanToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    QuestionToken,
    EqualsToken,
    EqualsGreaterThanToken,
    AmpersandToken,
    BarToken,
    DotToken,
    DotDotDotToken,
    ExclamationToken,

    // Keywords
    ConstKeyword,
    LetKeyword,
    VarKeyword,
    FunctionKeyword,
    TypeKeyword,
    InterfaceKeyword,
    ExportKeyword,
    ImportKeyword,
    ReturnKeyword,
    AsKeyword,
    SatisfiesKeyword,
    ExtendsKeyword,
}

/// Map identifier text to its keyword kind, if it is one.
#[must_use]
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "const" => SyntaxKind::ConstKeyword,
        "let" => SyntaxKind::LetKeyword,
        "var" => SyntaxKind::VarKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "export" => SyntaxKind::ExportKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "as" => SyntaxKind::AsKeyword,
        "satisfies" => SyntaxKind::SatisfiesKeyword,
        "extends" => SyntaxKind::ExtendsKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Whether the token can appear where an identifier is expected.
///
/// Contextual keywords (`type`, `as`, `satisfies`) double as plain
/// identifiers in member and binding positions.
#[must_use]
pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::TypeKeyword
            | SyntaxKind::AsKeyword
            | SyntaxKind::SatisfiesKeyword
            | SyntaxKind::ExtendsKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_keyword() {
        assert_eq!(text_to_keyword("const"), Some(SyntaxKind::ConstKeyword));
        assert_eq!(text_to_keyword("type"), Some(SyntaxKind::TypeKeyword));
        assert_eq!(
            text_to_keyword("satisfies"),
            Some(SyntaxKind::SatisfiesKeyword)
        );
        assert_eq!(text_to_keyword("foo"), None);
        assert_eq!(text_to_keyword("CONST"), None); // case sensitive
    }

    #[test]
    fn test_token_is_identifier_or_keyword() {
        assert!(token_is_identifier_or_keyword(SyntaxKind::Identifier));
        assert!(token_is_identifier_or_keyword(SyntaxKind::TypeKeyword));
        assert!(!token_is_identifier_or_keyword(SyntaxKind::ConstKeyword));
        assert!(!token_is_identifier_or_keyword(SyntaxKind::OpenBraceToken));
    }
}
