//! Diagnostic and fix types produced by the analyzer.
//!
//! Hosts consume these as plain values; `serde_json` round-trips them for
//! editor and CI integrations.

use serde::Serialize;

use crate::span::Span;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
}

/// A single finding: a property the declared type promises but the
/// destructuring pattern never binds.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub file: String,
    /// Span of the declaring type member (the anchor), not of the pattern.
    pub span: Span,
    pub message_text: String,
    pub category: DiagnosticCategory,
    /// The missing property name.
    pub property: String,
}

impl Diagnostic {
    #[must_use]
    pub const fn warning(file: String, span: Span, message: String, property: String) -> Self {
        Self {
            file,
            span,
            message_text: message,
            category: DiagnosticCategory::Warning,
            property,
        }
    }
}

/// A textual insertion fix: insert `text` at byte offset `offset`.
///
/// All missing properties of one binding site share one `InsertFix` so that
/// accepting the fix repairs the whole pattern atomically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InsertFix {
    pub offset: u32,
    pub text: String,
}

impl InsertFix {
    /// Apply this insertion to `source`, returning the patched text.
    /// Everything outside the insertion point is preserved byte-for-byte.
    #[must_use]
    pub fn apply(&self, source: &str) -> String {
        let at = (self.offset as usize).min(source.len());
        let mut out = String::with_capacity(source.len() + self.text.len());
        out.push_str(&source[..at]);
        out.push_str(&self.text);
        out.push_str(&source[at..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_fix_apply() {
        let fix = InsertFix {
            offset: 3,
            text: ", b".to_string(),
        };
        assert_eq!(fix.apply("{ a }: T"), "{ a, b }: T");
    }

    #[test]
    fn test_insert_fix_apply_clamps() {
        let fix = InsertFix {
            offset: 99,
            text: "x".to_string(),
        };
        assert_eq!(fix.apply("ab"), "abx");
    }

    #[test]
    fn test_diagnostic_serializes() {
        let diag = Diagnostic::warning(
            "a.ts".to_string(),
            Span::new(10, 14),
            "Property 'b' is never destructured".to_string(),
            "b".to_string(),
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["property"], "b");
        assert_eq!(json["span"]["start"], 10);
    }
}
