//! Byte-offset source spans.

use serde::Serialize;

/// A half-open byte range `[start, end)` into the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice the source text this span points into.
    ///
    /// Returns an empty string when the span is out of bounds rather than
    /// panicking; spans produced by the scanner are always in bounds.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover() {
        let a = Span::new(4, 10);
        let b = Span::new(8, 16);
        assert_eq!(a.cover(b), Span::new(4, 16));
        assert_eq!(b.cover(a), Span::new(4, 16));
    }

    #[test]
    fn test_text_out_of_bounds() {
        let s = Span::new(2, 99);
        assert_eq!(s.text("abc"), "");
    }
}
