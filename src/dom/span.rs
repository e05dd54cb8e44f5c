//! Buffer spans
//!
//! All names and values in the tree are stored as (start, end) index pairs
//! into the document's backing buffer. Handles stay valid across buffer
//! growth, which raw slices would not.

/// Half-open byte range into a document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

impl Span {
    /// The empty span, used for absent names and values.
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// True if the span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub(crate) fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_span() {
        assert!(Span::EMPTY.is_empty());
        assert_eq!(Span::EMPTY.len(), 0);
    }

    #[test]
    fn test_span_range() {
        let span = Span::new(3, 8);
        assert_eq!(span.len(), 5);
        assert_eq!(span.range(), 3..8);
    }
}
