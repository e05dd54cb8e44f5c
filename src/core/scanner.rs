//! Low-level buffer scanning
//!
//! Uses the memchr crate for delimiter search (SIMD where available).
//! Helpers take the buffer and a position rather than holding a cursor, so
//! the parser can interleave scanning with in-place buffer rewrites.

use memchr::{memchr, memmem};

/// Whitespace per the XML S production: space, tab, CR, LF.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if byte can start an XML name. ASCII letters, underscore, colon,
/// and non-ASCII bytes (UTF-8 continuation handled byte-wise).
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte can continue an XML name.
#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

/// Advance past whitespace, returning the new position.
#[inline]
pub fn skip_whitespace(buf: &[u8], mut pos: usize) -> usize {
    while pos < buf.len() && is_whitespace(buf[pos]) {
        pos += 1;
    }
    pos
}

/// Read an XML name starting at `pos`. Returns the end position, equal to
/// `pos` if no name starts there.
#[inline]
pub fn read_name(buf: &[u8], pos: usize) -> usize {
    if pos >= buf.len() || !is_name_start_char(buf[pos]) {
        return pos;
    }
    let mut end = pos + 1;
    while end < buf.len() && is_name_char(buf[end]) {
        end += 1;
    }
    end
}

/// Find the next occurrence of `byte` at or after `pos`.
#[inline]
pub fn find_byte(buf: &[u8], pos: usize, byte: u8) -> Option<usize> {
    memchr(byte, &buf[pos..]).map(|i| pos + i)
}

/// Find the next occurrence of `needle` at or after `pos`.
#[inline]
pub fn find_seq(buf: &[u8], pos: usize, needle: &[u8]) -> Option<usize> {
    memmem::find(&buf[pos..], needle).map(|i| pos + i)
}

/// Check if the buffer contains `needle` at `pos`.
#[inline]
pub fn starts_with(buf: &[u8], pos: usize, needle: &[u8]) -> bool {
    buf[pos..].starts_with(needle)
}
