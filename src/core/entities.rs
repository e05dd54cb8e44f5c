//! Entity decoding and text escaping
//!
//! Decoding rewrites the affected span in place: the expansion of a
//! reference is never longer than its source form, so trailing bytes are
//! shifted left and the span only shrinks. Bytes between the new end and
//! the old end become garbage that no span references.
//!
//! Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! Character references: &#NNN; and &#xHH;

use memchr::memchr;

use crate::core::scanner::{is_name_char, is_whitespace};
use crate::error::ParseError;

/// In-place decode controls. Whitespace normalization applies to data
/// nodes only, never to attribute values.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOpts {
    pub translate_entities: bool,
    pub normalize_whitespace: bool,
}

/// Decode `buf[start..end]` in place, returning the new end offset.
///
/// Entity references are replaced by their expansion; with
/// `normalize_whitespace`, every whitespace run becomes a single space.
/// The returned end is always <= `end`.
pub fn decode_in_place(
    buf: &mut [u8],
    start: usize,
    end: usize,
    opts: DecodeOpts,
) -> Result<usize, ParseError> {
    // Fast path: nothing to rewrite.
    if !opts.normalize_whitespace
        && (!opts.translate_entities || memchr(b'&', &buf[start..end]).is_none())
    {
        return Ok(end);
    }

    let mut src = start;
    let mut dst = start;
    while src < end {
        let b = buf[src];

        if opts.translate_entities && b == b'&' {
            if let Some(exp) = expand_reference(buf, src, end)? {
                buf[dst..dst + exp.len].copy_from_slice(&exp.bytes[..exp.len]);
                dst += exp.len;
                src += exp.consumed;
                continue;
            }
            // Bare '&' with no reference following: copied verbatim.
        }

        if opts.normalize_whitespace && is_whitespace(b) {
            buf[dst] = b' ';
            dst += 1;
            src += 1;
            while src < end && is_whitespace(buf[src]) {
                src += 1;
            }
            continue;
        }

        buf[dst] = b;
        dst += 1;
        src += 1;
    }

    Ok(dst)
}

/// Trim trailing whitespace from `buf[start..end]`, returning the new end.
pub fn trim_trailing_whitespace(buf: &[u8], start: usize, mut end: usize) -> usize {
    while end > start && is_whitespace(buf[end - 1]) {
        end -= 1;
    }
    end
}

struct Expansion {
    bytes: [u8; 4],
    len: usize,
    consumed: usize,
}

impl Expansion {
    fn single(byte: u8, consumed: usize) -> Self {
        Expansion {
            bytes: [byte, 0, 0, 0],
            len: 1,
            consumed,
        }
    }
}

/// Expand the reference starting at `buf[at]` (which holds '&').
///
/// Returns None when the ampersand does not introduce a reference at all;
/// the caller then copies it verbatim. A well-formed `&name;` with an
/// unknown name and a malformed `&#...` are fatal.
fn expand_reference(buf: &[u8], at: usize, end: usize) -> Result<Option<Expansion>, ParseError> {
    let body_start = at + 1;
    if body_start >= end {
        return Ok(None);
    }

    if buf[body_start] == b'#' {
        return decode_char_ref(buf, at, end).map(Some);
    }

    // Named reference: require name chars up to ';' within the span.
    let mut i = body_start;
    while i < end && is_name_char(buf[i]) {
        i += 1;
    }
    if i == body_start || i >= end || buf[i] != b';' {
        return Ok(None);
    }
    let consumed = i + 1 - at;
    let byte = match &buf[body_start..i] {
        b"lt" => b'<',
        b"gt" => b'>',
        b"amp" => b'&',
        b"quot" => b'"',
        b"apos" => b'\'',
        _ => return Err(ParseError::UnknownEntityReference { offset: at }),
    };
    Ok(Some(Expansion::single(byte, consumed)))
}

/// Decode `&#NNN;` or `&#xHH;` starting at `buf[at]`.
fn decode_char_ref(buf: &[u8], at: usize, end: usize) -> Result<Expansion, ParseError> {
    let invalid = ParseError::InvalidCharacterReference { offset: at };

    let mut i = at + 2; // Skip "&#"
    let hex = i < end && matches!(buf[i], b'x' | b'X');
    if hex {
        i += 1;
    }

    let digits_start = i;
    let mut code: u32 = 0;
    while i < end {
        let d = match (buf[i], hex) {
            (b @ b'0'..=b'9', _) => (b - b'0') as u32,
            (b @ b'a'..=b'f', true) => (b - b'a' + 10) as u32,
            (b @ b'A'..=b'F', true) => (b - b'A' + 10) as u32,
            _ => break,
        };
        code = code
            .checked_mul(if hex { 16 } else { 10 })
            .and_then(|c| c.checked_add(d))
            .ok_or(invalid)?;
        i += 1;
    }
    if i == digits_start || i >= end || buf[i] != b';' {
        return Err(invalid);
    }

    let ch = char::from_u32(code).ok_or(invalid)?;
    let mut bytes = [0u8; 4];
    let len = ch.encode_utf8(&mut bytes).len();
    Ok(Expansion {
        bytes,
        len,
        consumed: i + 1 - at,
    })
}

/// Escaping context for [`encode_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Text content: escape `& < >`.
    Text,
    /// Attribute value inside double quotes: additionally escape `"`.
    DoubleQuoted,
    /// Attribute value inside single quotes: additionally escape `'`.
    SingleQuoted,
}

/// Append `text` to `out`, escaping special characters for XML output.
pub fn encode_into(out: &mut String, text: &str, mode: Escape) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if mode == Escape::DoubleQuoted => out.push_str("&quot;"),
            '\'' if mode == Escape::SingleQuoted => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}
