//! Recursive-descent XML parser
//!
//! Single pass over the document's own buffer with a byte cursor and
//! bounded fixed-prefix lookahead (to distinguish `<!--`, `<![CDATA[`,
//! `<!DOCTYPE`, `<?`). Names and values are recorded as spans; entity
//! decoding and whitespace normalization rewrite the affected span in
//! place before it is recorded.
//!
//! Any error aborts the whole parse. The partially built arena is
//! discarded by the caller along with the document.

use crate::core::entities::{self, DecodeOpts};
use crate::core::scanner::{
    find_byte, find_seq, is_name_start_char, is_whitespace, read_name, skip_whitespace,
    starts_with,
};
use crate::dom::document::{Document, DOCUMENT_NODE};
use crate::dom::node::{Attribute, Node, NodeId, NodeKind};
use crate::dom::span::Span;
use crate::error::ParseError;
use crate::flags::ParseFlags;

/// Spans store u32 offsets, so inputs past that range cannot be
/// addressed and are rejected before scanning starts.
fn check_input_len(len: usize) -> Result<(), ParseError> {
    if len > u32::MAX as usize {
        return Err(ParseError::OutOfMemory { offset: 0 });
    }
    Ok(())
}

pub(crate) struct Parser<'d> {
    doc: &'d mut Document,
    pos: usize,
    flags: ParseFlags,
}

impl<'d> Parser<'d> {
    /// Parse the document's buffer into its arena. On error the document
    /// must be discarded; no partial tree is exposed.
    pub(crate) fn run(doc: &'d mut Document, flags: ParseFlags) -> Result<(), ParseError> {
        check_input_len(doc.buf.len())?;
        let mut parser = Parser { doc, pos: 0, flags };
        parser.parse_document()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.doc.buf.get(self.pos).copied()
    }

    #[inline]
    fn eof(&self) -> usize {
        self.doc.buf.len()
    }

    fn parse_document(&mut self) -> Result<(), ParseError> {
        if starts_with(&self.doc.buf, 0, b"\xEF\xBB\xBF") {
            self.pos = 3; // UTF-8 BOM
        }
        loop {
            self.pos = skip_whitespace(&self.doc.buf, self.pos);
            if self.pos >= self.eof() {
                return Ok(());
            }
            if self.doc.buf[self.pos] != b'<' {
                return Err(ParseError::ExpectedTagName { offset: self.pos });
            }
            self.pos += 1;
            if let Some(node) = self.parse_node()? {
                self.doc.append_child(DOCUMENT_NODE, node);
            }
        }
    }

    /// Parse one construct; the cursor sits just past its `<`.
    fn parse_node(&mut self) -> Result<Option<NodeId>, ParseError> {
        let lt = self.pos - 1;
        let buf = &self.doc.buf;
        match self.peek() {
            None => Err(ParseError::UnexpectedEndOfInput { offset: self.eof() }),
            Some(b'?') => {
                self.pos += 1;
                let b = &self.doc.buf;
                let decl = b.len() >= self.pos + 4
                    && b[self.pos].eq_ignore_ascii_case(&b'x')
                    && b[self.pos + 1].eq_ignore_ascii_case(&b'm')
                    && b[self.pos + 2].eq_ignore_ascii_case(&b'l')
                    && is_whitespace(b[self.pos + 3]);
                if decl {
                    self.pos += 4;
                    self.parse_declaration(lt)
                } else {
                    self.parse_pi(lt)
                }
            }
            Some(b'!') => {
                if starts_with(buf, self.pos, b"!--") {
                    self.pos += 3;
                    self.parse_comment(lt)
                } else if starts_with(buf, self.pos, b"![CDATA[") {
                    self.pos += 8;
                    self.parse_cdata(lt)
                } else if starts_with(buf, self.pos, b"!DOCTYPE")
                    && buf.get(self.pos + 8).copied().is_some_and(is_whitespace)
                {
                    self.pos += 9;
                    self.parse_doctype(lt)
                } else {
                    // Unrecognized <!...> construct: consume up to '>'.
                    match find_byte(buf, self.pos, b'>') {
                        Some(gt) => {
                            self.pos = gt + 1;
                            Ok(None)
                        }
                        None => Err(ParseError::UnexpectedEndOfInput { offset: self.eof() }),
                    }
                }
            }
            // A closing tag here means there is no element to close.
            Some(b'/') => Err(ParseError::ExpectedTagName { offset: self.pos }),
            Some(_) => self.parse_element().map(Some),
        }
    }

    fn parse_declaration(&mut self, lt: usize) -> Result<Option<NodeId>, ParseError> {
        if !self.flags.contains(ParseFlags::DECLARATION_NODE) {
            return match find_seq(&self.doc.buf, self.pos, b"?>") {
                Some(end) => {
                    self.pos = end + 2;
                    Ok(None)
                }
                None => Err(ParseError::UnterminatedDeclaration { offset: lt }),
            };
        }

        let node = self
            .doc
            .try_push_node(Node::new(NodeKind::Declaration), self.pos)?;
        self.pos = skip_whitespace(&self.doc.buf, self.pos);
        self.parse_attributes(node)?;
        if starts_with(&self.doc.buf, self.pos, b"?>") {
            self.pos += 2;
            Ok(Some(node))
        } else {
            Err(ParseError::UnterminatedDeclaration { offset: lt })
        }
    }

    fn parse_pi(&mut self, lt: usize) -> Result<Option<NodeId>, ParseError> {
        let name_start = self.pos;
        let name_end = read_name(&self.doc.buf, self.pos);
        if name_end == name_start {
            return Err(ParseError::ExpectedTagName { offset: self.pos });
        }
        self.pos = name_end;

        if !self.flags.contains(ParseFlags::PI_NODES) {
            return match find_seq(&self.doc.buf, self.pos, b"?>") {
                Some(end) => {
                    self.pos = end + 2;
                    Ok(None)
                }
                None => Err(ParseError::UnterminatedPi { offset: lt }),
            };
        }

        let value_start = skip_whitespace(&self.doc.buf, self.pos);
        match find_seq(&self.doc.buf, value_start, b"?>") {
            Some(end) => {
                let mut node = Node::new(NodeKind::Pi);
                node.name = Span::new(name_start, name_end);
                node.value = Span::new(value_start, end);
                let id = self.doc.try_push_node(node, self.pos)?;
                self.pos = end + 2;
                Ok(Some(id))
            }
            None => Err(ParseError::UnterminatedPi { offset: lt }),
        }
    }

    fn parse_comment(&mut self, lt: usize) -> Result<Option<NodeId>, ParseError> {
        let value_start = self.pos;
        let end = find_seq(&self.doc.buf, self.pos, b"-->")
            .ok_or(ParseError::UnterminatedComment { offset: lt })?;
        self.pos = end + 3;
        if !self.flags.contains(ParseFlags::COMMENT_NODES) {
            return Ok(None);
        }
        let mut node = Node::new(NodeKind::Comment);
        node.value = Span::new(value_start, end);
        let id = self.doc.try_push_node(node, self.pos)?;
        Ok(Some(id))
    }

    fn parse_cdata(&mut self, lt: usize) -> Result<Option<NodeId>, ParseError> {
        let value_start = self.pos;
        let end = find_seq(&self.doc.buf, self.pos, b"]]>")
            .ok_or(ParseError::UnterminatedCData { offset: lt })?;
        self.pos = end + 3;
        if !self.flags.contains(ParseFlags::CDATA_NODES)
            || self.flags.contains(ParseFlags::NO_DATA_NODES)
        {
            return Ok(None);
        }
        let mut node = Node::new(NodeKind::CData);
        node.value = Span::new(value_start, end);
        let id = self.doc.try_push_node(node, self.pos)?;
        Ok(Some(id))
    }

    fn parse_doctype(&mut self, lt: usize) -> Result<Option<NodeId>, ParseError> {
        let value_start = self.pos;
        let mut i = self.pos;
        let buf = &self.doc.buf;
        loop {
            match buf.get(i).copied() {
                None => return Err(ParseError::UnterminatedDoctype { offset: lt }),
                Some(b'>') => break,
                // Bracketed internal subset: scan to the matching ']'.
                Some(b'[') => {
                    i += 1;
                    let mut depth = 1usize;
                    while depth > 0 {
                        match buf.get(i).copied() {
                            None => {
                                return Err(ParseError::UnterminatedDoctype { offset: lt });
                            }
                            Some(b'[') => depth += 1,
                            Some(b']') => depth -= 1,
                            Some(_) => {}
                        }
                        i += 1;
                    }
                }
                Some(_) => i += 1,
            }
        }
        self.pos = i + 1;
        if !self.flags.contains(ParseFlags::DOCTYPE_NODE) {
            return Ok(None);
        }
        let mut node = Node::new(NodeKind::Doctype);
        node.value = Span::new(value_start, i);
        let id = self.doc.try_push_node(node, self.pos)?;
        Ok(Some(id))
    }

    fn parse_element(&mut self) -> Result<NodeId, ParseError> {
        let name_start = self.pos;
        let name_end = read_name(&self.doc.buf, self.pos);
        if name_end == name_start {
            return Err(ParseError::ExpectedTagName { offset: self.pos });
        }
        self.pos = name_end;
        let name = Span::new(name_start, name_end);

        let mut node = Node::new(NodeKind::Element);
        node.name = name;
        let element = self.doc.try_push_node(node, self.pos)?;

        self.pos = skip_whitespace(&self.doc.buf, self.pos);
        self.parse_attributes(element)?;

        match self.peek() {
            Some(b'>') => {
                self.pos += 1;
                self.parse_contents(element, name)?;
            }
            Some(b'/') if self.doc.buf.get(self.pos + 1) == Some(&b'>') => {
                // Self-closing: no children, control returns to the parent.
                self.pos += 2;
            }
            Some(_) => return Err(ParseError::UnterminatedTag { offset: self.pos }),
            None => return Err(ParseError::UnexpectedEndOfInput { offset: self.eof() }),
        }
        Ok(element)
    }

    /// Parse attributes onto `node` (an element or declaration). Stops at
    /// the first byte that cannot start a name; the caller checks the tag
    /// terminator.
    fn parse_attributes(&mut self, node: NodeId) -> Result<(), ParseError> {
        loop {
            let Some(b) = self.peek() else { return Ok(()) };
            if !is_name_start_char(b) {
                return Ok(());
            }

            let name_start = self.pos;
            let name_end = read_name(&self.doc.buf, self.pos);
            self.pos = skip_whitespace(&self.doc.buf, name_end);

            if self.peek() != Some(b'=') {
                return Err(ParseError::UnterminatedTag { offset: self.pos });
            }
            self.pos = skip_whitespace(&self.doc.buf, self.pos + 1);

            let quote_pos = self.pos;
            let quote = match self.peek() {
                Some(q @ (b'"' | b'\'')) => q,
                Some(_) => return Err(ParseError::UnterminatedTag { offset: self.pos }),
                None => return Err(ParseError::UnexpectedEndOfInput { offset: self.eof() }),
            };
            self.pos += 1;

            let value_start = self.pos;
            let value_end = find_byte(&self.doc.buf, value_start, quote)
                .ok_or(ParseError::UnterminatedAttributeValue { offset: quote_pos })?;

            // Attribute values get entity decoding but never whitespace
            // normalization.
            let opts = DecodeOpts {
                translate_entities: !self.flags.contains(ParseFlags::NO_ENTITY_TRANSLATION),
                normalize_whitespace: false,
            };
            let decoded_end =
                entities::decode_in_place(&mut self.doc.buf, value_start, value_end, opts)?;

            let attr = self.doc.try_push_attr(
                Attribute::new(
                    Span::new(name_start, name_end),
                    Span::new(value_start, decoded_end),
                ),
                self.pos,
            )?;
            self.doc.append_attribute(node, attr);

            self.pos = skip_whitespace(&self.doc.buf, value_end + 1);
        }
    }

    /// Parse children and text of an open element until its closing tag.
    fn parse_contents(&mut self, element: NodeId, name: Span) -> Result<(), ParseError> {
        loop {
            let contents_start = self.pos;
            let after_ws = skip_whitespace(&self.doc.buf, self.pos);

            match self.doc.buf.get(after_ws).copied() {
                None => return Err(ParseError::UnexpectedEndOfInput { offset: self.eof() }),
                Some(b'<') if self.doc.buf.get(after_ws + 1) == Some(&b'/') => {
                    return self.parse_closing_tag(after_ws, name);
                }
                Some(b'<') => {
                    self.pos = after_ws + 1;
                    if let Some(child) = self.parse_node()? {
                        self.doc.append_child(element, child);
                    }
                }
                Some(_) => self.parse_data(element, contents_start, after_ws)?,
            }
        }
    }

    fn parse_closing_tag(&mut self, lt: usize, name: Span) -> Result<(), ParseError> {
        self.pos = lt + 2;
        let cname_start = self.pos;
        let cname_end = read_name(&self.doc.buf, self.pos);
        if self.flags.contains(ParseFlags::VALIDATE_CLOSING_TAGS) {
            let b = &self.doc.buf;
            if b[name.range()] != b[cname_start..cname_end] {
                return Err(ParseError::MismatchedClosingTag { offset: lt });
            }
        }
        // Without validation the closing name is irrelevant: any closing
        // tag closes the innermost open element.
        self.pos = skip_whitespace(&self.doc.buf, cname_end);
        match self.peek() {
            Some(b'>') => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::UnterminatedTag { offset: self.pos }),
            None => Err(ParseError::UnexpectedEndOfInput { offset: self.eof() }),
        }
    }

    /// Parse a text run up to the next `<`, decode it in place, and attach
    /// it as a data node and/or the parent element's value.
    fn parse_data(
        &mut self,
        element: NodeId,
        contents_start: usize,
        after_ws: usize,
    ) -> Result<(), ParseError> {
        let trim = self.flags.contains(ParseFlags::TRIM_WHITESPACE);
        let start = if trim { after_ws } else { contents_start };

        let lt = find_byte(&self.doc.buf, after_ws, b'<')
            .ok_or(ParseError::UnexpectedEndOfInput { offset: self.eof() })?;

        let opts = DecodeOpts {
            translate_entities: !self.flags.contains(ParseFlags::NO_ENTITY_TRANSLATION),
            normalize_whitespace: self.flags.contains(ParseFlags::NORMALIZE_WHITESPACE),
        };
        let mut end = entities::decode_in_place(&mut self.doc.buf, start, lt, opts)?;
        if trim {
            end = entities::trim_trailing_whitespace(&self.doc.buf, start, end);
        }

        let span = Span::new(start, end);
        if !span.is_empty() {
            if !self.flags.contains(ParseFlags::NO_DATA_NODES) {
                let mut node = Node::new(NodeKind::Data);
                node.value = span;
                let id = self.doc.try_push_node(node, start)?;
                self.doc.append_child(element, id);
            }
            // First data run also becomes the element's value.
            if !self.flags.contains(ParseFlags::NO_ELEMENT_VALUES)
                && self.doc.nodes[element as usize].value.is_empty()
            {
                self.doc.nodes[element as usize].value = span;
            }
        }

        self.pos = lt;
        Ok(())
    }
}
