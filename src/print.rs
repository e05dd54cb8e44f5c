//! XML serialization
//!
//! Walks a subtree and writes markup, re-escaping text and attribute
//! values that were decoded during parsing. With indentation on (the
//! default) nested children go one tab deeper per level and every node
//! ends with a newline; an element whose only child is a data node is
//! printed inline.

use bitflags::bitflags;

use crate::core::entities::{encode_into, Escape};
use crate::dom::document::Document;
use crate::dom::node::{NodeId, NodeKind};

bitflags! {
    /// Options accepted by [`print`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PrintFlags: u32 {
        /// Emit no indentation and no line breaks.
        const NO_INDENTING = 0x01;
        /// Skip declaration nodes.
        const NO_DECLARATION = 0x02;
        /// Skip comment nodes.
        const NO_COMMENTS = 0x04;
        /// Skip doctype nodes.
        const NO_DOCTYPE = 0x08;
    }
}

impl Default for PrintFlags {
    fn default() -> Self {
        PrintFlags::empty()
    }
}

/// Serialize the subtree rooted at `id` to a new string.
pub fn print(doc: &Document, id: NodeId, flags: PrintFlags) -> String {
    let mut out = String::new();
    print_to(&mut out, doc, id, flags);
    out
}

/// Serialize the subtree rooted at `id`, appending to `out`.
pub fn print_to(out: &mut String, doc: &Document, id: NodeId, flags: PrintFlags) {
    let printer = Printer { doc, flags };
    if doc.node(id).kind == NodeKind::Document {
        for child in doc.children(id) {
            printer.node(out, child, 0);
        }
    } else {
        printer.node(out, id, 0);
    }
}

impl Document {
    /// Serialize the whole document to a string.
    pub fn to_xml(&self, flags: PrintFlags) -> String {
        print(self, self.root(), flags)
    }
}

struct Printer<'d> {
    doc: &'d Document,
    flags: PrintFlags,
}

impl Printer<'_> {
    fn indenting(&self) -> bool {
        !self.flags.contains(PrintFlags::NO_INDENTING)
    }

    fn indent(&self, out: &mut String, depth: usize) {
        if self.indenting() {
            for _ in 0..depth {
                out.push('\t');
            }
        }
    }

    fn skipped(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Declaration => self.flags.contains(PrintFlags::NO_DECLARATION),
            NodeKind::Comment => self.flags.contains(PrintFlags::NO_COMMENTS),
            NodeKind::Doctype => self.flags.contains(PrintFlags::NO_DOCTYPE),
            _ => false,
        }
    }

    fn node(&self, out: &mut String, id: NodeId, depth: usize) {
        let kind = self.doc.node(id).kind;
        if self.skipped(kind) {
            return;
        }
        self.indent(out, depth);
        match kind {
            NodeKind::Document => unreachable!("document node has no markup"),
            NodeKind::Element => self.element(out, id, depth),
            NodeKind::Data => encode_into(out, self.doc.value(id), Escape::Text),
            NodeKind::CData => {
                out.push_str("<![CDATA[");
                out.push_str(self.doc.value(id));
                out.push_str("]]>");
            }
            NodeKind::Comment => {
                out.push_str("<!--");
                out.push_str(self.doc.value(id));
                out.push_str("-->");
            }
            NodeKind::Declaration => {
                out.push_str("<?xml");
                self.attributes(out, id);
                out.push_str("?>");
            }
            NodeKind::Doctype => {
                out.push_str("<!DOCTYPE ");
                out.push_str(self.doc.value(id));
                out.push('>');
            }
            NodeKind::Pi => {
                out.push_str("<?");
                out.push_str(self.doc.name(id));
                let value = self.doc.value(id);
                if !value.is_empty() {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
        if self.indenting() {
            out.push('\n');
        }
    }

    fn element(&self, out: &mut String, id: NodeId, depth: usize) {
        let name = self.doc.name(id);
        out.push('<');
        out.push_str(name);
        self.attributes(out, id);

        match self.doc.first_child(id) {
            None => {
                let value = self.doc.value(id);
                if value.is_empty() {
                    out.push_str("/>");
                } else {
                    // Childless element carrying a value (NO_DATA_NODES
                    // parses, or a value set by hand).
                    out.push('>');
                    encode_into(out, value, Escape::Text);
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
            Some(first) => {
                out.push('>');
                let sole_data = self.doc.node(first).is_data()
                    && self.doc.next_sibling(first).is_none();
                if sole_data {
                    encode_into(out, self.doc.value(first), Escape::Text);
                } else {
                    if self.indenting() {
                        out.push('\n');
                    }
                    for child in self.doc.children(id) {
                        self.node(out, child, depth + 1);
                    }
                    self.indent(out, depth);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }

    fn attributes(&self, out: &mut String, id: NodeId) {
        for attr in self.doc.attributes(id) {
            out.push(' ');
            out.push_str(self.doc.attr_name(attr));
            out.push('=');
            let value = self.doc.attr_value(attr);
            // Quote with " unless the value contains one.
            if value.contains('"') {
                out.push('\'');
                encode_into(out, value, Escape::SingleQuoted);
                out.push('\'');
            } else {
                out.push('"');
                encode_into(out, value, Escape::DoubleQuoted);
                out.push('"');
            }
        }
    }
}
