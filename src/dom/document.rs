//! XML Document - arena-based DOM
//!
//! The document owns one backing buffer plus two growable arenas (nodes
//! and attributes) addressed by u32 handles. Parsing allocates from the
//! arenas; nothing is freed individually. `reset()` or dropping the
//! document releases everything at once.
//!
//! Handles are only meaningful for the document that issued them. Content
//! moves between documents via `import_node`, which copies the referenced
//! text into the target buffer.

use crate::core::parser::Parser;
use crate::error::ParseError;
use crate::flags::ParseFlags;

use super::node::{AttrId, Attribute, Node, NodeId, NodeKind};
use super::span::Span;

/// Handle of the document node, present in every document.
pub const DOCUMENT_NODE: NodeId = 0;

/// An XML document: backing buffer, node arena, attribute arena.
#[derive(Debug)]
pub struct Document {
    /// Backing buffer. Starts as the parse input; strings allocated after
    /// parsing are appended. Always valid UTF-8.
    pub(crate) buf: Vec<u8>,
    /// Arena of nodes. Index 0 is the document node.
    pub(crate) nodes: Vec<Node>,
    /// Arena of attributes.
    pub(crate) attrs: Vec<Attribute>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the document node.
    pub fn new() -> Self {
        Self::with_buffer(Vec::new())
    }

    fn with_buffer(buf: Vec<u8>) -> Self {
        Document {
            buf,
            nodes: vec![Node::new(NodeKind::Document)],
            attrs: Vec::new(),
        }
    }

    /// Parse XML text into a new document, copying the input into the
    /// document's own buffer.
    pub fn parse(text: &str, flags: ParseFlags) -> Result<Document, ParseError> {
        Self::parse_owned(text.to_owned(), flags)
    }

    /// Parse XML text, taking ownership of the input. The string becomes
    /// the document's backing buffer without a copy; entity decoding and
    /// whitespace normalization rewrite it in place.
    pub fn parse_owned(text: String, flags: ParseFlags) -> Result<Document, ParseError> {
        let mut doc = Self::with_buffer(text.into_bytes());
        Parser::run(&mut doc, flags)?;
        Ok(doc)
    }

    /// Drop all nodes, attributes and text at once, leaving an empty
    /// document. Handles obtained before the reset must not be used again.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.attrs.clear();
        self.nodes.clear();
        self.nodes.push(Node::new(NodeKind::Document));
    }

    // ------------------------------------------------------------------
    // Access

    /// The document node.
    #[inline]
    pub fn root(&self) -> NodeId {
        DOCUMENT_NODE
    }

    /// The first element child of the document node, if any.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(DOCUMENT_NODE)
            .find(|&id| self.nodes[id as usize].is_element())
    }

    /// Get a node record. Panics if `id` is not a handle from this
    /// document.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Get an attribute record. Panics if `id` is not a handle from this
    /// document.
    #[inline]
    pub fn attribute(&self, id: AttrId) -> &Attribute {
        &self.attrs[id as usize]
    }

    /// Node name: tag name for elements, target for PIs, empty otherwise.
    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        self.str_at(self.nodes[id as usize].name)
    }

    /// Node value: text for data/CDATA/comments, first data child text
    /// for elements, empty otherwise.
    #[inline]
    pub fn value(&self, id: NodeId) -> &str {
        self.str_at(self.nodes[id as usize].value)
    }

    /// Attribute name.
    #[inline]
    pub fn attr_name(&self, id: AttrId) -> &str {
        self.str_at(self.attrs[id as usize].name)
    }

    /// Attribute value, entity-decoded.
    #[inline]
    pub fn attr_value(&self, id: AttrId) -> &str {
        self.str_at(self.attrs[id as usize].value)
    }

    /// Number of nodes in the arena, including unlinked ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolve a span against the backing buffer.
    pub(crate) fn str_at(&self, span: Span) -> &str {
        let bytes = &self.buf[span.range()];
        debug_assert!(std::str::from_utf8(bytes).is_ok());
        // The buffer is built from str input and every in-place rewrite
        // writes complete UTF-8 sequences, so spans stay on char
        // boundaries.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    // ------------------------------------------------------------------
    // Navigation

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize].parent
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize].first_child
    }

    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize].last_child
    }

    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize].next_sibling
    }

    #[inline]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize].prev_sibling
    }

    /// First child with the given name (linear scan, case-sensitive).
    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.name(c) == name)
    }

    /// Last child with the given name.
    pub fn last_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut found = None;
        let mut cur = self.nodes[id as usize].first_child;
        while let Some(c) = cur {
            if self.name(c) == name {
                found = Some(c);
            }
            cur = self.nodes[c as usize].next_sibling;
        }
        found
    }

    /// Next sibling with the given name.
    pub fn next_sibling_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut cur = self.nodes[id as usize].next_sibling;
        while let Some(c) = cur {
            if self.name(c) == name {
                return Some(c);
            }
            cur = self.nodes[c as usize].next_sibling;
        }
        None
    }

    /// Previous sibling with the given name.
    pub fn prev_sibling_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut cur = self.nodes[id as usize].prev_sibling;
        while let Some(c) = cur {
            if self.name(c) == name {
                return Some(c);
            }
            cur = self.nodes[c as usize].prev_sibling;
        }
        None
    }

    /// First child matching an optional name and carrying the designated
    /// attribute with the given value.
    pub fn child_by_attribute(
        &self,
        id: NodeId,
        name: Option<&str>,
        attr_name: &str,
        attr_value: &str,
    ) -> Option<NodeId> {
        self.children(id).find(|&c| {
            if let Some(n) = name {
                if self.name(c) != n {
                    return false;
                }
            }
            self.attribute_named(c, attr_name)
                .is_some_and(|a| self.attr_value(a) == attr_value)
        })
    }

    #[inline]
    pub fn first_attribute(&self, id: NodeId) -> Option<AttrId> {
        self.nodes[id as usize].first_attr
    }

    #[inline]
    pub fn last_attribute(&self, id: NodeId) -> Option<AttrId> {
        self.nodes[id as usize].last_attr
    }

    #[inline]
    pub fn next_attribute(&self, id: AttrId) -> Option<AttrId> {
        self.attrs[id as usize].next_attr
    }

    #[inline]
    pub fn prev_attribute(&self, id: AttrId) -> Option<AttrId> {
        self.attrs[id as usize].prev_attr
    }

    /// First attribute with the given name (linear scan, case-sensitive).
    pub fn attribute_named(&self, id: NodeId, name: &str) -> Option<AttrId> {
        self.attributes(id).find(|&a| self.attr_name(a) == name)
    }

    /// Iterate over children of a node in document order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.nodes[id as usize].first_child,
        }
    }

    /// Iterate over attributes of a node in document order.
    pub fn attributes(&self, id: NodeId) -> Attributes<'_> {
        Attributes {
            doc: self,
            next: self.nodes[id as usize].first_attr,
        }
    }

    /// Iterate over all descendants of a node, depth-first in document
    /// order, excluding the node itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        self.push_children_reversed(id, &mut stack);
        Descendants { doc: self, stack }
    }

    fn push_children_reversed(&self, id: NodeId, stack: &mut Vec<NodeId>) {
        let mut cur = self.nodes[id as usize].last_child;
        while let Some(c) = cur {
            stack.push(c);
            cur = self.nodes[c as usize].prev_sibling;
        }
    }

    // ------------------------------------------------------------------
    // Allocation

    /// Allocate an unlinked node of the given kind.
    ///
    /// Panics if the arena has no addressable handles left.
    pub fn allocate_node(&mut self, kind: NodeKind) -> NodeId {
        self.push_node(Node::new(kind))
    }

    /// Allocate an unlinked element node with the given name.
    pub fn allocate_element(&mut self, name: &str) -> NodeId {
        let span = self.alloc_str(name);
        let mut node = Node::new(NodeKind::Element);
        node.name = span;
        self.push_node(node)
    }

    /// Allocate an unlinked data node with the given text.
    pub fn allocate_data(&mut self, text: &str) -> NodeId {
        let span = self.alloc_str(text);
        let mut node = Node::new(NodeKind::Data);
        node.value = span;
        self.push_node(node)
    }

    /// Allocate an unlinked attribute.
    pub fn allocate_attribute(&mut self, name: &str, value: &str) -> AttrId {
        let name = self.alloc_str(name);
        let value = self.alloc_str(value);
        self.push_attr(Attribute::new(name, value))
    }

    /// Set a node's name, storing the text in the document buffer.
    pub fn set_name(&mut self, id: NodeId, name: &str) {
        let span = self.alloc_str(name);
        self.nodes[id as usize].name = span;
    }

    /// Set a node's value.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        let span = self.alloc_str(value);
        self.nodes[id as usize].value = span;
    }

    /// Set an attribute's name.
    pub fn set_attr_name(&mut self, id: AttrId, name: &str) {
        let span = self.alloc_str(name);
        self.attrs[id as usize].name = span;
    }

    /// Set an attribute's value.
    pub fn set_attr_value(&mut self, id: AttrId, value: &str) {
        let span = self.alloc_str(value);
        self.attrs[id as usize].value = span;
    }

    /// Append `s` to the backing buffer and return its span. Existing
    /// spans are unaffected; handles are indices, not references.
    pub(crate) fn alloc_str(&mut self, s: &str) -> Span {
        assert!(
            self.buf.len() + s.len() <= u32::MAX as usize,
            "document buffer exhausted"
        );
        let start = self.buf.len();
        self.buf.extend_from_slice(s.as_bytes());
        Span::new(start, self.buf.len())
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        assert!(self.nodes.len() < u32::MAX as usize, "node arena exhausted");
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    fn push_attr(&mut self, attr: Attribute) -> AttrId {
        assert!(
            self.attrs.len() < u32::MAX as usize,
            "attribute arena exhausted"
        );
        let id = self.attrs.len() as AttrId;
        self.attrs.push(attr);
        id
    }

    /// Fallible node allocation for the parser; arena exhaustion surfaces
    /// as an error carrying the current parse offset.
    pub(crate) fn try_push_node(&mut self, node: Node, offset: usize) -> Result<NodeId, ParseError> {
        if self.nodes.len() >= u32::MAX as usize {
            return Err(ParseError::OutOfMemory { offset });
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        Ok(id)
    }

    /// Fallible attribute allocation for the parser.
    pub(crate) fn try_push_attr(
        &mut self,
        attr: Attribute,
        offset: usize,
    ) -> Result<AttrId, ParseError> {
        if self.attrs.len() >= u32::MAX as usize {
            return Err(ParseError::OutOfMemory { offset });
        }
        let id = self.attrs.len() as AttrId;
        self.attrs.push(attr);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Mutation

    /// Append an unlinked node as the last child of `parent`.
    ///
    /// Panics if `child` is already linked or is the document node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.assert_unlinked(child);
        let last = self.nodes[parent as usize].last_child;
        self.nodes[child as usize].parent = Some(parent);
        self.nodes[child as usize].prev_sibling = last;
        match last {
            Some(prev) => self.nodes[prev as usize].next_sibling = Some(child),
            None => self.nodes[parent as usize].first_child = Some(child),
        }
        self.nodes[parent as usize].last_child = Some(child);
    }

    /// Prepend an unlinked node as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.assert_unlinked(child);
        let first = self.nodes[parent as usize].first_child;
        self.nodes[child as usize].parent = Some(parent);
        self.nodes[child as usize].next_sibling = first;
        match first {
            Some(next) => self.nodes[next as usize].prev_sibling = Some(child),
            None => self.nodes[parent as usize].last_child = Some(child),
        }
        self.nodes[parent as usize].first_child = Some(child);
    }

    /// Insert an unlinked node before the child `before` of `parent`.
    ///
    /// Panics if `before` is not a child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, before: NodeId, child: NodeId) {
        assert_eq!(
            self.nodes[before as usize].parent,
            Some(parent),
            "insertion point is not a child of the given parent"
        );
        match self.nodes[before as usize].prev_sibling {
            None => self.prepend_child(parent, child),
            Some(prev) => {
                self.assert_unlinked(child);
                self.nodes[child as usize].parent = Some(parent);
                self.nodes[child as usize].prev_sibling = Some(prev);
                self.nodes[child as usize].next_sibling = Some(before);
                self.nodes[prev as usize].next_sibling = Some(child);
                self.nodes[before as usize].prev_sibling = Some(child);
            }
        }
    }

    /// Unlink a node from its parent. The subtree stays intact and can be
    /// re-linked elsewhere; arena memory is only reclaimed by `reset`.
    pub fn remove_node(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let n = &self.nodes[id as usize];
            (n.parent, n.prev_sibling, n.next_sibling)
        };
        let Some(parent) = parent else { return };
        match prev {
            Some(p) => self.nodes[p as usize].next_sibling = next,
            None => self.nodes[parent as usize].first_child = next,
        }
        match next {
            Some(n) => self.nodes[n as usize].prev_sibling = prev,
            None => self.nodes[parent as usize].last_child = prev,
        }
        let n = &mut self.nodes[id as usize];
        n.parent = None;
        n.prev_sibling = None;
        n.next_sibling = None;
    }

    /// Append an unlinked attribute to an element.
    ///
    /// Panics if the attribute is already owned by an element.
    pub fn append_attribute(&mut self, element: NodeId, attr: AttrId) {
        self.assert_attr_unlinked(attr);
        let last = self.nodes[element as usize].last_attr;
        self.attrs[attr as usize].element = Some(element);
        self.attrs[attr as usize].prev_attr = last;
        match last {
            Some(prev) => self.attrs[prev as usize].next_attr = Some(attr),
            None => self.nodes[element as usize].first_attr = Some(attr),
        }
        self.nodes[element as usize].last_attr = Some(attr);
    }

    /// Prepend an unlinked attribute to an element.
    pub fn prepend_attribute(&mut self, element: NodeId, attr: AttrId) {
        self.assert_attr_unlinked(attr);
        let first = self.nodes[element as usize].first_attr;
        self.attrs[attr as usize].element = Some(element);
        self.attrs[attr as usize].next_attr = first;
        match first {
            Some(next) => self.attrs[next as usize].prev_attr = Some(attr),
            None => self.nodes[element as usize].last_attr = Some(attr),
        }
        self.nodes[element as usize].first_attr = Some(attr);
    }

    /// Insert an unlinked attribute before `before` on `element`.
    pub fn insert_attribute(&mut self, element: NodeId, before: AttrId, attr: AttrId) {
        assert_eq!(
            self.attrs[before as usize].element,
            Some(element),
            "insertion point is not an attribute of the given element"
        );
        match self.attrs[before as usize].prev_attr {
            None => self.prepend_attribute(element, attr),
            Some(prev) => {
                self.assert_attr_unlinked(attr);
                self.attrs[attr as usize].element = Some(element);
                self.attrs[attr as usize].prev_attr = Some(prev);
                self.attrs[attr as usize].next_attr = Some(before);
                self.attrs[prev as usize].next_attr = Some(attr);
                self.attrs[before as usize].prev_attr = Some(attr);
            }
        }
    }

    /// Unlink an attribute from its element.
    pub fn remove_attribute(&mut self, id: AttrId) {
        let (element, prev, next) = {
            let a = &self.attrs[id as usize];
            (a.element, a.prev_attr, a.next_attr)
        };
        let Some(element) = element else { return };
        match prev {
            Some(p) => self.attrs[p as usize].next_attr = next,
            None => self.nodes[element as usize].first_attr = next,
        }
        match next {
            Some(n) => self.attrs[n as usize].prev_attr = prev,
            None => self.nodes[element as usize].last_attr = prev,
        }
        let a = &mut self.attrs[id as usize];
        a.element = None;
        a.prev_attr = None;
        a.next_attr = None;
    }

    /// Deep-copy a subtree within this document. Text is shared: the copy
    /// references the same buffer spans as the original. The returned
    /// node is unlinked.
    pub fn clone_node(&mut self, id: NodeId) -> NodeId {
        let src = &self.nodes[id as usize];
        let mut copy = Node::new(src.kind);
        copy.name = src.name;
        copy.value = src.value;
        let new_id = self.push_node(copy);

        let mut a = self.nodes[id as usize].first_attr;
        while let Some(aid) = a {
            let (name, value, next) = {
                let at = &self.attrs[aid as usize];
                (at.name, at.value, at.next_attr)
            };
            let new_aid = self.push_attr(Attribute::new(name, value));
            self.append_attribute(new_id, new_aid);
            a = next;
        }

        let mut c = self.nodes[id as usize].first_child;
        while let Some(cid) = c {
            let next = self.nodes[cid as usize].next_sibling;
            let new_cid = self.clone_node(cid);
            self.append_child(new_id, new_cid);
            c = next;
        }
        new_id
    }

    /// Deep-copy a subtree from another document into this one. All
    /// referenced text is copied into this document's buffer. The
    /// returned node is unlinked.
    pub fn import_node(&mut self, src: &Document, id: NodeId) -> NodeId {
        let (kind, name, value) = {
            let n = &src.nodes[id as usize];
            (n.kind, src.str_at(n.name), src.str_at(n.value))
        };
        let name = self.alloc_str(name);
        let value = self.alloc_str(value);
        let mut copy = Node::new(kind);
        copy.name = name;
        copy.value = value;
        let new_id = self.push_node(copy);

        let mut a = src.nodes[id as usize].first_attr;
        while let Some(aid) = a {
            let at = &src.attrs[aid as usize];
            let name = self.alloc_str(src.str_at(at.name));
            let value = self.alloc_str(src.str_at(at.value));
            let new_aid = self.push_attr(Attribute::new(name, value));
            self.append_attribute(new_id, new_aid);
            a = at.next_attr;
        }

        let mut c = src.nodes[id as usize].first_child;
        while let Some(cid) = c {
            let new_cid = self.import_node(src, cid);
            self.append_child(new_id, new_cid);
            c = src.nodes[cid as usize].next_sibling;
        }
        new_id
    }

    fn assert_unlinked(&self, id: NodeId) {
        assert_ne!(id, DOCUMENT_NODE, "cannot link the document node");
        assert!(
            self.nodes[id as usize].parent.is_none(),
            "node is already linked; remove it first"
        );
    }

    fn assert_attr_unlinked(&self, id: AttrId) {
        assert!(
            self.attrs[id as usize].element.is_none(),
            "attribute is already linked; remove it first"
        );
    }
}

/// Iterator over child nodes.
pub struct Children<'d> {
    doc: &'d Document,
    next: Option<NodeId>,
}

impl<'d> Iterator for Children<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.nodes[current as usize].next_sibling;
        Some(current)
    }
}

/// Iterator over attributes of a node.
pub struct Attributes<'d> {
    doc: &'d Document,
    next: Option<AttrId>,
}

impl<'d> Iterator for Attributes<'d> {
    type Item = AttrId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.attrs[current as usize].next_attr;
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first, document order).
pub struct Descendants<'d> {
    doc: &'d Document,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for Descendants<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.doc.push_children_reversed(current, &mut self.stack);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = Document::parse("<root>hello</root>", ParseFlags::DEFAULT).unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.name(root), "root");
        assert_eq!(doc.value(root), "hello");
    }

    #[test]
    fn test_children_order() {
        let doc = Document::parse("<root><a/><b/><c/></root>", ParseFlags::DEFAULT).unwrap();
        let root = doc.root_element().unwrap();
        let names: Vec<_> = doc.children(root).map(|c| doc.name(c)).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_descendants() {
        let doc = Document::parse("<root><a/><b><c/></b></root>", ParseFlags::FASTEST).unwrap();
        let root = doc.root_element().unwrap();
        let names: Vec<_> = doc.descendants(root).map(|c| doc.name(c)).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_sibling_links() {
        let doc = Document::parse("<root><a/><b/></root>", ParseFlags::DEFAULT).unwrap();
        let root = doc.root_element().unwrap();
        let a = doc.first_child(root).unwrap();
        let b = doc.next_sibling(a).unwrap();
        assert_eq!(doc.prev_sibling(b), Some(a));
        assert_eq!(doc.last_child(root), Some(b));
        assert_eq!(doc.parent(a), Some(root));
    }

    #[test]
    fn test_find_by_name() {
        let doc = Document::parse(
            "<root><x/><item id=\"1\"/><item id=\"2\"/></root>",
            ParseFlags::DEFAULT,
        )
        .unwrap();
        let root = doc.root_element().unwrap();
        let first = doc.first_child_named(root, "item").unwrap();
        assert_eq!(doc.attr_value(doc.attribute_named(first, "id").unwrap()), "1");
        let second = doc.next_sibling_named(first, "item").unwrap();
        assert_eq!(doc.attr_value(doc.attribute_named(second, "id").unwrap()), "2");
        assert_eq!(doc.last_child_named(root, "item"), Some(second));
        assert!(doc.first_child_named(root, "missing").is_none());
    }

    #[test]
    fn test_child_by_attribute() {
        let doc = Document::parse(
            "<r><a k=\"1\"/><b k=\"2\"/><a k=\"2\"/></r>",
            ParseFlags::DEFAULT,
        )
        .unwrap();
        let r = doc.root_element().unwrap();
        let hit = doc.child_by_attribute(r, Some("a"), "k", "2").unwrap();
        assert_eq!(doc.name(hit), "a");
        assert_eq!(doc.attr_value(doc.first_attribute(hit).unwrap()), "2");
        let any = doc.child_by_attribute(r, None, "k", "2").unwrap();
        assert_eq!(doc.name(any), "b");
    }

    #[test]
    fn test_append_remove() {
        let mut doc = Document::new();
        let root = doc.allocate_element("root");
        doc.append_child(DOCUMENT_NODE, root);
        let a = doc.allocate_element("a");
        let b = doc.allocate_element("b");
        doc.append_child(root, a);
        doc.append_child(root, b);
        assert_eq!(doc.children(root).count(), 2);

        doc.remove_node(a);
        assert_eq!(doc.first_child(root), Some(b));
        assert_eq!(doc.prev_sibling(b), None);
        assert!(doc.parent(a).is_none());

        // Unlinked nodes can be re-linked.
        doc.append_child(root, a);
        let names: Vec<_> = doc.children(root).map(|c| doc.name(c)).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_prepend_insert() {
        let mut doc = Document::new();
        let root = doc.allocate_element("root");
        doc.append_child(DOCUMENT_NODE, root);
        let b = doc.allocate_element("b");
        doc.append_child(root, b);
        let a = doc.allocate_element("a");
        doc.prepend_child(root, a);
        let mid = doc.allocate_element("mid");
        doc.insert_child(root, b, mid);
        let names: Vec<_> = doc.children(root).map(|c| doc.name(c)).collect();
        assert_eq!(names, ["a", "mid", "b"]);
    }

    #[test]
    fn test_attribute_mutation() {
        let mut doc = Document::new();
        let el = doc.allocate_element("el");
        doc.append_child(DOCUMENT_NODE, el);
        let x = doc.allocate_attribute("x", "1");
        let z = doc.allocate_attribute("z", "3");
        doc.append_attribute(el, x);
        doc.append_attribute(el, z);
        let y = doc.allocate_attribute("y", "2");
        doc.insert_attribute(el, z, y);
        let names: Vec<_> = doc.attributes(el).map(|a| doc.attr_name(a)).collect();
        assert_eq!(names, ["x", "y", "z"]);

        doc.remove_attribute(y);
        let names: Vec<_> = doc.attributes(el).map(|a| doc.attr_name(a)).collect();
        assert_eq!(names, ["x", "z"]);
        assert_eq!(doc.next_attribute(x), Some(z));
        assert_eq!(doc.prev_attribute(z), Some(x));
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn test_double_link_panics() {
        let mut doc = Document::new();
        let root = doc.allocate_element("root");
        doc.append_child(DOCUMENT_NODE, root);
        let a = doc.allocate_element("a");
        doc.append_child(root, a);
        doc.append_child(root, a);
    }

    #[test]
    fn test_clone_node() {
        let mut doc =
            Document::parse("<r><item k=\"v\">text</item></r>", ParseFlags::DEFAULT).unwrap();
        let r = doc.root_element().unwrap();
        let item = doc.first_child(r).unwrap();
        let copy = doc.clone_node(item);
        doc.append_child(r, copy);

        let items: Vec<_> = doc.children(r).collect();
        assert_eq!(items.len(), 2);
        for id in items {
            assert_eq!(doc.name(id), "item");
            assert_eq!(doc.value(id), "text");
            assert_eq!(doc.attr_value(doc.attribute_named(id, "k").unwrap()), "v");
        }
    }

    #[test]
    fn test_import_node() {
        let src = Document::parse("<r><item k=\"v\">text</item></r>", ParseFlags::DEFAULT).unwrap();
        let item = src.first_child(src.root_element().unwrap()).unwrap();

        let mut dst = Document::new();
        let root = dst.allocate_element("root");
        dst.append_child(DOCUMENT_NODE, root);
        let imported = dst.import_node(&src, item);
        dst.append_child(root, imported);

        assert_eq!(dst.name(imported), "item");
        assert_eq!(dst.value(imported), "text");
        let a = dst.attribute_named(imported, "k").unwrap();
        assert_eq!(dst.attr_value(a), "v");
        let text = dst.first_child(imported).unwrap();
        assert_eq!(dst.value(text), "text");
    }

    #[test]
    fn test_reset() {
        let mut doc = Document::parse("<r><a/></r>", ParseFlags::DEFAULT).unwrap();
        assert!(doc.root_element().is_some());
        doc.reset();
        assert!(doc.root_element().is_none());
        assert_eq!(doc.node_count(), 1);

        let el = doc.allocate_element("fresh");
        doc.append_child(DOCUMENT_NODE, el);
        assert_eq!(doc.name(doc.root_element().unwrap()), "fresh");
    }
}
