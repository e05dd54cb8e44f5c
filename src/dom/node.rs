//! XML node and attribute records
//!
//! Uses NodeId/AttrId (u32) for compact, cache-friendly references into the
//! document arenas. Records carry sibling links so child and attribute
//! lists preserve document order and support unlinking without reclaiming
//! arena memory.

use super::span::Span;

/// Compact node identifier (index into the node arena).
pub type NodeId = u32;

/// Compact attribute identifier (index into the attribute arena).
pub type AttrId = u32;

/// Type of XML node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root. Name and value are empty.
    Document,
    /// An element. Name is the tag name; value is the text of the first
    /// data child, if any.
    Element,
    /// Character data. Value holds the decoded text.
    Data,
    /// CDATA section. Value holds the raw text.
    CData,
    /// Comment. Value holds the comment text.
    Comment,
    /// XML declaration. Parameters (version, encoding, standalone) are
    /// stored as attributes.
    Declaration,
    /// DOCTYPE. Value holds everything between `<!DOCTYPE ` and `>`.
    Doctype,
    /// Processing instruction. Name is the target; value the instruction.
    Pi,
}

/// An XML node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Type of this node.
    pub kind: NodeKind,
    /// Name span (elements, PIs), empty otherwise.
    pub(crate) name: Span,
    /// Value span (data, cdata, comments, doctype, PIs, element values).
    pub(crate) value: Span,
    /// Parent node (None for the document node and unlinked nodes).
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node.
    pub last_child: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// First attribute (elements and declarations).
    pub first_attr: Option<AttrId>,
    /// Last attribute.
    pub last_attr: Option<AttrId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            name: Span::EMPTY,
            value: Span::EMPTY,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            first_attr: None,
            last_attr: None,
        }
    }

    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a data (text) node.
    #[inline]
    pub fn is_data(&self) -> bool {
        self.kind == NodeKind::Data
    }

    /// Check if this node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes.
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.first_attr.is_some()
    }
}

/// A stored attribute. Owned by exactly one element (or declaration).
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Name span.
    pub(crate) name: Span,
    /// Value span (entity-decoded in place during parsing).
    pub(crate) value: Span,
    /// Owning element (None while unlinked).
    pub element: Option<NodeId>,
    /// Previous attribute in document order.
    pub prev_attr: Option<AttrId>,
    /// Next attribute in document order.
    pub next_attr: Option<AttrId>,
}

impl Attribute {
    pub(crate) fn new(name: Span, value: Span) -> Self {
        Attribute {
            name,
            value,
            element: None,
            prev_attr: None,
            next_attr: None,
        }
    }
}
