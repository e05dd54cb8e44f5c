//! Arena-backed document object model.

pub mod document;
pub mod node;
pub mod span;

pub use document::{Document, DOCUMENT_NODE};
pub use node::{AttrId, Attribute, Node, NodeId, NodeKind};
pub use span::Span;
