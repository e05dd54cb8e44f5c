//! Fast, in-place, non-validating XML parser.
//!
//! Parsing takes ownership of (or copies) the input text, records names
//! and values as spans into that single buffer, and decodes entities by
//! rewriting the buffer in place. The resulting [`Document`] is an arena
//! of nodes and attributes addressed by `u32` handles; navigation and
//! mutation go through `Document` methods taking handles.
//!
//! ```
//! use flxml::{Document, ParseFlags, PrintFlags};
//!
//! let doc = Document::parse("<config><port>8080</port></config>", ParseFlags::DEFAULT)?;
//! let config = doc.root_element().unwrap();
//! let port = doc.first_child_named(config, "port").unwrap();
//! assert_eq!(doc.value(port), "8080");
//! assert_eq!(doc.to_xml(PrintFlags::NO_INDENTING), "<config><port>8080</port></config>");
//! # Ok::<(), flxml::ParseError>(())
//! ```
//!
//! The parser is non-validating: it checks structural well-formedness of
//! what it reads but no DTD or schema rules. Parse behavior is tuned with
//! [`ParseFlags`]; the default materializes elements, attributes, data
//! and CDATA nodes and skips the rest after consuming it.

mod core;
mod dom;
mod error;
mod flags;
mod print;

pub use dom::{AttrId, Attribute, Document, Node, NodeId, NodeKind, Span, DOCUMENT_NODE};
pub use error::{line_col, ParseError};
pub use flags::ParseFlags;
pub use print::{print, print_to, PrintFlags};
