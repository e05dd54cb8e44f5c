//! Parse flags
//!
//! Flags control which constructs are materialized as nodes and how text
//! is treated. [`ParseFlags::DEFAULT`] keeps data and CDATA nodes and skips
//! declarations, doctypes, comments and PIs after consuming them.

use bitflags::bitflags;

bitflags! {
    /// Options accepted by [`Document::parse`](crate::Document::parse).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParseFlags: u32 {
        /// Materialize the `<?xml ...?>` declaration as a node.
        const DECLARATION_NODE = 0x01;
        /// Materialize `<!DOCTYPE ...>` as a node.
        const DOCTYPE_NODE = 0x02;
        /// Materialize processing instructions as nodes.
        const PI_NODES = 0x04;
        /// Materialize comments as nodes.
        const COMMENT_NODES = 0x08;
        /// Materialize CDATA sections as nodes.
        const CDATA_NODES = 0x10;
        /// Do not create data nodes. Element values are still captured
        /// unless NO_ELEMENT_VALUES is also set.
        const NO_DATA_NODES = 0x20;
        /// Do not copy the first data child's text into the parent
        /// element's value.
        const NO_ELEMENT_VALUES = 0x40;
        /// Leave entity references undecoded. This is the only way to
        /// accept documents using entities beyond the five built-ins.
        const NO_ENTITY_TRANSLATION = 0x80;
        /// Strip leading and trailing whitespace of data nodes.
        const TRIM_WHITESPACE = 0x100;
        /// Condense whitespace runs in data nodes to a single space.
        const NORMALIZE_WHITESPACE = 0x200;
        /// Fail with MismatchedClosingTag when a closing tag name does
        /// not match its open tag. Off by default: the closing name is
        /// then irrelevant and closes the innermost open element.
        const VALIDATE_CLOSING_TAGS = 0x400;
    }
}

impl ParseFlags {
    /// Default behavior: data and CDATA nodes only.
    pub const DEFAULT: ParseFlags = ParseFlags::CDATA_NODES;

    /// Fastest parse: element structure and attributes only.
    pub const FASTEST: ParseFlags = ParseFlags::NO_DATA_NODES;

    /// Largest amount of data extracted, with closing tags validated.
    pub const FULL: ParseFlags = ParseFlags::DECLARATION_NODE
        .union(ParseFlags::DOCTYPE_NODE)
        .union(ParseFlags::PI_NODES)
        .union(ParseFlags::COMMENT_NODES)
        .union(ParseFlags::CDATA_NODES)
        .union(ParseFlags::VALIDATE_CLOSING_TAGS);
}

impl Default for ParseFlags {
    fn default() -> Self {
        ParseFlags::DEFAULT
    }
}
