//! Parsing internals: buffer scanning, entity decoding, and the
//! recursive-descent parser.

pub(crate) mod entities;
pub(crate) mod parser;
pub(crate) mod scanner;
