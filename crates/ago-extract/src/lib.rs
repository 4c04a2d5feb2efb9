//! Lenient extraction of labelled fragments from third-party HTML pages.
//!
//! The parser here is deliberately forgiving: unclosed tags are closed
//! implicitly, void elements never take children, entities are decoded and
//! anything it cannot make sense of is kept as text instead of failing.

pub mod script;
pub mod tokenizer;
pub mod tree;

pub use script::strip_scripts;
pub use tree::{Node, ParseError, parse};
