//! jsontape is a strict, validating JSON tokenizer.
//!
//! One pass over an input byte slice either rejects it or produces a *tape*:
//! a contiguous array of fixed-width tokens, one per JSON value, each holding
//! byte ranges into the original input. Nothing is copied while parsing:
//! string and number lexemes stay where they are, and escaped strings are
//! only decoded when a caller asks for them.
//!
//! The accepted language is exactly RFC 8259: four whitespace bytes, no
//! comments, no trailing commas, no leading zeroes, no `NaN`. A single
//! leading UTF-8 byte-order mark is tolerated. Number magnitudes are not
//! interpreted; `1e9999` parses and its lexeme is retained verbatim.
//!
//! Tokens are linked by index, not pointer: each token records its parent,
//! and every object or array records the index of the first token after its
//! contents. Walking a document is index arithmetic:
//!
//! ```
//! use jsontape::{Kind, Parser};
//!
//! let mut parser = Parser::default();
//! let doc = parser.parse(br#"{"dish":"udon","servings":2}"#).unwrap();
//!
//! assert_eq!(doc.token_count(), 3);
//! assert_eq!(doc.token(doc.root()).kind(), Kind::Object);
//!
//! let mut scratch = Vec::new();
//! for idx in doc.children(doc.root()) {
//!     let (name, valid) = doc.name(idx, &mut scratch);
//!     assert!(valid && !name.is_empty());
//! }
//! ```
//!
//! Token storage is caller-driven: a fixed slab for bounded parsing, a
//! growth policy for dynamic parsing, or a slab with policy fallback. A
//! [`Parser`] is reusable across any number of inputs and keeps its storage
//! between parses.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod document;
mod error;
mod parser;
mod store;
mod token;
mod unescape;

pub use document::{Children, Document};
pub use error::ParseError;
pub use parser::Parser;
pub use store::{Doubling, GrowthPolicy, TokenStore};
pub use token::{Kind, Token};
pub use unescape::unescape_into;

#[cfg(test)]
mod tests;
