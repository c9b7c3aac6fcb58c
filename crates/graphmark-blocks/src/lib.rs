//! Block-oriented markdown pipeline with pluggable block rules.
//!
//! This crate provides a [`BlockParser`] that splits a document into text
//! blocks at blank-line boundaries and feeds them, one at a time, to an
//! ordered list of [`BlockRule`] implementations. The first rule whose
//! `test` accepts a block gets to consume it and append output to the
//! document tree; blocks no rule claims are rendered as ordinary markdown.
//!
//! # Architecture
//!
//! - [`block`]: splitting raw input into the pending block queue
//! - [`element`]: the output document tree ([`Element`]) and HTML serialization
//! - [`rule`]: the [`BlockRule`] trait that extensions implement
//! - [`parser`]: the [`BlockParser`] driving the block-processing pass
//! - [`markdown`]: fallback event-driven markdown rendering for plain blocks
//!
//! # Example
//!
//! ```
//! use graphmark_blocks::BlockParser;
//!
//! let mut parser = BlockParser::new();
//! let html = parser.render("# Hello\n\n**Bold** text").unwrap();
//! assert!(html.contains("<h1>Hello</h1>"));
//! ```

mod block;
mod element;
mod markdown;
mod parser;
mod rule;
mod util;

pub use block::split_blocks;
pub use element::{Element, Node};
pub use parser::{BlockParser, ParseError};
pub use rule::{BlockRule, RuleError};
pub use util::escape_html;
