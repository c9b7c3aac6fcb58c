//! Graphviz block rule for the graphmark block pipeline.
//!
//! Recognizes text blocks whose first line is `<block-start> <program>`
//! (for example `..graphviz dot`), pipes the remaining lines to the named
//! Graphviz program, and replaces the block with an inline `<img>` whose
//! `src` is a base64 SVG data URI. No image file is written anywhere.
//!
//! # Architecture
//!
//! - [`config`]: immutable [`GraphvizConfig`] (fence marker, element tag, class)
//! - [`invoker`]: the [`ProcessInvoker`] trait and the [`CommandInvoker`]
//!   that spawns the external program
//! - [`rule`]: [`GraphvizRule`] implementing `BlockRule`
//!
//! # Example
//!
//! ```ignore
//! use graphmark_blocks::BlockParser;
//! use graphmark_graphviz::{GraphvizConfig, GraphvizRule};
//!
//! let markdown = "..graphviz dot\ndigraph {\n  a -> b;\n}\n\nSome prose.";
//! let mut parser = BlockParser::new()
//!     .with_rule(GraphvizRule::new(GraphvizConfig::default()));
//!
//! // Requires the `dot` executable on PATH.
//! let html = parser.render(markdown)?;
//! assert!(html.contains("data:image/svg+xml;base64,"));
//! ```

mod config;
mod consts;
mod invoker;
mod rule;

pub use config::GraphvizConfig;
pub use invoker::{CommandInvoker, ProcessInvoker, RenderError, RenderRequest};
pub use rule::GraphvizRule;
