//! The graphviz block rule.

use std::collections::VecDeque;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use graphmark_blocks::{BlockRule, Element, RuleError};
use regex::Regex;

use crate::config::GraphvizConfig;
use crate::consts::OUTPUT_FORMAT;
use crate::invoker::{CommandInvoker, ProcessInvoker, RenderRequest};

/// Block rule rendering graphviz blocks to inline SVG data URIs.
///
/// A block matches when its text starts with the configured fence marker.
/// The first line must be `<marker> <program>`; the remaining lines are the
/// graph source piped to the program. A first line carrying no program token
/// consumes the block silently. A renderer failure aborts the document pass.
///
/// The `src` MIME type is fixed to `image/svg+xml`: the `-T` token is always
/// `svg` at this call site and is not plumbed into the URI.
pub struct GraphvizRule {
    config: GraphvizConfig,
    first_line: Regex,
    invoker: Box<dyn ProcessInvoker>,
}

impl GraphvizRule {
    /// Create a rule that spawns the named program via [`CommandInvoker`].
    #[must_use]
    pub fn new(config: GraphvizConfig) -> Self {
        Self::with_invoker(config, Box::new(CommandInvoker::new()))
    }

    /// Create a rule with a custom [`ProcessInvoker`].
    #[must_use]
    pub fn with_invoker(config: GraphvizConfig, invoker: Box<dyn ProcessInvoker>) -> Self {
        let pattern = format!(r"^{}\s+(\S+)", regex::escape(&config.block_start));
        let first_line = Regex::new(&pattern).expect("escaped marker forms a valid pattern");
        Self {
            config,
            first_line,
            invoker,
        }
    }
}

impl BlockRule for GraphvizRule {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn test(&self, block: &str) -> bool {
        block.starts_with(&self.config.block_start)
    }

    fn run(&mut self, parent: &mut Element, blocks: &mut VecDeque<String>) -> Result<(), RuleError> {
        // Pop first, unconditionally. A block left in the queue would be
        // tested again on the next pass and loop forever.
        let Some(block) = blocks.pop_front() else {
            return Ok(());
        };

        let first_line = block.lines().next().unwrap_or("");
        let Some(captures) = self.first_line.captures(first_line) else {
            tracing::debug!(rule = "graphviz", "fence without a program token, dropping block");
            return Ok(());
        };
        let program = &captures[1];
        let source = block.split_once('\n').map_or("", |(_, rest)| rest);

        let request = RenderRequest {
            program,
            args: &[],
            source,
            format: OUTPUT_FORMAT,
        };
        let image = self.invoker.render(&request)?;

        let mut container = Element::new(&self.config.html_element);
        container.set_attr("class", &self.config.image_class);
        let mut img = Element::new("img");
        img.set_attr(
            "src",
            format!("data:image/svg+xml;base64,{}", BASE64_STANDARD.encode(&image)),
        );
        container.append(img);
        parent.append(container);
        Ok(())
    }
}
