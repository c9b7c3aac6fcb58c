//! The block-processing pass.

use std::collections::VecDeque;

use crate::block::split_blocks;
use crate::element::Element;
use crate::markdown::render_markdown;
use crate::rule::{BlockRule, RuleError};

/// Error from a document pass.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A block rule failed; the whole document pass is aborted.
    #[error("block rule '{rule}' failed: {source}")]
    Rule {
        /// Name of the failing rule.
        rule: String,
        #[source]
        source: RuleError,
    },
}

/// Block-level document parser with an ordered rule list.
///
/// Splits input into blocks at blank-line boundaries and repeatedly tests
/// the front block against registered rules. The first rule accepting the
/// block consumes it; unclaimed blocks are rendered as ordinary markdown.
/// Registration order is the priority order.
///
/// # Example
///
/// ```
/// use std::collections::VecDeque;
/// use graphmark_blocks::{BlockParser, BlockRule, Element, RuleError};
///
/// struct ShoutRule;
///
/// impl BlockRule for ShoutRule {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn test(&self, block: &str) -> bool {
///         block.starts_with("!!")
///     }
///
///     fn run(
///         &mut self,
///         parent: &mut Element,
///         blocks: &mut VecDeque<String>,
///     ) -> Result<(), RuleError> {
///         let block = blocks.pop_front().unwrap_or_default();
///         let mut elt = Element::new("strong");
///         elt.append_text(block.trim_start_matches('!').trim());
///         parent.append(elt);
///         Ok(())
///     }
/// }
///
/// let mut parser = BlockParser::new().with_rule(ShoutRule);
/// let html = parser.render("!! loud\n\nquiet").unwrap();
/// assert_eq!(html, "<strong>loud</strong><p>quiet</p>");
/// ```
#[derive(Default)]
pub struct BlockParser {
    rules: Vec<Box<dyn BlockRule>>,
}

impl BlockParser {
    /// Create a parser with no rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a block rule.
    ///
    /// Rules are tested in registration order; the first match wins.
    #[must_use]
    pub fn with_rule<R: BlockRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run the block-processing pass and return the document tree.
    ///
    /// The returned root element is a `div` container; use
    /// [`Element::inner_html`] (or [`render`](Self::render)) for the
    /// document fragment without it.
    pub fn parse(&mut self, text: &str) -> Result<Element, ParseError> {
        let mut root = Element::new("div");
        let mut blocks: VecDeque<String> = split_blocks(text).into();

        while let Some(front) = blocks.front() {
            let matched = self.rules.iter().position(|rule| rule.test(front));
            if let Some(index) = matched {
                let name = self.rules[index].name().to_owned();
                tracing::debug!(rule = %name, "dispatching block to rule");
                self.rules[index]
                    .run(&mut root, &mut blocks)
                    .map_err(|source| ParseError::Rule { rule: name, source })?;
            } else if let Some(block) = blocks.pop_front() {
                root.append_raw(render_markdown(&block));
            }
        }

        Ok(root)
    }

    /// Parse and serialize in one step.
    pub fn render(&mut self, text: &str) -> Result<String, ParseError> {
        Ok(self.parse(text)?.inner_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;
    use pretty_assertions::assert_eq;

    /// Consumes blocks starting with its marker.
    struct MarkerRule {
        marker: &'static str,
        fail_with: Option<&'static str>,
    }

    impl MarkerRule {
        fn new(marker: &'static str) -> Self {
            Self {
                marker,
                fail_with: None,
            }
        }

        fn failing(marker: &'static str, message: &'static str) -> Self {
            Self {
                fail_with: Some(message),
                ..Self::new(marker)
            }
        }
    }

    impl BlockRule for MarkerRule {
        fn name(&self) -> &str {
            "marker"
        }

        fn test(&self, block: &str) -> bool {
            block.starts_with(self.marker)
        }

        fn run(
            &mut self,
            parent: &mut Element,
            blocks: &mut VecDeque<String>,
        ) -> Result<(), RuleError> {
            blocks.pop_front();
            if let Some(message) = self.fail_with {
                return Err(message.into());
            }
            parent.append(Element::new("section"));
            Ok(())
        }
    }

    #[test]
    fn test_plain_document_uses_fallback() {
        let mut parser = BlockParser::new();
        let html = parser.render("# Title\n\nBody text").unwrap();
        assert_eq!(html, "<h1>Title</h1><p>Body text</p>");
    }

    #[test]
    fn test_matching_rule_consumes_block() {
        let mut parser = BlockParser::new().with_rule(MarkerRule::new("::"));
        let html = parser.render(":: special\n\nplain").unwrap();
        assert_eq!(html, "<section></section><p>plain</p>");
    }

    #[test]
    fn test_non_matching_blocks_untouched_by_rule() {
        let mut parser = BlockParser::new().with_rule(MarkerRule::new("::"));
        let root = parser.parse("one\n\ntwo").unwrap();
        // Both blocks went through the fallback, none through the rule.
        assert_eq!(root.children().len(), 2);
        assert!(
            root.children()
                .iter()
                .all(|node| matches!(node, Node::Raw(_)))
        );
    }

    #[test]
    fn test_each_matched_block_consumed_once() {
        let mut parser = BlockParser::new().with_rule(MarkerRule::new("::"));
        let html = parser.render(":: a\n\n:: b\n\n:: c").unwrap();
        assert_eq!(html, "<section></section><section></section><section></section>");
    }

    #[test]
    fn test_first_registered_rule_wins() {
        struct TagRule(&'static str);
        impl BlockRule for TagRule {
            fn name(&self) -> &str {
                self.0
            }
            fn test(&self, block: &str) -> bool {
                block.starts_with("::")
            }
            fn run(
                &mut self,
                parent: &mut Element,
                blocks: &mut VecDeque<String>,
            ) -> Result<(), RuleError> {
                blocks.pop_front();
                parent.append(Element::new(self.0));
                Ok(())
            }
        }

        let mut parser = BlockParser::new()
            .with_rule(TagRule("first"))
            .with_rule(TagRule("second"));
        let html = parser.render(":: x").unwrap();
        assert_eq!(html, "<first></first>");
    }

    #[test]
    fn test_rule_error_aborts_pass() {
        let mut parser = BlockParser::new().with_rule(MarkerRule::failing("::", "boom"));
        let err = parser.render("before\n\n:: bad\n\nafter").unwrap_err();
        assert_eq!(err.to_string(), "block rule 'marker' failed: boom");
    }

    #[test]
    fn test_empty_document() {
        let mut parser = BlockParser::new();
        assert_eq!(parser.render("").unwrap(), "");
        assert_eq!(parser.render("\n\n \n").unwrap(), "");
    }

    #[test]
    fn test_root_element_is_div() {
        let mut parser = BlockParser::new();
        let root = parser.parse("text").unwrap();
        assert_eq!(root.tag(), "div");
    }
}
