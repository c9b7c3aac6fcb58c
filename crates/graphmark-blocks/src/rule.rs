//! The block rule extension point.

use std::collections::VecDeque;

use crate::element::Element;

/// Error type rules propagate to the host parser.
///
/// Rules carry their own concrete error types; the boxed form crosses the
/// trait boundary and is wrapped into [`ParseError::Rule`] by the parser.
///
/// [`ParseError::Rule`]: crate::ParseError::Rule
pub type RuleError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A block-level rule plugged into the [`BlockParser`].
///
/// Rules are consulted in registration order; the first rule whose [`test`]
/// accepts the front block gets to [`run`].
///
/// [`BlockParser`]: crate::BlockParser
/// [`test`]: BlockRule::test
/// [`run`]: BlockRule::run
pub trait BlockRule {
    /// Stable rule name, used in error reporting.
    fn name(&self) -> &str;

    /// Whether this rule wants to handle the given block.
    fn test(&self, block: &str) -> bool;

    /// Consume the front block and append output to `parent`.
    ///
    /// Implementations must remove at least the front block from `blocks`
    /// before returning, even when they decide to produce no output — a
    /// block left in the queue would be tested again on the next pass.
    ///
    /// A returned error aborts the whole document pass.
    fn run(&mut self, parent: &mut Element, blocks: &mut VecDeque<String>) -> Result<(), RuleError>;
}
