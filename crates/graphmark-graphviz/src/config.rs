//! Graphviz rule configuration (immutable after setup).

use serde::Deserialize;

use crate::consts::{DEFAULT_BLOCK_START, DEFAULT_HTML_ELEMENT, DEFAULT_IMAGE_CLASS};

/// Configuration for [`GraphvizRule`].
///
/// Supplied once at rule construction and immutable thereafter. The struct
/// deserializes from kebab-case keys (`block-start`, `html-element`,
/// `image-class`) so an embedding host can read it from its own config file.
///
/// # Example
///
/// ```
/// use graphmark_graphviz::GraphvizConfig;
///
/// let config = GraphvizConfig::default().with_image_class("diagram");
/// assert_eq!(config.block_start, "..graphviz");
/// assert_eq!(config.image_class, "diagram");
/// ```
///
/// [`GraphvizRule`]: crate::GraphvizRule
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GraphvizConfig {
    /// Literal prefix identifying a graphviz block (case-sensitive).
    pub block_start: String,
    /// Tag name of the element wrapping the generated image.
    pub html_element: String,
    /// CSS class applied to the wrapping element.
    pub image_class: String,
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            block_start: DEFAULT_BLOCK_START.to_owned(),
            html_element: DEFAULT_HTML_ELEMENT.to_owned(),
            image_class: DEFAULT_IMAGE_CLASS.to_owned(),
        }
    }
}

impl GraphvizConfig {
    /// Set the fence marker.
    #[must_use]
    pub fn with_block_start(mut self, block_start: impl Into<String>) -> Self {
        self.block_start = block_start.into();
        self
    }

    /// Set the wrapping element tag name.
    #[must_use]
    pub fn with_html_element(mut self, html_element: impl Into<String>) -> Self {
        self.html_element = html_element.into();
        self
    }

    /// Set the CSS class of the wrapping element.
    #[must_use]
    pub fn with_image_class(mut self, image_class: impl Into<String>) -> Self {
        self.image_class = image_class.into();
        self
    }
}
