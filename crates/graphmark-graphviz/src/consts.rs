//! Default configuration values.

/// Default fence marker introducing a graphviz block.
pub(crate) const DEFAULT_BLOCK_START: &str = "..graphviz";

/// Default tag name of the element wrapping the generated image.
pub(crate) const DEFAULT_HTML_ELEMENT: &str = "div";

/// Default CSS class applied to the wrapping element.
pub(crate) const DEFAULT_IMAGE_CLASS: &str = "graphviz";

/// Output format token passed to the renderer as `-T <format>`.
pub(crate) const OUTPUT_FORMAT: &str = "svg";
