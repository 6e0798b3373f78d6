//! Directive output types.

use crate::node::DocumentNode;

/// Output from directive processing.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html("<hr class=\"fancy\">");
/// assert!(matches!(output, DirectiveOutput::Html(_)));
///
/// // Leave the directive text untouched
/// let output = DirectiveOutput::Skip;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML inserted in place of the directive.
    Html(String),
    /// Node appended to the document tree and rendered in place.
    Node(DocumentNode),
    /// Don't handle this directive (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    /// Create a node output.
    #[must_use]
    pub fn node(node: impl Into<DocumentNode>) -> Self {
        Self::Node(node.into())
    }
}
