//! Document tree nodes produced by directives.
//!
//! Directives that need more than raw HTML return a [`DocumentNode`]. The
//! processor keeps every node it receives, in document order, and renders it
//! in place once the surrounding markdown has been converted.

use std::path::PathBuf;

use crate::html::{RenderOptions, render_plot};

/// Location of a directive in its source document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourcePosition {
    /// Source file, when the document was loaded from disk.
    pub source: Option<PathBuf>,
    /// Line of the directive (1-indexed).
    pub line: usize,
}

/// Reference to an interactive plot.
///
/// Built by the `::plotly` directive. `url` points at the plot's figure JSON,
/// `href` is where clicking the plot navigates to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlotNode {
    /// Figure JSON location.
    pub url: String,
    /// Hyperlink target.
    pub href: String,
    /// Element ID from `{#id}`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    /// Extra classes from `{.class}`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub classes: Vec<String>,
    /// Where the directive appeared.
    pub position: SourcePosition,
}

impl PlotNode {
    /// Tag name of plot nodes.
    pub const TAGNAME: &'static str = "plotly";
}

/// Custom node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "tagname"))]
pub enum DocumentNode {
    /// `::plotly` plot reference.
    #[cfg_attr(feature = "serde", serde(rename = "plotly"))]
    Plot(PlotNode),
}

impl DocumentNode {
    #[must_use]
    pub fn tagname(&self) -> &'static str {
        match self {
            Self::Plot(_) => PlotNode::TAGNAME,
        }
    }

    #[must_use]
    pub fn position(&self) -> &SourcePosition {
        match self {
            Self::Plot(plot) => &plot.position,
        }
    }

    /// Render the node as an HTML block.
    #[must_use]
    pub fn to_html(&self, options: &RenderOptions) -> String {
        match self {
            Self::Plot(plot) => render_plot(plot, options),
        }
    }

    /// Borrow the plot, if this node is one.
    #[must_use]
    pub fn as_plot(&self) -> Option<&PlotNode> {
        match self {
            Self::Plot(plot) => Some(plot),
        }
    }
}

impl From<PlotNode> for DocumentNode {
    fn from(plot: PlotNode) -> Self {
        Self::Plot(plot)
    }
}
