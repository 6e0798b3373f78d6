//! Markdown renderer with embeddable interactive plots.
//!
//! Documents are plain `CommonMark` plus block-level directives. The
//! `::plotly` directive embeds a plot whose figure JSON lives at a URL:
//!
//! ```markdown
//! ::plotly[https://example.com/figs/sales.json]{href="https://example.com/sales"}
//! ```
//!
//! Each directive becomes a [`PlotNode`] in the document tree and a
//! `div.plotly` placeholder in the HTML, initialised client-side by
//! plotly.js.
//!
//! # Example
//!
//! ```
//! use plotdoc_renderer::{DocumentRenderer, RenderOptions};
//!
//! let result = DocumentRenderer::new(RenderOptions::default())
//!     .render("::plotly[/figs/a.json]{href=\"/a\"}\n");
//!
//! let plot = result.nodes[0].as_plot().unwrap();
//! assert_eq!(plot.url, "/figs/a.json");
//! assert_eq!(plot.position.line, 1);
//! ```

pub mod directive;
mod fence;
mod html;
mod node;
mod plotly;
mod renderer;

pub use html::{DEFAULT_PLOTLY_SCRIPT_URL, RenderOptions, escape_html};
pub use node::{DocumentNode, PlotNode, SourcePosition};
pub use plotly::PlotlyDirective;
pub use renderer::{DocumentRenderer, RenderResult};
