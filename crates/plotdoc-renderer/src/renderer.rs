//! Markdown to HTML pipeline with directive support.

use std::path::PathBuf;

use pulldown_cmark::{Options, Parser, html};

use crate::directive::{DirectiveProcessor, DirectiveProcessorConfig};
use crate::html::{RenderOptions, plotly_scripts};
use crate::node::DocumentNode;

/// Result of rendering one document.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML, including the plotly.js loader when plots are present.
    pub html: String,
    /// Nodes produced by directives, in document order.
    pub nodes: Vec<DocumentNode>,
    /// Directive warnings (rejected directives, handler diagnostics).
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// Number of plot nodes in the document.
    #[must_use]
    pub fn plot_count(&self) -> usize {
        self.nodes.iter().filter_map(DocumentNode::as_plot).count()
    }
}

/// Renders markdown documents with the registered directives.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::{DocumentRenderer, RenderOptions};
///
/// let markdown = "# Sales\n\n::plotly[/figs/sales.json]{href=\"/sales\"}\n";
/// let result = DocumentRenderer::new(RenderOptions::default())
///     .with_source_path("docs/sales.md")
///     .render(markdown);
///
/// assert!(result.html.contains("<h1>Sales</h1>"));
/// assert!(result.html.contains(r#"data-url="/figs/sales.json""#));
/// assert_eq!(result.plot_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
    source_path: Option<PathBuf>,
}

impl DocumentRenderer {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            source_path: None,
        }
    }

    /// Set the source path recorded on produced nodes.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a markdown document.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut config = DirectiveProcessorConfig::new();
        if let Some(path) = &self.source_path {
            config = config.with_source_path(path.clone());
        }
        let mut processor = DirectiveProcessor::with_config(config).with_registered();

        let preprocessed = processor.process(markdown);

        let parser = Parser::new_ext(&preprocessed, markdown_options());
        let mut html = String::with_capacity(preprocessed.len() * 3 / 2);
        html::push_html(&mut html, parser);

        processor.post_process(&mut html, &self.options);

        let nodes = processor.take_nodes();
        let warnings = processor.warnings();

        let has_plots = nodes.iter().any(|n| n.as_plot().is_some());
        if has_plots && self.options.include_script {
            html.push_str(&plotly_scripts(&self.options));
        }

        tracing::debug!(
            source = ?self.source_path,
            nodes = nodes.len(),
            warnings = warnings.len(),
            "Rendered document"
        );

        RenderResult {
            html,
            nodes,
            warnings,
        }
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}
