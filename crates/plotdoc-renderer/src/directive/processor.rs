//! Directive processor.
//!
//! Handles preprocessing (before pulldown-cmark) and post-processing (after
//! rendering).

use std::path::PathBuf;

use rand::RngExt;

use crate::fence::FenceTracker;
use crate::html::RenderOptions;
use crate::node::DocumentNode;

use super::parser::{ParsedLeaf, malformed_leaf_name, parse_leaf_line};
use super::{DirectiveContext, DirectiveOutput, LeafDirective, Replacements, registry};

/// Configuration for the directive processor.
#[derive(Debug, Default)]
pub struct DirectiveProcessorConfig {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<PathBuf>,
}

impl DirectiveProcessorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file path recorded on nodes.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    fn create_context(&self, line: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            line,
        }
    }
}

/// Processor for leaf directives.
///
/// Nodes returned by handlers are collected into the document tree (see
/// [`nodes`](Self::nodes)). During preprocessing each node is replaced by a
/// placeholder element; [`post_process`](Self::post_process) swaps the
/// placeholders for the nodes' HTML. Placeholders carry a random key chosen
/// per processor, so markup written by the author never matches one.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::RenderOptions;
/// use plotdoc_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig};
///
/// let config = DirectiveProcessorConfig::new().with_source_path("docs/report.md");
/// let mut processor = DirectiveProcessor::with_config(config).with_registered();
///
/// let mut html = processor.process("::plotly[/figs/q3.json]{href=\"/reports/q3\"}");
/// assert_eq!(processor.nodes().len(), 1);
///
/// processor.post_process(&mut html, &RenderOptions::default());
/// assert!(html.contains(r#"data-url="/figs/q3.json""#));
/// ```
pub struct DirectiveProcessor {
    config: DirectiveProcessorConfig,
    /// Handlers keyed by the directive name they answer to.
    leaf_handlers: Vec<(String, Box<dyn LeafDirective>)>,
    fence: FenceTracker,
    nodes: Vec<DocumentNode>,
    warnings: Vec<String>,
    placeholder_key: u64,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    /// Create a processor with no handlers and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DirectiveProcessorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig) -> Self {
        Self {
            config,
            leaf_handlers: Vec::new(),
            fence: FenceTracker::new(),
            nodes: Vec::new(),
            warnings: Vec::new(),
            placeholder_key: rand::rng().random::<u64>(),
        }
    }

    /// Register a leaf directive handler under its own [`name`](LeafDirective::name).
    ///
    /// Handlers registered earlier win when names collide.
    #[must_use]
    pub fn with_leaf<D: LeafDirective + 'static>(self, handler: D) -> Self {
        self.with_boxed_leaf(Box::new(handler))
    }

    #[must_use]
    pub fn with_boxed_leaf(mut self, handler: Box<dyn LeafDirective>) -> Self {
        let name = handler.name().to_owned();
        self.leaf_handlers.push((name, handler));
        self
    }

    /// Add a fresh handler for every directive in the global registry.
    ///
    /// Each handler answers to the name it was registered under, which may
    /// differ from its own [`name`](LeafDirective::name).
    #[must_use]
    pub fn with_registered(mut self) -> Self {
        self.leaf_handlers.extend(registry::instantiate_all());
        self
    }

    /// Preprocess markdown, replacing directives with HTML or node placeholders.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let line_count = input.lines().count();

        for (idx, line) in input.lines().enumerate() {
            output.push_str(&self.process_line(line, idx + 1));

            // Preserve line endings
            if idx + 1 < line_count || input.ends_with('\n') {
                output.push('\n');
            }
        }

        output
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> String {
        self.fence.update(line);
        if self.fence.in_fence() {
            return line.to_owned();
        }

        if let Some(leaf) = parse_leaf_line(line) {
            return self.dispatch_leaf(line, leaf, line_num);
        }
        if let Some(name) = malformed_leaf_name(line) {
            self.warn(
                format!("line {line_num}: malformed \"{name}\" directive"),
                name,
                line_num,
            );
        }
        line.to_owned()
    }

    fn dispatch_leaf(&mut self, line: &str, leaf: ParsedLeaf, line_num: usize) -> String {
        let ParsedLeaf { name, args } = leaf;
        let Some(idx) = self.leaf_handlers.iter().position(|(key, _)| *key == name) else {
            self.warn(
                format!("line {line_num}: unknown directive type \"{name}\""),
                &name,
                line_num,
            );
            return line.to_owned();
        };

        let handler = &mut self.leaf_handlers[idx].1;
        let args = match handler.spec().validate(args) {
            Ok(args) => args,
            Err(err) => {
                let message = format!("line {line_num}: error in \"{name}\" directive: {err}");
                self.warn(message, &name, line_num);
                return line.to_owned();
            }
        };

        let ctx = self.config.create_context(line_num);
        match handler.process(args, &ctx) {
            DirectiveOutput::Html(html) => html,
            DirectiveOutput::Node(node) => {
                let placeholder = self.placeholder(self.nodes.len());
                self.nodes.push(node);
                let indent = &line[..line.len() - line.trim_start_matches(' ').len()];
                // Blank lines on both sides keep the placeholder its own HTML
                // block; the indent keeps it inside an enclosing list item.
                format!("\n{indent}{placeholder}\n")
            }
            DirectiveOutput::Skip => line.to_owned(),
        }
    }

    fn warn(&mut self, message: String, name: &str, line_num: usize) {
        tracing::warn!(
            directive = %name,
            line = line_num,
            source = ?self.config.source_path,
            "{message}"
        );
        self.warnings.push(message);
    }

    /// Replace node placeholders in rendered HTML with the nodes' markup.
    pub fn post_process(&self, html: &mut String, options: &RenderOptions) {
        let mut replacements = Replacements::with_capacity(self.nodes.len());
        for (idx, node) in self.nodes.iter().enumerate() {
            replacements.add(self.placeholder(idx), node.to_html(options));
        }
        replacements.apply(html);
    }

    /// Nodes produced so far, in document order.
    #[must_use]
    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    /// Take ownership of the produced nodes.
    pub fn take_nodes(&mut self) -> Vec<DocumentNode> {
        std::mem::take(&mut self.nodes)
    }

    /// All warnings from the processor and its handlers.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut all_warnings = self.warnings.clone();
        for (_, handler) in &self.leaf_handlers {
            all_warnings.extend(handler.warnings().iter().cloned());
        }
        all_warnings
    }

    /// Placeholder for the node at `idx`. A self-closing custom element on
    /// its own line is passed through by pulldown-cmark as a raw HTML block.
    fn placeholder(&self, idx: usize) -> String {
        format!(
            r#"<plotdoc-node data-key="{:016x}-{idx}" />"#,
            self.placeholder_key
        )
    }
}
