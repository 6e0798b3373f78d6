//! `::plotly` directive.
//!
//! Embeds an interactive plot:
//!
//! ```markdown
//! ::plotly[https://example.com/figs/sales.json]{href="https://example.com/sales"}
//! ```
//!
//! The argument is the URL of the plot's figure JSON; the `href` option is
//! where clicking the plot leads.

use crate::directive::{
    DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveSpec, LeafDirective, OptionKind,
    OptionSpec,
};
use crate::node::PlotNode;

const OPTIONS: &[OptionSpec] = &[OptionSpec::required("href", OptionKind::Uri)];

/// Handler for `::plotly[URL]{href="URI"}`.
///
/// Produces one [`PlotNode`] per directive. Argument and option checks are
/// done by the processor against [`spec`](LeafDirective::spec).
///
/// # Example
///
/// ```
/// use plotdoc_renderer::PlotlyDirective;
/// use plotdoc_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig};
///
/// let config = DirectiveProcessorConfig::new().with_source_path("post.md");
/// let mut processor = DirectiveProcessor::with_config(config).with_leaf(PlotlyDirective::new());
/// let _ = processor.process("# Sales\n\n::plotly[/figs/sales.json]{href=\"/sales\"}\n");
///
/// let plot = processor.nodes()[0].as_plot().unwrap();
/// assert_eq!(plot.url, "/figs/sales.json");
/// assert_eq!(plot.href, "/sales");
/// assert_eq!(plot.position.line, 3);
/// ```
#[derive(Debug, Default)]
pub struct PlotlyDirective;

impl PlotlyDirective {
    /// Directive name.
    pub const NAME: &'static str = "plotly";

    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LeafDirective for PlotlyDirective {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn spec(&self) -> DirectiveSpec {
        DirectiveSpec {
            required_arguments: 1,
            optional_arguments: 0,
            final_argument_whitespace: false,
            options: Some(OPTIONS),
        }
    }

    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
        let DirectiveArgs {
            content,
            id,
            classes,
            mut attrs,
            ..
        } = args;

        let Some(href) = attrs.remove("href") else {
            return DirectiveOutput::Skip;
        };

        DirectiveOutput::node(PlotNode {
            url: content.trim().to_owned(),
            href,
            id,
            classes,
            position: ctx.source_and_line(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::{DirectiveError, DirectiveProcessor, DirectiveProcessorConfig};
    use crate::node::{DocumentNode, SourcePosition};

    fn processor() -> DirectiveProcessor {
        let config = DirectiveProcessorConfig::new().with_source_path("docs/report.md");
        DirectiveProcessor::with_config(config).with_leaf(PlotlyDirective::new())
    }

    fn ctx(line: usize) -> DirectiveContext<'static> {
        DirectiveContext {
            source_path: Some(Path::new("docs/report.md")),
            line,
        }
    }

    #[test]
    fn test_process_builds_plot_node() {
        let mut plotly = PlotlyDirective::new();
        let args = DirectiveArgs::parse("/figs/a.json", r#"href="https://example.com/a""#);

        let output = plotly.process(args, &ctx(5));
        assert_eq!(
            output,
            DirectiveOutput::Node(DocumentNode::Plot(PlotNode {
                url: "/figs/a.json".to_owned(),
                href: "https://example.com/a".to_owned(),
                id: None,
                classes: Vec::new(),
                position: SourcePosition {
                    source: Some(PathBuf::from("docs/report.md")),
                    line: 5,
                },
            }))
        );
    }

    #[test]
    fn test_spec() {
        let spec = PlotlyDirective::new().spec();
        assert_eq!(spec.required_arguments, 1);
        assert_eq!(spec.optional_arguments, 0);
        assert!(!spec.final_argument_whitespace);
        assert_eq!(spec.options, Some(OPTIONS));
    }

    #[test]
    fn test_exactly_one_node_per_directive() {
        let mut processor = processor();
        let _ = processor.process(r#"::plotly[/figs/a.json]{href="/a"}"#);

        let nodes = processor.nodes();
        assert_eq!(nodes.len(), 1);
        let plot = nodes[0].as_plot().unwrap();
        assert_eq!(plot.url, "/figs/a.json");
        assert_eq!(plot.href, "/a");
    }

    #[test]
    fn test_position_matches_directive_location() {
        let mut processor = processor();
        let input = "# Report\n\nSome text.\n\n::plotly[a.json]{href=/a}\n\n```\n::plotly[x]{href=/x}\n```\n\n::plotly[b.json]{href=/b}\n";
        let _ = processor.process(input);

        let positions: Vec<_> = processor
            .nodes()
            .iter()
            .map(|n| n.position().clone())
            .collect();
        assert_eq!(
            positions,
            vec![
                SourcePosition {
                    source: Some(PathBuf::from("docs/report.md")),
                    line: 5,
                },
                SourcePosition {
                    source: Some(PathBuf::from("docs/report.md")),
                    line: 11,
                },
            ]
        );
    }

    #[test]
    fn test_missing_argument_rejected() {
        let mut processor = processor();
        let output = processor.process(r#"::plotly{href="/a"}"#);

        assert_eq!(output, r#"::plotly{href="/a"}"#);
        assert!(processor.nodes().is_empty());
        assert_eq!(
            processor.warnings(),
            vec![format!(
                "line 1: error in \"plotly\" directive: {}",
                DirectiveError::MissingArguments {
                    required: 1,
                    supplied: 0
                }
            )]
        );
    }

    #[test]
    fn test_missing_href_rejected() {
        let mut processor = processor();
        let _ = processor.process("::plotly[/figs/a.json]");

        assert!(processor.nodes().is_empty());
        assert_eq!(
            processor.warnings(),
            vec![r#"line 1: error in "plotly" directive: required option "href" missing"#]
        );
    }

    #[test]
    fn test_empty_href_rejected() {
        let mut processor = processor();
        let _ = processor.process(r#"::plotly[/figs/a.json]{href=""}"#);

        assert!(processor.nodes().is_empty());
        assert!(processor.warnings()[0].contains("argument required but none supplied"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut processor = processor();
        let _ = processor.process(r#"::plotly[/figs/a.json]{href="/a" height=400}"#);

        assert!(processor.nodes().is_empty());
        assert!(processor.warnings()[0].contains(r#"unknown option: "height""#));
    }

    #[test]
    fn test_url_with_whitespace_rejected() {
        let mut processor = processor();
        let _ = processor.process(r#"::plotly[/figs/my plot.json]{href="/a"}"#);

        assert!(processor.nodes().is_empty());
        assert!(processor.warnings()[0].contains("maximum 1 argument(s) allowed, 2 supplied"));
    }

    #[test]
    fn test_href_whitespace_removed() {
        let mut processor = processor();
        let _ = processor.process(r#"::plotly[a.json]{href="https://example.com/ reports/q3"}"#);

        let plot = processor.nodes()[0].as_plot().unwrap();
        assert_eq!(plot.href, "https://example.com/reports/q3");
    }

    #[test]
    fn test_id_and_classes_carried_over() {
        let mut processor = processor();
        let _ = processor.process("::plotly[a.json]{#sales .wide href=/a}");

        let plot = processor.nodes()[0].as_plot().unwrap();
        assert_eq!(plot.id.as_deref(), Some("sales"));
        assert_eq!(plot.classes, vec!["wide"]);
    }

    #[test]
    fn test_process_without_href_skips() {
        let mut plotly = PlotlyDirective::new();
        let output = plotly.process(DirectiveArgs::parse("a.json", ""), &ctx(1));
        assert_eq!(output, DirectiveOutput::Skip);
    }
}
