//! Leaf directive trait.
//!
//! Leaf directives use double-colon syntax on a line of their own:
//! `::name[content]{attrs}`

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveSpec};

/// Handler for leaf directives: `::name[content]{attrs}`
///
/// # Validation
///
/// The processor checks every directive against [`spec`](Self::spec) before
/// calling [`process`](Self::process). Rejected directives never reach the
/// handler, so `process` can rely on required arguments and options being
/// present and converted.
///
/// # Thread Safety
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its own
/// processor instance.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveSpec, LeafDirective,
///     OptionKind, OptionSpec,
/// };
///
/// struct YoutubeDirective;
///
/// impl LeafDirective for YoutubeDirective {
///     fn name(&self) -> &str { "youtube" }
///
///     fn spec(&self) -> DirectiveSpec {
///         const OPTIONS: &[OptionSpec] = &[OptionSpec::optional("width", OptionKind::Unchanged)];
///         DirectiveSpec {
///             required_arguments: 1,
///             optional_arguments: 0,
///             final_argument_whitespace: false,
///             options: Some(OPTIONS),
///         }
///     }
///
///     fn process(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         let width = args.get("width").unwrap_or("560");
///         DirectiveOutput::html(format!(
///             r#"<iframe src="https://www.youtube.com/embed/{}" width="{width}"></iframe>"#,
///             args.content
///         ))
///     }
/// }
/// ```
pub trait LeafDirective: Send {
    /// Directive name, matched against `::name[...]`.
    fn name(&self) -> &str;

    /// Arguments and options this directive accepts.
    ///
    /// The default accepts anything.
    fn spec(&self) -> DirectiveSpec {
        DirectiveSpec::default()
    }

    /// Process a validated directive.
    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;

    /// Warnings collected while processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}
