//! Pluggable directives API for `CommonMark` directive syntax.
//!
//! Directives are block-level leaf directives on a line of their own:
//! `::name[argument]{#id .class key="value"}`.
//!
//! # Architecture
//!
//! Processing happens in two phases around pulldown-cmark:
//!
//! 1. **Preprocessing** ([`DirectiveProcessor::process`]): each directive is
//!    validated against its handler's [`DirectiveSpec`], then dispatched.
//!    Handlers return HTML, a [`DocumentNode`](crate::DocumentNode), or skip.
//!    Nodes are kept in the processor's document tree and stand in the text
//!    as placeholder elements that pass through pulldown-cmark unchanged.
//!
//! 2. **Post-processing** ([`DirectiveProcessor::post_process`]): placeholders
//!    are swapped for the nodes' HTML using [`Replacements`].
//!
//! Directives that fail validation are left as written and reported through
//! [`DirectiveProcessor::warnings`]; their handler is never called. Unknown
//! names and lines that open like a directive but do not parse are reported
//! the same way.
//!
//! # Registry
//!
//! Handlers are registered process-wide with [`register_directive`];
//! [`DirectiveProcessor::with_registered`] gives each document fresh
//! instances, each answering to the name it was registered under. `plotly`
//! is always registered.
//!
//! # Example
//!
//! ```
//! use plotdoc_renderer::directive::DirectiveProcessor;
//!
//! let mut processor = DirectiveProcessor::new().with_registered();
//! let _ = processor.process("::plotly[/figs/a.json]\n");
//!
//! assert!(processor.nodes().is_empty());
//! assert_eq!(
//!     processor.warnings(),
//!     vec![r#"line 1: error in "plotly" directive: required option "href" missing"#]
//! );
//! ```

mod args;
mod context;
mod error;
mod leaf;
mod output;
mod parser;
mod processor;
mod registry;
mod replacements;
mod spec;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use error::DirectiveError;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;
pub use processor::{DirectiveProcessor, DirectiveProcessorConfig};
pub use registry::{
    DirectiveFactory, directive_factory, register_directive, registered_directives,
};
pub use replacements::Replacements;
pub use spec::{DirectiveSpec, OptionKind, OptionSpec};
