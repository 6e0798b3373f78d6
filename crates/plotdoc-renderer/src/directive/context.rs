//! Directive processing context.

use std::path::Path;

use crate::node::SourcePosition;

/// Where the directive being processed lives.
///
/// Created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// directive it dispatches.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use plotdoc_renderer::directive::DirectiveContext;
///
/// let ctx = DirectiveContext {
///     source_path: Some(Path::new("docs/report.md")),
///     line: 12,
/// };
///
/// let position = ctx.source_and_line();
/// assert_eq!(position.source.as_deref(), Some(Path::new("docs/report.md")));
/// assert_eq!(position.line, 12);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DirectiveContext<'a> {
    /// Source file being rendered, if known.
    pub source_path: Option<&'a Path>,
    /// Line of the directive (1-indexed).
    pub line: usize,
}

impl DirectiveContext<'_> {
    /// Owned copy of the directive's location, for storing on a node.
    #[must_use]
    pub fn source_and_line(&self) -> SourcePosition {
        SourcePosition {
            source: self.source_path.map(Path::to_path_buf),
            line: self.line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_and_line_without_source() {
        let ctx = DirectiveContext {
            source_path: None,
            line: 4,
        };
        assert_eq!(
            ctx.source_and_line(),
            SourcePosition {
                source: None,
                line: 4
            }
        );
    }
}
