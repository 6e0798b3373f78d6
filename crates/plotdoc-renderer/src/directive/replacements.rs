//! Batched string replacement for post-processing.

/// Collects `(from, to)` pairs and applies them to rendered HTML in one go.
///
/// Placeholders are unique per node, so pairs never overlap and the order in
/// which they are applied does not matter.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::directive::Replacements;
///
/// let mut html = "<p>a</p>\n<plotdoc-node data-key=\"2a-0\" />\n".to_owned();
/// let mut replacements = Replacements::new();
/// replacements.add("<plotdoc-node data-key=\"2a-0\" />", "<div class=\"plotly\"></div>");
/// replacements.apply(&mut html);
///
/// assert_eq!(html, "<p>a</p>\n<div class=\"plotly\"></div>\n");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.items.push((from.into(), to.into()));
    }

    /// Apply all pairs, consuming the collector.
    pub fn apply(self, html: &mut String) {
        for (from, to) in self.items {
            if html.contains(&from) {
                *html = html.replace(&from, &to);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
