//! HTML output for document nodes.
//!
//! Plots render as a `div.plotly` placeholder carrying the figure URL and
//! link target in `data-*` attributes. A small loader script, appended once
//! per document, fetches each figure and hands it to plotly.js.

use std::borrow::Cow;
use std::fmt::Write;

use crate::node::PlotNode;

/// plotly.js bundle loaded by default.
pub const DEFAULT_PLOTLY_SCRIPT_URL: &str = "https://cdn.plot.ly/plotly-2.16.3.min.js";

/// Loader for `div.plotly[data-url]` placeholders.
const PLOTLY_LOADER: &str = r"(function () {
  document.querySelectorAll('div.plotly[data-url]').forEach(function (el) {
    fetch(el.dataset.url)
      .then(function (r) {
        if (r.ok) return r.json();
        throw new Error(r.statusText);
      })
      .then(function (fig) {
        var config = Object.assign({}, fig.config || {}, { responsive: el.dataset.responsive === 'true' });
        return Plotly.newPlot(el, fig.data || [], fig.layout || {}, config);
      })
      .then(function (plot) {
        if (el.dataset.href) {
          plot.on('plotly_click', function () { window.location.href = el.dataset.href; });
        }
      })
      .catch(function (err) {
        console.error('plotly: failed to load ' + el.dataset.url + ': ' + err.message);
      });
  });
})();";

/// Options that control how nodes are rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// CSS width of plot containers.
    pub plot_width: String,
    /// Whether plots resize with their container.
    pub responsive: bool,
    /// plotly.js bundle URL.
    pub script_url: String,
    /// Append the plotly.js bundle and loader when a document has plots.
    pub include_script: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            plot_width: "100%".to_owned(),
            responsive: true,
            script_url: DEFAULT_PLOTLY_SCRIPT_URL.to_owned(),
            include_script: true,
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Render a plot placeholder with a `<noscript>` link fallback.
pub(crate) fn render_plot(plot: &PlotNode, options: &RenderOptions) -> String {
    let mut out = String::with_capacity(256);

    out.push_str(r#"<div class="plotly"#);
    for class in &plot.classes {
        out.push(' ');
        out.push_str(&escape_html(class));
    }
    out.push('"');

    if let Some(id) = &plot.id {
        let _ = write!(out, r#" id="{}""#, escape_html(id));
    }

    let url = escape_html(&plot.url);
    let href = escape_html(&plot.href);
    let _ = write!(
        out,
        r#" data-url="{url}" data-href="{href}" data-line="{}" data-responsive="{}" style="width: {}">"#,
        plot.position.line,
        options.responsive,
        escape_html(&options.plot_width),
    );
    let _ = write!(
        out,
        r#"<noscript><a href="{href}">{url}</a></noscript></div>"#
    );

    out
}

/// Script tags that load plotly.js and initialise every plot on the page.
pub(crate) fn plotly_scripts(options: &RenderOptions) -> String {
    format!(
        "<script src=\"{}\"></script>\n<script>\n{PLOTLY_LOADER}\n</script>\n",
        escape_html(&options.script_url)
    )
}
