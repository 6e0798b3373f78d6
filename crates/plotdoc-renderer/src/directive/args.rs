//! Directive argument parsing.
//!
//! Splits the `[content]{#id .class key="value"}` tail of a directive into
//! its parts.

use std::collections::HashMap;

/// Parsed arguments from directive syntax.
///
/// # Example
///
/// ```
/// use plotdoc_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("/plots/q3.json", r#"#q3 .wide href="/reports/q3""#);
/// assert_eq!(args.arguments(), vec!["/plots/q3.json"]);
/// assert_eq!(args.id.as_deref(), Some("q3"));
/// assert_eq!(args.classes, vec!["wide"]);
/// assert_eq!(args.get("href"), Some("/reports/q3"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Raw text between the brackets (empty when absent).
    pub content: String,
    /// `#id` attribute.
    pub id: Option<String>,
    /// `.class` attributes, in order.
    pub classes: Vec<String>,
    /// `key=value` options. A repeated key keeps its first value.
    pub attrs: HashMap<String, String>,
    /// Option keys given more than once, in order of repetition.
    pub duplicate_attrs: Vec<String>,
}

impl DirectiveArgs {
    /// Build arguments from bracket content and the inside of the braces.
    #[must_use]
    pub fn parse(content: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Default::default()
        };

        let mut rest = attrs_str.trim();
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('#') {
                let (name, tail) = split_selector(after);
                args.id = Some(name.to_owned());
                rest = tail;
            } else if let Some(after) = rest.strip_prefix('.') {
                let (name, tail) = split_selector(after);
                args.classes.push(name.to_owned());
                rest = tail;
            } else if let Some((key, value, tail)) = parse_key_value(rest) {
                if args.attrs.contains_key(key) {
                    args.duplicate_attrs.push(key.to_owned());
                } else {
                    args.attrs.insert(key.to_owned(), value.to_owned());
                }
                rest = tail;
            } else {
                // Unrecognised character, skip it.
                let skip = rest.chars().next().map_or(1, char::len_utf8);
                rest = &rest[skip..];
            }
            rest = rest.trim_start();
        }

        args
    }

    /// Positional arguments: the bracket content split on whitespace.
    #[must_use]
    pub fn arguments(&self) -> Vec<&str> {
        self.content.split_whitespace().collect()
    }

    /// Look up an option value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Split an `#id` or `.class` name off the front of `s`.
fn split_selector(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Parse `key="value"`, `key='value'` or `key=value`.
///
/// Returns `(key, value, rest)`.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq = s.find('=')?;
    let key = s[..eq].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let value_part = &s[eq + 1..];
    for quote in ['"', '\''] {
        if let Some(quoted) = value_part.strip_prefix(quote) {
            let close = quoted.find(quote)?;
            return Some((key, &quoted[..close], &quoted[close + 1..]));
        }
    }

    let end = value_part
        .find(char::is_whitespace)
        .unwrap_or(value_part.len());
    Some((key, &value_part[..end], &value_part[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let args = DirectiveArgs::parse("", "");
        assert_eq!(args, DirectiveArgs::default());
        assert!(args.arguments().is_empty());
    }

    #[test]
    fn test_content_only() {
        let args = DirectiveArgs::parse("https://example.com/fig.json", "");
        assert_eq!(args.content, "https://example.com/fig.json");
        assert_eq!(args.arguments(), vec!["https://example.com/fig.json"]);
        assert!(args.attrs.is_empty());
    }

    #[test]
    fn test_arguments_split_on_whitespace() {
        let args = DirectiveArgs::parse("  a.json   b.json ", "");
        assert_eq!(args.arguments(), vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_id_and_classes() {
        let args = DirectiveArgs::parse("", "#sales .wide .dark");
        assert_eq!(args.id.as_deref(), Some("sales"));
        assert_eq!(args.classes, vec!["wide", "dark"]);
    }

    #[test]
    fn test_compact_selectors() {
        let args = DirectiveArgs::parse("", "#sales.wide.dark");
        assert_eq!(args.id.as_deref(), Some("sales"));
        assert_eq!(args.classes, vec!["wide", "dark"]);
    }

    #[test]
    fn test_quoted_values() {
        let args = DirectiveArgs::parse("", r#"href="https://example.com/a b" title='Q3 sales'"#);
        assert_eq!(args.get("href"), Some("https://example.com/a b"));
        assert_eq!(args.get("title"), Some("Q3 sales"));
    }

    #[test]
    fn test_unquoted_value() {
        let args = DirectiveArgs::parse("", "href=/reports/q3 width=600");
        assert_eq!(args.get("href"), Some("/reports/q3"));
        assert_eq!(args.get("width"), Some("600"));
    }

    #[test]
    fn test_value_containing_equals() {
        let args = DirectiveArgs::parse("", r#"href="/search?q=plots&page=2""#);
        assert_eq!(args.get("href"), Some("/search?q=plots&page=2"));
    }

    #[test]
    fn test_empty_quoted_value() {
        let args = DirectiveArgs::parse("", r#"href="""#);
        assert_eq!(args.get("href"), Some(""));
    }

    #[test]
    fn test_unclosed_quote_is_skipped() {
        let args = DirectiveArgs::parse("", r#"href="/open .x"#);
        assert_eq!(args.get("href"), None);
    }

    #[test]
    fn test_repeated_key_recorded() {
        let args = DirectiveArgs::parse("", "href=/a title=x href=/b");
        assert_eq!(args.get("href"), Some("/a"));
        assert_eq!(args.duplicate_attrs, vec!["href"]);
    }

    #[test]
    fn test_mixed() {
        let args = DirectiveArgs::parse("fig.json", r#"#f1 .wide href="/more" lang=en"#);
        assert_eq!(args.content, "fig.json");
        assert_eq!(args.id.as_deref(), Some("f1"));
        assert_eq!(args.classes, vec!["wide"]);
        assert_eq!(args.get("href"), Some("/more"));
        assert_eq!(args.get("lang"), Some("en"));
        assert_eq!(args.get("missing"), None);
    }
}
