//! Directive syntax parsing.
//!
//! Leaf directives occupy a whole line: `::name[content]{attrs}`, with up to
//! three spaces of indentation and optional trailing whitespace.

use super::DirectiveArgs;

/// A leaf directive found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLeaf {
    pub(crate) name: String,
    pub(crate) args: DirectiveArgs,
}

/// Parse a line as a leaf directive.
///
/// Returns `None` for anything else, including `:::` containers, names with
/// invalid characters and lines with text after the directive.
pub(crate) fn parse_leaf_line(line: &str) -> Option<ParsedLeaf> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }

    let body = line[indent..].strip_prefix("::")?;
    if body.starts_with(':') {
        return None;
    }

    let name_end = body
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(body.len());
    let name = &body[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let rest = &body[name_end..];
    let (content, rest) = take_delimited(rest, '[', ']', false)?;
    let (attrs, rest) = take_delimited(rest, '{', '}', true)?;
    if !rest.trim().is_empty() {
        return None;
    }

    Some(ParsedLeaf {
        name: name.to_owned(),
        args: DirectiveArgs::parse(content, attrs),
    })
}

/// Name of a line that opens like a leaf directive (`::name[` or `::name{`)
/// but does not parse as one.
pub(crate) fn malformed_leaf_name(line: &str) -> Option<&str> {
    if parse_leaf_line(line).is_some() {
        return None;
    }
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }
    let body = line[indent..].strip_prefix("::")?;
    let name_end = body.find(['[', '{'])?;
    let name = &body[..name_end];
    is_valid_directive_name(name).then_some(name)
}

/// Valid names are non-empty and contain only alphanumerics, `-` and `_`.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Take a balanced `open ... close` group from the start of `s`.
///
/// With `quoted`, a `"` or `'` directly after `=` opens a quoted value whose
/// contents are not counted. An absent group yields `("", s)`. An unbalanced
/// group yields `None`.
fn take_delimited(s: &str, open: char, close: char, quoted: bool) -> Option<(&str, &str)> {
    if !s.starts_with(open) {
        return Some(("", s));
    }

    let mut depth = 0usize;
    let mut quote = None;
    let mut prev = None;
    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
        } else if quoted && (c == '"' || c == '\'') && prev == Some('=') {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&s[open.len_utf8()..i], &s[i + close.len_utf8()..]));
            }
        }
        prev = Some(c);
    }
    None
}
