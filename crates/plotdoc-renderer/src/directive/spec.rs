//! Argument and option declarations for directives.
//!
//! A handler describes what it accepts with a [`DirectiveSpec`]. The
//! processor checks each directive against it and converts option values
//! before the handler sees them, so handlers never validate their own input.

use super::{DirectiveArgs, DirectiveError};

/// How an option value is converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// URI reference. Unescaped whitespace is removed, `\ ` becomes a space.
    /// An empty value is rejected.
    Uri,
    /// Passed through as written.
    Unchanged,
}

impl OptionKind {
    /// Convert a raw option value.
    ///
    /// # Example
    ///
    /// ```
    /// use plotdoc_renderer::directive::OptionKind;
    ///
    /// assert_eq!(
    ///     OptionKind::Uri.convert("https://example.com/ long/path").unwrap(),
    ///     "https://example.com/long/path"
    /// );
    /// assert!(OptionKind::Uri.convert("").is_err());
    /// ```
    pub fn convert(self, value: &str) -> Result<String, String> {
        match self {
            Self::Uri => convert_uri(value),
            Self::Unchanged => Ok(value.to_owned()),
        }
    }
}

fn convert_uri(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("argument required but none supplied".to_owned());
    }

    let mut uri = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) if next.is_whitespace() => uri.push(' '),
                Some(next) => uri.push(next),
                None => {}
            },
            c if c.is_whitespace() => {}
            c => uri.push(c),
        }
    }
    Ok(uri)
}

/// A declared option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

impl OptionSpec {
    /// An option that must be present.
    #[must_use]
    pub const fn required(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// An option that may be omitted.
    #[must_use]
    pub const fn optional(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// What a directive accepts.
///
/// Positional arguments are the whitespace-separated words of the bracket
/// content. `#id` and `.class` attributes are always allowed.
///
/// The default accepts anything: any number of arguments and any option,
/// unconverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveSpec {
    pub required_arguments: usize,
    pub optional_arguments: usize,
    /// Allow the last argument to contain whitespace, lifting the maximum.
    pub final_argument_whitespace: bool,
    /// Declared options. `None` accepts any option as written.
    pub options: Option<&'static [OptionSpec]>,
}

impl Default for DirectiveSpec {
    fn default() -> Self {
        Self {
            required_arguments: 0,
            optional_arguments: 0,
            final_argument_whitespace: true,
            options: None,
        }
    }
}

impl DirectiveSpec {
    /// Check `args` and convert its option values.
    ///
    /// # Errors
    ///
    /// Returns the first [`DirectiveError`] found. Arguments are checked
    /// before options. Repeated options are rejected even by the default
    /// spec; unknown options are reported before missing ones.
    pub fn validate(&self, mut args: DirectiveArgs) -> Result<DirectiveArgs, DirectiveError> {
        let supplied = args.arguments().len();
        if supplied < self.required_arguments {
            return Err(DirectiveError::MissingArguments {
                required: self.required_arguments,
                supplied,
            });
        }
        let max = self.required_arguments + self.optional_arguments;
        if supplied > max && !self.final_argument_whitespace {
            return Err(DirectiveError::TooManyArguments { max, supplied });
        }

        if let Some(name) = args.duplicate_attrs.first() {
            return Err(DirectiveError::DuplicateOption(name.clone()));
        }

        let Some(options) = self.options else {
            return Ok(args);
        };

        let mut names: Vec<&String> = args.attrs.keys().collect();
        names.sort();
        if let Some(unknown) = names
            .into_iter()
            .find(|name| !options.iter().any(|o| o.name == name.as_str()))
        {
            return Err(DirectiveError::UnknownOption(unknown.clone()));
        }

        for option in options {
            match args.attrs.get_mut(option.name) {
                Some(value) => match option.kind.convert(value) {
                    Ok(converted) => *value = converted,
                    Err(reason) => {
                        return Err(DirectiveError::InvalidOption {
                            name: option.name.to_owned(),
                            value: value.clone(),
                            reason,
                        });
                    }
                },
                None if option.required => {
                    return Err(DirectiveError::MissingOption(option.name.to_owned()));
                }
                None => {}
            }
        }

        Ok(args)
    }
}
