//! Directive validation errors.

/// Why a directive was rejected before its handler ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// Fewer positional arguments than the directive requires.
    #[error("{required} argument(s) required, {supplied} supplied")]
    MissingArguments { required: usize, supplied: usize },

    /// More positional arguments than the directive accepts.
    #[error("maximum {max} argument(s) allowed, {supplied} supplied")]
    TooManyArguments { max: usize, supplied: usize },

    /// An option the directive does not declare.
    #[error("unknown option: \"{0}\"")]
    UnknownOption(String),

    /// An option given more than once.
    #[error("duplicate option \"{0}\"")]
    DuplicateOption(String),

    /// A required option was not given.
    #[error("required option \"{0}\" missing")]
    MissingOption(String),

    /// An option value failed conversion.
    #[error("invalid option value: (option: \"{name}\"; value: '{value}') {reason}")]
    InvalidOption {
        name: String,
        value: String,
        reason: String,
    },
}
