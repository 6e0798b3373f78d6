//! Environment variable expansion for config values.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_env("100%", "plotly.width").unwrap(), "100%");
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_env("${PLOTDOC_EXPAND_TEST_UNSET:-640px}", "plotly.width").unwrap(),
            "640px"
        );
    }

    #[test]
    fn test_unset_variable_errors() {
        let err = expand_env("${PLOTDOC_EXPAND_TEST_MISSING}", "plotly.script_url").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in plotly.script_url: ${PLOTDOC_EXPAND_TEST_MISSING} not set"
        );
    }
}
