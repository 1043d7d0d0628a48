//! Environment variable expansion for configuration strings.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` is left alone. An unset variable without a default is an error
/// naming the config field it appeared in.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: match e.cause {
                VarError::NotPresent => format!("${{{}}} not set", e.var_name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
            },
        })
}

/// Expand an optional field in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}
