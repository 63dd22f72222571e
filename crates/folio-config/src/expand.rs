//! Environment variable expansion for configuration values.
//!
//! Supports `${VAR}` (error if unset) and `${VAR:-default}` (fallback) syntax.

use crate::ConfigError;

/// Expand environment variable references in a configuration string.
///
/// `field` names the config field being expanded and is included in error
/// messages so the user can locate the offending value.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::env_with_context(value, |var: &str| {
        // shellexpand does not implement the ":-" default syntax itself, so
        // split it out of the variable name here
        if let Some((name, default)) = var.split_once(":-") {
            match std::env::var(name) {
                Ok(v) => Ok(Some(v)),
                Err(std::env::VarError::NotPresent) => Ok(Some(default.to_owned())),
                Err(e) => Err(e),
            }
        } else {
            std::env::var(var).map(Some)
        }
    })
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} {}", err.var_name, err.cause),
    })?;

    Ok(expanded.into_owned())
}
