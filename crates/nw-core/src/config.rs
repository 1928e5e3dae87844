//! Helpers for reading configuration from the environment

use std::env;
use std::str::FromStr;

use crate::{Error, Result};

/// Read `var`, falling back to `default` when it is unset or empty
pub fn env_or(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read a required variable
pub fn env_required(var: &str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!(
            "{} environment variable not found",
            var
        ))),
    }
}

/// Parse `var` into `T`, falling back to `default` when unset.
///
/// A value that is present but does not parse is a configuration error.
pub fn env_parse<T: FromStr>(var: &str, default: T) -> Result<T> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value.trim().parse().map_err(|_| {
            Error::Configuration(format!("{} has an invalid value: {}", var, value))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; tests run in parallel.

    #[test]
    fn test_env_parse_default_and_value() {
        assert_eq!(env_parse("NW_TEST_UNSET_NUMBER", 7usize).unwrap(), 7);

        unsafe { env::set_var("NW_TEST_SET_NUMBER", " 42 ") };
        assert_eq!(env_parse("NW_TEST_SET_NUMBER", 7usize).unwrap(), 42);
    }

    #[test]
    fn test_env_parse_invalid() {
        unsafe { env::set_var("NW_TEST_BAD_NUMBER", "lots") };
        let err = env_parse("NW_TEST_BAD_NUMBER", 1u32).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_env_required() {
        assert!(env_required("NW_TEST_MISSING_KEY").is_err());
        unsafe { env::set_var("NW_TEST_PRESENT_KEY", "sk-test") };
        assert_eq!(env_required("NW_TEST_PRESENT_KEY").unwrap(), "sk-test");
        assert_eq!(env_or("NW_TEST_MISSING_URL", "https://example.com"), "https://example.com");
    }
}
