//! Typed access to option values.
//!
//! Option values are free text. The few values this crate interprets are
//! parsed leniently: a bad value is reported through [`OptionValueError`],
//! which callers log before falling back to a default.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionValueError {
    #[error("error parsing `{key}` as integer: {source}")]
    Integer {
        key: String,
        #[source]
        source: ParseIntError,
    },
    #[error("error parsing `{key}` as boolean: invalid value {value:?}")]
    Boolean { key: String, value: String },
}

/// Parse a boolean the way linuxptp tooling writes them.
pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool, OptionValueError> {
    match value.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(OptionValueError::Boolean {
            key: key.to_owned(),
            value: other.to_owned(),
        }),
    }
}

pub(crate) fn parse_int(key: &str, value: &str) -> Result<i32, OptionValueError> {
    value
        .trim()
        .parse()
        .map_err(|source| OptionValueError::Integer {
            key: key.to_owned(),
            source,
        })
}
