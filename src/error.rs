//! Library error types.

use thiserror::Error;

/// Errors raised when configuring the process-wide locale list.
///
/// The field lifecycle hooks themselves introduce no error taxonomy: absent
/// values resolve to JSON null and unparseable payloads fall back to the raw
/// value, so only configuration can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("invalid locale code '{0}'")]
    InvalidCode(String),

    #[error("duplicate locale code '{0}'")]
    Duplicate(String),

    #[error("locale list must not be empty")]
    Empty,
}
