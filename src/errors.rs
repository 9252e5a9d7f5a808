//! Definition of errors.

use std::fmt;

/// A specialized Result type for the glossing pipeline.
pub type Result<T, E = GlosaError> = std::result::Result<T, E>;

/// The error type for the glossing pipeline.
///
/// Lookups that simply find nothing are not errors; they return `None` or an
/// empty gloss. These variants cover configuration mistakes, unreadable input
/// documents and failing external strategies.
#[derive(Debug, thiserror::Error)]
pub enum GlosaError {
    /// The error variant for [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`InvalidFormatError`].
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// An external fallback strategy failed.
    #[error("fallback strategy failed: {0}")]
    Fallback(String),

    /// The error variant for [`std::io::Error`].
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The error variant for [`serde_json::Error`].
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GlosaError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl std::error::Error for InvalidArgumentError {}

/// Error used when the input document is invalid.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Name of the format.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl std::error::Error for InvalidFormatError {}
