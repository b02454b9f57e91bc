use std::fmt;

/// Errors surfaced by engine-level geometry and GPU resource construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied parameter is outside the accepted domain.
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    /// The graphics backend (surface, adapter or device) could not be obtained.
    ///
    /// Reported once at initialization. Not recoverable by the engine.
    BackendUnavailable(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter { name, message: message.into() }
    }

    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::BackendUnavailable(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter `{name}`: {message}")
            }
            Error::BackendUnavailable(message) => {
                write!(f, "graphics backend unavailable: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}
