use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type BookResult<T> = Result<T, BookError>;

/// Every failure the generation pipeline can surface.
///
/// Nothing in the crate recovers from these; they travel unchanged from the
/// stage that raised them to whoever called the pipeline.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Model invocation failed for {provider}: {message}")]
    ModelInvocation {
        provider: &'static str,
        message: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to build EPUB: {0}")]
    Epub(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    ModelInvocation,
    Io,
    InvalidArgument,
    Epub,
    Config,
}

impl BookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::Authentication { .. } => ErrorKind::Authentication,
            BookError::ModelInvocation { .. } => ErrorKind::ModelInvocation,
            BookError::Io { .. } => ErrorKind::Io,
            BookError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BookError::Epub(_) => ErrorKind::Epub,
            BookError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BookError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invocation(provider: &'static str, message: impl ToString) -> Self {
        BookError::ModelInvocation {
            provider,
            message: message.to_string(),
        }
    }

    pub(crate) fn authentication(provider: &'static str, message: impl ToString) -> Self {
        BookError::Authentication {
            provider,
            message: message.to_string(),
        }
    }
}
