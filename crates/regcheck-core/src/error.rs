//! Error types for regcheck-core

use std::borrow::Cow;
use thiserror::Error;

/// Result type alias for regcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for regcheck operations
///
/// An unrelated pull request is not an error; it surfaces as
/// [`RunOutcome::Skipped`](crate::types::RunOutcome::Skipped).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// GitHub event payload could not be read or parsed
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// The head branch does not name a registration issue
    #[error("cannot resolve linked issue: {0}")]
    IssueNotResolved(String),

    /// The linked issue does not exist in the repository
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    /// HTTP/API error
    #[error("HTTP error: {0}")]
    Http(String),

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the URL, never the Authorization header
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::EventParse(err.to_string())
    }
}

/// Fieldless error category for zero-cost pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// GitHub event parsing error
    EventParse,
    /// Linked issue could not be resolved from the branch
    IssueNotResolved,
    /// Linked issue missing
    IssueNotFound,
    /// HTTP/API error
    Http,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// I/O operation error
    Io,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind without allocating.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::IssueNotResolved(_) => ErrorKind::IssueNotResolved,
            Error::IssueNotFound(_) => ErrorKind::IssueNotFound,
            Error::Http(_) => ErrorKind::Http,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Io(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Error message without the category prefix.
    ///
    /// Borrowed for every variant except [`Error::Io`], whose source error is
    /// rendered.
    #[inline]
    pub fn message(&self) -> Cow<'_, str> {
        match self {
            Error::Config(msg)
            | Error::EventParse(msg)
            | Error::IssueNotResolved(msg)
            | Error::IssueNotFound(msg)
            | Error::Http(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Other(msg) => Cow::Borrowed(msg),
            Error::Io(err) => Cow::Owned(err.to_string()),
        }
    }
}
