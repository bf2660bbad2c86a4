//! Error types for checker operations

use std::fmt;

/// Result type alias for checker operations
pub type CheckerResult<T> = Result<T, CheckerError>;

/// Errors that can occur when mutating or querying the checker registry
///
/// Failures during a poll are never surfaced here; they travel through the
/// result stream as [`CheckOutcome::Failure`](crate::CheckOutcome).
#[derive(Debug)]
pub enum CheckerError {
    /// The input could not be parsed as an absolute URL with scheme and host
    InvalidUrl(String),

    /// The poll interval must be strictly positive
    InvalidInterval,

    /// A monitor is already registered under this canonical URL
    AlreadyWatched(String),

    /// No monitor is registered under the given URL
    NotFound(String),

    /// The monitor's command channel is closed (its task is no longer running)
    SiteGone(String),
}

impl fmt::Display for CheckerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckerError::InvalidUrl(msg) => {
                write!(f, "not an absolute URL with scheme and host: {}", msg)
            }
            CheckerError::InvalidInterval => write!(f, "poll interval must be non-zero"),
            CheckerError::AlreadyWatched(url) => write!(f, "already watching {}", url),
            CheckerError::NotFound(url) => write!(f, "not watching {}", url),
            CheckerError::SiteGone(url) => write!(f, "monitor for {} is gone", url),
        }
    }
}

impl std::error::Error for CheckerError {}
