pub mod actors;
pub mod checker;
pub mod config;
pub mod error;

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use url::Url;

/// Transport-level view of a completed response, retained after the body has
/// been consumed.
#[derive(Debug, Clone)]
pub struct CheckResponse {
    /// Status code of the final hop
    pub status: StatusCode,

    /// Response headers of the final hop
    pub headers: HeaderMap,

    /// URL the response actually came from, after following redirects
    pub final_url: Url,
}

/// Outcome of a single poll cycle
///
/// A cycle either produces a response with a fully read body, or it fails
/// before a usable response was obtained. There is no third state.
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    /// The request completed and the full body was read
    Success {
        response: CheckResponse,
        body: Bytes,
    },

    /// The request failed (DNS, connect, timeout, redirect bound, body read)
    Failure { error: String },
}

/// One poll's outcome, emitted on the checker's shared result stream
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The polled site, in canonical form
    pub url: String,

    /// Success or failure of this cycle
    pub outcome: CheckOutcome,

    /// Instant the request was initiated
    pub timestamp: DateTime<Utc>,

    /// Time from request start until response headers arrived
    pub connecting: Duration,

    /// Time from response headers until the body was fully read
    pub receiving: Duration,
}

impl CheckResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Success { .. })
    }

    /// The transport-level response, if this cycle produced one
    pub fn response(&self) -> Option<&CheckResponse> {
        match &self.outcome {
            CheckOutcome::Success { response, .. } => Some(response),
            CheckOutcome::Failure { .. } => None,
        }
    }

    /// The raw body bytes, if this cycle produced a response
    pub fn body(&self) -> Option<&Bytes> {
        match &self.outcome {
            CheckOutcome::Success { body, .. } => Some(body),
            CheckOutcome::Failure { .. } => None,
        }
    }

    /// The failure description, if this cycle failed
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::Success { .. } => None,
            CheckOutcome::Failure { error } => Some(error),
        }
    }
}
