//! Error taxonomy of the harvesting pipeline.
//!
//! Errors are grouped by how far they propagate:
//!
//! - [`HarvestError::Auth`] and [`HarvestError::MissingEnv`] are fatal. No stage
//!   can run without a bearer credential, so the whole run stops.
//! - [`HarvestError::Resolution`] and [`HarvestError::Fetch`] are recovered at the
//!   year boundary. The year is logged and skipped.
//! - [`SinkError`] is recovered per delivery unit. Remaining batches of the
//!   same year are still attempted.
//!
//! Items with missing required fields never become errors; the normalizer
//! filters them out.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Token issuance or refresh failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Required environment input is absent.
    #[error("environment variable {0} must be set")]
    MissingEnv(&'static str),

    /// The provider returned no collection for the year.
    #[error("no collection found for year {0}")]
    Resolution(i32),

    /// Any HTTP failure below the year boundary.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The run was cancelled while this operation was pending.
    #[error("operation cancelled")]
    Cancelled,
}

impl HarvestError {
    /// Whether this error must abort the whole run instead of a single year.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            HarvestError::Auth(_) | HarvestError::MissingEnv(_) | HarvestError::Cancelled
        )
    }
}

impl From<reqwest::Error> for HarvestError {
    fn from(err: reqwest::Error) -> Self {
        HarvestError::Fetch(err.to_string())
    }
}

/// Failure of one delivery attempt.
///
/// The local copy and the remote push are independent, so both halves may
/// fail at once; [`SinkError::Both`] keeps both causes.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write local copy {path}: {source}")]
    Local {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ingestion endpoint answered {code}: {body}")]
    Status { code: u16, body: String },

    #[error("ingestion request failed: {0}")]
    Transport(String),

    #[error("{local}; {remote}")]
    Both {
        local: Box<SinkError>,
        remote: Box<SinkError>,
    },
}

impl SinkError {
    /// HTTP status code returned by the ingestion endpoint, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SinkError::Status { code, .. } => Some(*code),
            SinkError::Both { remote, .. } => remote.status_code(),
            _ => None,
        }
    }
}
