//! Application-wide error types.
//!
//! The failure taxonomy is deliberately coarse and mirrors how the batch
//! tools react to each class:
//!
//! - **Fatal**: an API is unreachable, the output directory cannot be
//!   created or written, or configuration is unusable. The run aborts with
//!   a non-zero exit and produces no further files.
//! - **Per-record**: a single entity is malformed or one API call for it
//!   failed. The record is logged and skipped; the batch continues.
//!
//! [`AppError::is_fatal`] is the single place that encodes this split.

use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

use crate::compose::ComposeError;
use crate::domain::entities::RecordError;

#[derive(Debug, Error)]
pub enum AppError {
    /// An API could not be reached at all (connect failure, timeout).
    #[error("{api} API unreachable at {url}: {reason}")]
    Connectivity {
        api: &'static str,
        url: String,
        reason: String,
    },

    /// An API answered one call with a non-success status.
    #[error("{api} API returned {status} for {method} {url}")]
    ApiStatus {
        api: &'static str,
        method: &'static str,
        url: String,
        status: u16,
    },

    /// An API answered, but the body did not parse as expected.
    #[error("{api} API returned an unreadable body for {url}: {reason}")]
    ApiBody {
        api: &'static str,
        url: String,
        reason: String,
    },

    /// A record failed field validation.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Output directory or file could not be created/written.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF backend rejected a document.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The payload did not fit into a QR symbol.
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// A QR payload failed to serialize.
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// An outbound message could not be handed to the relay.
    #[error("email delivery to {recipient} failed: {reason}")]
    Email { recipient: String, reason: String },

    /// Unusable runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The record set resolved to nothing; there is no work to do.
    #[error("nothing to generate: {0}")]
    Empty(String),
}

impl AppError {
    pub fn connectivity(api: &'static str, url: impl Into<String>, reason: impl Display) -> Self {
        Self::Connectivity {
            api,
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn api_status(
        api: &'static str,
        method: &'static str,
        url: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::ApiStatus {
            api,
            method,
            url: url.into(),
            status,
        }
    }

    pub fn api_body(api: &'static str, url: impl Into<String>, reason: impl Display) -> Self {
        Self::ApiBody {
            api,
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn email(recipient: impl Into<String>, reason: impl Display) -> Self {
        Self::Email {
            recipient: recipient.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::Empty(message.into())
    }

    /// Whether this error aborts the whole batch instead of skipping one record.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Connectivity { .. } | Self::Filesystem { .. } | Self::Config(_) | Self::Empty(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_and_filesystem_are_fatal() {
        let conn = AppError::connectivity("main", "http://localhost:8000", "connection refused");
        assert!(conn.is_fatal());

        let fs = AppError::filesystem(
            "holecards",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(fs.is_fatal());

        assert!(AppError::config("bad url").is_fatal());
    }

    #[test]
    fn record_level_errors_are_not_fatal() {
        let status = AppError::api_status("tournament", "POST", "http://x/generate-hole-card", 422);
        assert!(!status.is_fatal());

        let record = AppError::Record(RecordError::MissingField {
            entity: "hole",
            field: "name",
        });
        assert!(!record.is_fatal());
    }

    #[test]
    fn display_names_the_api_and_call() {
        let err = AppError::api_status("main", "GET", "http://localhost:8000/courses", 500);
        assert_eq!(
            err.to_string(),
            "main API returned 500 for GET http://localhost:8000/courses"
        );
    }
}
