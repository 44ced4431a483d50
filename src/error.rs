// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for dawgscan
//!
//! Scan-level failures carry enough context (URL, status) for the caller to
//! render a user-visible message. Evidence collection failures are degraded to
//! empty evidence by the aggregator and never reach the report as errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dawgscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dawgscan
#[derive(Error, Debug)]
pub enum Error {
    /// No page or URL could be resolved for the scan
    #[error("Target unavailable: {0}")]
    TargetUnavailable(String),

    /// Header fetch returned a non-success status or failed in transport
    #[error("Failed to fetch headers from {url}: {reason}")]
    FetchFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Client marker or cookie collection failed
    #[error("Evidence collection failed ({source_name}): {reason}")]
    EvidenceCollection { source_name: String, reason: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Preference store error
    #[error("Preference error: {0}")]
    Preference(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a target-unavailable error
    pub fn target_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::TargetUnavailable(msg.into())
    }

    /// Create a fetch failure with full context
    pub fn fetch_failed(
        url: impl Into<String>,
        status: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        Error::FetchFailed {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create an evidence collection error
    pub fn evidence(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::EvidenceCollection {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a header fetch failure
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::FetchFailed { .. } | Error::Http(_))
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::FetchFailed { status: Some(s), .. } => (400..500).contains(s),
            _ => false,
        }
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::FetchFailed { status: Some(s), .. } => (500..600).contains(s),
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::FetchFailed { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::FetchFailed { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for attaching the fetched URL to errors
pub trait ErrorContext<T> {
    /// Turn an HTTP failure into a fetch failure for `url`
    fn with_url(self, url: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_url(self, url: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            Error::FetchFailed { status, reason, .. } => Error::FetchFailed {
                url: url.to_string(),
                status,
                reason,
            },
            Error::Http(err) => Error::FetchFailed {
                url: url.to_string(),
                status: err.status().map(|s| s.as_u16()),
                reason: err.to_string(),
            },
            other => other,
        })
    }
}

/// Kind of scan-level error recorded in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanErrorKind {
    TargetUnavailable,
    FetchFailed,
}

/// Scan-level error as carried by a [`crate::ScanReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ScanError {
    /// Build the report-side view of an error
    pub fn from_error(err: &Error) -> Self {
        let kind = match err {
            Error::TargetUnavailable(_) => ScanErrorKind::TargetUnavailable,
            _ => ScanErrorKind::FetchFailed,
        };
        Self {
            kind,
            message: err.to_string(),
            status: err.status_code(),
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        self.kind == ScanErrorKind::FetchFailed
    }
}
