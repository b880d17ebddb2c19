use serde::Serialize;
use thiserror::Error;

/// Why one stage of the fetch chain could not produce records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No spreadsheet key in the environment and the key endpoint gave none.
    #[error("spreadsheet API key is missing")]
    MissingCredential,

    /// The source answered with a non-success status or could not be reached.
    #[error("{source_name} unavailable: {reason}")]
    SourceUnavailable {
        source_name: &'static str,
        reason: String,
    },

    /// The payload arrived but is empty, short, or not in the expected shape.
    #[error("{source_name} returned malformed data: {reason}")]
    MalformedSource {
        source_name: &'static str,
        reason: String,
    },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    MissingCredential,
    SourceUnavailable,
    MalformedSource,
}

impl SourceError {
    /// Collapse the error into one of the three kinds reported to callers.
    ///
    /// Transport failures and bad URLs both mean the source could not be read.
    #[must_use]
    pub fn kind(&self) -> SourceErrorKind {
        match self {
            Self::MissingCredential => SourceErrorKind::MissingCredential,
            Self::MalformedSource { .. } => SourceErrorKind::MalformedSource,
            Self::SourceUnavailable { .. } | Self::Http(_) | Self::InvalidUrl { .. } => {
                SourceErrorKind::SourceUnavailable
            }
        }
    }
}
