//! Error types for the ESPN core API client.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch {url} (Status: {})", .status.as_u16())]
    Status { url: String, status: StatusCode },
    #[error("Error fetching {url} - {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Error fetching {url} - {source}")]
    Decode {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}

impl FetchError {
    /// HTTP status of the failed response, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::Decode { .. } => None,
        }
    }
}
