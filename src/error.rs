use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("rugcheck returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed report: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Report data that cannot be scored or rendered.
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("report has no top holders")]
    NoHolders,

    #[error("report has no markets")]
    NoMarkets,

    #[error("invalid detectedAt timestamp: {0}")]
    InvalidTimestamp(String),
}
