use std::time::Duration;

use shared::error::UnrecognizedResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to reach planning backend: {0}")]
    Network(#[source] reqwest::Error),
    #[error("planning backend returned {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("request dropped before the backend replied")]
    Cancelled,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unrecognized response: {0}")]
    Unrecognized(#[from] UnrecognizedResponse),
}

impl TurnError {
    pub fn kind(&self) -> &'static str {
        match self {
            TurnError::Transport(TransportError::Timeout(_)) => "timeout",
            TurnError::Transport(TransportError::Status { .. }) => "status",
            TurnError::Transport(TransportError::MalformedBody(_)) => "malformed_body",
            TurnError::Transport(TransportError::Cancelled) => "cancelled",
            TurnError::Transport(_) => "transport",
            TurnError::Unrecognized(_) => "unrecognized_response",
        }
    }
}
