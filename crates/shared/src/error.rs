use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error body returned by the planning backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub detail: Value,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Value::String(detail.into()),
        }
    }

    /// Human readable detail. Structured details (e.g. validation error
    /// lists) are rendered as compact JSON.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A successful reply whose discriminant the client does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnrecognizedResponse {
    #[error("response carried no status field")]
    MissingStatus,
    #[error("unknown response status '{0}'")]
    UnknownStatus(String),
    #[error("plan_generated response did not carry a plan object")]
    MissingPlan,
}
