use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{SessionId, Turn},
    error::ApiError,
    protocol::{ProcessRequest, ServerResponse},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::TransportError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PROCESS_PATH: &str = "process";

/// The single request the client makes: one user turn plus the history that
/// led to it.
#[async_trait]
pub trait PlanTransport: Send + Sync {
    async fn send(
        &self,
        session_id: &SessionId,
        user_input: &str,
        history: &[Turn],
    ) -> Result<ServerResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    process_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, TransportError> {
        let process_url = process_url(api_base)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::ClientBuild)?;
        Ok(Self {
            http,
            process_url,
            timeout,
        })
    }

    pub fn process_url(&self) -> &Url {
        &self.process_url
    }

    fn map_request_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(err)
        }
    }
}

#[async_trait]
impl PlanTransport for HttpTransport {
    async fn send(
        &self,
        session_id: &SessionId,
        user_input: &str,
        history: &[Turn],
    ) -> Result<ServerResponse, TransportError> {
        let payload = ProcessRequest {
            session_id: session_id.clone(),
            user_input: user_input.to_string(),
            history: history.to_vec(),
        };
        debug!(
            session_id = %session_id,
            history_len = history.len(),
            url = %self.process_url,
            "dispatching turn"
        );

        let res = self
            .http
            .post(self.process_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| self.map_request_error(err))?;
        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|err| self.map_request_error(err))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ApiError>(&body)
                .ok()
                .and_then(|err| err.message());
            warn!(
                session_id = %session_id,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "planning backend rejected turn"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice::<ServerResponse>(&body)
            .map_err(|err| TransportError::MalformedBody(err.to_string()))
    }
}

fn process_url(api_base: &str) -> Result<Url, TransportError> {
    let invalid = |source| TransportError::InvalidBaseUrl {
        url: api_base.to_string(),
        source,
    };
    let base = api_base.trim().trim_end_matches('/');
    Url::parse(&format!("{base}/"))
        .and_then(|base| base.join(PROCESS_PATH))
        .map_err(invalid)
}
