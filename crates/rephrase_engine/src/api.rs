use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Response;

use crate::stream::wire_events;
use crate::wire::{CancelRequest, ProcessRequest};
use crate::{ApiError, CancelAck, ClientSettings, JobCreated, WireEventStream};

/// Calls made against the rephrase backend.
#[async_trait::async_trait]
pub trait RephraseApi: Send + Sync {
    /// `POST /process`; returns the issued session id.
    async fn start_job(&self, text: &str) -> Result<String, ApiError>;

    /// `POST /cancel`; returns whatever status the backend acknowledged with.
    async fn cancel_job(&self, session_id: &str) -> Result<CancelAck, ApiError>;

    /// `GET /stream?session=<id>` as a stream of decoded events.
    async fn open_stream(&self, session_id: &str) -> Result<WireEventStream, ApiError>;

    /// `GET /health`.
    async fn check_health(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        // No overall timeout on the client: the event stream is long-lived.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl RephraseApi for ReqwestApi {
    async fn start_job(&self, text: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.settings.endpoint("process")?)
            .timeout(self.settings.request_timeout)
            .json(&ProcessRequest { text })
            .send()
            .await?;
        let created: JobCreated = ensure_success(response)?.json().await?;
        Ok(created.session_id)
    }

    async fn cancel_job(&self, session_id: &str) -> Result<CancelAck, ApiError> {
        let response = self
            .client
            .post(self.settings.endpoint("cancel")?)
            .timeout(self.settings.request_timeout)
            .json(&CancelRequest { session_id })
            .send()
            .await?;
        let body = ensure_success(response)?.bytes().await?;
        // The acknowledgement is informational; an unexpected body is not a failure.
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }

    async fn open_stream(&self, session_id: &str) -> Result<WireEventStream, ApiError> {
        let mut url = self.settings.endpoint("stream")?;
        url.query_pairs_mut().append_pair("session", session_id);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let response = ensure_success(response)?;
        Ok(wire_events(response.bytes_stream()))
    }

    async fn check_health(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.settings.endpoint("health")?)
            .timeout(self.settings.request_timeout)
            .send()
            .await?;
        ensure_success(response).map(|_| ())
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::HttpStatus(status.as_u16()))
    }
}
