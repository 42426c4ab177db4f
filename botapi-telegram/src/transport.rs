//! HTTP transport: performs the network call and reports the raw body or a
//! [`TransportError`]. No retries, no interpretation of the body.

use std::time::Duration;

use async_trait::async_trait;
use botapi_core::{FilePayload, TransportError};
use reqwest::{multipart, Client, Response, Url};
use tracing::debug;

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json` body.
    Json(serde_json::Value),
    /// `multipart/form-data` with one octet-stream part named by media kind.
    Multipart(FilePayload),
}

/// Network boundary of the client. Implementations must be safe for concurrent use.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`; 2xx yields the body (possibly empty).
    async fn execute_get(&self, url: Url) -> Result<String, TransportError>;

    /// POST `body` to `url`; 2xx yields the body (possibly empty).
    async fn execute_post(&self, url: Url, body: RequestBody) -> Result<String, TransportError>;

    /// GET `url` and return the raw bytes; used to download files for upload.
    async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>, TransportError>;
}

/// [`Transport`] over a pooled reqwest client. Clones share the pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client with an optional per-request timeout.
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// Wraps an existing client (shared pool, custom TLS, proxies).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Builds the multipart form for a file upload.
pub fn multipart_form(payload: FilePayload) -> Result<multipart::Form, TransportError> {
    let field = payload.media_kind.form_field().ok_or_else(|| {
        TransportError::Request(format!("no form field for {} media", payload.media_kind))
    })?;
    let part = multipart::Part::bytes(payload.bytes)
        .file_name(payload.file_name)
        .mime_str("application/octet-stream")
        .map_err(|e| TransportError::Request(e.to_string()))?;
    Ok(multipart::Form::new().part(field, part))
}

fn network(err: reqwest::Error) -> TransportError {
    // without_url: the URL carries the bot token
    TransportError::Network(err.without_url().to_string())
}

/// Returns the response if 2xx, otherwise a `Status` error carrying the body.
async fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute_get(&self, url: Url) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await.map_err(network)?;
        let response = check_status(response).await?;
        response.text().await.map_err(network)
    }

    async fn execute_post(&self, url: Url, body: RequestBody) -> Result<String, TransportError> {
        let request = match body {
            RequestBody::Json(value) => self.client.post(url).json(&value),
            RequestBody::Multipart(payload) => {
                debug!(
                    file_name = %payload.file_name,
                    size = payload.bytes.len(),
                    media_kind = %payload.media_kind,
                    "multipart upload"
                );
                self.client.post(url).multipart(multipart_form(payload)?)
            }
        };
        let response = request.send().await.map_err(network)?;
        let response = check_status(response).await?;
        response.text().await.map_err(network)
    }

    async fn fetch_bytes(&self, url: Url) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await.map_err(network)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(network)?;
        Ok(bytes.to_vec())
    }
}
