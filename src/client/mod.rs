//! HTTP client for the generation and conversion endpoints.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::form::BootcampFormInput;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("a request is already in flight")]
    Busy,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("generation did not return a document")]
    EmptyResponse,
}

/// Wire envelope shared by both endpoints' JSON responses.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    data: Option<Value>,
    error: Option<String>,
}

/// Client for the bootcamp API. At most one request may be outstanding; a
/// second call while busy is rejected rather than queued, and there is no
/// cancellation.
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    in_flight: Mutex<()>,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent("bootcamp-builder-server/0.3")
            .build()
            .expect("Failed to create reqwest client");
        Self {
            http,
            base_url: base_url.into(),
            in_flight: Mutex::new(()),
        }
    }

    /// Whether a request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// POST the validated form record to the generate endpoint and return
    /// the generated document.
    pub async fn generate(&self, input: &BootcampFormInput) -> Result<Value, ClientError> {
        let _guard = self.in_flight.try_lock().map_err(|_| ClientError::Busy)?;

        let url = format!("{}/api/generate-bootcamp", self.base_url);
        log::info!("Requesting curriculum generation for '{}'", input.name);
        let response = self.http.post(&url).json(input).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let envelope: Envelope = response.json().await?;
        match envelope {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope {
                error: Some(message),
                ..
            } => Err(ClientError::Status {
                status: status.as_u16(),
                message,
            }),
            _ => Err(ClientError::EmptyResponse),
        }
    }

    /// POST a document to the convert endpoint and return the DOCX bytes.
    pub async fn convert(&self, document: &Value) -> Result<Vec<u8>, ClientError> {
        let _guard = self.in_flight.try_lock().map_err(|_| ClientError::Busy)?;

        let url = format!("{}/api/convert-to-docx", self.base_url);
        log::info!("Requesting DOCX conversion");
        let response = self.http.post(&url).json(document).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Pull the server's error message out of a failure response, if there is one.
async fn error_message(response: reqwest::Response) -> String {
    response
        .json::<Envelope>()
        .await
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| "request failed".to_string())
}
