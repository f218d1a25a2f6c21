//! A model provider calling Google's Gemini `generateContent` API.
//!
//! The user's message is wrapped in the Mr.Doctor instruction template
//! before it is sent, so the reply comes back already formatted.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::sync::Arc;

use mr_doctor_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use reqwest::{Client, StatusCode, header};

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, GeminiConfigBuilder,
};
pub use proto::{NO_CONTENT_REPLY, render_prompt};
use proto::{ErrorResponse, GenerateContentResponse};

/// Error type for [`GeminiModelProvider`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Gemini model provider.
#[derive(Clone, Debug)]
pub struct GeminiModelProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiModelProvider {
    /// Creates a new `GeminiModelProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for GeminiModelProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let gemini_req = proto::create_request(&req.message);
        let resp_fut = self
            .client
            .post(self.config.endpoint())
            .header(header::ACCEPT, "application/json")
            .json(&gemini_req)
            .send();
        let model = self.config.model.clone();

        async move {
            // Drop the URL from transport errors, it carries the key.
            let resp = resp_fut.await.map_err(|err| {
                Error::new(
                    format!("{}", err.without_url()),
                    ErrorKind::Unavailable,
                )
            })?;

            let status = resp.status();
            let body = resp.bytes().await.map_err(|err| {
                Error::new(
                    format!("{}", err.without_url()),
                    ErrorKind::Unavailable,
                )
            })?;
            debug!(%status, %model, len = body.len(), "got a gemini response");

            if !status.is_success() {
                let reason = serde_json::from_slice::<ErrorResponse>(&body)
                    .ok()
                    .and_then(|e| e.error.message)
                    .unwrap_or_else(|| "API request failed".to_owned());
                warn!(%status, "gemini request failed: {reason}");
                let kind = if status == StatusCode::TOO_MANY_REQUESTS {
                    ErrorKind::RateLimitExceeded
                } else {
                    ErrorKind::Unavailable
                };
                return Err(Error::new(reason, kind));
            }

            let resp = serde_json::from_slice::<GenerateContentResponse>(
                &body,
            )
            .map_err(|err| Error::new(format!("{err}"), ErrorKind::Malformed))?;
            Ok(ModelReply::new(resp.into_text()))
        }
    }
}
