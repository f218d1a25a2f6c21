//! A model provider that talks to a chat relay over HTTP.
//!
//! The relay receives `{"message": ...}` and answers `{"response": ...}`,
//! see [`proto`]. It owns the instruction template and the upstream
//! credentials, so this provider only moves text back and forth.

#[macro_use]
extern crate tracing;

mod config;
pub mod proto;

use std::sync::Arc;

use mr_doctor_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use reqwest::{Client, StatusCode, header};

pub use config::{DEFAULT_ENDPOINT, HttpConfig, HttpConfigBuilder};
use proto::{ChatError, ChatReply, ChatRequest};

/// Error type for [`HttpModelProvider`].
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

/// Relay-backed model provider.
#[derive(Clone, Debug)]
pub struct HttpModelProvider {
    client: Client,
    config: Arc<HttpConfig>,
}

impl HttpModelProvider {
    /// Creates a new `HttpModelProvider` with the given configuration.
    #[inline]
    pub fn new(config: HttpConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for HttpModelProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&ChatRequest {
                message: req.message.clone(),
            });
        if let Some(token) = &self.config.bearer_token {
            builder = builder.bearer_auth(token);
        }
        let resp_fut = builder.send();

        async move {
            let resp = resp_fut.await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Unavailable)
            })?;

            let status = resp.status();
            let body = resp.bytes().await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Unavailable)
            })?;
            debug!(%status, len = body.len(), "got a relay response");

            if !status.is_success() {
                let reason = serde_json::from_slice::<ChatError>(&body)
                    .map(|e| e.error)
                    .unwrap_or_else(|_| format!("unexpected status {status}"));
                let kind = if status == StatusCode::TOO_MANY_REQUESTS {
                    ErrorKind::RateLimitExceeded
                } else {
                    ErrorKind::Unavailable
                };
                return Err(Error::new(reason, kind));
            }

            // The body decides, whatever the content type says.
            let reply = serde_json::from_slice::<ChatReply>(&body).map_err(
                |err| Error::new(format!("{err}"), ErrorKind::Malformed),
            )?;
            Ok(ModelReply::new(reply.response))
        }
    }
}
