//! An HTTP relay implementing the chat contract on top of any model
//! provider.
//!
//! `POST /api/chat` takes `{"message": ...}` and answers
//! `{"response": ...}`. Failures come back as `{"error": ...}` with a
//! non-success status, which is what [`HttpModelProvider`] expects.
//!
//! [`HttpModelProvider`]: mr_doctor_http_model::HttpModelProvider

#[macro_use]
extern crate tracing;

mod error;

use std::io;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderName, Method, header};
use axum::response::Json;
use axum::routing::post;
use bytes::Bytes;
use mr_doctor_http_model::proto::{ChatReply, ChatRequest};
use mr_doctor_model::{ModelProvider, ModelProviderError, ModelRequest};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::RelayError;

/// The relay service.
///
/// A relay without a provider still serves requests, answering each of
/// them with [`RelayError::MissingCredential`].
#[derive(Debug)]
pub struct Relay<P> {
    provider: Option<Arc<P>>,
}

impl<P> Clone for Relay<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

impl<P> Relay<P>
where
    P: ModelProvider + 'static,
{
    /// Creates a relay forwarding to `provider`.
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider: provider.map(Arc::new),
        }
    }

    /// Builds the router, with permissive CORS.
    pub fn router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([
                header::AUTHORIZATION,
                HeaderName::from_static("x-client-info"),
                HeaderName::from_static("apikey"),
                header::CONTENT_TYPE,
            ]);

        Router::new()
            .route("/api/chat", post(chat::<P>))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    /// Serves the relay on `listener` until the process exits.
    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        info!(addr = ?listener.local_addr()?, "relay listening");
        axum::serve(listener, self.router()).await
    }
}

async fn chat<P>(
    State(relay): State<Relay<P>>,
    body: Bytes,
) -> Result<Json<ChatReply>, RelayError>
where
    P: ModelProvider + 'static,
{
    let req: ChatRequest = serde_json::from_slice(&body)
        .map_err(|err| RelayError::BadRequest(err.to_string()))?;
    let provider = relay.provider.ok_or(RelayError::MissingCredential)?;

    debug!(len = req.message.len(), "relaying a chat message");
    let reply = provider
        .send_request(&ModelRequest::new(req.message))
        .await
        .map_err(|err| {
            warn!(kind = ?err.kind(), "provider failed: {err}");
            RelayError::Provider(err.to_string())
        })?;

    Ok(Json(ChatReply {
        response: reply.text,
    }))
}
