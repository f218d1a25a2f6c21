use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mr_doctor_http_model::proto::ChatError;

/// Failures reported to relay clients.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// No provider is configured.
    #[error("GEMINI_API_KEY not found")]
    MissingCredential,
    /// The request body is not a chat request.
    #[error("invalid request body: {0}")]
    BadRequest(String),
    /// The provider failed.
    #[error("{0}")]
    Provider(String),
}

impl RelayError {
    /// Returns the status code this error is served with.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::MissingCredential | RelayError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ChatError {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
