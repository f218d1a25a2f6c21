use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use mr_doctor_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the message back, and refuses blank ones the way a relay
/// refuses a malformed body.
struct EchoModelProvider;

impl ModelProvider for EchoModelProvider {
    type Error = FakeModelProviderError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let message = req.message.clone();
        async move {
            sleep(Duration::from_millis(1)).await;
            if message.trim().is_empty() {
                return Err(FakeModelProviderError(ErrorKind::Malformed));
            }
            Ok(ModelReply::new(format!("You said {message}")))
        }
    }
}

#[tokio::test]
async fn test_completion() {
    let provider = EchoModelProvider;
    let req = ModelRequest::new("Good morning");
    let reply = provider.send_request(&req).await.unwrap();
    assert_eq!(reply.text, "You said Good morning");
    assert_eq!(String::from(reply), "You said Good morning");
}

#[tokio::test]
async fn test_future_outlives_provider() {
    let fut = {
        let provider = EchoModelProvider;
        provider.send_request(&ModelRequest::new("still here"))
    };
    assert_eq!(fut.await.unwrap().text, "You said still here");
}

#[tokio::test]
async fn test_error() {
    let provider = EchoModelProvider;
    let err = provider
        .send_request(&ModelRequest::new("  "))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(err.kind().is_malformed());
}
