//! A local fake model for testing purpose.

pub mod http;
mod preset;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mr_doctor_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Shared {
    script: Mutex<VecDeque<PresetReply>>,
    requests: Mutex<Vec<ModelRequest>>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to set up the script, which is how
/// the model should answer each request in turn. Every request consumes
/// one preset. If the script runs out, an `Unavailable` error is
/// returned, just like an unreachable service.
///
/// Clones share the script and the request log, so a test can keep one
/// clone for assertions after handing the other to the code under test.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    shared: Arc<Shared>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    /// Appends a preset to the script.
    #[inline]
    pub fn add_reply(&mut self, preset: PresetReply) {
        lock(&self.shared.script).push_back(preset);
    }

    /// Appends a successful reply to the script.
    #[inline]
    pub fn add_text_reply<S: Into<String>>(&mut self, text: S) {
        self.add_reply(PresetReply::text(text));
    }

    /// Appends a failure to the script.
    #[inline]
    pub fn add_failure(&mut self, kind: ErrorKind) {
        self.add_reply(PresetReply::failure(kind));
    }

    /// Makes every reply wait for `duration` first.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the requests received so far, in order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        lock(&self.shared.requests).clone()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        lock(&self.shared.requests).push(req.clone());
        let preset = lock(&self.shared.script).pop_front();
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            match preset {
                Some(PresetReply::Text(text)) => Ok(ModelReply::new(text)),
                Some(PresetReply::Failure(kind)) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough presets",
                    kind: ErrorKind::Unavailable,
                }),
            }
        }
    }
}

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestModelProvider::default();
        provider.add_text_reply("Drink warm water.");
        provider.add_failure(ErrorKind::Malformed);

        let reply = provider
            .send_request(&ModelRequest::new("I have a cold"))
            .await
            .unwrap();
        assert_eq!(reply.text, "Drink warm water.");

        let err = provider
            .send_request(&ModelRequest::new("And a cough"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = provider
            .send_request(&ModelRequest::new("Hello?"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let observer = TestModelProvider::default();
        let mut provider = observer.clone();
        provider.add_text_reply("ok");

        provider
            .send_request(&ModelRequest::new("first"))
            .await
            .unwrap();
        assert_eq!(observer.requests(), vec![ModelRequest::new("first")]);
    }
}
