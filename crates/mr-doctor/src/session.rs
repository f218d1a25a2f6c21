use std::time::Duration;

use mr_doctor_core::conversation::{Conversation, Turn};
use mr_doctor_core::{
    Advisor, AdvisorBuilder, Notice, PendingReply, SubmitError,
};
use mr_doctor_model::ModelProvider;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    advisor_builder: AdvisorBuilder,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let advisor_builder = AdvisorBuilder::with_model_provider(provider);
        Self { advisor_builder }
    }

    /// Sets how long to wait for the provider before falling back to the
    /// canned reply.
    #[inline]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.advisor_builder =
            self.advisor_builder.with_request_timeout(timeout);
        self
    }

    /// Attaches a callback to be invoked when a turn is added.
    #[inline]
    pub fn on_turn(
        mut self,
        on_turn: impl Fn(&Turn) + Send + Sync + 'static,
    ) -> Self {
        self.advisor_builder = self.advisor_builder.on_turn(on_turn);
        self
    }

    /// Attaches a callback to be invoked when a canned reply was used.
    #[inline]
    pub fn on_notice(
        mut self,
        on_notice: impl Fn(&Notice) + Send + Sync + 'static,
    ) -> Self {
        self.advisor_builder = self.advisor_builder.on_notice(on_notice);
        self
    }

    /// Attaches a callback to be invoked when composing starts or stops.
    #[inline]
    pub fn on_composing(
        mut self,
        on_composing: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.advisor_builder = self.advisor_builder.on_composing(on_composing);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        Session {
            advisor: self.advisor_builder.build(),
        }
    }
}

/// A chat session, like a window that displays messages and has a input box.
///
/// It is basically a wrapper around [`Advisor`]. Dropping the session
/// stops the advisor.
pub struct Session {
    advisor: Advisor,
}

impl Session {
    /// Sends a message to the session.
    ///
    /// Replies are delivered through the `on_turn` callback, and through
    /// the returned handle.
    #[inline]
    pub async fn send_message(
        &self,
        message: &str,
    ) -> Result<PendingReply, SubmitError> {
        let pending = self.advisor.submit(message).await?;
        debug!(request_id = pending.request_id(), "message sent");
        Ok(pending)
    }

    /// Returns a snapshot of the conversation so far.
    ///
    /// Empty once the advisor has stopped.
    pub async fn conversation(&self) -> Conversation {
        self.advisor.conversation().await.unwrap_or_default()
    }

    /// Returns the underlying advisor.
    #[inline]
    pub fn advisor(&self) -> &Advisor {
        &self.advisor
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.advisor.stop();
    }
}
