use std::time::Duration;

use mr_doctor_model::ModelProvider;

use super::{Advisor, ComposingCallback, NoticeCallback, TurnCallback};
use crate::conversation::Turn;
use crate::model_client::ModelClient;
use crate::notice::Notice;

/// [`Advisor`] builder.
pub struct AdvisorBuilder {
    pub(super) model_client: ModelClient,
    pub(super) request_timeout: Option<Duration>,
    pub(super) on_turn: Option<TurnCallback>,
    pub(super) on_notice: Option<NoticeCallback>,
    pub(super) on_composing: Option<ComposingCallback>,
}

impl AdvisorBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            request_timeout: None,
            on_turn: None,
            on_notice: None,
            on_composing: None,
        }
    }

    /// Gives up on the provider after `timeout` and answers with the
    /// canned reply instead. There is no limit by default.
    #[inline]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Attaches a callback to be invoked whenever a turn is added to the
    /// conversation, user turns included.
    #[inline]
    pub fn on_turn(
        mut self,
        on_turn: impl Fn(&Turn) + Send + Sync + 'static,
    ) -> Self {
        self.on_turn = Some(Box::new(on_turn));
        self
    }

    /// Attaches a callback to be invoked when a canned reply had to be
    /// used.
    #[inline]
    pub fn on_notice(
        mut self,
        on_notice: impl Fn(&Notice) + Send + Sync + 'static,
    ) -> Self {
        self.on_notice = Some(Box::new(on_notice));
        self
    }

    /// Attaches a callback to be invoked when the advisor starts or stops
    /// composing a reply.
    #[inline]
    pub fn on_composing(
        mut self,
        on_composing: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.on_composing = Some(Box::new(on_composing));
        self
    }

    /// Builds the advisor.
    ///
    /// Must be called within a tokio runtime.
    #[inline]
    pub fn build(self) -> Advisor {
        Advisor::spawn_from_builder(self)
    }
}
