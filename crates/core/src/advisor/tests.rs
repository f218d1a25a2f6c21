use std::sync::{Arc, Mutex};
use std::time::Duration;

use mr_doctor_model::{ErrorKind, ModelProvider, ModelReply, ModelRequest};
use mr_doctor_test_model::TestModelProvider;
use tokio::sync::mpsc;

use crate::conversation::Sender;
use crate::fallback;
use crate::triage::Severity;
use crate::{AdvisorBuilder, Notice, ReplyFailure, SubmitError};

fn collect_notices(
    builder: AdvisorBuilder,
) -> (AdvisorBuilder, mpsc::UnboundedReceiver<Notice>) {
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let builder = builder.on_notice(move |notice| {
        notice_tx.send(notice.clone()).ok();
    });
    (builder, notice_rx)
}

/// A provider whose request future panics when polled.
struct CrashingProvider;

impl ModelProvider for CrashingProvider {
    type Error = mr_doctor_test_model::Error;

    fn send_request(
        &self,
        _req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        async move { Err(crash()) }
    }
}

fn crash() -> mr_doctor_test_model::Error {
    panic!("the provider crashed")
}

#[tokio::test]
async fn test_success_reply_is_verbatim() {
    let mut provider = TestModelProvider::default();
    provider.add_text_reply("X");

    let advisor = AdvisorBuilder::with_model_provider(provider.clone()).build();
    let turn = advisor.respond("I have a fever").await.unwrap();

    assert_eq!(turn.content(), "X");
    assert_eq!(turn.sender(), Sender::Ai);
    assert_eq!(turn.alerts().len(), 1);
    assert_eq!(turn.alerts()[0].severity, Severity::Warning);

    let conversation = advisor.conversation().await.unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation.turns()[0].content(), "I have a fever");
    assert_eq!(conversation.turns()[1], turn);
    assert_eq!(provider.requests()[0].message, "I have a fever");
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let provider = TestModelProvider::default();
    let advisor = AdvisorBuilder::with_model_provider(provider.clone()).build();

    for input in ["", "   ", "\n\t"] {
        assert_eq!(
            advisor.respond(input).await.unwrap_err(),
            SubmitError::EmptyInput
        );
    }

    assert!(advisor.conversation().await.unwrap().is_empty());
    assert!(!advisor.is_composing().await.unwrap());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_failure_uses_fallback() {
    let mut provider = TestModelProvider::default();
    provider.add_failure(ErrorKind::Unavailable);

    let (builder, mut notice_rx) =
        collect_notices(AdvisorBuilder::with_model_provider(provider));
    let advisor = builder.build();

    let turn = advisor.respond("I have a fever").await.unwrap();
    assert_eq!(turn.content(), fallback::FEVER_EN);
    assert_eq!(turn.alerts()[0].severity, Severity::Warning);
    assert_eq!(advisor.conversation().await.unwrap().len(), 2);

    let notice = notice_rx.recv().await.unwrap();
    assert!(matches!(notice.failure, ReplyFailure::Unavailable(_)));
    assert!(!notice.message.is_empty());
}

#[tokio::test]
async fn test_malformed_reply_uses_fallback() {
    let mut provider = TestModelProvider::default();
    provider.add_failure(ErrorKind::Malformed);

    let (builder, mut notice_rx) =
        collect_notices(AdvisorBuilder::with_model_provider(provider));
    let advisor = builder.build();

    let turn = advisor.respond("enaku kaichal irukku").await.unwrap();
    assert_eq!(turn.content(), fallback::FEVER_TA);

    let notice = notice_rx.recv().await.unwrap();
    assert!(matches!(notice.failure, ReplyFailure::Malformed(_)));
}

#[tokio::test]
async fn test_generic_fallback_without_alerts() {
    let provider = TestModelProvider::default();
    let advisor = AdvisorBuilder::with_model_provider(provider).build();

    let turn = advisor.respond("hello doctor").await.unwrap();
    assert_eq!(turn.content(), fallback::GENERIC_EN);
    assert!(turn.alerts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_busy_while_composing() {
    let mut provider = TestModelProvider::default();
    provider.add_text_reply("first");
    provider.add_text_reply("second");
    provider.set_delay(Duration::from_millis(100));

    let advisor = AdvisorBuilder::with_model_provider(provider.clone()).build();
    let pending = advisor.submit("mild cold").await.unwrap();
    assert!(advisor.is_composing().await.unwrap());

    assert_eq!(
        advisor.submit("another one").await.unwrap_err(),
        SubmitError::Busy
    );
    assert_eq!(advisor.conversation().await.unwrap().len(), 1);

    let turn = pending.wait().await.unwrap();
    assert_eq!(turn.content(), "first");
    assert!(!advisor.is_composing().await.unwrap());
    assert_eq!(advisor.conversation().await.unwrap().len(), 2);
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn test_turns_alternate_in_order() {
    let mut provider = TestModelProvider::default();
    for i in 0..5 {
        if i == 2 {
            provider.add_failure(ErrorKind::RateLimitExceeded);
        } else {
            provider.add_text_reply(format!("reply {i}"));
        }
    }

    let advisor = AdvisorBuilder::with_model_provider(provider).build();
    for i in 0..5 {
        advisor.respond(format!("message {i}")).await.unwrap();
    }

    let conversation = advisor.conversation().await.unwrap();
    let turns = conversation.turns();
    assert_eq!(turns.len(), 10);
    for (i, pair) in turns.chunks(2).enumerate() {
        assert_eq!(pair[0].sender(), Sender::User);
        assert_eq!(pair[0].content(), format!("message {i}"));
        assert_eq!(pair[1].sender(), Sender::Ai);
        if i == 2 {
            assert_eq!(pair[1].content(), fallback::GENERIC_EN);
        } else {
            assert_eq!(pair[1].content(), format!("reply {i}"));
        }
        assert!(pair[0].timestamp() <= pair[1].timestamp());
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_uses_fallback() {
    let mut provider = TestModelProvider::default();
    provider.add_text_reply("too late");
    provider.set_delay(Duration::from_secs(60));

    let (builder, mut notice_rx) = collect_notices(
        AdvisorBuilder::with_model_provider(provider)
            .with_request_timeout(Duration::from_secs(5)),
    );
    let advisor = builder.build();

    let turn = advisor.respond("I have a headache").await.unwrap();
    assert_eq!(turn.content(), fallback::HEADACHE_EN);

    let notice = notice_rx.recv().await.unwrap();
    assert_eq!(
        notice.failure,
        ReplyFailure::TimedOut(Duration::from_secs(5))
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_pending_reply() {
    let mut provider = TestModelProvider::default();
    provider.add_text_reply("never shown");
    provider.add_text_reply("shown");
    provider.set_delay(Duration::from_secs(60));

    let (builder, mut notice_rx) =
        collect_notices(AdvisorBuilder::with_model_provider(provider));
    let advisor = builder.build();

    let pending = advisor.submit("stress at work").await.unwrap();
    pending.cancel();
    let turn = pending.wait().await.unwrap();
    assert_eq!(turn.content(), fallback::STRESS_EN);
    assert_eq!(
        notice_rx.recv().await.unwrap().failure,
        ReplyFailure::Cancelled
    );

    // The session stays usable.
    assert!(!advisor.is_composing().await.unwrap());
    // Depending on whether the cancelled task got to run, this request
    // takes either preset.
    let turn = advisor.respond("and now?").await.unwrap();
    assert!(turn.content().contains("shown"));
    assert_eq!(advisor.conversation().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_provider_panic_uses_fallback() {
    let (builder, mut notice_rx) =
        collect_notices(AdvisorBuilder::with_model_provider(CrashingProvider));
    let advisor = builder.build();

    let turn = advisor.respond("I have a fever").await.unwrap();
    assert_eq!(turn.content(), fallback::FEVER_EN);
    assert!(matches!(
        notice_rx.recv().await.unwrap().failure,
        ReplyFailure::Unavailable(_)
    ));
    assert!(!advisor.is_composing().await.unwrap());
    assert_eq!(advisor.conversation().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_observers() {
    let mut provider = TestModelProvider::default();
    provider.add_text_reply("Rest well.");

    let events = Arc::new(Mutex::new(Vec::new()));
    let advisor = AdvisorBuilder::with_model_provider(provider)
        .on_turn({
            let events = Arc::clone(&events);
            move |turn| {
                events
                    .lock()
                    .unwrap()
                    .push(format!("{:?}: {}", turn.sender(), turn.content()));
            }
        })
        .on_composing({
            let events = Arc::clone(&events);
            move |composing| {
                events.lock().unwrap().push(format!("composing {composing}"));
            }
        })
        .build();

    advisor.respond("feeling tired").await.unwrap();
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            "User: feeling tired".to_owned(),
            "composing true".to_owned(),
            "Ai: Rest well.".to_owned(),
            "composing false".to_owned(),
        ]
    );
}

#[tokio::test]
async fn test_stopped_advisor() {
    let advisor =
        AdvisorBuilder::with_model_provider(TestModelProvider::default())
            .build();
    advisor.stop();
    assert_eq!(
        advisor.respond("hello").await.unwrap_err(),
        SubmitError::Stopped
    );
}
