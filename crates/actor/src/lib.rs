//! A lightweight actor runtime.
//!
//! Session state lives inside an actor task and is only ever touched by
//! message handlers, one message at a time. Callers hold an [`Actor`]
//! handle and either fire messages with [`Actor::send`] or read back a
//! value with [`Actor::ask`].

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod ask;
mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::Message;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug)]
    struct AddMessage(u32);

    impl Message<Counter> for AddMessage {
        fn handle(self, state: &mut Counter, _handle: &Actor<Counter>) {
            state.value += self.0;
        }
    }

    #[tokio::test]
    async fn test_send_then_ask() {
        let actor = Actor::spawn(Counter::default(), Some("counter"));
        actor.send(AddMessage(40)).unwrap();
        actor.send(AddMessage(2)).unwrap();

        let value = actor.ask(|state, _| state.value).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_ask_can_mutate() {
        let actor = Actor::spawn(Counter::default(), None);
        let before = actor
            .ask(|state, _| {
                let before = state.value;
                state.value = 7;
                before
            })
            .await
            .unwrap();
        assert_eq!(before, 0);
        assert_eq!(actor.ask(|state, _| state.value).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_stopped_actor() {
        let actor = Actor::spawn(Counter::default(), None);
        assert!(!actor.is_stopped());
        actor.stop();
        assert!(actor.is_stopped());
        assert!(actor.ask(|state, _| state.value).await.is_err());
        assert_eq!(actor.send(AddMessage(1)), Err(ActorDeadError));
    }
}
