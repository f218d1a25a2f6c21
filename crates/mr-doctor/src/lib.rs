//! Mr.Doctor, a bilingual (English and Tamil/Tanglish) health-advice chat
//! assistant.
//!
//! The crate includes a CLI tool for using in the terminal, which can also
//! run the chat relay. And you can use it as a library to embed the
//! assistant into your own host apps.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod render;
mod session;

pub use render::{notice_line, severity_badge};
pub use session::{Session, SessionBuilder};

/// Re-exports of [`mr_doctor_core`] crate.
pub mod core {
    pub use mr_doctor_core::*;
}
