//! An abstraction layer for the services that write advice replies.
//!
//! This crate establishes a unified protocol for the advisor to interact
//! with the supported text-generation backends, so that the advisor can
//! switch between a relay endpoint, a hosted model or a scripted fake
//! without modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
