//! `passgate-worker`: async boundary around `passgate-core`.
//!
//! Moves blocking PBKDF2 work off the async executor, logs outcomes with
//! `tracing`, and maps results to a user-facing [`LoginResponse`] that never
//! reveals why verification could not be completed.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod response;
pub mod worker;

pub use response::{LoginOutcome, LoginResponse};
pub use worker::{PasswordWorker, WorkerError};
