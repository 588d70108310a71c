//! Off-thread enrollment and verification.
//!
//! PBKDF2 blocks the calling thread for tens to hundreds of milliseconds,
//! so every call is moved onto tokio's blocking pool and its result is
//! handed back as a plain value. Inputs are owned by the task: if the
//! awaiting future is dropped, the derivation still runs to completion and
//! its drop guards wipe the passphrase and derived key.

use std::time::{Duration, Instant};

use passgate_core::{Enrollment, ErrorClass, Passphrase, VerifierError};
use thiserror::Error;
use tokio::task;

use crate::response::{LoginOutcome, LoginResponse};

/// Errors surfaced by [`PasswordWorker`].
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The verifier reported an integrity or operational fault.
    #[error(transparent)]
    Verifier(#[from] VerifierError),

    /// The blocking task panicked or was aborted before producing a result.
    #[error("verification task failed: {0}")]
    TaskFailed(String),
}

impl WorkerError {
    /// Classify this error for alert routing.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Verifier(e) => e.class(),
            Self::TaskFailed(_) => ErrorClass::Operational,
        }
    }

    /// Short stable identifier, safe to put in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Verifier(e) => e.kind(),
            Self::TaskFailed(_) => "task_failed",
        }
    }
}

/// Runs password enrollment and verification on the blocking thread pool.
///
/// Holds no state: concurrent calls for different users are independent.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasswordWorker;

impl PasswordWorker {
    /// Create a worker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Verify `passphrase` against a stored base64 salt and hash.
    ///
    /// Must be awaited inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// `WorkerError::Verifier` for malformed stored data or an unavailable
    /// primitive, `WorkerError::TaskFailed` if the blocking task dies.
    /// A wrong passphrase is `Ok(false)`.
    pub async fn verify(
        &self,
        passphrase: Passphrase,
        salt_b64: String,
        hash_b64: String,
    ) -> Result<bool, WorkerError> {
        let started = Instant::now();
        let result =
            task::spawn_blocking(move || passgate_core::verify(passphrase, &salt_b64, &hash_b64))
                .await
                .map_err(|e| WorkerError::TaskFailed(e.to_string()))?;
        tracing::debug!(
            elapsed_ms = millis(started.elapsed()),
            "password verification finished"
        );
        Ok(result?)
    }

    /// Enroll `passphrase` with a fresh salt.
    ///
    /// # Errors
    ///
    /// `WorkerError::Verifier` if salt generation or derivation fails,
    /// `WorkerError::TaskFailed` if the blocking task dies.
    pub async fn enroll(&self, passphrase: Passphrase) -> Result<Enrollment, WorkerError> {
        let started = Instant::now();
        let result = task::spawn_blocking(move || passgate_core::enroll(passphrase))
            .await
            .map_err(|e| WorkerError::TaskFailed(e.to_string()))
            .and_then(|r| r.map_err(WorkerError::from));

        match &result {
            Ok(_) => tracing::info!(
                elapsed_ms = millis(started.elapsed()),
                "password enrolled"
            ),
            Err(e) => log_fault(e),
        }
        result
    }

    /// Verify and map the outcome to a user-facing response.
    ///
    /// Every fault collapses to the same `UNABLE_TO_VERIFY` response; the
    /// distinguishing detail only goes to the log.
    pub async fn login(
        &self,
        passphrase: Passphrase,
        salt_b64: String,
        hash_b64: String,
    ) -> LoginResponse {
        let result = self.verify(passphrase, salt_b64, hash_b64).await;
        match &result {
            Ok(true) => tracing::info!("login granted"),
            Ok(false) => tracing::info!("login denied: passphrase mismatch"),
            Err(e) => log_fault(e),
        }
        LoginOutcome::from_result(&result).into()
    }
}

fn log_fault(err: &WorkerError) {
    match err.class() {
        ErrorClass::Integrity => tracing::warn!(
            kind = err.kind(),
            error = %err,
            "stored credential failed integrity checks"
        ),
        ErrorClass::Operational => tracing::error!(
            kind = err.kind(),
            error = %err,
            "password verification unavailable"
        ),
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
