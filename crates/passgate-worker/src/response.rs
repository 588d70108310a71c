//! User-facing login outcome.
//!
//! The response never says *why* verification could not be completed:
//! malformed stored data, a wrong salt length and an unavailable primitive
//! all produce the same `UNABLE_TO_VERIFY` response.

use serde::{Deserialize, Serialize};

use crate::worker::WorkerError;

/// Outcome of a login attempt as the user sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Passphrase verified.
    Granted,
    /// Passphrase did not match.
    Denied,
    /// Verification could not be completed.
    Unavailable,
}

impl LoginOutcome {
    /// Map a verification result to an outcome.
    #[must_use]
    pub const fn from_result(result: &Result<bool, WorkerError>) -> Self {
        match result {
            Ok(true) => Self::Granted,
            Ok(false) => Self::Denied,
            Err(_) => Self::Unavailable,
        }
    }

    /// Machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Granted => "OK",
            Self::Denied => "INVALID_PASSWORD",
            Self::Unavailable => "UNABLE_TO_VERIFY",
        }
    }

    /// User-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Granted => "Login successful.",
            Self::Denied => "Incorrect password. Please try again.",
            Self::Unavailable => "Unable to verify password. Please try again later.",
        }
    }
}

/// Response DTO handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Machine-readable code (`OK`, `INVALID_PASSWORD`, `UNABLE_TO_VERIFY`).
    pub code: String,
    /// User-facing message.
    pub message: String,
    /// `true` only for a verified passphrase.
    pub granted: bool,
}

impl LoginResponse {
    /// Serialize as JSON, falling back to the bare message.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            code: outcome.code().into(),
            message: outcome.message().into(),
            granted: outcome == LoginOutcome::Granted,
        }
    }
}
