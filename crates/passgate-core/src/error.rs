//! Error types for `passgate-core`.
//!
//! A passphrase mismatch is not an error: [`crate::verify`] returns
//! `Ok(false)` for it. Every variant here means the verification outcome is
//! indeterminate. No variant ever carries passphrase or derived-key bytes.

use thiserror::Error;

/// Errors produced while deriving, enrolling or verifying.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// Salt does not have the fixed enrollment length.
    #[error("invalid salt: {actual} bytes (expected {expected})")]
    InvalidSalt {
        /// Required salt length in bytes.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Stored salt or hash text is not valid base64.
    #[error("malformed base64 in {field}: {reason}")]
    MalformedEncoding {
        /// Which stored value failed to decode (`"salt"` or `"hash"`).
        field: &'static str,
        /// Decoder diagnostic (position and kind, never content).
        reason: String,
    },

    /// The requested pseudo-random function is not available.
    #[error("algorithm unavailable: {0}")]
    AlgorithmUnavailable(String),

    /// Derivation parameters are outside the accepted range.
    #[error("invalid derivation parameters: {0}")]
    InvalidParams(String),

    /// The secure random source failed to produce a salt.
    #[error("secure random source failed: {0}")]
    Entropy(String),
}

/// Coarse classification used for alert routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or tampered stored input (caller bug or tampering).
    Integrity,
    /// The runtime environment cannot perform the operation.
    Operational,
}

impl VerifierError {
    /// Classify this error for logging and alerting.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSalt { .. } | Self::MalformedEncoding { .. } => ErrorClass::Integrity,
            Self::AlgorithmUnavailable(_) | Self::InvalidParams(_) | Self::Entropy(_) => {
                ErrorClass::Operational
            }
        }
    }

    /// Short stable identifier for the variant, safe to put in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSalt { .. } => "invalid_salt",
            Self::MalformedEncoding { .. } => "malformed_encoding",
            Self::AlgorithmUnavailable(_) => "algorithm_unavailable",
            Self::InvalidParams(_) => "invalid_params",
            Self::Entropy(_) => "entropy",
        }
    }
}
