//! Enrollment salt: 64 bytes from a cryptographically secure source.
//!
//! Salts are not secret, but they must round-trip exactly. Any length other
//! than [`SALT_LEN`] is rejected rather than truncated or padded.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::encoding::{self, SALT_FIELD};
use crate::error::VerifierError;

/// Salt length in bytes.
pub const SALT_LEN: usize = 64;

/// A PBKDF2 salt of exactly [`SALT_LEN`] bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Generate a fresh salt from the operating system CSPRNG.
    ///
    /// `OsRng` is stateless and safe to use from any number of threads.
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Entropy` if the OS random source fails.
    pub fn generate() -> Result<Self, VerifierError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a fresh salt from a caller-supplied CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::Entropy` if `rng` fails to fill the salt.
    pub fn generate_with<R>(rng: &mut R) -> Result<Self, VerifierError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut bytes = [0u8; SALT_LEN];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| VerifierError::Entropy(format!("CSPRNG fill failed: {e}")))?;
        Ok(Self(bytes))
    }

    /// Wrap an exact-length byte array.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Copy a salt out of a slice.
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::InvalidSalt` unless `bytes` is exactly
    /// [`SALT_LEN`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerifierError> {
        let array: [u8; SALT_LEN] = bytes.try_into().map_err(|_| VerifierError::InvalidSalt {
            expected: SALT_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Decode a stored salt.
    ///
    /// # Errors
    ///
    /// `VerifierError::MalformedEncoding` for invalid base64,
    /// `VerifierError::InvalidSalt` for a wrong decoded length.
    pub fn from_base64(text: &str) -> Result<Self, VerifierError> {
        let bytes = encoding::decode(text, SALT_FIELD)?;
        Self::from_slice(&bytes)
    }

    /// Stored text form (padded base64, single line).
    #[must_use]
    pub fn to_base64(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Raw salt bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_base64())
    }
}
