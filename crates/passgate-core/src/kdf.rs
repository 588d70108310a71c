//! PBKDF2 key derivation with fixed enrollment parameters.
//!
//! This module provides:
//! - [`derive_key`]: derive a key from a [`Passphrase`] and a 64-byte salt
//! - [`DerivationParams`]: iteration count, output length and PRF
//! - [`Prf`]: the pseudo-random function underneath PBKDF2
//!
//! Enrollment and verification both use [`DerivationParams::STANDARD`], so a
//! stored hash can never be checked under different parameters than it was
//! created with.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use ring::pbkdf2;

use crate::error::VerifierError;
use crate::memory::SecretBuffer;
use crate::passphrase::Passphrase;
use crate::salt::SALT_LEN;

/// Minimum PBKDF2 iteration count accepted by [`DerivationParams::new`].
pub const MIN_ITERATIONS: u32 = 10_000;

/// Derived key length in bytes for [`DerivationParams::STANDARD`].
pub const KEY_LEN: usize = 64;

/// Upper bound on the derived key length.
pub const MAX_KEY_LEN: usize = 1024;

const STANDARD_ITERATIONS: NonZeroU32 = match NonZeroU32::new(MIN_ITERATIONS) {
    Some(n) => n,
    None => panic!("MIN_ITERATIONS must be non-zero"),
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Pseudo-random function used by PBKDF2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prf {
    /// HMAC-SHA256.
    HmacSha256,
}

impl Prf {
    /// Canonical identifier, as used by the stored-credential format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HmacSha256 => "HmacSHA256",
        }
    }

    fn to_ring_algorithm(self) -> pbkdf2::Algorithm {
        match self {
            Self::HmacSha256 => pbkdf2::PBKDF2_HMAC_SHA256,
        }
    }
}

impl fmt::Display for Prf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prf {
    type Err = VerifierError;

    /// Accepts the bare HMAC name and the JCA-style PBKDF2 name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HmacSHA256" | "PBKDF2WithHmacSHA256" => Ok(Self::HmacSha256),
            other => Err(VerifierError::AlgorithmUnavailable(format!(
                "no PBKDF2 implementation for PRF {other:?}"
            ))),
        }
    }
}

/// PBKDF2 parameter set.
///
/// Fields are private: every value has passed [`DerivationParams::new`] or
/// is the [`DerivationParams::STANDARD`] constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationParams {
    prf: Prf,
    iterations: NonZeroU32,
    key_len: usize,
}

impl DerivationParams {
    /// Parameters used by enrollment and verification:
    /// HMAC-SHA256, 10 000 iterations, 64-byte output.
    pub const STANDARD: Self = Self {
        prf: Prf::HmacSha256,
        iterations: STANDARD_ITERATIONS,
        key_len: KEY_LEN,
    };

    /// Build a parameter set.
    ///
    /// # Errors
    ///
    /// Returns `VerifierError::InvalidParams` if `iterations` is below
    /// [`MIN_ITERATIONS`] or `key_len` is outside `1..=MAX_KEY_LEN`.
    pub fn new(prf: Prf, iterations: u32, key_len: usize) -> Result<Self, VerifierError> {
        let iterations = NonZeroU32::new(iterations)
            .filter(|n| n.get() >= MIN_ITERATIONS)
            .ok_or_else(|| {
                VerifierError::InvalidParams(format!(
                    "iteration count {iterations} below minimum {MIN_ITERATIONS}"
                ))
            })?;
        if key_len == 0 || key_len > MAX_KEY_LEN {
            return Err(VerifierError::InvalidParams(format!(
                "key length {key_len} outside 1..={MAX_KEY_LEN}"
            )));
        }
        Ok(Self {
            prf,
            iterations,
            key_len,
        })
    }

    /// The PRF underneath PBKDF2.
    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.prf
    }

    /// PBKDF2 iteration count.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    /// Output length in bytes.
    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.key_len
    }
}

impl Default for DerivationParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ---------------------------------------------------------------------------
// Core KDF
// ---------------------------------------------------------------------------

/// Derive a key from `passphrase` and `salt` with PBKDF2.
///
/// The passphrase is consumed. Its characters are wiped as soon as they are
/// UTF-8 encoded, and the encoded bytes are wiped when the KDF is done with
/// them. Both wipes are drop-driven, so they also happen on the error paths.
///
/// This is deliberately slow (tens to hundreds of milliseconds). Call it
/// from a worker thread, never from a latency-sensitive context.
///
/// # Errors
///
/// - `VerifierError::InvalidSalt` if `salt` is not exactly
///   [`SALT_LEN`] bytes. No derivation is attempted.
pub fn derive_key(
    passphrase: Passphrase,
    salt: &[u8],
    params: &DerivationParams,
) -> Result<SecretBuffer, VerifierError> {
    if salt.len() != SALT_LEN {
        return Err(VerifierError::InvalidSalt {
            expected: SALT_LEN,
            actual: salt.len(),
        });
    }

    let secret = passphrase.into_utf8();
    let mut output = vec![0u8; params.key_len];
    pbkdf2::derive(
        params.prf.to_ring_algorithm(),
        params.iterations,
        salt,
        secret.expose(),
        &mut output,
    );
    drop(secret);

    Ok(SecretBuffer::from_vec(output))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
