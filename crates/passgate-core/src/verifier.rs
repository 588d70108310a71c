//! Password enrollment and verification.
//!
//! - [`enroll`]: fresh salt + derived hash, both as base64, for the caller to store
//! - [`verify`]: re-derive from stored base64 salt/hash and compare
//! - [`keys_match`]: the constant-time comparator used by both verify paths
//!
//! A mismatch is `Ok(false)`. An `Err` means the outcome is unknown and must
//! not be reported as a wrong password.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::encoding::{self, HASH_FIELD, SALT_FIELD};
use crate::error::VerifierError;
use crate::kdf::{derive_key, DerivationParams};
use crate::passphrase::Passphrase;
use crate::salt::Salt;

/// Base64 salt and hash produced by [`enroll`], ready for storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// 64-byte salt, padded base64.
    pub salt: String,
    /// 64-byte derived key, padded base64.
    pub hash: String,
}

impl Enrollment {
    /// Check `passphrase` against this enrollment.
    ///
    /// # Errors
    ///
    /// Same as [`verify`].
    pub fn verify(&self, passphrase: Passphrase) -> Result<bool, VerifierError> {
        verify(passphrase, &self.salt, &self.hash)
    }
}

/// Constant-time equality of a derived key and a stored hash.
///
/// Running time depends only on the lengths, never on the position of the
/// first differing byte. Slices of different lengths compare unequal; key
/// length is public, so that early exit leaks nothing.
#[must_use]
pub fn keys_match(derived: &[u8], expected: &[u8]) -> bool {
    derived.ct_eq(expected).into()
}

/// Verify `passphrase` against a stored base64 salt and hash.
///
/// Both texts are decoded before any derivation runs.
///
/// # Errors
///
/// - `VerifierError::MalformedEncoding` if either text is not base64
/// - `VerifierError::InvalidSalt` if the decoded salt is not 64 bytes
/// - Any error from [`derive_key`]
pub fn verify(
    passphrase: Passphrase,
    salt_b64: &str,
    expected_hash_b64: &str,
) -> Result<bool, VerifierError> {
    let salt = encoding::decode(salt_b64, SALT_FIELD)?;
    let expected = encoding::decode(expected_hash_b64, HASH_FIELD)?;
    verify_bytes(passphrase, &salt, &expected)
}

/// Verify `passphrase` against an already-decoded salt and hash.
///
/// # Errors
///
/// Any error from [`derive_key`].
pub fn verify_bytes(
    passphrase: Passphrase,
    salt: &[u8],
    expected_hash: &[u8],
) -> Result<bool, VerifierError> {
    let derived = derive_key(passphrase, salt, &DerivationParams::STANDARD)?;
    Ok(keys_match(derived.expose(), expected_hash))
}

/// Enroll `passphrase` with a salt from the OS CSPRNG.
///
/// # Errors
///
/// `VerifierError::Entropy` if salt generation fails, or any error from
/// [`derive_key`].
pub fn enroll(passphrase: Passphrase) -> Result<Enrollment, VerifierError> {
    enroll_with_rng(passphrase, &mut OsRng)
}

/// Enroll `passphrase` with a salt drawn from `rng`.
///
/// # Errors
///
/// Same as [`enroll`].
pub fn enroll_with_rng<R>(passphrase: Passphrase, rng: &mut R) -> Result<Enrollment, VerifierError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let salt = Salt::generate_with(rng)?;
    let derived = derive_key(passphrase, salt.as_bytes(), &DerivationParams::STANDARD)?;
    Ok(Enrollment {
        salt: salt.to_base64(),
        hash: encoding::encode(derived.expose()),
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
