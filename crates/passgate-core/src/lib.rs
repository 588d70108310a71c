//! `passgate-core`: password verification primitive.
//!
//! PBKDF2-HMAC-SHA256 over a 64-byte salt, 10 000 iterations, 64-byte output.
//! Enrollment produces a base64 salt/hash pair for the caller to store;
//! verification re-derives and compares in constant time.
//!
//! This crate is the audit target: zero network, zero async, no logging.
//! Derivation blocks for tens to hundreds of milliseconds; run it on a
//! worker thread.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod encoding;
pub mod passphrase;
pub mod salt;

pub mod kdf;

pub mod verifier;

pub use error::{ErrorClass, VerifierError};
pub use kdf::{derive_key, DerivationParams, Prf, KEY_LEN, MIN_ITERATIONS};
pub use memory::{LockedRegion, SecretBuffer};
pub use passphrase::Passphrase;
pub use salt::{Salt, SALT_LEN};
pub use verifier::{enroll, enroll_with_rng, keys_match, verify, verify_bytes, Enrollment};
