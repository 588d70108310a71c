//! Caller-supplied passphrase, held as characters until derivation time.
//!
//! A [`Passphrase`] is consumed by exactly one derivation. Its characters are
//! wiped as soon as they have been UTF-8 encoded, and again on drop, so an
//! early return, an error or an unwind never leaves them behind.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::memory::SecretBuffer;

/// A transient passphrase. Zeroized on drop, masked in `Debug`/`Display`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Passphrase {
    chars: Vec<char>,
}

impl Passphrase {
    /// Wrap a character buffer. Ownership passes to the passphrase.
    #[must_use]
    pub fn from_chars(chars: Vec<char>) -> Self {
        Self { chars }
    }

    /// Move the contents of `source` into a new passphrase and zero `source`.
    ///
    /// The caller's string is left empty.
    #[must_use]
    pub fn take(source: &mut String) -> Self {
        let mut chars = Vec::with_capacity(source.chars().count());
        chars.extend(source.chars());
        source.zeroize();
        Self { chars }
    }

    /// Number of characters (not bytes).
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the passphrase has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Encode into UTF-8, consuming the passphrase.
    ///
    /// The byte buffer is allocated at its exact final size so it never
    /// reallocates. The characters are wiped before this returns.
    pub(crate) fn into_utf8(mut self) -> SecretBuffer {
        self.drain_utf8()
    }

    /// Encode into UTF-8 and wipe the characters in place.
    fn drain_utf8(&mut self) -> SecretBuffer {
        let byte_len = self
            .chars
            .iter()
            .map(|c| c.len_utf8())
            .fold(0usize, usize::saturating_add);

        let mut bytes = Vec::with_capacity(byte_len);
        let mut scratch = [0u8; 4];
        for c in &self.chars {
            bytes.extend_from_slice(c.encode_utf8(&mut scratch).as_bytes());
        }
        scratch.zeroize();
        self.chars.zeroize();

        SecretBuffer::from_vec(bytes)
    }
}

impl From<String> for Passphrase {
    fn from(mut value: String) -> Self {
        Self::take(&mut value)
    }
}

impl From<&str> for Passphrase {
    fn from(value: &str) -> Self {
        let mut chars = Vec::with_capacity(value.chars().count());
        chars.extend(value.chars());
        Self { chars }
    }
}

impl From<Vec<char>> for Passphrase {
    fn from(chars: Vec<char>) -> Self {
        Self::from_chars(chars)
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(***)")
    }
}

impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(***)")
    }
}
