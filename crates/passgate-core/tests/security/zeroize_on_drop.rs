//! Verify that secret buffers and caller strings are actually wiped.
//!
//! **Note on heap-allocated buffers:** After `SecretSlice<u8>` zeroes its
//! `Box<[u8]>` and deallocates, the allocator may write metadata (free-list
//! pointers, etc.) into the freed block. We therefore scan for a sentinel
//! pattern rather than asserting all-zeros.
//!
//! **UB caveat:** Reading freed memory is technically undefined behavior.
//! These are best-effort smoke tests that work reliably under the **debug**
//! profile (default `cargo test`).

use passgate_core::kdf::{derive_key, DerivationParams};
use passgate_core::memory::SecretBuffer;
use passgate_core::salt::SALT_LEN;
use passgate_core::{Passphrase, VerifierError};

/// Sentinel pattern used to verify zeroization, easily identifiable in memory.
const SENTINEL: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

#[test]
fn secret_buffer_sentinel_not_found_after_drop() {
    let sentinel_data: Vec<u8> = SENTINEL.iter().copied().cycle().take(512).collect();

    let data_ptr: *const u8;
    let data_len: usize;

    {
        let buf = SecretBuffer::new(&sentinel_data);
        let exposed = buf.expose();
        data_ptr = exposed.as_ptr();
        data_len = exposed.len();
        assert_eq!(&exposed[..4], &SENTINEL);
    }

    // SAFETY: Reading memory that was just freed, intentionally UB, test
    // only. The sentinel should not be present if zeroize worked.
    let sentinel_found = unsafe {
        let slice = std::slice::from_raw_parts(data_ptr, data_len);
        slice.windows(4).any(|w| w == SENTINEL)
    };

    assert!(
        !sentinel_found,
        "Sentinel pattern [0xDE, 0xAD, 0xBE, 0xEF] found in memory after SecretBuffer drop"
    );
}

#[test]
fn taken_source_string_is_zeroed_in_place() {
    let mut source = String::from("correct horse battery staple");
    let ptr = source.as_ptr();
    let len = source.len();

    let pass = Passphrase::take(&mut source);
    assert_eq!(pass.char_count(), len);
    assert!(source.is_empty());
    // `source` is still alive, so its allocation has not been freed.
    assert!(source.capacity() >= len);

    // SAFETY: The allocation belongs to `source`, which is still alive and
    // has at least `len` bytes of capacity.
    let all_zero = unsafe {
        let slice = std::slice::from_raw_parts(ptr, len);
        slice.iter().all(|&b| b == 0)
    };
    assert!(all_zero, "caller string bytes survived Passphrase::take");
}

#[test]
fn passphrase_wipes_itself_on_drop() {
    assert!(
        std::mem::needs_drop::<Passphrase>(),
        "Passphrase must implement Drop (ZeroizeOnDrop)"
    );
    assert!(
        std::mem::needs_drop::<SecretBuffer>(),
        "SecretBuffer must implement Drop"
    );
}

/// We capture the first 8 bytes of the derived key as a fingerprint, then
/// verify that this byte sequence doesn't appear in the freed region.
#[test]
fn derived_key_sentinel_not_found_after_drop() {
    let salt = [0x11u8; SALT_LEN];

    let data_ptr: *const u8;
    let data_len: usize;
    let fingerprint: [u8; 8];

    {
        let key = derive_key(
            "test-password-for-zeroize".into(),
            &salt,
            &DerivationParams::STANDARD,
        )
        .expect("KDF derivation should succeed");
        let exposed = key.expose();
        data_ptr = exposed.as_ptr();
        data_len = exposed.len();
        fingerprint = exposed[..8].try_into().expect("key is 64 bytes");
        assert!(
            exposed.iter().any(|&b| b != 0),
            "KDF output should contain non-zero bytes"
        );
    }

    // SAFETY: Reading freed memory (UB), best-effort smoke test, debug mode only.
    let sentinel_found = unsafe {
        let slice = std::slice::from_raw_parts(data_ptr, data_len);
        slice.windows(8).any(|w| w == fingerprint)
    };

    assert!(
        !sentinel_found,
        "derived key fingerprint found in memory after SecretBuffer drop"
    );
}

/// Character stored in passphrase buffers under test.
const SENTINEL_CHAR: char = '\u{1F511}';

/// Count sentinel characters left in a freed `Vec<char>` allocation.
fn sentinel_chars_remaining(ptr: *const char, len: usize) -> usize {
    let sentinel = u32::from(SENTINEL_CHAR);
    // SAFETY: Reading freed memory (UB), best-effort smoke test, debug mode
    // only. Read as `u32` so allocator metadata is never treated as a char.
    unsafe {
        std::slice::from_raw_parts(ptr.cast::<u32>(), len)
            .iter()
            .filter(|&&slot| slot == sentinel)
            .count()
    }
}

#[test]
fn passphrase_chars_wiped_after_successful_derivation() {
    let chars = vec![SENTINEL_CHAR; 64];
    let ptr = chars.as_ptr();
    let pass = Passphrase::from_chars(chars);

    let key = derive_key(pass, &[0x22u8; SALT_LEN], &DerivationParams::STANDARD)
        .expect("derive should succeed");
    assert_eq!(key.len(), 64);

    assert_eq!(
        sentinel_chars_remaining(ptr, 64),
        0,
        "passphrase characters survived a successful derivation"
    );
}

#[test]
fn passphrase_chars_wiped_when_salt_is_rejected() {
    let chars = vec![SENTINEL_CHAR; 64];
    let ptr = chars.as_ptr();
    let pass = Passphrase::from_chars(chars);

    let err = derive_key(pass, &[0u8; 3], &DerivationParams::STANDARD)
        .expect_err("3-byte salt must be rejected");
    assert!(matches!(err, VerifierError::InvalidSalt { actual: 3, .. }));

    assert_eq!(
        sentinel_chars_remaining(ptr, 64),
        0,
        "passphrase characters survived the InvalidSalt path"
    );
}

#[test]
fn unused_passphrase_chars_wiped_on_drop() {
    let chars = vec![SENTINEL_CHAR; 64];
    let ptr = chars.as_ptr();
    drop(Passphrase::from_chars(chars));

    assert_eq!(
        sentinel_chars_remaining(ptr, 64),
        0,
        "passphrase characters survived drop"
    );
}

#[test]
fn from_vec_wipes_a_source_with_spare_capacity() {
    let mut data = Vec::with_capacity(4096);
    data.extend(SENTINEL.iter().copied().cycle().take(512));
    let data_ptr = data.as_ptr();

    let buf = SecretBuffer::from_vec(data);
    assert_eq!(&buf.expose()[..4], &SENTINEL);
    assert_ne!(buf.expose().as_ptr(), data_ptr);

    // SAFETY: Reading the freed source allocation (UB), best-effort smoke
    // test, debug mode only.
    let sentinel_found = unsafe {
        let slice = std::slice::from_raw_parts(data_ptr, 512);
        slice.windows(4).any(|w| w == SENTINEL)
    };
    assert!(
        !sentinel_found,
        "source bytes survived SecretBuffer::from_vec"
    );
}
