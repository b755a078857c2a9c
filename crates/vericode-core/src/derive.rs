//! Keyed digest derivation
//!
//! The hash input is laid out as
//! `len(user) ":" user ":" bucket ":" counter ":" secret`
//! with `counter` rendered as `-` when absent. The length prefix pins the
//! identifier boundary and the middle fields are integers, so distinct
//! (user, bucket, counter, secret) tuples never concatenate to the same bytes.

use sha2::{Digest, Sha256};

use crate::{SecretKey, TimeBucket};

/// Digest width in bytes
pub const DIGEST_BYTES: usize = 32;

/// Digest width in bits
pub const DIGEST_BITS: u32 = (DIGEST_BYTES * 8) as u32;

/// Bits consumed per extraction round
pub const SHIFT_BITS: u32 = 3;

/// 256-bit unsigned integer, big-endian, as produced by SHA-256
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigestInt([u8; DIGEST_BYTES]);

impl DigestInt {
    pub const ZERO: DigestInt = DigestInt([0u8; DIGEST_BYTES]);

    pub fn from_be_bytes(bytes: [u8; DIGEST_BYTES]) -> Self {
        DigestInt(bytes)
    }

    pub fn to_be_bytes(self) -> [u8; DIGEST_BYTES] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// `self mod modulus` by schoolbook long division over the bytes
    pub fn rem(&self, modulus: u32) -> u32 {
        debug_assert!(modulus > 0);
        let m = modulus as u64;
        self.0
            .iter()
            .fold(0u64, |r, &b| ((r << 8) | b as u64) % m) as u32
    }

    /// Logical right shift by `bits` (0..8)
    pub fn shr_assign(&mut self, bits: u32) {
        debug_assert!(bits < 8);
        if bits == 0 {
            return;
        }
        for i in (1..DIGEST_BYTES).rev() {
            self.0[i] = (self.0[i] >> bits) | (self.0[i - 1] << (8 - bits));
        }
        self.0[0] >>= bits;
    }
}

impl std::fmt::Debug for DigestInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DigestInt(0x")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

/// Output of the hash deriver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Derivation {
    /// Digest interpreted as a big-endian integer
    pub value: DigestInt,
    /// Digest width in bits
    pub bits: u32,
}

impl Derivation {
    /// Extraction rounds that still see fresh digest bits.
    /// Later rounds operate on an exhausted (zero) integer.
    pub fn safe_rounds(&self) -> usize {
        (self.bits / SHIFT_BITS) as usize
    }
}

/// Hash (identifier, bucket, counter, secret) into a 256-bit integer.
///
/// This is the only place the secret enters the computation; the input is
/// streamed into the hasher and never assembled into a loggable buffer.
pub fn derive(
    user_id: &str,
    bucket: TimeBucket,
    secret: &SecretKey,
    counter: Option<u64>,
) -> Derivation {
    let mut hasher = Sha256::new();
    hasher.update(user_id.len().to_string().as_bytes());
    hasher.update(b":");
    hasher.update(user_id.as_bytes());
    hasher.update(b":");
    hasher.update(bucket.value().to_string().as_bytes());
    hasher.update(b":");
    match counter {
        Some(c) => hasher.update(c.to_string().as_bytes()),
        None => hasher.update(b"-"),
    }
    hasher.update(b":");
    hasher.update(secret.as_bytes());

    let mut digest = [0u8; DIGEST_BYTES];
    digest.copy_from_slice(&hasher.finalize());
    Derivation {
        value: DigestInt::from_be_bytes(digest),
        bits: DIGEST_BITS,
    }
}
