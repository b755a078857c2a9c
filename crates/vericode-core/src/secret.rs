//! Shared secret handling

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::{VericodeError, VericodeResult};

/// Length of generated secrets in bytes (256 bits)
pub const GENERATED_SECRET_LEN: usize = 32;

/// Shared secret bound into every derived code.
/// INVARIANT: never empty. Wiped on drop, redacted in `Debug`, no `Display`.
#[derive(Clone)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wrap caller-provided secret material
    pub fn new(bytes: impl Into<Vec<u8>>) -> VericodeResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(VericodeError::EmptySecret);
        }
        Ok(SecretKey { bytes })
    }

    /// Generate a fresh random secret from the OS CSPRNG, hex-encoded so it
    /// can be pasted into an environment variable or config file.
    pub fn generate() -> Self {
        let mut raw = [0u8; GENERATED_SECRET_LEN];
        OsRng.fill_bytes(&mut raw);
        let mut hex = String::with_capacity(GENERATED_SECRET_LEN * 2);
        for b in raw {
            hex.push(char::from_digit((b >> 4) as u32, 16).unwrap_or('0'));
            hex.push(char::from_digit((b & 0x0f) as u32, 16).unwrap_or('0'));
        }
        raw.zeroize();
        SecretKey {
            bytes: hex.into_bytes(),
        }
    }

    /// Raw secret bytes (for hashing only)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl TryFrom<&str> for SecretKey {
    type Error = VericodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        SecretKey::new(value.as_bytes())
    }
}

impl TryFrom<String> for SecretKey {
    type Error = VericodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SecretKey::new(value.into_bytes())
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}
