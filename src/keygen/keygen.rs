use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::InstanceSize;
use crate::error::{error_codes, OracleError, OracleResult};

/// AES-128 key length in bytes
pub const KEY_SIZE: usize = 16;

/// CTR initial counter length in bytes
pub const IV_SIZE: usize = 16;

/// Domain tag prepended to the seed when deriving the IV
pub const IV_TAG: &[u8] = b"iv";

/// AES-128 key derived from the harness seed
///
/// The key bytes are wiped when the value is dropped and never appear in
/// `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AesKey([u8; KEY_SIZE]);

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AesKey").field(&"[REDACTED]").finish()
    }
}

impl AesKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a key from a slice, checking its length
    pub fn from_slice(bytes: &[u8]) -> OracleResult<Self> {
        let array: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            OracleError::invalid_parameter(
                "key",
                "16 bytes",
                &format!("{} bytes", bytes.len()),
                error_codes::INVALID_KEY_LENGTH,
            )
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding, as persisted in `aes_key.hex`
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// CTR initial counter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iv([u8; IV_SIZE]);

impl Iv {
    pub fn from_bytes(bytes: [u8; IV_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> OracleResult<Self> {
        let array: [u8; IV_SIZE] = bytes.try_into().map_err(|_| {
            OracleError::invalid_parameter(
                "iv",
                "16 bytes",
                &format!("{} bytes", bytes.len()),
                error_codes::INVALID_IV_LENGTH,
            )
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; IV_SIZE] {
        &self.0
    }

    /// The IV read as a big-endian 128-bit counter
    pub fn as_counter(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// IV whose big-endian value is `counter`
    pub fn from_counter(counter: u128) -> Self {
        Self(counter.to_be_bytes())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Key material for one run: the key, plus the IV for general instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub key: AesKey,
    pub iv: Option<Iv>,
}

impl KeyMaterial {
    /// Derive all key material the instance needs from `seed`
    ///
    /// Toy instances get no IV at all.
    pub fn derive(seed: i64, instance: InstanceSize) -> Self {
        let iv = if instance.is_toy() {
            None
        } else {
            Some(derive_iv(seed))
        };
        Self {
            key: derive_key(seed),
            iv,
        }
    }
}

fn truncated_digest(parts: &[&[u8]]) -> [u8; 16] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();

    let mut out = [0u8; 16];
    out.copy_from_slice(&digest[..16]);
    out
}

/// Derive the AES key: first 16 bytes of SHA-256 over the seed's decimal string
///
/// # Examples
///
/// ```
/// use transcipher_oracle::keygen::derive_key;
///
/// let key = derive_key(42);
/// assert_eq!(key.to_hex(), "73475cb40a568e8da8a045ced110137e");
/// ```
pub fn derive_key(seed: i64) -> AesKey {
    let decimal = seed.to_string();
    AesKey(truncated_digest(&[decimal.as_bytes()]))
}

/// Derive the CTR IV: first 16 bytes of SHA-256 over `"iv"` followed by the seed's decimal string
pub fn derive_iv(seed: i64) -> Iv {
    let decimal = seed.to_string();
    Iv(truncated_digest(&[IV_TAG, decimal.as_bytes()]))
}
