use ::aes::cipher::{
    generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit, KeyIvInit, StreamCipher,
};
use ::aes::Aes128;
use std::fmt;

use crate::error::{error_codes, OracleError, OracleResult};
use crate::keygen::{AesKey, Iv};

/// AES block width in bytes
pub const BLOCK_SIZE: usize = 16;

/// Number of big-endian `u16` words in one block
pub const WORDS_PER_BLOCK: usize = BLOCK_SIZE / 2;

/// AES-128 in CTR mode with a full 128-bit big-endian counter
type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Block cipher mode of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// Raw permutation over exactly one block
    Ecb,
    /// Keystream from the IV counter, incremented once per block
    Ctr,
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherMode::Ecb => write!(f, "ECB"),
            CipherMode::Ctr => write!(f, "CTR"),
        }
    }
}

/// Pack integers as consecutive big-endian 2-byte words
///
/// # Examples
///
/// ```
/// use transcipher_oracle::aes::encode_words;
///
/// assert_eq!(encode_words(&[1, 0x0203]), vec![0x00, 0x01, 0x02, 0x03]);
/// ```
pub fn encode_words(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// Unpack a byte buffer into big-endian `u16` words
///
/// # Errors
///
/// Returns `MalformedLength` if the buffer has an odd number of bytes.
pub fn decode_words(bytes: &[u8]) -> OracleResult<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return Err(OracleError::malformed_length(
            "word buffer",
            2,
            bytes.len(),
            error_codes::WORD_BUFFER_LENGTH_INVALID,
        ));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

/// Keyed AES-128 engine bound to one mode of operation
///
/// The mode is fixed at construction so callers resolve it once per run.
/// CTR engines always carry their initial counter.
///
/// # Examples
///
/// ```
/// use transcipher_oracle::aes::{AesEngine, CipherMode};
/// use transcipher_oracle::keygen::derive_key;
///
/// let key = derive_key(42);
/// let engine = AesEngine::new(&key, CipherMode::Ecb, None).unwrap();
///
/// let block = [0u8; 16];
/// let ciphertext = engine.encrypt(&block).unwrap();
/// assert_eq!(engine.decrypt(&ciphertext).unwrap(), block);
/// ```
#[derive(Clone)]
pub struct AesEngine {
    key: AesKey,
    mode: CipherMode,
    iv: Option<Iv>,
}

impl fmt::Debug for AesEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesEngine")
            .field("cipher", &"[AES-128]")
            .field("mode", &self.mode)
            .field("iv", &self.iv)
            .finish()
    }
}

impl AesEngine {
    /// Create an engine for `mode`
    ///
    /// # Errors
    ///
    /// Returns `MissingDependency` when CTR mode is requested without an IV.
    pub fn new(key: &AesKey, mode: CipherMode, iv: Option<&Iv>) -> OracleResult<Self> {
        if mode == CipherMode::Ctr && iv.is_none() {
            return Err(OracleError::missing_dependency(
                "aes_iv.hex",
                "CTR mode requires an initial counter",
                error_codes::IV_ARTIFACT_MISSING,
            ));
        }
        Ok(Self {
            key: key.clone(),
            mode,
            iv: iv.copied(),
        })
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Encrypt a block-aligned buffer
    pub fn encrypt(&self, plaintext: &[u8]) -> OracleResult<Vec<u8>> {
        match self.mode {
            CipherMode::Ecb => ecb_encrypt_block(&self.key, plaintext),
            CipherMode::Ctr => ctr_apply(&self.key, self.counter()?, plaintext),
        }
    }

    /// Decrypt a block-aligned buffer
    pub fn decrypt(&self, ciphertext: &[u8]) -> OracleResult<Vec<u8>> {
        match self.mode {
            CipherMode::Ecb => ecb_decrypt_block(&self.key, ciphertext),
            CipherMode::Ctr => ctr_apply(&self.key, self.counter()?, ciphertext),
        }
    }

    /// Encode and encrypt an integer sequence
    pub fn encrypt_words(&self, words: &[u16]) -> OracleResult<Vec<u8>> {
        self.encrypt(&encode_words(words))
    }

    /// Decrypt and decode an integer sequence
    pub fn decrypt_words(&self, ciphertext: &[u8]) -> OracleResult<Vec<u16>> {
        decode_words(&self.decrypt(ciphertext)?)
    }

    fn counter(&self) -> OracleResult<&Iv> {
        self.iv.as_ref().ok_or_else(|| {
            OracleError::missing_dependency(
                "aes_iv.hex",
                "CTR mode requires an initial counter",
                error_codes::IV_ARTIFACT_MISSING,
            )
        })
    }
}

fn check_single_block(data: &[u8]) -> OracleResult<()> {
    if data.len() != BLOCK_SIZE {
        return Err(OracleError::mode_length_mismatch(
            "ECB",
            BLOCK_SIZE,
            data.len(),
        ));
    }
    Ok(())
}

/// Apply the forward AES-128 permutation to exactly one block
pub fn ecb_encrypt_block(key: &AesKey, block: &[u8]) -> OracleResult<Vec<u8>> {
    check_single_block(block)?;
    let cipher = Aes128::new(GenericArray::from_slice(key.as_bytes()));
    let mut block = GenericArray::clone_from_slice(block);
    cipher.encrypt_block(&mut block);
    Ok(block.to_vec())
}

/// Apply the inverse AES-128 permutation to exactly one block
pub fn ecb_decrypt_block(key: &AesKey, block: &[u8]) -> OracleResult<Vec<u8>> {
    check_single_block(block)?;
    let cipher = Aes128::new(GenericArray::from_slice(key.as_bytes()));
    let mut block = GenericArray::clone_from_slice(block);
    cipher.decrypt_block(&mut block);
    Ok(block.to_vec())
}

/// XOR `data` with the AES-128 CTR keystream starting at `iv`
///
/// Block `i` uses the counter `(iv + i) mod 2^128`, encoded big-endian.
/// Encryption and decryption are the same operation.
///
/// # Errors
///
/// Returns `MalformedLength` if `data` is empty or not a whole number of blocks.
pub fn ctr_apply(key: &AesKey, iv: &Iv, data: &[u8]) -> OracleResult<Vec<u8>> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(OracleError::malformed_length(
            "CTR buffer",
            BLOCK_SIZE,
            data.len(),
            error_codes::CIPHERTEXT_LENGTH_INVALID,
        ));
    }

    let mut cipher = Aes128Ctr::new(
        GenericArray::from_slice(key.as_bytes()),
        GenericArray::from_slice(iv.as_bytes()),
    );
    let mut buffer = data.to_vec();
    cipher.try_apply_keystream(&mut buffer).map_err(|_| {
        OracleError::invalid_parameter(
            "data",
            "at most 2^128 blocks",
            &format!("{} bytes", data.len()),
            error_codes::CIPHERTEXT_LENGTH_INVALID,
        )
    })?;
    Ok(buffer)
}
