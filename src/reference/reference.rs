use crate::aes::{AesEngine, CipherMode};
use crate::error::{OracleError, OracleResult};
use crate::keygen::{AesKey, Iv};

/// Ground-truth outputs for one benchmark instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOutputs {
    /// The decrypted dataset
    pub values: Vec<u16>,
    /// Miniworkload #1
    pub max: u16,
    /// Miniworkload #2
    pub inner_product: u16,
}

impl ReferenceOutputs {
    /// Decrypt `ciphertext` and derive the reference outputs
    ///
    /// `mode` must be the mode the dataset was encrypted with; it is never
    /// guessed from the ciphertext.
    pub fn compute(
        key: &AesKey,
        iv: Option<&Iv>,
        mode: CipherMode,
        ciphertext: &[u8],
    ) -> OracleResult<Self> {
        let engine = AesEngine::new(key, mode, iv)?;
        let values = engine.decrypt_words(ciphertext)?;
        Self::from_values(values)
    }

    /// Derive the miniworkloads from an already decrypted sequence
    pub fn from_values(values: Vec<u16>) -> OracleResult<Self> {
        let max = max_value(&values)?;
        let inner_product = inner_product(&values);
        Ok(Self {
            values,
            max,
            inner_product,
        })
    }
}

/// Largest value in the sequence
///
/// # Errors
///
/// Returns `EmptyInput` for an empty sequence.
pub fn max_value(values: &[u16]) -> OracleResult<u16> {
    values
        .iter()
        .copied()
        .max()
        .ok_or_else(|| OracleError::empty_input("max"))
}

/// Inner product of the two halves of the sequence, modulo 2^16
///
/// The first half is `values[..n/2]` and the second half `values[n/2..]`, so
/// for odd `n` the second half is one longer and its last element is never
/// paired. Each product is reduced modulo 2^16, then the sum is reduced again.
///
/// # Examples
///
/// ```
/// use transcipher_oracle::reference::inner_product;
///
/// assert_eq!(inner_product(&[1, 2, 3, 4, 5, 6, 7, 8]), 70);
/// ```
pub fn inner_product(values: &[u16]) -> u16 {
    let (first, second) = values.split_at(values.len() / 2);
    let sum: u64 = first
        .iter()
        .zip(second)
        .map(|(&x, &y)| (u64::from(x) * u64::from(y)) % (1 << 16))
        .sum();
    (sum % (1 << 16)) as u16
}
