/*!
 * Dataset source
 *
 * Samples the cleartext dataset uniformly from `0..=u16::MAX` and handles its
 * newline-separated text form.
 */

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::aes::WORDS_PER_BLOCK;
use crate::config::InstanceSize;
use crate::error::{error_codes, OracleError, OracleResult};

/// Sample a dataset of `instance.dataset_len()` integers
///
/// With a seed the output is fully reproducible; without one the generator is
/// seeded from the operating system.
pub fn generate(seed: Option<i64>, instance: InstanceSize) -> Vec<u16> {
    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed as u64),
        None => ChaCha20Rng::from_entropy(),
    };
    (0..instance.dataset_len()).map(|_| rng.gen::<u16>()).collect()
}

/// Check that a dataset fits the instance
///
/// Toy datasets are exactly one block; general datasets fill whole blocks and
/// never exceed the instance bound. Nothing is ever padded.
pub fn validate(values: &[u16], instance: InstanceSize) -> OracleResult<()> {
    match instance {
        InstanceSize::Toy if values.len() != WORDS_PER_BLOCK => Err(OracleError::malformed_length(
            "toy dataset (exactly 8 integers)",
            WORDS_PER_BLOCK,
            values.len(),
            error_codes::DATASET_LENGTH_INVALID,
        )),
        InstanceSize::General { .. } if values.is_empty() || values.len() % WORDS_PER_BLOCK != 0 => {
            Err(OracleError::malformed_length(
                "dataset",
                WORDS_PER_BLOCK,
                values.len(),
                error_codes::DATASET_LENGTH_INVALID,
            ))
        }
        InstanceSize::General { bound } if values.len() > bound => Err(OracleError::invalid_parameter(
            "dataset length",
            &format!("at most {} integers", bound),
            &values.len().to_string(),
            error_codes::DATASET_LENGTH_INVALID,
        )),
        _ => Ok(()),
    }
}

/// Parse newline-separated decimal `u16` values, skipping blank lines
pub fn parse(text: &str) -> OracleResult<Vec<u16>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            line.parse::<u16>().map_err(|e| {
                OracleError::parse_error("db.txt", &format!("value {} ({:?}): {}", i, line, e))
            })
        })
        .collect()
}

/// One decimal value per line, with a trailing newline
pub fn format_lines<T: ToString>(values: &[T]) -> String {
    let mut out = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}
