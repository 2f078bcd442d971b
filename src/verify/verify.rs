use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{OracleError, OracleResult};

/// Exit code for a passing comparison
pub const EXIT_PASS: u8 = 0;

/// Exit code for a mismatch or an unreadable input
pub const EXIT_FAIL: u8 = 1;

/// Result of comparing expected and actual sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Pass {
        expected: Vec<i128>,
        actual: Vec<i128>,
    },
    /// The sequences differ in length or in at least one position
    Mismatch {
        expected: Vec<i128>,
        actual: Vec<i128>,
        first_difference: usize,
    },
    /// One of the inputs could not be read or parsed
    ReadFailure { cause: String },
}

impl VerifyOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, VerifyOutcome::Pass { .. })
    }

    /// Process exit code for the orchestrating caller
    ///
    /// Mismatches and read failures share the failing code; use the variant to
    /// tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            VerifyOutcome::Pass { .. } => EXIT_PASS,
            VerifyOutcome::Mismatch { .. } | VerifyOutcome::ReadFailure { .. } => EXIT_FAIL,
        }
    }

    /// Human-readable report line
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyOutcome::Pass { expected, actual } => write!(
                f,
                "[harness] PASS AES Decryption  (expected={:?}, got={:?})",
                expected, actual
            ),
            VerifyOutcome::Mismatch {
                expected, actual, ..
            } => write!(
                f,
                "[harness] FAIL AES Decryption  (expected={:?}, got={:?})",
                expected, actual
            ),
            VerifyOutcome::ReadFailure { cause } => {
                write!(f, "[harness] failed to read files: {}", cause)
            }
        }
    }
}

/// Parse whitespace-separated decimal integers
///
/// Values are held as `i128`, so a result far outside the `u16` range still
/// compares as a mismatch rather than an unreadable file. Tokens beyond
/// `i128` are reported as parse failures.
pub fn parse_sequence(text: &str, source_name: &str) -> OracleResult<Vec<i128>> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<i128>().map_err(|e| {
                OracleError::parse_error(source_name, &format!("{:?}: {}", token, e))
            })
        })
        .collect()
}

/// Compare two sequences for exact equality
pub fn compare(expected: Vec<i128>, actual: Vec<i128>) -> VerifyOutcome {
    let first_difference = expected
        .iter()
        .zip(&actual)
        .position(|(e, a)| e != a)
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())));

    match first_difference {
        None => VerifyOutcome::Pass { expected, actual },
        Some(first_difference) => VerifyOutcome::Mismatch {
            expected,
            actual,
            first_difference,
        },
    }
}

/// Parse and compare two texts
pub fn verify_texts(expected: &str, actual: &str) -> VerifyOutcome {
    let parsed = parse_sequence(expected, "expected")
        .and_then(|e| parse_sequence(actual, "result").map(|a| (e, a)));
    match parsed {
        Ok((expected, actual)) => compare(expected, actual),
        Err(e) => VerifyOutcome::ReadFailure {
            cause: e.to_string(),
        },
    }
}

/// Read, parse and compare the expected and result files
pub fn verify_files(expected_path: &Path, result_path: &Path) -> VerifyOutcome {
    let read = |path: &Path| {
        fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))
    };
    let texts = read(expected_path).and_then(|e| read(result_path).map(|r| (e, r)));

    let outcome = match texts {
        Ok((expected, actual)) => verify_texts(&expected, &actual),
        Err(cause) => VerifyOutcome::ReadFailure { cause },
    };

    match &outcome {
        VerifyOutcome::Pass { actual, .. } => {
            log::info!("verification passed ({} values)", actual.len())
        }
        VerifyOutcome::Mismatch {
            first_difference, ..
        } => log::warn!("verification failed at index {}", first_difference),
        VerifyOutcome::ReadFailure { cause } => log::error!("verification aborted: {}", cause),
    }
    outcome
}
