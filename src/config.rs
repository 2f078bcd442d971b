/*!
 * Harness Configuration
 *
 * Instance sizing and the explicit configuration value threaded through every
 * stage of the harness. Nothing here is global: each stage receives the
 * `HarnessConfig` it runs under.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::aes::{CipherMode, WORDS_PER_BLOCK};
use crate::error::{error_codes, OracleError, OracleResult};

/// Number of integers in the toy dataset (exactly one AES block)
pub const TOY_DATASET_LEN: usize = WORDS_PER_BLOCK;

/// Dataset bound for the `small` instance
pub const SMALL_DATASET_BOUND: usize = 1024;

/// Dataset bound for the `medium` instance
pub const MEDIUM_DATASET_BOUND: usize = 16_384;

/// Dataset bound for the `large` instance
pub const LARGE_DATASET_BOUND: usize = 262_144;

/// Benchmark instance, resolved once from the size discriminator
///
/// `Toy` is a single 8-integer block encrypted with AES-ECB. `General`
/// instances carry `bound` integers (a multiple of 8) encrypted with AES-CTR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstanceSize {
    Toy,
    General { bound: usize },
}

impl InstanceSize {
    /// Resolve the externally supplied size discriminator
    ///
    /// `0` selects the toy instance; `1`, `2` and `3` select the small,
    /// medium and large general instances.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for any other discriminator.
    pub fn from_discriminator(size: u32) -> OracleResult<Self> {
        match size {
            0 => Ok(InstanceSize::Toy),
            1 => Ok(InstanceSize::General {
                bound: SMALL_DATASET_BOUND,
            }),
            2 => Ok(InstanceSize::General {
                bound: MEDIUM_DATASET_BOUND,
            }),
            3 => Ok(InstanceSize::General {
                bound: LARGE_DATASET_BOUND,
            }),
            other => Err(OracleError::invalid_parameter(
                "size",
                "0 (toy), 1 (small), 2 (medium) or 3 (large)",
                &other.to_string(),
                error_codes::INVALID_INSTANCE_SIZE,
            )),
        }
    }

    /// General instance with a custom dataset bound
    pub fn general(bound: usize) -> OracleResult<Self> {
        if bound == 0 || bound % WORDS_PER_BLOCK != 0 {
            return Err(OracleError::invalid_parameter(
                "bound",
                "a nonzero multiple of 8",
                &bound.to_string(),
                error_codes::INVALID_INSTANCE_SIZE,
            ));
        }
        Ok(InstanceSize::General { bound })
    }

    /// Directory name used for this instance's artifacts
    pub fn name(&self) -> &'static str {
        match self {
            InstanceSize::Toy => "toy",
            InstanceSize::General {
                bound: SMALL_DATASET_BOUND,
            } => "small",
            InstanceSize::General {
                bound: MEDIUM_DATASET_BOUND,
            } => "medium",
            InstanceSize::General {
                bound: LARGE_DATASET_BOUND,
            } => "large",
            InstanceSize::General { .. } => "custom",
        }
    }

    /// Number of integers the dataset source produces
    pub fn dataset_len(&self) -> usize {
        match self {
            InstanceSize::Toy => TOY_DATASET_LEN,
            InstanceSize::General { bound } => *bound,
        }
    }

    pub fn is_toy(&self) -> bool {
        matches!(self, InstanceSize::Toy)
    }

    /// Block cipher mode used for this instance
    pub fn cipher_mode(&self) -> CipherMode {
        match self {
            InstanceSize::Toy => CipherMode::Ecb,
            InstanceSize::General { .. } => CipherMode::Ctr,
        }
    }
}

impl fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceSize::Toy => write!(f, "toy"),
            InstanceSize::General { bound } => write!(f, "{} ({} integers)", self.name(), bound),
        }
    }
}

/// Configuration for one harness run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Root directory holding `datasets/` and `io/`
    pub root: PathBuf,
    pub instance: InstanceSize,
    /// Seed for dataset sampling and key/IV derivation
    #[serde(default)]
    pub seed: Option<i64>,
}

impl HarnessConfig {
    pub fn new(root: impl Into<PathBuf>, instance: InstanceSize, seed: Option<i64>) -> Self {
        Self {
            root: root.into(),
            instance,
            seed,
        }
    }

    /// Load a configuration from a JSON file
    ///
    /// # Example file
    ///
    /// ```json
    /// { "root": ".", "instance": { "kind": "general", "bound": 1024 }, "seed": 7 }
    /// ```
    pub fn from_json_file(path: &Path) -> OracleResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OracleError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: HarnessConfig = serde_json::from_str(&text)?;
        if let InstanceSize::General { bound } = config.instance {
            InstanceSize::general(bound)?;
        }
        Ok(config)
    }

    /// Directory holding the dataset, key material and reference outputs
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("datasets").join(self.instance.name())
    }

    /// Directory the external pipeline writes its results into
    pub fn io_dir(&self) -> PathBuf {
        self.root.join("io").join(self.instance.name())
    }

    /// The seed, or an error if the caller did not supply one
    pub fn require_seed(&self) -> OracleResult<i64> {
        self.seed.ok_or_else(|| {
            OracleError::invalid_parameter(
                "seed",
                "an integer seed",
                "none",
                error_codes::MISSING_SEED,
            )
        })
    }
}
