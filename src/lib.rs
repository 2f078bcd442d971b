/*!
 * Transciphering Oracle
 *
 * Deterministic test-vector generator and correctness oracle for benchmarks of
 * encrypted-computation (FHE transciphering) pipelines.
 *
 * From a single integer seed the crate:
 *
 * - samples a reproducible dataset of 16-bit integers
 * - derives an AES-128 key, and for general instances a CTR initial counter
 * - encrypts the dataset with AES-ECB (toy instance) or AES-CTR (general instances)
 * - decrypts independently to produce the ground truth the pipeline must reproduce
 * - compares the pipeline's results against that ground truth
 *
 * Stages communicate through an [`store::ArtifactStore`], so they can run as
 * separate processes against a directory or in memory inside tests.
 */

/// AES-128 ECB/CTR engine and big-endian word packing
pub mod aes;

/// Instance sizing and harness configuration
pub mod config;

/// Seeded dataset sampling and dataset text format
pub mod dataset;

/// Error types for every harness stage
pub mod error;

/// Seed-based key and IV derivation
pub mod keygen;

/// Harness stages over an artifact store
pub mod pipeline;

/// Cleartext reference outputs (decrypted sequence, max, inner product)
pub mod reference;

/// Artifact persistence
pub mod store;

/// Exact-match verification of pipeline results
pub mod verify;

// Re-export main types for convenience
pub use self::aes::{AesEngine, CipherMode};
pub use config::{HarnessConfig, InstanceSize};
pub use error::{OracleError, OracleResult};
pub use keygen::{AesKey, Iv, KeyMaterial};
pub use reference::ReferenceOutputs;
pub use store::{Artifact, ArtifactStore, FsStore, MemoryStore};
pub use verify::VerifyOutcome;

/// The most commonly used types and functions
pub mod prelude {
    pub use crate::aes::{decode_words, encode_words, AesEngine, CipherMode};
    pub use crate::config::{HarnessConfig, InstanceSize};
    pub use crate::error::{OracleError, OracleResult};
    pub use crate::keygen::{derive_iv, derive_key, AesKey, Iv, KeyMaterial};
    pub use crate::pipeline::{cleartext_reference, generate_dataset, keygen_and_encrypt, run_all};
    pub use crate::reference::{inner_product, max_value, ReferenceOutputs};
    pub use crate::store::{Artifact, ArtifactStore, FsStore, MemoryStore};
    pub use crate::verify::{verify_files, VerifyOutcome};
}
