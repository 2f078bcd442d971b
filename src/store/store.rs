use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{error_codes, OracleError, OracleResult};

/// Named artifacts exchanged between harness stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Cleartext dataset, one decimal integer per line
    Dataset,
    /// AES key as lowercase hex
    Key,
    /// CTR initial counter as lowercase hex (general instances only)
    Iv,
    /// Encrypted dataset as lowercase hex
    Ciphertext,
    /// Decrypted reference sequence, one decimal integer per line
    ExpectedAes,
    /// Maximum of the reference sequence
    MaxValue,
    /// Inner product of the reference sequence halves
    InnerProduct,
}

impl Artifact {
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::Dataset => "db.txt",
            Artifact::Key => "aes_key.hex",
            Artifact::Iv => "aes_iv.hex",
            Artifact::Ciphertext => "db.hex",
            Artifact::ExpectedAes => "expected_aes.txt",
            Artifact::MaxValue => "max_value.txt",
            Artifact::InnerProduct => "inner_product.txt",
        }
    }

    fn missing_code(&self) -> u32 {
        match self {
            Artifact::Key => error_codes::KEY_ARTIFACT_MISSING,
            Artifact::Iv => error_codes::IV_ARTIFACT_MISSING,
            Artifact::Ciphertext => error_codes::CIPHERTEXT_ARTIFACT_MISSING,
            Artifact::Dataset => error_codes::DATASET_ARTIFACT_MISSING,
            _ => error_codes::IO_FAILED,
        }
    }

    /// Error reported when this artifact has not been written yet
    pub fn missing(&self, cause: &str) -> OracleError {
        OracleError::missing_dependency(self.file_name(), cause, self.missing_code())
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Storage for the artifacts of one benchmark instance
pub trait ArtifactStore {
    /// Write `text` as the full contents of `artifact`
    fn write_text(&mut self, artifact: Artifact, text: &str) -> OracleResult<()>;

    /// Read the full contents of `artifact`
    ///
    /// # Errors
    ///
    /// Returns `MissingDependency` if the artifact was never written.
    fn read_text(&self, artifact: Artifact) -> OracleResult<String>;

    fn contains(&self, artifact: Artifact) -> bool;

    /// Write bytes as a lowercase hex string
    fn write_hex(&mut self, artifact: Artifact, bytes: &[u8]) -> OracleResult<()> {
        self.write_text(artifact, &hex::encode(bytes))
    }

    /// Read a hex artifact back into bytes, ignoring surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `HexError` naming the artifact if the contents are not hex.
    fn read_hex(&self, artifact: Artifact) -> OracleResult<Vec<u8>> {
        let text = self.read_text(artifact)?;
        hex::decode(text.trim())
            .map_err(|e| OracleError::from(e).in_artifact(artifact.file_name()))
    }

    /// Remove `artifact` if present
    fn discard(&mut self, artifact: Artifact) -> OracleResult<()>;
}

/// Artifact store backed by a directory
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }
}

impl ArtifactStore for FsStore {
    fn write_text(&mut self, artifact: Artifact, text: &str) -> OracleResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_of(artifact);
        fs::write(&path, text)?;
        log::debug!("wrote {} ({} bytes)", path.display(), text.len());
        Ok(())
    }

    fn read_text(&self, artifact: Artifact) -> OracleResult<String> {
        let path = self.path_of(artifact);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(artifact.missing(&format!("{} not found", path.display())))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, artifact: Artifact) -> bool {
        self.path_of(artifact).is_file()
    }

    fn discard(&mut self, artifact: Artifact) -> OracleResult<()> {
        let path = self.path_of(artifact);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory artifact store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<Artifact, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove(&mut self, artifact: Artifact) -> Option<String> {
        self.entries.remove(&artifact)
    }
}

impl ArtifactStore for MemoryStore {
    fn write_text(&mut self, artifact: Artifact, text: &str) -> OracleResult<()> {
        self.entries.insert(artifact, text.to_string());
        Ok(())
    }

    fn read_text(&self, artifact: Artifact) -> OracleResult<String> {
        self.entries
            .get(&artifact)
            .cloned()
            .ok_or_else(|| artifact.missing("not present in memory store"))
    }

    fn contains(&self, artifact: Artifact) -> bool {
        self.entries.contains_key(&artifact)
    }

    fn discard(&mut self, artifact: Artifact) -> OracleResult<()> {
        self.remove(artifact);
        Ok(())
    }
}
