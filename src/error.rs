/*!
 * Error Handling for the Transciphering Oracle
 *
 * Provides the error taxonomy shared by every stage of the harness, with
 * numeric error codes and user-friendly messages for operator diagnostics.
 */

use thiserror::Error;

/// Error type for all generation, encryption and reference operations
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Malformed length for {what}: expected a multiple of {block_width}, got {actual}")]
    MalformedLength {
        what: String,
        block_width: usize,
        actual: usize,
        error_code: u32,
    },

    #[error("Mode/length mismatch: {mode} expects {expected} bytes, got {actual}")]
    ModeLengthMismatch {
        mode: String,
        expected: usize,
        actual: usize,
        error_code: u32,
    },

    #[error("Missing dependency: {artifact} ({cause})")]
    MissingDependency {
        artifact: String,
        cause: String,
        error_code: u32,
    },

    #[error("Empty input for {operation}")]
    EmptyInput { operation: String, error_code: u32 },

    #[error("Parse error in {source_name}: {cause}")]
    ParseError {
        source_name: String,
        cause: String,
        error_code: u32,
    },

    #[error("Hex decoding error: {0}")]
    HexError(String),

    #[error("Invalid parameter: {parameter} - {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Error code constants for different error categories
pub mod error_codes {
    // Length and layout errors: 1000-1999
    pub const DATASET_LENGTH_INVALID: u32 = 1001;
    pub const CIPHERTEXT_LENGTH_INVALID: u32 = 1002;
    pub const WORD_BUFFER_LENGTH_INVALID: u32 = 1003;
    pub const ECB_SINGLE_BLOCK_REQUIRED: u32 = 1004;

    // Artifact errors: 2000-2999
    pub const KEY_ARTIFACT_MISSING: u32 = 2001;
    pub const IV_ARTIFACT_MISSING: u32 = 2002;
    pub const CIPHERTEXT_ARTIFACT_MISSING: u32 = 2003;
    pub const DATASET_ARTIFACT_MISSING: u32 = 2004;
    pub const ARTIFACT_PARSE_FAILED: u32 = 2005;

    // Computation errors: 3000-3999
    pub const EMPTY_SEQUENCE: u32 = 3001;

    // Parameter errors: 4000-4999
    pub const INVALID_INSTANCE_SIZE: u32 = 4001;
    pub const INVALID_KEY_LENGTH: u32 = 4002;
    pub const INVALID_IV_LENGTH: u32 = 4003;
    pub const MISSING_SEED: u32 = 4004;

    // Generic errors: 9000-9999
    pub const HEX_DECODING_FAILED: u32 = 9001;
    pub const IO_FAILED: u32 = 9002;
    pub const CONFIG_FAILED: u32 = 9003;
}

impl OracleError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            OracleError::MalformedLength { error_code, .. } => *error_code,
            OracleError::ModeLengthMismatch { error_code, .. } => *error_code,
            OracleError::MissingDependency { error_code, .. } => *error_code,
            OracleError::EmptyInput { error_code, .. } => *error_code,
            OracleError::ParseError { error_code, .. } => *error_code,
            OracleError::InvalidParameter { error_code, .. } => *error_code,
            OracleError::HexError(_) => error_codes::HEX_DECODING_FAILED,
            OracleError::IoError(_) => error_codes::IO_FAILED,
            OracleError::ConfigError(_) => error_codes::CONFIG_FAILED,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            OracleError::MalformedLength { what, block_width, .. } => format!(
                "The {} does not fill whole blocks of {}. Inputs are never padded.",
                what, block_width
            ),
            OracleError::ModeLengthMismatch { mode, expected, .. } => format!(
                "{} mode works on exactly {} bytes. Check the instance size.",
                mode, expected
            ),
            OracleError::MissingDependency { artifact, .. } => format!(
                "Required artifact '{}' is missing. Run the earlier harness stages first.",
                artifact
            ),
            OracleError::EmptyInput { operation, .. } => {
                format!("Operation '{}' needs at least one value.", operation)
            }
            OracleError::ParseError { source_name, .. } => format!(
                "Could not parse '{}'. The file may be truncated or corrupted.",
                source_name
            ),
            OracleError::HexError(_) => {
                "Hex artifact could not be decoded. The file may be corrupted.".to_string()
            }
            OracleError::InvalidParameter {
                parameter,
                expected,
                ..
            } => format!(
                "Invalid parameter '{}'. Expected '{}'.",
                parameter, expected
            ),
            OracleError::ConfigError(_) => {
                "Harness configuration could not be loaded. Check the config file.".to_string()
            }
            OracleError::IoError(_) => {
                "Input/output operation failed. Check file permissions and disk space.".to_string()
            }
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            OracleError::MalformedLength { .. } => "MalformedLength",
            OracleError::ModeLengthMismatch { .. } => "ModeLengthMismatch",
            OracleError::MissingDependency { .. } => "MissingDependency",
            OracleError::EmptyInput { .. } => "EmptyInput",
            OracleError::ParseError { .. } => "ParseError",
            OracleError::HexError(_) => "HexError",
            OracleError::InvalidParameter { .. } => "InvalidParameter",
            OracleError::ConfigError(_) => "ConfigError",
            OracleError::IoError(_) => "IoError",
        }
    }
}

/// Convenience constructors for common error types
impl OracleError {
    pub fn malformed_length(what: &str, block_width: usize, actual: usize, error_code: u32) -> Self {
        OracleError::MalformedLength {
            what: what.to_string(),
            block_width,
            actual,
            error_code,
        }
    }

    pub fn mode_length_mismatch(mode: &str, expected: usize, actual: usize) -> Self {
        OracleError::ModeLengthMismatch {
            mode: mode.to_string(),
            expected,
            actual,
            error_code: error_codes::ECB_SINGLE_BLOCK_REQUIRED,
        }
    }

    pub fn missing_dependency(artifact: &str, cause: &str, error_code: u32) -> Self {
        OracleError::MissingDependency {
            artifact: artifact.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }

    pub fn empty_input(operation: &str) -> Self {
        OracleError::EmptyInput {
            operation: operation.to_string(),
            error_code: error_codes::EMPTY_SEQUENCE,
        }
    }

    pub fn parse_error(source_name: &str, cause: &str) -> Self {
        OracleError::ParseError {
            source_name: source_name.to_string(),
            cause: cause.to_string(),
            error_code: error_codes::ARTIFACT_PARSE_FAILED,
        }
    }

    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str, error_code: u32) -> Self {
        OracleError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    /// Prefix a decoding error with the artifact it came from
    pub fn in_artifact(self, file_name: &str) -> Self {
        match self {
            OracleError::HexError(cause) => {
                OracleError::HexError(format!("{}: {}", file_name, cause))
            }
            other => other,
        }
    }

    /// Whether this error means an upstream artifact was never written
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, OracleError::MissingDependency { .. })
    }
}

// From implementations for automatic error conversion
impl From<std::io::Error> for OracleError {
    fn from(err: std::io::Error) -> Self {
        OracleError::IoError(format!("IO operation failed: {}", err))
    }
}

impl From<hex::FromHexError> for OracleError {
    fn from(err: hex::FromHexError) -> Self {
        OracleError::HexError(err.to_string())
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        OracleError::ConfigError(err.to_string())
    }
}

/// Result type alias for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;
