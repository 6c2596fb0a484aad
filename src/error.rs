//! Error types for the armcost normalization pipeline.
//!
//! This module provides the error hierarchy for all operations in the
//! pipeline: configuration loading, plan parsing and normalization, and
//! external planning-tool invocation.
//!
//! Every variant here is a *fatal* condition: soft conditions (an unmapped
//! resource type, a registry miss) never become error values, they are
//! converted into annotated outcomes in the result sequences.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the armcost pipeline.
#[derive(Debug, Error)]
pub enum ArmCostError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan parsing and normalization errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// External planning-tool errors.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration or plan file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },

    /// A required configuration field is missing.
    #[error("Missing required configuration field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// No provider could be determined for the project path.
    #[error("Could not detect a provider for: {path}")]
    UnknownProjectType {
        /// The path that failed detection.
        path: PathBuf,
    },
}

/// Plan parsing and normalization errors.
///
/// These cover the fatal half of the error taxonomy: an envelope that fails
/// to parse, a what-if operation that did not succeed, or a resource payload
/// the pipeline does not recognize. All of them abort the run with no
/// partial output.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The what-if envelope failed to deserialize.
    #[error("Failed to unmarshal what-if operation result: {message}")]
    UnmarshalFailed {
        /// Description of the deserialization failure.
        message: String,
    },

    /// The what-if operation reported a non-success status.
    #[error("What-if operation was not successful (status: {status})")]
    OperationFailed {
        /// Status string reported by the operation.
        status: String,
        /// Structured error detail from the envelope, if present.
        detail: Option<String>,
    },

    /// A resource payload is missing its type or identifier field.
    ///
    /// This indicates the upstream plan format is unrecognized, so the
    /// whole run aborts rather than producing partial output.
    #[error("Failed to parse resource data for '{resource_id}': {message}")]
    MalformedResource {
        /// Provider-native identifier of the offending change.
        resource_id: String,
        /// Description of what was missing.
        message: String,
    },
}

/// External planning-tool errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The external binary could not be started.
    #[error("Failed to run '{binary}': {message}")]
    SpawnFailed {
        /// Binary that failed to start.
        binary: String,
        /// Description of the spawn failure.
        message: String,
    },

    /// The external binary exited with a non-zero status.
    #[error("'{binary}' exited with status {status}")]
    NonZeroExit {
        /// Binary that failed.
        binary: String,
        /// Exit status description.
        status: String,
        /// Captured stderr output.
        stderr: String,
    },

    /// The requested deployment scope is not supported.
    #[error("Unsupported deployment scope: {scope}")]
    UnsupportedScope {
        /// The unsupported scope.
        scope: String,
    },
}

/// Result type alias for armcost operations.
pub type Result<T> = std::result::Result<T, ArmCostError>;

impl ArmCostError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl PlanError {
    /// Creates an unmarshal error with the given message.
    #[must_use]
    pub fn unmarshal(message: impl Into<String>) -> Self {
        Self::UnmarshalFailed {
            message: message.into(),
        }
    }

    /// Creates a malformed-resource error for the given change.
    #[must_use]
    pub fn malformed(resource_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResource {
            resource_id: resource_id.into(),
            message: message.into(),
        }
    }
}

impl CommandError {
    /// Creates a spawn error for the given binary.
    #[must_use]
    pub fn spawn(binary: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SpawnFailed {
            binary: binary.into(),
            message: message.into(),
        }
    }
}
