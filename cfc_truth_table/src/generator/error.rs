use crate::config::ConfigError;
use crate::logging::{codes, Code};
use crate::report::ReportError;
use crate::space::ConfigurationKeyError;

/// Errors that end a generator run or query
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Output failed: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration key: {0}")]
    ConfigurationKey(#[from] ConfigurationKeyError),

    #[error("Truth table invariant violated for {key}: {detail}")]
    InvariantViolation { key: String, detail: String },

    #[error("Unknown artifact '{artifact}'")]
    UnknownArtifact { artifact: String },

    #[error("Unknown strategy '{name}' (expected one of: {known})")]
    UnknownStrategy { name: String, known: String },

    #[error("Query output failed: {0}")]
    QueryOutput(#[from] serde_json::Error),
}

impl GeneratorError {
    pub fn invariant_violation(key: &str, detail: &str) -> Self {
        Self::InvariantViolation {
            key: key.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Log code for this failure
    pub fn code(&self) -> Code {
        match self {
            GeneratorError::Report(error) => error.code(),
            GeneratorError::Config(ConfigError::Unreadable { .. }) => {
                codes::config::PREFERENCES_UNREADABLE
            }
            GeneratorError::Config(ConfigError::Malformed { .. }) => {
                codes::config::PREFERENCES_MALFORMED
            }
            GeneratorError::Config(ConfigError::InvalidValue { .. }) => {
                codes::config::INVALID_PREFERENCE_VALUE
            }
            GeneratorError::ConfigurationKey(_) => codes::derivation::UNKNOWN_CONFIGURATION_KEY,
            GeneratorError::InvariantViolation { .. } => codes::derivation::INVARIANT_VIOLATION,
            GeneratorError::UnknownArtifact { .. } => codes::derivation::UNKNOWN_ARTIFACT,
            GeneratorError::UnknownStrategy { .. } => codes::derivation::UNKNOWN_STRATEGY,
            GeneratorError::QueryOutput(_) => codes::output::SERIALIZATION_FAILED,
        }
    }
}
