/// Identity-key parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationKeyError {
    #[error("Configuration key '{key}' is missing the {dimension} segment")]
    MissingDimension {
        key: String,
        dimension: &'static str,
    },

    #[error("Configuration key '{key}' has unknown {dimension} value '{value}'")]
    UnknownValue {
        key: String,
        dimension: &'static str,
        value: String,
    },

    #[error("Configuration key '{key}' has unexpected trailing input '{trailing}'")]
    TrailingInput { key: String, trailing: String },
}
