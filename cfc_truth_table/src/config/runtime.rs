// RUNTIME PREFERENCES

use super::constants::output::{DEFAULT_DATA_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_FILE};
use super::error::ConfigError;
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable names for configuration
pub mod env_vars {
    pub const OUTPUT_DIR: &str = "CFC_OUTPUT_DIR";
    pub const DATA_FILE: &str = "CFC_DATA_FILE";
    pub const REPORT_FILE: &str = "CFC_REPORT_FILE";
    pub const PRETTY_JSON: &str = "CFC_PRETTY_JSON";
    pub const EMIT_HTML: &str = "CFC_EMIT_HTML";
    pub const VERIFY_INVARIANTS: &str = "CFC_VERIFY_INVARIANTS";

    // Logging
    pub const LOG_LEVEL: &str = "CFC_LOG_LEVEL";
    pub const LOG_STRUCTURED: &str = "CFC_LOG_STRUCTURED";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// JSON lines instead of human-readable text
    pub use_structured_logging: bool,

    /// Least severe level that is still emitted
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

impl LoggingPreferences {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            use_structured_logging: lookup(env_vars::LOG_STRUCTURED)
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: lookup(env_vars::LOG_LEVEL)
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorPreferences {
    /// Directory receiving the data file and report
    pub output_dir: PathBuf,

    pub data_file_name: String,

    pub report_file_name: String,

    /// Indent the data file
    pub pretty_json: bool,

    /// Write the HTML report next to the data file
    pub emit_html: bool,

    /// Run the consistency check on the built table before writing
    pub verify_invariants: bool,

    pub logging: LoggingPreferences,
}

impl Default for GeneratorPreferences {
    fn default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

/// Preferences file contents; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesFile {
    pub output_dir: Option<PathBuf>,
    pub data_file_name: Option<String>,
    pub report_file_name: Option<String>,
    pub pretty_json: Option<bool>,
    pub emit_html: Option<bool>,
    pub verify_invariants: Option<bool>,
    pub logging: Option<LoggingFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingFile {
    pub use_structured_logging: Option<bool>,
    pub min_log_level: Option<LogLevel>,
}

impl GeneratorPreferences {
    /// Environment values over built-in defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            output_dir: lookup(env_vars::OUTPUT_DIR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            data_file_name: lookup(env_vars::DATA_FILE)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            report_file_name: lookup(env_vars::REPORT_FILE)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REPORT_FILE.to_string()),
            pretty_json: lookup(env_vars::PRETTY_JSON)
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            emit_html: lookup(env_vars::EMIT_HTML)
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            verify_invariants: lookup(env_vars::VERIFY_INVARIANTS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            logging: LoggingPreferences::from_lookup(&lookup),
        }
    }

    /// Defaults and environment, overridden by a TOML preferences file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let file: PreferencesFile =
            toml::from_str(&text).map_err(|source| ConfigError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let preferences = Self::default().apply_file(file);
        preferences.validate()?;
        Ok(preferences)
    }

    /// Overlay the keys present in a preferences file
    pub fn apply_file(mut self, file: PreferencesFile) -> Self {
        if let Some(output_dir) = file.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(data_file_name) = file.data_file_name {
            self.data_file_name = data_file_name;
        }
        if let Some(report_file_name) = file.report_file_name {
            self.report_file_name = report_file_name;
        }
        if let Some(pretty_json) = file.pretty_json {
            self.pretty_json = pretty_json;
        }
        if let Some(emit_html) = file.emit_html {
            self.emit_html = emit_html;
        }
        if let Some(verify_invariants) = file.verify_invariants {
            self.verify_invariants = verify_invariants;
        }
        if let Some(logging) = file.logging {
            if let Some(structured) = logging.use_structured_logging {
                self.logging.use_structured_logging = structured;
            }
            if let Some(level) = logging.min_log_level {
                self.logging.min_log_level = level;
            }
        }
        self
    }

    /// Output file names must be bare, distinct and non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, name) in [
            ("data_file_name", &self.data_file_name),
            ("report_file_name", &self.report_file_name),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid_value(field, "must not be empty"));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ConfigError::invalid_value(
                    field,
                    format!("'{}' must be a file name, not a path", name),
                ));
            }
        }

        if self.emit_html && self.data_file_name == self.report_file_name {
            return Err(ConfigError::invalid_value(
                "report_file_name",
                "must differ from data_file_name",
            ));
        }

        Ok(())
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    pub fn with_emit_html(mut self, emit_html: bool) -> Self {
        self.emit_html = emit_html;
        self
    }

    pub fn with_verify_invariants(mut self, verify_invariants: bool) -> Self {
        self.verify_invariants = verify_invariants;
        self
    }

    pub fn with_min_log_level(mut self, level: LogLevel) -> Self {
        self.logging.min_log_level = level;
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.output_dir.join(&self.data_file_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let preferences = GeneratorPreferences::from_lookup(lookup(&[]));

        assert_eq!(preferences.output_dir, PathBuf::from("validation-results"));
        assert_eq!(preferences.data_file_name, "truth-table.json");
        assert_eq!(preferences.report_file_name, "truth-table-report.html");
        assert!(preferences.pretty_json);
        assert!(preferences.emit_html);
        assert!(preferences.verify_invariants);
        assert_eq!(preferences.logging.min_log_level, LogLevel::Info);
        assert!(!preferences.logging.use_structured_logging);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let preferences = GeneratorPreferences::from_lookup(lookup(&[
            (env_vars::OUTPUT_DIR, "/tmp/matrix"),
            (env_vars::EMIT_HTML, "false"),
            (env_vars::LOG_LEVEL, "debug"),
            (env_vars::LOG_STRUCTURED, "true"),
        ]));

        assert_eq!(preferences.output_dir, PathBuf::from("/tmp/matrix"));
        assert!(!preferences.emit_html);
        assert_eq!(preferences.logging.min_log_level, LogLevel::Debug);
        assert!(preferences.logging.use_structured_logging);
    }

    #[test]
    fn test_unparseable_environment_falls_back() {
        let preferences = GeneratorPreferences::from_lookup(lookup(&[
            (env_vars::PRETTY_JSON, "sometimes"),
            (env_vars::LOG_LEVEL, "loud"),
        ]));

        assert!(preferences.pretty_json);
        assert_eq!(preferences.logging.min_log_level, LogLevel::Info);
    }

    #[test]
    fn test_file_overrides_environment() {
        let base = GeneratorPreferences::from_lookup(lookup(&[(env_vars::OUTPUT_DIR, "from-env")]));
        let file: PreferencesFile = toml::from_str(
            r#"
            output_dir = "from-file"
            pretty_json = false

            [logging]
            min_log_level = "warn"
            "#,
        )
        .unwrap();

        let preferences = base.apply_file(file);
        assert_eq!(preferences.output_dir, PathBuf::from("from-file"));
        assert!(!preferences.pretty_json);
        assert!(preferences.emit_html);
        assert_eq!(preferences.logging.min_log_level, LogLevel::Warning);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_file_name = \"matrix.json\"").unwrap();

        let preferences = GeneratorPreferences::load(file.path()).unwrap();
        assert_eq!(preferences.data_file_name, "matrix.json");
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"blue\"").unwrap();

        assert_matches!(
            GeneratorPreferences::load(file.path()),
            Err(ConfigError::Malformed { .. })
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            GeneratorPreferences::load(&dir.path().join("absent.toml")),
            Err(ConfigError::Unreadable { .. })
        );
    }

    #[test]
    fn test_validate_file_names() {
        let preferences = GeneratorPreferences::from_lookup(lookup(&[]));
        assert!(preferences.validate().is_ok());

        let mut nested = preferences.clone();
        nested.data_file_name = "out/truth-table.json".to_string();
        assert_matches!(
            nested.validate(),
            Err(ConfigError::InvalidValue { field: "data_file_name", .. })
        );

        let mut clash = preferences.clone();
        clash.report_file_name = clash.data_file_name.clone();
        assert_matches!(
            clash.validate(),
            Err(ConfigError::InvalidValue { field: "report_file_name", .. })
        );
        assert!(clash.with_emit_html(false).validate().is_ok());
    }

    #[test]
    fn test_paths_join_output_dir() {
        let preferences = GeneratorPreferences::from_lookup(lookup(&[])).with_output_dir("out");
        assert_eq!(preferences.data_path(), PathBuf::from("out/truth-table.json"));
        assert_eq!(preferences.report_path(), PathBuf::from("out/truth-table-report.html"));
    }
}
