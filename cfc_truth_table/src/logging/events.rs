//! Log events and their renderers

use super::codes::{self, Code};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log severity levels, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    #[serde(alias = "warn")]
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Parse from an environment value or command-line word
    pub fn parse(level: &str) -> Option<Self> {
        match level.to_lowercase().as_str() {
            "error" | "0" => Some(LogLevel::Error),
            "warning" | "warn" | "1" => Some(LogLevel::Warning),
            "info" | "2" => Some(LogLevel::Info),
            "debug" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Matching `log` crate level
    pub fn to_log_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, error_code, message)
    }

    /// Warning without a specific code
    pub fn warning(message: &str) -> Self {
        Self::with_level(LogLevel::Warning, codes::general::WARNING, message)
    }

    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Warning, warning_code, message)
    }

    /// Info without a specific code
    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, codes::general::INFO, message)
    }

    /// Info-level event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, codes::general::DEBUG, message)
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    /// Message plus `key=value` context, without level or code
    pub fn format_message(&self) -> String {
        if self.context.is_empty() {
            return self.message.clone();
        }

        let context: Vec<String> = self
            .context
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        format!("{} ({})", self.message, context.join(", "))
    }

    /// Single-line human format
    pub fn format(&self) -> String {
        format!(
            "[{}] {} - {}",
            self.level.as_str(),
            self.code.as_str(),
            self.format_message()
        )
    }

    /// One JSON object per event
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "requires_halt": self.requires_halt(),
                "description": self.description(),
                "recommended_action": self.recommended_action(),
            });
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::output::FILE_WRITE_FAILED, "write failed");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E021");
        assert_eq!(event.category(), "Output");
        assert!(event.requires_halt());
    }

    #[test]
    fn test_success_event_is_info() {
        let event = LogEvent::success(codes::success::TABLE_BUILT, "built");
        assert!(event.is_info());
        assert_eq!(event.code.as_str(), "I010");
    }

    #[test]
    fn test_event_formatting() {
        let event = LogEvent::success(codes::success::TABLE_BUILT, "Truth table built")
            .with_context("valid", "60")
            .with_context("total", "96");

        assert_eq!(
            event.format(),
            "[INFO] I010 - Truth table built (total=96, valid=60)"
        );
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::derivation::INVARIANT_VIOLATION, "bad table")
            .with_context("key", "EC2_JENKINS_SERVICE_DEV_no-domain_ssl-disabled_no-subdomain");

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["code"], "E030");
        assert_eq!(json["error_metadata"]["requires_halt"], true);
        assert_eq!(
            json["context"]["key"],
            "EC2_JENKINS_SERVICE_DEV_no-domain_ssl-disabled_no-subdomain"
        );
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("3"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert!(LogLevel::Error < LogLevel::Debug);
    }

    #[test]
    fn test_codeless_info_has_known_metadata() {
        let event = LogEvent::info("Truth table generator starting");
        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();

        assert_eq!(json["code"], "I000");
        assert_eq!(json["category"], "General");
        assert_eq!(json["severity"], "Low");
        assert_eq!(LogEvent::debug("detail").category(), "General");
        assert_eq!(LogEvent::warning("careful").severity(), "Low");
    }

    #[test]
    fn test_log_crate_level_mapping() {
        assert_eq!(LogLevel::Error.to_log_level(), log::Level::Error);
        assert_eq!(LogLevel::Warning.to_log_level(), log::Level::Warn);
        assert_eq!(LogLevel::Info.to_log_level(), log::Level::Info);
        assert_eq!(LogLevel::Debug.to_log_level(), log::Level::Debug);
    }
}
