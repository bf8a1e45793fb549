//! Log codes and their metadata
//!
//! Every code the generator emits is declared here alongside its category,
//! severity and recommended action.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata for a single code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl CodeMetadata {
    const fn new(
        code: Code,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.0,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// Events logged without a specific code
pub mod general {
    use super::Code;

    pub const INFO: Code = Code::new("I000");
    pub const WARNING: Code = Code::new("W000");
    pub const DEBUG: Code = Code::new("D000");
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Preference loading
pub mod config {
    use super::Code;

    pub const PREFERENCES_UNREADABLE: Code = Code::new("E010");
    pub const PREFERENCES_MALFORMED: Code = Code::new("E011");
    pub const INVALID_PREFERENCE_VALUE: Code = Code::new("E012");
}

/// Writing the data file and report
pub mod output {
    use super::Code;

    pub const DIRECTORY_CREATION_FAILED: Code = Code::new("E020");
    pub const FILE_WRITE_FAILED: Code = Code::new("E021");
    pub const SERIALIZATION_FAILED: Code = Code::new("E022");
}

/// Table construction and queries against it
pub mod derivation {
    use super::Code;

    pub const INVARIANT_VIOLATION: Code = Code::new("E030");
    pub const UNKNOWN_CONFIGURATION_KEY: Code = Code::new("E031");
    pub const UNKNOWN_ARTIFACT: Code = Code::new("E032");
    pub const UNKNOWN_STRATEGY: Code = Code::new("E033");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const PREFERENCES_LOADED: Code = Code::new("I002");
    pub const TABLE_BUILT: Code = Code::new("I010");
    pub const INVARIANTS_VERIFIED: Code = Code::new("I011");
    pub const STRATEGIES_SELECTED: Code = Code::new("I012");
    pub const DATA_FILE_WRITTEN: Code = Code::new("I020");
    pub const REPORT_WRITTEN: Code = Code::new("I021");
    pub const GENERATION_COMPLETED: Code = Code::new("I030");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

const METADATA: &[CodeMetadata] = &[
    // General
    CodeMetadata::new(
        general::INFO,
        "General",
        Severity::Low,
        true,
        false,
        "Informational message",
        "None",
    ),
    CodeMetadata::new(
        general::WARNING,
        "General",
        Severity::Low,
        true,
        false,
        "Warning without a specific code",
        "Review the message context",
    ),
    CodeMetadata::new(
        general::DEBUG,
        "General",
        Severity::Low,
        true,
        false,
        "Diagnostic detail",
        "None",
    ),
    // System
    CodeMetadata::new(
        system::INTERNAL_ERROR,
        "System",
        Severity::Critical,
        false,
        true,
        "Internal generator error",
        "Report the failure with the command line used",
    ),
    CodeMetadata::new(
        system::INITIALIZATION_FAILURE,
        "System",
        Severity::High,
        false,
        true,
        "Logging or runtime initialisation failed",
        "Check environment variables and preference file",
    ),
    // Config
    CodeMetadata::new(
        config::PREFERENCES_UNREADABLE,
        "Config",
        Severity::High,
        false,
        true,
        "Preferences file could not be read",
        "Check the --config path and its permissions",
    ),
    CodeMetadata::new(
        config::PREFERENCES_MALFORMED,
        "Config",
        Severity::High,
        false,
        true,
        "Preferences file is not valid TOML for this tool",
        "Fix the syntax or remove unknown keys",
    ),
    CodeMetadata::new(
        config::INVALID_PREFERENCE_VALUE,
        "Config",
        Severity::Medium,
        false,
        true,
        "A preference value is out of range",
        "Use a non-empty file name and a known log level",
    ),
    // Output
    CodeMetadata::new(
        output::DIRECTORY_CREATION_FAILED,
        "Output",
        Severity::Critical,
        false,
        true,
        "Output directory could not be created",
        "Choose a writable output directory",
    ),
    CodeMetadata::new(
        output::FILE_WRITE_FAILED,
        "Output",
        Severity::Critical,
        false,
        true,
        "Output file could not be written",
        "Check disk space and directory permissions",
    ),
    CodeMetadata::new(
        output::SERIALIZATION_FAILED,
        "Output",
        Severity::Critical,
        false,
        true,
        "Data document could not be serialised",
        "Report the failure as a generator bug",
    ),
    // Derivation
    CodeMetadata::new(
        derivation::INVARIANT_VIOLATION,
        "Derivation",
        Severity::Critical,
        false,
        true,
        "Built table breaks a consistency property",
        "Review recent changes to the rule or mapping tables",
    ),
    CodeMetadata::new(
        derivation::UNKNOWN_CONFIGURATION_KEY,
        "Derivation",
        Severity::Medium,
        true,
        false,
        "Configuration key does not name a point in the space",
        "Copy a key from the data file or the full_matrix strategy",
    ),
    CodeMetadata::new(
        derivation::UNKNOWN_ARTIFACT,
        "Derivation",
        Severity::Low,
        true,
        false,
        "Artifact is not in the resource mapping table",
        "Use a file name from file_mappings",
    ),
    CodeMetadata::new(
        derivation::UNKNOWN_STRATEGY,
        "Derivation",
        Severity::Low,
        true,
        false,
        "No test strategy with that name",
        "Use one of the names listed in test_strategies",
    ),
    // Success
    CodeMetadata::new(
        success::SYSTEM_INITIALIZATION_COMPLETED,
        "System",
        Severity::Low,
        true,
        false,
        "Logging initialised",
        "None",
    ),
    CodeMetadata::new(
        success::PREFERENCES_LOADED,
        "Config",
        Severity::Low,
        true,
        false,
        "Preferences loaded",
        "None",
    ),
    CodeMetadata::new(
        success::TABLE_BUILT,
        "Derivation",
        Severity::Low,
        true,
        false,
        "Truth table built",
        "Continue to verification",
    ),
    CodeMetadata::new(
        success::INVARIANTS_VERIFIED,
        "Derivation",
        Severity::Low,
        true,
        false,
        "Truth table passed the consistency check",
        "Continue to strategy selection",
    ),
    CodeMetadata::new(
        success::STRATEGIES_SELECTED,
        "Derivation",
        Severity::Low,
        true,
        false,
        "Test strategies selected",
        "Continue to output",
    ),
    CodeMetadata::new(
        success::DATA_FILE_WRITTEN,
        "Output",
        Severity::Low,
        true,
        false,
        "Data file written",
        "None",
    ),
    CodeMetadata::new(
        success::REPORT_WRITTEN,
        "Output",
        Severity::Low,
        true,
        false,
        "HTML report written",
        "None",
    ),
    CodeMetadata::new(
        success::GENERATION_COMPLETED,
        "System",
        Severity::Low,
        true,
        false,
        "Generation run completed",
        "None",
    ),
];

static CODE_REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();

fn get_code_registry() -> &'static HashMap<&'static str, CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        for metadata in METADATA {
            registry.insert(metadata.code, metadata.clone());
        }
        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_code_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown code")
}

pub fn get_action(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
