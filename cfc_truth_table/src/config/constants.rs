//! Fixed values shared across the generator

pub const APP_NAME: &str = "truth-table-generator";

/// Version stamped into the data file metadata
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod output {
    pub const DEFAULT_OUTPUT_DIR: &str = "validation-results";
    pub const DEFAULT_DATA_FILE: &str = "truth-table.json";
    pub const DEFAULT_REPORT_FILE: &str = "truth-table-report.html";
}

pub mod report {
    pub const TITLE: &str = "CloudForge Core - Truth Table & Test Matrix";
    pub const SUBTITLE: &str = "Complete configuration validation and file impact analysis";
}

/// Reason recorded on every invalid entry
pub const INVALID_REASON: &str = "Invalid combination";
