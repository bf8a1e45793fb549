// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod file_index;
pub mod generator;
pub mod report;
pub mod resources;
pub mod space;
pub mod strategies;
pub mod table;
pub mod validity;

// Re-export key types for library consumers
pub use config::{ConfigError, GeneratorPreferences};
pub use generator::{GeneratedTable, GenerationOutput, GeneratorError, TruthTableGenerator};
pub use space::{Configuration, ConfigurationSpace};
pub use table::{TruthTable, TruthTableBuilder, TruthTableEntry};
