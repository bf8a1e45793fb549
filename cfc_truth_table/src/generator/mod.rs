//! One-shot generation run
//!
//! build table → verify → select strategies → impact matrix → write outputs.
//! Query modes reuse the in-memory stages and never touch the filesystem.

mod error;
mod query;

pub use error::GeneratorError;
pub use query::{Explanation, ImpactReport};

use crate::config::GeneratorPreferences;
use crate::file_index::{ImpactMatrix, ResourceFileIndex};
use crate::logging::codes;
use crate::report::{self, ReportWriter, TruthTableDocument};
use crate::strategies::{StrategySelector, TestStrategy};
use crate::table::{verify_table, TableStats, TruthTable, TruthTableBuilder};
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Everything derived in memory for one run
#[derive(Debug, Clone)]
pub struct GeneratedTable {
    pub table: TruthTable,
    pub strategies: Vec<TestStrategy>,
    pub impact: ImpactMatrix,
}

impl GeneratedTable {
    pub fn stats(&self) -> TableStats {
        self.table.stats()
    }
}

/// What a completed run wrote
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub stats: TableStats,
    pub mapped_artifacts: usize,
    pub data_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub duration: Duration,
}

impl GenerationOutput {
    /// Run summary printed at the end of a run
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total Configurations: {}", self.stats.total),
            format!("Valid Configurations: {}", self.stats.valid),
            format!("Invalid Configurations: {}", self.stats.invalid),
            format!("Factory Files Mapped: {}", self.mapped_artifacts),
            format!("Truth Table: {}", self.data_path.display()),
        ];
        if let Some(report_path) = &self.report_path {
            lines.push(format!("HTML Report: {}", report_path.display()));
        }
        lines
    }
}

pub struct TruthTableGenerator {
    preferences: GeneratorPreferences,
    builder: TruthTableBuilder,
}

impl TruthTableGenerator {
    pub fn new(preferences: GeneratorPreferences) -> Self {
        Self {
            preferences,
            builder: TruthTableBuilder::new(),
        }
    }

    /// Replace the table builder, e.g. with a custom rule set
    pub fn with_builder(mut self, builder: TruthTableBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn preferences(&self) -> &GeneratorPreferences {
        &self.preferences
    }

    pub fn index(&self) -> &ResourceFileIndex {
        self.builder.index()
    }

    /// Build, optionally verify, and derive strategies and impact
    pub fn generate(&self) -> Result<GeneratedTable, GeneratorError> {
        let table = self.builder.build();
        let stats = table.stats();
        log_success!(codes::success::TABLE_BUILT, "Truth table built",
            "total" => stats.total,
            "valid" => stats.valid,
            "invalid" => stats.invalid
        );

        if self.preferences.verify_invariants {
            self.verify(&table)?;
        }

        let strategies = StrategySelector::new().select(&table);
        log_success!(codes::success::STRATEGIES_SELECTED, "Test strategies selected",
            "count" => strategies.len()
        );

        let impact = ImpactMatrix::from_table(&table, self.index());
        log_debug!("File impact matrix built", "artifacts" => impact.len());

        Ok(GeneratedTable {
            table,
            strategies,
            impact,
        })
    }

    fn verify(&self, table: &TruthTable) -> Result<(), GeneratorError> {
        let failures = verify_table(table, self.builder.predicate(), self.index());

        if let Some(first) = failures.first() {
            log_debug!("Truth table failed consistency check",
                "failures" => failures.len()
            );
            return Err(GeneratorError::invariant_violation(&first.key, &first.detail));
        }

        log_success!(codes::success::INVARIANTS_VERIFIED, "Truth table passed consistency check",
            "entries" => table.len()
        );
        Ok(())
    }

    /// Full run: generate, then write the data file and report
    pub fn run(&self) -> Result<GenerationOutput, GeneratorError> {
        let start_time = Instant::now();
        self.preferences.validate()?;

        log_info!("Starting truth table generation",
            "output_dir" => self.preferences.output_dir.display()
        );

        let generated = self.generate()?;
        let document = TruthTableDocument::new(
            &generated.table,
            &generated.strategies,
            &generated.impact,
            self.index(),
            Utc::now(),
        );

        let (data_path, report_path) = self.write_outputs(&document)?;

        let output = GenerationOutput {
            stats: generated.stats(),
            mapped_artifacts: document.metadata.mapped_artifacts,
            data_path,
            report_path,
            duration: start_time.elapsed(),
        };

        log_success!(codes::success::GENERATION_COMPLETED, "Truth table generation completed",
            "valid" => output.stats.valid,
            "duration_ms" => output.duration.as_millis()
        );

        Ok(output)
    }

    fn write_outputs(
        &self,
        document: &TruthTableDocument<'_>,
    ) -> Result<(PathBuf, Option<PathBuf>), report::ReportError> {
        report::ensure_output_dir(&self.preferences.output_dir)?;
        let writer = ReportWriter::new().with_pretty_json(self.preferences.pretty_json);

        let data_path = writer.write_data_file(document, &self.preferences.data_path())?;
        log_success!(codes::success::DATA_FILE_WRITTEN, "Truth table saved",
            "path" => data_path.display()
        );

        let report_path = if self.preferences.emit_html {
            let path = writer.write_html_report(document, &self.preferences.report_path())?;
            log_success!(codes::success::REPORT_WRITTEN, "HTML report generated",
                "path" => path.display()
            );
            Some(path)
        } else {
            None
        };

        Ok((data_path, report_path))
    }
}
