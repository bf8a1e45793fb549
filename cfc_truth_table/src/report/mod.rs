//! Report emitters
//!
//! Thin I/O over the data the core produces: a JSON data document and a
//! browsable HTML page. Any failure here is fatal for the run.

pub mod data;
mod error;
pub mod html;

pub use data::{CatalogEntry, DocumentMetadata, TruthTableDocument};
pub use error::ReportError;

use std::fs;
use std::path::{Path, PathBuf};

/// Create the output directory and any missing parents
pub fn ensure_output_dir(dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf, ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Writes the data document and the HTML report for one run
#[derive(Debug, Clone)]
pub struct ReportWriter {
    pretty_json: bool,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportWriter {
    pub fn new() -> Self {
        Self { pretty_json: true }
    }

    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    fn serialise(&self, document: &TruthTableDocument<'_>, path: &Path) -> Result<String, ReportError> {
        document
            .to_json(self.pretty_json)
            .map_err(|source| ReportError::Serialize {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn write_data_file(
        &self,
        document: &TruthTableDocument<'_>,
        path: &Path,
    ) -> Result<PathBuf, ReportError> {
        let json = self.serialise(document, path)?;
        write_file(path, &json)
    }

    /// The embedded data is always compact regardless of `pretty_json`
    pub fn write_html_report(
        &self,
        document: &TruthTableDocument<'_>,
        path: &Path,
    ) -> Result<PathBuf, ReportError> {
        let json = document.to_json(false).map_err(|source| ReportError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        write_file(path, &html::render_report(document, &json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_index::{ImpactMatrix, ResourceFileIndex};
    use crate::strategies::{StrategySelector, TestStrategy};
    use crate::table::{TruthTable, TruthTableBuilder};
    use assert_matches::assert_matches;
    use chrono::Utc;

    struct Built {
        table: TruthTable,
        strategies: Vec<TestStrategy>,
        impact: ImpactMatrix,
    }

    fn built() -> Built {
        let table = TruthTableBuilder::new().build();
        let strategies = StrategySelector::new().select(&table);
        let impact = ImpactMatrix::from_table(&table, ResourceFileIndex::global());
        Built {
            table,
            strategies,
            impact,
        }
    }

    fn document(built: &Built) -> TruthTableDocument<'_> {
        TruthTableDocument::new(
            &built.table,
            &built.strategies,
            &built.impact,
            ResourceFileIndex::global(),
            Utc::now(),
        )
    }

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_output_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Existing directory is fine
        ensure_output_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_output_dir_fails_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = ensure_output_dir(&blocker.join("out"));
        assert_matches!(result, Err(ReportError::CreateDirectory { .. }));
    }

    #[test]
    fn test_write_data_file_round_trips_counts() {
        let dir = tempfile::tempdir().unwrap();
        let built = built();
        let path = dir.path().join("truth-table.json");

        let written = ReportWriter::new()
            .write_data_file(&document(&built), &path)
            .unwrap();
        assert_eq!(written, path);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["metadata"]["valid_configurations"], 60);
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let built = built();
        let path = dir.path().join("compact.json");

        ReportWriter::new()
            .with_pretty_json(false)
            .write_data_file(&document(&built), &path)
            .unwrap();
        assert!(!fs::read_to_string(&path).unwrap().contains('\n'));
    }

    #[test]
    fn test_write_html_report() {
        let dir = tempfile::tempdir().unwrap();
        let built = built();
        let path = dir.path().join("truth-table-report.html");

        ReportWriter::new()
            .write_html_report(&document(&built), &path)
            .unwrap();
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("File Impact Matrix"));
    }

    #[test]
    fn test_write_into_missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let built = built();
        let path = dir.path().join("missing").join("truth-table.json");

        let error = ReportWriter::new()
            .write_data_file(&document(&built), &path)
            .unwrap_err();
        assert_matches!(error, ReportError::Write { .. });
        assert_eq!(error.path(), path.as_path());
    }
}
