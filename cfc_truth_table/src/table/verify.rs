//! Post-build consistency check over a completed table

use super::TruthTable;
use crate::file_index::ResourceFileIndex;
use crate::resources::base_resources;
use crate::space::ConfigurationSpace;
use crate::validity::ValidityPredicate;
use std::fmt;

/// One broken table property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantFailure {
    /// Offending configuration key, or `*` for table-wide failures
    pub key: String,
    pub detail: String,
}

impl InvariantFailure {
    fn new(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for InvariantFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.detail)
    }
}

/// Check every table property, returning all failures found
pub fn verify_table(
    table: &TruthTable,
    predicate: &ValidityPredicate,
    index: &ResourceFileIndex,
) -> Vec<InvariantFailure> {
    let mut failures = Vec::new();

    let expected = ConfigurationSpace::new().cardinality();
    if table.len() != expected {
        failures.push(InvariantFailure::new(
            "*",
            format!("expected {} entries, found {}", expected, table.len()),
        ));
    }
    if table.key_count() != table.len() {
        failures.push(InvariantFailure::new(
            "*",
            format!(
                "{} entries share {} distinct keys",
                table.len(),
                table.key_count()
            ),
        ));
    }

    let base = base_resources();

    for entry in table.entries() {
        let key = entry.key();

        if entry.valid != predicate.is_valid(&entry.configuration) {
            failures.push(InvariantFailure::new(&key, "validity flag disagrees with predicate"));
        }

        if entry.resource_count != entry.resources.len() {
            failures.push(InvariantFailure::new(
                &key,
                format!(
                    "resource_count {} but {} resources",
                    entry.resource_count,
                    entry.resources.len()
                ),
            ));
        }

        if entry.valid {
            if !base.is_subset(&entry.resources) {
                failures.push(InvariantFailure::new(&key, "missing base resources"));
            }
            if entry.reason.is_some() {
                failures.push(InvariantFailure::new(&key, "valid entry carries a reason"));
            }
            if entry.files != index.files_for(&entry.resources) {
                failures.push(InvariantFailure::new(
                    &key,
                    "files differ from forward lookup of resources",
                ));
            }
        } else {
            if !entry.resources.is_empty() || !entry.files.is_empty() {
                failures.push(InvariantFailure::new(
                    &key,
                    "invalid entry has resources or files",
                ));
            }
            if entry.reason.is_none() {
                failures.push(InvariantFailure::new(&key, "invalid entry has no reason"));
            }
        }
    }

    failures
}
