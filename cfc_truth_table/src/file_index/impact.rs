//! Reverse lookup: artifact → configurations it affects

use super::ResourceFileIndex;
use crate::table::TruthTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which configuration keys each artifact participates in.
///
/// Every artifact named in the mapping table has an entry, even when no
/// configuration uses it. Keys are listed in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImpactMatrix {
    by_artifact: BTreeMap<String, Vec<String>>,
}

impl ImpactMatrix {
    pub fn from_table(table: &TruthTable, index: &ResourceFileIndex) -> Self {
        let mut by_artifact: BTreeMap<String, Vec<String>> = index
            .all_artifacts()
            .into_iter()
            .map(|artifact| (artifact.to_string(), Vec::new()))
            .collect();

        for entry in table.entries() {
            let key = entry.key();
            for file in &entry.files {
                if let Some(keys) = by_artifact.get_mut(file) {
                    keys.push(key.clone());
                }
            }
        }

        Self { by_artifact }
    }

    /// Configurations an artifact affects; `None` for an unknown artifact
    pub fn affected_by(&self, artifact: &str) -> Option<&[String]> {
        self.by_artifact.get(artifact).map(Vec::as_slice)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.by_artifact.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_artifact
            .iter()
            .map(|(artifact, keys)| (artifact.as_str(), keys.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_artifact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_artifact.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_index::mapping;
    use crate::table::TruthTableBuilder;

    fn matrix() -> (TruthTable, ImpactMatrix) {
        let table = TruthTableBuilder::new().build();
        let matrix = ImpactMatrix::from_table(&table, ResourceFileIndex::global());
        (table, matrix)
    }

    #[test]
    fn test_reverse_lookup_agrees_with_forward() {
        let (table, matrix) = matrix();

        for (artifact, keys) in matrix.iter() {
            for entry in table.entries() {
                let listed = keys.contains(&entry.key());
                let involved = entry.files.iter().any(|f| f == artifact);
                assert_eq!(listed, involved, "{} / {}", artifact, entry.key());
            }
        }
    }

    #[test]
    fn test_invalid_configurations_never_appear() {
        let (table, matrix) = matrix();
        for (_, keys) in matrix.iter() {
            for key in keys {
                assert!(table.get(key).map(|e| e.valid).unwrap_or(false));
            }
        }
    }

    #[test]
    fn test_every_artifact_has_a_row() {
        let (_, matrix) = matrix();
        assert_eq!(matrix.len(), ResourceFileIndex::global().all_artifacts().len());
    }

    #[test]
    fn test_vpc_factory_affects_every_valid_configuration() {
        let (table, matrix) = matrix();
        let affected = matrix.affected_by(mapping::VPC_FACTORY).unwrap();
        assert_eq!(affected.len(), table.stats().valid);
    }

    #[test]
    fn test_production_security_affects_staging_and_production() {
        let (_, matrix) = matrix();
        let affected = matrix
            .affected_by(mapping::PRODUCTION_SECURITY_CONFIGURATION)
            .unwrap();

        // CloudTrail and Config rules pull this in for staging too
        assert!(affected.iter().all(|k| k.contains("_STAGING_") || k.contains("_PRODUCTION_")));
        assert_eq!(affected.len(), 40);
        assert!(matrix.affected_by("Unknown.java").is_none());
    }
}
