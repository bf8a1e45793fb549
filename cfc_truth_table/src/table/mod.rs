//! Truth table construction
//!
//! [`TruthTableBuilder`] walks the configuration space once, classifies each
//! configuration and, for valid ones, derives resources and then artifacts.
//! The resulting [`TruthTable`] keeps enumeration order and serialises as a
//! key → entry map in that order.

mod stats;
mod verify;

pub use stats::TableStats;
pub use verify::{verify_table, InvariantFailure};

use crate::config::constants::INVALID_REASON;
use crate::file_index::ResourceFileIndex;
use crate::resources::{ResourceDerivation, ResourceSet};
use crate::space::{Configuration, ConfigurationSpace};
use crate::validity::ValidityPredicate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Fully derived outcome for one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTableEntry {
    pub configuration: Configuration,
    #[serde(rename = "expected_resources")]
    pub resources: ResourceSet,
    pub resource_count: usize,
    #[serde(rename = "files_involved")]
    pub files: Vec<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TruthTableEntry {
    fn valid(configuration: Configuration, resources: ResourceSet, files: Vec<String>) -> Self {
        Self {
            configuration,
            resource_count: resources.len(),
            resources,
            files,
            valid: true,
            reason: None,
        }
    }

    fn invalid(configuration: Configuration) -> Self {
        Self {
            configuration,
            resources: ResourceSet::new(),
            resource_count: 0,
            files: Vec::new(),
            valid: false,
            reason: Some(INVALID_REASON.to_string()),
        }
    }

    pub fn key(&self) -> String {
        self.configuration.key()
    }
}

/// Every configuration's entry, in enumeration order
#[derive(Debug, Clone, Default)]
pub struct TruthTable {
    entries: Vec<TruthTableEntry>,
    positions: HashMap<String, usize>,
}

impl TruthTable {
    fn from_entries(entries: Vec<TruthTableEntry>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key(), position))
            .collect();

        Self { entries, positions }
    }

    pub fn get(&self, key: &str) -> Option<&TruthTableEntry> {
        self.positions.get(key).map(|&position| &self.entries[position])
    }

    pub fn entry_for(&self, configuration: &Configuration) -> Option<&TruthTableEntry> {
        self.get(&configuration.key())
    }

    pub fn entries(&self) -> &[TruthTableEntry] {
        &self.entries
    }

    pub fn valid_entries(&self) -> impl Iterator<Item = &TruthTableEntry> {
        self.entries.iter().filter(|entry| entry.valid)
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.positions.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> TableStats {
        TableStats::from_entries(&self.entries)
    }
}

impl Serialize for TruthTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key(), entry)?;
        }
        map.end()
    }
}

/// Builds a [`TruthTable`] from the space, predicate, derivation and index
#[derive(Debug, Clone)]
pub struct TruthTableBuilder {
    space: ConfigurationSpace,
    predicate: ValidityPredicate,
    derivation: ResourceDerivation,
    index: ResourceFileIndex,
}

impl Default for TruthTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TruthTableBuilder {
    pub fn new() -> Self {
        Self {
            space: ConfigurationSpace::new(),
            predicate: ValidityPredicate::new(),
            derivation: ResourceDerivation::new(),
            index: ResourceFileIndex::global().clone(),
        }
    }

    pub fn with_predicate(mut self, predicate: ValidityPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn with_derivation(mut self, derivation: ResourceDerivation) -> Self {
        self.derivation = derivation;
        self
    }

    pub fn with_index(mut self, index: ResourceFileIndex) -> Self {
        self.index = index;
        self
    }

    pub fn predicate(&self) -> &ValidityPredicate {
        &self.predicate
    }

    pub fn derivation(&self) -> &ResourceDerivation {
        &self.derivation
    }

    pub fn index(&self) -> &ResourceFileIndex {
        &self.index
    }

    /// Classify and derive a single configuration
    pub fn entry(&self, configuration: Configuration) -> TruthTableEntry {
        if !self.predicate.is_valid(&configuration) {
            return TruthTableEntry::invalid(configuration);
        }

        let resources = self.derivation.derive(&configuration);
        let files = self.index.files_for(&resources);
        TruthTableEntry::valid(configuration, resources, files)
    }

    pub fn build(&self) -> TruthTable {
        let entries = self
            .space
            .enumerate()
            .into_iter()
            .map(|configuration| self.entry(configuration))
            .collect();

        TruthTable::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{base_resources, ResourceKind};
    use crate::space::*;

    fn table() -> TruthTable {
        TruthTableBuilder::new().build()
    }

    #[test]
    fn test_table_has_every_configuration_once() {
        let table = table();
        assert_eq!(table.len(), 96);
        assert_eq!(table.key_count(), 96);
    }

    #[test]
    fn test_counts() {
        let stats = table().stats();
        assert_eq!(stats.total, 96);
        assert_eq!(stats.valid, 60);
        assert_eq!(stats.invalid, 36);
    }

    #[test]
    fn test_invalid_entries_are_empty() {
        for entry in table().entries().iter().filter(|e| !e.valid) {
            assert!(entry.resources.is_empty());
            assert!(entry.files.is_empty());
            assert_eq!(entry.resource_count, 0);
            assert_eq!(entry.reason.as_deref(), Some(INVALID_REASON));
        }
    }

    #[test]
    fn test_valid_entries_contain_base_resources() {
        let base = base_resources();
        for entry in table().valid_entries() {
            assert!(base.is_subset(&entry.resources), "{}", entry.key());
            assert_eq!(entry.resource_count, entry.resources.len());
            assert!(entry.reason.is_none());
        }
    }

    #[test]
    fn test_files_match_forward_lookup() {
        let index = ResourceFileIndex::global();
        for entry in table().valid_entries() {
            assert_eq!(entry.files, index.files_for(&entry.resources));
        }
    }

    #[test]
    fn test_ssl_implies_domain_and_certificate() {
        for entry in table().valid_entries() {
            let c = entry.configuration;
            if c.ssl_config == SslConfig::Enabled {
                assert_eq!(c.domain_config, DomainConfig::WithDomain);
                if c.topology == Topology::Service {
                    assert!(entry.resources.contains(&ResourceKind::AcmCertificate));
                    assert!(entry.resources.contains(&ResourceKind::HttpsListener));
                }
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = serde_json::to_string(&table()).unwrap();
        let second = serde_json::to_string(&table()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scenario_ssl_without_domain_is_invalid() {
        let table = table();
        let entry = table
            .get("FARGATE_JENKINS_SERVICE_DEV_no-domain_ssl-enabled_no-subdomain")
            .unwrap();
        assert!(!entry.valid);
        assert!(entry.resources.is_empty());
        assert!(entry.files.is_empty());
        assert_eq!(entry.reason.as_deref(), Some("Invalid combination"));
    }

    #[test]
    fn test_serialises_in_enumeration_order() {
        let table = table();
        let text = serde_json::to_string(&table).unwrap();

        // with-subdomain is enumerated before no-subdomain, the reverse of sorted order
        let position = |key: String| text.find(&format!("\"{}\":", key)).unwrap();
        assert!(position(table.entries()[0].key()) < position(table.entries()[1].key()));
        assert!(position(table.entries()[1].key()) < position(table.entries()[95].key()));
    }

    #[test]
    fn test_entry_serialisation_shape() {
        let table = table();
        let entry = table
            .get("EC2_JENKINS_SINGLE_NODE_DEV_no-domain_ssl-disabled_no-subdomain")
            .unwrap();
        let json = serde_json::to_value(entry).unwrap();

        assert_eq!(json["configuration"]["runtime"], "EC2");
        assert_eq!(json["configuration"]["topology"], "JENKINS_SINGLE_NODE");
        assert_eq!(json["resource_count"], 11);
        assert_eq!(json["valid"], true);
        assert!(json.get("reason").is_none());
        assert!(json["expected_resources"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("EC2_INSTANCES")));
    }

    #[test]
    fn test_custom_predicate_is_honoured() {
        const EC2_ONLY: crate::validity::DependencyRule =
            crate::validity::DependencyRule::new("ec2_only", "test-only rule", |c| {
                c.runtime == Runtime::Ec2
            });

        let table = TruthTableBuilder::new()
            .with_predicate(ValidityPredicate::new().with_rule(EC2_ONLY))
            .build();
        assert_eq!(table.stats().valid, 30);
    }
}
