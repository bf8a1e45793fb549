//! Structured data document

use crate::config::constants::GENERATOR_VERSION;
use crate::file_index::{ImpactMatrix, ResourceFileIndex};
use crate::resources::{ResourceKind, Subsystem};
use crate::strategies::{StrategyMap, TestStrategy};
use crate::table::{TableStats, TruthTable};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub generated_at: String,
    pub generator_version: &'static str,
    pub total_configurations: usize,
    pub valid_configurations: usize,
    pub invalid_configurations: usize,
    pub valid_percentage: f64,
    pub resource_kinds: usize,
    pub mapped_artifacts: usize,
}

impl DocumentMetadata {
    pub fn new(stats: TableStats, index: &ResourceFileIndex, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            generator_version: GENERATOR_VERSION,
            total_configurations: stats.total,
            valid_configurations: stats.valid,
            invalid_configurations: stats.invalid,
            valid_percentage: stats.valid_percentage(),
            resource_kinds: index.resource_count(),
            mapped_artifacts: index.all_artifacts().len(),
        }
    }
}

/// One row of the resource catalogue
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub cfn_type: &'static str,
    pub subsystem: Subsystem,
}

impl From<ResourceKind> for CatalogEntry {
    fn from(kind: ResourceKind) -> Self {
        Self {
            id: kind.id(),
            cfn_type: kind.cfn_type(),
            subsystem: kind.subsystem(),
        }
    }
}

/// The full data file, borrowing from the built artefacts
#[derive(Debug, Serialize)]
pub struct TruthTableDocument<'a> {
    pub metadata: DocumentMetadata,
    pub configurations: &'a TruthTable,
    pub test_strategies: StrategyMap<'a>,
    pub test_matrix: &'a ImpactMatrix,
    pub file_mappings: BTreeMap<ResourceKind, &'a [&'static str]>,
    pub resource_catalog: Vec<CatalogEntry>,
}

impl<'a> TruthTableDocument<'a> {
    pub fn new(
        table: &'a TruthTable,
        strategies: &'a [TestStrategy],
        impact: &'a ImpactMatrix,
        index: &'a ResourceFileIndex,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: DocumentMetadata::new(table.stats(), index, generated_at),
            configurations: table,
            test_strategies: StrategyMap(strategies),
            test_matrix: impact,
            file_mappings: index.entries().collect(),
            resource_catalog: ResourceKind::ALL.iter().copied().map(CatalogEntry::from).collect(),
        }
    }

    pub fn strategies(&self) -> &'a [TestStrategy] {
        self.test_strategies.0
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::StrategySelector;
    use crate::table::TruthTableBuilder;
    use chrono::TimeZone;

    #[test]
    fn test_document_shape() {
        let index = ResourceFileIndex::global();
        let table = TruthTableBuilder::new().build();
        let strategies = StrategySelector::new().select(&table);
        let impact = ImpactMatrix::from_table(&table, index);
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let document = TruthTableDocument::new(&table, &strategies, &impact, index, generated_at);
        let json: serde_json::Value =
            serde_json::from_str(&document.to_json(false).unwrap()).unwrap();

        let metadata = &json["metadata"];
        assert_eq!(metadata["generated_at"], "2024-05-01T12:00:00Z");
        assert_eq!(metadata["total_configurations"], 96);
        assert_eq!(metadata["valid_configurations"], 60);
        assert_eq!(metadata["invalid_configurations"], 36);
        assert_eq!(metadata["valid_percentage"], 62.5);
        assert_eq!(metadata["resource_kinds"], 27);
        assert_eq!(metadata["mapped_artifacts"], 17);

        assert_eq!(json["configurations"].as_object().unwrap().len(), 96);
        assert_eq!(json["test_strategies"].as_object().unwrap().len(), 7);
        assert_eq!(json["test_matrix"].as_object().unwrap().len(), 17);
        assert_eq!(
            json["file_mappings"]["HTTPS_LISTENER"],
            serde_json::json!(["FargateRuntimeConfiguration.java"])
        );
        assert_eq!(json["resource_catalog"].as_array().unwrap().len(), 27);
        assert_eq!(json["resource_catalog"][0]["cfn_type"], "AWS::EC2::VPC");
    }
}
