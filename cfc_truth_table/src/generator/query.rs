//! Read-only lookups over the derived data
//!
//! Failures are returned, not logged; the caller reports them with
//! [`GeneratorError::code`].

use super::{GeneratorError, TruthTableGenerator};
use crate::file_index::ImpactMatrix;
use crate::resources::ResourceKind;
use crate::space::Configuration;
use crate::strategies::{StrategySelector, TestStrategy};
use crate::table::TruthTableEntry;
use serde::Serialize;

/// Why a configuration has the entry it has
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub key: String,
    pub entry: TruthTableEntry,
    /// Dependency rules the configuration breaks, as descriptions
    pub violations: Vec<&'static str>,
    /// Derivation rows that fired, in table order
    pub applied_rules: Vec<&'static str>,
}

/// Which configurations a change to one artifact touches
#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    pub artifact: String,
    pub resources: Vec<ResourceKind>,
    pub configurations: Vec<String>,
}

impl TruthTableGenerator {
    /// Explain a single configuration by identity key
    pub fn explain(&self, key: &str) -> Result<Explanation, GeneratorError> {
        let configuration: Configuration = key.parse()?;

        let entry = self.builder.entry(configuration);
        let violations = self
            .builder
            .predicate()
            .violations(&configuration)
            .into_iter()
            .map(|rule| rule.description)
            .collect();
        let applied_rules = if entry.valid {
            self.builder.derivation().applied_rules(&configuration)
        } else {
            Vec::new()
        };

        Ok(Explanation {
            key: configuration.key(),
            entry,
            violations,
            applied_rules,
        })
    }

    /// Configurations affected by an artifact
    pub fn impact(&self, artifact: &str) -> Result<ImpactReport, GeneratorError> {
        let resources = self.index().resources_for_artifact(artifact);
        if resources.is_empty() {
            return Err(GeneratorError::UnknownArtifact {
                artifact: artifact.to_string(),
            });
        }

        let table = self.builder.build();
        let matrix = ImpactMatrix::from_table(&table, self.index());
        let configurations = matrix
            .affected_by(artifact)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        Ok(ImpactReport {
            artifact: artifact.to_string(),
            resources,
            configurations,
        })
    }

    /// A single named strategy
    pub fn strategy(&self, name: &str) -> Result<TestStrategy, GeneratorError> {
        let selector = StrategySelector::new();
        let table = self.builder.build();

        selector
            .select_one(&table, name)
            .ok_or_else(|| GeneratorError::UnknownStrategy {
                name: name.to_string(),
                known: selector.names().join(", "),
            })
    }
}
