//! Resource → artifact index
//!
//! Forward lookup turns a resource set into the sorted union of artifacts
//! that create it. Reverse lookup ([`ImpactMatrix`]) answers "which
//! configurations does this artifact touch" and is built once from a
//! completed truth table.

mod impact;
pub mod mapping;

pub use impact::ImpactMatrix;

use crate::resources::{ResourceKind, ResourceSet};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

static GLOBAL_INDEX: OnceLock<ResourceFileIndex> = OnceLock::new();

/// Read-only resource → artifact mapping
#[derive(Debug, Clone)]
pub struct ResourceFileIndex {
    by_resource: BTreeMap<ResourceKind, Vec<&'static str>>,
}

impl ResourceFileIndex {
    /// Build from the hand-maintained table
    pub fn new() -> Self {
        let by_resource = ResourceKind::ALL
            .iter()
            .map(|&kind| (kind, mapping::artifacts_for(kind).to_vec()))
            .collect();

        Self { by_resource }
    }

    /// Process-wide instance, initialised on first use
    pub fn global() -> &'static ResourceFileIndex {
        GLOBAL_INDEX.get_or_init(Self::new)
    }

    /// Artifacts for a single kind
    pub fn artifacts(&self, kind: ResourceKind) -> &[&'static str] {
        self.by_resource
            .get(&kind)
            .map(|artifacts| artifacts.as_slice())
            .unwrap_or_default()
    }

    /// Sorted union of artifacts over a resource set
    pub fn files_for(&self, resources: &ResourceSet) -> Vec<String> {
        let files: BTreeSet<&'static str> = resources
            .iter()
            .flat_map(|kind| self.artifacts(*kind).iter().copied())
            .collect();

        files.into_iter().map(str::to_string).collect()
    }

    /// Every artifact named anywhere in the table
    pub fn all_artifacts(&self) -> BTreeSet<&'static str> {
        self.by_resource
            .values()
            .flat_map(|artifacts| artifacts.iter().copied())
            .collect()
    }

    /// Resource kinds an artifact is responsible for
    pub fn resources_for_artifact(&self, artifact: &str) -> Vec<ResourceKind> {
        self.by_resource
            .iter()
            .filter(|(_, artifacts)| artifacts.contains(&artifact))
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Iterate the table in resource order
    pub fn entries(&self) -> impl Iterator<Item = (ResourceKind, &[&'static str])> {
        self.by_resource
            .iter()
            .map(|(kind, artifacts)| (*kind, artifacts.as_slice()))
    }

    pub fn resource_count(&self) -> usize {
        self.by_resource.len()
    }
}

impl Default for ResourceFileIndex {
    fn default() -> Self {
        Self::new()
    }
}
