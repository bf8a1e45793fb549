//! Resource derivation
//!
//! Maps a valid configuration to the set of resource kinds it provisions.
//! Derivation is an ordered decision table of [`DerivationRule`]s; each rule
//! pairs a predicate with the kinds it adds. Rules only ever add, and the
//! result is a set, so a kind contributed by several rules appears once.

mod kind;

pub use kind::{ResourceKind, Subsystem};

use crate::space::{Configuration, Runtime, SecurityProfile};
use std::collections::BTreeSet;

/// Deduplicated, ordered set of resource kinds
pub type ResourceSet = BTreeSet<ResourceKind>;

/// Resources every valid configuration provisions: network, identity, logging
pub const BASE_RESOURCES: &[ResourceKind] = &[
    ResourceKind::Vpc,
    ResourceKind::Subnets,
    ResourceKind::SecurityGroups,
    ResourceKind::InternetGateway,
    ResourceKind::IamRoles,
    ResourceKind::IamPolicies,
    ResourceKind::CloudwatchLogs,
];

/// One row of the derivation table
#[derive(Debug, Clone, Copy)]
pub struct DerivationRule {
    pub name: &'static str,
    pub adds: &'static [ResourceKind],
    applies: fn(&Configuration) -> bool,
}

impl DerivationRule {
    pub const fn new(
        name: &'static str,
        applies: fn(&Configuration) -> bool,
        adds: &'static [ResourceKind],
    ) -> Self {
        Self {
            name,
            adds,
            applies,
        }
    }

    pub fn applies(&self, configuration: &Configuration) -> bool {
        (self.applies)(configuration)
    }
}

// ============================================================================
// DERIVATION TABLE
// ============================================================================

pub const BASE_INFRASTRUCTURE: DerivationRule =
    DerivationRule::new("base_infrastructure", |_| true, BASE_RESOURCES);

pub const FARGATE_COMPUTE: DerivationRule = DerivationRule::new(
    "fargate_compute",
    |c| c.runtime == Runtime::Fargate,
    &[
        ResourceKind::EcsCluster,
        ResourceKind::EcsService,
        ResourceKind::FargateTaskDefinition,
    ],
);

pub const EC2_COMPUTE: DerivationRule = DerivationRule::new(
    "ec2_compute",
    |c| c.runtime == Runtime::Ec2,
    &[ResourceKind::Ec2Instances],
);

pub const EC2_SERVICE_SCALING: DerivationRule = DerivationRule::new(
    "ec2_service_scaling",
    |c| c.runtime == Runtime::Ec2 && c.topology.is_service(),
    &[ResourceKind::AutoScalingGroup],
);

pub const SERVICE_LOAD_BALANCING: DerivationRule = DerivationRule::new(
    "service_load_balancing",
    |c| c.topology.is_service(),
    &[
        ResourceKind::ApplicationLoadBalancer,
        ResourceKind::TargetGroups,
    ],
);

pub const SHARED_STORAGE: DerivationRule = DerivationRule::new(
    "shared_storage",
    |_| true,
    &[
        ResourceKind::EfsFileSystem,
        ResourceKind::EfsAccessPoint,
        ResourceKind::EfsMountTarget,
    ],
);

pub const DOMAIN_DNS: DerivationRule = DerivationRule::new(
    "domain_dns",
    |c| c.domain_config.is_configured(),
    &[ResourceKind::Route53HostedZone, ResourceKind::Route53Records],
);

/// HTTPS listener plus an HTTP listener that redirects to it
pub const DOMAIN_SERVICE_HTTPS: DerivationRule = DerivationRule::new(
    "domain_service_https",
    |c| c.domain_config.is_configured() && c.topology.is_service() && c.ssl_config.is_enabled(),
    &[
        ResourceKind::AcmCertificate,
        ResourceKind::HttpsListener,
        ResourceKind::HttpListener,
    ],
);

pub const DOMAIN_SERVICE_HTTP: DerivationRule = DerivationRule::new(
    "domain_service_http",
    |c| c.domain_config.is_configured() && c.topology.is_service() && !c.ssl_config.is_enabled(),
    &[ResourceKind::HttpListener],
);

pub const NO_DOMAIN_SERVICE_HTTP: DerivationRule = DerivationRule::new(
    "no_domain_service_http",
    |c| !c.domain_config.is_configured() && c.topology.is_service(),
    &[ResourceKind::HttpListener],
);

pub const STAGING_AUDIT: DerivationRule = DerivationRule::new(
    "staging_audit",
    |c| c.security_profile == SecurityProfile::Staging,
    &[ResourceKind::Cloudtrail, ResourceKind::ConfigRules],
);

/// Computed on its own, not layered on top of the staging row
pub const PRODUCTION_HARDENING: DerivationRule = DerivationRule::new(
    "production_hardening",
    |c| c.security_profile == SecurityProfile::Production,
    &[
        ResourceKind::WafWebAcl,
        ResourceKind::Cloudtrail,
        ResourceKind::ConfigRules,
        ResourceKind::CloudwatchAlarms,
    ],
);

/// The full derivation table in evaluation order
pub const DERIVATION_RULES: &[DerivationRule] = &[
    BASE_INFRASTRUCTURE,
    FARGATE_COMPUTE,
    EC2_COMPUTE,
    EC2_SERVICE_SCALING,
    SERVICE_LOAD_BALANCING,
    SHARED_STORAGE,
    DOMAIN_DNS,
    DOMAIN_SERVICE_HTTPS,
    DOMAIN_SERVICE_HTTP,
    NO_DOMAIN_SERVICE_HTTP,
    STAGING_AUDIT,
    PRODUCTION_HARDENING,
];

/// Applies the derivation table to configurations
#[derive(Debug, Clone)]
pub struct ResourceDerivation {
    rules: Vec<DerivationRule>,
}

impl Default for ResourceDerivation {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceDerivation {
    pub fn new() -> Self {
        Self {
            rules: DERIVATION_RULES.to_vec(),
        }
    }

    /// Custom table, evaluated in the given order
    pub fn from_rules(rules: Vec<DerivationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[DerivationRule] {
        &self.rules
    }

    /// Resource set for a configuration already known to be valid
    pub fn derive(&self, configuration: &Configuration) -> ResourceSet {
        self.rules
            .iter()
            .filter(|rule| rule.applies(configuration))
            .flat_map(|rule| rule.adds.iter().copied())
            .collect()
    }

    /// Names of the rows that fire for a configuration, in table order
    pub fn applied_rules(&self, configuration: &Configuration) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.applies(configuration))
            .map(|rule| rule.name)
            .collect()
    }
}

/// The base set as a [`ResourceSet`]
pub fn base_resources() -> ResourceSet {
    BASE_RESOURCES.iter().copied().collect()
}
