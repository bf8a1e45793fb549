//! Dimension value sets for the deployment configuration space
//!
//! Each dimension is a closed enum. The `label()` of a value is the string the
//! CloudForge codebase uses for it, and is what appears in identity keys and
//! in every generated output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compute runtime hosting Jenkins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Runtime {
    #[serde(rename = "EC2")]
    Ec2,
    #[serde(rename = "FARGATE")]
    Fargate,
}

impl Runtime {
    pub const ALL: [Runtime; 2] = [Runtime::Ec2, Runtime::Fargate];

    pub fn label(&self) -> &'static str {
        match self {
            Runtime::Ec2 => "EC2",
            Runtime::Fargate => "FARGATE",
        }
    }
}

/// Deployment topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Topology {
    #[serde(rename = "JENKINS_SINGLE_NODE")]
    SingleNode,
    #[serde(rename = "JENKINS_SERVICE")]
    Service,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::SingleNode, Topology::Service];

    pub fn label(&self) -> &'static str {
        match self {
            Topology::SingleNode => "JENKINS_SINGLE_NODE",
            Topology::Service => "JENKINS_SERVICE",
        }
    }

    /// Service topology fronts the runtime with a load balancer
    pub fn is_service(&self) -> bool {
        matches!(self, Topology::Service)
    }
}

/// Security hardening profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SecurityProfile {
    #[serde(rename = "DEV")]
    Dev,
    #[serde(rename = "STAGING")]
    Staging,
    #[serde(rename = "PRODUCTION")]
    Production,
}

impl SecurityProfile {
    pub const ALL: [SecurityProfile; 3] = [
        SecurityProfile::Dev,
        SecurityProfile::Staging,
        SecurityProfile::Production,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SecurityProfile::Dev => "DEV",
            SecurityProfile::Staging => "STAGING",
            SecurityProfile::Production => "PRODUCTION",
        }
    }
}

/// Whether a DNS domain is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DomainConfig {
    #[serde(rename = "with-domain")]
    WithDomain,
    #[serde(rename = "no-domain")]
    NoDomain,
}

impl DomainConfig {
    pub const ALL: [DomainConfig; 2] = [DomainConfig::WithDomain, DomainConfig::NoDomain];

    pub fn label(&self) -> &'static str {
        match self {
            DomainConfig::WithDomain => "with-domain",
            DomainConfig::NoDomain => "no-domain",
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, DomainConfig::WithDomain)
    }
}

/// TLS termination switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SslConfig {
    #[serde(rename = "ssl-enabled")]
    Enabled,
    #[serde(rename = "ssl-disabled")]
    Disabled,
}

impl SslConfig {
    pub const ALL: [SslConfig; 2] = [SslConfig::Enabled, SslConfig::Disabled];

    pub fn label(&self) -> &'static str {
        match self {
            SslConfig::Enabled => "ssl-enabled",
            SslConfig::Disabled => "ssl-disabled",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, SslConfig::Enabled)
    }
}

/// Whether Jenkins is published under a subdomain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubdomainConfig {
    #[serde(rename = "with-subdomain")]
    WithSubdomain,
    #[serde(rename = "no-subdomain")]
    NoSubdomain,
}

impl SubdomainConfig {
    pub const ALL: [SubdomainConfig; 2] =
        [SubdomainConfig::WithSubdomain, SubdomainConfig::NoSubdomain];

    pub fn label(&self) -> &'static str {
        match self {
            SubdomainConfig::WithSubdomain => "with-subdomain",
            SubdomainConfig::NoSubdomain => "no-subdomain",
        }
    }

    pub fn is_requested(&self) -> bool {
        matches!(self, SubdomainConfig::WithSubdomain)
    }
}

/// Shared lookup used by key parsing: find the value whose label matches
pub(crate) trait Labelled: Sized + Copy + 'static {
    const DIMENSION: &'static str;
    fn all() -> &'static [Self];
    fn label(&self) -> &'static str;
}

macro_rules! impl_labelled {
    ($ty:ty, $dimension:expr) => {
        impl Labelled for $ty {
            const DIMENSION: &'static str = $dimension;

            fn all() -> &'static [Self] {
                &<$ty>::ALL
            }

            fn label(&self) -> &'static str {
                <$ty>::label(self)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(<$ty>::label(self))
            }
        }
    };
}

impl_labelled!(Runtime, "runtime");
impl_labelled!(Topology, "topology");
impl_labelled!(SecurityProfile, "security_profile");
impl_labelled!(DomainConfig, "domain_config");
impl_labelled!(SslConfig, "ssl_config");
impl_labelled!(SubdomainConfig, "subdomain_config");

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct_labels<T: Labelled>() -> usize {
        let labels: std::collections::HashSet<&str> =
            T::all().iter().map(|value| value.label()).collect();
        labels.len()
    }

    #[test]
    fn test_labels_are_distinct_within_each_dimension() {
        assert_eq!(distinct_labels::<Runtime>(), Runtime::ALL.len());
        assert_eq!(distinct_labels::<Topology>(), Topology::ALL.len());
        assert_eq!(distinct_labels::<SecurityProfile>(), SecurityProfile::ALL.len());
        assert_eq!(distinct_labels::<DomainConfig>(), DomainConfig::ALL.len());
        assert_eq!(distinct_labels::<SslConfig>(), SslConfig::ALL.len());
        assert_eq!(distinct_labels::<SubdomainConfig>(), SubdomainConfig::ALL.len());
    }

    #[test]
    fn test_topology_labels_use_jenkins_prefix() {
        assert_eq!(Topology::SingleNode.label(), "JENKINS_SINGLE_NODE");
        assert_eq!(Topology::Service.to_string(), "JENKINS_SERVICE");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&SslConfig::Enabled).unwrap();
        assert_eq!(json, "\"ssl-enabled\"");

        let parsed: DomainConfig = serde_json::from_str("\"no-domain\"").unwrap();
        assert_eq!(parsed, DomainConfig::NoDomain);
    }
}
