//! Configuration space enumeration
//!
//! A [`Configuration`] picks one value per dimension. [`ConfigurationSpace`]
//! yields the full Cartesian product in a fixed nested order: runtime is the
//! outermost loop and subdomain the innermost.

mod dimensions;
mod error;

pub use dimensions::{
    DomainConfig, Runtime, SecurityProfile, SslConfig, SubdomainConfig, Topology,
};
pub use error::ConfigurationKeyError;

use dimensions::Labelled;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between dimension labels in an identity key
pub const KEY_SEPARATOR: char = '_';

/// One point in the deployment parameter space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Configuration {
    pub runtime: Runtime,
    pub topology: Topology,
    pub security_profile: SecurityProfile,
    pub domain_config: DomainConfig,
    pub ssl_config: SslConfig,
    pub subdomain_config: SubdomainConfig,
}

impl Configuration {
    pub fn new(
        runtime: Runtime,
        topology: Topology,
        security_profile: SecurityProfile,
        domain_config: DomainConfig,
        ssl_config: SslConfig,
        subdomain_config: SubdomainConfig,
    ) -> Self {
        Self {
            runtime,
            topology,
            security_profile,
            domain_config,
            ssl_config,
            subdomain_config,
        }
    }

    /// Deterministic identity key, e.g.
    /// `EC2_JENKINS_SINGLE_NODE_DEV_no-domain_ssl-disabled_no-subdomain`
    pub fn key(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}",
            self.runtime.label(),
            self.topology.label(),
            self.security_profile.label(),
            self.domain_config.label(),
            self.ssl_config.label(),
            self.subdomain_config.label()
        )
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationKeyError;

    /// Parse an identity key back into a configuration.
    ///
    /// Topology labels contain the separator themselves, so the key is
    /// consumed dimension by dimension, matching each known label as a prefix.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let mut rest = key;

        let runtime = take_label::<Runtime>(key, &mut rest)?;
        skip_separator(&mut rest);
        let topology = take_label::<Topology>(key, &mut rest)?;
        skip_separator(&mut rest);
        let security_profile = take_label::<SecurityProfile>(key, &mut rest)?;
        skip_separator(&mut rest);
        let domain_config = take_label::<DomainConfig>(key, &mut rest)?;
        skip_separator(&mut rest);
        let ssl_config = take_label::<SslConfig>(key, &mut rest)?;
        skip_separator(&mut rest);
        let subdomain_config = take_label::<SubdomainConfig>(key, &mut rest)?;

        if !rest.is_empty() {
            return Err(ConfigurationKeyError::TrailingInput {
                key: key.to_string(),
                trailing: rest.to_string(),
            });
        }

        Ok(Self::new(
            runtime,
            topology,
            security_profile,
            domain_config,
            ssl_config,
            subdomain_config,
        ))
    }
}

/// Consume one dimension label from `rest`; the separator after it is left
fn take_label<T: Labelled>(key: &str, rest: &mut &str) -> Result<T, ConfigurationKeyError> {
    if rest.is_empty() {
        return Err(ConfigurationKeyError::MissingDimension {
            key: key.to_string(),
            dimension: T::DIMENSION,
        });
    }

    // Longest match wins so no label shadows a longer one sharing its prefix
    let matched = T::all()
        .iter()
        .copied()
        .filter(|value| ends_segment(rest, value.label()))
        .max_by_key(|value| value.label().len());

    match matched {
        Some(value) => {
            *rest = &rest[value.label().len()..];
            Ok(value)
        }
        None => {
            let segment = rest.split(KEY_SEPARATOR).next().unwrap_or_default();
            Err(ConfigurationKeyError::UnknownValue {
                key: key.to_string(),
                dimension: T::DIMENSION,
                value: segment.to_string(),
            })
        }
    }
}

/// `rest` starts with `label` followed by a separator or the end of the key
fn ends_segment(rest: &str, label: &str) -> bool {
    rest.strip_prefix(label)
        .is_some_and(|after| after.is_empty() || after.starts_with(KEY_SEPARATOR))
}

/// Separator between two dimensions; an empty remainder is reported by the next label
fn skip_separator(rest: &mut &str) {
    if let Some(after) = rest.strip_prefix(KEY_SEPARATOR) {
        *rest = after;
    }
}

/// The finite Cartesian product of all six dimensions
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationSpace;

impl ConfigurationSpace {
    pub fn new() -> Self {
        Self
    }

    /// Product of per-dimension sizes
    pub fn cardinality(&self) -> usize {
        Runtime::ALL.len()
            * Topology::ALL.len()
            * SecurityProfile::ALL.len()
            * DomainConfig::ALL.len()
            * SslConfig::ALL.len()
            * SubdomainConfig::ALL.len()
    }

    /// Every configuration exactly once, in fixed nested order
    pub fn enumerate(&self) -> Vec<Configuration> {
        let mut configurations = Vec::with_capacity(self.cardinality());

        for runtime in Runtime::ALL {
            for topology in Topology::ALL {
                for security_profile in SecurityProfile::ALL {
                    for domain_config in DomainConfig::ALL {
                        for ssl_config in SslConfig::ALL {
                            for subdomain_config in SubdomainConfig::ALL {
                                configurations.push(Configuration::new(
                                    runtime,
                                    topology,
                                    security_profile,
                                    domain_config,
                                    ssl_config,
                                    subdomain_config,
                                ));
                            }
                        }
                    }
                }
            }
        }

        configurations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    #[test]
    fn test_cardinality_is_96() {
        let space = ConfigurationSpace::new();
        assert_eq!(space.cardinality(), 96);
        assert_eq!(space.enumerate().len(), 96);
    }

    #[test]
    fn test_every_configuration_is_unique() {
        let configurations = ConfigurationSpace::new().enumerate();
        let keys: HashSet<String> = configurations.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), configurations.len());
    }

    #[test]
    fn test_enumeration_order_is_fixed() {
        let configurations = ConfigurationSpace::new().enumerate();
        assert_eq!(
            configurations[0].key(),
            "EC2_JENKINS_SINGLE_NODE_DEV_with-domain_ssl-enabled_with-subdomain"
        );
        assert_eq!(
            configurations[1].key(),
            "EC2_JENKINS_SINGLE_NODE_DEV_with-domain_ssl-enabled_no-subdomain"
        );
        assert_eq!(
            configurations[95].key(),
            "FARGATE_JENKINS_SERVICE_PRODUCTION_no-domain_ssl-disabled_no-subdomain"
        );
    }

    #[test]
    fn test_key_parses_back() {
        for configuration in ConfigurationSpace::new().enumerate() {
            let parsed: Configuration = configuration.key().parse().unwrap();
            assert_eq!(parsed, configuration);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_value() {
        let result = "EC2_JENKINS_CLUSTER_DEV_no-domain_ssl-disabled_no-subdomain"
            .parse::<Configuration>();
        assert_matches!(
            result,
            Err(ConfigurationKeyError::UnknownValue { dimension: "topology", .. })
        );
    }

    #[test]
    fn test_parse_rejects_truncated_key() {
        let result = "FARGATE_JENKINS_SERVICE_DEV".parse::<Configuration>();
        assert_matches!(
            result,
            Err(ConfigurationKeyError::MissingDimension { dimension: "domain_config", .. })
        );
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        let result = "EC2_JENKINS_SERVICE_DEV_no-domain_ssl-disabled_no-subdomain_extra"
            .parse::<Configuration>();
        assert_matches!(result, Err(ConfigurationKeyError::TrailingInput { .. }));
    }

    #[test]
    fn test_parse_rejects_trailing_separator() {
        let result = "EC2_JENKINS_SINGLE_NODE_DEV_no-domain_ssl-disabled_no-subdomain_"
            .parse::<Configuration>();
        assert_matches!(
            result,
            Err(ConfigurationKeyError::TrailingInput { ref trailing, .. }) if trailing == "_"
        );
    }

    #[test]
    fn test_parse_rejects_label_without_separator() {
        let result = "EC2X_JENKINS_SERVICE_DEV_no-domain_ssl-disabled_no-subdomain"
            .parse::<Configuration>();
        assert_matches!(
            result,
            Err(ConfigurationKeyError::UnknownValue { dimension: "runtime", .. })
        );
    }
}
