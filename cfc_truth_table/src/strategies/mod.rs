//! Regression-test groupings over a built table
//!
//! Every strategy except the smoke test is a membership predicate over the
//! configuration plus the valid flag, and keeps only valid entries in
//! enumeration order. The smoke test is a fixed pair with one representative
//! per runtime. Strategies are independent and may overlap.

use crate::space::{
    Configuration, DomainConfig, Runtime, SecurityProfile, SslConfig, SubdomainConfig, Topology,
};
use crate::table::{TruthTable, TruthTableEntry};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A named subset of configuration keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestStrategy {
    #[serde(skip)]
    pub name: &'static str,
    pub description: &'static str,
    pub configurations: Vec<String>,
}

impl TestStrategy {
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.configurations.iter().any(|k| k == key)
    }
}

enum Membership {
    /// Literal keys, independent of the table
    Fixed(fn() -> Vec<Configuration>),
    /// Valid entries whose configuration matches
    Matching(fn(&Configuration) -> bool),
}

struct StrategyDefinition {
    name: &'static str,
    description: &'static str,
    membership: Membership,
}

pub const SMOKE_TEST: &str = "smoke_test";
pub const SSL_REGRESSION: &str = "ssl_regression";
pub const SECURITY_PROFILE_REGRESSION: &str = "security_profile_regression";
pub const FARGATE_REGRESSION: &str = "fargate_regression";
pub const EC2_REGRESSION: &str = "ec2_regression";
pub const DOMAIN_REGRESSION: &str = "domain_regression";
pub const FULL_MATRIX: &str = "full_matrix";

/// Full-featured Fargate service and minimal EC2 single node
fn smoke_pair() -> Vec<Configuration> {
    vec![
        Configuration::new(
            Runtime::Fargate,
            Topology::Service,
            SecurityProfile::Dev,
            DomainConfig::WithDomain,
            SslConfig::Enabled,
            SubdomainConfig::WithSubdomain,
        ),
        Configuration::new(
            Runtime::Ec2,
            Topology::SingleNode,
            SecurityProfile::Dev,
            DomainConfig::NoDomain,
            SslConfig::Disabled,
            SubdomainConfig::NoSubdomain,
        ),
    ]
}

const DEFINITIONS: &[StrategyDefinition] = &[
    StrategyDefinition {
        name: SMOKE_TEST,
        description: "Minimal test set covering basic functionality",
        membership: Membership::Fixed(smoke_pair),
    },
    StrategyDefinition {
        name: SSL_REGRESSION,
        description: "Test SSL certificate and HTTPS listener functionality",
        membership: Membership::Matching(|c| c.ssl_config.is_enabled()),
    },
    StrategyDefinition {
        name: SECURITY_PROFILE_REGRESSION,
        description: "Test security profile hardening",
        membership: Membership::Matching(|c| c.security_profile != SecurityProfile::Dev),
    },
    StrategyDefinition {
        name: FARGATE_REGRESSION,
        description: "Test Fargate-specific functionality",
        membership: Membership::Matching(|c| c.runtime == Runtime::Fargate),
    },
    StrategyDefinition {
        name: EC2_REGRESSION,
        description: "Test EC2-specific functionality",
        membership: Membership::Matching(|c| c.runtime == Runtime::Ec2),
    },
    StrategyDefinition {
        name: DOMAIN_REGRESSION,
        description: "Test domain and DNS functionality",
        membership: Membership::Matching(|c| c.domain_config.is_configured()),
    },
    StrategyDefinition {
        name: FULL_MATRIX,
        description: "Complete test of all valid configurations",
        membership: Membership::Matching(|_| true),
    },
];

impl StrategyDefinition {
    fn members(&self, table: &TruthTable) -> Vec<String> {
        match self.membership {
            Membership::Fixed(configurations) => {
                configurations().iter().map(Configuration::key).collect()
            }
            Membership::Matching(matches) => table
                .valid_entries()
                .filter(|entry| matches(&entry.configuration))
                .map(TruthTableEntry::key)
                .collect(),
        }
    }
}

/// Derives the named strategies from a completed table
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategySelector;

impl StrategySelector {
    pub fn new() -> Self {
        Self
    }

    /// Strategy names in output order
    pub fn names(&self) -> Vec<&'static str> {
        DEFINITIONS.iter().map(|definition| definition.name).collect()
    }

    /// Every strategy, in output order
    pub fn select(&self, table: &TruthTable) -> Vec<TestStrategy> {
        DEFINITIONS
            .iter()
            .map(|definition| TestStrategy {
                name: definition.name,
                description: definition.description,
                configurations: definition.members(table),
            })
            .collect()
    }

    /// A single strategy by name
    pub fn select_one(&self, table: &TruthTable, name: &str) -> Option<TestStrategy> {
        DEFINITIONS
            .iter()
            .find(|definition| definition.name == name)
            .map(|definition| TestStrategy {
                name: definition.name,
                description: definition.description,
                configurations: definition.members(table),
            })
    }
}

/// Strategies serialised as a name → strategy map in output order
#[derive(Debug, Clone, Copy)]
pub struct StrategyMap<'a>(pub &'a [TestStrategy]);

impl Serialize for StrategyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for strategy in self.0 {
            map.serialize_entry(strategy.name, strategy)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TruthTableBuilder;

    fn strategies() -> (TruthTable, Vec<TestStrategy>) {
        let table = TruthTableBuilder::new().build();
        let strategies = StrategySelector::new().select(&table);
        (table, strategies)
    }

    fn by_name<'a>(strategies: &'a [TestStrategy], name: &str) -> &'a TestStrategy {
        strategies.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_strategy_order() {
        let (_, strategies) = strategies();
        let names: Vec<&str> = strategies.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "smoke_test",
                "ssl_regression",
                "security_profile_regression",
                "fargate_regression",
                "ec2_regression",
                "domain_regression",
                "full_matrix",
            ]
        );
        assert_eq!(names, StrategySelector::new().names());
    }

    #[test]
    fn test_smoke_test_is_fixed_pair() {
        let (table, strategies) = strategies();
        let smoke = by_name(&strategies, SMOKE_TEST);
        assert_eq!(
            smoke.configurations,
            vec![
                "FARGATE_JENKINS_SERVICE_DEV_with-domain_ssl-enabled_with-subdomain",
                "EC2_JENKINS_SINGLE_NODE_DEV_no-domain_ssl-disabled_no-subdomain",
            ]
        );
        assert!(smoke.configurations.iter().all(|k| table.get(k).unwrap().valid));
    }

    #[test]
    fn test_full_matrix_is_every_valid_key() {
        let (table, strategies) = strategies();
        let full = by_name(&strategies, FULL_MATRIX);
        let valid: Vec<String> = table.valid_entries().map(|e| e.key()).collect();
        assert_eq!(full.configurations, valid);
        assert_eq!(full.len(), 60);
    }

    #[test]
    fn test_strategy_sizes() {
        let (_, strategies) = strategies();
        // ssl-enabled requires a domain: 2 x 2 x 3 x 2 subdomain values
        assert_eq!(by_name(&strategies, SSL_REGRESSION).len(), 24);
        assert_eq!(by_name(&strategies, SECURITY_PROFILE_REGRESSION).len(), 40);
        assert_eq!(by_name(&strategies, FARGATE_REGRESSION).len(), 30);
        assert_eq!(by_name(&strategies, EC2_REGRESSION).len(), 30);
        assert_eq!(by_name(&strategies, DOMAIN_REGRESSION).len(), 48);
    }

    #[test]
    fn test_strategies_only_hold_valid_keys() {
        let (table, strategies) = strategies();
        for strategy in &strategies {
            for key in &strategy.configurations {
                assert!(table.get(key).unwrap().valid, "{} in {}", key, strategy.name);
            }
        }
    }

    #[test]
    fn test_predicate_strategies_subset_of_full_matrix() {
        let (_, strategies) = strategies();
        let full = by_name(&strategies, FULL_MATRIX);
        for strategy in strategies.iter().filter(|s| s.name != SMOKE_TEST) {
            assert!(strategy.configurations.iter().all(|k| full.contains(k)));
        }
    }

    #[test]
    fn test_select_one() {
        let table = TruthTableBuilder::new().build();
        let selector = StrategySelector::new();
        let ec2 = selector.select_one(&table, EC2_REGRESSION).unwrap();
        assert!(ec2.configurations.iter().all(|k| k.starts_with("EC2_")));
        assert!(selector.select_one(&table, "nightly").is_none());
    }

    #[test]
    fn test_serialised_as_ordered_map() {
        let (_, strategies) = strategies();
        let text = serde_json::to_string(&StrategyMap(&strategies)).unwrap();

        assert!(text.starts_with("{\"smoke_test\":{\"description\":"));
        assert!(text.find("\"ssl_regression\"").unwrap() < text.find("\"full_matrix\"").unwrap());
    }
}
