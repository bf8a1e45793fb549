//! Validity predicate over configurations
//!
//! A configuration is valid iff every [`DependencyRule`] holds. Rules are
//! independent conjuncts: evaluation order does not matter and no rule looks
//! at derived resources.

use crate::space::Configuration;

/// A single named dependency between dimensions
#[derive(Debug, Clone, Copy)]
pub struct DependencyRule {
    pub name: &'static str,
    pub description: &'static str,
    holds: fn(&Configuration) -> bool,
}

impl DependencyRule {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        holds: fn(&Configuration) -> bool,
    ) -> Self {
        Self {
            name,
            description,
            holds,
        }
    }

    pub fn holds(&self, configuration: &Configuration) -> bool {
        (self.holds)(configuration)
    }
}

/// SSL termination needs a domain to issue a certificate for
pub const SSL_REQUIRES_DOMAIN: DependencyRule = DependencyRule::new(
    "ssl_requires_domain",
    "SSL enabled requires a configured domain",
    |c| !c.ssl_config.is_enabled() || c.domain_config.is_configured(),
);

/// A subdomain is only meaningful beneath a configured domain
pub const SUBDOMAIN_REQUIRES_DOMAIN: DependencyRule = DependencyRule::new(
    "subdomain_requires_domain",
    "Subdomain requires a configured domain",
    |c| !c.subdomain_config.is_requested() || c.domain_config.is_configured(),
);

/// Conjunction of dependency rules
#[derive(Debug, Clone)]
pub struct ValidityPredicate {
    rules: Vec<DependencyRule>,
}

impl Default for ValidityPredicate {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidityPredicate {
    /// The standard rule set
    pub fn new() -> Self {
        Self {
            rules: vec![SSL_REQUIRES_DOMAIN, SUBDOMAIN_REQUIRES_DOMAIN],
        }
    }

    /// Extend with a further conjunct
    pub fn with_rule(mut self, rule: DependencyRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    pub fn is_valid(&self, configuration: &Configuration) -> bool {
        self.rules.iter().all(|rule| rule.holds(configuration))
    }

    /// Rules the configuration breaks, in rule order
    pub fn violations(&self, configuration: &Configuration) -> Vec<&DependencyRule> {
        self.rules
            .iter()
            .filter(|rule| !rule.holds(configuration))
            .collect()
    }
}
