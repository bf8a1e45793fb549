//! Hand-maintained resource → artifact table
//!
//! Which CloudForge source files create which resource kinds. This is
//! knowledge about an external codebase and must be kept in step with it by
//! hand; nothing here is discovered.

use crate::resources::ResourceKind;

pub const VPC_FACTORY: &str = "VpcFactory.java";
pub const ALB_FACTORY: &str = "AlbFactory.java";
pub const SYSTEM_CONTEXT: &str = "SystemContext.java";
pub const FARGATE_RUNTIME_CONFIGURATION: &str = "FargateRuntimeConfiguration.java";
pub const EC2_RUNTIME_CONFIGURATION: &str = "Ec2RuntimeConfiguration.java";
pub const FARGATE_FACTORY: &str = "FargateFactory.java";
pub const EC2_FACTORY: &str = "Ec2Factory.java";
pub const JENKINS_FACTORY: &str = "JenkinsFactory.java";
pub const EFS_FACTORY: &str = "EfsFactory.java";
pub const DOMAIN_FACTORY: &str = "DomainFactory.java";
pub const SERVICE_TOPOLOGY_CONFIGURATION: &str = "JenkinsServiceTopologyConfiguration.java";
pub const SINGLE_NODE_TOPOLOGY_CONFIGURATION: &str = "JenkinsSingleNodeTopologyConfiguration.java";
pub const IAM_STANDARD_CONFIGURATION: &str = "IamStandardConfiguration.java";
pub const LOGGING_CW_FACTORY: &str = "LoggingCwFactory.java";
pub const ALARM_FACTORY: &str = "AlarmFactory.java";
pub const STAGING_SECURITY_CONFIGURATION: &str = "StagingSecurityConfiguration.java";
pub const PRODUCTION_SECURITY_CONFIGURATION: &str = "ProductionSecurityConfiguration.java";

/// Artifacts responsible for a resource kind. Never empty.
pub fn artifacts_for(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        // VpcFactory
        ResourceKind::Vpc | ResourceKind::Subnets | ResourceKind::InternetGateway => {
            &[VPC_FACTORY]
        }

        // AlbFactory
        ResourceKind::ApplicationLoadBalancer => &[ALB_FACTORY],
        ResourceKind::SecurityGroups => &[ALB_FACTORY, SYSTEM_CONTEXT],

        // Listeners and target groups
        ResourceKind::HttpListener => &[ALB_FACTORY, FARGATE_RUNTIME_CONFIGURATION],
        ResourceKind::HttpsListener => &[FARGATE_RUNTIME_CONFIGURATION],
        ResourceKind::TargetGroups => &[FARGATE_RUNTIME_CONFIGURATION, SYSTEM_CONTEXT],

        // FargateFactory
        ResourceKind::EcsCluster
        | ResourceKind::EcsService
        | ResourceKind::FargateTaskDefinition => &[FARGATE_FACTORY],

        // Ec2Factory
        ResourceKind::Ec2Instances => &[EC2_FACTORY, JENKINS_FACTORY],
        ResourceKind::AutoScalingGroup | ResourceKind::LaunchTemplate => &[EC2_FACTORY],

        // EfsFactory
        ResourceKind::EfsFileSystem | ResourceKind::EfsMountTarget => &[EFS_FACTORY],
        ResourceKind::EfsAccessPoint => &[EFS_FACTORY, FARGATE_FACTORY],

        // DNS & TLS
        ResourceKind::Route53HostedZone => &[DOMAIN_FACTORY],
        ResourceKind::Route53Records => &[
            SERVICE_TOPOLOGY_CONFIGURATION,
            SINGLE_NODE_TOPOLOGY_CONFIGURATION,
        ],
        ResourceKind::AcmCertificate => &[FARGATE_RUNTIME_CONFIGURATION, EC2_RUNTIME_CONFIGURATION],

        // IAM
        ResourceKind::IamRoles => &[IAM_STANDARD_CONFIGURATION, FARGATE_FACTORY, EC2_FACTORY],
        ResourceKind::IamPolicies => &[IAM_STANDARD_CONFIGURATION],

        // Observability
        ResourceKind::CloudwatchLogs => &[LOGGING_CW_FACTORY],
        ResourceKind::CloudwatchAlarms => &[ALARM_FACTORY],

        // Security configurations
        ResourceKind::WafWebAcl => &[PRODUCTION_SECURITY_CONFIGURATION],
        ResourceKind::Cloudtrail | ResourceKind::ConfigRules => &[
            STAGING_SECURITY_CONFIGURATION,
            PRODUCTION_SECURITY_CONFIGURATION,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_maps_to_at_least_one_artifact() {
        for kind in ResourceKind::ALL {
            assert!(!artifacts_for(kind).is_empty(), "{} has no artifacts", kind);
        }
    }

    #[test]
    fn test_no_duplicate_artifacts_per_kind() {
        for kind in ResourceKind::ALL {
            let artifacts = artifacts_for(kind);
            let unique: HashSet<&str> = artifacts.iter().copied().collect();
            assert_eq!(unique.len(), artifacts.len(), "{}", kind);
        }
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(artifacts_for(ResourceKind::Vpc), &[VPC_FACTORY]);
        assert_eq!(
            artifacts_for(ResourceKind::IamRoles),
            &[IAM_STANDARD_CONFIGURATION, FARGATE_FACTORY, EC2_FACTORY]
        );
        assert_eq!(
            artifacts_for(ResourceKind::HttpsListener),
            &[FARGATE_RUNTIME_CONFIGURATION]
        );
    }
}
