//! Resource kind catalogue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subsystem a resource kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Network,
    LoadBalancing,
    ComputeEc2,
    ComputeFargate,
    Storage,
    DnsTls,
    Identity,
    Logging,
    Security,
}

impl Subsystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subsystem::Network => "network",
            Subsystem::LoadBalancing => "load_balancing",
            Subsystem::ComputeEc2 => "compute_ec2",
            Subsystem::ComputeFargate => "compute_fargate",
            Subsystem::Storage => "storage",
            Subsystem::DnsTls => "dns_tls",
            Subsystem::Identity => "identity",
            Subsystem::Logging => "logging",
            Subsystem::Security => "security",
        }
    }
}

/// Category of provisioned infrastructure.
///
/// Serialised by identifier rather than CloudFormation type: the HTTP and
/// HTTPS listeners share one CloudFormation type but are distinct kinds here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    // Network
    Vpc,
    Subnets,
    SecurityGroups,
    InternetGateway,

    // Load balancing
    ApplicationLoadBalancer,
    TargetGroups,
    HttpListener,
    HttpsListener,

    // Compute - EC2
    Ec2Instances,
    AutoScalingGroup,
    LaunchTemplate,

    // Compute - Fargate
    EcsCluster,
    EcsService,
    FargateTaskDefinition,

    // Storage
    EfsFileSystem,
    EfsAccessPoint,
    EfsMountTarget,

    // DNS & TLS
    Route53HostedZone,
    Route53Records,
    AcmCertificate,

    // Identity
    IamRoles,
    IamPolicies,

    // Monitoring & logging
    CloudwatchLogs,
    CloudwatchAlarms,

    // Security
    WafWebAcl,
    Cloudtrail,
    ConfigRules,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 27] = [
        ResourceKind::Vpc,
        ResourceKind::Subnets,
        ResourceKind::SecurityGroups,
        ResourceKind::InternetGateway,
        ResourceKind::ApplicationLoadBalancer,
        ResourceKind::TargetGroups,
        ResourceKind::HttpListener,
        ResourceKind::HttpsListener,
        ResourceKind::Ec2Instances,
        ResourceKind::AutoScalingGroup,
        ResourceKind::LaunchTemplate,
        ResourceKind::EcsCluster,
        ResourceKind::EcsService,
        ResourceKind::FargateTaskDefinition,
        ResourceKind::EfsFileSystem,
        ResourceKind::EfsAccessPoint,
        ResourceKind::EfsMountTarget,
        ResourceKind::Route53HostedZone,
        ResourceKind::Route53Records,
        ResourceKind::AcmCertificate,
        ResourceKind::IamRoles,
        ResourceKind::IamPolicies,
        ResourceKind::CloudwatchLogs,
        ResourceKind::CloudwatchAlarms,
        ResourceKind::WafWebAcl,
        ResourceKind::Cloudtrail,
        ResourceKind::ConfigRules,
    ];

    /// Stable identifier used in every output
    pub fn id(&self) -> &'static str {
        match self {
            ResourceKind::Vpc => "VPC",
            ResourceKind::Subnets => "SUBNETS",
            ResourceKind::SecurityGroups => "SECURITY_GROUPS",
            ResourceKind::InternetGateway => "INTERNET_GATEWAY",
            ResourceKind::ApplicationLoadBalancer => "APPLICATION_LOAD_BALANCER",
            ResourceKind::TargetGroups => "TARGET_GROUPS",
            ResourceKind::HttpListener => "HTTP_LISTENER",
            ResourceKind::HttpsListener => "HTTPS_LISTENER",
            ResourceKind::Ec2Instances => "EC2_INSTANCES",
            ResourceKind::AutoScalingGroup => "AUTO_SCALING_GROUP",
            ResourceKind::LaunchTemplate => "LAUNCH_TEMPLATE",
            ResourceKind::EcsCluster => "ECS_CLUSTER",
            ResourceKind::EcsService => "ECS_SERVICE",
            ResourceKind::FargateTaskDefinition => "FARGATE_TASK_DEFINITION",
            ResourceKind::EfsFileSystem => "EFS_FILE_SYSTEM",
            ResourceKind::EfsAccessPoint => "EFS_ACCESS_POINT",
            ResourceKind::EfsMountTarget => "EFS_MOUNT_TARGET",
            ResourceKind::Route53HostedZone => "ROUTE53_HOSTED_ZONE",
            ResourceKind::Route53Records => "ROUTE53_RECORDS",
            ResourceKind::AcmCertificate => "ACM_CERTIFICATE",
            ResourceKind::IamRoles => "IAM_ROLES",
            ResourceKind::IamPolicies => "IAM_POLICIES",
            ResourceKind::CloudwatchLogs => "CLOUDWATCH_LOGS",
            ResourceKind::CloudwatchAlarms => "CLOUDWATCH_ALARMS",
            ResourceKind::WafWebAcl => "WAF_WEB_ACL",
            ResourceKind::Cloudtrail => "CLOUDTRAIL",
            ResourceKind::ConfigRules => "CONFIG_RULES",
        }
    }

    /// CloudFormation resource type
    pub fn cfn_type(&self) -> &'static str {
        match self {
            ResourceKind::Vpc => "AWS::EC2::VPC",
            ResourceKind::Subnets => "AWS::EC2::Subnet",
            ResourceKind::SecurityGroups => "AWS::EC2::SecurityGroup",
            ResourceKind::InternetGateway => "AWS::EC2::InternetGateway",
            ResourceKind::ApplicationLoadBalancer => "AWS::ElasticLoadBalancingV2::LoadBalancer",
            ResourceKind::TargetGroups => "AWS::ElasticLoadBalancingV2::TargetGroup",
            ResourceKind::HttpListener | ResourceKind::HttpsListener => {
                "AWS::ElasticLoadBalancingV2::Listener"
            }
            ResourceKind::Ec2Instances => "AWS::EC2::Instance",
            ResourceKind::AutoScalingGroup => "AWS::AutoScaling::AutoScalingGroup",
            ResourceKind::LaunchTemplate => "AWS::EC2::LaunchTemplate",
            ResourceKind::EcsCluster => "AWS::ECS::Cluster",
            ResourceKind::EcsService => "AWS::ECS::Service",
            ResourceKind::FargateTaskDefinition => "AWS::ECS::TaskDefinition",
            ResourceKind::EfsFileSystem => "AWS::EFS::FileSystem",
            ResourceKind::EfsAccessPoint => "AWS::EFS::AccessPoint",
            ResourceKind::EfsMountTarget => "AWS::EFS::MountTarget",
            ResourceKind::Route53HostedZone => "AWS::Route53::HostedZone",
            ResourceKind::Route53Records => "AWS::Route53::RecordSet",
            ResourceKind::AcmCertificate => "AWS::CertificateManager::Certificate",
            ResourceKind::IamRoles => "AWS::IAM::Role",
            ResourceKind::IamPolicies => "AWS::IAM::Policy",
            ResourceKind::CloudwatchLogs => "AWS::Logs::LogGroup",
            ResourceKind::CloudwatchAlarms => "AWS::CloudWatch::Alarm",
            ResourceKind::WafWebAcl => "AWS::WAFv2::WebACL",
            ResourceKind::Cloudtrail => "AWS::CloudTrail::Trail",
            ResourceKind::ConfigRules => "AWS::Config::ConfigRule",
        }
    }

    pub fn subsystem(&self) -> Subsystem {
        match self {
            ResourceKind::Vpc
            | ResourceKind::Subnets
            | ResourceKind::SecurityGroups
            | ResourceKind::InternetGateway => Subsystem::Network,
            ResourceKind::ApplicationLoadBalancer
            | ResourceKind::TargetGroups
            | ResourceKind::HttpListener
            | ResourceKind::HttpsListener => Subsystem::LoadBalancing,
            ResourceKind::Ec2Instances
            | ResourceKind::AutoScalingGroup
            | ResourceKind::LaunchTemplate => Subsystem::ComputeEc2,
            ResourceKind::EcsCluster
            | ResourceKind::EcsService
            | ResourceKind::FargateTaskDefinition => Subsystem::ComputeFargate,
            ResourceKind::EfsFileSystem
            | ResourceKind::EfsAccessPoint
            | ResourceKind::EfsMountTarget => Subsystem::Storage,
            ResourceKind::Route53HostedZone
            | ResourceKind::Route53Records
            | ResourceKind::AcmCertificate => Subsystem::DnsTls,
            ResourceKind::IamRoles | ResourceKind::IamPolicies => Subsystem::Identity,
            ResourceKind::CloudwatchLogs => Subsystem::Logging,
            ResourceKind::CloudwatchAlarms
            | ResourceKind::WafWebAcl
            | ResourceKind::Cloudtrail
            | ResourceKind::ConfigRules => Subsystem::Security,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
