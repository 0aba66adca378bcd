//! Pipeline step names

use serde::{Deserialize, Serialize};

/// One step of the provisioning pipeline.
///
/// Failures carry the step so an operator knows exactly where the run
/// stopped; the names also label per-step tracing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisionStep {
    DescribeAvailabilityZones,
    CreateVpc,
    WaitVpcAvailable,
    EnableVpcDns,
    TagVpc,
    CreateInternetGateway,
    TagInternetGateway,
    AttachInternetGateway,
    CreatePublicSubnet,
    WaitPublicSubnetAvailable,
    TagPublicSubnet,
    EnablePublicIp,
    CreatePrivateSubnet,
    WaitPrivateSubnetAvailable,
    TagPrivateSubnet,
    CreatePublicRouteTable,
    TagPublicRouteTable,
    AddDefaultRoute,
    AssociatePublicRouteTable,
    CreatePrivateRouteTable,
    TagPrivateRouteTable,
    AssociatePrivateRouteTable,
    CreateDbSubnetGroup,
}

impl std::fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProvisionStep::DescribeAvailabilityZones => "DescribeAvailabilityZones",
            ProvisionStep::CreateVpc => "CreateVpc",
            ProvisionStep::WaitVpcAvailable => "WaitVpcAvailable",
            ProvisionStep::EnableVpcDns => "EnableVpcDns",
            ProvisionStep::TagVpc => "TagVpc",
            ProvisionStep::CreateInternetGateway => "CreateInternetGateway",
            ProvisionStep::TagInternetGateway => "TagInternetGateway",
            ProvisionStep::AttachInternetGateway => "AttachInternetGateway",
            ProvisionStep::CreatePublicSubnet => "CreatePublicSubnet",
            ProvisionStep::WaitPublicSubnetAvailable => "WaitPublicSubnetAvailable",
            ProvisionStep::TagPublicSubnet => "TagPublicSubnet",
            ProvisionStep::EnablePublicIp => "EnablePublicIp",
            ProvisionStep::CreatePrivateSubnet => "CreatePrivateSubnet",
            ProvisionStep::WaitPrivateSubnetAvailable => "WaitPrivateSubnetAvailable",
            ProvisionStep::TagPrivateSubnet => "TagPrivateSubnet",
            ProvisionStep::CreatePublicRouteTable => "CreatePublicRouteTable",
            ProvisionStep::TagPublicRouteTable => "TagPublicRouteTable",
            ProvisionStep::AddDefaultRoute => "AddDefaultRoute",
            ProvisionStep::AssociatePublicRouteTable => "AssociatePublicRouteTable",
            ProvisionStep::CreatePrivateRouteTable => "CreatePrivateRouteTable",
            ProvisionStep::TagPrivateRouteTable => "TagPrivateRouteTable",
            ProvisionStep::AssociatePrivateRouteTable => "AssociatePrivateRouteTable",
            ProvisionStep::CreateDbSubnetGroup => "CreateDbSubnetGroup",
        };
        write!(f, "{name}")
    }
}
