//! Resource client trait definition

use crate::error::Result;
use async_trait::async_trait;
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Kind of control-plane resource, used for waiter dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Vpc,
    Subnet,
    InternetGateway,
    RouteTable,
    DbSubnetGroup,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Vpc => write!(f, "vpc"),
            ResourceKind::Subnet => write!(f, "subnet"),
            ResourceKind::InternetGateway => write!(f, "internet-gateway"),
            ResourceKind::RouteTable => write!(f, "route-table"),
            ResourceKind::DbSubnetGroup => write!(f, "db-subnet-group"),
        }
    }
}

/// Lifecycle state reported by the provider's describe operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Pending,
    Available,
    Deleting,
    /// State string the client does not recognize
    Unknown,
}

impl LifecycleState {
    /// Map a provider state string onto the known set.
    pub fn parse(state: &str) -> Self {
        match state {
            "pending" => LifecycleState::Pending,
            "available" => LifecycleState::Available,
            "deleting" => LifecycleState::Deleting,
            _ => LifecycleState::Unknown,
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Pending => write!(f, "pending"),
            LifecycleState::Available => write!(f, "available"),
            LifecycleState::Deleting => write!(f, "deleting"),
            LifecycleState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Cloud resource client abstraction
///
/// Every mutating operation returns the provider's opaque resource
/// identifier; callers thread identifiers through dependent calls without
/// interpreting them. Implementations are injected into the provisioning
/// layer, never reached through ambient global state.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Create a virtual network spanning `cidr`.
    async fn create_vpc(&self, cidr: Ipv4Net) -> Result<String>;

    /// Report the lifecycle state of a virtual network.
    async fn describe_vpc(&self, vpc_id: &str) -> Result<LifecycleState>;

    /// Enable DNS resolution and DNS hostnames on the virtual network.
    async fn enable_vpc_dns(&self, vpc_id: &str) -> Result<()>;

    /// Create an internet gateway, initially detached.
    async fn create_internet_gateway(&self) -> Result<String>;

    /// Attach an internet gateway to a virtual network.
    async fn attach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()>;

    /// Create a subnet bound to one availability zone.
    async fn create_subnet(&self, vpc_id: &str, cidr: Ipv4Net, zone: &str) -> Result<String>;

    /// Report the lifecycle state of a subnet.
    async fn describe_subnet(&self, subnet_id: &str) -> Result<LifecycleState>;

    /// Auto-assign public addresses to instances launched in the subnet.
    async fn enable_public_ip_on_launch(&self, subnet_id: &str) -> Result<()>;

    /// Create an empty route table in the virtual network.
    async fn create_route_table(&self, vpc_id: &str) -> Result<String>;

    /// Add a route forwarding `destination` through a gateway.
    async fn create_route(
        &self,
        route_table_id: &str,
        destination: Ipv4Net,
        gateway_id: &str,
    ) -> Result<()>;

    /// Associate a route table with a subnet.
    async fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> Result<()>;

    /// Set the Name tag on any resource.
    async fn tag_resource(&self, resource_id: &str, name: &str) -> Result<()>;

    /// List availability zones currently accepting new subnets.
    async fn available_zones(&self) -> Result<Vec<String>>;

    /// Group subnets for managed database placement.
    async fn create_db_subnet_group(&self, name: &str, subnet_ids: &[String]) -> Result<String>;
}
