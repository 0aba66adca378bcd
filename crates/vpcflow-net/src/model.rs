//! Subnet planning model

use crate::error::{NetError, Result};
use crate::{MAX_SUBNET_PAIRS, allocator};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Role of a subnet within its pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetRole {
    /// Routed to the internet gateway
    Public,
    /// Local routes only
    Private,
}

impl std::fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubnetRole::Public => write!(f, "public"),
            SubnetRole::Private => write!(f, "private"),
        }
    }
}

/// Planned placement of a single subnet
///
/// Produced purely from the parent block and pair count; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetPlan {
    /// Zero-based pair index
    pub index: u32,

    /// Public or private half of the pair
    pub role: SubnetRole,

    /// Availability zone the subnet is bound to
    pub zone: String,

    /// Address block carved out of the parent
    pub cidr: Ipv4Net,
}

impl SubnetPlan {
    /// Compute the plan for one subnet of one pair.
    pub fn compute(
        parent: Ipv4Net,
        pair_count: u32,
        index: u32,
        role: SubnetRole,
        zone: impl Into<String>,
    ) -> Result<Self> {
        let cidr = allocator::allocate_subnet_cidr(parent, pair_count, index, role)?;
        Ok(Self {
            index,
            role,
            zone: zone.into(),
            cidr,
        })
    }
}

/// Input configuration for one provisioning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionRequest {
    /// Name tag for the VPC; resource names derive from it
    pub vpc_name: String,

    /// Parent address block the subnet pairs are carved from
    pub vpc_cidr: Ipv4Net,

    /// Number of public/private subnet pairs to create
    pub pair_count: u32,
}

impl ProvisionRequest {
    pub fn new(vpc_name: impl Into<String>, vpc_cidr: Ipv4Net, pair_count: u32) -> Self {
        Self {
            vpc_name: vpc_name.into(),
            vpc_cidr,
            pair_count,
        }
    }

    /// Validate the request once, before any resource is created.
    ///
    /// Checks the pair count range and that the parent block has room for
    /// `2 * pair_count` equally sized subnets of at least 16 addresses.
    pub fn validate(&self) -> Result<()> {
        if self.pair_count < 1 || self.pair_count > MAX_SUBNET_PAIRS {
            return Err(NetError::PairCountOutOfRange(self.pair_count));
        }
        allocator::subnet_prefix_len(self.vpc_cidr, self.pair_count)?;
        Ok(())
    }
}
