//! Topology report types
//!
//! The report is built incrementally while a run progresses: identifiers
//! are appended as the provider hands them out and never rewritten. On
//! success the caller receives the completed report; on failure the same
//! report travels inside the error so every created identifier is still
//! visible for manual cleanup.

use chrono::{DateTime, Utc};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use vpcflow_net::{ProvisionRequest, SubnetPlan};

/// Identifiers and plans for one public/private subnet pair.
///
/// Identifier fields are filled in creation order; a pair interrupted by
/// a failure keeps whatever was already created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetPairRecord {
    /// Placement of the public subnet
    pub public_plan: SubnetPlan,

    /// Placement of the private subnet
    pub private_plan: SubnetPlan,

    pub public_subnet_id: Option<String>,
    pub private_subnet_id: Option<String>,
    pub public_route_table_id: Option<String>,
    pub private_route_table_id: Option<String>,
}

impl SubnetPairRecord {
    pub fn new(public_plan: SubnetPlan, private_plan: SubnetPlan) -> Self {
        Self {
            public_plan,
            private_plan,
            public_subnet_id: None,
            private_subnet_id: None,
            public_route_table_id: None,
            private_route_table_id: None,
        }
    }

    /// Zero-based pair index.
    pub fn index(&self) -> u32 {
        self.public_plan.index
    }

    /// Availability zone both subnets of the pair are bound to.
    pub fn zone(&self) -> &str {
        &self.public_plan.zone
    }

    /// True once every resource of the pair exists.
    pub fn is_complete(&self) -> bool {
        self.public_subnet_id.is_some()
            && self.private_subnet_id.is_some()
            && self.public_route_table_id.is_some()
            && self.private_route_table_id.is_some()
    }
}

/// Aggregate result of one provisioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcTopology {
    /// Name tag of the VPC, base for all derived resource names
    pub vpc_name: String,

    /// Parent address block
    pub vpc_cidr: Ipv4Net,

    pub vpc_id: Option<String>,
    pub internet_gateway_id: Option<String>,

    /// Subnet pairs in index order
    pub pairs: Vec<SubnetPairRecord>,

    /// True only when the full pipeline ran to the end
    pub completed: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl VpcTopology {
    pub fn new(request: &ProvisionRequest) -> Self {
        Self {
            vpc_name: request.vpc_name.clone(),
            vpc_cidr: request.vpc_cidr,
            vpc_id: None,
            internet_gateway_id: None,
            pairs: Vec::with_capacity(request.pair_count as usize),
            completed: false,
            started_at: Utc::now(),
        }
    }

    /// Every identifier created so far, in creation order.
    ///
    /// This is the cleanup list an operator works through after a failed
    /// run (associations and routes die with their route tables).
    pub fn created_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        if let Some(id) = &self.vpc_id {
            ids.push(id.as_str());
        }
        if let Some(id) = &self.internet_gateway_id {
            ids.push(id.as_str());
        }
        for pair in &self.pairs {
            for id in [
                &pair.public_subnet_id,
                &pair.private_subnet_id,
                &pair.public_route_table_id,
                &pair.private_route_table_id,
            ]
            .into_iter()
            .flatten()
            {
                ids.push(id.as_str());
            }
        }
        ids
    }

    /// Private subnet ids of completed pairs, for database subnet groups.
    pub fn private_subnet_ids(&self) -> Vec<String> {
        self.pairs
            .iter()
            .filter_map(|p| p.private_subnet_id.clone())
            .collect()
    }
}
