//! Provisioning error types

use crate::report::VpcTopology;
use crate::step::ProvisionStep;
use thiserror::Error;
use vpcflow_cloud::CloudError;
use vpcflow_net::NetError;

/// Errors terminating a provisioning run.
///
/// `Config` is raised before any mutating provider call; `Step` carries
/// the failing step, the pair index where applicable, and the topology
/// built so far. Nothing is rolled back; the partial topology is the
/// operator's cleanup list.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Configuration rejected: {0}")]
    Config(#[from] NetError),

    #[error("Step {step}{pair} failed: {source}", pair = .pair_index.map(|i| format!(" (pair {i})")).unwrap_or_default())]
    Step {
        step: ProvisionStep,
        pair_index: Option<u32>,
        source: CloudError,
        topology: Box<VpcTopology>,
    },
}

impl ProvisionError {
    pub(crate) fn step(
        step: ProvisionStep,
        pair_index: Option<u32>,
        source: CloudError,
        topology: &VpcTopology,
    ) -> Self {
        ProvisionError::Step {
            step,
            pair_index,
            source,
            topology: Box::new(topology.clone()),
        }
    }

    /// Topology accumulated before the failure, if the run got that far.
    pub fn partial_topology(&self) -> Option<&VpcTopology> {
        match self {
            ProvisionError::Config(_) => None,
            ProvisionError::Step { topology, .. } => Some(topology),
        }
    }

    /// True when the underlying failure was a waiter timeout rather than
    /// a rejected provider call.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ProvisionError::Step { source, .. } if source.is_timeout()
        )
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
