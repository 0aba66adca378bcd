//! State waiter
//!
//! Blocks until a resource reaches a target lifecycle state by polling
//! the client's describe operation at a fixed cadence. This is the only
//! place the system waits on external latency; every other call is
//! fire-and-check.

use crate::client::{LifecycleState, ResourceClient, ResourceKind};
use crate::error::{CloudError, Result};
use std::time::Duration;
use tokio::time::sleep;

/// Polling cadence for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Number of describe calls before giving up
    pub max_attempts: u32,

    /// Delay between consecutive polls
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            poll_interval_ms: 3000,
        }
    }
}

impl WaitConfig {
    pub fn new(max_attempts: u32, poll_interval_ms: u64) -> Self {
        Self {
            max_attempts,
            poll_interval_ms,
        }
    }
}

/// Per-kind polling cadences for a provisioning run.
///
/// Virtual networks usually settle faster than subnets under load, so the
/// two are tunable independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaitSettings {
    pub vpc: WaitConfig,
    pub subnet: WaitConfig,
}

impl WaitSettings {
    /// Apply one cadence to every resource kind.
    pub fn uniform(config: WaitConfig) -> Self {
        Self {
            vpc: config,
            subnet: config,
        }
    }

    pub fn for_kind(&self, kind: ResourceKind) -> &WaitConfig {
        match kind {
            ResourceKind::Vpc => &self.vpc,
            _ => &self.subnet,
        }
    }
}

/// Poll until the resource reaches `target`.
///
/// Makes exactly `config.max_attempts` describe calls in the worst case,
/// sleeping between attempts but not after the last. A describe error or
/// an unexpected state keeps polling: the creation request was already
/// accepted, the resource may simply not be visible yet. After the final
/// attempt the waiter fails with [`CloudError::Timeout`] carrying the
/// last observed state, so the caller can re-poll manually.
pub async fn wait_for_state(
    client: &dyn ResourceClient,
    kind: ResourceKind,
    resource_id: &str,
    target: LifecycleState,
    config: &WaitConfig,
) -> Result<()> {
    let mut last_state = LifecycleState::Unknown;

    for attempt in 0..config.max_attempts {
        let observed = match kind {
            ResourceKind::Vpc => client.describe_vpc(resource_id).await,
            ResourceKind::Subnet => client.describe_subnet(resource_id).await,
            other => {
                return Err(CloudError::Api {
                    code: None,
                    message: format!("no describe operation for resource kind {other}"),
                });
            }
        };

        match observed {
            Ok(state) if state == target => {
                tracing::debug!("{kind} {resource_id} reached {target}");
                return Ok(());
            }
            Ok(state) => {
                last_state = state;
            }
            Err(e) => {
                // Not yet visible to describe, or a transient API hiccup
                tracing::debug!("describe {kind} {resource_id} failed while waiting: {e}");
            }
        }

        if attempt + 1 < config.max_attempts {
            sleep(Duration::from_millis(config.poll_interval_ms)).await;
        }
    }

    Err(CloudError::Timeout {
        kind,
        resource_id: resource_id.to_string(),
        target,
        last_state,
        attempts: config.max_attempts,
    })
}
