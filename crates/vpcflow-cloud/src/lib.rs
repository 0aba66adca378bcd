//! vpcflow cloud client abstraction
//!
//! Defines the resource client trait the provisioning layer is written
//! against, the structured error taxonomy, and the state waiter that
//! polls asynchronous provider-side transitions. Concrete clients (the
//! AWS CLI wrapper, test mocks) live in their own crates and are injected
//! where needed.

pub mod client;
pub mod error;
pub mod waiter;

// Re-exports
pub use client::{LifecycleState, ResourceClient, ResourceKind};
pub use error::{CloudError, Result};
pub use waiter::{WaitConfig, WaitSettings, wait_for_state};
