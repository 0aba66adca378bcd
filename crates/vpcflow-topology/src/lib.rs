//! vpcflow topology provisioning
//!
//! Turns a validated [`ProvisionRequest`](vpcflow_net::ProvisionRequest)
//! into real infrastructure: one virtual network, one internet gateway,
//! and N public/private subnet pairs with route tables, created in
//! dependency order against an injected
//! [`ResourceClient`](vpcflow_cloud::ResourceClient). The pipeline only
//! moves forward; a failure returns the partial topology for manual
//! cleanup rather than attempting rollback.

pub mod error;
pub mod provisioner;
pub mod report;
pub mod step;

// Re-exports
pub use error::{ProvisionError, Result};
pub use provisioner::TopologyProvisioner;
pub use report::{SubnetPairRecord, VpcTopology};
pub use step::ProvisionStep;
