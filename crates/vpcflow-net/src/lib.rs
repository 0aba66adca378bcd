//! Deterministic subnet planning for vpcflow
//!
//! This crate is pure computation: given a parent address block and a
//! pair count, it partitions the block into non-overlapping public and
//! private subnet CIDRs. No I/O, no provider types, no randomness: the
//! provisioning layer builds on top of it and the CLI reuses it to print
//! plans without touching the cloud.

pub mod allocator;
pub mod error;
pub mod model;

// Re-exports
pub use allocator::{allocate_subnet_cidr, subnet_prefix_len};
pub use error::{NetError, Result};
pub use model::{ProvisionRequest, SubnetPlan, SubnetRole};

/// Upper bound on public/private subnet pairs per request.
pub const MAX_SUBNET_PAIRS: u32 = 200;

/// Longest allowed subnet prefix; keeps at least 16 host addresses per subnet.
pub const MAX_SUBNET_PREFIX_LEN: u8 = 28;

/// Minimum number of distinct availability zones for a topology.
pub const MIN_ZONE_COUNT: usize = 2;
