//! Network planning error types

use thiserror::Error;

/// Errors detected while validating or partitioning an address block.
///
/// Every variant is a configuration problem: all of them are raised
/// before any provider call is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Subnet pair count {0} is out of range (expected 1..={max})", max = crate::MAX_SUBNET_PAIRS)]
    PairCountOutOfRange(u32),

    #[error("Address block {cidr} is too small for {pair_count} subnet pairs (would need a /{required_prefix})")]
    InsufficientAddressSpace {
        cidr: String,
        pair_count: u32,
        required_prefix: u8,
    },

    #[error("Subnet index {index} is out of range for {pair_count} pairs")]
    IndexOutOfRange { index: u32, pair_count: u32 },

    #[error("At least {min} distinct availability zones are required, found {found}", min = crate::MIN_ZONE_COUNT)]
    NotEnoughZones { found: usize },
}

pub type Result<T> = std::result::Result<T, NetError>;
