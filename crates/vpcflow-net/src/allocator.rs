//! Deterministic CIDR partitioning
//!
//! Splits a parent address block in half, carves public subnets from the
//! first half and private subnets from the second, all equally sized.
//! Pure arithmetic on the u32 representation of the network address; the
//! same inputs always yield the same block.

use crate::error::{NetError, Result};
use crate::model::SubnetRole;
use crate::{MAX_SUBNET_PAIRS, MAX_SUBNET_PREFIX_LEN};
use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// Extra prefix bits needed to fit `pair_count` blocks in one half.
fn subnet_bits(pair_count: u32) -> u8 {
    // ceil(log2(n)): 1 -> 0, 2 -> 1, 3 -> 2, 200 -> 8
    pair_count.next_power_of_two().trailing_zeros() as u8
}

/// Prefix length of every subnet carved from `parent` for `pair_count` pairs.
///
/// The `+ 1` accounts for the public/private halving of the parent block.
/// Fails if the result would leave fewer than 16 host addresses per subnet.
pub fn subnet_prefix_len(parent: Ipv4Net, pair_count: u32) -> Result<u8> {
    if pair_count < 1 || pair_count > MAX_SUBNET_PAIRS {
        return Err(NetError::PairCountOutOfRange(pair_count));
    }

    let prefix = parent.prefix_len() + subnet_bits(pair_count) + 1;
    if prefix > MAX_SUBNET_PREFIX_LEN {
        return Err(NetError::InsufficientAddressSpace {
            cidr: parent.to_string(),
            pair_count,
            required_prefix: prefix,
        });
    }

    Ok(prefix)
}

/// Compute the address block for one subnet.
///
/// The block for `(role, index)` is the `index`-th block of the computed
/// size within the role's half of the parent. All `2 * pair_count` blocks
/// are mutually disjoint and contained in the parent.
pub fn allocate_subnet_cidr(
    parent: Ipv4Net,
    pair_count: u32,
    index: u32,
    role: SubnetRole,
) -> Result<Ipv4Net> {
    let prefix = subnet_prefix_len(parent, pair_count)?;

    if index >= pair_count {
        return Err(NetError::IndexOutOfRange { index, pair_count });
    }

    // prefix <= 28 here, so parent.prefix_len() <= 26 and the shifts are in range
    let half_size = 1u32 << (32 - parent.prefix_len() - 1);
    let block_size = 1u32 << (32 - prefix);

    let base = match role {
        SubnetRole::Public => u32::from(parent.network()),
        SubnetRole::Private => u32::from(parent.network()) + half_size,
    };
    let address = base + index * block_size;

    Ipv4Net::new(Ipv4Addr::from(address), prefix)
        .map_err(|e| NetError::InvalidCidr(e.to_string()))
}
