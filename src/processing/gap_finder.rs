//! Free space left in a parent block after planning.
//!
//! Identifies the unused range between the last planned subnet and the end of
//! the parent, expressed as the fewest aligned CIDR blocks.

use crate::error::{PartitionError, PartitionResult};
use crate::models::{addr_bits, addr_from_bits, lo_mask, AddressBlock, SubnetPlan};
use std::net::IpAddr;

/// Coalesce the space after the last planned subnet into the largest aligned blocks.
///
/// Returns an empty list when the plan fills its parent.
pub fn free_blocks(plan: &SubnetPlan) -> PartitionResult<Vec<AddressBlock>> {
    let parent = plan.parent.network();
    let end = addr_bits(parent.hi());

    let mut next_ip = match plan.subnets.iter().map(|s| s.cidr).max() {
        Some(last) => match last.next() {
            Ok(after) => addr_bits(after.lo()),
            // Last subnet ends at the top of the address space.
            Err(PartitionError::Capacity(_)) => return Ok(vec![]),
            Err(e) => return Err(e),
        },
        None => addr_bits(parent.lo()),
    };

    let mut free = Vec::new();
    while next_ip <= end {
        let start = addr_from_bits(next_ip, parent.is_ipv4());
        let mask = find_biggest_subnet(start, parent.mask(), end)?;
        let gap = AddressBlock::from_parts(start, mask)?;
        free.push(gap);

        let gap_end = addr_bits(gap.hi());
        if gap_end >= end {
            break;
        }
        next_ip = gap_end + 1;
    }

    log::debug!(
        "free_blocks({}) => {} block(s) after {} planned subnets",
        plan.parent,
        free.len(),
        plan.subnets.len()
    );
    Ok(free)
}

/// Find the biggest block starting at `start_ip` that ends at or before `end`.
///
/// The returned mask is constrained by:
/// 1. The `start_mask` parameter (won't return a bigger block)
/// 2. The IP alignment - `start_ip` must be a valid network address for the mask
/// 3. The block must not run past `end`
fn find_biggest_subnet(start_ip: IpAddr, start_mask: u8, end: u128) -> PartitionResult<u8> {
    let max_len = crate::models::max_length(start_ip);
    let mut next_mask = start_mask.max(lo_mask(start_ip));

    while next_mask < max_len && addr_bits(AddressBlock::from_parts(start_ip, next_mask)?.hi()) > end
    {
        next_mask += 1;
    }
    Ok(next_mask)
}
