//! Splitting a parent block into public and private subnets.
//!
//! The parent is cut into `2^b` equal slots, where `b` is the smallest number
//! of extra prefix bits giving at least `public + private` slots. Slots are
//! handed out in ascending address order, public pool first, so the same
//! inputs always give the same plan.

use crate::error::{PartitionError, PartitionResult};
use crate::models::{
    addr_bits, addr_from_bits, AddressBlock, PlannedSubnet, ReservationPolicy, Role, SubnetPlan,
};

/// Partition `parent` using the default (Azure) reservation policy.
///
/// # Examples
/// ```
/// use subnet_planner::{compute_subnets, AddressBlock};
/// let parent = AddressBlock::new("172.16.0.0/24").unwrap();
/// let plan = compute_subnets(parent, 1, 1).unwrap();
/// assert_eq!(plan.public_cidrs(), vec!["172.16.0.0/25"]);
/// assert_eq!(plan.private_cidrs(), vec!["172.16.0.128/25"]);
/// ```
pub fn compute_subnets(
    parent: AddressBlock,
    public_count: usize,
    private_count: usize,
) -> PartitionResult<SubnetPlan> {
    compute_subnets_with_policy(
        parent,
        public_count,
        private_count,
        &ReservationPolicy::default(),
    )
}

/// Partition `parent` into `public_count + private_count` equal subnets.
///
/// # Errors
/// * [`PartitionError::InvalidArgument`] - both counts zero, or `parent` has host bits set
/// * [`PartitionError::Capacity`] - the child prefix would exceed the family width,
///   or the child blocks are too small for `policy`
pub fn compute_subnets_with_policy(
    parent: AddressBlock,
    public_count: usize,
    private_count: usize,
    policy: &ReservationPolicy,
) -> PartitionResult<SubnetPlan> {
    if !parent.is_network() {
        return Err(PartitionError::InvalidArgument(format!(
            "{parent} is not a network address (did you mean {}?)",
            parent.network()
        )));
    }
    if public_count == 0 && private_count == 0 {
        return Err(PartitionError::InvalidArgument(
            "At least one public or private subnet must be requested".to_string(),
        ));
    }

    let total = public_count
        .checked_add(private_count)
        .ok_or_else(|| PartitionError::Capacity(format!("Too many subnets requested for {parent}")))?;
    let slots = total
        .checked_next_power_of_two()
        .ok_or_else(|| PartitionError::Capacity(format!("Too many subnets requested for {parent}")))?;
    let extra_bits = slots.trailing_zeros();

    let child_mask = u32::from(parent.mask()) + extra_bits;
    if child_mask > u32::from(parent.max_len()) {
        return Err(PartitionError::Capacity(format!(
            "{parent} cannot hold {total} subnets: /{child_mask} is longer than /{}",
            parent.max_len()
        )));
    }
    let child_mask = child_mask as u8;

    let first = AddressBlock::from_parts(parent.addr(), child_mask)?;
    if !policy.is_usable(&first) {
        return Err(PartitionError::Capacity(format!(
            "{parent} cannot hold {total} subnets: /{child_mask} has {} addresses, \
             policy needs at least {} with {} reserved",
            first.size(),
            policy.min_block_addresses,
            policy.reserved_addresses
        )));
    }

    log::debug!(
        "compute_subnets({parent}, public={public_count}, private={private_count}) => {slots} slots of /{child_mask}"
    );

    let host_bits = u32::from(parent.max_len() - child_mask);
    let base = addr_bits(parent.addr());
    let child_at = |slot: usize| -> PartitionResult<AddressBlock> {
        // Slot 0 of a /0 parent would shift by the full width.
        let offset = (slot as u128).checked_shl(host_bits).unwrap_or(0);
        AddressBlock::from_parts(addr_from_bits(base + offset, parent.is_ipv4()), child_mask)
    };

    let too_many = |_| PartitionError::Capacity(format!("Too many subnets requested for {parent}"));
    let mut subnets = Vec::new();
    subnets.try_reserve_exact(total).map_err(too_many)?;
    let mut spare = Vec::new();
    spare.try_reserve_exact(slots - total).map_err(too_many)?;
    for slot in 0..total {
        let (role, index) = if slot < public_count {
            (Role::Public, slot)
        } else {
            (Role::Private, slot - public_count)
        };
        subnets.push(PlannedSubnet {
            cidr: child_at(slot)?,
            role,
            index,
            zone: None,
        });
    }

    for slot in total..slots {
        spare.push(child_at(slot)?);
    }

    Ok(SubnetPlan {
        parent,
        child_mask,
        subnets,
        spare,
    })
}
