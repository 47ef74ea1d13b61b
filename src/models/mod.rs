//! Domain models for subnet planning.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`AddressBlock`] - IPv4/IPv6 block with CIDR arithmetic
//! - [`SubnetPlan`], [`PlannedSubnet`] and [`Role`] - partitioning results
//! - [`ReservationPolicy`] and [`CloudProvider`] - minimum usable subnet rules

mod block;
mod plan;
mod policy;

// Re-export public types
pub use block::{
    block_size, broadcast_addr, cut_addr, get_cidr_mask, ip_after_subnet, lo_mask, max_length,
    AddressBlock, MAX_LENGTH_V4, MAX_LENGTH_V6,
};
pub(crate) use block::{addr_bits, addr_from_bits};
pub use plan::{PlannedSubnet, Role, SubnetCount, SubnetPlan};
pub use policy::{CloudProvider, ReservationPolicy};
