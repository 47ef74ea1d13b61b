//! Subnet planning logic.
//!
//! This module contains the business logic for planning subnets:
//! - [`partition`] - Splitting a parent block into public/private pools
//! - [`zones`] - Spreading pools across availability zones
//! - [`gap_finder`] - Finding free space left in the parent
//! - [`overlap`] - Verifying plans and detecting overlapping parents

mod gap_finder;
mod overlap;
mod partition;
mod zones;

// Re-export public functions
pub use gap_finder::free_blocks;
pub use overlap::{
    find_overlapping_plans, find_overlaps, log_overlapping_plans, verify_plan, NamedPlan,
    OverlapConflict,
};
pub use partition::{compute_subnets, compute_subnets_with_policy};
pub use zones::assign_zones;
