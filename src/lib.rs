//! Subnet planner library.
//!
//! Splits a VPC/VNet/VCN address block into equally sized public and private
//! subnets, ready to hand to a network provisioning call.
//!
//! # Modules
//! - [`models`] - Address blocks, plans and reservation policies
//! - [`processing`] - Partitioning, zone assignment, gap finding and overlap checks
//! - [`input`] - JSON request files
//! - [`output`] - CSV and JSON output
//! - [`config`] - Constants and environment settings
//! - [`cli`] - Command line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use std::error::Error;

pub use error::{PartitionError, PartitionResult};
pub use models::{
    AddressBlock, CloudProvider, PlannedSubnet, ReservationPolicy, Role, SubnetCount, SubnetPlan,
};
pub use processing::{compute_subnets, compute_subnets_with_policy, NamedPlan};

use input::PlanRequests;

/// Plan from untrusted arguments: a CIDR string and signed subnet counts.
///
/// # Examples
/// ```
/// let plan = subnet_planner::plan_from_args("172.16.0.0/24", 2, 2).unwrap();
/// assert_eq!(plan.public_cidrs(), vec!["172.16.0.0/26", "172.16.0.64/26"]);
/// assert!(subnet_planner::plan_from_args("172.16.0.0/24", -1, 2).is_err());
/// ```
pub fn plan_from_args(cidr: &str, public: i64, private: i64) -> PartitionResult<SubnetPlan> {
    let parent = AddressBlock::new(cidr)?;
    let public = SubnetCount::try_from(public)?;
    let private = SubnetCount::try_from(private)?;
    compute_subnets(parent, public.get(), private.get())
}

/// Compute every request, using `default_provider` where a request names none.
///
/// Fails on the first request that cannot be planned, naming it in the error.
pub fn plan_requests(
    requests: &PlanRequests,
    default_provider: CloudProvider,
) -> Result<Vec<NamedPlan>, Box<dyn Error>> {
    let mut plans = Vec::with_capacity(requests.requests.len());
    for request in &requests.requests {
        let plan = request
            .plan(default_provider)
            .map_err(|e| format!("Request '{}' ({}): {e}", request.name, request.cidr))?;
        log::debug!("Planned '{}': {} subnets", request.name, plan.subnets.len());
        plans.push(NamedPlan {
            name: request.name.clone(),
            provider: request.provider.unwrap_or(default_provider),
            plan,
        });
    }
    Ok(plans)
}

/// Return an error if any plan is unsound (block outside its parent or overlapping).
pub fn check_plans(plans: &[NamedPlan]) -> Result<(), Box<dyn Error>> {
    for named in plans {
        let problems = processing::verify_plan(&named.plan);
        if !problems.is_empty() {
            return Err(format!("Plan '{}' is unsound: {}", named.name, problems.join("; ")).into());
        }
    }
    Ok(())
}
