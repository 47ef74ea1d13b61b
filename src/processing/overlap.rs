//! Overlap detection for plans and their parents.
//!
//! Checks a single plan for internal soundness and finds requests whose parent
//! blocks collide with each other.

use crate::models::{AddressBlock, CloudProvider, SubnetPlan};
use itertools::Itertools;

/// A plan computed for a named request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPlan {
    pub name: String,
    /// Provider whose reservation rules the plan was computed with.
    pub provider: CloudProvider,
    pub plan: SubnetPlan,
}

/// Represents two requests whose parent blocks overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: String,
    pub first_cidr: AddressBlock,
    pub second: String,
    pub second_cidr: AddressBlock,
}

/// Every pair of blocks in `blocks` that overlap.
pub fn find_overlaps(blocks: &[AddressBlock]) -> Vec<(AddressBlock, AddressBlock)> {
    blocks
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.overlaps(b))
        .map(|(a, b)| (*a, *b))
        .collect()
}

/// Check that every planned block sits inside the parent and none overlap.
///
/// # Returns
/// A list of problems, empty when the plan is sound.
pub fn verify_plan(plan: &SubnetPlan) -> Vec<String> {
    let mut problems = Vec::new();
    let blocks: Vec<AddressBlock> = plan
        .blocks()
        .into_iter()
        .chain(plan.spare.iter().copied())
        .collect();

    for block in &blocks {
        if !plan.parent.contains(block) {
            problems.push(format!("{block} is outside parent {}", plan.parent));
        }
    }
    for (a, b) in find_overlaps(&blocks) {
        problems.push(format!("{a} overlaps {b}"));
    }
    problems
}

/// Find requests whose parent blocks overlap.
pub fn find_overlapping_plans(plans: &[NamedPlan]) -> Vec<OverlapConflict> {
    let mut conflicts: Vec<OverlapConflict> = plans
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.plan.parent.overlaps(&b.plan.parent))
        .map(|(a, b)| OverlapConflict {
            first: a.name.clone(),
            first_cidr: a.plan.parent,
            second: b.name.clone(),
            second_cidr: b.plan.parent,
        })
        .collect();

    // Sort by CIDR for consistent output
    conflicts.sort_by_key(|c| (c.first_cidr, c.second_cidr));
    conflicts
}

/// Log overlapping request parents as warnings.
pub fn log_overlapping_plans(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::info!("No overlapping parent CIDRs found.");
        return;
    }

    log::warn!(
        "Found {} overlapping parent CIDR(s) across requests:",
        conflicts.len()
    );
    for conflict in conflicts {
        log::warn!(
            "  - '{}' {} overlaps '{}' {}",
            conflict.first,
            conflict.first_cidr,
            conflict.second,
            conflict.second_cidr
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::compute_subnets;

    fn named(name: &str, cidr: &str) -> NamedPlan {
        NamedPlan {
            name: name.to_string(),
            provider: CloudProvider::default(),
            plan: compute_subnets(AddressBlock::new(cidr).unwrap(), 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_find_overlaps() {
        let blocks = vec![
            AddressBlock::new("10.0.0.0/24").unwrap(),
            AddressBlock::new("10.0.0.128/25").unwrap(),
            AddressBlock::new("10.0.1.0/24").unwrap(),
        ];
        let overlaps = find_overlaps(&blocks);
        assert_eq!(overlaps, vec![(blocks[0], blocks[1])]);
    }

    #[test]
    fn test_verify_plan_sound() {
        let plan = compute_subnets(AddressBlock::new("10.0.0.0/16").unwrap(), 3, 2).unwrap();
        assert!(verify_plan(&plan).is_empty());
    }

    #[test]
    fn test_verify_plan_detects_problems() {
        let mut plan = compute_subnets(AddressBlock::new("10.0.0.0/24").unwrap(), 1, 1).unwrap();
        plan.subnets[1].cidr = AddressBlock::new("10.0.1.0/25").unwrap();
        plan.spare.push(AddressBlock::new("10.0.0.64/26").unwrap());

        let problems = verify_plan(&plan);
        assert_eq!(problems.len(), 2, "{problems:?}");
        assert!(problems[0].contains("outside parent"));
        assert!(problems[1].contains("overlaps"));
    }

    #[test]
    fn test_find_overlapping_plans() {
        let plans = vec![
            named("eks", "172.16.0.0/16"),
            named("redshift", "172.16.0.0/24"),
            named("lambda", "10.0.0.0/24"),
        ];
        let conflicts = find_overlapping_plans(&plans);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first, "eks");
        assert_eq!(conflicts[0].second, "redshift");
        log_overlapping_plans(&conflicts);
    }
}
