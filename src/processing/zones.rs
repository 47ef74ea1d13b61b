//! Availability zone assignment.
//!
//! Spreads each pool across the given zones in order, the way a VPC program
//! loops over the region's zones creating one subnet per zone.

use crate::models::SubnetPlan;

/// Tag the i-th subnet of each pool with `zones[i % zones.len()]`.
///
/// The blocks and their order are unchanged. An empty zone list leaves the
/// plan untagged.
pub fn assign_zones<S: AsRef<str>>(plan: &SubnetPlan, zones: &[S]) -> SubnetPlan {
    let mut plan = plan.clone();
    if zones.is_empty() {
        log::debug!("assign_zones: no zones given, leaving {} untagged", plan.parent);
        return plan;
    }

    for subnet in plan.subnets.iter_mut() {
        subnet.zone = Some(zones[subnet.index % zones.len()].as_ref().to_string());
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddressBlock, Role};
    use crate::processing::compute_subnets;

    #[test]
    fn test_assign_zones_round_robin() {
        let plan = compute_subnets(AddressBlock::new("10.0.0.0/16").unwrap(), 3, 2).unwrap();
        let zoned = assign_zones(&plan, &["us-west-2a", "us-west-2b"]);

        let public: Vec<Option<&str>> = zoned
            .pool(Role::Public)
            .map(|s| s.zone.as_deref())
            .collect();
        assert_eq!(
            public,
            vec![Some("us-west-2a"), Some("us-west-2b"), Some("us-west-2a")]
        );
        let private: Vec<Option<&str>> = zoned
            .pool(Role::Private)
            .map(|s| s.zone.as_deref())
            .collect();
        assert_eq!(private, vec![Some("us-west-2a"), Some("us-west-2b")]);

        assert_eq!(zoned.blocks(), plan.blocks());
        assert!(plan.subnets.iter().all(|s| s.zone.is_none()));
    }

    #[test]
    fn test_assign_zones_empty() {
        let plan = compute_subnets(AddressBlock::new("10.0.0.0/24").unwrap(), 1, 1).unwrap();
        let zones: Vec<String> = vec![];
        assert_eq!(assign_zones(&plan, &zones), plan);
    }
}
