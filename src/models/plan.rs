//! Subnet plan data model.

use super::AddressBlock;
use crate::error::{PartitionError, PartitionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pool a subnet belongs to.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Public,
    Private,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Public => f.write_str("public"),
            Role::Private => f.write_str("private"),
        }
    }
}

/// Number of subnets requested for one role.
///
/// Built from untrusted signed input through [`TryFrom<i64>`], which rejects
/// negative values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SubnetCount(usize);

impl SubnetCount {
    pub fn new(count: usize) -> Self {
        SubnetCount(count)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for SubnetCount {
    type Error = PartitionError;

    fn try_from(value: i64) -> PartitionResult<Self> {
        usize::try_from(value).map(SubnetCount).map_err(|_| {
            PartitionError::InvalidArgument(format!("Subnet count must not be negative: {value}"))
        })
    }
}

/// One child block of a plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlannedSubnet {
    /// The child CIDR block.
    pub cidr: AddressBlock,
    /// Pool the block is assigned to.
    pub role: Role,
    /// Position within its pool, starting at 0.
    pub index: usize,
    /// Availability zone, if zones were assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// The result of partitioning a parent block.
///
/// Subnets are ordered public pool first, then private pool, each in ascending
/// address order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubnetPlan {
    /// The block that was partitioned.
    pub parent: AddressBlock,
    /// Prefix length shared by every child block.
    pub child_mask: u8,
    /// Planned subnets of both pools.
    pub subnets: Vec<PlannedSubnet>,
    /// Child-sized slots in the parent left unassigned.
    #[serde(default)]
    pub spare: Vec<AddressBlock>,
}

impl SubnetPlan {
    /// Subnets of one pool, in address order.
    pub fn pool(&self, role: Role) -> impl Iterator<Item = &PlannedSubnet> + '_ {
        self.subnets.iter().filter(move |s| s.role == role)
    }

    pub fn public(&self) -> Vec<AddressBlock> {
        self.pool(Role::Public).map(|s| s.cidr).collect()
    }

    pub fn private(&self) -> Vec<AddressBlock> {
        self.pool(Role::Private).map(|s| s.cidr).collect()
    }

    /// Public pool as CIDR strings, ready for a provisioning call.
    pub fn public_cidrs(&self) -> Vec<String> {
        self.public().iter().map(|b| b.to_string()).collect()
    }

    /// Private pool as CIDR strings, ready for a provisioning call.
    pub fn private_cidrs(&self) -> Vec<String> {
        self.private().iter().map(|b| b.to_string()).collect()
    }

    /// Every child block of the plan, both pools.
    pub fn blocks(&self) -> Vec<AddressBlock> {
        self.subnets.iter().map(|s| s.cidr).collect()
    }
}

impl fmt::Display for SubnetPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SubnetPlan {} -> /{} ({} subnets, {} spare):",
            self.parent,
            self.child_mask,
            self.subnets.len(),
            self.spare.len()
        )?;
        for s in &self.subnets {
            match &s.zone {
                Some(zone) => writeln!(f, "  - {} {}[{}] {}", s.cidr, s.role, s.index, zone)?,
                None => writeln!(f, "  - {} {}[{}]", s.cidr, s.role, s.index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_count_rejects_negative() {
        assert_eq!(SubnetCount::try_from(3).unwrap().get(), 3);
        assert_eq!(SubnetCount::try_from(0).unwrap(), SubnetCount::default());
        assert!(SubnetCount::try_from(-1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_plan_pools() {
        let plan = SubnetPlan {
            parent: AddressBlock::new("10.0.0.0/24").unwrap(),
            child_mask: 25,
            subnets: vec![
                PlannedSubnet {
                    cidr: AddressBlock::new("10.0.0.0/25").unwrap(),
                    role: Role::Public,
                    index: 0,
                    zone: None,
                },
                PlannedSubnet {
                    cidr: AddressBlock::new("10.0.0.128/25").unwrap(),
                    role: Role::Private,
                    index: 0,
                    zone: Some("eu-west-1a".to_string()),
                },
            ],
            spare: vec![],
        };

        assert_eq!(plan.public_cidrs(), vec!["10.0.0.0/25"]);
        assert_eq!(plan.private_cidrs(), vec!["10.0.0.128/25"]);
        assert_eq!(plan.blocks().len(), 2);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["subnets"][0]["role"], "public");
        assert!(json["subnets"][0].get("zone").is_none());
        assert_eq!(json["subnets"][1]["zone"], "eu-west-1a");
    }
}
