//! Per-cloud address reservation rules.
//!
//! Every cloud keeps a few addresses of each subnet for itself (network,
//! gateway, DNS, broadcast) and refuses subnets below a minimum size. The
//! partitioner uses a [`ReservationPolicy`] to reject child blocks that would
//! be too small to hold any hosts.

use super::AddressBlock;
use crate::error::PartitionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cloud provider whose subnet rules apply.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    /// AWS: 5 reserved per subnet, smallest subnet /28.
    Aws,
    /// Azure: 5 reserved per subnet, smallest subnet /29.
    #[default]
    Azure,
    /// GCP: 4 reserved per subnet, smallest subnet /29.
    Gcp,
    /// Oracle Cloud: 3 reserved per subnet, smallest subnet /30.
    Oci,
    /// Plain address arithmetic, nothing reserved.
    None,
}

impl CloudProvider {
    pub fn policy(&self) -> ReservationPolicy {
        match self {
            CloudProvider::Aws => ReservationPolicy::new(5, 16),
            CloudProvider::Azure => ReservationPolicy::new(5, 8),
            CloudProvider::Gcp => ReservationPolicy::new(4, 8),
            CloudProvider::Oci => ReservationPolicy::new(3, 4),
            CloudProvider::None => ReservationPolicy::new(0, 1),
        }
    }
}

impl FromStr for CloudProvider {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(CloudProvider::Aws),
            "azure" => Ok(CloudProvider::Azure),
            "gcp" => Ok(CloudProvider::Gcp),
            "oci" => Ok(CloudProvider::Oci),
            "none" => Ok(CloudProvider::None),
            other => Err(PartitionError::InvalidArgument(format!(
                "Unknown provider '{other}' (expected aws, azure, gcp, oci or none)"
            ))),
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Oci => "oci",
            CloudProvider::None => "none",
        };
        f.write_str(name)
    }
}

/// Minimum usable subnet rule applied to every child block.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ReservationPolicy {
    /// Addresses the cloud keeps in every subnet.
    pub reserved_addresses: u64,
    /// Smallest block size (in addresses) the cloud accepts.
    pub min_block_addresses: u64,
}

impl ReservationPolicy {
    pub fn new(reserved_addresses: u64, min_block_addresses: u64) -> Self {
        ReservationPolicy {
            reserved_addresses,
            min_block_addresses,
        }
    }

    /// Pure address arithmetic, every non-empty block is usable.
    pub fn none() -> Self {
        CloudProvider::None.policy()
    }

    /// A block is usable when it meets the minimum size and leaves at least one host.
    pub fn is_usable(&self, block: &AddressBlock) -> bool {
        let size = block.size();
        size >= u128::from(self.min_block_addresses) && size > u128::from(self.reserved_addresses)
    }

    /// Number of usable host addresses in `block`, zero if reservations eat it all.
    pub fn usable_hosts(&self, block: &AddressBlock) -> u128 {
        block
            .size()
            .saturating_sub(u128::from(self.reserved_addresses))
    }
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        CloudProvider::default().policy()
    }
}
