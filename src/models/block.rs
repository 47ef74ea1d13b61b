//! IPv4 and IPv6 address blocks in CIDR notation.
//!
//! Provides [`AddressBlock`] for representing a network range, along with the
//! mask and boundary arithmetic the partitioner is built on. Both families are
//! handled with `u128` bit arithmetic.

use crate::error::{PartitionError, PartitionResult};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for an IPv4 block.
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 block.
pub const MAX_LENGTH_V6: u8 = 128;

/// Maximum prefix length for the family of `addr`.
pub fn max_length(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => MAX_LENGTH_V4,
        IpAddr::V6(_) => MAX_LENGTH_V6,
    }
}

/// Convert a prefix length to a network mask within a `max_len` bit family.
///
/// # Examples
/// ```
/// use subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(32, 24).unwrap(), 0xFFFF_FF00);
/// ```
pub fn get_cidr_mask(max_len: u8, len: u8) -> PartitionResult<u128> {
    if max_len > MAX_LENGTH_V6 || len > max_len {
        return Err(PartitionError::InvalidArgument(format!(
            "Network length /{len} is too long (max /{max_len})"
        )));
    }
    // Shifting by the full width yields zero for a /0.
    let high_bits = u128::MAX
        .checked_shl(u32::from(MAX_LENGTH_V6 - len))
        .unwrap_or(0);
    Ok(high_bits >> (MAX_LENGTH_V6 - max_len))
}

/// Number of addresses in a block of length `len`, `None` when it does not fit in `u128`.
pub fn block_size(max_len: u8, len: u8) -> Option<u128> {
    if len > max_len {
        return None;
    }
    1u128.checked_shl(u32::from(max_len - len))
}

pub(crate) fn addr_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

pub(crate) fn addr_from_bits(bits: u128, ipv4: bool) -> IpAddr {
    if ipv4 {
        IpAddr::V4(Ipv4Addr::from(bits as u32))
    } else {
        IpAddr::V6(Ipv6Addr::from(bits))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: IpAddr, len: u8) -> PartitionResult<IpAddr> {
    let mask = get_cidr_mask(max_length(addr), len)?;
    Ok(addr_from_bits(addr_bits(addr) & mask, addr.is_ipv4()))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: IpAddr, len: u8) -> PartitionResult<IpAddr> {
    let max_len = max_length(addr);
    let mask = get_cidr_mask(max_len, len)?;
    let all_bits = get_cidr_mask(max_len, max_len)?;
    let broadcast_bits = (addr_bits(addr) & mask) | (!mask & all_bits);
    Ok(addr_from_bits(broadcast_bits, addr.is_ipv4()))
}

/// Returns the first address following the block `addr/len`.
pub fn ip_after_subnet(addr: IpAddr, len: u8) -> PartitionResult<IpAddr> {
    let max_len = max_length(addr);
    let network_bits = addr_bits(cut_addr(addr, len)?);
    let next_bits = block_size(max_len, len)
        .and_then(|size| network_bits.checked_add(size))
        .filter(|bits| *bits <= get_cidr_mask(max_len, max_len).unwrap_or(u128::MAX))
        .ok_or_else(|| {
            PartitionError::Capacity(format!("No address space after {addr}/{len}"))
        })?;
    Ok(addr_from_bits(next_bits, addr.is_ipv4()))
}

/// Longest prefix length for which `addr` is still a network address.
pub fn lo_mask(addr: IpAddr) -> u8 {
    let trailing_zeros = match addr {
        IpAddr::V4(v4) => u32::from(v4).trailing_zeros(),
        IpAddr::V6(v6) => u128::from(v6).trailing_zeros(),
    };
    max_length(addr) - trailing_zeros as u8
}

/// An IPv4 or IPv6 network range: base address plus prefix length.
///
/// The prefix length is always within the family's range. The base address
/// may have host bits set; see [`AddressBlock::is_network`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct AddressBlock {
    addr: IpAddr,
    mask: u8,
}

impl AddressBlock {
    /// Create a new [`AddressBlock`] from a CIDR string (e.g., "172.16.0.0/24").
    pub fn new(addr_cidr: &str) -> PartitionResult<AddressBlock> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr.split_once('/').ok_or_else(|| {
            PartitionError::InvalidArgument(format!("Invalid address/mask '{addr_cidr}'"))
        })?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| PartitionError::InvalidArgument(format!("Invalid address '{addr}'")))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| PartitionError::InvalidArgument(format!("Invalid mask '{mask}'")))?;
        AddressBlock::from_parts(addr, mask)
    }

    /// Build a block from an address and prefix length.
    pub fn from_parts(addr: IpAddr, mask: u8) -> PartitionResult<AddressBlock> {
        if mask > max_length(addr) {
            return Err(PartitionError::InvalidArgument(format!(
                "Network length /{mask} is too long for {addr}"
            )));
        }
        Ok(AddressBlock { addr, mask })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// The prefix length.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    /// Maximum prefix length of this block's family.
    pub fn max_len(&self) -> u8 {
        max_length(self.addr)
    }

    /// Number of host bits (`max_len - mask`).
    pub fn host_bits(&self) -> u8 {
        self.max_len() - self.mask
    }

    fn mask_bits(&self) -> u128 {
        get_cidr_mask(self.max_len(), self.mask).unwrap_or(0)
    }

    fn all_bits(&self) -> u128 {
        get_cidr_mask(self.max_len(), self.max_len()).unwrap_or(u128::MAX)
    }

    /// Lowest (network) address in the block.
    pub fn lo(&self) -> IpAddr {
        addr_from_bits(addr_bits(self.addr) & self.mask_bits(), self.is_ipv4())
    }

    /// Highest (broadcast) address in the block.
    pub fn hi(&self) -> IpAddr {
        let mask = self.mask_bits();
        let bits = (addr_bits(self.addr) & mask) | (!mask & self.all_bits());
        addr_from_bits(bits, self.is_ipv4())
    }

    /// The block with its host bits cleared.
    pub fn network(&self) -> AddressBlock {
        AddressBlock {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// True when the base address has no host bits set.
    pub fn is_network(&self) -> bool {
        addr_bits(self.addr) & !self.mask_bits() & self.all_bits() == 0
    }

    /// Number of addresses in the block, saturating at `u128::MAX` for an IPv6 /0.
    pub fn size(&self) -> u128 {
        block_size(self.max_len(), self.mask).unwrap_or(u128::MAX)
    }

    /// Check if an address is contained within this block.
    pub fn contains_addr(&self, ip: IpAddr) -> bool {
        if ip.is_ipv4() != self.is_ipv4() {
            return false;
        }
        let bits = addr_bits(ip);
        bits >= addr_bits(self.lo()) && bits <= addr_bits(self.hi())
    }

    /// Check if `other` lies entirely within this block.
    pub fn contains(&self, other: &AddressBlock) -> bool {
        other.mask >= self.mask && self.contains_addr(other.lo())
    }

    /// CIDR blocks either nest or are disjoint, so overlap means containment one way.
    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// The block of the same size immediately after this one.
    pub fn next(&self) -> PartitionResult<AddressBlock> {
        Ok(AddressBlock {
            addr: ip_after_subnet(self.addr, self.mask)?,
            mask: self.mask,
        })
    }
}

impl FromStr for AddressBlock {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressBlock::new(s)
    }
}

impl std::fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AddressBlock {
    fn deserialize<D>(deserializer: D) -> Result<AddressBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressBlock::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}
