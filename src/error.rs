//! Error types for subnet partitioning.

use thiserror::Error;

/// Result type alias for partitioning operations.
pub type PartitionResult<T> = Result<T, PartitionError>;

/// Errors returned by the partitioner and the address arithmetic it uses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// Input has the wrong shape: bad CIDR, host bits set, negative or zero counts.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input is valid but the parent block has too little address space.
    #[error("Insufficient capacity: {0}")]
    Capacity(String),
}

impl PartitionError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PartitionError::InvalidArgument(_))
    }

    pub fn is_capacity(&self) -> bool {
        matches!(self, PartitionError::Capacity(_))
    }
}
