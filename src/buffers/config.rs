//! Buffer pool configuration

use serde::{Deserialize, Serialize};

use super::policy;
use crate::error::{PoolError, Result};

/// Default smallest capacity ever handed out (64 KiB)
pub const DEFAULT_MINIMUM_CAPACITY: usize = 64 * 1024;

/// Default capacity rounding granularity
pub const DEFAULT_ALIGNMENT: usize = 64;

/// Configuration for buffer pools
///
/// Immutable after the pool is constructed; safely shared across any number
/// of worker contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Smallest capacity ever handed out by `acquire`
    pub minimum_capacity: usize,
    /// Capacity rounding granularity; also the address alignment of each block
    pub alignment: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            minimum_capacity: DEFAULT_MINIMUM_CAPACITY,
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the default minimum capacity and alignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum capacity
    pub fn with_minimum_capacity(mut self, minimum_capacity: usize) -> Self {
        self.minimum_capacity = minimum_capacity;
        self
    }

    /// Set the alignment granularity
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.minimum_capacity == 0 {
            return Err(PoolError::invalid_parameter(
                "minimum_capacity",
                "Minimum capacity cannot be zero",
            ));
        }

        if !self.alignment.is_power_of_two() {
            return Err(PoolError::invalid_parameter(
                "alignment",
                "Alignment must be a power of two",
            ));
        }

        // The rounded minimum seeds every bucket threshold; it must itself
        // be representable.
        policy::rounded_capacity(self.minimum_capacity, self.alignment)?;

        Ok(())
    }
}
