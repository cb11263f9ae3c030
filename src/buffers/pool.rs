//! Top-level pool handle and per-worker context creation

use super::{config::PoolConfig, context::PoolContext, policy};
use crate::error::Result;

/// Shared handle for a family of per-worker buffer caches.
///
/// Holds nothing but the immutable configuration, so it is freely shared
/// (or cloned) across threads. All mutable state lives in the
/// [`PoolContext`] each worker creates for itself on first use and then
/// threads through every acquire/release call.
#[derive(Debug, Clone)]
pub struct BufferPool {
    /// Immutable pool configuration
    config: PoolConfig,
    /// Minimum capacity rounded to the alignment, computed once
    rounded_minimum: usize,
}

impl BufferPool {
    /// Create a pool from a validated configuration
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        let rounded_minimum = policy::rounded_capacity(config.minimum_capacity, config.alignment)?;
        Ok(Self {
            config,
            rounded_minimum,
        })
    }

    /// Start building a pool with the default configuration
    pub fn builder() -> BufferPoolBuilder {
        BufferPoolBuilder::new()
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Create the private context for the calling worker.
    ///
    /// Each worker calls this once and owns the result; contexts are never
    /// shared between workers.
    pub fn context(&self) -> PoolContext {
        PoolContext::new(self.config, self.rounded_minimum)
    }
}

/// Builder pattern for buffer pools
pub struct BufferPoolBuilder {
    config: PoolConfig,
}

impl BufferPoolBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: PoolConfig::default(),
        }
    }

    /// Set the smallest capacity ever handed out
    pub fn minimum_capacity(mut self, minimum_capacity: usize) -> Self {
        self.config.minimum_capacity = minimum_capacity;
        self
    }

    /// Set the capacity rounding granularity
    pub fn alignment(mut self, alignment: usize) -> Self {
        self.config.alignment = alignment;
        self
    }

    /// Validate the configuration and build the pool
    pub fn build(self) -> Result<BufferPool> {
        BufferPool::new(self.config)
    }
}

impl Default for BufferPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
