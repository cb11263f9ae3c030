//! Per-context pool statistics
//!
//! Contexts are single-owner, so plain counters suffice; no atomics.

/// Statistics snapshot for one pool context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    /// Acquires served from a bucket
    pub reuse_hits: u64,
    /// Subset of reuse hits served by the fallback scan of larger buckets
    pub fallback_hits: u64,
    /// Acquires that allocated a fresh buffer (pool misses)
    pub misses: u64,
    /// Buffers returned to a bucket
    pub releases: u64,
    /// Release calls ignored because the buffer was foreign to the context
    pub foreign_releases: u64,
    /// Buffers currently lent out
    pub in_use: usize,
    /// Free buffers across all buckets
    pub free: usize,
    /// Peak number of buffers lent out simultaneously
    pub peak_in_use: usize,
}

impl ContextStats {
    /// Total acquire calls that completed
    pub fn total_acquires(&self) -> u64 {
        self.reuse_hits + self.misses
    }

    /// Fraction of acquires served without a fresh allocation (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_acquires();
        if total == 0 {
            return 0.0;
        }
        self.reuse_hits as f64 / total as f64
    }
}
