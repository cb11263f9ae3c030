//! Per-worker pool context: bucket table and in-use tracking

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use super::{buffer::Buffer, config::PoolConfig, policy, stats::ContextStats};
use crate::{engine::SizeBound, error::Result};

/// Private buffer cache for one worker.
///
/// Each concurrent execution context owns exactly one `PoolContext` and
/// threads it through every acquire/release call. Nothing here is shared,
/// so there is no locking anywhere on the pool path: isolation comes from
/// ownership, not synchronization. Buffers lent out by one context are
/// never reused by another.
///
/// Free buffers live in buckets ordered by doubling capacity thresholds;
/// lent-out buffers are tracked by allocation address so a release can be
/// matched back to the context that handed the buffer out.
#[derive(Debug)]
pub struct PoolContext {
    /// Pool configuration
    config: PoolConfig,
    /// Minimum capacity rounded to the alignment; threshold of bucket 0
    rounded_minimum: usize,
    /// Free buffers, bucketed by capacity threshold
    buckets: Vec<VecDeque<Buffer>>,
    /// Addresses of buffers currently lent out from this context
    in_use: HashSet<usize>,
    /// Running counters
    stats: ContextStats,
}

impl PoolContext {
    pub(crate) fn new(config: PoolConfig, rounded_minimum: usize) -> Self {
        let count = policy::bucket_count(rounded_minimum);
        let buckets = (0..count).map(|_| VecDeque::new()).collect();
        debug!(
            buckets = count,
            minimum_capacity = config.minimum_capacity,
            alignment = config.alignment,
            "created pool context"
        );
        Self {
            config,
            rounded_minimum,
            buckets,
            in_use: HashSet::new(),
            stats: ContextStats::default(),
        }
    }

    /// Acquire a buffer with at least `min_capacity` usable bytes.
    ///
    /// The effective request is `max(min_capacity, minimum_capacity)`,
    /// rounded up to the alignment granularity. A free buffer from the
    /// matching bucket is preferred; with none that fits, the first buffer
    /// of any larger bucket is taken instead of allocating. Only when the
    /// whole table comes up empty is a fresh buffer allocated.
    ///
    /// The returned buffer's cursor is reset and the buffer is recorded as
    /// lent out. Fails with [`PoolError::CapacityOverflow`] if the rounded
    /// capacity is unrepresentable; no state changes on failure.
    ///
    /// [`PoolError::CapacityOverflow`]: crate::error::PoolError::CapacityOverflow
    pub fn acquire(&mut self, min_capacity: usize) -> Result<Buffer> {
        let required = min_capacity.max(self.config.minimum_capacity);
        let capacity = policy::rounded_capacity(required, self.config.alignment)?;
        let index = policy::bucket_index(capacity, self.rounded_minimum, self.buckets.len());

        let mut buffer = match self.take_free(index, capacity) {
            Some(buffer) => buffer,
            None => {
                let buffer = Buffer::allocate(capacity, self.config.alignment)?;
                self.stats.misses += 1;
                trace!(capacity, bucket = index, "pool miss, allocated fresh buffer");
                buffer
            }
        };

        buffer.clear();
        self.in_use.insert(buffer.addr());
        if self.in_use.len() > self.stats.peak_in_use {
            self.stats.peak_in_use = self.in_use.len();
        }
        Ok(buffer)
    }

    /// Acquire a buffer large enough for compressing `input_len` bytes.
    ///
    /// The worst-case compressed size comes from the engine's own bound
    /// query; the pool only rounds and buckets it.
    pub fn acquire_for_compression(
        &mut self,
        bound: &impl SizeBound,
        input_len: usize,
    ) -> Result<Buffer> {
        let required = bound.max_compressed_size(input_len);
        self.acquire(policy::checked_capacity(required)?)
    }

    /// Acquire a buffer large enough to hold `decompressed_size` bytes.
    pub fn acquire_for_decompression(&mut self, decompressed_size: u64) -> Result<Buffer> {
        self.acquire(policy::checked_capacity(decompressed_size)?)
    }

    /// Return a buffer so later `acquire` calls in this context can reuse it.
    ///
    /// Buffers this context never lent out — from another pool, another
    /// context, or a torn-down table — are silently dropped without
    /// touching pool state. The buffer is re-bucketed by its actual
    /// capacity, which may be larger than the capacity originally
    /// requested if it was handed out through the fallback scan.
    pub fn release(&mut self, mut buffer: Buffer) {
        if !self.in_use.remove(&buffer.addr()) {
            self.stats.foreign_releases += 1;
            trace!(
                capacity = buffer.capacity(),
                "ignored release of buffer foreign to this context"
            );
            return;
        }

        buffer.clear();
        let index = policy::bucket_index(buffer.capacity(), self.rounded_minimum, self.buckets.len());
        self.buckets[index].push_back(buffer);
        self.stats.releases += 1;
    }

    /// Drop every free buffer and forget all lent-out buffers.
    ///
    /// Buffers still held by callers are not reclaimed; they are freed
    /// whenever their holders drop them, but they can no longer be returned
    /// to this context.
    pub fn clear(&mut self) {
        let freed: usize = self.buckets.iter().map(VecDeque::len).sum();
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.in_use.clear();
        debug!(freed, "cleared pool context");
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get a statistics snapshot
    pub fn stats(&self) -> ContextStats {
        ContextStats {
            in_use: self.in_use.len(),
            free: self.free_count(),
            ..self.stats
        }
    }

    /// Number of free buffers across all buckets
    pub fn free_count(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    /// Number of buffers currently lent out
    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    /// Number of buckets in the table
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// First-fit in the exact bucket, then head of the first non-empty
    /// larger bucket. Oversized substitutes beat a fresh allocation.
    fn take_free(&mut self, index: usize, capacity: usize) -> Option<Buffer> {
        if let Some(pos) = self.buckets[index]
            .iter()
            .position(|buffer| buffer.capacity() >= capacity)
        {
            self.stats.reuse_hits += 1;
            return self.buckets[index].remove(pos);
        }

        for larger in self.buckets[index + 1..].iter_mut() {
            if let Some(buffer) = larger.pop_front() {
                self.stats.reuse_hits += 1;
                self.stats.fallback_hits += 1;
                trace!(
                    requested = capacity,
                    capacity = buffer.capacity(),
                    "served request from larger bucket"
                );
                return Some(buffer);
            }
        }

        None
    }
}
