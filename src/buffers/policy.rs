//! Capacity rounding and bucket indexing
//!
//! Pure functions shared by every pool context. Capacities are rounded up
//! to the configured alignment granularity; buckets grow exponentially from
//! the rounded minimum capacity, so sixteen buckets cover the whole useful
//! range from `minimum_capacity` up to roughly `minimum_capacity << 15`.

use crate::error::{PoolError, Result};

/// Largest capacity a single buffer may have (the allocation limit)
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Upper bound on the number of buckets a context pre-creates
pub const MAX_BUCKETS: usize = 16;

/// Round `requested` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two (enforced by config validation).
/// Fails when the rounded value is not representable as an allocation size.
pub fn rounded_capacity(requested: usize, alignment: usize) -> Result<usize> {
    debug_assert!(alignment.is_power_of_two());
    let rounded = match requested.checked_add(alignment - 1) {
        Some(n) => n & !(alignment - 1),
        None => return Err(PoolError::capacity_overflow(requested as u64)),
    };
    if rounded > MAX_CAPACITY {
        return Err(PoolError::capacity_overflow(requested as u64));
    }
    Ok(rounded)
}

/// Convert an engine-supplied 64-bit size into a usable capacity.
pub fn checked_capacity(size: u64) -> Result<usize> {
    match usize::try_from(size) {
        Ok(n) if n <= MAX_CAPACITY => Ok(n),
        _ => Err(PoolError::capacity_overflow(size)),
    }
}

/// Number of buckets a context pre-creates for a given rounded minimum.
///
/// One bucket per doubling of the threshold, stopping at [`MAX_BUCKETS`] or
/// once the threshold can no longer double without overflowing.
pub fn bucket_count(rounded_minimum: usize) -> usize {
    let mut threshold = rounded_minimum;
    let mut count = 0;
    for _ in 0..MAX_BUCKETS {
        count += 1;
        if threshold >= MAX_CAPACITY / 2 {
            break;
        }
        threshold *= 2;
    }
    count
}

/// Map a capacity to the index of the bucket whose threshold covers it.
///
/// Thresholds start at `rounded_minimum` and double per bucket. Capacities
/// beyond the last threshold clamp to the last bucket index.
pub fn bucket_index(capacity: usize, rounded_minimum: usize, buckets: usize) -> usize {
    let mut threshold = rounded_minimum;
    let mut index = 0;
    while threshold < capacity && index + 1 < buckets {
        threshold = threshold.saturating_mul(2);
        index += 1;
    }
    index
}
