//! End-to-end tests for buffer pool reuse semantics

#[cfg(test)]
mod tests {
    use packbuf::{BufferPool, PoolConfig, PoolError, SizeBound};

    fn pool_1k_128() -> BufferPool {
        BufferPool::builder()
            .minimum_capacity(1024)
            .alignment(128)
            .build()
            .expect("valid config")
    }

    #[test]
    fn test_acquired_capacity_is_rounded_and_at_least_minimum() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        for request in [0, 1, 513, 1024, 1025, 2048, 5000, 1 << 20] {
            let buffer = ctx.acquire(request).unwrap();
            assert!(buffer.capacity() >= request.max(1024));
            assert_eq!(buffer.capacity() % 128, 0);
            assert!(buffer.is_empty());
            ctx.release(buffer);
        }
    }

    #[test]
    fn test_sizing_examples() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        let buffer = ctx.acquire(2048).unwrap();
        assert_eq!(buffer.capacity(), 2048);

        let buffer = ctx.acquire(513).unwrap();
        assert_eq!(buffer.capacity(), 1024);
    }

    #[test]
    fn test_round_trip_returns_same_block() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        let buffer = ctx.acquire(4096).unwrap();
        let addr = buffer.as_ptr() as usize;
        ctx.release(buffer);

        // A smaller request is still satisfied by the same block.
        let again = ctx.acquire(3000).unwrap();
        assert_eq!(again.as_ptr() as usize, addr);
    }

    #[test]
    fn test_fallback_beats_fresh_allocation() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        let big = ctx.acquire(32 * 1024).unwrap();
        let addr = big.as_ptr() as usize;
        ctx.release(big);

        let small = ctx.acquire(1024).unwrap();
        assert_eq!(small.as_ptr() as usize, addr);
        assert_eq!(ctx.stats().misses, 1);
        assert_eq!(ctx.stats().fallback_hits, 1);
    }

    #[test]
    fn test_growth_past_all_thresholds() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        // 1024 << 16 exceeds the largest threshold (1024 << 15).
        let huge = ctx.acquire(1024 << 16).unwrap();
        assert!(huge.capacity() >= 1024 << 16);
        ctx.release(huge);
        assert_eq!(ctx.free_count(), 1);

        // And it is reusable afterwards.
        let again = ctx.acquire(1024 << 16).unwrap();
        assert_eq!(ctx.stats().reuse_hits, 1);
        drop(again);
    }

    #[test]
    fn test_contexts_never_share_buffers() {
        let pool = pool_1k_128();
        let mut a = pool.context();
        let mut b = pool.context();

        let buffer = a.acquire(2048).unwrap();
        let addr = buffer.as_ptr() as usize;
        a.release(buffer);

        // B allocates fresh; A's free buffer is invisible to it.
        let other = b.acquire(2048).unwrap();
        assert_ne!(other.as_ptr() as usize, addr);
        assert_eq!(b.stats().misses, 1);
        assert_eq!(b.stats().reuse_hits, 0);
    }

    #[test]
    fn test_contexts_move_to_worker_threads() {
        let pool = pool_1k_128();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut ctx = pool.context();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let buffer = ctx.acquire(8192).unwrap();
                        ctx.release(buffer);
                    }
                    ctx.stats()
                })
            })
            .collect();

        for handle in handles {
            let stats = handle.join().unwrap();
            assert_eq!(stats.total_acquires(), 100);
            assert_eq!(stats.misses, 1);
        }
    }

    #[test]
    fn test_foreign_release_never_corrupts() {
        let pool = pool_1k_128();
        let other_pool = pool_1k_128();
        let mut ctx = pool.context();
        let mut foreign = other_pool.context();

        let buffer = foreign.acquire(2048).unwrap();
        ctx.release(buffer);
        assert_eq!(ctx.free_count(), 0);
        assert_eq!(ctx.stats().foreign_releases, 1);

        // Subsequent traffic in the receiving context stays correct.
        let a = ctx.acquire(2048).unwrap();
        assert!(a.capacity() >= 2048);
        ctx.release(a);
        let b = ctx.acquire(2048).unwrap();
        assert_eq!(ctx.stats().reuse_hits, 1);
        drop(b);
    }

    #[test]
    fn test_teardown_with_outstanding_buffers() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        let held = ctx.acquire(2048).unwrap();
        ctx.clear();

        // The held buffer stays valid and usable; it just cannot rejoin.
        assert!(held.capacity() >= 2048);
        ctx.release(held);
        assert_eq!(ctx.free_count(), 0);

        // The context keeps working after teardown.
        let buffer = ctx.acquire(1024).unwrap();
        assert!(buffer.capacity() >= 1024);
    }

    #[test]
    fn test_overflowing_request_fails_cleanly() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        let err = ctx.acquire(usize::MAX).unwrap_err();
        assert!(matches!(err, PoolError::CapacityOverflow { .. }));

        // Pool still serves normal traffic afterwards.
        let buffer = ctx.acquire(1024).unwrap();
        assert!(buffer.capacity() >= 1024);
    }

    /// Bound oracle standing in for the native engine in tests.
    struct StubEngine;

    impl SizeBound for StubEngine {
        fn max_compressed_size(&self, input_len: usize) -> u64 {
            // Worst-case expansion: incompressible input plus framing.
            input_len as u64 + (input_len as u64 >> 8) + 64
        }
    }

    #[test]
    fn test_acquire_for_compression_uses_engine_bound() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();
        let engine = StubEngine;

        let input_len = 100_000;
        let buffer = ctx.acquire_for_compression(&engine, input_len).unwrap();
        assert!(buffer.capacity() as u64 >= engine.max_compressed_size(input_len));
        ctx.release(buffer);

        // The same block serves the next call for the same input size.
        let again = ctx.acquire_for_compression(&engine, input_len).unwrap();
        assert_eq!(ctx.stats().reuse_hits, 1);
        drop(again);
    }

    #[test]
    fn test_acquire_for_decompression_round_trip() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        let mut buffer = ctx.acquire_for_decompression(10_000).unwrap();
        assert!(buffer.capacity() >= 10_000);

        // Simulate the engine filling the block and reporting its size.
        buffer.set_len(9_500).unwrap();
        assert_eq!(buffer.len(), 9_500);
        ctx.release(buffer);
    }

    #[test]
    fn test_config_snapshot_matches_builder() {
        let pool = BufferPool::builder()
            .minimum_capacity(4096)
            .alignment(256)
            .build()
            .unwrap();

        let expected = PoolConfig::new()
            .with_minimum_capacity(4096)
            .with_alignment(256);
        assert_eq!(*pool.config(), expected);
        assert_eq!(*pool.context().config(), expected);
    }

    #[test]
    fn test_hit_rate_converges_under_steady_traffic() {
        let pool = pool_1k_128();
        let mut ctx = pool.context();

        for _ in 0..1000 {
            let buffer = ctx.acquire(16 * 1024).unwrap();
            ctx.release(buffer);
        }

        let stats = ctx.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reuse_hits, 999);
        assert!(stats.hit_rate() > 0.99);
    }
}
