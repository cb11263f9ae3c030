//! # packbuf - Reusable Buffer Pools for Compression Pipelines
//!
//! packbuf hands out appropriately sized, stably addressed memory blocks to
//! high-throughput compression/decompression pipelines, avoiding per-call
//! allocation overhead for blocks that must stay contiguous and externally
//! addressable (e.g. for passing across a native interop boundary).
//!
//! ## Features
//!
//! - **Bucketed reuse**: free buffers grouped by doubling capacity
//!   thresholds, first-fit with larger-bucket fallback
//! - **Per-worker isolation**: each worker owns a private [`PoolContext`];
//!   no locks, no atomics, no cross-context sharing
//! - **Stable addresses**: aligned raw allocations whose pointers survive
//!   for the buffer's lifetime, safe to hand to a native engine
//! - **Engine seam**: buffer sizing driven by the engine's own
//!   compressed-size bound through the [`SizeBound`] trait
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  BufferPool                    │
//! │        (immutable config, freely shared)       │
//! └───────────┬───────────────────────┬────────────┘
//!             ▼                       ▼
//! ┌───────────────────────┐ ┌───────────────────────┐
//! │ PoolContext (worker A)│ │ PoolContext (worker B)│
//! │  buckets ×16 │ in-use │ │  buckets ×16 │ in-use │
//! └───────────────────────┘ └───────────────────────┘
//! ```

// Core modules
pub mod buffers;
pub mod engine;
pub mod error;

// Main API re-exports
pub use buffers::{Buffer, BufferPool, BufferPoolBuilder, ContextStats, PoolConfig, PoolContext};
pub use engine::SizeBound;
pub use error::{PoolError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
