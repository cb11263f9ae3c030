//! Seam to the external compression engine
//!
//! The pool never computes compressed-size bounds itself; the engine
//! wrapper implements this trait and the pool treats the returned size as
//! an opaque integer to round and bucket.

/// Worst-case compressed size oracle supplied by the compression engine
pub trait SizeBound {
    /// Upper bound on the compressed size of `input_len` input bytes
    fn max_compressed_size(&self, input_len: usize) -> u64;
}

impl<T: SizeBound + ?Sized> SizeBound for &T {
    fn max_compressed_size(&self, input_len: usize) -> u64 {
        (**self).max_compressed_size(input_len)
    }
}
