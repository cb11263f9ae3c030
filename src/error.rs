//! Error types and handling for packbuf

/// Result type alias for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Error types for the buffer pool
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Requested or derived capacity cannot be rounded or represented
    #[error("Capacity overflow: {requested} bytes cannot be satisfied")]
    CapacityOverflow { requested: u64 },

    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Write or cursor update beyond the buffer's capacity
    #[error("Insufficient space: requested {requested}, available {available}")]
    InsufficientSpace { requested: usize, available: usize },
}

impl PoolError {
    /// Create a capacity overflow error
    pub fn capacity_overflow(requested: u64) -> Self {
        Self::CapacityOverflow { requested }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient space error
    pub fn insufficient_space(requested: usize, available: usize) -> Self {
        Self::InsufficientSpace {
            requested,
            available,
        }
    }
}
