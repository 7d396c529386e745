use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FuzzyError {
    /// The input is too long for the largest block size to summarize it.
    #[error("input of {total_size} bytes exceeds the largest representable block size")]
    CapacityExceeded { total_size: u64 },

    /// Engine state broke one of its own invariants. Always a bug.
    #[error("internal engine error: {0}")]
    Internal(&'static str),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
