use thiserror::Error;

/// Failure conditions surfaced by the thermodynamic engine.
#[derive(Debug, Error)]
pub enum IsingError {
    /// A per-site magnet sequence did not line up with the spin count.
    #[error("the number of magnet constants ({magnets}) needs to be the same as the number of spins ({spins})")]
    DimensionMismatch { spins: usize, magnets: usize },

    /// Floating-point cancellation drove a weighted variance below zero.
    #[error("variance ({value} = {head} - {tail}) was less than 0")]
    NegativeVariance { value: f64, head: f64, tail: f64 },

    /// The requested operation has no implementation on the active strategy.
    #[error("{0} is not supported by this strategy")]
    NotSupported(&'static str),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, IsingError>;
