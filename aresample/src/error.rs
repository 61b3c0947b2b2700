use thiserror::Error;

/// Errors returned by aresample operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid pcm: {0}")]
    InvalidBuffer(String),

    #[error("invalid pcm, at least 4 samples per channel, actual {got} samples")]
    InsufficientSamples { got: usize },

    #[error("invalid spline input: {0}")]
    InvalidSplineInput(&'static str),

    /// The window walk produced a different number of samples than planned.
    /// This is a bug in the resampler, not bad input.
    #[error("internal error: planned {planned} samples, produced {produced}")]
    InternalInvariantViolation { planned: usize, produced: usize },
}

impl Error {
    /// Returns true if the error signals a resampler bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InternalInvariantViolation { .. })
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    }
}

/// Result type for aresample operations.
pub type Result<T> = std::result::Result<T, Error>;
