use crate::Scalar;

/// everything that can go wrong before iteration begins.
///
/// non-convergence is deliberately absent: the solver reports it as a
/// [`SinkhornStatus`](crate::transport::SinkhornStatus), never as an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// a measure was constructed with a zero or negative weight.
    #[error("density must be strictly positive, found {value} at index {index}")]
    NonPositiveDensity { index: usize, value: Scalar },

    /// density, log_density, and set must share a length.
    #[error("length mismatch: density {density}, log_density {log_density}, set {set}")]
    LengthMismatch {
        density: usize,
        log_density: usize,
        set: usize,
    },

    /// a precomputed cost matrix does not match the measures it was supplied with.
    #[error("cost matrix is {rows}x{cols} but measures have {n} and {m} support points")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        n: usize,
        m: usize,
    },
}
