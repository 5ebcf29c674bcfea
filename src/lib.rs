pub mod divergence;
pub mod error;
pub mod transport;

pub use divergence::Balanced;
pub use divergence::Divergence;
pub use divergence::KL;
pub use divergence::RangeConstraint;
pub use divergence::TV;
pub use error::Error;
pub use transport::*;

/// scalar type shared by densities, costs, potentials, and tolerances.
pub type Scalar = f64;

/// random instance generation for testing and benchmarking.
pub trait Arbitrary {
    fn random() -> Self;
}
