mod balanced;
mod kl;
mod range;
mod tv;

pub use balanced::*;
pub use kl::*;
pub use range::*;
pub use tv::*;

use crate::transport::Cost;
use crate::transport::DiscreteMeasure;
use crate::transport::SinkhornConfig;
use crate::Error;
use crate::Scalar;

/// a Csiszár φ-divergence penalizing mass creation and destruction.
///
/// stateless value objects: a divergence never owns or references a
/// measure. the two required methods are the whole numeric contract the
/// solver consumes; the two provided methods are performance hooks whose
/// overrides must not change any converged result. the family stays open:
/// the solver is generic over this trait, so downstream variants plug in
/// without touching it, and a missing required method is a compile error
/// rather than a runtime dispatch failure.
pub trait Divergence {
    /// the anisotropic proximity operator: maps the raw softmin aggregate
    /// `x` into the regularized potential update. defined for all real `x`
    /// and `epsilon > 0`; monotone non-decreasing in `x`.
    fn aprox(&self, epsilon: Scalar, x: Scalar) -> Scalar;

    /// the Legendre conjugate of the divergence's generating convex
    /// function, used to evaluate costs from converged potentials.
    fn phi_star(&self, q: Scalar) -> Scalar;

    /// seed the dual potential ahead of iteration; zero-fill by default.
    fn initialize_dual_potential<S>(&self, measure: &mut DiscreteMeasure<S>) {
        measure.dual_potential_mut().fill(0.);
    }

    /// divergence-specific fast path for the Sinkhorn divergence; the
    /// default is the generic three-solve composition. the self terms run
    /// on cloned measures so that `a` and `b` come back holding the
    /// cross-term optimal potentials.
    fn sinkhorn_divergence<S>(
        &self,
        cost: Cost<'_, S>,
        a: &mut DiscreteMeasure<S>,
        b: &mut DiscreteMeasure<S>,
        config: &SinkhornConfig,
    ) -> Result<Scalar, Error>
    where
        S: Clone + Sync,
        Self: Sized + Sync,
    {
        let xx = {
            let mut lhs = a.clone();
            let mut rhs = a.clone();
            crate::transport::transport_cost(self, cost, &mut lhs, &mut rhs, config)?
        };
        let yy = {
            let mut lhs = b.clone();
            let mut rhs = b.clone();
            crate::transport::transport_cost(self, cost, &mut lhs, &mut rhs, config)?
        };
        let xy = crate::transport::transport_cost(self, cost, a, b, config)?;
        let gap = a.mass() - b.mass();
        Ok(xy - xx / 2. - yy / 2. + config.epsilon / 2. * gap * gap)
    }
}
