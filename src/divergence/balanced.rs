use super::Divergence;
use crate::Scalar;

/// the hard marginal constraint: mass creation and destruction are
/// infinitely expensive, recovering classical balanced transport. the
/// special case `RangeConstraint::new(1., 1.)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balanced;

impl Divergence for Balanced {
    fn aprox(&self, _: Scalar, x: Scalar) -> Scalar {
        x
    }
    fn phi_star(&self, q: Scalar) -> Scalar {
        q
    }
}
