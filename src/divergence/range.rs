use super::Divergence;
use crate::Scalar;

/// the box constraint: a marginal may deviate from its prescribed density
/// only within the multiplicative band `[l·b, u·b]`, at zero cost inside
/// and infinite cost outside. `l == u == 1` is exactly
/// [`Balanced`](super::Balanced).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeConstraint {
    pub lower: Scalar,
    pub upper: Scalar,
}

impl RangeConstraint {
    /// requires `0 <= lower <= upper`; `lower == 0` leaves the lower band
    /// open (destruction is free).
    pub fn new(lower: Scalar, upper: Scalar) -> Self {
        Self { lower, upper }
    }
}

impl Divergence for RangeConstraint {
    fn aprox(&self, epsilon: Scalar, x: Scalar) -> Scalar {
        (x - epsilon * self.upper.ln()).max((x - epsilon * self.lower.ln()).min(0.))
    }
    fn phi_star(&self, q: Scalar) -> Scalar {
        (self.lower * q).max(self.upper * q)
    }
}
