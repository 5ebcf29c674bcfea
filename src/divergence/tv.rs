use super::Divergence;
use crate::Scalar;

/// the scaled total-variation penalty `ρ·‖·−·‖₁`.
///
/// mass change costs linearly up to the cap `ρ`, past which creating or
/// destroying is always preferred over transporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TV {
    pub rho: Scalar,
}

impl TV {
    pub fn new(rho: Scalar) -> Self {
        Self { rho }
    }
}

impl Divergence for TV {
    fn aprox(&self, _: Scalar, x: Scalar) -> Scalar {
        x.clamp(-self.rho, self.rho)
    }
    fn phi_star(&self, q: Scalar) -> Scalar {
        if q > self.rho {
            Scalar::INFINITY
        } else {
            q.max(-self.rho)
        }
    }
}
