use super::Divergence;
use crate::Scalar;

/// the scaled Kullback-Leibler penalty `ρ·KL(·|·)`.
///
/// interpolates the whole family: mass change costs proportionally to `ρ`,
/// recovering [`Balanced`](super::Balanced) as `ρ → ∞` and a free-mass
/// regime as `ρ → 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KL {
    pub rho: Scalar,
}

impl KL {
    pub fn new(rho: Scalar) -> Self {
        Self { rho }
    }
}

impl Divergence for KL {
    fn aprox(&self, epsilon: Scalar, x: Scalar) -> Scalar {
        x / (1. + epsilon / self.rho)
    }
    fn phi_star(&self, q: Scalar) -> Scalar {
        self.rho * ((q / self.rho).exp() - 1.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aprox_shrinks_toward_zero() {
        let d = KL::new(1.);
        assert!((d.aprox(0.1, 1.1) - 1.).abs() < 1e-12);
        assert_eq!(d.aprox(0.1, 0.), 0.);
        assert!(d.aprox(0.1, -1.) > -1.);
    }

    #[test]
    fn aprox_approaches_identity_as_rho_grows() {
        let d = KL::new(1e12);
        assert!((d.aprox(0.1, 3.) - 3.).abs() < 1e-9);
    }

    #[test]
    fn phi_star_is_the_exponential_conjugate() {
        let d = KL::new(2.);
        assert_eq!(d.phi_star(0.), 0.);
        assert!((d.phi_star(2.) - 2. * (1f64.exp() - 1.)).abs() < 1e-12);
        // bounded below by -rho, the value of total mass destruction
        assert!(d.phi_star(-1e6) > -2. - 1e-12);
    }
}
