use crate::Error;
use crate::Scalar;

/// a weighted measure over a finite support.
///
/// `density[i]` is the (strictly positive) mass sitting on `set[i]`, and
/// `log_density` caches its natural log for the log-domain solver. the first
/// three sequences are frozen at construction; `dual_potential` is the one
/// mutable buffer, overwritten by every solver invocation and holding the
/// converged potentials afterwards. the potentials match whatever
/// (divergence, cost, epsilon) was solved last, and staleness across
/// parameter changes is the caller's problem.
#[derive(Clone, Debug)]
pub struct DiscreteMeasure<S> {
    set: Vec<S>,
    density: Vec<Scalar>,
    log_density: Vec<Scalar>,
    dual_potential: Vec<Scalar>,
}

impl<S> DiscreteMeasure<S> {
    /// construct a measure, deriving `log_density` elementwise.
    pub fn new(density: Vec<Scalar>, set: Vec<S>) -> Result<Self, Error> {
        let log_density = density.iter().map(|d| d.ln()).collect();
        Self::with_log_density(density, log_density, set)
    }

    /// construct a measure from a precomputed `log_density`.
    ///
    /// lengths are checked; the log values themselves are trusted to equal
    /// `ln(density)` elementwise.
    pub fn with_log_density(
        density: Vec<Scalar>,
        log_density: Vec<Scalar>,
        set: Vec<S>,
    ) -> Result<Self, Error> {
        if density.len() != log_density.len() || density.len() != set.len() {
            return Err(Error::LengthMismatch {
                density: density.len(),
                log_density: log_density.len(),
                set: set.len(),
            });
        }
        if let Some((index, &value)) = density.iter().enumerate().find(|(_, d)| !(**d > 0.)) {
            return Err(Error::NonPositiveDensity { index, value });
        }
        let dual_potential = vec![0.; density.len()];
        Ok(Self {
            set,
            density,
            log_density,
            dual_potential,
        })
    }

    /// number of support points.
    pub fn len(&self) -> usize {
        self.density.len()
    }
    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }
    /// total mass, i.e. the sum of all weights.
    pub fn mass(&self) -> Scalar {
        self.density.iter().sum()
    }
    pub fn set(&self) -> &[S] {
        &self.set
    }
    pub fn density(&self) -> &[Scalar] {
        &self.density
    }
    pub fn log_density(&self) -> &[Scalar] {
        &self.log_density
    }
    /// the current dual-potential iterate, valid after a solve.
    pub fn dual_potential(&self) -> &[Scalar] {
        &self.dual_potential
    }
    /// mutable access to the potential buffer.
    ///
    /// exists for [`Divergence::initialize_dual_potential`] implementations
    /// that seed a better starting iterate; everything else should let the
    /// solver do the writing.
    ///
    /// [`Divergence::initialize_dual_potential`]: crate::Divergence::initialize_dual_potential
    pub fn dual_potential_mut(&mut self) -> &mut [Scalar] {
        &mut self.dual_potential
    }
}

impl crate::Arbitrary for DiscreteMeasure<Scalar> {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let n = rng.random_range(1..8);
        let density = (0..n).map(|_| rng.random_range(0.1..1.0)).collect();
        let set = (0..n).map(|_| rng.random_range(0.0..1.0)).collect();
        Self::new(density, set).expect("random weights are positive")
    }
}
