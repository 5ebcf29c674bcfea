use super::cost::cost_matrix;
use super::cost::Cost;
use super::measure::DiscreteMeasure;
use crate::divergence::Divergence;
use crate::Error;
use crate::Scalar;
use ndarray::Array2;

/// knobs shared by the solver and everything built on top of it.
///
/// `epsilon` is the entropic regularization strength: smaller tracks the
/// unregularized problem more closely but conditions the iteration worse.
/// `warn` only controls the non-convergence log line; the structured status
/// is returned regardless.
#[derive(Clone, Copy, Debug)]
pub struct SinkhornConfig {
    pub epsilon: Scalar,
    pub tol: Scalar,
    pub max_iters: usize,
    pub warn: bool,
}

impl Default for SinkhornConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-1,
            tol: 1e-5,
            max_iters: 100_000,
            warn: true,
        }
    }
}

impl SinkhornConfig {
    pub fn epsilon(mut self, epsilon: Scalar) -> Self {
        self.epsilon = epsilon;
        self
    }
    pub fn tol(mut self, tol: Scalar) -> Self {
        self.tol = tol;
        self
    }
    pub fn max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
    pub fn warn(mut self, warn: bool) -> Self {
        self.warn = warn;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkhornStatus {
    Converged,
    MaxIterationsReached,
}

/// diagnostics of a single solver invocation.
///
/// `max_residual` is the infinity-norm difference between consecutive
/// iterates of the dual potentials at the end of the run. hitting the
/// iteration cap is a soft condition: the best iterate is kept and callers
/// may simply re-invoke with a larger cap.
#[derive(Clone, Copy, Debug)]
pub struct SinkhornResult {
    pub iterations: usize,
    pub max_residual: Scalar,
    pub status: SinkhornStatus,
}

/// compute the optimal dual potentials of the entropically regularized
/// unbalanced transport problem between `a` and `b`.
///
/// alternating fixed-point sweeps: every `f[i]` is refreshed from a
/// stabilized log-domain softmin over `b`, pushed through the divergence's
/// proximity operator; then every `g[j]` symmetrically from the *updated*
/// `f`. the second half-sweep reading fresh values is what carries the
/// convergence guarantee; a simultaneous (Jacobi) variant is a different
/// algorithm and is deliberately not offered.
///
/// the potentials of `a` and `b` are overwritten in place; this invocation
/// is their sole writer for its duration, so concurrent solves over a
/// shared measure must be serialized by the caller.
pub fn unbalanced_sinkhorn<D, S>(
    divergence: &D,
    cost: Cost<'_, S>,
    a: &mut DiscreteMeasure<S>,
    b: &mut DiscreteMeasure<S>,
    config: &SinkhornConfig,
) -> Result<SinkhornResult, Error>
where
    D: Divergence + Sync,
    S: Sync,
{
    let c = cost_matrix(cost, a, b)?;
    Ok(solve(divergence, &c, a, b, config))
}

/// the iteration proper, after the cost input has been normalized to a
/// dense matrix of the right shape.
pub(crate) fn solve<D, S>(
    divergence: &D,
    c: &Array2<Scalar>,
    a: &mut DiscreteMeasure<S>,
    b: &mut DiscreteMeasure<S>,
    config: &SinkhornConfig,
) -> SinkhornResult
where
    D: Divergence + Sync,
{
    divergence.initialize_dual_potential(a);
    divergence.initialize_dual_potential(b);
    let eps = config.epsilon;
    let mut iterations = 0;
    let mut max_residual = Scalar::INFINITY;
    while iterations < config.max_iters {
        iterations += 1;
        let lhs = {
            let g = b.dual_potential();
            let log_b = b.log_density();
            sweep(divergence, eps, a.dual_potential_mut(), |i, j| {
                log_b[j] + (g[j] - c[[i, j]]) / eps
            }, log_b.len())
        };
        let rhs = {
            let f = a.dual_potential();
            let log_a = a.log_density();
            sweep(divergence, eps, b.dual_potential_mut(), |j, i| {
                log_a[i] + (f[i] - c[[i, j]]) / eps
            }, log_a.len())
        };
        max_residual = lhs.max(rhs);
        log::trace!("{:<32}{:<16}{:<16e}", "sinkhorn sweep", iterations, max_residual);
        if max_residual < config.tol {
            return SinkhornResult {
                iterations,
                max_residual,
                status: SinkhornStatus::Converged,
            };
        }
    }
    if config.warn {
        log::warn!(
            "{:<32}{:<16}{:<16e}",
            "sinkhorn reached max_iters",
            iterations,
            max_residual
        );
    }
    SinkhornResult {
        iterations,
        max_residual,
        status: SinkhornStatus::MaxIterationsReached,
    }
}

/// refresh one side's potential in place and report the sweep's ∞-norm
/// change. `term(i, j)` is the j-th log-domain summand of point i; each
/// point writes one distinct slot and reads only frozen data, so the sweep
/// parallelizes with no synchronization beyond its boundary.
fn sweep<D>(
    divergence: &D,
    eps: Scalar,
    potential: &mut [Scalar],
    term: impl Fn(usize, usize) -> Scalar + Sync,
    opposite: usize,
) -> Scalar
where
    D: Divergence + Sync,
{
    use rayon::iter::IndexedParallelIterator;
    use rayon::iter::IntoParallelRefMutIterator;
    use rayon::iter::ParallelIterator;
    potential
        .par_iter_mut()
        .enumerate()
        .map(|(i, p)| {
            let softmin = eps * logsumexp((0..opposite).map(|j| term(i, j)));
            let update = -divergence.aprox(eps, softmin);
            let delta = (update - *p).abs();
            *p = update;
            delta
        })
        .reduce(|| 0., Scalar::max)
}

/// max-stabilized log-sum-exp; the running maximum is subtracted before
/// exponentiating so small `eps` cannot overflow the reduction.
fn logsumexp(terms: impl Iterator<Item = Scalar> + Clone) -> Scalar {
    let max = terms.clone().fold(Scalar::NEG_INFINITY, Scalar::max);
    if !max.is_finite() {
        return max;
    }
    max + terms.map(|t| (t - max).exp()).sum::<Scalar>().ln()
}
