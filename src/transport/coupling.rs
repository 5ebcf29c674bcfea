use super::cost::cost_matrix;
use super::cost::Cost;
use super::measure::DiscreteMeasure;
use super::sinkhorn::solve;
use super::sinkhorn::SinkhornConfig;
use crate::divergence::Divergence;
use crate::Error;
use crate::Scalar;
use ndarray::Array2;

/// the optimal coupling between `a` and `b` in the classical Sinkhorn
/// scaling form `π[i,j] = a[i]·b[j]·exp((f[i] + g[j] − C[i,j]) / ε)`.
///
/// with `dual_potentials_populated = false` the solver runs first and the
/// measures' potentials are overwritten. with `true`, nothing is mutated
/// and the caller vouches that the buffers were produced by a prior solve
/// with the *same* divergence, cost, and epsilon; a mismatch is not
/// detectable here and silently yields a numerically wrong plan.
pub fn optimal_coupling<D, S>(
    divergence: &D,
    cost: Cost<'_, S>,
    a: &mut DiscreteMeasure<S>,
    b: &mut DiscreteMeasure<S>,
    config: &SinkhornConfig,
    dual_potentials_populated: bool,
) -> Result<Array2<Scalar>, Error>
where
    D: Divergence + Sync,
    S: Sync,
{
    let c = cost_matrix(cost, a, b)?;
    if !dual_potentials_populated {
        solve(divergence, &c, a, b, config);
    }
    let f = a.dual_potential();
    let g = b.dual_potential();
    Ok(Array2::from_shape_fn((a.len(), b.len()), |(i, j)| {
        a.density()[i] * b.density()[j] * ((f[i] + g[j] - c[[i, j]]) / config.epsilon).exp()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divergence::Balanced;
    use crate::transport::unbalanced_sinkhorn;

    fn instance() -> (DiscreteMeasure<Scalar>, DiscreteMeasure<Scalar>) {
        let a = DiscreteMeasure::new(vec![0.5, 0.5], vec![0., 1.]).unwrap();
        let b = DiscreteMeasure::new(vec![0.25, 0.75], vec![0., 1.]).unwrap();
        (a, b)
    }

    #[test]
    fn balanced_coupling_recovers_both_marginals() {
        let (mut a, mut b) = instance();
        let distance = |x: &Scalar, y: &Scalar| (x - y).abs();
        let config = SinkhornConfig::default().tol(1e-10);
        let plan = optimal_coupling(
            &Balanced,
            Cost::Function(&distance),
            &mut a,
            &mut b,
            &config,
            false,
        )
        .unwrap();
        assert_eq!(plan.dim(), (2, 2));
        for i in 0..2 {
            let row: Scalar = plan.row(i).sum();
            assert!((row - a.density()[i]).abs() < 1e-6, "row {i} sums to {row}");
        }
        for j in 0..2 {
            let col: Scalar = plan.column(j).sum();
            assert!((col - b.density()[j]).abs() < 1e-6, "col {j} sums to {col}");
        }
    }

    #[test]
    fn populated_flag_reuses_potentials_without_mutation() {
        let (mut a, mut b) = instance();
        let distance = |x: &Scalar, y: &Scalar| (x - y).abs();
        let config = SinkhornConfig::default();
        unbalanced_sinkhorn(&Balanced, Cost::Function(&distance), &mut a, &mut b, &config)
            .unwrap();
        let before = a.dual_potential().to_vec();
        let solved = optimal_coupling(
            &Balanced,
            Cost::Function(&distance),
            &mut a,
            &mut b,
            &config,
            true,
        )
        .unwrap();
        assert_eq!(a.dual_potential(), &before[..]);
        let resolved = optimal_coupling(
            &Balanced,
            Cost::Function(&distance),
            &mut a,
            &mut b,
            &config,
            false,
        )
        .unwrap();
        for (x, y) in solved.iter().zip(resolved.iter()) {
            assert!((x - y).abs() < 1e-8);
        }
    }
}
