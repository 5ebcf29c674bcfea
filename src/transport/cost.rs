use super::measure::DiscreteMeasure;
use crate::Error;
use crate::Scalar;
use ndarray::Array2;

/// transport cost at the API boundary: a binary function over support
/// points, or a matrix already materialized by [`cost_matrix`].
///
/// either form is normalized to a dense matrix before the solver runs, so
/// the iteration itself never knows which one was supplied. nothing is
/// cached across calls; reuse means materializing once and passing the
/// matrix back in.
pub enum Cost<'a, S> {
    Function(&'a (dyn Fn(&S, &S) -> Scalar + Sync)),
    Matrix(&'a Array2<Scalar>),
}

impl<S> Clone for Cost<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S> Copy for Cost<'_, S> {}

impl<'a, S> From<&'a Array2<Scalar>> for Cost<'a, S> {
    fn from(matrix: &'a Array2<Scalar>) -> Self {
        Self::Matrix(matrix)
    }
}

/// materialize the pairwise cost matrix between the supports of `a` and `b`.
///
/// a supplied matrix is shape-checked against `(|a|, |b|)` and cloned
/// through; a function is evaluated over the full grid, rows in parallel.
pub fn cost_matrix<S: Sync>(
    cost: Cost<'_, S>,
    a: &DiscreteMeasure<S>,
    b: &DiscreteMeasure<S>,
) -> Result<Array2<Scalar>, Error> {
    let (n, m) = (a.len(), b.len());
    match cost {
        Cost::Matrix(c) => {
            let (rows, cols) = c.dim();
            if (rows, cols) == (n, m) {
                Ok(c.clone())
            } else {
                Err(Error::DimensionMismatch { rows, cols, n, m })
            }
        }
        Cost::Function(c) => {
            use rayon::iter::IntoParallelRefIterator;
            use rayon::iter::ParallelIterator;
            let grid = a
                .set()
                .par_iter()
                .flat_map_iter(|x| b.set().iter().map(move |y| c(x, y)))
                .collect::<Vec<_>>();
            Ok(Array2::from_shape_vec((n, m), grid).expect("grid has n * m entries"))
        }
    }
}

/// the default transport cost `C(x, y) = ‖x − y‖`.
pub fn euclidean(x: &[Scalar], y: &[Scalar]) -> Scalar {
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<Scalar>()
        .sqrt()
}
