//! Type-2 interpolation: gather weighted grid values at each point.

use crate::num::{Float, Sample};
use crate::points::PointSet;
use crate::window::Window;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[inline(always)]
fn gather<T: Float, S: Sample<T>>(grid: &[S], cell: usize, weights: &[T]) -> S {
    let n = grid.len();
    let mut idx = (cell + n - (weights.len() / 2 - 1)) % n;
    let mut acc = S::zero();
    for &w in weights {
        acc += grid[idx] * w;
        idx += 1;
        if idx == n {
            idx = 0;
        }
    }
    acc
}

/// Interpolate `grid` at every point, writing `out` in the caller's order.
pub(crate) fn interpolate<T: Float, S: Sample<T>>(
    out: &mut [S],
    grid: &[S],
    points: &PointSet<T>,
    window: &dyn Window<T>,
) {
    #[cfg(feature = "parallel")]
    {
        if crate::parallel::should_parallelize(points.len()) {
            nufft_trace!("interpolating {} points in parallel", points.len());
            let gathered: Vec<S> = points
                .cells()
                .par_iter()
                .zip(points.deltas().par_iter())
                .map_init(
                    || vec![T::zero(); window.width()],
                    |weights, (&cell, &delta)| {
                        window.weights(delta, weights);
                        gather(grid, cell, weights)
                    },
                )
                .collect();
            for (v, &orig) in gathered.into_iter().zip(points.order()) {
                out[orig] = v;
            }
            return;
        }
    }
    let mut weights = vec![T::zero(); window.width()];
    let iter = points
        .cells()
        .iter()
        .zip(points.deltas())
        .zip(points.order());
    for ((&cell, &delta), &orig) in iter {
        window.weights(delta, &mut weights);
        out[orig] = gather(grid, cell, &weights);
    }
}
