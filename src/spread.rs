//! Type-1 spreading: accumulate weighted point values onto the grid.

use crate::num::{Float, Sample};
use crate::points::PointSet;
use crate::window::Window;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// First grid node touched by a point in `cell`, as an unwrapped index in
/// `[grid - M + 1, 2·grid - M + 1)` so that no subtraction underflows.
#[inline(always)]
fn window_origin(cell: usize, grid: usize, width: usize) -> usize {
    cell + grid - (width / 2 - 1)
}

/// Spread `values` (in the caller's order) onto `grid`, which is cleared first.
///
/// `values.len()` must equal `points.len()` and `grid.len()` the point set's
/// grid size; the plan checks both.
pub(crate) fn spread<T: Float, S: Sample<T>>(
    grid: &mut [S],
    points: &PointSet<T>,
    values: &[S],
    window: &dyn Window<T>,
) {
    grid.fill(S::zero());
    #[cfg(feature = "parallel")]
    {
        if crate::parallel::should_parallelize(points.len()) {
            let block = crate::parallel::spread_block_points();
            nufft_trace!("spreading {} points in blocks of {}", points.len(), block);
            spread_blocked(grid, points, values, window, block);
            return;
        }
    }
    spread_sequential(grid, points, values, window);
}

fn spread_sequential<T: Float, S: Sample<T>>(
    grid: &mut [S],
    points: &PointSet<T>,
    values: &[S],
    window: &dyn Window<T>,
) {
    let n = grid.len();
    let width = window.width();
    let mut weights = vec![T::zero(); width];
    let iter = points
        .cells()
        .iter()
        .zip(points.deltas())
        .zip(points.order());
    for ((&cell, &delta), &orig) in iter {
        window.weights(delta, &mut weights);
        let v = values[orig];
        let mut idx = window_origin(cell, n, width) % n;
        for &w in &weights {
            grid[idx] += v * w;
            idx += 1;
            if idx == n {
                idx = 0;
            }
        }
    }
}

/// Spread contiguous blocks of points into private buffers in parallel, then
/// add the buffers onto the grid in block order.
///
/// A block's buffer spans only the cells its points reach: from the first
/// node of its lowest cell to the last node of its highest one. With sorted
/// points that is roughly `block + 2M` cells.
#[cfg(feature = "parallel")]
fn spread_blocked<T: Float, S: Sample<T>>(
    grid: &mut [S],
    points: &PointSet<T>,
    values: &[S],
    window: &dyn Window<T>,
    block: usize,
) {
    let n = grid.len();
    let width = window.width();
    let cells = points.cells();
    let deltas = points.deltas();
    let order = points.order();
    let blocks = points.len().div_ceil(block);

    let partials: Vec<(usize, Vec<S>)> = (0..blocks)
        .into_par_iter()
        .map_init(
            || vec![T::zero(); width],
            |weights, b| {
                let start = b * block;
                let end = (start + block).min(points.len());
                let lo = cells[start..end].iter().copied().min().unwrap_or(0);
                let hi = cells[start..end].iter().copied().max().unwrap_or(0);
                let mut local = vec![S::zero(); hi - lo + width];
                for q in start..end {
                    window.weights(deltas[q], weights);
                    let v = values[order[q]];
                    let offset = cells[q] - lo;
                    for (slot, &w) in local[offset..offset + width].iter_mut().zip(weights.iter()) {
                        *slot += v * w;
                    }
                }
                (window_origin(lo, n, width), local)
            },
        )
        .collect();

    for (origin, local) in partials {
        let mut idx = origin % n;
        for v in local {
            grid[idx] += v;
            idx += 1;
            if idx == n {
                idx = 0;
            }
        }
    }
}
