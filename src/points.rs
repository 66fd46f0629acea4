//! Non-uniform point sets binned onto the oversampled grid.

use core::f64::consts::TAU;

use crate::error::NufftError;
use crate::num::Float;

/// Map any finite coordinate into `[0, 2π)`.
///
/// Values that round to `2π` in the target precision fold to `0`. Non-finite
/// input is returned unchanged and rejected later by `set_points`.
pub fn fold_periodic<T: Float>(x: T) -> T {
    let wide = x.widen();
    if !wide.is_finite() {
        return x;
    }
    let folded = T::narrow(wide.rem_euclid(TAU));
    if folded.widen() >= TAU {
        T::zero()
    } else {
        folded
    }
}

/// Validated coordinates together with their grid binning.
///
/// Points are processed in *processing order*, which is sorted by cell when
/// sorting is enabled. `order[q]` gives the original index of the `q`-th
/// processed point.
#[derive(Debug, Clone)]
pub struct PointSet<T> {
    coords: Vec<T>,
    cells: Vec<usize>,
    deltas: Vec<T>,
    order: Vec<usize>,
    grid_size: usize,
}

impl<T: Float> PointSet<T> {
    /// Validate `coords` and bin them on a grid of `grid_size` cells of width
    /// `2π / grid_size`.
    ///
    /// # Errors
    /// [`NufftError::Domain`] for the first coordinate that is not finite or
    /// lies outside `[0, 2π)`.
    pub fn new(coords: &[T], grid_size: usize, sort: bool) -> Result<Self, NufftError> {
        let scale = grid_size as f64 / TAU;
        let mut cells = Vec::with_capacity(coords.len());
        let mut deltas = Vec::with_capacity(coords.len());
        for (index, &x) in coords.iter().enumerate() {
            let value = x.widen();
            if !(value >= 0.0 && value < TAU) {
                return Err(NufftError::Domain { index, value });
            }
            let u = value * scale;
            let cell = u.floor();
            let mut delta = u - cell;
            let mut cell = cell as usize;
            // `u` can round up to `grid_size` for `x` just below 2π.
            if cell >= grid_size {
                cell = grid_size - 1;
                delta = 1.0 - f64::EPSILON;
            }
            let mut delta_t = T::narrow(delta);
            if delta_t >= T::one() {
                delta_t = T::one() - <T as rustfft::num_traits::Float>::epsilon();
            }
            cells.push(cell);
            deltas.push(delta_t);
        }

        let mut order: Vec<usize> = (0..coords.len()).collect();
        if sort {
            order.sort_by_key(|&i| cells[i]);
            cells = order.iter().map(|&i| cells[i]).collect();
            deltas = order.iter().map(|&i| deltas[i]).collect();
        }
        nufft_debug!(
            "binned {} points on {} cells (sorted: {})",
            coords.len(),
            grid_size,
            sort
        );
        Ok(Self {
            coords: coords.to_vec(),
            cells,
            deltas,
            order,
            grid_size,
        })
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinates in the caller's original order.
    pub fn coords(&self) -> &[T] {
        &self.coords
    }

    /// Cell index `floor(x / h)` of each point, in processing order.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Fractional offset within the cell, in processing order.
    pub fn deltas(&self) -> &[T] {
        &self.deltas
    }

    /// Original index of each point, in processing order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }
}
