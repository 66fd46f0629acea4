//! Grid transforms.
//!
//! The oversampled grid is transformed with `rustfft` (complex data) or
//! `realfft` (real data, see [`crate::rfft`]). Both directions are
//! unnormalized: a forward/backward pair scales the grid by its length.

use std::sync::Arc;

use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{check_len, Buffer, NufftError};
use crate::num::Float;

/// Transform between an oversampled grid of `S` samples and its spectrum.
pub trait GridFft<T: Float, S> {
    /// Grid length `Nσ`.
    fn len(&self) -> usize;

    /// Number of stored spectrum coefficients.
    fn spectrum_len(&self) -> usize;

    /// Forward transform (`e^{-i...}`). `grid` may be used as scratch.
    fn forward(&mut self, grid: &mut [S], spectrum: &mut [Complex<T>]) -> Result<(), NufftError>;

    /// Inverse transform (`e^{+i...}`), unnormalized. `spectrum` may be used
    /// as scratch.
    fn backward(&mut self, spectrum: &mut [Complex<T>], grid: &mut [S])
        -> Result<(), NufftError>;
}

/// Planners shared by every grid transform created through them.
///
/// Both backends cache handles per length, so plans built from the same
/// `FftPlanners` reuse twiddles for equal grid sizes.
pub struct FftPlanners<T: Float> {
    complex: FftPlanner<T>,
    real: RealFftPlanner<T>,
}

impl<T: Float> FftPlanners<T> {
    pub fn new() -> Self {
        Self {
            complex: FftPlanner::new(),
            real: RealFftPlanner::new(),
        }
    }

    pub fn complex(&mut self) -> &mut FftPlanner<T> {
        &mut self.complex
    }

    pub fn real(&mut self) -> &mut RealFftPlanner<T> {
        &mut self.real
    }
}

impl<T: Float> Default for FftPlanners<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Complex grid transform backed by a `rustfft` forward/inverse pair.
pub struct ComplexGridFft<T: Float> {
    len: usize,
    forward: Arc<dyn Fft<T>>,
    inverse: Arc<dyn Fft<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> ComplexGridFft<T> {
    pub fn new(len: usize) -> Self {
        Self::with_planner(&mut FftPlanner::new(), len)
    }

    pub fn with_planner(planner: &mut FftPlanner<T>, len: usize) -> Self {
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Self {
            len,
            forward,
            inverse,
            scratch: vec![Complex::new(T::zero(), T::zero()); scratch_len],
        }
    }
}

impl<T: Float> GridFft<T, Complex<T>> for ComplexGridFft<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn spectrum_len(&self) -> usize {
        self.len
    }

    fn forward(
        &mut self,
        grid: &mut [Complex<T>],
        spectrum: &mut [Complex<T>],
    ) -> Result<(), NufftError> {
        check_len(Buffer::Grid, self.len, grid.len())?;
        check_len(Buffer::Spectrum, self.len, spectrum.len())?;
        spectrum.copy_from_slice(grid);
        self.forward.process_with_scratch(spectrum, &mut self.scratch);
        Ok(())
    }

    fn backward(
        &mut self,
        spectrum: &mut [Complex<T>],
        grid: &mut [Complex<T>],
    ) -> Result<(), NufftError> {
        check_len(Buffer::Spectrum, self.len, spectrum.len())?;
        check_len(Buffer::Grid, self.len, grid.len())?;
        grid.copy_from_slice(spectrum);
        self.inverse.process_with_scratch(grid, &mut self.scratch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn round_trip_restores_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        for &n in &[1usize, 8, 45, 360] {
            let mut fft = ComplexGridFft::<f64>::new(n);
            let input: Vec<Complex<f64>> = (0..n)
                .map(|_| Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
                .collect();
            let mut grid = input.clone();
            let mut spectrum = vec![Complex::new(0.0, 0.0); n];
            fft.forward(&mut grid, &mut spectrum).unwrap();
            fft.backward(&mut spectrum, &mut grid).unwrap();
            let scale = 1.0 / n as f64;
            for (a, b) in grid.iter().zip(input.iter()) {
                assert!((*a * scale - *b).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn forward_uses_negative_exponent() {
        let n = 8;
        let mut fft = ComplexGridFft::<f64>::new(n);
        // e^{+2πi·j/n} concentrates in bin 1 under e^{-i...}.
        let mut grid: Vec<Complex<f64>> = (0..n)
            .map(|j| Complex::from_polar(1.0, 2.0 * core::f64::consts::PI * j as f64 / n as f64))
            .collect();
        let mut spectrum = vec![Complex::new(0.0, 0.0); n];
        fft.forward(&mut grid, &mut spectrum).unwrap();
        assert!((spectrum[1] - Complex::new(n as f64, 0.0)).norm() < 1e-12);
        assert!(spectrum[n - 1].norm() < 1e-12);
    }

    #[test]
    fn rejects_wrong_lengths() {
        let mut fft = ComplexGridFft::<f32>::new(16);
        let mut grid = vec![Complex::new(0.0f32, 0.0); 15];
        let mut spectrum = vec![Complex::new(0.0f32, 0.0); 16];
        assert!(matches!(
            fft.forward(&mut grid, &mut spectrum),
            Err(NufftError::ShapeMismatch {
                buffer: Buffer::Grid,
                expected: 16,
                actual: 15
            })
        ));
        let mut grid = vec![Complex::new(0.0f32, 0.0); 16];
        let mut spectrum = vec![Complex::new(0.0f32, 0.0); 17];
        assert!(matches!(
            fft.backward(&mut spectrum, &mut grid),
            Err(NufftError::ShapeMismatch {
                buffer: Buffer::Spectrum,
                ..
            })
        ));
    }
}
