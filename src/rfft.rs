//! Real-input grid transform built on `realfft`.

use std::sync::Arc;

use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;

use crate::error::{check_len, Buffer, NufftError};
use crate::fft::GridFft;
use crate::num::Float;

/// Real grid transform: `Nσ` real samples to `Nσ/2 + 1` coefficients.
pub struct RealGridFft<T: Float> {
    len: usize,
    r2c: Arc<dyn RealToComplex<T>>,
    c2r: Arc<dyn ComplexToReal<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> RealGridFft<T> {
    pub fn new(len: usize) -> Self {
        Self::with_planner(&mut RealFftPlanner::new(), len)
    }

    pub fn with_planner(planner: &mut RealFftPlanner<T>, len: usize) -> Self {
        let r2c = planner.plan_fft_forward(len);
        let c2r = planner.plan_fft_inverse(len);
        let scratch_len = r2c.get_scratch_len().max(c2r.get_scratch_len());
        Self {
            len,
            r2c,
            c2r,
            scratch: vec![Complex::new(T::zero(), T::zero()); scratch_len],
        }
    }
}

impl<T: Float> GridFft<T, T> for RealGridFft<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn spectrum_len(&self) -> usize {
        self.len / 2 + 1
    }

    fn forward(&mut self, grid: &mut [T], spectrum: &mut [Complex<T>]) -> Result<(), NufftError> {
        check_len(Buffer::Grid, self.len, grid.len())?;
        check_len(Buffer::Spectrum, self.spectrum_len(), spectrum.len())?;
        self.r2c
            .process_with_scratch(grid, spectrum, &mut self.scratch)
            .map_err(|e| NufftError::Backend(e.to_string()))
    }

    fn backward(&mut self, spectrum: &mut [Complex<T>], grid: &mut [T]) -> Result<(), NufftError> {
        check_len(Buffer::Spectrum, self.spectrum_len(), spectrum.len())?;
        check_len(Buffer::Grid, self.len, grid.len())?;
        // The zero bin (and the Nyquist bin of an even grid) of a real signal
        // are real; c2r refuses anything else.
        spectrum[0].im = T::zero();
        if self.len % 2 == 0 {
            spectrum[self.len / 2].im = T::zero();
        }
        self.c2r
            .process_with_scratch(spectrum, grid, &mut self.scratch)
            .map_err(|e| NufftError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn round_trip_restores_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        for &n in &[2usize, 9, 40, 375] {
            let mut fft = RealGridFft::<f64>::new(n);
            let input: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let mut grid = input.clone();
            let mut spectrum = vec![Complex::new(0.0, 0.0); fft.spectrum_len()];
            fft.forward(&mut grid, &mut spectrum).unwrap();
            fft.backward(&mut spectrum, &mut grid).unwrap();
            let scale = 1.0 / n as f64;
            for (a, b) in grid.iter().zip(input.iter()) {
                assert!((a * scale - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn backward_discards_unrepresentable_imaginary_parts() {
        let n = 8;
        let mut fft = RealGridFft::<f32>::new(n);
        let mut spectrum = vec![Complex::new(0.0f32, 0.0); 5];
        spectrum[0] = Complex::new(8.0, 3.0);
        spectrum[4] = Complex::new(0.0, -1.0);
        let mut grid = vec![0.0f32; n];
        fft.backward(&mut spectrum, &mut grid).unwrap();
        for v in grid {
            assert!((v - 8.0).abs() < 1e-5);
        }
    }

    #[test]
    fn wrong_grid_length_names_the_grid() {
        let mut fft = RealGridFft::<f64>::new(12);
        let mut spectrum = vec![Complex::new(0.0, 0.0); 7];
        let mut grid = vec![0.0; 11];
        assert_eq!(
            fft.backward(&mut spectrum, &mut grid),
            Err(NufftError::ShapeMismatch {
                buffer: Buffer::Grid,
                expected: 12,
                actual: 11
            })
        );
        assert_eq!(
            fft.forward(&mut grid, &mut spectrum).unwrap_err().to_string(),
            "grid buffer has length 11, expected 12"
        );
    }

    #[test]
    fn spectrum_length_is_half_plus_one() {
        assert_eq!(RealGridFft::<f64>::new(10).spectrum_len(), 6);
        assert_eq!(RealGridFft::<f64>::new(9).spectrum_len(), 5);
    }
}
