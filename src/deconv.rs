//! Deconvolution and truncation between the oversampled spectrum and the
//! `N` logical modes.
//!
//! Spreading multiplies the spectrum by the kernel transform `Φ`; dividing by
//! `Φ(2πk/Nσ)` at each retained mode undoes it. Since the grid transforms are
//! unnormalized in both directions, `1/Φ` is the whole per-mode scale.

use core::f64::consts::TAU;

use rustfft::num_complex::Complex;

use crate::error::ConfigError;
use crate::kernel::SpreadingKernel;
use crate::num::{DataKind, Float};

/// Ordering of the logical modes in complex spectra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrequencyOrder {
    /// `0, 1, …, ⌈N/2⌉-1, -⌊N/2⌋, …, -1`, as returned by FFTs.
    #[default]
    Fft,
    /// `-⌊N/2⌋, …, ⌈N/2⌉-1`, increasing.
    Centered,
}

impl FrequencyOrder {
    /// Logical frequency stored at `slot` of an `n`-mode complex spectrum.
    pub fn frequency(self, slot: usize, n: usize) -> i64 {
        let half = (n / 2) as i64;
        let slot = slot as i64;
        let n = n as i64;
        match self {
            FrequencyOrder::Fft => {
                if slot < n - half {
                    slot
                } else {
                    slot - n
                }
            }
            FrequencyOrder::Centered => slot - half,
        }
    }
}

/// Per-slot oversampled index and correction weight.
#[derive(Debug, Clone)]
pub struct Deconvolver<T> {
    frequencies: Vec<i64>,
    slots: Vec<usize>,
    weights: Vec<T>,
    amplification: f64,
}

impl<T: Float> Deconvolver<T> {
    /// Precompute the weights for `n` modes on a grid of `grid_size` cells.
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedKernel`] when a correction factor is not
    /// positive, or when the spread between the largest and smallest factor
    /// would swamp the precision `T` (`max/min ≥ 1/ε`).
    pub fn new(
        kernel: &dyn SpreadingKernel,
        n: usize,
        grid_size: usize,
        kind: DataKind,
        order: FrequencyOrder,
    ) -> Result<Self, ConfigError> {
        let len = kind.spectrum_len(n);
        let frequencies: Vec<i64> = (0..len)
            .map(|slot| match kind {
                DataKind::Real => slot as i64,
                DataKind::Complex => order.frequency(slot, n),
            })
            .collect();

        let unsupported = |amplification: f64| ConfigError::UnsupportedKernel {
            kernel: kernel.kind(),
            precision: T::NAME,
            amplification,
        };

        let mut slots = Vec::with_capacity(len);
        let mut weights = Vec::with_capacity(len);
        let mut largest = 0.0f64;
        let mut smallest = f64::INFINITY;
        for &k in &frequencies {
            let xi = TAU * k as f64 / grid_size as f64;
            let phi = kernel.fourier_correction(xi);
            if !(phi > 0.0) || !phi.is_finite() {
                return Err(unsupported(f64::INFINITY));
            }
            largest = largest.max(phi);
            smallest = smallest.min(phi);
            let slot = if k < 0 {
                (grid_size as i64 + k) as usize
            } else {
                k as usize
            };
            slots.push(slot);
            weights.push(T::narrow(1.0 / phi));
        }

        let amplification = if len == 0 { 1.0 } else { largest / smallest };
        if amplification * T::epsilon_f64() >= 1.0 {
            return Err(unsupported(amplification));
        }
        Ok(Self {
            frequencies,
            slots,
            weights,
            amplification,
        })
    }

    /// Logical frequency of each output slot.
    pub fn frequencies(&self) -> &[i64] {
        &self.frequencies
    }

    /// `1/Φ` per output slot.
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Ratio between the largest and smallest correction factor.
    pub fn amplification(&self) -> f64 {
        self.amplification
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Type-1: pick the retained modes out of the oversampled spectrum and
    /// correct them.
    pub fn truncate(&self, spectrum: &[Complex<T>], out: &mut [Complex<T>]) {
        for ((o, &slot), &w) in out.iter_mut().zip(&self.slots).zip(&self.weights) {
            *o = spectrum[slot] * w;
        }
    }

    /// Type-2: zero the oversampled spectrum and place the corrected modes.
    pub fn pad(&self, input: &[Complex<T>], spectrum: &mut [Complex<T>]) {
        spectrum.fill(Complex::new(T::zero(), T::zero()));
        for ((i, &slot), &w) in input.iter().zip(&self.slots).zip(&self.weights) {
            spectrum[slot] = *i * w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::KernelKind;

    #[test]
    fn fft_and_centered_orders() {
        let fft: Vec<i64> = (0..6).map(|s| FrequencyOrder::Fft.frequency(s, 6)).collect();
        assert_eq!(fft, vec![0, 1, 2, -3, -2, -1]);
        let centered: Vec<i64> = (0..6)
            .map(|s| FrequencyOrder::Centered.frequency(s, 6))
            .collect();
        assert_eq!(centered, vec![-3, -2, -1, 0, 1, 2]);
        let odd: Vec<i64> = (0..5).map(|s| FrequencyOrder::Fft.frequency(s, 5)).collect();
        assert_eq!(odd, vec![0, 1, 2, -2, -1]);
        let odd: Vec<i64> = (0..5)
            .map(|s| FrequencyOrder::Centered.frequency(s, 5))
            .collect();
        assert_eq!(odd, vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    fn slots_wrap_negative_frequencies() {
        let kernel = KernelKind::Gaussian.build(4, 2.0);
        let d = Deconvolver::<f64>::new(&*kernel, 4, 8, DataKind::Complex, FrequencyOrder::Fft)
            .unwrap();
        assert_eq!(d.slots, vec![0, 1, 6, 7]);
        assert_eq!(d.frequencies(), &[0, 1, -2, -1]);
        let real = Deconvolver::<f64>::new(&*kernel, 4, 8, DataKind::Real, FrequencyOrder::Centered)
            .unwrap();
        assert_eq!(real.slots, vec![0, 1, 2]);
    }

    #[test]
    fn weights_are_positive_and_symmetric() {
        for kind in KernelKind::ALL {
            let kernel = kind.build(6, 1.25);
            let d = Deconvolver::<f64>::new(&*kernel, 64, 80, DataKind::Complex, FrequencyOrder::Centered)
                .unwrap();
            assert!(d.weights().iter().all(|&w| w > 0.0 && w.is_finite()));
            // Frequencies -31..=31 pair up around the center slot 32.
            for i in 1..32 {
                let a = d.weights()[32 + i];
                let b = d.weights()[32 - i];
                assert!((a - b).abs() <= 1e-14 * a);
            }
            assert!(d.amplification() >= 1.0);
        }
    }

    #[test]
    fn truncate_and_pad_are_transposes() {
        let kernel = KernelKind::KaiserBessel.build(3, 2.0);
        let d = Deconvolver::<f64>::new(&*kernel, 5, 12, DataKind::Complex, FrequencyOrder::Fft)
            .unwrap();
        let big: Vec<Complex<f64>> = (0..12).map(|i| Complex::new(i as f64, 1.0)).collect();
        let mut small = vec![Complex::new(0.0, 0.0); 5];
        d.truncate(&big, &mut small);
        assert_eq!(small[3].re, 10.0 * d.weights()[3]);
        let mut back = vec![Complex::new(9.0, 9.0); 12];
        d.pad(&small, &mut back);
        assert_eq!(back[5], Complex::new(0.0, 0.0));
        assert_eq!(back[11], small[4] * d.weights()[4]);
    }

    #[test]
    fn rejects_non_positive_corrections() {
        // σ = 1 pushes the Kaiser-Bessel transform past its first zero.
        let kernel = KernelKind::KaiserBessel.build(8, 1.0);
        let err = Deconvolver::<f64>::new(&*kernel, 64, 64, DataKind::Complex, FrequencyOrder::Fft)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedKernel { .. }));
    }

    #[test]
    fn dynamic_range_depends_on_precision() {
        let kernel = KernelKind::Gaussian.build(16, 1.0);
        assert!(
            Deconvolver::<f32>::new(&*kernel, 64, 64, DataKind::Complex, FrequencyOrder::Fft)
                .is_err()
        );
        assert!(
            Deconvolver::<f64>::new(&*kernel, 64, 64, DataKind::Complex, FrequencyOrder::Fft)
                .is_ok()
        );
    }
}
