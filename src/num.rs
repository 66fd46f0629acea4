//! Numeric traits shared by every stage of the transform.
//!
//! [`Float`] selects the working precision (`f32` or `f64`) and [`Sample`]
//! selects whether the non-uniform values are real or complex. Kernel
//! parameters and tables are always derived in `f64` and narrowed once.

use core::fmt::Debug;
use core::ops::{AddAssign, Mul};

use rustfft::num_complex::Complex;
use rustfft::num_traits::{self, NumAssign, Zero};
use rustfft::FftNum;

use crate::fft::{ComplexGridFft, FftPlanners, GridFft};
use crate::rfft::RealGridFft;

/// Working precision of a plan.
pub trait Float: FftNum + num_traits::Float + NumAssign + Default + Send + Sync + 'static {
    /// Human readable name used in error messages.
    const NAME: &'static str;

    /// Convert an `f64` value into this precision, rounding if needed.
    fn narrow(x: f64) -> Self;

    /// Widen this value to `f64` without loss.
    fn widen(self) -> f64;

    /// Machine epsilon of this precision expressed in `f64`.
    fn epsilon_f64() -> f64 {
        <Self as num_traits::Float>::epsilon().widen()
    }
}

impl Float for f32 {
    const NAME: &'static str = "f32";

    #[inline(always)]
    fn narrow(x: f64) -> Self {
        x as f32
    }

    #[inline(always)]
    fn widen(self) -> f64 {
        self as f64
    }
}

impl Float for f64 {
    const NAME: &'static str = "f64";

    #[inline(always)]
    fn narrow(x: f64) -> Self {
        x
    }

    #[inline(always)]
    fn widen(self) -> f64 {
        self
    }
}

/// Whether the non-uniform values are real or complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Real values; spectra hold frequencies `0..=N/2`.
    Real,
    /// Complex values; spectra hold all `N` frequencies.
    Complex,
}

impl DataKind {
    /// Number of spectrum coefficients stored for `n` logical modes.
    pub fn spectrum_len(self, n: usize) -> usize {
        match self {
            DataKind::Real => n / 2 + 1,
            DataKind::Complex => n,
        }
    }
}

/// Element type of the non-uniform values and of the oversampled grid.
///
/// Implemented for `f32`/`f64` (real data) and `Complex<T>` (complex data).
/// The associated FFT adapter decides how the grid is transformed.
pub trait Sample<T: Float>:
    Copy + Send + Sync + Debug + Zero + AddAssign + Mul<T, Output = Self> + 'static
{
    /// Grid transform used for this kind of data.
    type Fft: GridFft<T, Self> + Send;

    const KIND: DataKind;

    /// Build the grid transform for an oversampled grid of `len` cells.
    fn plan_fft(planners: &mut FftPlanners<T>, len: usize) -> Self::Fft;
}

macro_rules! impl_real_sample {
    ($t:ty) => {
        impl Sample<$t> for $t {
            type Fft = RealGridFft<$t>;

            const KIND: DataKind = DataKind::Real;

            fn plan_fft(planners: &mut FftPlanners<$t>, len: usize) -> Self::Fft {
                RealGridFft::with_planner(planners.real(), len)
            }
        }
    };
}

impl_real_sample!(f32);
impl_real_sample!(f64);

impl<T: Float> Sample<T> for Complex<T> {
    type Fft = ComplexGridFft<T>;

    const KIND: DataKind = DataKind::Complex;

    fn plan_fft(planners: &mut FftPlanners<T>, len: usize) -> Self::Fft {
        ComplexGridFft::with_planner(planners.complex(), len)
    }
}
