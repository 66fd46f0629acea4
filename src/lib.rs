//! # kofft-nufft - Non-uniform FFTs for Rust
//!
//! One-dimensional non-uniform fast Fourier transforms on the periodic domain
//! `[0, 2π)`:
//!
//! - **Type-1** (non-uniform to uniform): `û(k) = Σ_j v_j·e^{-ik·x_j}`
//! - **Type-2** (uniform to non-uniform): `v_j = Σ_k û(k)·e^{+ik·x_j}`
//!
//! Both run in `O(N log N + M·P)` for `N` modes and `P` points by spreading
//! onto (or interpolating from) an oversampled grid with a compact kernel of
//! half-support `M`, transforming the grid, and correcting each mode by the
//! kernel's Fourier transform.
//!
//! ## Features
//!
//! - **Kernels**: Kaiser-Bessel, backwards Kaiser-Bessel, Gaussian, B-spline
//! - **Precision**: `f32` and `f64`, real or complex samples
//! - **Precomputed kernel tables**: per-offset polynomials, no transcendental
//!   calls in the hot loops
//! - **Planner caching** of kernel tables and FFT handles
//! - **Parallel spreading and interpolation** (optional)
//!
//! ## Cargo Features
//!
//! - `parallel`: spread and interpolate with Rayon above a point threshold
//! - `verbose-logging`: emit `log` records for planning and execution
//!
//! ## Example
//!
//! ```
//! use kofft_nufft::{Complex64, KernelKind, NufftPlan};
//!
//! let mut plan = NufftPlan::<f64, Complex64>::with_kernel(32, 6, 2.0, KernelKind::KaiserBessel)?;
//! plan.set_points(&[0.3, 1.7, 5.9])?;
//! let spectrum = vec![Complex64::new(1.0, 0.0); plan.spectrum_len()];
//! let mut values = vec![Complex64::new(0.0, 0.0); 3];
//! plan.exec_type2(&mut values, &spectrum)?;
//! # Ok::<(), kofft_nufft::NufftError>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#[cfg(feature = "verbose-logging")]
macro_rules! nufft_debug {
    ($($arg:tt)+) => { log::debug!(target: "kofft_nufft", $($arg)+) };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! nufft_debug {
    ($($arg:tt)+) => {
        if false {
            drop(format!($($arg)+));
        }
    };
}

#[cfg(feature = "verbose-logging")]
macro_rules! nufft_trace {
    ($($arg:tt)+) => { log::trace!(target: "kofft_nufft", $($arg)+) };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! nufft_trace {
    ($($arg:tt)+) => {
        if false {
            drop(format!($($arg)+));
        }
    };
}

/// Error types for plan construction and execution.
pub mod error;

/// Precision and sample traits.
pub mod num;

/// Bessel functions and related helpers used by the kernels.
pub mod special;

/// Spreading kernels and their Fourier transforms.
pub mod kernel;

/// Per-offset kernel tables.
pub mod window;

/// Point validation, binning and sorting.
pub mod points;

/// Complex grid transform and shared FFT planners.
pub mod fft;
/// Real grid transform.
pub mod rfft;

mod interp;
mod spread;

/// Mode correction, truncation and zero padding.
pub mod deconv;

pub mod plan;
pub mod planner;

/// Runtime tuning for the parallel paths.
#[cfg(feature = "parallel")]
pub mod parallel;

pub use deconv::FrequencyOrder;
pub use error::{Buffer, ConfigError, NufftError};
pub use kernel::{KernelKind, SpreadingKernel};
pub use num::{DataKind, Float, Sample};
pub use plan::{ComplexNufftPlan, NufftConfig, NufftPlan, RealNufftPlan};
pub use planner::NufftPlanner;
pub use points::fold_periodic;
pub use rustfft::num_complex::{Complex, Complex32, Complex64};
pub use window::KernelEvaluation;

#[cfg(feature = "parallel")]
pub use parallel::{set_parallel_threshold, set_spread_block_points};
