//! NUFFT plans.
//!
//! A plan fixes the number of modes `N`, the precision, the data kind and the
//! kernel configuration, and owns everything derived from them: the kernel
//! tables, deconvolution weights, grid transforms and working buffers. Points
//! are attached with [`NufftPlan::set_points`] and may be replaced at any time;
//! each execution then reuses all of that state.
//!
//! ```
//! use kofft_nufft::{Complex64, NufftConfig, NufftPlan};
//!
//! let mut plan = NufftPlan::<f64, Complex64>::new(16, &NufftConfig::default()).unwrap();
//! plan.set_points(&[0.1, 2.0, 4.5]).unwrap();
//! let values = [Complex64::new(1.0, 0.0); 3];
//! let mut spectrum = vec![Complex64::new(0.0, 0.0); plan.spectrum_len()];
//! plan.exec_type1(&mut spectrum, &values).unwrap();
//! // Mode 0 is the plain sum of the values.
//! assert!((spectrum[0].re - 3.0).abs() < 1e-4);
//! ```

use std::sync::Arc;

use rustfft::num_complex::Complex;

use crate::deconv::{Deconvolver, FrequencyOrder};
use crate::error::{check_len, Buffer, ConfigError, NufftError};
use crate::fft::GridFft;
use crate::interp::interpolate;
use crate::kernel::{KernelKind, SpreadingKernel, MAX_HALF_SUPPORT};
use crate::num::{Float, Sample};
use crate::planner::NufftPlanner;
use crate::points::PointSet;
use crate::spread::spread;
use crate::window::{KernelEvaluation, Window};

/// Default kernel half-support.
pub const DEFAULT_HALF_SUPPORT: usize = 4;

/// Default oversampling factor.
pub const DEFAULT_OVERSAMPLING: f64 = 2.0;

/// Upper bound on `σ·N`; anything larger cannot be allocated anyway.
const MAX_GRID_SIZE: f64 = (1u64 << 48) as f64;

/// Relative slack when rounding `σ·N` up, so `1.1 × 100` stays `110`.
const GRID_ROUNDING_SLACK: f64 = 1e-9;

/// Plan configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NufftConfig {
    /// Kernel half-support `M` in oversampled grid cells.
    pub half_support: usize,
    /// Requested oversampling factor `σ ≥ 1`.
    pub oversampling: f64,
    pub kernel: KernelKind,
    pub evaluation: KernelEvaluation,
    /// Sort points by grid cell in `set_points`.
    pub sort_points: bool,
    /// Ordering of complex spectra.
    pub frequency_order: FrequencyOrder,
}

impl Default for NufftConfig {
    fn default() -> Self {
        Self {
            half_support: DEFAULT_HALF_SUPPORT,
            oversampling: DEFAULT_OVERSAMPLING,
            kernel: KernelKind::default(),
            evaluation: KernelEvaluation::default(),
            sort_points: true,
            frequency_order: FrequencyOrder::default(),
        }
    }
}

impl NufftConfig {
    pub fn new(half_support: usize, oversampling: f64, kernel: KernelKind) -> Self {
        Self {
            half_support,
            oversampling,
            kernel,
            ..Self::default()
        }
    }

    pub fn with_evaluation(mut self, evaluation: KernelEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_sorting(mut self, sort_points: bool) -> Self {
        self.sort_points = sort_points;
        self
    }

    pub fn with_frequency_order(mut self, order: FrequencyOrder) -> Self {
        self.frequency_order = order;
        self
    }

    /// Check the configuration for `n` modes and return the oversampled grid
    /// size: the smallest 5-smooth integer `≥ max(⌈σN⌉, 2M)`.
    pub fn grid_size(&self, n: usize) -> Result<usize, ConfigError> {
        if n == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.half_support == 0 {
            return Err(ConfigError::ZeroHalfSupport);
        }
        if self.half_support > MAX_HALF_SUPPORT {
            return Err(ConfigError::HalfSupportTooLarge {
                half_support: self.half_support,
                max: MAX_HALF_SUPPORT,
            });
        }
        let sigma = self.oversampling;
        if !(sigma.is_finite() && sigma >= 1.0) {
            return Err(ConfigError::InvalidOversampling(sigma));
        }
        let exact = sigma * n as f64;
        if exact > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge { requested: exact });
        }
        let target = if (exact - exact.round()).abs() <= GRID_ROUNDING_SLACK * exact {
            exact.round()
        } else {
            exact.ceil()
        };
        let target = (target as usize).max(2 * self.half_support);
        Ok(next_smooth(target))
    }
}

fn is_smooth(mut n: usize) -> bool {
    for p in [2, 3, 5] {
        while n % p == 0 {
            n /= p;
        }
    }
    n == 1
}

/// Smallest `2^a·3^b·5^c` that is `≥ n`.
pub fn next_smooth(n: usize) -> usize {
    let mut m = n.max(1);
    while !is_smooth(m) {
        m += 1;
    }
    m
}

/// A one-dimensional NUFFT plan for precision `T` and sample type `S`
/// (`T` for real data, `Complex<T>` for complex data).
pub struct NufftPlan<T: Float, S: Sample<T>> {
    size: usize,
    grid_size: usize,
    config: NufftConfig,
    kernel: Arc<dyn SpreadingKernel>,
    window: Arc<dyn Window<T>>,
    deconv: Deconvolver<T>,
    fft: S::Fft,
    grid: Vec<S>,
    spectrum: Vec<Complex<T>>,
    points: Option<PointSet<T>>,
}

/// Plan over real-valued samples.
pub type RealNufftPlan<T> = NufftPlan<T, T>;

/// Plan over complex-valued samples.
pub type ComplexNufftPlan<T> = NufftPlan<T, Complex<T>>;

impl<T: Float, S: Sample<T>> NufftPlan<T, S> {
    /// Build a plan for `n` modes.
    ///
    /// # Errors
    /// [`NufftError::Config`] when the configuration is invalid or the kernel
    /// cannot be deconvolved in precision `T`.
    pub fn new(n: usize, config: &NufftConfig) -> Result<Self, NufftError> {
        NufftPlanner::new().plan(n, config)
    }

    /// Shorthand for [`NufftPlan::new`] with the remaining options at their
    /// defaults.
    pub fn with_kernel(
        n: usize,
        half_support: usize,
        oversampling: f64,
        kernel: KernelKind,
    ) -> Result<Self, NufftError> {
        Self::new(n, &NufftConfig::new(half_support, oversampling, kernel))
    }

    /// Assemble a plan from parts prepared by a [`NufftPlanner`].
    pub(crate) fn from_parts(
        size: usize,
        grid_size: usize,
        config: NufftConfig,
        kernel: Arc<dyn SpreadingKernel>,
        window: Arc<dyn Window<T>>,
        fft: S::Fft,
    ) -> Result<Self, NufftError> {
        let deconv = Deconvolver::new(
            &*kernel,
            size,
            grid_size,
            S::KIND,
            config.frequency_order,
        )?;
        let spectrum_len = fft.spectrum_len();
        nufft_debug!(
            "plan: n={} grid={} M={} kernel={} amplification={:.3e} precision={}",
            size,
            grid_size,
            config.half_support,
            config.kernel,
            deconv.amplification(),
            T::NAME
        );
        Ok(Self {
            size,
            grid_size,
            config,
            kernel,
            window,
            deconv,
            fft,
            grid: vec![S::zero(); grid_size],
            spectrum: vec![Complex::new(T::zero(), T::zero()); spectrum_len],
            points: None,
        })
    }

    /// Attach a new point set, replacing the previous one.
    ///
    /// # Errors
    /// [`NufftError::Domain`] if a coordinate is not finite or outside
    /// `[0, 2π)`. The previous point set is kept in that case.
    pub fn set_points(&mut self, coords: &[T]) -> Result<(), NufftError> {
        let points = PointSet::new(coords, self.grid_size, self.config.sort_points)?;
        self.points = Some(points);
        Ok(())
    }

    /// Type-1 transform: `out[i] = Σ_j values[j]·e^{-i·k_i·x_j}` for the
    /// frequencies listed by [`frequencies`](Self::frequencies).
    pub fn exec_type1(&mut self, output: &mut [Complex<T>], values: &[S]) -> Result<(), NufftError> {
        let points = self.points.as_ref().ok_or(NufftError::PointsNotSet)?;
        check_len(Buffer::Values, points.len(), values.len())?;
        check_len(Buffer::Output, self.deconv.len(), output.len())?;
        nufft_trace!("type-1 with {} points", points.len());
        if points.is_empty() {
            output.fill(Complex::new(T::zero(), T::zero()));
            return Ok(());
        }
        spread(&mut self.grid, points, values, &*self.window);
        self.fft.forward(&mut self.grid, &mut self.spectrum)?;
        self.deconv.truncate(&self.spectrum, output);
        Ok(())
    }

    /// Type-2 transform: `out[j] = Σ_i spectrum[i]·e^{+i·k_i·x_j}`.
    ///
    /// For real samples the spectrum holds modes `0..=N/2` of a Hermitian
    /// spectrum; the imaginary part of mode `0` cannot be represented and is
    /// ignored, as is that of mode `N/2` when the grid is not oversampled.
    pub fn exec_type2(&mut self, output: &mut [S], spectrum: &[Complex<T>]) -> Result<(), NufftError> {
        let points = self.points.as_ref().ok_or(NufftError::PointsNotSet)?;
        check_len(Buffer::Spectrum, self.deconv.len(), spectrum.len())?;
        check_len(Buffer::Output, points.len(), output.len())?;
        nufft_trace!("type-2 with {} points", points.len());
        if points.is_empty() {
            return Ok(());
        }
        self.deconv.pad(spectrum, &mut self.spectrum);
        self.fft.backward(&mut self.spectrum, &mut self.grid)?;
        interpolate(output, &self.grid, points, &*self.window);
        Ok(())
    }

    /// Number of uniform modes `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Oversampled grid size `Nσ`.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn half_support(&self) -> usize {
        self.config.half_support
    }

    /// Effective oversampling factor `Nσ / N`.
    pub fn oversampling(&self) -> f64 {
        self.grid_size as f64 / self.size as f64
    }

    pub fn kernel_kind(&self) -> KernelKind {
        self.kernel.kind()
    }

    pub fn kernel(&self) -> &dyn SpreadingKernel {
        &*self.kernel
    }

    pub fn config(&self) -> &NufftConfig {
        &self.config
    }

    /// Length of the spectra consumed and produced by this plan.
    pub fn spectrum_len(&self) -> usize {
        self.deconv.len()
    }

    /// Logical frequency of each spectrum slot.
    pub fn frequencies(&self) -> &[i64] {
        self.deconv.frequencies()
    }

    /// Points currently attached, or `0` if none.
    pub fn num_points(&self) -> usize {
        self.points.as_ref().map_or(0, PointSet::len)
    }

    pub fn points(&self) -> Option<&PointSet<T>> {
        self.points.as_ref()
    }
}
