use core::fmt;

use crate::kernel::KernelKind;

/// Invalid plan configuration, reported before any state is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The number of uniform modes `N` was zero.
    ZeroSize,
    /// The kernel half-support `M` was zero.
    ZeroHalfSupport,
    /// The kernel half-support exceeds what the tables support.
    HalfSupportTooLarge { half_support: usize, max: usize },
    /// The oversampling factor was below one, NaN or infinite.
    InvalidOversampling(f64),
    /// `σ·N` does not describe an allocatable grid.
    GridTooLarge { requested: f64 },
    /// The kernel cannot be deconvolved reliably in the requested precision.
    ///
    /// `amplification` is the ratio between the largest and smallest
    /// correction factor (infinite when a factor is not positive).
    UnsupportedKernel {
        kernel: KernelKind,
        precision: &'static str,
        amplification: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSize => write!(f, "number of modes must be at least 1"),
            ConfigError::ZeroHalfSupport => write!(f, "kernel half-support must be at least 1"),
            ConfigError::HalfSupportTooLarge { half_support, max } => write!(
                f,
                "kernel half-support {} exceeds the supported maximum {}",
                half_support, max
            ),
            ConfigError::InvalidOversampling(sigma) => {
                write!(f, "oversampling factor must be finite and >= 1, got {}", sigma)
            }
            ConfigError::GridTooLarge { requested } => {
                write!(f, "oversampled grid of {} cells is too large", requested)
            }
            ConfigError::UnsupportedKernel {
                kernel,
                precision,
                amplification,
            } if amplification.is_finite() => write!(
                f,
                "{} kernel amplifies {} rounding by {:e} during deconvolution",
                kernel, precision, amplification
            ),
            ConfigError::UnsupportedKernel {
                kernel, precision, ..
            } => write!(
                f,
                "{} kernel has non-positive Fourier correction factors ({})",
                kernel, precision
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Caller buffer named in a [`NufftError::ShapeMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// Non-uniform values passed to type-1.
    Values,
    /// Uniform spectrum passed to type-2.
    Spectrum,
    /// Output buffer of either direction.
    Output,
    /// Oversampled grid handed to a grid transform.
    Grid,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Buffer::Values => "values",
            Buffer::Spectrum => "spectrum",
            Buffer::Output => "output",
            Buffer::Grid => "grid",
        };
        f.write_str(name)
    }
}

/// Errors returned by plan construction and execution.
#[derive(Debug, Clone, PartialEq)]
pub enum NufftError {
    Config(ConfigError),
    /// A coordinate was NaN, infinite or outside `[0, 2π)`.
    Domain { index: usize, value: f64 },
    ShapeMismatch {
        buffer: Buffer,
        expected: usize,
        actual: usize,
    },
    /// An execution was requested before `set_points`.
    PointsNotSet,
    /// The FFT backend rejected a call.
    Backend(String),
}

impl fmt::Display for NufftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NufftError::Config(e) => write!(f, "invalid configuration: {}", e),
            NufftError::Domain { index, value } => write!(
                f,
                "coordinate {} at index {} is outside [0, 2π)",
                value, index
            ),
            NufftError::ShapeMismatch {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{} buffer has length {}, expected {}",
                buffer, actual, expected
            ),
            NufftError::PointsNotSet => write!(f, "no points set on plan"),
            NufftError::Backend(msg) => write!(f, "fft backend error: {}", msg),
        }
    }
}

impl std::error::Error for NufftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NufftError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for NufftError {
    fn from(e: ConfigError) -> Self {
        NufftError::Config(e)
    }
}

/// Ensure a caller buffer has the expected length.
pub(crate) fn check_len(buffer: Buffer, expected: usize, actual: usize) -> Result<(), NufftError> {
    if expected == actual {
        Ok(())
    } else {
        Err(NufftError::ShapeMismatch {
            buffer,
            expected,
            actual,
        })
    }
}
