//! Spreading kernels.
//!
//! Every kernel is described twice: by its real-space profile `φ(d)`, with `d`
//! measured in oversampled grid cells and support `[-M, M]`, and by its
//! continuous Fourier transform `Φ(ξ)`, sampled at the grid frequencies
//! `ξ = 2πk / Nσ` during deconvolution.
//!
//! Parameters follow the usual gridding literature. The oversampling factor
//! passed to [`KernelKind::build`] is the *effective* factor `Nσ / N`.

use core::f64::consts::PI;
use core::fmt;

use crate::special::{bessel_i0, bessel_i0_continued, sinc, sinh_ratio};

/// Largest half-support accepted by plans.
pub const MAX_HALF_SUPPORT: usize = 16;

/// Shape parameter scale for [`KernelKind::KaiserBessel`].
const KAISER_BESSEL_GAMMA: f64 = 0.98;

/// Shape parameter scale for [`KernelKind::BackwardsKaiserBessel`].
const BACKWARDS_KAISER_BESSEL_GAMMA: f64 = 0.995;

/// Extra polynomial degree, beyond `M`, used to tabulate smooth kernels.
const SMOOTH_DEGREE_PAD: usize = 4;

/// Kernel family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelKind {
    KaiserBessel,
    /// Kaiser-Bessel with real and Fourier space swapped: cheap `sinh` in real
    /// space, Bessel `I0` only in the deconvolution factors.
    #[default]
    BackwardsKaiserBessel,
    Gaussian,
    BSpline,
}

impl KernelKind {
    pub const ALL: [KernelKind; 4] = [
        KernelKind::KaiserBessel,
        KernelKind::BackwardsKaiserBessel,
        KernelKind::Gaussian,
        KernelKind::BSpline,
    ];

    /// Instantiate the kernel for half-support `half_support` and effective
    /// oversampling `oversampling`.
    pub fn build(self, half_support: usize, oversampling: f64) -> Box<dyn SpreadingKernel> {
        match self {
            KernelKind::KaiserBessel => Box::new(KaiserBessel::new(half_support, oversampling)),
            KernelKind::BackwardsKaiserBessel => {
                Box::new(BackwardsKaiserBessel::new(half_support, oversampling))
            }
            KernelKind::Gaussian => Box::new(Gaussian::new(half_support, oversampling)),
            KernelKind::BSpline => Box::new(BSpline::new(half_support)),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KernelKind::KaiserBessel => "Kaiser-Bessel",
            KernelKind::BackwardsKaiserBessel => "backwards Kaiser-Bessel",
            KernelKind::Gaussian => "Gaussian",
            KernelKind::BSpline => "B-spline",
        };
        f.write_str(name)
    }
}

/// A real-space window together with its Fourier transform.
pub trait SpreadingKernel: Send + Sync + fmt::Debug {
    fn kind(&self) -> KernelKind;

    /// Half-support `M` in grid cells.
    fn half_support(&self) -> usize;

    /// Kernel value at distance `d` (in cells). Zero outside `[-M, M]`.
    fn eval(&self, d: f64) -> f64;

    /// Continuous Fourier transform at angular frequency `xi` (radians per cell).
    fn fourier_correction(&self, xi: f64) -> f64;

    /// Degree of the per-offset polynomials used to tabulate the kernel.
    fn polynomial_degree(&self) -> usize {
        self.half_support() + SMOOTH_DEGREE_PAD
    }
}

/// `β = γ·π·M·(2 - 1/σ)`.
fn shape_parameter(gamma: f64, half_support: usize, oversampling: f64) -> f64 {
    gamma * PI * half_support as f64 * (2.0 - 1.0 / oversampling)
}

/// `1 - (d/M)²`, clamped at zero.
#[inline]
fn support_fraction(d: f64, m: f64) -> f64 {
    let r = d / m;
    (1.0 - r * r).max(0.0)
}

#[derive(Debug, Clone)]
pub struct KaiserBessel {
    half_support: usize,
    beta: f64,
    /// `β / M`, the cutoff frequency of the transform.
    cutoff: f64,
    norm: f64,
}

impl KaiserBessel {
    pub fn new(half_support: usize, oversampling: f64) -> Self {
        let beta = shape_parameter(KAISER_BESSEL_GAMMA, half_support, oversampling);
        Self {
            half_support,
            beta,
            cutoff: beta / half_support as f64,
            norm: bessel_i0(beta),
        }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl SpreadingKernel for KaiserBessel {
    fn kind(&self) -> KernelKind {
        KernelKind::KaiserBessel
    }

    fn half_support(&self) -> usize {
        self.half_support
    }

    fn eval(&self, d: f64) -> f64 {
        let m = self.half_support as f64;
        if d.abs() > m {
            return 0.0;
        }
        bessel_i0(self.beta * support_fraction(d, m).sqrt()) / self.norm
    }

    fn fourier_correction(&self, xi: f64) -> f64 {
        let m = self.half_support as f64;
        2.0 * sinh_ratio(m, self.cutoff * self.cutoff - xi * xi) / self.norm
    }
}

#[derive(Debug, Clone)]
pub struct BackwardsKaiserBessel {
    half_support: usize,
    beta: f64,
    cutoff: f64,
    /// `sinh(β)`, so that `φ(0) = 1`.
    norm: f64,
}

impl BackwardsKaiserBessel {
    pub fn new(half_support: usize, oversampling: f64) -> Self {
        let beta = shape_parameter(BACKWARDS_KAISER_BESSEL_GAMMA, half_support, oversampling);
        Self {
            half_support,
            beta,
            cutoff: beta / half_support as f64,
            norm: beta.sinh(),
        }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl SpreadingKernel for BackwardsKaiserBessel {
    fn kind(&self) -> KernelKind {
        KernelKind::BackwardsKaiserBessel
    }

    fn half_support(&self) -> usize {
        self.half_support
    }

    fn eval(&self, d: f64) -> f64 {
        let m = self.half_support as f64;
        if d.abs() > m {
            return 0.0;
        }
        let s = support_fraction(d, m).sqrt();
        if s == 0.0 {
            self.beta / self.norm
        } else {
            (self.beta * s).sinh() / (s * self.norm)
        }
    }

    fn fourier_correction(&self, xi: f64) -> f64 {
        let m = self.half_support as f64;
        PI * m * bessel_i0_continued(m, self.cutoff * self.cutoff - xi * xi) / self.norm
    }
}

/// Truncated Gaussian `exp(-d²/τ)`.
#[derive(Debug, Clone)]
pub struct Gaussian {
    half_support: usize,
    tau: f64,
}

impl Gaussian {
    pub fn new(half_support: usize, oversampling: f64) -> Self {
        let m = half_support as f64;
        let tau = 2.0 * oversampling * m / ((2.0 * oversampling - 1.0) * PI);
        Self { half_support, tau }
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }
}

impl SpreadingKernel for Gaussian {
    fn kind(&self) -> KernelKind {
        KernelKind::Gaussian
    }

    fn half_support(&self) -> usize {
        self.half_support
    }

    fn eval(&self, d: f64) -> f64 {
        if d.abs() > self.half_support as f64 {
            return 0.0;
        }
        (-d * d / self.tau).exp()
    }

    fn fourier_correction(&self, xi: f64) -> f64 {
        (PI * self.tau).sqrt() * (-self.tau * xi * xi / 4.0).exp()
    }
}

/// Centered cardinal B-spline of order `2M`.
///
/// Piecewise polynomial of degree `2M - 1` with knots on the grid nodes, so the
/// per-offset tables represent it exactly.
#[derive(Debug, Clone)]
pub struct BSpline {
    half_support: usize,
}

impl BSpline {
    pub fn new(half_support: usize) -> Self {
        Self { half_support }
    }

    fn order(&self) -> usize {
        2 * self.half_support
    }
}

/// Cardinal B-spline of `order` supported on `[0, order]`, evaluated with the
/// Cox-de Boor recursion on integer knots.
fn cardinal_bspline(order: usize, y: f64) -> f64 {
    if order == 0 || y <= 0.0 || y >= order as f64 {
        return 0.0;
    }
    let mut vals = [0.0f64; 2 * MAX_HALF_SUPPORT];
    let vals = &mut vals[..order];
    for (i, v) in vals.iter_mut().enumerate() {
        let z = y - i as f64;
        *v = if (0.0..1.0).contains(&z) { 1.0 } else { 0.0 };
    }
    for k in 2..=order {
        let kf = k as f64;
        for i in 0..=(order - k) {
            let z = y - i as f64;
            vals[i] = (z * vals[i] + (kf - z) * vals[i + 1]) / (kf - 1.0);
        }
    }
    vals[0]
}

impl SpreadingKernel for BSpline {
    fn kind(&self) -> KernelKind {
        KernelKind::BSpline
    }

    fn half_support(&self) -> usize {
        self.half_support
    }

    fn eval(&self, d: f64) -> f64 {
        cardinal_bspline(self.order(), d + self.half_support as f64)
    }

    fn fourier_correction(&self, xi: f64) -> f64 {
        sinc(xi / 2.0).powi(self.order() as i32)
    }

    fn polynomial_degree(&self) -> usize {
        self.order() - 1
    }
}
