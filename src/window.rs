//! Per-point kernel weights.
//!
//! A point at fractional offset `δ ∈ [0, 1)` from its cell touches `2M` grid
//! nodes; node `j` (counting from the leftmost) sits at kernel distance
//! `δ + M - 1 - j`. [`PolynomialWindow`] tabulates, for each `j`, a polynomial
//! in `δ` that reproduces the kernel on that unit interval, so computing all
//! weights of a point costs `2M·(D + 1)` fused multiply-adds and no
//! transcendental calls.

use core::f64::consts::PI;
use std::sync::Arc;

use crate::kernel::SpreadingKernel;
use crate::num::Float;

/// How kernel weights are produced during spreading and interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelEvaluation {
    /// Precomputed per-offset polynomial tables.
    #[default]
    Polynomial,
    /// Evaluate the kernel function for every weight. Slow, mainly useful to
    /// validate the tables.
    Direct,
}

/// Computes the `2M` weights of a point from its fractional offset.
pub trait Window<T: Float>: Send + Sync {
    /// Number of grid nodes touched by one point (`2M`).
    fn width(&self) -> usize;

    /// Fill `out` (length [`width`](Window::width)) with the weights for a
    /// point at fractional offset `delta ∈ [0, 1)`.
    fn weights(&self, delta: T, out: &mut [T]);
}

/// Build the window for `kernel` in the requested evaluation mode.
pub fn build_window<T: Float>(
    kernel: Arc<dyn SpreadingKernel>,
    evaluation: KernelEvaluation,
) -> Arc<dyn Window<T>> {
    match evaluation {
        KernelEvaluation::Polynomial => Arc::new(PolynomialWindow::<T>::fit(&*kernel)),
        KernelEvaluation::Direct => Arc::new(DirectWindow { kernel }),
    }
}

/// Kernel distance of node `j` for a point at offset `delta`.
#[inline(always)]
fn node_distance(delta: f64, half_support: usize, j: usize) -> f64 {
    delta + half_support as f64 - 1.0 - j as f64
}

/// Per-offset polynomial tables.
///
/// Coefficients are stored power-major: row `p` holds the coefficient of
/// `t^(D-p)` for every node, so Horner's rule runs across a contiguous row.
/// The polynomial variable is `t = 2δ - 1 ∈ [-1, 1)`.
#[derive(Debug, Clone)]
pub struct PolynomialWindow<T> {
    width: usize,
    degree: usize,
    coeffs: Vec<T>,
}

impl<T: Float> PolynomialWindow<T> {
    /// Fit the tables by Chebyshev interpolation in `f64`.
    pub fn fit(kernel: &dyn SpreadingKernel) -> Self {
        let m = kernel.half_support();
        let width = 2 * m;
        let degree = kernel.polynomial_degree();
        let mut coeffs = vec![T::zero(); width * (degree + 1)];
        for j in 0..width {
            let mono = chebyshev_fit(degree, |t| {
                kernel.eval(node_distance((t + 1.0) / 2.0, m, j))
            });
            // `mono[p]` multiplies `t^p`; store highest power first.
            for (p, c) in mono.iter().enumerate() {
                coeffs[(degree - p) * width + j] = T::narrow(*c);
            }
        }
        Self {
            width,
            degree,
            coeffs,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl<T: Float> Window<T> for PolynomialWindow<T> {
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn weights(&self, delta: T, out: &mut [T]) {
        let w = self.width;
        let two = T::one() + T::one();
        let t = two * delta - T::one();
        let (lead, rest) = self.coeffs.split_at(w);
        out[..w].copy_from_slice(lead);
        for row in rest.chunks_exact(w) {
            for (o, &c) in out.iter_mut().zip(row) {
                *o = *o * t + c;
            }
        }
    }
}

/// Evaluates the kernel function directly for every weight.
#[derive(Debug)]
pub struct DirectWindow {
    kernel: Arc<dyn SpreadingKernel>,
}

impl<T: Float> Window<T> for DirectWindow {
    fn width(&self) -> usize {
        2 * self.kernel.half_support()
    }

    fn weights(&self, delta: T, out: &mut [T]) {
        let m = self.kernel.half_support();
        let delta = delta.widen();
        for (j, o) in out.iter_mut().take(2 * m).enumerate() {
            *o = T::narrow(self.kernel.eval(node_distance(delta, m, j)));
        }
    }
}

/// Interpolate `f` on `[-1, 1]` at the `degree + 1` Chebyshev nodes and return
/// monomial coefficients (`result[p]` multiplies `t^p`).
fn chebyshev_fit(degree: usize, f: impl Fn(f64) -> f64) -> Vec<f64> {
    let n = degree + 1;
    let nf = n as f64;
    let samples: Vec<f64> = (0..n)
        .map(|k| f((PI * (k as f64 + 0.5) / nf).cos()))
        .collect();
    let mut cheb: Vec<f64> = (0..n)
        .map(|m| {
            let sum: f64 = samples
                .iter()
                .enumerate()
                .map(|(k, s)| s * (PI * m as f64 * (k as f64 + 0.5) / nf).cos())
                .sum();
            2.0 * sum / nf
        })
        .collect();
    cheb[0] /= 2.0;

    // Accumulate Σ c_m T_m(t) in the monomial basis using
    // T_{m+1} = 2t·T_m - T_{m-1}.
    let mut mono = vec![0.0; n];
    let mut prev = vec![0.0; n];
    let mut cur = vec![0.0; n];
    prev[0] = 1.0;
    mono[0] += cheb[0];
    if n > 1 {
        cur[1] = 1.0;
        mono[1] += cheb[1];
    }
    for c in cheb.iter().skip(2) {
        let mut next = vec![0.0; n];
        for p in 0..n - 1 {
            next[p + 1] += 2.0 * cur[p];
        }
        for (x, y) in next.iter_mut().zip(&prev) {
            *x -= *y;
        }
        for (x, y) in mono.iter_mut().zip(&next) {
            *x += c * y;
        }
        prev = core::mem::replace(&mut cur, next);
    }
    mono
}
