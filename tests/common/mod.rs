// Shared helpers: direct-summation references and error measures.
#![allow(dead_code)]

use core::f64::consts::TAU;

use kofft_nufft::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic generator for test inputs.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_points(rng: &mut StdRng, count: usize) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(0.0..TAU)).collect()
}

pub fn random_complex(rng: &mut StdRng, count: usize) -> Vec<Complex64> {
    (0..count)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

pub fn random_real(rng: &mut StdRng, count: usize) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// `û(k) = Σ_j v_j·e^{-ik·x_j}` for every `k` in `freqs`.
pub fn direct_type1(points: &[f64], values: &[Complex64], freqs: &[i64]) -> Vec<Complex64> {
    freqs
        .iter()
        .map(|&k| {
            points
                .iter()
                .zip(values)
                .map(|(&x, &v)| v * Complex64::from_polar(1.0, -(k as f64) * x))
                .sum()
        })
        .collect()
}

/// `v_j = Σ_k û(k)·e^{ik·x_j}` for every point.
pub fn direct_type2(points: &[f64], spectrum: &[Complex64], freqs: &[i64]) -> Vec<Complex64> {
    points
        .iter()
        .map(|&x| {
            spectrum
                .iter()
                .zip(freqs)
                .map(|(&c, &k)| c * Complex64::from_polar(1.0, k as f64 * x))
                .sum()
        })
        .collect()
}

/// Complex frequencies `-n/2..` in FFT order.
pub fn fft_frequencies(n: usize) -> Vec<i64> {
    let n = n as i64;
    (0..n).map(|i| if i < n - n / 2 { i } else { i - n }).collect()
}

/// `‖a - b‖₂ / ‖b‖₂`.
pub fn relative_l2(approx: &[Complex64], exact: &[Complex64]) -> f64 {
    assert_eq!(approx.len(), exact.len());
    let num: f64 = approx
        .iter()
        .zip(exact)
        .map(|(a, b)| (a - b).norm_sqr())
        .sum();
    let den: f64 = exact.iter().map(|b| b.norm_sqr()).sum();
    (num / den).sqrt()
}

pub fn relative_l2_real(approx: &[f64], exact: &[f64]) -> f64 {
    assert_eq!(approx.len(), exact.len());
    let num: f64 = approx.iter().zip(exact).map(|(a, b)| (a - b) * (a - b)).sum();
    let den: f64 = exact.iter().map(|b| b * b).sum();
    (num / den).sqrt()
}
