//! Special functions used by the kernel family. Everything here runs in `f64`.

/// Terms below this fraction of the running sum end a power series.
const SERIES_TOLERANCE: f64 = 1e-17;

/// Hard cap on power series terms.
const MAX_SERIES_TERMS: usize = 500;

/// Modified Bessel function of the first kind, order zero.
///
/// Uses the power series `Σ (x²/4)^k / (k!)²`. All terms are positive so the
/// sum is accurate for every argument the kernels produce (up to a few hundred).
pub fn bessel_i0(x: f64) -> f64 {
    let y = x * x / 4.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..MAX_SERIES_TERMS {
        let kf = k as f64;
        term *= y / (kf * kf);
        sum += term;
        if term < sum * SERIES_TOLERANCE && kf * kf > y {
            break;
        }
    }
    sum
}

/// Bessel function of the first kind, order zero.
///
/// Alternating power series; only used for the moderate arguments that
/// appear past the kernel cutoff frequency (`|x| ≲ M`).
pub fn bessel_j0(x: f64) -> f64 {
    let y = x * x / 4.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..MAX_SERIES_TERMS {
        let kf = k as f64;
        term *= -y / (kf * kf);
        sum += term;
        if term.abs() < SERIES_TOLERANCE * sum.abs().max(1e-300) && kf * kf > y {
            break;
        }
    }
    sum
}

/// `sinh(m·√z2) / √z2`, continued analytically to `sin(m·√-z2) / √-z2` for
/// negative `z2` and to `m` at zero.
pub fn sinh_ratio(m: f64, z2: f64) -> f64 {
    if z2 > 0.0 {
        let z = z2.sqrt();
        (m * z).sinh() / z
    } else if z2 < 0.0 {
        let z = (-z2).sqrt();
        (m * z).sin() / z
    } else {
        m
    }
}

/// `I0(m·√z2)`, continued to `J0(m·√-z2)` for negative `z2`.
pub fn bessel_i0_continued(m: f64, z2: f64) -> f64 {
    if z2 >= 0.0 {
        bessel_i0(m * z2.sqrt())
    } else {
        bessel_j0(m * (-z2).sqrt())
    }
}

/// `sin(x) / x` with the removable singularity filled in.
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-8 {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}
