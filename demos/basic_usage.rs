//! Basic usage example for kofft-nufft
//!
//! Builds type-1 and type-2 plans, compares them against direct sums and
//! reuses a planner across plans.

use std::f64::consts::TAU;

use kofft_nufft::{
    Complex64, ComplexNufftPlan, FrequencyOrder, KernelKind, NufftConfig, NufftPlanner,
    RealNufftPlan,
};

fn direct_type1(x: &[f64], v: &[Complex64], freqs: &[i64]) -> Vec<Complex64> {
    freqs
        .iter()
        .map(|&k| {
            x.iter()
                .zip(v)
                .map(|(&xj, &vj)| vj * Complex64::from_polar(1.0, -(k as f64) * xj))
                .sum()
        })
        .collect()
}

fn max_error(a: &[Complex64], b: &[Complex64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== kofft-nufft Basic Usage Example ===\n");

    let n = 32;
    let x: Vec<f64> = (0..100).map(|j| (j as f64 * 0.618_033_988_75 * TAU) % TAU).collect();
    let v: Vec<Complex64> = (0..100)
        .map(|j| Complex64::new((j as f64 * 0.3).cos(), (j as f64 * 0.7).sin()))
        .collect();

    // 1. Type-1 with each kernel
    println!("1. Type-1 (non-uniform -> uniform), N = {n}, 100 points");
    for kind in KernelKind::ALL {
        let mut plan = ComplexNufftPlan::<f64>::with_kernel(n, 8, 2.0, kind)?;
        plan.set_points(&x)?;
        let mut modes = vec![Complex64::new(0.0, 0.0); n];
        plan.exec_type1(&mut modes, &v)?;
        let exact = direct_type1(&x, &v, plan.frequencies());
        println!(
            "   {:<24} grid={:<4} max error {:.2e}",
            kind.to_string(),
            plan.grid_size(),
            max_error(&modes, &exact)
        );
    }
    println!();

    // 2. Type-2 with centered frequencies
    println!("2. Type-2 (uniform -> non-uniform), centered modes");
    let config = NufftConfig::default().with_frequency_order(FrequencyOrder::Centered);
    let mut plan = ComplexNufftPlan::<f64>::new(n, &config)?;
    plan.set_points(&x[..4])?;
    let mut spectrum = vec![Complex64::new(0.0, 0.0); n];
    // A single mode k = 3 evaluates e^{3ix}.
    let slot = plan.frequencies().iter().position(|&k| k == 3).unwrap_or(0);
    spectrum[slot] = Complex64::new(1.0, 0.0);
    let mut values = vec![Complex64::new(0.0, 0.0); 4];
    plan.exec_type2(&mut values, &spectrum)?;
    for (xj, vj) in x.iter().zip(&values) {
        let exact = Complex64::from_polar(1.0, 3.0 * xj);
        println!("   x={xj:.4}  got {vj:.6}  exact {exact:.6}");
    }
    println!();

    // 3. Real samples and a shared planner
    println!("3. Real samples through a shared planner");
    let mut planner = NufftPlanner::<f64>::new();
    let config = NufftConfig::new(6, 1.5, KernelKind::KaiserBessel);
    let mut real: RealNufftPlan<f64> = planner.plan(64, &config)?;
    let _again: RealNufftPlan<f64> = planner.plan(64, &config)?;
    let samples: Vec<f64> = v.iter().map(|c| c.re).collect();
    real.set_points(&x)?;
    let mut half = vec![Complex64::new(0.0, 0.0); real.spectrum_len()];
    real.exec_type1(&mut half, &samples)?;
    println!(
        "   {} modes from {} real samples, {} cached table(s)",
        half.len(),
        samples.len(),
        planner.cached_tables()
    );
    println!("   DC = {:.6}", half[0]);

    Ok(())
}
