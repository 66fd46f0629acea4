//! Prints the planner and execution log records.
//!
//! Run with `cargo run --example verbose_logging --features verbose-logging`.

use kofft_nufft::{Complex32, KernelKind, NufftPlan};

fn main() -> Result<(), kofft_nufft::NufftError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let mut plan = NufftPlan::<f32, Complex32>::with_kernel(128, 6, 2.0, KernelKind::Gaussian)?;
    let x: Vec<f32> = (0..512).map(|j| (j as f32 * 0.0123) % 6.28).collect();
    let v = vec![Complex32::new(1.0, 0.0); x.len()];
    plan.set_points(&x)?;
    let mut modes = vec![Complex32::new(0.0, 0.0); plan.spectrum_len()];
    plan.exec_type1(&mut modes, &v)?;
    println!("|û(0)| = {}", modes[0].norm());
    Ok(())
}
