// Test intent: verifies the environment knobs for the parallel paths,
// including values that must be ignored.
#![cfg(feature = "parallel")]

use std::process::Command;

#[test]
fn print_threshold() {
    println!("{}", kofft_nufft::parallel::__test_parallel_threshold());
}

#[test]
fn print_block_points() {
    println!("{}", kofft_nufft::parallel::__test_spread_block_points());
}

fn run_child(test: &str, vars: &[(&str, &str)]) -> Option<usize> {
    let exe = std::env::current_exe().unwrap();
    let mut cmd = Command::new(&exe);
    cmd.args(["--exact", test, "--nocapture"])
        .env_remove("KOFFT_NUFFT_PAR_THRESHOLD")
        .env_remove("KOFFT_NUFFT_BLOCK_POINTS")
        .env_remove("KOFFT_NUFFT_THREADS");
    for (k, v) in vars {
        cmd.env(k, v);
    }
    let output = cmd.output().expect("run child test");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.lines().rev().find_map(|l| l.trim().parse().ok())
}

#[test]
fn env_threshold_is_used() {
    let t1 = run_child("print_threshold", &[("KOFFT_NUFFT_PAR_THRESHOLD", "32")]);
    assert_eq!(t1, Some(32));
    let t2 = run_child("print_threshold", &[("KOFFT_NUFFT_PAR_THRESHOLD", "64")]);
    assert_eq!(t2, Some(64));
}

#[test]
fn threads_scale_default_threshold() {
    let t = run_child("print_threshold", &[("KOFFT_NUFFT_THREADS", "3")]);
    assert_eq!(t, Some(3 * 4096));
}

#[test]
fn env_block_points_is_used() {
    let b = run_child("print_block_points", &[("KOFFT_NUFFT_BLOCK_POINTS", "512")]);
    assert_eq!(b, Some(512));
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let vars = [
        ("KOFFT_NUFFT_PAR_THRESHOLD", "not-a-number"),
        ("KOFFT_NUFFT_THREADS", "2"),
    ];
    assert_eq!(run_child("print_threshold", &vars), Some(2 * 4096));
    let zero = [("KOFFT_NUFFT_BLOCK_POINTS", "0")];
    assert_eq!(run_child("print_block_points", &zero), Some(2048));
}
