//! Runtime tuning for the parallel spreading and interpolation paths.
//!
//! Every knob can be set through an environment variable (read once) or a
//! setter (takes precedence). A value of `0` means "no override".
//!
//! `KOFFT_NUFFT_THREADS` only feeds the default threshold
//! (`4096 × threads`); the work itself runs on Rayon's global pool, which is
//! sized with `RAYON_NUM_THREADS` or `rayon::ThreadPoolBuilder`.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Points each core should own before going parallel.
const DEFAULT_PER_CORE_POINTS: usize = 4096;

/// Points per private spreading buffer.
const DEFAULT_BLOCK_POINTS: usize = 2048;

static PARALLEL_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static BLOCK_POINTS_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static PARALLEL_ENV: OnceLock<ParallelEnv> = OnceLock::new();

struct ParallelEnv {
    threshold: usize,
    block_points: usize,
    threads: usize,
}

fn env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(0) => None,
        Ok(v) => Some(v),
        Err(_) => {
            nufft_debug!("ignoring {}={:?}: not a positive integer", name, raw);
            None
        }
    }
}

fn parallel_env() -> &'static ParallelEnv {
    PARALLEL_ENV.get_or_init(|| {
        let threads = env_usize("KOFFT_NUFFT_THREADS").unwrap_or_else(|| num_cpus::get().max(1));
        let env = ParallelEnv {
            threshold: env_usize("KOFFT_NUFFT_PAR_THRESHOLD")
                .unwrap_or(DEFAULT_PER_CORE_POINTS * threads),
            block_points: env_usize("KOFFT_NUFFT_BLOCK_POINTS").unwrap_or(DEFAULT_BLOCK_POINTS),
            threads,
        };
        nufft_debug!(
            "parallel knobs: threshold={} block_points={} threads={}",
            env.threshold,
            env.block_points,
            env.threads
        );
        env
    })
}

/// Set the minimum number of points before spreading and interpolation run in
/// parallel.
///
/// Passing `0` reverts to `KOFFT_NUFFT_PAR_THRESHOLD` or the built-in
/// heuristic (`4096` points per thread, with the thread count taken from
/// `KOFFT_NUFFT_THREADS` or the number of CPUs). Neither changes how many
/// Rayon workers run.
pub fn set_parallel_threshold(points: usize) {
    PARALLEL_THRESHOLD_OVERRIDE.store(points, Ordering::Relaxed);
}

/// Set the number of points per spreading block. `0` reverts to
/// `KOFFT_NUFFT_BLOCK_POINTS` or the default of 2048.
pub fn set_spread_block_points(points: usize) {
    BLOCK_POINTS_OVERRIDE.store(points, Ordering::Relaxed);
}

pub(crate) fn parallel_threshold() -> usize {
    match PARALLEL_THRESHOLD_OVERRIDE.load(Ordering::Relaxed) {
        0 => parallel_env().threshold,
        v => v,
    }
}

pub(crate) fn spread_block_points() -> usize {
    match BLOCK_POINTS_OVERRIDE.load(Ordering::Relaxed) {
        0 => parallel_env().block_points,
        v => v,
    }
}

pub(crate) fn should_parallelize(points: usize) -> bool {
    points >= parallel_threshold()
}

/// Expose the effective threshold so integration tests can verify the
/// environment handling.
#[doc(hidden)]
pub fn __test_parallel_threshold() -> usize {
    parallel_threshold()
}

#[doc(hidden)]
pub fn __test_spread_block_points() -> usize {
    spread_block_points()
}
