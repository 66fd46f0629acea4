//! Plan factory that shares setup work between plans.

use std::collections::VecDeque;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::error::NufftError;
use crate::fft::FftPlanners;
use crate::kernel::{KernelKind, SpreadingKernel};
use crate::num::{Float, Sample};
use crate::plan::{NufftConfig, NufftPlan};
use crate::window::{build_window, KernelEvaluation, Window};

/// Maximum number of kernel tables kept by a planner. The oldest entry is
/// evicted first.
pub const MAX_CACHED_TABLES: usize = 32;

/// Everything that determines a kernel and its tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TableKey {
    kind: KernelKind,
    half_support: usize,
    size: usize,
    grid_size: usize,
    evaluation: KernelEvaluation,
}

struct CachedTable<T: Float> {
    kernel: Arc<dyn SpreadingKernel>,
    window: Arc<dyn Window<T>>,
}

/// Builds [`NufftPlan`]s, caching kernel tables and FFT handles so that plans
/// sharing a configuration (or only a grid size) are cheap to create.
pub struct NufftPlanner<T: Float> {
    ffts: FftPlanners<T>,
    tables: HashMap<TableKey, CachedTable<T>>,
    order: VecDeque<TableKey>,
}

impl<T: Float> Default for NufftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> NufftPlanner<T> {
    pub fn new() -> Self {
        Self {
            ffts: FftPlanners::new(),
            tables: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Build a plan for `n` modes with sample type `S`.
    ///
    /// # Errors
    /// See [`NufftPlan::new`].
    pub fn plan<S: Sample<T>>(
        &mut self,
        n: usize,
        config: &NufftConfig,
    ) -> Result<NufftPlan<T, S>, NufftError> {
        let grid_size = config.grid_size(n)?;
        let key = TableKey {
            kind: config.kernel,
            half_support: config.half_support,
            size: n,
            grid_size,
            evaluation: config.evaluation,
        };
        let (kernel, window) = self.tables(key);
        let fft = S::plan_fft(&mut self.ffts, grid_size);
        NufftPlan::from_parts(n, grid_size, config.clone(), kernel, window, fft)
    }

    /// Number of kernel tables currently cached.
    pub fn cached_tables(&self) -> usize {
        self.tables.len()
    }

    /// Drop every cached table and FFT handle.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.order.clear();
        self.ffts = FftPlanners::new();
    }

    fn tables(&mut self, key: TableKey) -> (Arc<dyn SpreadingKernel>, Arc<dyn Window<T>>) {
        if let Some(hit) = self.tables.get(&key) {
            let found = (Arc::clone(&hit.kernel), Arc::clone(&hit.window));
            self.order.retain(|k| *k != key);
            self.order.push_back(key);
            return found;
        }

        let oversampling = key.grid_size as f64 / key.size as f64;
        let kernel: Arc<dyn SpreadingKernel> =
            Arc::from(key.kind.build(key.half_support, oversampling));
        let window = build_window::<T>(Arc::clone(&kernel), key.evaluation);
        nufft_debug!(
            "built {} table: M={} effective sigma={:.4}",
            key.kind,
            key.half_support,
            oversampling
        );
        if self.tables.len() == MAX_CACHED_TABLES {
            if let Some(old) = self.order.pop_front() {
                self.tables.remove(&old);
            }
        }
        self.tables.insert(
            key,
            CachedTable {
                kernel: Arc::clone(&kernel),
                window: Arc::clone(&window),
            },
        );
        self.order.push_back(key);
        (kernel, window)
    }
}
