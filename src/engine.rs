//! Configurable sorting engine
//!
//! [`Sorter`] picks the network layout from the input length and the
//! [`LengthPolicy`], picks an executor from the config and the input size,
//! runs every pass, and reports what it did.

use crate::config::SortConfig;
use crate::diagnostics::SortError;
use crate::exec::{Executor, PassStats};
use crate::network::{Layout, Pass, schedule};
use serde::Serialize;
use std::cmp::Ordering;

/// Summary of one sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortStats {
    pub len: usize,
    pub layout: Layout,
    pub executor: Executor,
    pub passes: usize,
    pub comparisons: usize,
    pub swaps: usize,
}

impl SortStats {
    fn new(len: usize, layout: Layout, executor: Executor) -> Self {
        Self {
            len,
            layout,
            executor,
            passes: 0,
            comparisons: 0,
            swaps: 0,
        }
    }

    fn record(&mut self, pass: PassStats) {
        self.passes += 1;
        self.comparisons += pass.comparisons;
        self.swaps += pass.swaps;
    }
}

/// Bitonic sorter built from a [`SortConfig`]
#[derive(Default)]
pub struct Sorter {
    config: SortConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Sorter {
    /// Validate `config` and build the worker pool it asks for
    pub fn new(config: SortConfig) -> Result<Self, SortError> {
        config.validate()?;

        let pool = match config.threads {
            Some(threads) if config.executor == Executor::Sequential => {
                tracing::warn!(
                    "Ignoring `threads = {}`: the sequential executor is selected",
                    threads
                );
                None
            }
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("bitonic-worker-{i}"))
                    .build()
                    .map_err(|e| SortError::ThreadPool(e.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Layout used for a sequence of length `n`
    pub fn layout_for(&self, n: usize) -> Result<Layout, SortError> {
        self.config.layout_for(n)
    }

    /// Executor used for a sequence of length `n`
    pub fn executor_for(&self, n: usize) -> Executor {
        match self.config.executor {
            Executor::Parallel if n >= self.config.parallel_threshold => Executor::Parallel,
            _ => Executor::Sequential,
        }
    }

    /// Sort `data` ascending
    pub fn sort<T>(&self, data: &mut [T]) -> Result<SortStats, SortError>
    where
        T: Ord + Send,
    {
        self.sort_by(data, T::cmp)
    }

    /// Sort `data` with `cmp` as a total order
    pub fn sort_by<T, F>(&self, data: &mut [T], cmp: F) -> Result<SortStats, SortError>
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let n = data.len();
        let layout = self.layout_for(n)?;
        let executor = self.executor_for(n);

        let span = tracing::debug_span!("sort", n, %layout, %executor);
        let _enter = span.enter();

        let stats = match &self.pool {
            Some(pool) if executor == Executor::Parallel => {
                pool.install(|| run_schedule(data, layout, executor, &cmp))
            }
            _ => run_schedule(data, layout, executor, &cmp),
        };

        tracing::debug!(
            "Sorted {} elements in {} passes ({} comparisons, {} swaps)",
            stats.len,
            stats.passes,
            stats.comparisons,
            stats.swaps
        );
        Ok(stats)
    }
}

fn run_schedule<T, F>(data: &mut [T], layout: Layout, executor: Executor, cmp: &F) -> SortStats
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let mut stats = SortStats::new(data.len(), layout, executor);
    for pass in schedule(data.len(), layout) {
        let done = executor.run_pass(data, pass, cmp);
        trace_pass(pass, done);
        stats.record(done);
    }
    stats
}

fn trace_pass(pass: Pass, stats: PassStats) {
    tracing::trace!(
        k = pass.k,
        j = pass.j,
        comparisons = stats.comparisons,
        swaps = stats.swaps,
        "pass complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LengthPolicy;

    #[test]
    fn test_default_sorter_rejects_odd_length() {
        let sorter = Sorter::default();
        let mut data = vec![2, 1, 3];
        assert!(matches!(
            sorter.sort(&mut data),
            Err(SortError::UnsupportedLength { len: 3, next: 4 })
        ));
    }

    #[test]
    fn test_pad_policy() {
        let sorter = Sorter::new(SortConfig::default().with_policy(LengthPolicy::Pad)).unwrap();
        let mut data = vec![2, 1, 3];
        let stats = sorter.sort(&mut data).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(stats.layout, Layout::Padded);
        assert_eq!(stats.passes, 3);
    }

    #[test]
    fn test_threads_ignored_for_sequential() {
        let sorter = Sorter::new(SortConfig::default().with_threads(4)).unwrap();
        assert!(sorter.pool.is_none());

        let sorter =
            Sorter::new(SortConfig::default().with_executor(Executor::Parallel).with_threads(2))
                .unwrap();
        assert!(sorter.pool.is_some());
    }

    #[test]
    fn test_executor_threshold() {
        let config = SortConfig::default()
            .with_executor(Executor::Parallel)
            .with_parallel_threshold(64);
        let sorter = Sorter::new(config).unwrap();
        assert_eq!(sorter.executor_for(63), Executor::Sequential);
        assert_eq!(sorter.executor_for(64), Executor::Parallel);
    }

    #[test]
    fn test_stats_for_reference_input() {
        let mut data = vec![3, 7, 4, 8, 6, 2, 1, 5];
        let stats = Sorter::default().sort(&mut data).unwrap();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(stats.passes, 6);
        assert_eq!(stats.comparisons, 24);
        assert_eq!(stats.executor, Executor::Sequential);
    }
}
