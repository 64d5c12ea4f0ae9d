//! Pass executors
//!
//! An executor applies one pass of the network to a slice. Comparators in a
//! pass never overlap, so a pass can be split into independent blocks and
//! handed to worker threads without locks. Returning from a pass is the
//! barrier: the next pass only starts once every swap of this one is done.

use crate::network::{Direction, Pass};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Minimum number of elements a parallel task handles
const MIN_ELEMENTS_PER_TASK: usize = 4096;

/// Where passes run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Executor {
    /// Single thread, index by index
    #[default]
    Sequential,
    /// Disjoint blocks on the rayon thread pool
    Parallel,
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Executor::Sequential => write!(f, "sequential"),
            Executor::Parallel => write!(f, "parallel"),
        }
    }
}

impl Executor {
    /// Apply `pass` to `data`
    pub fn run_pass<T, F>(self, data: &mut [T], pass: Pass, cmp: &F) -> PassStats
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        match self {
            Executor::Sequential => sequential_pass(data, pass, cmp),
            Executor::Parallel => parallel_pass(data, pass, cmp),
        }
    }
}

/// Work done by one or more passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    pub comparisons: usize,
    pub swaps: usize,
}

impl PassStats {
    fn record(&mut self, swapped: bool) {
        self.comparisons += 1;
        self.swaps += usize::from(swapped);
    }
}

impl Add for PassStats {
    type Output = PassStats;

    fn add(self, rhs: PassStats) -> PassStats {
        PassStats {
            comparisons: self.comparisons + rhs.comparisons,
            swaps: self.swaps + rhs.swaps,
        }
    }
}

impl AddAssign for PassStats {
    fn add_assign(&mut self, rhs: PassStats) {
        *self = *self + rhs;
    }
}

/// Apply `pass` to `data` on the calling thread.
///
/// This is the reference form of the network: visit every index `i`, pair it
/// with `l = partner(i)`, and act only when `l > i` so each pair is handled
/// once.
pub fn sequential_pass<T, F>(data: &mut [T], pass: Pass, mut cmp: F) -> PassStats
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = data.len();
    let mut stats = PassStats::default();

    for i in 0..n {
        let l = pass.partner(i);
        if l > i && l < n {
            let swap = pass.direction(i).should_swap(cmp(&data[i], &data[l]));
            if swap {
                data.swap(i, l);
            }
            stats.record(swap);
        }
    }

    stats
}

/// Apply `pass` to `data` on the rayon thread pool.
///
/// The slice is cut into blocks of `2j` elements. Every comparator lives
/// inside one block and a block has a single direction, so each task owns
/// its block outright. Produces the same permutation as [`sequential_pass`].
pub fn parallel_pass<T, F>(data: &mut [T], pass: Pass, cmp: &F) -> PassStats
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let block = pass.block();
    let min_blocks = (MIN_ELEMENTS_PER_TASK / block).max(1);

    data.par_chunks_mut(block)
        .enumerate()
        .with_min_len(min_blocks)
        .map(|(index, chunk)| run_block(chunk, index * block, pass, cmp))
        .reduce(PassStats::default, |a, b| a + b)
}

/// Apply the comparators of `pass` that fall in one block starting at `base`
fn run_block<T, F>(chunk: &mut [T], base: usize, pass: Pass, cmp: &F) -> PassStats
where
    F: Fn(&T, &T) -> Ordering,
{
    let half = pass.j;
    let mut stats = PassStats::default();
    if chunk.len() <= half {
        return stats;
    }

    let direction = pass.direction(base);
    let (lower, upper) = chunk.split_at_mut(half);

    if pass.is_flip() {
        // i pairs with block - 1 - i; a short tail block keeps only the
        // innermost pairs
        let skip = half - upper.len();
        for (a, b) in lower[skip..].iter_mut().zip(upper.iter_mut().rev()) {
            stats.record(compare_swap(a, b, direction, cmp));
        }
    } else {
        for (a, b) in lower.iter_mut().zip(upper.iter_mut()) {
            stats.record(compare_swap(a, b, direction, cmp));
        }
    }

    stats
}

#[inline]
fn compare_swap<T, F>(a: &mut T, b: &mut T, direction: Direction, cmp: &F) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    let swap = direction.should_swap(cmp(a, b));
    if swap {
        std::mem::swap(a, b);
    }
    swap
}
