//! Bitonic network wiring
//!
//! A bitonic sorting network is fully described by its pass schedule: the
//! `(k, j)` pairs in execution order. Which indices a pass compares, and in
//! which direction, depends only on the index, never on the data.
//!
//! ```text
//! k = 2:  j = 1
//! k = 4:  j = 2, 1
//! k = 8:  j = 4, 2, 1
//! ...
//! ```
//!
//! Within one pass the comparators are disjoint, so every comparator of a
//! pass can run at the same time. Consecutive passes must be separated by a
//! barrier.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How the comparators of a network are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Classic network. Direction alternates with bit `k` of the index.
    /// Sorts power-of-two lengths only.
    Alternating,
    /// Every comparator ascending; the first pass of each stage pairs `i`
    /// with `i ^ (k - 1)`. Sorts any length: indices past the end behave
    /// as `+inf` and are never touched.
    Padded,
}

impl Layout {
    /// The layout able to sort a sequence of length `n`
    pub fn for_len(n: usize) -> Self {
        if is_supported_len(n) {
            Layout::Alternating
        } else {
            Layout::Padded
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Alternating => write!(f, "alternating"),
            Layout::Padded => write!(f, "padded"),
        }
    }
}

/// Comparator direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Smaller element ends up at the lower index
    Ascending,
    /// Larger element ends up at the lower index
    Descending,
}

impl Direction {
    /// Whether a comparator with this direction swaps its two elements,
    /// given `lower.cmp(upper)`
    #[inline]
    pub fn should_swap(self, ord: Ordering) -> bool {
        match self {
            Direction::Ascending => ord == Ordering::Greater,
            Direction::Descending => ord == Ordering::Less,
        }
    }
}

/// A single compare/swap element of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparator {
    /// Lower index
    pub lo: usize,
    /// Upper index, always greater than `lo`
    pub hi: usize,
    pub direction: Direction,
}

/// One `(k, j)` pass of the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pass {
    /// Size of the bitonic blocks being merged in this stage
    pub k: usize,
    /// Distance between compared indices
    pub j: usize,
    pub layout: Layout,
}

impl Pass {
    /// True for the first pass of a padded stage, which mirrors each block
    /// of `k` elements instead of comparing at distance `j`
    #[inline]
    pub fn is_flip(&self) -> bool {
        self.layout == Layout::Padded && self.j == self.k / 2
    }

    /// Index compared with `i` in this pass
    #[inline]
    pub fn partner(&self, i: usize) -> usize {
        if self.is_flip() {
            i ^ (self.k - 1)
        } else {
            i ^ self.j
        }
    }

    /// Direction of the comparator whose lower index is `i`
    #[inline]
    pub fn direction(&self, i: usize) -> Direction {
        match self.layout {
            Layout::Alternating if i & self.k != 0 => Direction::Descending,
            _ => Direction::Ascending,
        }
    }

    /// Width of the independent blocks this pass operates on.
    ///
    /// No comparator crosses a block boundary, and every index in a block
    /// shares the same direction.
    #[inline]
    pub fn block(&self) -> usize {
        2 * self.j
    }

    /// Comparators this pass applies to a sequence of length `n`
    pub fn comparators(self, n: usize) -> impl Iterator<Item = Comparator> {
        (0..n).filter_map(move |i| {
            let l = self.partner(i);
            (l > i && l < n).then(|| Comparator {
                lo: i,
                hi: l,
                direction: self.direction(i),
            })
        })
    }

    /// Number of comparators this pass applies to a sequence of length `n`
    pub fn comparator_count(&self, n: usize) -> usize {
        let block = self.block();
        let half = self.j;
        (n / block) * half + (n % block).saturating_sub(half)
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={} j={}", self.k, self.j)
    }
}

/// Whether the alternating network sorts a sequence of length `n`
#[inline]
pub fn is_supported_len(n: usize) -> bool {
    n <= 1 || n.is_power_of_two()
}

/// Largest `k` the schedule reaches for `n` under `layout`
fn stage_bound(n: usize, layout: Layout) -> usize {
    match layout {
        Layout::Alternating => n,
        Layout::Padded => n.checked_next_power_of_two().unwrap_or(usize::MAX),
    }
}

/// Iterator over the passes of a network, in execution order
#[derive(Debug, Clone)]
pub struct Passes {
    bound: usize,
    k: usize,
    j: usize,
    layout: Layout,
}

impl Iterator for Passes {
    type Item = Pass;

    fn next(&mut self) -> Option<Pass> {
        // k == 0 marks an overflowed doubling
        if self.k == 0 || self.k > self.bound {
            return None;
        }

        let pass = Pass {
            k: self.k,
            j: self.j,
            layout: self.layout,
        };

        if self.j > 1 {
            self.j /= 2;
        } else {
            self.k = self.k.checked_mul(2).unwrap_or(0);
            self.j = self.k / 2;
        }

        Some(pass)
    }
}

/// Pass schedule for a sequence of length `n`
pub fn schedule(n: usize, layout: Layout) -> Passes {
    Passes {
        bound: stage_bound(n, layout),
        k: 2,
        j: 1,
        layout,
    }
}

/// Number of passes in the schedule for `n`
pub fn pass_count(n: usize, layout: Layout) -> usize {
    let stages = stage_bound(n, layout).checked_ilog2().unwrap_or(0) as usize;
    stages * (stages + 1) / 2
}

/// Total comparators the schedule applies for `n`
pub fn comparator_count(n: usize, layout: Layout) -> usize {
    schedule(n, layout).map(|pass| pass.comparator_count(n)).sum()
}
