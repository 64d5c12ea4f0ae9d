//! Bitonic sorting network
//!
//! An oblivious comparison network: which elements get compared, and in which
//! direction, depends only on their indices. That makes every pass of the
//! network data-parallel, the property that makes it a classic GPU sort.
//!
//! # Architecture
//!
//! ```text
//! network::schedule(n) -> Pass { k, j } -> Executor::run_pass -> barrier -> next pass
//!                                       -> launch::LaunchConfig (device back-ends)
//! ```
//!
//! - [`sort`] / [`sort_by`]: the classic network, power-of-two lengths only
//! - [`sort_padded`] / [`sort_padded_by`]: any length, virtual `+inf` padding
//! - [`Sorter`]: config-driven engine with a rayon-backed parallel executor
//! - [`launch::plan`]: per-pass launch sizes for a device back-end
//!
//! # Example
//!
//! ```
//! use bitonic::{LengthPolicy, SortConfig, Sorter};
//!
//! let mut data = vec![9, 4, 7, 1, 3];
//! let sorter = Sorter::new(SortConfig::default().with_policy(LengthPolicy::Pad)).unwrap();
//! let stats = sorter.sort(&mut data).unwrap();
//!
//! assert_eq!(data, vec![1, 3, 4, 7, 9]);
//! assert_eq!(stats.passes, 6);
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod exec;
pub mod io;
pub mod launch;
pub mod network;
mod sort;

// Re-export diagnostics for convenience
pub use diagnostics::{SortError, SourceFile};

// Re-exports for convenience
pub use config::{LengthPolicy, Overrides, SortConfig};
pub use engine::{SortStats, Sorter};
pub use exec::Executor;
pub use network::{Layout, Pass};
pub use sort::{sort, sort_by, sort_padded, sort_padded_by};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
