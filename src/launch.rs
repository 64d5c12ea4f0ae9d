//! Launch planning for data-parallel back-ends
//!
//! A device back-end runs the network as one kernel launch per pass, with a
//! full barrier (queue finish) between launches. Each work-item handles one
//! comparator slot, so a pass over `n` elements needs about `n / 2` items.
//!
//! ```text
//! schedule(n) -> Pass -> LaunchConfig { global, local } -> enqueue -> finish
//! ```

use crate::config::SortConfig;
use crate::diagnostics::SortError;
use crate::network::{Layout, Pass, is_supported_len, schedule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device limits a launch has to respect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLimits {
    pub name: String,
    /// Largest work-group (block) size
    pub max_local_size: usize,
}

impl Default for DeviceLimits {
    fn default() -> Self {
        Self {
            name: "Generic Device".to_string(),
            max_local_size: 1024,
        }
    }
}

/// 1-D launch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Total work-items (grid size in items)
    pub global_size: usize,
    /// Work-items per group (block size)
    pub local_size: usize,
}

impl LaunchConfig {
    pub fn new(global_size: usize, local_size: usize) -> Self {
        Self {
            global_size,
            local_size,
        }
    }

    /// Launch covering every comparator of `pass` over `n` elements.
    ///
    /// The local size shrinks to the work available; the global size is
    /// rounded up to a whole number of groups. Surplus items have no
    /// comparator and do nothing.
    pub fn for_pass(pass: Pass, n: usize, local_size: usize) -> Self {
        let work = pass.comparator_count(n).max(1);
        let local = local_size.clamp(1, work);
        Self::new(work.div_ceil(local) * local, local)
    }

    pub fn groups(&self) -> usize {
        if self.local_size == 0 {
            0
        } else {
            self.global_size / self.local_size
        }
    }

    /// Validate the launch configuration against device limits
    pub fn validate(&self, limits: &DeviceLimits) -> Result<(), SortError> {
        if self.global_size == 0 || self.local_size == 0 {
            return Err(SortError::InvalidLaunch(format!(
                "Empty launch ({} x {})",
                self.global_size, self.local_size
            )));
        }

        if self.global_size % self.local_size != 0 {
            return Err(SortError::InvalidLaunch(format!(
                "Global size ({}) is not a multiple of local size ({})",
                self.global_size, self.local_size
            )));
        }

        if self.local_size > limits.max_local_size {
            return Err(SortError::InvalidLaunch(format!(
                "Local size ({}) exceeds maximum ({}) of {}",
                self.local_size, limits.max_local_size, limits.name
            )));
        }

        Ok(())
    }
}

impl fmt::Display for LaunchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "global={} local={}", self.global_size, self.local_size)
    }
}

/// One kernel launch of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelLaunch {
    pub pass: Pass,
    pub config: LaunchConfig,
}

/// Launches, in order, that sort `n` elements on a device.
///
/// # Errors
///
/// [`SortError::UnsupportedLength`] for the alternating layout and a length
/// that is not a power of two; [`SortError::InvalidLaunch`] when
/// `local_size` is zero or above the device limit.
pub fn plan(
    n: usize,
    layout: Layout,
    local_size: usize,
    limits: &DeviceLimits,
) -> Result<Vec<KernelLaunch>, SortError> {
    if layout == Layout::Alternating && !is_supported_len(n) {
        return Err(SortError::unsupported_length(n));
    }
    LaunchConfig::new(local_size, local_size).validate(limits)?;

    let launches = schedule(n, layout)
        .map(|pass| KernelLaunch {
            pass,
            config: LaunchConfig::for_pass(pass, n, local_size),
        })
        .collect::<Vec<_>>();

    for launch in &launches {
        launch.config.validate(limits)?;
    }

    tracing::debug!(
        "Planned {} launches for {} elements ({} layout)",
        launches.len(),
        n,
        layout
    );
    Ok(launches)
}

/// [`plan`] with the layout and work-group size taken from `config`
pub fn plan_with_config(
    n: usize,
    config: &SortConfig,
    limits: &DeviceLimits,
) -> Result<Vec<KernelLaunch>, SortError> {
    plan(n, config.layout_for(n)?, config.local_size, limits)
}
