//! Sorter configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! policy = "pad"
//! executor = "parallel"
//! parallel_threshold = 4096
//! threads = 4
//! local_size = 256
//! ```

use crate::diagnostics::SortError;
use crate::exec::Executor;
use crate::network::{Layout, is_supported_len};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default smallest input handed to the parallel executor
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Default work-group size for launch plans
pub const DEFAULT_LOCAL_SIZE: usize = 256;

/// What to do with a length the classic network cannot sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Fail with [`SortError::UnsupportedLength`]
    #[default]
    Reject,
    /// Run the padded network
    Pad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    pub policy: LengthPolicy,
    pub executor: Executor,
    /// Inputs shorter than this run sequentially even with the parallel
    /// executor selected
    pub parallel_threshold: usize,
    /// Worker threads for the parallel executor; rayon's global pool if unset
    pub threads: Option<usize>,
    pub local_size: usize,
}

/// Command-line values that take precedence over a loaded [`SortConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub pad: bool,
    pub parallel: bool,
    /// Setting a thread count also selects the parallel executor
    pub threads: Option<usize>,
    pub local_size: Option<usize>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            policy: LengthPolicy::Reject,
            executor: Executor::Sequential,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            threads: None,
            local_size: DEFAULT_LOCAL_SIZE,
        }
    }
}

impl SortConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, SortError> {
        let config: SortConfig =
            toml::from_str(source).map_err(|e| SortError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, SortError> {
        tracing::debug!("Loading config from {:?}", path);
        let source = std::fs::read_to_string(path).map_err(|e| SortError::io(path, e))?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), SortError> {
        if self.threads == Some(0) {
            return Err(SortError::Config("`threads` must be at least 1".to_string()));
        }
        if self.local_size == 0 {
            return Err(SortError::Config("`local_size` must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Layout for a sequence of length `n` under this config's policy
    pub fn layout_for(&self, n: usize) -> Result<Layout, SortError> {
        if is_supported_len(n) {
            return Ok(Layout::Alternating);
        }
        match self.policy {
            LengthPolicy::Reject => Err(SortError::unsupported_length(n)),
            LengthPolicy::Pad => Ok(Layout::Padded),
        }
    }

    /// Apply command-line overrides on top of this config
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if overrides.pad {
            self.policy = LengthPolicy::Pad;
        }
        if overrides.parallel || overrides.threads.is_some() {
            self.executor = Executor::Parallel;
        }
        if let Some(threads) = overrides.threads {
            self.threads = Some(threads);
        }
        if let Some(local_size) = overrides.local_size {
            self.local_size = local_size;
        }
        self
    }

    pub fn with_policy(mut self, policy: LengthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SortConfig::from_toml_str("").unwrap();
        assert_eq!(config, SortConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = SortConfig::from_toml_str(
            r#"
            policy = "pad"
            executor = "parallel"
            parallel_threshold = 0
            threads = 2
            local_size = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.policy, LengthPolicy::Pad);
        assert_eq!(config.executor, Executor::Parallel);
        assert_eq!(config.parallel_threshold, 0);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.local_size, 64);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SortConfig::from_toml_str("polcy = \"pad\"").unwrap_err();
        assert!(matches!(err, SortError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("bitonic-config-{}.toml", std::process::id()));
        std::fs::write(&path, "policy = \"pad\"\nlocal_size = 32\n").unwrap();

        let config = SortConfig::load(&path).unwrap();
        assert_eq!(config.policy, LengthPolicy::Pad);
        assert_eq!(config.local_size, 32);

        std::fs::remove_file(&path).ok();
        assert!(matches!(SortConfig::load(&path), Err(SortError::Io { .. })));
    }

    #[test]
    fn test_overrides_beat_loaded_values() {
        let loaded = SortConfig::from_toml_str(
            r#"
            policy = "reject"
            executor = "sequential"
            threads = 2
            local_size = 32
            "#,
        )
        .unwrap();

        let config = loaded.clone().with_overrides(&Overrides {
            pad: true,
            parallel: true,
            threads: Some(8),
            local_size: None,
        });
        assert_eq!(config.policy, LengthPolicy::Pad);
        assert_eq!(config.executor, Executor::Parallel);
        assert_eq!(config.threads, Some(8));
        assert_eq!(config.local_size, 32);

        assert_eq!(loaded.clone().with_overrides(&Overrides::default()), loaded);
    }

    #[test]
    fn test_threads_override_selects_parallel() {
        let config = SortConfig::default().with_overrides(&Overrides {
            threads: Some(4),
            ..Overrides::default()
        });
        assert_eq!(config.executor, Executor::Parallel);
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn test_layout_for_policy() {
        let reject = SortConfig::default();
        assert_eq!(reject.layout_for(16).unwrap(), Layout::Alternating);
        assert!(matches!(
            reject.layout_for(12),
            Err(SortError::UnsupportedLength { len: 12, next: 16 })
        ));

        let pad = reject.with_policy(LengthPolicy::Pad);
        assert_eq!(pad.layout_for(16).unwrap(), Layout::Alternating);
        assert_eq!(pad.layout_for(12).unwrap(), Layout::Padded);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = SortConfig::from_toml_str("threads = 0").unwrap_err();
        assert!(err.to_string().contains("threads"));
    }
}
