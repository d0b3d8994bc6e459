//! Options shared by every transform.

use crate::error::{CompositionError, Result};
use serde::{Deserialize, Serialize};

/// What to do with rows the math cannot handle: non-positive parts in the
/// log-ratio transforms, zero normalizing sums in the closure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneracyPolicy {
    /// Compute anyway; NaN and infinities flow into the output.
    Propagate,
    /// Validate every row first and return an error without touching the
    /// output matrix.
    FailFast,
}

impl Default for DegeneracyPolicy {
    fn default() -> Self {
        DegeneracyPolicy::Propagate
    }
}

/// Transform options.
///
/// # Example
/// ```
/// use compositions::{DegeneracyPolicy, TransformConfig};
///
/// let config = TransformConfig::from_yaml("degeneracy: fail_fast\nparallel: true\n").unwrap();
/// assert_eq!(config.degeneracy, DegeneracyPolicy::FailFast);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Handling of degenerate rows.
    #[serde(default)]
    pub degeneracy: DegeneracyPolicy,
    /// Process rows in parallel on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl TransformConfig {
    /// Default options: propagate special values, sequential rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on degenerate rows instead of propagating special values.
    pub fn fail_fast(mut self) -> Self {
        self.degeneracy = DegeneracyPolicy::FailFast;
        self
    }

    /// Set the degeneracy policy.
    pub fn degeneracy(mut self, policy: DegeneracyPolicy) -> Self {
        self.degeneracy = policy;
        self
    }

    /// Enable or disable row parallelism.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(CompositionError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(CompositionError::from)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(CompositionError::from)
    }

    /// Save to pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(CompositionError::from)
    }
}
