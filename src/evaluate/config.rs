//! Evaluation settings.

use crate::accuracy::FractionalPolicy;
use crate::correlation::Tails;
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};

/// Settings shared by dataset evaluation and accuracy analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Tail mode for the Spearman significance test.
    pub tails: Tails,
    /// Handling of values between absence (0) and presence (>= 1).
    pub presence_policy: FractionalPolicy,
}

impl EvaluationConfig {
    /// Set the Spearman tail mode.
    pub fn with_tails(mut self, tails: Tails) -> Self {
        self.tails = tails;
        self
    }

    /// Set the fractional-value policy.
    pub fn with_presence_policy(mut self, policy: FractionalPolicy) -> Self {
        self.presence_policy = policy;
        self
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(EvalError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(EvalError::from)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(EvalError::from)
    }

    /// Save to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(EvalError::from)
    }
}
