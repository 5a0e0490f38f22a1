// src/compiler/options.rs
//! Compiler configuration

use serde::{Deserialize, Serialize};

/// What to do when a scan leaves more than one subtree behind, e.g.
/// `age > 30 age < 50` with no operator between the conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverPolicy {
    /// Fail with [`crate::CompileError::DanglingOperands`]
    #[default]
    Reject,

    /// Keep the most recently built subtree and drop the others
    KeepLast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub leftover: LeftoverPolicy,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leftover(mut self, policy: LeftoverPolicy) -> Self {
        self.leftover = policy;
        self
    }

    /// Load options from a JSON document; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
