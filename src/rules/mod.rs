//! Rename rules - data model, matching and replacement rendering

mod engine;
pub mod transform;

pub use engine::{RuleEngine, Selected, compile_pattern};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A rule that renames files whose name matches a pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Regex evaluated against the bare file name (not the full path)
    pub pattern: String,

    /// Replacement template with `$1` positional and `$name` group references
    pub replacement: String,

    /// Template file used to seed the renamed file when it is empty
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Rule {
    /// Create a new rule without a template
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            template: None,
        }
    }
}
