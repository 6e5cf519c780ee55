//! Configuration schema

use crate::error::Error;
use crate::rules::{Rule, compile_pattern};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Watched folders
    #[serde(default, rename = "watch")]
    pub watches: Vec<WatchConfig>,

    /// Rename rules, in evaluation order
    #[serde(default, rename = "rule")]
    pub rules: Vec<Rule>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seconds to wait before processing a file again (debounce)
    #[serde(default = "default_debounce")]
    pub debounce_seconds: u64,

    /// Polling interval in seconds for watching file changes
    #[serde(default = "default_polling_interval")]
    pub polling_interval_secs: u64,

    /// Enable desktop notifications for errors and conflicts
    #[serde(default)]
    pub notifications_enabled: bool,

    /// Directory that rule templates resolve against
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            debounce_seconds: default_debounce(),
            polling_interval_secs: default_polling_interval(),
            notifications_enabled: false,
            template_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_debounce() -> u64 {
    2
}

fn default_polling_interval() -> u64 {
    5
}

/// Configuration for a watched folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Path to watch
    pub path: PathBuf,

    /// Watch subdirectories recursively
    #[serde(default)]
    pub recursive: bool,
}

impl Config {
    /// Append a rule at the end of the evaluation order
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Remove the rule at `index`
    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    /// Swap the rule at `index` with its predecessor
    pub fn move_rule_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.rules.len() {
            return false;
        }
        self.rules.swap(index, index - 1);
        true
    }

    /// Swap the rule at `index` with its successor
    pub fn move_rule_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.rules.len() {
            return false;
        }
        self.rules.swap(index, index + 1);
        true
    }

    /// Compile every rule pattern eagerly, collecting failures by rule index
    pub fn validate(&self) -> Vec<(usize, Error)> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| compile_pattern(&rule.pattern).err().map(|e| (index, e)))
            .collect()
    }
}
