//! Rule selection - the first matching rule wins

use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use super::{Rule, transform};
use crate::error::Error;

// Simple thread-local cache for compiled patterns.
// Capped at 1000 entries; cleared entirely when the cap is exceeded.
const CACHE_MAX_ENTRIES: usize = 1000;

std::thread_local! {
    static REGEX_CACHE: std::cell::RefCell<HashMap<String, Regex>> = std::cell::RefCell::new(HashMap::new());
}

/// A rule selected for a file name, paired with its compiled pattern so
/// rendering reuses the same compilation the match used.
pub struct Selected<'a> {
    pub rule: &'a Rule,
    pub regex: Regex,
}

/// Engine that evaluates an ordered rule list against file names
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Create a new rule engine with the given rules
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Select the first rule whose pattern matches `name`.
    ///
    /// A rule whose pattern fails to compile is skipped for this
    /// evaluation; later rules still apply and the event pipeline keeps
    /// running.
    pub fn first_match(&self, name: &str) -> Option<Selected<'_>> {
        for rule in &self.rules {
            let regex = match compile_pattern(&rule.pattern) {
                Ok(regex) => regex,
                Err(e) => {
                    warn!("Skipping rule with invalid pattern: {}", e);
                    continue;
                }
            };

            if transform::matches(name, &regex) {
                debug!("Rule `{}` matched: {}", rule.pattern, name);
                return Some(Selected { rule, regex });
            }
            trace!("Rule `{}` did not match: {}", rule.pattern, name);
        }

        None
    }

    /// Get all rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Compile a pattern through the per-thread cache.
pub fn compile_pattern(pattern: &str) -> Result<Regex, Error> {
    REGEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.len() >= CACHE_MAX_ENTRIES && !cache.contains_key(pattern) {
            cache.clear();
        }
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        cache.insert(pattern.to_string(), regex.clone());
        Ok(regex)
    })
}
