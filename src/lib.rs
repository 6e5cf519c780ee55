//! Renote - rule-driven automatic note renamer
//!
//! Watches note directories and renames newly created or renamed files
//! according to an ordered list of regex rules. A rule pairs a match
//! pattern with a replacement template (`$1` positional and `$name` named
//! group references) and optionally a template file used to seed the
//! renamed file when it is empty.

pub mod config;
pub mod error;
pub mod notifications;
pub mod renamer;
pub mod rules;
pub mod store;
pub mod templates;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};
pub use renamer::{Outcome, Renamer};
pub use rules::{Rule, RuleEngine};
pub use store::{ContentStore, FsStore};
pub use templates::{FsTemplates, TemplateApplier};
pub use watcher::Watcher;

/// Current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expand ~ and environment variables ($VAR, ${VAR}) in a path
pub fn expand_path(path: &std::path::Path) -> std::path::PathBuf {
    let path_str = path.to_string_lossy();

    // First expand ~ prefix
    let expanded = if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            home.join(stripped).to_string_lossy().to_string()
        } else {
            path_str.to_string()
        }
    } else if path_str == "~" {
        if let Some(home) = dirs::home_dir() {
            home.to_string_lossy().to_string()
        } else {
            path_str.to_string()
        }
    } else {
        path_str.to_string()
    };

    // Then expand $VAR and ${VAR} patterns
    use std::sync::LazyLock;
    static ENV_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)").expect("invalid env regex")
    });

    let result = ENV_RE.replace_all(&expanded, |caps: &regex::Captures| {
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    });

    std::path::PathBuf::from(result.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_expand_home() {
        // This test depends on the home directory existing
        let expanded = expand_path(Path::new("~/vault"));
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_plain_paths_pass_through() {
        assert_eq!(
            expand_path(Path::new("/srv/notes")),
            Path::new("/srv/notes")
        );
    }
}
