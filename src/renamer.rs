//! Rename orchestration - applies the first matching rule to a file event
//!
//! An applied rule is executed as create-new-then-delete-old rather than an
//! in-place rename: an in-place rename would raise the same watcher event
//! again and re-evaluate the rules. The watcher suppresses the creation
//! event for the destination path, so the pair of events an applied rename
//! produces is never fed back into the engine.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::rules::{RuleEngine, transform};
use crate::store::ContentStore;
use crate::templates::TemplateApplier;

/// What processing one event amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No rule matched; the event was an ordinary create/rename
    Passed,
    /// A rule fired and the file now lives at `to`
    Renamed { from: PathBuf, to: PathBuf },
}

/// Orchestrates rule selection and the rename side effects
pub struct Renamer<S, T> {
    engine: RuleEngine,
    store: S,
    templates: T,
}

impl<S: ContentStore, T: TemplateApplier> Renamer<S, T> {
    /// Create a renamer over a rule-list snapshot and its collaborators
    pub fn new(engine: RuleEngine, store: S, templates: T) -> Self {
        Self {
            engine,
            store,
            templates,
        }
    }

    /// Get the rule engine
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Compute the destination a rule would rename `path` to, without
    /// performing any side effects. `None` when no rule matches.
    pub fn preview(&self, path: &Path) -> Result<Option<PathBuf>> {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(selected) = self.engine.first_match(name) else {
            return Ok(None);
        };

        let new_name = transform::render(name, &selected.regex, &selected.rule.replacement)?;
        Ok(Some(path.parent().unwrap_or(Path::new("")).join(new_name)))
    }

    /// Process one create/rename event for `path`.
    ///
    /// Effect order per matched rule: read old content, create the
    /// destination, delete the original, then optionally seed the new file
    /// from the rule's template. A failed create aborts before anything is
    /// deleted; a failed delete is reported and leaves both files in place.
    pub fn handle(&self, path: &Path) -> Result<Outcome> {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!("Ignoring path without a UTF-8 file name: {}", path.display());
            return Ok(Outcome::Passed);
        };

        let Some(selected) = self.engine.first_match(name) else {
            debug!("No rule matched `{}`, ordinary rename proceeding", name);
            return Ok(Outcome::Passed);
        };

        let new_name = transform::render(name, &selected.regex, &selected.rule.replacement)?;
        let destination = path.parent().unwrap_or(Path::new("")).join(&new_name);

        info!("Renaming {} -> {}", path.display(), destination.display());

        // Directories and binary data copy across as empty content.
        let previous_content = match self.store.read_content(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Treating {} as empty: {}", path.display(), e);
                String::new()
            }
        };

        // The destination must exist before the original is touched; a
        // failed create leaves the source untouched.
        self.store.create(&destination, &previous_content)?;

        if let Err(e) = self.store.delete(path) {
            warn!("Could not delete original after rename: {}", e);
            crate::notifications::notify_rename_error(&path.display().to_string(), &e.to_string());
            return Ok(Outcome::Renamed {
                from: path.to_path_buf(),
                to: destination,
            });
        }

        if let Some(template) = &selected.rule.template {
            if previous_content.is_empty() {
                if let Err(e) = self.templates.apply(template, &destination) {
                    warn!("Template application skipped: {}", e);
                }
            } else {
                warn!(
                    "{} already has content, not overwriting it",
                    destination.display()
                );
                crate::notifications::notify_content_conflict(&destination.display().to_string());
            }
        }

        Ok(Outcome::Renamed {
            from: path.to_path_buf(),
            to: destination,
        })
    }
}
