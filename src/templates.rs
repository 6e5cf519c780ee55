//! Template seeding for freshly renamed files
//!
//! The original file's content is copied across during the rename; when it
//! was empty and the rule names a template, the template's content is
//! written into the new file instead.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Populates a target file from a named template
pub trait TemplateApplier {
    /// Write the template's content into `target`.
    fn apply(&self, template: &Path, target: &Path) -> Result<()>;
}

impl<T: TemplateApplier> TemplateApplier for &T {
    fn apply(&self, template: &Path, target: &Path) -> Result<()> {
        (**self).apply(template, target)
    }
}

/// Applies templates stored as plain files.
///
/// Relative template paths resolve against the configured template
/// directory; absolute paths are used as-is.
pub struct FsTemplates {
    base_dir: Option<PathBuf>,
}

impl FsTemplates {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    fn resolve(&self, template: &Path) -> PathBuf {
        if template.is_absolute() {
            return template.to_path_buf();
        }
        match &self.base_dir {
            Some(base) => base.join(template),
            None => template.to_path_buf(),
        }
    }
}

impl TemplateApplier for FsTemplates {
    fn apply(&self, template: &Path, target: &Path) -> Result<()> {
        let resolved = self.resolve(template);
        if !resolved.is_file() {
            return Err(Error::TemplateNotFound { path: resolved });
        }

        let content =
            std::fs::read_to_string(&resolved).map_err(|source| Error::TemplateFailed {
                template: resolved.clone(),
                source,
            })?;

        std::fs::write(target, content).map_err(|source| Error::TemplateFailed {
            template: resolved,
            source,
        })?;

        info!(
            "Applied template {} to {}",
            template.display(),
            target.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_copies_template_content() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("daily.md");
        let target = dir.path().join("note.md");
        std::fs::write(&template_path, "# Daily\n").unwrap();
        std::fs::write(&target, "").unwrap();

        let templates = FsTemplates::new(Some(dir.path().to_path_buf()));
        templates.apply(Path::new("daily.md"), &target).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# Daily\n");
    }

    #[test]
    fn test_missing_template_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let templates = FsTemplates::new(Some(dir.path().to_path_buf()));

        let err = templates
            .apply(Path::new("nope.md"), &dir.path().join("note.md"))
            .unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }
}
