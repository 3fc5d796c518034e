//! Template directory discovery.
//!
//! # Resolution order
//!
//! Candidates are probed in this order, stopping at the first directory that
//! exists and holds at least one valid template:
//!
//! 1. An explicit directory (`--templates-dir` or the `templates.dir` config key)
//! 2. **`$STENCIL_TEMPLATES_DIR`**
//! 3. **`./templates`**, relative to the current working directory
//! 4. **`<executable-dir>/templates`**, for installed binaries
//!
//! If nothing is found, [`all_templates`] returns an empty `Vec` and logs a
//! warning. The CLI turns that into an actionable error.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use stencil_core::domain::{DomainError, Template};

use crate::template_loader::FilesystemTemplateLoader;

pub const TEMPLATES_DIR_ENV: &str = "STENCIL_TEMPLATES_DIR";

/// Templates loaded from the first usable candidate directory, together
/// with that directory.
#[derive(Debug, Clone, Default)]
pub struct Discovered {
    pub root: Option<PathBuf>,
    pub templates: Vec<Template>,
}

/// Load all templates using the resolution order described in the module docs.
///
/// An explicit directory that does not exist is an error rather than a
/// silent fallthrough.
#[instrument(skip_all, fields(explicit = ?explicit))]
pub fn all_templates(explicit: Option<&Path>) -> Result<Discovered, DomainError> {
    if let Some(dir) = explicit {
        let templates = FilesystemTemplateLoader::new(dir).load_all()?;
        info!(path = %dir.display(), count = templates.len(), "templates loaded");
        return Ok(Discovered {
            root: Some(dir.to_path_buf()),
            templates,
        });
    }

    for candidate in template_roots(std::env::var(TEMPLATES_DIR_ENV).ok()) {
        debug!(path = %candidate.display(), "checking candidate templates path");

        if !candidate.is_dir() {
            continue;
        }

        let templates = FilesystemTemplateLoader::new(&candidate).load_all()?;
        if templates.is_empty() {
            debug!(path = %candidate.display(), "no templates here, trying next");
            continue;
        }

        info!(path = %candidate.display(), count = templates.len(), "templates loaded");
        return Ok(Discovered {
            root: Some(candidate),
            templates,
        });
    }

    warn!("no templates directory found; checked ${TEMPLATES_DIR_ENV}, ./templates and <exe>/templates");
    Ok(Discovered::default())
}

/// Ordered candidate directories, given the value of `$STENCIL_TEMPLATES_DIR`.
pub fn template_roots(env_dir: Option<String>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        paths.push(PathBuf::from(dir));
    }

    paths.push(PathBuf::from("templates"));

    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }

    paths
}

/// `<directory of current executable>/templates`, if it can be determined.
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seed_template(root: &Path, name: &str) {
        let slot = root.join(name);
        fs::create_dir_all(&slot).unwrap();
        fs::write(
            slot.join("template.toml"),
            format!("[template]\nname = \"{name}\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn env_dir_comes_first() {
        let paths = template_roots(Some("/custom/templates".into()));
        assert_eq!(paths[0], PathBuf::from("/custom/templates"));
        assert_eq!(paths[1], PathBuf::from("templates"));
    }

    #[test]
    fn blank_env_dir_is_ignored() {
        let paths = template_roots(Some("  ".into()));
        assert_eq!(paths[0], PathBuf::from("templates"));
    }

    #[test]
    fn explicit_dir_is_used_directly() {
        let temp = TempDir::new().unwrap();
        seed_template(temp.path(), "one");
        seed_template(temp.path(), "two");

        let found = all_templates(Some(temp.path())).unwrap();

        assert_eq!(found.root.as_deref(), Some(temp.path()));
        assert_eq!(found.templates.len(), 2);
    }

    #[test]
    fn missing_explicit_dir_is_an_error() {
        assert!(all_templates(Some(Path::new("/tmp/stencil_test_nonexistent_9999"))).is_err());
    }
}
