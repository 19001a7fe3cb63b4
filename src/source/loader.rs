//! Filesystem document loader.

use std::path::{Path, PathBuf};

use super::{open_path, DocumentLoader, TextRunSource};
use crate::error::{Error, Result};

/// Resolves marker document locations to files under a base directory.
///
/// Locations are usually site-relative URLs such as `/docs/report.pdf`.
/// An optional prefix (for example `https://example.org/static`) is stripped
/// first; whatever remains is joined onto the base directory.
#[derive(Debug, Clone)]
pub struct FileLoader {
    base_dir: PathBuf,
    strip_prefix: Option<String>,
}

impl FileLoader {
    /// Create a loader rooted at `base_dir`.
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            strip_prefix: None,
        }
    }

    /// Strip this prefix from locations before resolving them.
    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.strip_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    /// The directory locations are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map a location to a file path without touching the filesystem.
    pub fn resolve(&self, location: &str) -> Result<PathBuf> {
        let mut rest = location.trim();
        if let Some(prefix) = &self.strip_prefix {
            rest = rest.strip_prefix(prefix.as_str()).unwrap_or(rest);
        }

        if rest.starts_with("http://") || rest.starts_with("https://") {
            return Err(Error::UnsupportedLocation(location.to_string()));
        }
        let rest = rest.strip_prefix("file://").unwrap_or(rest);

        // Query strings and fragments name the same file.
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            return Err(Error::UnsupportedLocation(location.to_string()));
        }

        let relative = Path::new(rest);
        if relative
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(Error::UnsupportedLocation(location.to_string()));
        }

        Ok(self.base_dir.join(relative))
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DocumentLoader for FileLoader {
    fn load(&self, location: &str) -> Result<Box<dyn TextRunSource>> {
        let path = self.resolve(location)?;
        log::debug!("loading {} from {}", location, path.display());
        open_path(&path)
    }
}
