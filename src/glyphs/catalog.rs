use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{OverlayError, OverlayResult};

/// Ordered list of font files; a font id is an index into it.
///
/// Never empty. Read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontCatalog {
    paths: Vec<PathBuf>,
}

impl FontCatalog {
    /// Scan `dir` (one level, no recursion) for files whose extension matches one of
    /// `extensions`, case-insensitively. Paths are sorted so ids are stable across runs.
    #[tracing::instrument(skip(extensions))]
    pub fn discover(dir: &Path, extensions: &[String]) -> OverlayResult<Self> {
        let wanted: Vec<String> = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        let rd = std::fs::read_dir(dir)
            .with_context(|| format!("read font directory '{}'", dir.display()))
            .map_err(|e| OverlayError::configuration(format!("{e:#}")))?;

        let mut paths = Vec::new();
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            if wanted.iter().any(|w| *w == ext.to_ascii_lowercase()) {
                paths.push(path);
            }
        }
        paths.sort();

        let catalog = Self::from_paths(paths).map_err(|_| {
            OverlayError::configuration(format!(
                "no font files with extensions {wanted:?} in '{}'",
                dir.display()
            ))
        })?;
        tracing::info!(fonts = catalog.len(), "discovered font catalog");
        Ok(catalog)
    }

    /// Build a catalog from explicit paths, keeping their order.
    pub fn from_paths(paths: Vec<PathBuf>) -> OverlayResult<Self> {
        if paths.is_empty() {
            return Err(OverlayError::configuration("font catalog must be non-empty"));
        }
        Ok(Self { paths })
    }

    /// Number of fonts.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the catalog has no fonts.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path of font `id`.
    pub fn path(&self, id: usize) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    /// All paths in id order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyphs/catalog.rs"]
mod tests;
