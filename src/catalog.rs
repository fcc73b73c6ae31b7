//! Artwork catalog.
//!
//! Maps public artwork names (file basenames) to paths on disk. Built once
//! at startup by walking the archive directory and shared read-only after.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl Catalog {
    /// Walk `root` recursively and register every regular file by basename.
    ///
    /// The walk is sorted by file name; when two files share a basename the
    /// first one found wins. Entries that cannot be read (permission errors,
    /// symlink loops) are logged and skipped; only a missing root fails.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            anyhow::bail!("Artwork directory not found: {}", root.display());
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut entries: BTreeMap<String, PathBuf> = BTreeMap::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable archive entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(existing) = entries.get(&name) {
                tracing::debug!(
                    name = %name,
                    kept = %existing.display(),
                    skipped = %entry.path().display(),
                    "duplicate artwork name"
                );
                continue;
            }
            entries.insert(name, entry.into_path());
        }

        tracing::info!(root = %root.display(), artworks = entries.len(), "catalog scanned");
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Build a catalog from explicit entries.
    pub fn from_entries(
        root: impl Into<PathBuf>,
        entries: impl IntoIterator<Item = (String, PathBuf)>,
    ) -> Self {
        Self {
            root: root.into(),
            entries: entries.into_iter().collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artwork published under `name`.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// All artwork names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
