use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::{FileOrder, LibrarySettings};
use crate::error::{Error, Result};

use super::BatchDriver;

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

impl BatchDriver<'_> {
    /// Audio files directly inside the batch directory, in the configured
    /// order. Entries are matched with descriptor tracks by this position.
    pub fn list_audio_files(&self) -> Result<Vec<PathBuf>> {
        let settings = &self.settings.library;

        let mut walker = WalkDir::new(&self.dir).min_depth(1).max_depth(1);
        if settings.order == FileOrder::Name {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.dir).to_path_buf();
                Error::io(path, e.into())
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
            {
                files.push(path.to_path_buf());
            }
        }

        debug!("found {} audio file(s) in {}", files.len(), self.dir.display());
        Ok(files)
    }
}
