//! Batch workflows over the audio files of one directory.
//!
//! Every workflow returns a [`BatchReport`] with one outcome per item.
//! Fatal conditions (bad descriptor, count mismatch, rejected tracklist)
//! are returned as errors before any audio file is modified.

mod listing;
mod report;
mod roundtrip;
mod split;

pub use report::BatchReport;
pub use split::SplitRequest;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::descriptor::AlbumDescriptor;
use crate::error::{Error, Result};
use crate::tags::{CoverArt, TagAccessor};

pub struct BatchDriver<'a> {
    dir: PathBuf,
    descriptor_path: PathBuf,
    tags: &'a dyn TagAccessor,
    settings: &'a Settings,
}

impl<'a> BatchDriver<'a> {
    /// Driver for `dir`, with the descriptor at its configured file name
    /// inside `dir`.
    pub fn new(dir: impl Into<PathBuf>, tags: &'a dyn TagAccessor, settings: &'a Settings) -> Self {
        let dir = dir.into();
        let descriptor_path = dir.join(&settings.descriptor.file_name);
        Self {
            dir,
            descriptor_path,
            tags,
            settings,
        }
    }

    pub fn with_descriptor(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor_path = path.into();
        self
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Audio files of the batch, or `NoAudioFiles` if there are none.
    fn batch_files(&self) -> Result<Vec<PathBuf>> {
        let files = self.list_audio_files()?;
        if files.is_empty() {
            return Err(Error::NoAudioFiles(self.dir.clone()));
        }
        Ok(files)
    }

    /// Load the cover image referenced by `album`, if any.
    fn load_cover(&self, album: &AlbumDescriptor) -> Result<Option<CoverArt>> {
        let Some(path) = album.cover_path(&self.descriptor_path) else {
            return Ok(None);
        };
        let data = fs::read(&path).map_err(|e| Error::io(&path, e))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Ok(Some(CoverArt {
            mime_type: CoverArt::mime_for_extension(ext).to_string(),
            data,
        }))
    }
}

/// Display name of a batch item.
fn item_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
