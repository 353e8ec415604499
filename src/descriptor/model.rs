use std::path::{Path, PathBuf};

/// One `<track>` entry. Its position in [`AlbumDescriptor::tracks`] is the
/// 1-based position of the file it applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// Cut point, only used by the split workflow.
    pub start_time: Option<String>,
    pub track_number: Option<String>,
    pub title: String,
    pub artist: Option<String>,
    pub year: Option<String>,
}

/// The editable checkpoint written between the two phases of a workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumDescriptor {
    pub name: Option<String>,
    /// Common track artist, hoisted from the tracks.
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    /// Common year, hoisted from the tracks.
    pub year: Option<String>,
    /// Front cover image, relative to the descriptor's directory unless absolute.
    pub cover: Option<String>,
    pub tracks: Vec<TrackDescriptor>,
}

impl AlbumDescriptor {
    /// Resolve the cover path against the directory holding the descriptor.
    pub fn cover_path(&self, descriptor_path: &Path) -> Option<PathBuf> {
        let cover = self.cover.as_deref()?;
        let cover = Path::new(cover);
        if cover.is_absolute() {
            return Some(cover.to_path_buf());
        }
        let base = descriptor_path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(cover))
    }
}
