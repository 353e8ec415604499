use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::read_from_path;
use lofty::tag::Tag;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::model::{CoverArt, TagField, TrackTags};

/// Reads and writes the tag container of a single audio file.
pub trait TagAccessor {
    /// Read every supported field. Missing fields come back as `None`.
    fn read(&self, path: &Path) -> Result<TrackTags>;

    /// Write every `Some` field (and the cover, if set) and persist the file.
    /// `None` fields are skipped, never removed.
    fn write(&self, path: &Path, tags: &TrackTags) -> Result<()>;

    /// Audio bitrate in kbps, when the container reports one.
    fn audio_bitrate(&self, path: &Path) -> Option<u32>;
}

/// [`TagAccessor`] backed by `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTags;

impl LoftyTags {
    pub fn new() -> Self {
        Self
    }

    fn extract(path: &Path, tag: &Tag) -> TrackTags {
        let mut tags = TrackTags::default();
        for field in TagField::ALL {
            let value = field
                .item_keys()
                .iter()
                .find_map(|key| tag.get_string(*key))
                .map(str::to_string);
            if value.is_none() {
                debug!("{}: no {} tag", path.display(), field.label());
            }
            tags.set(field, value);
        }

        tags.cover = tag
            .pictures()
            .iter()
            .find(|p| p.pic_type() == PictureType::CoverFront)
            .map(|p| CoverArt {
                mime_type: p
                    .mime_type()
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| "image/jpeg".to_string()),
                data: p.data().to_vec(),
            });

        tags
    }

    fn apply(path: &Path, tag: &mut Tag, tags: &TrackTags) {
        for (field, value) in tags.present() {
            let stored = field
                .item_keys()
                .iter()
                .any(|key| tag.insert_text(*key, value.to_string()));
            if !stored {
                warn!(
                    "{}: {:?} tags cannot hold the {} field",
                    path.display(),
                    tag.tag_type(),
                    field.label()
                );
            }
        }

        if let Some(cover) = &tags.cover {
            tag.remove_picture_type(PictureType::CoverFront);
            tag.push_picture(Picture::unchecked(cover.data.clone())
                    .pic_type(PictureType::CoverFront)
                    .mime_type(mime_type(&cover.mime_type))
                    .build(),
            );
        }
    }
}

fn mime_type(value: &str) -> MimeType {
    match value {
        "image/png" => MimeType::Png,
        "image/jpeg" | "image/jpg" => MimeType::Jpeg,
        "image/tiff" => MimeType::Tiff,
        "image/bmp" => MimeType::Bmp,
        "image/gif" => MimeType::Gif,
        other => MimeType::Unknown(other.to_string()),
    }
}

impl TagAccessor for LoftyTags {
    fn read(&self, path: &Path) -> Result<TrackTags> {
        let tagged = read_from_path(path).map_err(|e| Error::tag(path, e))?;

        match tagged.primary_tag().or_else(|| tagged.first_tag()) {
            Some(tag) => Ok(Self::extract(path, tag)),
            None => {
                debug!("{}: file carries no tags", path.display());
                Ok(TrackTags::default())
            }
        }
    }

    fn write(&self, path: &Path, tags: &TrackTags) -> Result<()> {
        let mut tagged = read_from_path(path).map_err(|e| Error::tag(path, e))?;

        let tag_type = tagged.primary_tag_type();
        if tagged.tag(tag_type).is_none() {
            tagged.insert_tag(Tag::new(tag_type));
        }
        let tag = tagged
            .tag_mut(tag_type)
            .ok_or_else(|| Error::NoTagContainer {
                path: path.to_path_buf(),
            })?;

        Self::apply(path, tag, tags);

        tagged
            .save_to_path(path, WriteOptions::default())
            .map_err(|e| Error::tag(path, e))
    }

    fn audio_bitrate(&self, path: &Path) -> Option<u32> {
        read_from_path(path)
            .ok()
            .and_then(|tagged| tagged.properties().audio_bitrate())
            .filter(|kbps| *kbps > 0)
    }
}
