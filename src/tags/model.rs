use lofty::tag::ItemKey;

/// The text fields albumtag reads and writes. The front cover is carried
/// separately in [`TrackTags::cover`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagField {
    TrackNumber,
    Title,
    Artist,
    Album,
    AlbumArtist,
    Year,
}

impl TagField {
    pub const ALL: [TagField; 6] = [
        TagField::TrackNumber,
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::AlbumArtist,
        TagField::Year,
    ];

    /// Item keys backing this field, in order of preference. Reads take the
    /// first key present; writes go to the first key the tag format accepts.
    pub fn item_keys(self) -> &'static [ItemKey] {
        match self {
            TagField::TrackNumber => &[ItemKey::TrackNumber],
            TagField::Title => &[ItemKey::TrackTitle],
            TagField::Artist => &[ItemKey::TrackArtist],
            TagField::Album => &[ItemKey::AlbumTitle],
            TagField::AlbumArtist => &[ItemKey::AlbumArtist],
            TagField::Year => &[ItemKey::RecordingDate, ItemKey::Year],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagField::TrackNumber => "track number",
            TagField::Title => "title",
            TagField::Artist => "artist",
            TagField::Album => "album",
            TagField::AlbumArtist => "album artist",
            TagField::Year => "year",
        }
    }
}

/// Embedded front cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl CoverArt {
    /// Guess the MIME type from an image file extension.
    pub fn mime_for_extension(ext: &str) -> &'static str {
        match ext.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            _ => "image/jpeg",
        }
    }

    /// File extension to use when writing this cover to disk.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "jpg",
        }
    }
}

/// Tag values of one audio file.
///
/// `None` means "not present" and is distinct from `Some("")`. When written,
/// `None` fields are left untouched on the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub track_number: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub year: Option<String>,
    pub cover: Option<CoverArt>,
}

impl TrackTags {
    pub fn get(&self, field: TagField) -> Option<&str> {
        match field {
            TagField::TrackNumber => self.track_number.as_deref(),
            TagField::Title => self.title.as_deref(),
            TagField::Artist => self.artist.as_deref(),
            TagField::Album => self.album.as_deref(),
            TagField::AlbumArtist => self.album_artist.as_deref(),
            TagField::Year => self.year.as_deref(),
        }
    }

    pub fn set(&mut self, field: TagField, value: Option<String>) {
        let slot = match field {
            TagField::TrackNumber => &mut self.track_number,
            TagField::Title => &mut self.title,
            TagField::Artist => &mut self.artist,
            TagField::Album => &mut self.album,
            TagField::AlbumArtist => &mut self.album_artist,
            TagField::Year => &mut self.year,
        };
        *slot = value;
    }

    /// Iterate over the text fields that carry a value.
    pub fn present(&self) -> impl Iterator<Item = (TagField, &str)> {
        TagField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|v| (field, v)))
    }
}
