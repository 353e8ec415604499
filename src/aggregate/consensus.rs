use crate::tags::TrackTags;
use crate::tracklist::ParsedTrack;

/// True when every item yields the same key as the first one. Empty input
/// agrees trivially.
fn agree<'a, T, K, F>(items: &'a [T], key: F) -> bool
where
    K: PartialEq,
    F: Fn(&'a T) -> K,
{
    let mut keys = items.iter().map(&key);
    match keys.next() {
        Some(first) => keys.all(|k| k == first),
        None => true,
    }
}

/// Which fields are shared by the whole batch and can be hoisted to the
/// album element. `None` counts as a value: two absent artists agree, an
/// absent and an empty one do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consensus {
    pub same_artist: bool,
    pub same_year: bool,
    pub same_album: bool,
    pub same_album_artist: bool,
    pub same_cover: bool,
}

impl Consensus {
    pub fn of_tags(tracks: &[TrackTags]) -> Self {
        Self {
            same_artist: agree(tracks, |t| t.artist.as_deref()),
            same_year: agree(tracks, |t| t.year.as_deref()),
            same_album: agree(tracks, |t| t.album.as_deref()),
            same_album_artist: agree(tracks, |t| t.album_artist.as_deref()),
            same_cover: agree(tracks, |t| t.cover.as_ref().map(|c| c.data.as_slice())),
        }
    }

    /// Tracklists only carry artists; the other fields come from the
    /// command line and are album-wide by construction.
    pub fn of_tracklist(tracks: &[ParsedTrack]) -> Self {
        Self {
            same_artist: agree(tracks, |t| t.artist.as_deref()),
            same_year: true,
            same_album: true,
            same_album_artist: true,
            same_cover: true,
        }
    }
}
