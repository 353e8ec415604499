//! Album aggregation: decides which values are album-wide, builds the
//! descriptor for the first phase of a workflow and resolves per-track
//! values (with album-level inheritance) for the second.

mod consensus;
mod rename;

pub use consensus::Consensus;
pub use rename::{RenameMode, parse_file_name, rename_target, sanitize};

use tracing::warn;

use crate::descriptor::{AlbumDescriptor, TrackDescriptor};
use crate::error::TransliterationFailure;
use crate::romanize::Transliterator;
use crate::tags::{CoverArt, TrackTags};
use crate::tracklist::ParsedTrack;

/// Where a romanization failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureSite {
    Album,
    /// 0-based index into the batch.
    Track(usize),
}

/// Result of building a descriptor for the first phase.
#[derive(Debug)]
pub struct AlbumExport {
    pub album: AlbumDescriptor,
    pub consensus: Consensus,
    /// Shared front cover to extract next to the descriptor, when all tracks
    /// carry the same one.
    pub cover: Option<CoverArt>,
    pub failures: Vec<(FailureSite, TransliterationFailure)>,
}

/// Album-level values supplied by the operator for a split.
#[derive(Debug, Clone, Default)]
pub struct AlbumHeader {
    pub name: Option<String>,
    pub album_artist: Option<String>,
    pub year: Option<String>,
}

/// Owns the (optional) transliterator for the run.
pub struct Aggregator {
    transliterator: Option<Transliterator>,
}

impl Aggregator {
    pub fn new(transliterator: Option<Transliterator>) -> Self {
        Self { transliterator }
    }

    /// Romanize `text` if a transliterator is configured. On failure the
    /// original text is kept and the failure is recorded.
    fn romanized(
        &self,
        text: &str,
        site: FailureSite,
        failures: &mut Vec<(FailureSite, TransliterationFailure)>,
    ) -> String {
        let Some(t) = &self.transliterator else {
            return text.to_string();
        };
        match t.decorate(text) {
            Ok(decorated) => decorated,
            Err(failure) => {
                warn!("{failure}");
                failures.push((site, failure));
                text.to_string()
            }
        }
    }

    fn romanized_opt(
        &self,
        text: Option<&str>,
        site: FailureSite,
        failures: &mut Vec<(FailureSite, TransliterationFailure)>,
    ) -> Option<String> {
        text.map(|t| self.romanized(t, site, failures))
    }

    /// Build the export descriptor from the tags of every file in the batch.
    pub fn album_from_tags(&self, tracks: &[TrackTags]) -> AlbumExport {
        let consensus = Consensus::of_tags(tracks);
        let mut failures = Vec::new();
        let first = tracks.first().cloned().unwrap_or_default();

        let hoist = |same: bool, value: &Option<String>| if same { value.clone() } else { None };

        let album_artist = if consensus.same_album_artist {
            self.romanized_opt(first.album_artist.as_deref(), FailureSite::Album, &mut failures)
        } else {
            None
        };
        let artist = if consensus.same_artist {
            self.romanized_opt(first.artist.as_deref(), FailureSite::Album, &mut failures)
        } else {
            None
        };

        let track_entries = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| TrackDescriptor {
                start_time: None,
                track_number: t.track_number.clone(),
                title: self.romanized(
                    t.title.as_deref().unwrap_or_default(),
                    FailureSite::Track(i),
                    &mut failures,
                ),
                artist: if consensus.same_artist {
                    None
                } else {
                    self.romanized_opt(t.artist.as_deref(), FailureSite::Track(i), &mut failures)
                },
                year: if consensus.same_year { None } else { t.year.clone() },
            })
            .collect();

        let album = AlbumDescriptor {
            name: hoist(consensus.same_album, &first.album),
            artist,
            album_artist,
            year: hoist(consensus.same_year, &first.year),
            cover: None,
            tracks: track_entries,
        };

        AlbumExport {
            album,
            consensus,
            cover: if consensus.same_cover { first.cover } else { None },
            failures,
        }
    }

    /// Build the split descriptor from a parsed tracklist. A shared artist
    /// becomes the album artist unless the operator supplied one.
    pub fn album_from_tracklist(&self, tracks: &[ParsedTrack], header: AlbumHeader) -> AlbumExport {
        let consensus = Consensus::of_tracklist(tracks);
        let mut failures = Vec::new();

        let shared_artist = if consensus.same_artist {
            let first = tracks.first().and_then(|t| t.artist.as_deref());
            self.romanized_opt(first, FailureSite::Album, &mut failures)
        } else {
            None
        };

        let track_entries = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| TrackDescriptor {
                start_time: t.start_time.clone(),
                track_number: None,
                title: self.romanized(&t.title, FailureSite::Track(i), &mut failures),
                artist: if consensus.same_artist {
                    None
                } else {
                    self.romanized_opt(t.artist.as_deref(), FailureSite::Track(i), &mut failures)
                },
                year: None,
            })
            .collect();

        let album = AlbumDescriptor {
            name: header.name,
            album_artist: header.album_artist.or_else(|| shared_artist.clone()),
            artist: shared_artist,
            year: header.year,
            cover: None,
            tracks: track_entries,
        };

        AlbumExport {
            album,
            consensus,
            cover: None,
            failures,
        }
    }

    pub fn resolve(&self, album: &AlbumDescriptor, index: usize) -> Option<TrackTags> {
        resolve_track(album, index)
    }
}

/// Final tag values for track `index` of `album`. Track-level artist and year
/// win over the album values; album name and album artist always come from
/// the album. The cover is left for the caller to load. An empty title is not
/// written.
pub fn resolve_track(album: &AlbumDescriptor, index: usize) -> Option<TrackTags> {
    let track = album.tracks.get(index)?;
    Some(TrackTags {
        track_number: track.track_number.clone(),
        title: Some(track.title.clone()).filter(|t| !t.is_empty()),
        artist: track.artist.clone().or_else(|| album.artist.clone()),
        album: album.name.clone(),
        album_artist: album.album_artist.clone(),
        year: track.year.clone().or_else(|| album.year.clone()),
        cover: None,
    })
}
