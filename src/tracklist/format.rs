use std::fmt;
use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;

use crate::error::{Error, Result};

/// Supported tracklist line layouts. Selected by the user, never guessed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TracklistFormat {
    /// `00:00 Title`
    #[value(name = "1", alias = "time-title")]
    TimeTitle,
    /// `[00:00] Title`
    #[value(name = "2", alias = "bracketed-time-title")]
    BracketedTimeTitle,
    /// `00.Title [00:00]`
    #[value(name = "3", alias = "numbered-title-time")]
    NumberedTitleTime,
    /// `00:00 Artist - Title`
    #[value(name = "4", alias = "time-artist-title")]
    TimeArtistTitle,
}

/// Which capture group feeds which field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Slot {
    StartTime,
    Artist,
    Title,
}

/// One tracklist line after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTrack {
    pub start_time: Option<String>,
    pub artist: Option<String>,
    pub title: String,
}

impl fmt::Display for ParsedTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        if let Some(start) = &self.start_time {
            write!(f, "start_time: {start:?}, ")?;
        }
        if let Some(artist) = &self.artist {
            write!(f, "artist: {artist:?}, ")?;
        }
        write!(f, "title: {:?}}}", self.title)
    }
}

impl TracklistFormat {
    pub const ALL: [TracklistFormat; 4] = [
        TracklistFormat::TimeTitle,
        TracklistFormat::BracketedTimeTitle,
        TracklistFormat::NumberedTitleTime,
        TracklistFormat::TimeArtistTitle,
    ];

    /// 1-based menu number.
    pub fn number(self) -> usize {
        match self {
            TracklistFormat::TimeTitle => 1,
            TracklistFormat::BracketedTimeTitle => 2,
            TracklistFormat::NumberedTitleTime => 3,
            TracklistFormat::TimeArtistTitle => 4,
        }
    }

    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.number() == n)
    }

    pub fn example(self) -> &'static str {
        match self {
            TracklistFormat::TimeTitle => "00:00 Title",
            TracklistFormat::BracketedTimeTitle => "[00:00] Title",
            TracklistFormat::NumberedTitleTime => "00.Title [00:00]",
            TracklistFormat::TimeArtistTitle => "00:00 Artist - Title",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            TracklistFormat::TimeTitle => r"^([\d:]+)\s+(.+)$",
            TracklistFormat::BracketedTimeTitle => r"^\[([\d:]+)\]\s+(.+)$",
            TracklistFormat::NumberedTitleTime => r"^\d+\.(.+?)\s+\[([\d:]+)\]$",
            TracklistFormat::TimeArtistTitle => r"^([\d:]+)\s+(.+)\s-\s(.+)$",
        }
    }

    fn slots(self) -> &'static [Slot] {
        match self {
            TracklistFormat::TimeTitle | TracklistFormat::BracketedTimeTitle => {
                &[Slot::StartTime, Slot::Title]
            }
            TracklistFormat::NumberedTitleTime => &[Slot::Title, Slot::StartTime],
            TracklistFormat::TimeArtistTitle => &[Slot::StartTime, Slot::Artist, Slot::Title],
        }
    }

    fn regex(self) -> &'static Regex {
        static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
        let all = REGEXES.get_or_init(|| {
            Self::ALL
                .iter()
                .map(|f| Regex::new(f.pattern()).expect("tracklist patterns are valid"))
                .collect()
        });
        &all[self.number() - 1]
    }

    /// Match one line. Returns `None` when the line does not fit this format.
    pub fn parse_line(self, line: &str) -> Option<ParsedTrack> {
        let caps = self.regex().captures(line)?;
        let mut track = ParsedTrack::default();
        for (i, slot) in self.slots().iter().enumerate() {
            let value = caps.get(i + 1)?.as_str().trim().to_string();
            match slot {
                Slot::StartTime => track.start_time = Some(value),
                Slot::Artist => track.artist = Some(value),
                Slot::Title => track.title = value,
            }
        }
        Some(track)
    }
}

/// Parse a whole tracklist. Blank lines are ignored; the first line that
/// does not match aborts the parse.
pub fn parse(text: &str, format: TracklistFormat) -> Result<Vec<ParsedTrack>> {
    let mut tracks = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start_matches('\u{feff}').trim_end();
        if line.trim().is_empty() {
            continue;
        }
        match format.parse_line(line) {
            Some(track) => tracks.push(track),
            None => {
                return Err(Error::Parse {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    if tracks.is_empty() {
        return Err(Error::EmptyTracklist);
    }
    Ok(tracks)
}
