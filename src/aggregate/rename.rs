use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;

use crate::tags::TrackTags;

use super::consensus::Consensus;

/// How renamed files are laid out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RenameMode {
    /// `<number> <title>.<ext>`
    Album,
    /// `<number> <artist> - <title>.<ext>`
    Compilation,
}

impl RenameMode {
    /// Album layout when the batch shares one artist, compilation otherwise.
    pub fn infer(consensus: &Consensus) -> Self {
        if consensus.same_artist {
            RenameMode::Album
        } else {
            RenameMode::Compilation
        }
    }
}

/// Replace characters that are not allowed in file names.
pub fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// File name for `tags` under `mode`. `None` when the track number or the
/// title is missing. In compilation mode a track without an artist falls
/// back to the album layout.
pub fn rename_target(mode: RenameMode, tags: &TrackTags, extension: &str) -> Option<String> {
    let number = tags.track_number.as_deref().map(str::trim)?;
    let title = tags.title.as_deref().map(str::trim)?;
    if number.is_empty() || title.is_empty() {
        return None;
    }

    let artist = tags
        .artist
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());

    let stem = match (mode, artist) {
        (RenameMode::Compilation, Some(artist)) => format!(
            "{} {} - {}",
            sanitize(number),
            sanitize(artist),
            sanitize(title)
        ),
        _ => format!("{} {}", sanitize(number), sanitize(title)),
    };

    Some(format!("{stem}.{extension}"))
}

/// Recover `(track_number, title)` from a `<digits> <title>.<ext>` file name.
pub fn parse_file_name(name: &str) -> Option<(String, String)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\s+(.+)\.[^.]+$").expect("file name pattern is valid")
    });
    let caps = re.captures(name)?;
    Some((caps[1].to_string(), caps[2].trim().to_string()))
}
