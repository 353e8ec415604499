//! Error types shared by every workflow.
//!
//! Fatal errors (`Parse`, `CountMismatch`, descriptor problems) abort a run
//! before any audio file is touched. Per-file errors (`Io`, `Tag`,
//! `Transcode`) are reported against the item and the batch moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A tracklist line did not match the selected format.
    #[error("line {line} does not match the selected tracklist format: {text:?}")]
    Parse { line: usize, text: String },

    /// The descriptor and the directory disagree on the number of tracks.
    #[error("descriptor lists {descriptor} track(s) but {files} audio file(s) were found")]
    CountMismatch { descriptor: usize, files: usize },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Tag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// The file was readable but carries no tag that can be written to.
    #[error("{}: no writable tag container", path.display())]
    NoTagContainer { path: PathBuf },

    #[error("{}: {message}", path.display())]
    Descriptor { path: PathBuf, message: String },

    #[error("malformed descriptor XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("track {track}: {message}")]
    Transcode { track: usize, message: String },

    /// Track `track` (1-based) has no start time, so it cannot be cut.
    #[error("track {track} has no start time")]
    MissingStartTime { track: usize },

    #[error("start time {start:?} of track {track} is not after the previous track")]
    UnorderedStartTimes { track: usize, start: String },

    #[error("invalid time code {0:?}")]
    InvalidTimecode(String),

    #[error("no audio files found in {}", .0.display())]
    NoAudioFiles(PathBuf),

    #[error("{failed} file(s) could not be read; rerun with --allow-partial to export the rest")]
    Incomplete { failed: usize },

    #[error("aborted by user")]
    Declined,

    #[error("the tracklist is empty")]
    EmptyTracklist,

    #[error("romanization table {}: {message}", path.display())]
    LookupTable { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn tag(path: impl Into<PathBuf>, source: lofty::error::LoftyError) -> Self {
        Self::Tag {
            path: path.into(),
            source,
        }
    }

    pub fn descriptor(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Descriptor {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A single string could not be romanized. Never fatal: the original text
/// is kept and the failure is reported against the item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not romanize {text:?}: {reason}")]
pub struct TransliterationFailure {
    pub text: String,
    pub reason: String,
}
