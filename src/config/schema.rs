use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/albumtag/config.toml` or `~/.config/albumtag/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ALBUMTAG__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub descriptor: DescriptorSettings,
    pub romanize: RomanizeSettings,
    pub split: SplitSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
    /// How audio files are ordered before being matched with descriptor entries.
    pub order: FileOrder,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            include_hidden: false,
            order: FileOrder::Name,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileOrder {
    /// Sort by file name (byte order).
    #[serde(alias = "sorted", alias = "filename")]
    Name,
    /// Keep whatever order the platform lists the directory in.
    #[serde(alias = "directory", alias = "unsorted")]
    Listing,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DescriptorSettings {
    /// File name of the album descriptor, relative to the working directory.
    pub file_name: String,
    /// File stem used when a shared front cover is extracted on export.
    pub cover_stem: String,
}

impl Default for DescriptorSettings {
    fn default() -> Self {
        Self {
            file_name: "album.xml".to_string(),
            cover_stem: "cover".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RomanizeSettings {
    /// How original and romanized text are combined.
    pub style: RomanizeStyle,
    /// Optional TOML file with exact-match romanizations (`[entries]` table).
    pub table: Option<PathBuf>,
    /// External program used for Jyutping: text on stdin, romanization on stdout.
    ///
    /// Example: ["python3", "-m", "my_jyutping"]
    pub jyutping_command: Vec<String>,
}

impl Default for RomanizeSettings {
    fn default() -> Self {
        Self {
            style: RomanizeStyle::OriginalFirst,
            table: None,
            jyutping_command: Vec::new(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RomanizeStyle {
    /// `Original (Romanized)`
    #[serde(alias = "original_first")]
    OriginalFirst,
    /// `Romanized (Original)`
    #[serde(alias = "romanized_first")]
    RomanizedFirst,
    /// Replace the original text.
    #[serde(alias = "romanized_only")]
    RomanizedOnly,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Path to (or name of) the ffmpeg binary.
    pub ffmpeg_path: PathBuf,
    /// Bitrate used when the source file does not report one (kbps).
    pub default_bitrate_kbps: u32,
    /// Keep output files that already exist instead of cutting them again.
    pub skip_existing: bool,
    /// Zero-padded width of the track number in output file names.
    pub number_width: usize,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            default_bitrate_kbps: 160,
            skip_existing: false,
            number_width: 2,
        }
    }
}
