use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::aggregate::RenameMode;
use crate::romanize::RomanizationSystem;
use crate::tracklist::TracklistFormat;

#[derive(Parser, Debug)]
#[command(name = "albumtag", version)]
#[command(about = "Export, import, rename and split MP3 albums through an editable album.xml")]
pub struct Cli {
    /// What to do with the files in --dir
    #[arg(value_enum)]
    pub action: Action,

    /// Option keywords: a romanization system and/or a rename layout
    #[arg(value_enum)]
    pub keywords: Vec<Keyword>,

    /// Directory holding the audio files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Descriptor file (default: <dir>/album.xml, see descriptor.file_name)
    #[arg(long)]
    pub descriptor: Option<PathBuf>,

    /// Recording to cut (split)
    #[arg(short, long, required_if_eq("action", "split"))]
    pub source: Option<PathBuf>,

    /// Tracklist text file (first split phase)
    #[arg(short, long)]
    pub tracklist: Option<PathBuf>,

    /// Tracklist format number; asked interactively when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<TracklistFormat>,

    /// Accept the parsed tracklist without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Only cut the first N tracks (split)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Export even if some files could not be read
    #[arg(long)]
    pub allow_partial: bool,

    /// Album name written to the descriptor (split)
    #[arg(long)]
    pub album: Option<String>,

    /// Album artist written to the descriptor (split)
    #[arg(long)]
    pub album_artist: Option<String>,

    /// Year written to the descriptor (split)
    #[arg(long)]
    pub year: Option<String>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Write the tags of every file to the descriptor
    Export,
    /// Write the descriptor back to the files
    Import,
    /// Rename files after their tags
    Rename,
    /// Parse a tracklist, then cut a recording into tagged tracks
    Split,
    /// Set track number and title from "<nn> <title>.mp3" file names
    FromFilenames,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Keyword {
    Pinyin,
    Jyutping,
    Romaji,
    Album,
    Compilation,
}

/// Behaviour selected by the option keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub romanization: Option<RomanizationSystem>,
    pub rename_mode: Option<RenameMode>,
}

impl RunOptions {
    /// Collect keywords, rejecting two romanization systems or two layouts.
    pub fn from_keywords(keywords: &[Keyword]) -> Result<Self, String> {
        let mut options = RunOptions::default();
        for &keyword in keywords {
            match keyword {
                Keyword::Pinyin | Keyword::Jyutping | Keyword::Romaji => {
                    let system = match keyword {
                        Keyword::Pinyin => RomanizationSystem::Pinyin,
                        Keyword::Jyutping => RomanizationSystem::Jyutping,
                        _ => RomanizationSystem::Romaji,
                    };
                    if options.romanization.is_some_and(|s| s != system) {
                        return Err("only one romanization system can be selected".to_string());
                    }
                    options.romanization = Some(system);
                }
                Keyword::Album | Keyword::Compilation => {
                    let mode = if keyword == Keyword::Album {
                        RenameMode::Album
                    } else {
                        RenameMode::Compilation
                    };
                    if options.rename_mode.is_some_and(|m| m != mode) {
                        return Err("choose either `album` or `compilation`".to_string());
                    }
                    options.rename_mode = Some(mode);
                }
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn keywords_follow_the_action() {
        let cli = Cli::try_parse_from(["albumtag", "export", "pinyin", "--dir", "music"]).unwrap();
        assert_eq!(cli.action, Action::Export);
        assert_eq!(cli.keywords, [Keyword::Pinyin]);
        assert_eq!(cli.dir, PathBuf::from("music"));

        let cli = Cli::try_parse_from(["albumtag", "from-filenames"]).unwrap();
        assert_eq!(cli.action, Action::FromFilenames);
    }

    #[test]
    fn split_needs_a_source() {
        assert!(Cli::try_parse_from(["albumtag", "split"]).is_err());
        let cli =
            Cli::try_parse_from(["albumtag", "split", "-s", "live.mp3", "-f", "4", "--yes"]).unwrap();
        assert_eq!(cli.format, Some(TracklistFormat::TimeArtistTitle));
        assert!(cli.yes);
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["albumtag"]).is_err());
        assert!(Cli::try_parse_from(["albumtag", "dump"]).is_err());
    }

    #[test]
    fn keywords_build_run_options() {
        let options = RunOptions::from_keywords(&[Keyword::Jyutping, Keyword::Compilation]).unwrap();
        assert_eq!(options.romanization, Some(RomanizationSystem::Jyutping));
        assert_eq!(options.rename_mode, Some(RenameMode::Compilation));

        assert!(RunOptions::from_keywords(&[Keyword::Pinyin, Keyword::Romaji]).is_err());
        assert!(RunOptions::from_keywords(&[Keyword::Album, Keyword::Compilation]).is_err());
        assert!(RunOptions::from_keywords(&[Keyword::Album, Keyword::Album]).is_ok());
    }
}
