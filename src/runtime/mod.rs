use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::{debug, error, info, warn};

use crate::aggregate::{AlbumHeader, Aggregator};
use crate::cli::{Action, Cli, RunOptions};
use crate::config::{RomanizeSettings, Settings};
use crate::driver::{BatchDriver, BatchReport, SplitRequest};
use crate::error::Result;
use crate::romanize::Transliterator;
use crate::tags::LoftyTags;
use crate::transcode::FfmpegTranscoder;

mod logging;
mod settings;

#[cfg(test)]
mod tests;

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = match RunOptions::from_keywords(&cli.keywords) {
        Ok(options) => options,
        Err(msg) => Cli::command().error(ErrorKind::ArgumentConflict, msg).exit(),
    };

    logging::init(cli.verbose);
    let settings = settings::load_settings();
    debug!("settings: {settings:?}");

    match execute(&cli, &options, &settings) {
        Ok(report) => {
            println!("{report}");
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli, options: &RunOptions, settings: &Settings) -> Result<BatchReport> {
    if options.romanization.is_some() && !matches!(cli.action, Action::Export | Action::Split) {
        warn!("romanization only applies to export and split; ignoring it");
    }
    if options.rename_mode.is_some() && cli.action != Action::Rename {
        warn!("album/compilation only apply to rename; ignoring it");
    }

    let tags = LoftyTags::new();
    let mut driver = BatchDriver::new(&cli.dir, &tags, settings);
    if let Some(path) = &cli.descriptor {
        driver = driver.with_descriptor(path);
    }
    debug!("descriptor: {}", driver.descriptor_path().display());

    let transliterator = transliterator_for(cli.action, options, &settings.romanize)?;
    let aggregator = Aggregator::new(transliterator);

    match cli.action {
        Action::Export => driver.export(&aggregator, cli.allow_partial),
        Action::Import => driver.import(&aggregator),
        Action::Rename => driver.rename(options.rename_mode),
        Action::FromFilenames => driver.import_from_filenames(),
        Action::Split => {
            let request = SplitRequest {
                source: cli.source.clone().unwrap_or_default(),
                tracklist: cli.tracklist.clone(),
                format: cli.format,
                assume_yes: cli.yes,
                header: AlbumHeader {
                    name: cli.album.clone(),
                    album_artist: cli.album_artist.clone(),
                    year: cli.year.clone(),
                },
                limit: cli.limit,
            };
            let transcoder = FfmpegTranscoder::new(&settings.split.ffmpeg_path);
            let stdin = io::stdin();
            driver.split(
                &request,
                &aggregator,
                &transcoder,
                &mut stdin.lock(),
                &mut io::stdout(),
            )
        }
    }
}

/// Only export and split romanize, so other actions never load the lookup
/// table or probe the engines.
fn transliterator_for(
    action: Action,
    options: &RunOptions,
    settings: &RomanizeSettings,
) -> Result<Option<Transliterator>> {
    let Some(system) = options.romanization else {
        return Ok(None);
    };
    if !matches!(action, Action::Export | Action::Split) {
        return Ok(None);
    }
    let t = Transliterator::for_system(system, settings)?;
    info!("romanizing titles and artists with {}", t.system());
    Ok(Some(t))
}
