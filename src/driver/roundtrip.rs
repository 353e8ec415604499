use std::fs;

use tracing::{debug, info, warn};

use crate::aggregate::{
    Aggregator, Consensus, FailureSite, RenameMode, parse_file_name, rename_target,
};
use crate::descriptor;
use crate::error::{Error, Result};
use crate::tags::TrackTags;

use super::{BatchDriver, BatchReport, item_name};

impl BatchDriver<'_> {
    /// Read the tags of every audio file and write them to the descriptor,
    /// hoisting shared values to the album element.
    pub fn export(&self, aggregator: &Aggregator, allow_partial: bool) -> Result<BatchReport> {
        let files = self.batch_files()?;
        let mut report = BatchReport::new();
        let mut names = Vec::with_capacity(files.len());
        let mut tracks = Vec::with_capacity(files.len());

        for path in &files {
            match self.tags.read(path) {
                Ok(tags) => {
                    names.push(item_name(path));
                    tracks.push(tags);
                }
                Err(e) => {
                    warn!("{e}");
                    report.failed(item_name(path), e.to_string());
                }
            }
        }

        let unreadable = files.len() - tracks.len();
        if unreadable > 0 && (!allow_partial || tracks.is_empty()) {
            return Err(Error::Incomplete { failed: unreadable });
        }

        let export = aggregator.album_from_tags(&tracks);
        let mut album = export.album;
        for (site, failure) in &export.failures {
            let item = match site {
                FailureSite::Album => "album".to_string(),
                FailureSite::Track(i) => names[*i].clone(),
            };
            report.warning(item, failure.to_string());
        }

        if let Some(cover) = &export.cover {
            let file_name = format!("{}.{}", self.settings.descriptor.cover_stem, cover.extension());
            let cover_path = self
                .descriptor_path
                .parent()
                .unwrap_or(&self.dir)
                .join(&file_name);
            fs::write(&cover_path, &cover.data).map_err(|e| Error::io(&cover_path, e))?;
            info!("extracted shared front cover to {}", cover_path.display());
            album.cover = Some(file_name);
        }

        descriptor::write(&album, &self.descriptor_path)?;
        info!(
            "wrote {} track(s) to {}",
            album.tracks.len(),
            self.descriptor_path.display()
        );
        debug!("consensus: {:?}", export.consensus);

        for name in names {
            report.done(name, "exported");
        }
        Ok(report)
    }

    /// Apply the descriptor to the audio files, matched by position. The
    /// count guard runs before any file is written.
    pub fn import(&self, aggregator: &Aggregator) -> Result<BatchReport> {
        let files = self.batch_files()?;
        let album = descriptor::read(&self.descriptor_path)?;
        if album.tracks.len() != files.len() {
            return Err(Error::CountMismatch {
                descriptor: album.tracks.len(),
                files: files.len(),
            });
        }
        let cover = self.load_cover(&album)?;

        let mut report = BatchReport::new();
        for (i, path) in files.iter().enumerate() {
            let Some(mut tags) = aggregator.resolve(&album, i) else {
                continue;
            };
            tags.cover = cover.clone();
            match self.tags.write(path, &tags) {
                Ok(()) => report.done(item_name(path), "tags written"),
                Err(e) => {
                    warn!("{e}");
                    report.failed(item_name(path), e.to_string());
                }
            }
        }
        Ok(report)
    }

    /// Rename every file after its tags. `mode` is inferred from the
    /// artist consensus when not given.
    pub fn rename(&self, mode: Option<RenameMode>) -> Result<BatchReport> {
        let files = self.batch_files()?;
        let mut report = BatchReport::new();
        let mut readable = Vec::with_capacity(files.len());

        for path in &files {
            match self.tags.read(path) {
                Ok(tags) => readable.push((path, tags)),
                Err(e) => report.failed(item_name(path), e.to_string()),
            }
        }

        let mode = mode.unwrap_or_else(|| {
            let tags: Vec<TrackTags> = readable.iter().map(|(_, t)| t.clone()).collect();
            RenameMode::infer(&Consensus::of_tags(&tags))
        });
        debug!("rename mode: {mode:?}");

        for (path, tags) in readable {
            let name = item_name(path);
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("mp3");
            let Some(target) = rename_target(mode, &tags, ext) else {
                report.skipped(name, "missing track number or title");
                continue;
            };
            if target == name {
                report.skipped(name, "name unchanged");
                continue;
            }

            let target_path = path.with_file_name(&target);
            if target_path.exists() {
                report.failed(name, format!("{target} already exists"));
                continue;
            }
            match fs::rename(path, &target_path) {
                Ok(()) => report.done(name, format!("renamed to {target}")),
                Err(e) => report.failed(name, Error::io(path, e).to_string()),
            }
        }
        Ok(report)
    }

    /// Set track number and title from `<digits> <title>.<ext>` file names.
    pub fn import_from_filenames(&self) -> Result<BatchReport> {
        let files = self.batch_files()?;
        let mut report = BatchReport::new();

        for path in &files {
            let name = item_name(path);
            let Some((number, title)) = parse_file_name(&name) else {
                report.skipped(name, "could not parse filename");
                continue;
            };
            let tags = TrackTags {
                track_number: Some(number),
                title: Some(title),
                ..TrackTags::default()
            };
            match self.tags.write(path, &tags) {
                Ok(()) => report.done(name, "tags written"),
                Err(e) => report.failed(name, e.to_string()),
            }
        }
        Ok(report)
    }
}
