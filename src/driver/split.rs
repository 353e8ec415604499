use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::aggregate::{AlbumHeader, Aggregator, FailureSite, sanitize};
use crate::descriptor::{self, AlbumDescriptor};
use crate::error::{Error, Result};
use crate::tracklist::{self, TracklistFormat};
use crate::transcode::{CutRequest, Timecode, Transcoder};

use super::{BatchDriver, BatchReport, item_name};

/// Inputs of the split workflow.
#[derive(Debug, Clone, Default)]
pub struct SplitRequest {
    /// The long recording to cut.
    pub source: PathBuf,
    /// Tracklist text file, needed for the first phase only.
    pub tracklist: Option<PathBuf>,
    /// Skips the format prompt.
    pub format: Option<TracklistFormat>,
    /// Skips the confirmation prompt.
    pub assume_yes: bool,
    pub header: AlbumHeader,
    /// Stop after this many tracks.
    pub limit: Option<usize>,
}

/// Start times of every track, checked to be present and strictly increasing.
pub(super) fn cut_points(album: &AlbumDescriptor) -> Result<Vec<Timecode>> {
    if album.tracks.is_empty() {
        return Err(Error::EmptyTracklist);
    }
    let mut points: Vec<Timecode> = Vec::with_capacity(album.tracks.len());
    for (i, track) in album.tracks.iter().enumerate() {
        let start = track
            .start_time
            .as_deref()
            .ok_or(Error::MissingStartTime { track: i + 1 })?;
        let point = Timecode::parse(start)?;
        if points.last().is_some_and(|prev| point <= *prev) {
            return Err(Error::UnorderedStartTimes {
                track: i + 1,
                start: start.to_string(),
            });
        }
        points.push(point);
    }
    Ok(points)
}

impl BatchDriver<'_> {
    /// Two-phase split. Without a descriptor, parse the tracklist and write
    /// one for the operator to review. With a descriptor, cut the source
    /// into one tagged file per track.
    pub fn split<R: BufRead, W: Write>(
        &self,
        request: &SplitRequest,
        aggregator: &Aggregator,
        transcoder: &dyn Transcoder,
        input: &mut R,
        output: &mut W,
    ) -> Result<BatchReport> {
        if self.descriptor_path.exists() {
            info!(
                "{} found, cutting {}",
                self.descriptor_path.display(),
                request.source.display()
            );
            self.cut_tracks(request, aggregator, transcoder)
        } else {
            self.checkpoint_tracklist(request, aggregator, input, output)
        }
    }

    fn checkpoint_tracklist<R: BufRead, W: Write>(
        &self,
        request: &SplitRequest,
        aggregator: &Aggregator,
        input: &mut R,
        output: &mut W,
    ) -> Result<BatchReport> {
        let Some(tracklist_path) = &request.tracklist else {
            return Err(Error::descriptor(
                &self.descriptor_path,
                "not found; pass --tracklist to create it",
            ));
        };
        let text = fs::read_to_string(tracklist_path).map_err(|e| Error::io(tracklist_path, e))?;

        let format = match request.format {
            Some(format) => format,
            None => {
                let first_line = text
                    .lines()
                    .map(|l| l.trim_start_matches('\u{feff}').trim_end())
                    .find(|l| !l.is_empty())
                    .ok_or(Error::EmptyTracklist)?;
                tracklist::prompt_format(first_line, input, output)?
            }
        };
        debug!("tracklist format {}", format.number());

        let parsed = tracklist::parse(&text, format)?;
        if !request.assume_yes {
            tracklist::confirm(&parsed, input, output)?;
        }

        let export = aggregator.album_from_tracklist(&parsed, request.header.clone());
        let mut report = BatchReport::new();
        for (site, failure) in &export.failures {
            let item = match site {
                FailureSite::Album => "album".to_string(),
                FailureSite::Track(i) => format!("track {}", i + 1),
            };
            report.warning(item, failure.to_string());
        }

        descriptor::write(&export.album, &self.descriptor_path)?;
        info!(
            "wrote {} track(s) to {}",
            export.album.tracks.len(),
            self.descriptor_path.display()
        );
        report.done(
            item_name(&self.descriptor_path),
            "review it, then run split again to cut the tracks",
        );
        Ok(report)
    }

    fn cut_tracks(
        &self,
        request: &SplitRequest,
        aggregator: &Aggregator,
        transcoder: &dyn Transcoder,
    ) -> Result<BatchReport> {
        let album = descriptor::read(&self.descriptor_path)?;
        let points = cut_points(&album)?;
        fs::metadata(&request.source).map_err(|e| Error::io(&request.source, e))?;
        let cover = self.load_cover(&album)?;

        let split = &self.settings.split;
        let bitrate_kbps = match self.tags.audio_bitrate(&request.source) {
            Some(kbps) if kbps > 0 => kbps,
            _ => {
                debug!(
                    "no bitrate reported for {}, using {} kbps",
                    request.source.display(),
                    split.default_bitrate_kbps
                );
                split.default_bitrate_kbps
            }
        };

        let count = request.limit.map_or(points.len(), |l| l.min(points.len()));
        let mut report = BatchReport::new();

        for i in 0..count {
            let number = i + 1;
            let Some(mut tags) = aggregator.resolve(&album, i) else {
                continue;
            };
            let title = tags.title.clone().unwrap_or_else(|| format!("Track {number}"));
            let file_name = format!(
                "{:0width$} {}.mp3",
                number,
                sanitize(&title),
                width = split.number_width
            );
            let out_path = self.dir.join(&file_name);

            let keep = split.skip_existing && out_path.exists();
            if keep {
                debug!("keeping existing {}", out_path.display());
            } else {
                debug!("cutting track {number} from {}s", points[i].as_secs());
                let cut = CutRequest {
                    track: number,
                    source: request.source.clone(),
                    output: out_path.clone(),
                    start: points[i],
                    end: points.get(i + 1).copied(),
                    bitrate_kbps,
                };
                if let Err(e) = transcoder.cut(&cut) {
                    warn!("{e}");
                    report.failed(file_name, e.to_string());
                    continue;
                }
            }

            if tags.track_number.is_none() {
                tags.track_number = Some(number.to_string());
            }
            tags.cover = cover.clone();
            match self.tags.write(&out_path, &tags) {
                Ok(()) if keep => report.done(file_name, "kept existing file, tagged"),
                Ok(()) => report.done(file_name, format!("cut at {bitrate_kbps} kbps and tagged")),
                Err(e) => {
                    warn!("{e}");
                    report.failed(file_name, e.to_string());
                }
            }
        }

        if count < points.len() {
            info!("stopped after {count} of {} track(s)", points.len());
        }
        Ok(report)
    }
}
