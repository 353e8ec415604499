//! Cutting one long recording into per-track files with an external ffmpeg.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// A cut point in whole seconds, parsed from `ss`, `mm:ss` or `hh:mm:ss`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timecode(u64);

impl Timecode {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }

    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidTimecode(text.to_string());
        let parts: Vec<&str> = text.trim().split(':').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(invalid());
        }

        let mut secs = 0u64;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let value: u64 = part.parse().map_err(|_| invalid())?;
            // Every field after the first is a base-60 digit.
            if i > 0 && value >= 60 {
                return Err(invalid());
            }
            secs = secs.checked_mul(60).and_then(|s| s.checked_add(value)).ok_or_else(invalid)?;
        }
        Ok(Self::from_secs(secs))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = (self.0 / 3600, self.0 / 60 % 60, self.0 % 60);
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

/// One output file to produce from the source recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutRequest {
    /// 1-based track position, used in error reports.
    pub track: usize,
    pub source: PathBuf,
    pub output: PathBuf,
    pub start: Timecode,
    /// `None` cuts to the end of the source.
    pub end: Option<Timecode>,
    pub bitrate_kbps: u32,
}

pub trait Transcoder {
    fn cut(&self, request: &CutRequest) -> Result<()>;
}

pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Arguments passed to ffmpeg for `request`.
    pub fn args(request: &CutRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-i".into(),
            request.source.clone().into(),
            "-ss".into(),
            request.start.to_string().into(),
        ];
        if let Some(end) = request.end {
            args.push("-to".into());
            args.push(end.to_string().into());
        }
        args.push("-b:a".into());
        args.push(format!("{}k", request.bitrate_kbps).into());
        args.push(request.output.clone().into());
        args
    }
}

impl Transcoder for FfmpegTranscoder {
    fn cut(&self, request: &CutRequest) -> Result<()> {
        let args = Self::args(request);
        debug!("running {} {:?}", self.ffmpeg_path.display(), args);

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::Transcode {
                track: request.track,
                message: format!("could not run {}: {e}", self.ffmpeg_path.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
            return Err(Error::Transcode {
                track: request.track,
                message: format!("ffmpeg exited with {}: {last}", output.status),
            });
        }
        Ok(())
    }
}
