//! Romanization of titles and artist names written in non-Latin scripts.
//!
//! A [`Transliterator`] first looks the whole string up in a [`LookupTable`]
//! and only then asks its [`Romanizer`] engine. It is built once per run and
//! handed to the aggregator.

mod engines;
mod table;

pub use engines::*;
pub use table::LookupTable;

use clap::ValueEnum;
use tracing::{debug, info};

use crate::config::{RomanizeSettings, RomanizeStyle};
use crate::error::{Result, TransliterationFailure};

/// Romanization systems selectable on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RomanizationSystem {
    Pinyin,
    Jyutping,
    Romaji,
}

pub struct Transliterator {
    table: LookupTable,
    romanizer: Box<dyn Romanizer>,
    style: RomanizeStyle,
}

impl Transliterator {
    pub fn new(table: LookupTable, romanizer: Box<dyn Romanizer>, style: RomanizeStyle) -> Self {
        Self {
            table,
            romanizer,
            style,
        }
    }

    /// Build the transliterator for `system` from settings, loading the
    /// lookup table when one is configured.
    pub fn for_system(system: RomanizationSystem, settings: &RomanizeSettings) -> Result<Self> {
        let table = match &settings.table {
            Some(path) => {
                let table = LookupTable::load(path)?;
                info!(
                    "loaded {} romanization(s) from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            None => LookupTable::default(),
        };

        let romanizer: Box<dyn Romanizer> = match system {
            RomanizationSystem::Pinyin => Box::new(PinyinRomanizer),
            RomanizationSystem::Romaji => Box::new(RomajiRomanizer),
            RomanizationSystem::Jyutping => {
                match CommandRomanizer::new("jyutping", &settings.jyutping_command) {
                    Some(cmd) => Box::new(cmd),
                    None => Box::new(UnavailableRomanizer {
                        system: "jyutping",
                        reason: "romanize.jyutping_command is not configured".to_string(),
                    }),
                }
            }
        };

        Ok(Self::new(table, romanizer, settings.style))
    }

    pub fn system(&self) -> &'static str {
        self.romanizer.system()
    }

    /// The bare romanization of `text`, or `None` when there is nothing to
    /// romanize.
    pub fn romanize(&self, text: &str) -> std::result::Result<Option<String>, TransliterationFailure> {
        if let Some(hit) = self.table.get(text) {
            debug!("lookup table hit for {text:?}");
            return Ok(Some(hit.to_string()));
        }
        if !self.romanizer.applies_to(text) {
            return Ok(None);
        }
        self.romanizer
            .romanize(text)
            .map(Some)
            .map_err(|reason| TransliterationFailure {
                text: text.to_string(),
                reason: format!("{}: {reason}", self.romanizer.system()),
            })
    }

    /// `text` combined with its romanization according to the configured
    /// style. Text with nothing to romanize comes back unchanged.
    pub fn decorate(&self, text: &str) -> std::result::Result<String, TransliterationFailure> {
        let Some(romanized) = self.romanize(text)? else {
            return Ok(text.to_string());
        };
        if romanized == text {
            return Ok(text.to_string());
        }
        Ok(match self.style {
            RomanizeStyle::OriginalFirst => format!("{text} ({romanized})"),
            RomanizeStyle::RomanizedFirst => format!("{romanized} ({text})"),
            RomanizeStyle::RomanizedOnly => romanized,
        })
    }
}

#[cfg(test)]
mod tests;
