use std::io::Write;
use std::process::{Command, Stdio};

use pinyin::ToPinyin;

/// A script-specific romanizer.
pub trait Romanizer {
    /// Short name used in reports, e.g. `pinyin`.
    fn system(&self) -> &'static str;

    /// Whether `text` contains anything this romanizer would convert.
    fn applies_to(&self, text: &str) -> bool;

    /// Romanize `text`, or explain why it could not be done.
    fn romanize(&self, text: &str) -> Result<String, String>;
}

fn is_kana_or_kanji(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30ff}'   // hiragana, katakana
        | '\u{3400}'..='\u{4dbf}' // CJK extension A
        | '\u{4e00}'..='\u{9fff}' // CJK unified ideographs
        | '\u{ff66}'..='\u{ff9f}' // half-width katakana
    )
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Mandarin Hanyu Pinyin without tone marks, one space between syllables.
#[derive(Debug, Default)]
pub struct PinyinRomanizer;

impl Romanizer for PinyinRomanizer {
    fn system(&self) -> &'static str {
        "pinyin"
    }

    fn applies_to(&self, text: &str) -> bool {
        text.chars().any(|c| c.to_pinyin().is_some())
    }

    fn romanize(&self, text: &str) -> Result<String, String> {
        let mut out = String::with_capacity(text.len() * 3);
        let mut after_syllable = false;

        for c in text.chars() {
            match c.to_pinyin() {
                Some(syllable) => {
                    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
                        out.push(' ');
                    }
                    out.push_str(syllable.plain());
                    after_syllable = true;
                }
                None => {
                    if after_syllable && c.is_alphanumeric() {
                        out.push(' ');
                    }
                    out.push(c);
                    after_syllable = false;
                }
            }
        }

        let out = capitalize_first(out.trim());
        if out.is_empty() {
            return Err("no pinyin produced".to_string());
        }
        Ok(out)
    }
}

/// Japanese romaji through `kakasi`.
#[derive(Debug, Default)]
pub struct RomajiRomanizer;

impl Romanizer for RomajiRomanizer {
    fn system(&self) -> &'static str {
        "romaji"
    }

    fn applies_to(&self, text: &str) -> bool {
        text.chars().any(is_kana_or_kanji)
    }

    fn romanize(&self, text: &str) -> Result<String, String> {
        let romaji = kakasi::convert(text).romaji;
        let romaji = romaji.trim();
        if romaji.chars().any(is_kana_or_kanji) {
            return Err(format!("left unconverted characters in {romaji:?}"));
        }
        Ok(capitalize_first(romaji))
    }
}

/// Delegates to an external program: the text goes to its stdin and the
/// first line of its stdout is the romanization.
#[derive(Debug)]
pub struct CommandRomanizer {
    system: &'static str,
    program: String,
    args: Vec<String>,
}

impl CommandRomanizer {
    /// `command` is the program followed by its arguments.
    pub fn new(system: &'static str, command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            system,
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Romanizer for CommandRomanizer {
    fn system(&self) -> &'static str {
        self.system
    }

    fn applies_to(&self, text: &str) -> bool {
        text.chars().any(|c| !c.is_ascii() && c.is_alphabetic())
    }

    fn romanize(&self, text: &str) -> Result<String, String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("cannot run {}: {e}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| format!("cannot feed {}: {e}", self.program))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| format!("{} did not finish: {e}", self.program))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return Err(format!("{} printed nothing", self.program));
        }
        Ok(line.to_string())
    }
}

/// Used when a system was requested but no engine is available for it.
#[derive(Debug)]
pub struct UnavailableRomanizer {
    pub system: &'static str,
    pub reason: String,
}

impl Romanizer for UnavailableRomanizer {
    fn system(&self) -> &'static str {
        self.system
    }

    fn applies_to(&self, text: &str) -> bool {
        text.chars().any(|c| !c.is_ascii() && c.is_alphabetic())
    }

    fn romanize(&self, _text: &str) -> Result<String, String> {
        Err(self.reason.clone())
    }
}
