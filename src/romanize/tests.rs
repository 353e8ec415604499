use super::*;
use crate::config::RomanizeSettings;

struct Fixed(std::result::Result<&'static str, &'static str>);

impl Romanizer for Fixed {
    fn system(&self) -> &'static str {
        "fixed"
    }

    fn applies_to(&self, text: &str) -> bool {
        !text.is_ascii()
    }

    fn romanize(&self, _text: &str) -> std::result::Result<String, String> {
        self.0.map(str::to_string).map_err(str::to_string)
    }
}

fn with(engine: Fixed, style: RomanizeStyle) -> Transliterator {
    Transliterator::new(
        LookupTable::from_entries([("張學友", "Jacky Cheung")]),
        Box::new(engine),
        style,
    )
}

#[test]
fn lookup_table_wins_over_the_engine() {
    let t = with(Fixed(Err("engine must not be called")), RomanizeStyle::OriginalFirst);
    assert_eq!(
        t.romanize("張學友").unwrap().as_deref(),
        Some("Jacky Cheung")
    );
    assert_eq!(t.decorate("張學友").unwrap(), "張學友 (Jacky Cheung)");
}

#[test]
fn styles_arrange_original_and_romanized_text() {
    let text = "夜曲";
    assert_eq!(
        with(Fixed(Ok("Ye qu")), RomanizeStyle::OriginalFirst)
            .decorate(text)
            .unwrap(),
        "夜曲 (Ye qu)"
    );
    assert_eq!(
        with(Fixed(Ok("Ye qu")), RomanizeStyle::RomanizedFirst)
            .decorate(text)
            .unwrap(),
        "Ye qu (夜曲)"
    );
    assert_eq!(
        with(Fixed(Ok("Ye qu")), RomanizeStyle::RomanizedOnly)
            .decorate(text)
            .unwrap(),
        "Ye qu"
    );
}

#[test]
fn latin_text_is_left_alone() {
    let t = with(Fixed(Err("unused")), RomanizeStyle::OriginalFirst);
    assert_eq!(t.romanize("Intro").unwrap(), None);
    assert_eq!(t.decorate("Intro").unwrap(), "Intro");
}

#[test]
fn engine_failure_names_the_text_and_system() {
    let t = with(Fixed(Err("dictionary missing")), RomanizeStyle::OriginalFirst);
    let failure = t.decorate("夜曲").unwrap_err();
    assert_eq!(failure.text, "夜曲");
    assert_eq!(failure.reason, "fixed: dictionary missing");
}

#[test]
fn pinyin_separates_syllables_and_capitalizes() {
    let p = PinyinRomanizer;
    assert!(p.applies_to("你好"));
    assert!(!p.applies_to("Hello"));
    assert_eq!(p.romanize("你好").unwrap(), "Ni hao");
    assert_eq!(p.romanize("Love 你").unwrap(), "Love ni");
}

#[test]
fn romaji_only_applies_to_japanese_scripts() {
    let r = RomajiRomanizer;
    assert!(r.applies_to("ひらがな"));
    assert!(r.applies_to("カタカナ"));
    assert!(!r.applies_to("Plain text"));
}

#[test]
fn jyutping_without_command_fails_per_item() {
    let t = Transliterator::for_system(RomanizationSystem::Jyutping, &RomanizeSettings::default())
        .unwrap();
    assert_eq!(t.system(), "jyutping");
    let failure = t.decorate("海闊天空").unwrap_err();
    assert!(failure.reason.contains("jyutping_command"));
    assert_eq!(t.decorate("Beyond").unwrap(), "Beyond");
}

#[test]
fn lookup_table_is_loaded_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.toml");
    std::fs::write(&path, "[entries]\n\"海闊天空\" = \"Hoi Fut Tin Hung\"\n").unwrap();

    let settings = RomanizeSettings {
        table: Some(path),
        ..RomanizeSettings::default()
    };
    let t = Transliterator::for_system(RomanizationSystem::Jyutping, &settings).unwrap();
    assert_eq!(t.decorate("海闊天空").unwrap(), "海闊天空 (Hoi Fut Tin Hung)");
}

#[test]
fn malformed_lookup_table_is_an_error() {
    let err = LookupTable::parse("[entries\n", std::path::Path::new("bad.toml")).unwrap_err();
    assert!(err.to_string().contains("bad.toml"));
}

#[cfg(unix)]
#[test]
fn command_romanizer_reads_first_stdout_line() {
    let cmd = vec![
        "sh".to_string(),
        "-c".to_string(),
        "cat >/dev/null; printf 'hoi1 fut3\\nignored\\n'".to_string(),
    ];
    let r = CommandRomanizer::new("jyutping", &cmd).unwrap();
    assert_eq!(r.romanize("海闊").unwrap(), "hoi1 fut3");

    let failing = vec!["sh".to_string(), "-c".to_string(), "exit 3".to_string()];
    let r = CommandRomanizer::new("jyutping", &failing).unwrap();
    assert!(r.romanize("海闊").is_err());

    assert!(CommandRomanizer::new("jyutping", &[]).is_none());
}
