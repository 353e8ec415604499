use super::*;
use crate::cli::Action;
use crate::error::Error;
use crate::romanize::RomanizationSystem;

use tempfile::tempdir;

fn pinyin() -> RunOptions {
    RunOptions {
        romanization: Some(RomanizationSystem::Pinyin),
        ..RunOptions::default()
    }
}

#[test]
fn romanization_keyword_is_ignored_outside_export_and_split() {
    let dir = tempdir().unwrap();
    let settings = RomanizeSettings {
        table: Some(dir.path().join("missing.toml")),
        ..RomanizeSettings::default()
    };

    for action in [Action::Import, Action::Rename, Action::FromFilenames] {
        assert!(matches!(
            transliterator_for(action, &pinyin(), &settings),
            Ok(None)
        ));
    }
    assert!(matches!(
        transliterator_for(Action::Export, &pinyin(), &settings),
        Err(Error::Io { .. })
    ));
}

#[test]
fn export_builds_a_transliterator_when_asked() {
    let settings = RomanizeSettings::default();
    assert!(matches!(
        transliterator_for(Action::Split, &pinyin(), &settings),
        Ok(Some(_))
    ));
    assert!(matches!(
        transliterator_for(Action::Export, &RunOptions::default(), &settings),
        Ok(None)
    ));
}
