use super::*;
use crate::error::Error;
use std::io::Cursor;

fn track(start: &str, artist: Option<&str>, title: &str) -> ParsedTrack {
    ParsedTrack {
        start_time: Some(start.to_string()),
        artist: artist.map(str::to_string),
        title: title.to_string(),
    }
}

#[test]
fn each_format_extracts_its_fields() {
    assert_eq!(
        TracklistFormat::TimeTitle.parse_line("01:23 My Song"),
        Some(track("01:23", None, "My Song"))
    );
    assert_eq!(
        TracklistFormat::BracketedTimeTitle.parse_line("[01:23] My Song"),
        Some(track("01:23", None, "My Song"))
    );
    assert_eq!(
        TracklistFormat::NumberedTitleTime.parse_line("07.My Song [1:02:03]"),
        Some(track("1:02:03", None, "My Song"))
    );
    assert_eq!(
        TracklistFormat::TimeArtistTitle.parse_line("01:23 Artist - My Song"),
        Some(track("01:23", Some("Artist"), "My Song"))
    );
}

#[test]
fn artist_format_splits_on_the_last_separator() {
    assert_eq!(
        TracklistFormat::TimeArtistTitle.parse_line("01:23 Artist - Song - Live"),
        Some(track("01:23", Some("Artist - Song"), "Live"))
    );
    // Hyphens without surrounding spaces belong to the name.
    assert_eq!(
        TracklistFormat::TimeArtistTitle.parse_line("12:00 Jay-Z - Song"),
        Some(track("12:00", Some("Jay-Z"), "Song"))
    );
}

#[test]
fn lines_must_match_from_the_start() {
    assert_eq!(TracklistFormat::TimeTitle.parse_line("Intro 00:00"), None);
    assert_eq!(TracklistFormat::BracketedTimeTitle.parse_line("00:00 Intro"), None);
    assert_eq!(TracklistFormat::TimeArtistTitle.parse_line("00:00 Intro"), None);
}

#[test]
fn parse_skips_blank_lines_and_handles_crlf() {
    let text = "00:00 Intro\r\n\r\n03:15 Verse\r\n";
    let tracks = parse(text, TracklistFormat::TimeTitle).unwrap();
    assert_eq!(
        tracks,
        vec![track("00:00", None, "Intro"), track("03:15", None, "Verse")]
    );
}

#[test]
fn parse_reports_the_first_bad_line() {
    let text = "[00:00] Intro\n[03:15] Verse\n03:40 Chorus\n[05:00] Outro\n";
    match parse(text, TracklistFormat::BracketedTimeTitle) {
        Err(Error::Parse { line, text }) => {
            assert_eq!(line, 3);
            assert_eq!(text, "03:40 Chorus");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn parse_rejects_an_empty_tracklist() {
    assert!(matches!(
        parse("\n  \n", TracklistFormat::TimeTitle),
        Err(Error::EmptyTracklist)
    ));
}

#[test]
fn prompt_format_reasks_until_valid() {
    let mut input = Cursor::new("7\nabc\n4\n");
    let mut output = Vec::new();
    let format = prompt_format("00:00 A - B", &mut input, &mut output).unwrap();
    assert_eq!(format, TracklistFormat::TimeArtistTitle);

    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("00:00 A - B"));
    assert!(shown.contains("3:   00.Title [00:00]"));
    assert!(shown.contains("'7' is not one of the listed formats."));
}

#[test]
fn prompt_format_aborts_on_end_of_input() {
    let mut input = Cursor::new("");
    let mut output = Vec::new();
    assert!(matches!(
        prompt_format("x", &mut input, &mut output),
        Err(Error::Declined)
    ));
}

#[test]
fn confirm_accepts_default_and_declines_on_n() {
    let tracks = vec![track("00:00", None, "Intro")];

    let mut output = Vec::new();
    assert!(confirm(&tracks, &mut Cursor::new("\n"), &mut output).is_ok());
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains(r#"{start_time: "00:00", title: "Intro"}"#));

    let mut output = Vec::new();
    assert!(confirm(&tracks, &mut Cursor::new("y\n"), &mut output).is_ok());

    let mut output = Vec::new();
    assert!(matches!(
        confirm(&tracks, &mut Cursor::new("N\n"), &mut output),
        Err(Error::Declined)
    ));

    // Closed stdin is not a yes.
    let mut output = Vec::new();
    assert!(matches!(
        confirm(&tracks, &mut Cursor::new(""), &mut output),
        Err(Error::Declined)
    ));
}
