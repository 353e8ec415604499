use super::xml::{from_xml, to_xml, xml_escape};
use super::*;
use crate::error::Error;
use std::path::{Path, PathBuf};

fn sample() -> AlbumDescriptor {
    AlbumDescriptor {
        name: Some("Rock & Roll".into()),
        artist: Some("Band".into()),
        album_artist: Some("Band".into()),
        year: None,
        cover: Some("cover.jpg".into()),
        tracks: vec![
            TrackDescriptor {
                track_number: Some("1".into()),
                title: "Intro".into(),
                year: Some("1999".into()),
                ..TrackDescriptor::default()
            },
            TrackDescriptor {
                track_number: Some("2".into()),
                title: "\"Quoted\" <Song>".into(),
                artist: Some(String::new()),
                year: Some("2001".into()),
                ..TrackDescriptor::default()
            },
        ],
    }
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(xml_escape("a & b"), "a &amp; b");
    assert_eq!(xml_escape("<x>"), "&lt;x&gt;");
    assert_eq!(xml_escape("\"it's\""), "&quot;it&apos;s&quot;");
    assert_eq!(xml_escape("line\nbreak"), "line&#10;break");
    assert_eq!(xml_escape("南無"), "南無");
}

#[test]
fn absent_attributes_are_omitted() {
    let xml = to_xml(&sample());
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(xml.contains(
        "<album name=\"Rock &amp; Roll\" artist=\"Band\" album_artist=\"Band\" cover=\"cover.jpg\">"
    ));
    let album_line = xml.lines().nth(1).unwrap();
    assert!(!album_line.contains("year="));
    assert!(xml.contains("  <track number=\"1\" title=\"Intro\" year=\"1999\"/>\n"));
    // An explicitly empty artist is kept as such.
    assert!(xml.contains("artist=\"\""));
}

#[test]
fn document_reads_back_unchanged() {
    let album = sample();
    let parsed = from_xml(&to_xml(&album), Path::new("album.xml")).unwrap();
    assert_eq!(parsed, album);
}

#[test]
fn hand_edited_document_is_accepted() {
    let text = r#"<?xml version="1.0" encoding="utf-8"?>
<album name="Live" year="1970">
    <!-- fixed the typo below -->
    <track start_time="0:00" title="Opening"/>
    <track start_time="4:10" artist="Guest" title="Duet" extra="ignored"/>
    <note>ignored too</note>
</album>"#;
    let album = from_xml(text, Path::new("album.xml")).unwrap();
    assert_eq!(album.name.as_deref(), Some("Live"));
    assert_eq!(album.artist, None);
    assert_eq!(album.year.as_deref(), Some("1970"));
    assert_eq!(album.tracks.len(), 2);
    assert_eq!(album.tracks[0].start_time.as_deref(), Some("0:00"));
    assert_eq!(album.tracks[1].artist.as_deref(), Some("Guest"));
    assert_eq!(album.tracks[1].title, "Duet");
}

#[test]
fn track_without_title_is_rejected() {
    let text = r#"<album><track title="A"/><track number="2"/></album>"#;
    match from_xml(text, Path::new("album.xml")) {
        Err(Error::Descriptor { message, .. }) => assert!(message.contains("track 2")),
        other => panic!("expected descriptor error, got {other:?}"),
    }
}

#[test]
fn wrong_root_and_broken_xml_are_rejected() {
    assert!(matches!(
        from_xml("<playlist/>", Path::new("a.xml")),
        Err(Error::Descriptor { .. })
    ));
    assert!(matches!(
        from_xml("<album><track title=\"x\">", Path::new("a.xml")),
        Err(Error::Xml(_))
    ));
}

#[test]
fn write_then_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("album.xml");
    write(&sample(), &path).unwrap();
    assert_eq!(read(&path).unwrap(), sample());
}

#[test]
fn cover_path_is_relative_to_the_descriptor() {
    let album = sample();
    assert_eq!(
        album.cover_path(Path::new("/music/x/album.xml")),
        Some(PathBuf::from("/music/x/cover.jpg"))
    );

    let absolute = AlbumDescriptor {
        cover: Some("/art/front.png".into()),
        ..AlbumDescriptor::default()
    };
    assert_eq!(
        absolute.cover_path(Path::new("album.xml")),
        Some(PathBuf::from("/art/front.png"))
    );
    assert_eq!(AlbumDescriptor::default().cover_path(Path::new("album.xml")), None);
}
