use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// A tagless MPEG-1 Layer III stream: 128 kbps, 44.1 kHz, no padding.
fn silent_mp3(path: &Path) {
    const FRAME_LEN: usize = 417;
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
    let mut bytes = Vec::with_capacity(FRAME_LEN * 20);
    for _ in 0..20 {
        bytes.extend_from_slice(&frame);
    }
    fs::write(path, bytes).unwrap();
}

#[test]
fn get_and_set_address_the_same_field() {
    let mut tags = TrackTags::default();
    for field in TagField::ALL {
        assert_eq!(tags.get(field), None);
        tags.set(field, Some(field.label().to_string()));
    }
    assert_eq!(tags.title.as_deref(), Some("title"));
    assert_eq!(tags.album_artist.as_deref(), Some("album artist"));
    assert_eq!(tags.get(TagField::Year), Some("year"));
    assert_eq!(tags.present().count(), TagField::ALL.len());
}

#[test]
fn empty_string_is_a_value_not_an_absence() {
    let tags = TrackTags {
        artist: Some(String::new()),
        ..TrackTags::default()
    };
    let present: Vec<_> = tags.present().collect();
    assert_eq!(present, vec![(TagField::Artist, "")]);
}

#[test]
fn cover_extension_follows_mime_type() {
    let png = CoverArt {
        mime_type: CoverArt::mime_for_extension("PNG").to_string(),
        data: vec![1, 2, 3],
    };
    assert_eq!(png.extension(), "png");

    let fallback = CoverArt {
        mime_type: "image/x-unknown".to_string(),
        data: Vec::new(),
    };
    assert_eq!(fallback.extension(), "jpg");
    assert_eq!(CoverArt::mime_for_extension("jpeg"), "image/jpeg");
}

#[test]
fn reading_a_non_audio_file_fails_for_that_item() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.mp3");
    fs::write(&path, b"definitely not mpeg").unwrap();

    let err = LoftyTags::new().read(&path).unwrap_err();
    assert!(matches!(err, crate::error::Error::Tag { .. }));
    assert!(err.to_string().contains("notes.mp3"));
}

#[test]
fn lofty_write_then_read_keeps_values_and_skips_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("01 Intro.mp3");
    silent_mp3(&path);

    let accessor = LoftyTags::new();
    assert_eq!(accessor.read(&path).unwrap(), TrackTags::default());

    let first = TrackTags {
        track_number: Some("1".into()),
        title: Some("Intro".into()),
        artist: Some("Band".into()),
        album: Some("Debut".into()),
        album_artist: Some("Band".into()),
        year: Some("2003".into()),
        cover: Some(CoverArt {
            mime_type: "image/png".into(),
            data: vec![0x89, b'P', b'N', b'G', 1, 2, 3, 4],
        }),
    };
    accessor.write(&path, &first).unwrap();

    // Only the title changes; everything else must survive.
    let second = TrackTags {
        title: Some("Overture".into()),
        ..TrackTags::default()
    };
    accessor.write(&path, &second).unwrap();

    let read = accessor.read(&path).unwrap();
    assert_eq!(read.title.as_deref(), Some("Overture"));
    assert_eq!(read.track_number.as_deref(), Some("1"));
    assert_eq!(read.artist.as_deref(), Some("Band"));
    assert_eq!(read.album.as_deref(), Some("Debut"));
    assert_eq!(read.album_artist.as_deref(), Some("Band"));
    assert_eq!(read.year.as_deref(), Some("2003"));
    assert_eq!(read.cover, first.cover);
}
