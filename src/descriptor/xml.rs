use std::fmt::Write;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::model::{AlbumDescriptor, TrackDescriptor};

const ALBUM: &str = "album";
const TRACK: &str = "track";

/// Escape special characters for XML attribute values.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

/// Append ` name="value"` when `value` is present. Absent values are omitted,
/// empty strings are written as `name=""`.
fn push_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        // Writing to a String cannot fail.
        let _ = write!(out, " {name}=\"{}\"", xml_escape(value));
    }
}

fn write_track(out: &mut String, track: &TrackDescriptor) {
    out.push_str("  <track");
    push_attr(out, "number", track.track_number.as_deref());
    push_attr(out, "start_time", track.start_time.as_deref());
    push_attr(out, "artist", track.artist.as_deref());
    push_attr(out, "title", Some(&track.title));
    push_attr(out, "year", track.year.as_deref());
    out.push_str("/>\n");
}

/// Render the descriptor document.
pub fn to_xml(album: &AlbumDescriptor) -> String {
    let mut out = String::with_capacity(128 + album.tracks.len() * 96);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<album");
    push_attr(&mut out, "name", album.name.as_deref());
    push_attr(&mut out, "artist", album.artist.as_deref());
    push_attr(&mut out, "album_artist", album.album_artist.as_deref());
    push_attr(&mut out, "year", album.year.as_deref());
    push_attr(&mut out, "cover", album.cover.as_deref());
    out.push_str(">\n");

    for track in &album.tracks {
        write_track(&mut out, track);
    }

    out.push_str("</album>\n");
    out
}

fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

/// Parse a descriptor document. `path` is only used in error messages.
pub fn from_xml(text: &str, path: &Path) -> Result<AlbumDescriptor> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != ALBUM {
        return Err(Error::descriptor(
            path,
            format!(
                "root element is <{}>, expected <{ALBUM}>",
                root.tag_name().name()
            ),
        ));
    }

    let mut album = AlbumDescriptor {
        name: attr(root, "name"),
        artist: attr(root, "artist"),
        album_artist: attr(root, "album_artist"),
        year: attr(root, "year"),
        cover: attr(root, "cover"),
        tracks: Vec::new(),
    };

    for node in root.children().filter(Node::is_element) {
        if node.tag_name().name() != TRACK {
            warn!(
                "{}: ignoring unexpected <{}> element",
                path.display(),
                node.tag_name().name()
            );
            continue;
        }
        let position = album.tracks.len() + 1;
        let title = attr(node, "title").ok_or_else(|| {
            Error::descriptor(path, format!("track {position} has no title attribute"))
        })?;
        album.tracks.push(TrackDescriptor {
            start_time: attr(node, "start_time"),
            track_number: attr(node, "number"),
            title,
            artist: attr(node, "artist"),
            year: attr(node, "year"),
        });
    }

    debug!(
        "{}: loaded descriptor with {} track(s)",
        path.display(),
        album.tracks.len()
    );
    Ok(album)
}

/// Read and parse the descriptor file at `path`.
pub fn read(path: &Path) -> Result<AlbumDescriptor> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    from_xml(&text, path)
}

/// Write the descriptor file at `path`, creating parent directories if needed.
pub fn write(album: &AlbumDescriptor, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, to_xml(album)).map_err(|e| Error::io(path, e))
}
