use std::io::{Read, Seek};

use chrono::NaiveDateTime;
use nom_exif::{EntryValue, MediaParser, MediaSource, TrackInfo, TrackInfoTag};

/// Read the movie-header created date of a QuickTime-family container
/// (`.mp4`, `.mov`, `.mkv`).
///
/// QuickTime stores the value as UTC; it is returned as stored. Parse
/// failures and permission-style failures (seen with some console and
/// phone clips) count as no data.
pub(crate) fn quicktime_created<R: Read + Seek>(reader: R) -> Option<NaiveDateTime> {
    let source = MediaSource::seekable(reader).ok()?;
    if !source.has_track() {
        return None;
    }

    let mut parser = MediaParser::new();
    let info: TrackInfo = parser.parse(source).ok()?;

    match info.get(TrackInfoTag::CreateDate) {
        Some(EntryValue::Time(created)) => Some(created.naive_utc()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_non_video_bytes_are_none() {
        let cursor = Cursor::new(b"definitely not a movie".to_vec());
        assert_eq!(quicktime_created(cursor), None);
    }

    #[test]
    fn test_empty_stream_is_none() {
        let cursor = Cursor::new(Vec::new());
        assert_eq!(quicktime_created(cursor), None);
    }
}
