use std::io::{BufRead, Seek};

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};

/// Probe EXIF metadata for a Date Taken.
///
/// EXIF datetimes carry no timezone; they are local wall-clock time
/// as-is. Any decode failure, including "not an EXIF container", counts
/// as no data.
pub(crate) fn exif_date<R: BufRead + Seek>(reader: &mut R) -> Option<NaiveDateTime> {
    let exif = Reader::new().read_from_container(reader).ok()?;

    // Digitized first. In practice Original carries the same value, and
    // the bare DateTime tag is rarely populated, but probe all three.
    let tags = [Tag::DateTimeDigitized, Tag::DateTimeOriginal, Tag::DateTime];

    for tag in &tags {
        if let Some(field) = exif.get_field(*tag, In::PRIMARY) {
            let val = field.display_value().to_string();
            if let Some(dt) = parse_exif_datetime(&val) {
                return Some(dt);
            }
        }
    }

    None
}

/// Parse an EXIF-style datetime string. Cameras are sloppy about the
/// separator, so `-`, `/`, `\` and `.` are normalized to `:` first.
/// A date with no time part parses as midnight.
pub(crate) fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s
        .replace('-', ":")
        .replace('/', ":")
        .replace('\\', ":")
        .replace('.', ":");

    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(d) = chrono::NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d") {
        return Some(d.and_hms_opt(0, 0, 0)?);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_standard_exif_datetime() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 20).unwrap().and_hms_opt(17, 59, 9).unwrap();
        assert_eq!(parse_exif_datetime("2021:03:20 17:59:09"), Some(expected));
        assert_eq!(parse_exif_datetime("2021-03-20 17:59:09"), Some(expected));
        assert_eq!(parse_exif_datetime("2021/03/20 17:59:09"), Some(expected));
    }

    #[test]
    fn test_parse_date_only_falls_back_to_midnight() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 20).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_exif_datetime("2021:03:20"), Some(expected));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_exif_datetime(""), None);
        assert_eq!(parse_exif_datetime("-"), None);
        assert_eq!(parse_exif_datetime("0000:00:00 00:00:00"), None);
        assert_eq!(parse_exif_datetime("yesterday"), None);
    }

    #[test]
    fn test_exif_date_on_non_image_bytes_is_none() {
        let mut cursor = std::io::Cursor::new(b"definitely not a jpeg".to_vec());
        assert_eq!(exif_date(&mut cursor), None);
    }
}
