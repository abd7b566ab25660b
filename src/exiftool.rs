//! Thin wrapper around the external `exiftool` binary: reads the
//! PNG-only CreationTime tag and writes Date Taken fields in place.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Output};

use chrono::{Local, LocalResult, NaiveDateTime, TimeZone};
use log::trace;

use crate::category::{self, ContainerCategory};
use crate::date::exif::parse_exif_datetime;
use crate::error::Error;

const EXIFTOOL: &str = "exiftool";

/// Run exiftool with `args`, waiting for it to exit.
fn run_exiftool<I, S>(args: I) -> Result<Output, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(EXIFTOOL);
    cmd.args(args);
    trace!("running {:?}", cmd);

    let output = cmd.output().map_err(Error::ExifToolLaunch)?;
    if !output.status.success() {
        return Err(Error::ExifTool {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output)
}

/// Read the PNG-only CreationTime tag of the file at `path`.
///
/// `-T` makes exiftool print one line per file, `-` when the tag is
/// missing; anything unparseable counts as absent, as does any failure
/// to run the tool.
pub(crate) fn png_creation_time(path: &Path) -> Option<NaiveDateTime> {
    let output = run_exiftool([
        path.as_os_str(),
        OsStr::new("-T"),
        OsStr::new("-PNG:CreationTime"),
    ])
    .ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_exif_datetime(stdout.lines().next()?.trim())
}

/// Write the Date Taken fields of the file at `path` in place, or clear
/// them when `new_value` is `None`.
///
/// Photo dates are written as given, as local wall-clock time. Video
/// dates are converted to UTC first: exiftool treats unmarked QuickTime
/// timestamps as UTC no matter the host timezone. An unsupported
/// extension is a silent no-op. Blocks until exiftool has exited, so an
/// immediate read-back observes the write. There is no retry.
pub fn write_date_taken(
    path: impl AsRef<Path>,
    new_value: Option<NaiveDateTime>,
) -> Result<(), Error> {
    let path = path.as_ref();
    let args = match ContainerCategory::from_path(path) {
        ContainerCategory::Photo => photo_args(path, new_value, category::is_png(path)),
        ContainerCategory::Video => video_args(path, new_value.map(local_to_utc)),
        ContainerCategory::Unsupported => return Ok(()),
    };
    run_exiftool(args).map(|_| ())
}

fn photo_args(path: &Path, value: Option<NaiveDateTime>, is_png: bool) -> Vec<OsString> {
    let dt = format_datetime(value);
    let mut args: Vec<OsString> = vec![
        path.into(),
        "-overwrite_original".into(),
        format!("-AllDates={dt}").into(),
    ];
    if is_png {
        // exiftool only applies the PNG group to PNG files, so these are
        // passed for .png alone.
        args.push(format!("-PNG:CreationTime={dt}").into());
        args.push(format!("-PNG:ModifyDate={dt}").into());
    }
    args
}

fn video_args(path: &Path, value: Option<NaiveDateTime>) -> Vec<OsString> {
    let dt = format_datetime(value);
    let mut args: Vec<OsString> = vec![path.into(), "-overwrite_original".into()];
    for field in [
        "-CreateDate=",
        "-ModifyDate=",
        "-Track*Date=",
        "-Media*Date=",
        "-Quicktime:DateTimeOriginal=",
    ] {
        args.push(format!("{field}{dt}").into());
    }
    args
}

/// `YYYY:M:D H:mm:ss` — month, day and hour unpadded, minutes and
/// seconds padded, exactly what exiftool accepts for date fields.
/// `None` formats as the empty string, which exiftool takes as "remove
/// this field".
fn format_datetime(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format("%Y:%-m:%-d %-H:%M:%S").to_string(),
        None => String::new(),
    }
}

/// Reinterpret a local wall-clock time as UTC. Ambiguous DST times take
/// the earlier mapping; nonexistent ones pass through unchanged.
fn local_to_utc(dt: NaiveDateTime) -> NaiveDateTime {
    match Local.from_local_datetime(&dt) {
        LocalResult::Single(local) => local.naive_utc(),
        LocalResult::Ambiguous(earliest, _) => earliest.naive_utc(),
        LocalResult::None => dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_format_unpadded_month_day_hour() {
        assert_eq!(format_datetime(Some(dt(2021, 3, 5, 7, 9, 4))), "2021:3:5 7:09:04");
        assert_eq!(format_datetime(Some(dt(2019, 11, 26, 21, 6, 42))), "2019:11:26 21:06:42");
    }

    #[test]
    fn test_format_clearing_is_empty() {
        assert_eq!(format_datetime(None), "");
    }

    #[test]
    fn test_photo_args_for_jpg() {
        let args = photo_args(Path::new("/photos/a.jpg"), Some(dt(2021, 3, 20, 17, 59, 9)), false);
        let expected: Vec<OsString> = vec![
            "/photos/a.jpg".into(),
            "-overwrite_original".into(),
            "-AllDates=2021:3:20 17:59:09".into(),
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn test_photo_args_for_png_add_png_fields() {
        let args = photo_args(Path::new("/photos/shot.png"), Some(dt(2020, 12, 26, 21, 6, 42)), true);
        let expected: Vec<OsString> = vec![
            "/photos/shot.png".into(),
            "-overwrite_original".into(),
            "-AllDates=2020:12:26 21:06:42".into(),
            "-PNG:CreationTime=2020:12:26 21:06:42".into(),
            "-PNG:ModifyDate=2020:12:26 21:06:42".into(),
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn test_video_args_set_all_date_fields() {
        let args = video_args(Path::new("/videos/clip.mov"), Some(dt(2019, 5, 1, 20, 20, 0)));
        let expected: Vec<OsString> = vec![
            "/videos/clip.mov".into(),
            "-overwrite_original".into(),
            "-CreateDate=2019:5:1 20:20:00".into(),
            "-ModifyDate=2019:5:1 20:20:00".into(),
            "-Track*Date=2019:5:1 20:20:00".into(),
            "-Media*Date=2019:5:1 20:20:00".into(),
            "-Quicktime:DateTimeOriginal=2019:5:1 20:20:00".into(),
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn test_clearing_args() {
        let args = photo_args(Path::new("/photos/a.jpg"), None, false);
        assert!(args.contains(&OsString::from("-AllDates=")));

        let args = video_args(Path::new("/videos/clip.mp4"), None);
        assert!(args.contains(&OsString::from("-CreateDate=")));
        assert!(args.contains(&OsString::from("-Quicktime:DateTimeOriginal=")));
    }

    #[test]
    fn test_unsupported_extension_write_is_a_noop() {
        // No exiftool invocation happens, so this succeeds even when the
        // file does not exist and the tool is not installed.
        assert!(write_date_taken("/nowhere/readme.txt", None).is_ok());
    }
}
