use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::date::ResolvedDate;

// One general pattern instead of a list of exact layouts: a 14-digit
// timestamp split year/month/day/hour/minute/second, with at most one
// separator between components. The optional leading group swallows an
// unrelated numeric id plus one separator (Steam screenshots put one
// before the real timestamp).
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+[-_\.: ])?(\d{4})[-_\.: ]?(\d{2})[-_\.: ]?(\d{2})[-_\.: ]?(\d{2})[-_\.: ]?(\d{2})[-_\.: ]?(\d{2})",
    )
    .unwrap()
});

/// Six numeric groups pulled out of a filename, not yet calendar-checked.
struct TimestampCandidate {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    /// A junk numeric id preceded the timestamp. Informational only.
    #[allow(dead_code)]
    had_prefix: bool,
}

impl TimestampCandidate {
    /// Calendar validation: month 13 or day 32 digits match the pattern
    /// but do not form a date.
    fn into_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)
    }
}

/// Extract a Date Taken from a filename like `IMG_20210320_175909.jpg`,
/// `Capture 2020-12-26 21_03_05.png` or `2020-10-06_13.53.33.png`.
///
/// Only the first match counts. Digit runs that do not form a valid
/// calendar date yield an absent result, never an error. The extension
/// may be present or not; this function never touches the filesystem, so
/// a full path also works, at the risk of false matches against path
/// segments. Callers should prefer passing the base name.
pub fn filename_date_taken(filename: &str) -> ResolvedDate {
    match candidate(filename).and_then(TimestampCandidate::into_datetime) {
        Some(dt) => ResolvedDate::filename(dt),
        None => ResolvedDate::absent(),
    }
}

fn candidate(filename: &str) -> Option<TimestampCandidate> {
    let caps = TIMESTAMP_RE.captures(filename)?;
    let group = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    Some(TimestampCandidate {
        year: caps.get(2)?.as_str().parse().ok()?,
        month: group(3)?,
        day: group(4)?,
        hour: group(5)?,
        minute: group(6)?,
        second: group(7)?,
        had_prefix: caps.get(1).is_some(),
    })
}
