//! Date Taken resolution: embedded metadata first, then the filename,
//! reporting which source produced the value.

pub(crate) mod exif;
pub mod filename;
pub(crate) mod quicktime;

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use chrono::NaiveDateTime;
use log::debug;

use crate::category::{self, ContainerCategory};
use crate::error::Error;
use crate::exiftool;

/// Where a resolved Date Taken came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTakenSource {
    /// The file's embedded metadata (EXIF or QuickTime).
    Metadata,
    /// A timestamp recognized in the filename.
    Filename,
    /// Neither source had a value.
    None,
}

/// A resolved Date Taken together with its provenance.
///
/// The value is absent exactly when the source is
/// [`DateTakenSource::None`]; the constructors keep that invariant, so
/// the fields are not public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    date_taken: Option<NaiveDateTime>,
    source: DateTakenSource,
}

impl ResolvedDate {
    pub fn metadata(date_taken: NaiveDateTime) -> Self {
        Self {
            date_taken: Some(date_taken),
            source: DateTakenSource::Metadata,
        }
    }

    pub fn filename(date_taken: NaiveDateTime) -> Self {
        Self {
            date_taken: Some(date_taken),
            source: DateTakenSource::Filename,
        }
    }

    pub fn absent() -> Self {
        Self {
            date_taken: None,
            source: DateTakenSource::None,
        }
    }

    pub fn date_taken(&self) -> Option<NaiveDateTime> {
        self.date_taken
    }

    pub fn source(&self) -> DateTakenSource {
        self.source
    }

    pub fn is_absent(&self) -> bool {
        self.date_taken.is_none()
    }
}

/// Resolve the Date Taken of the file at `path`.
///
/// Embedded metadata wins; the filename (base name, extension stripped)
/// is the fallback; otherwise the result is absent. `path` must be
/// non-empty, absolute and refer to an existing file.
pub fn resolve_date_taken(path: impl AsRef<Path>) -> Result<ResolvedDate, Error> {
    let path = path.as_ref();
    validate(path)?;

    if let Some(dt) = metadata_date(path)? {
        return Ok(ResolvedDate::metadata(dt));
    }
    debug!("no date metadata in {}, trying filename", path.display());
    Ok(filename_fallback(path))
}

/// Resolve from embedded metadata only; the filename is never consulted.
pub fn metadata_date_taken(path: impl AsRef<Path>) -> Result<ResolvedDate, Error> {
    let path = path.as_ref();
    validate(path)?;

    Ok(match metadata_date(path)? {
        Some(dt) => ResolvedDate::metadata(dt),
        None => ResolvedDate::absent(),
    })
}

/// Resolve metadata and filename independently, with no short-circuit.
/// Returns `(metadata, filename)`; either side may be absent.
pub fn resolve_both(path: impl AsRef<Path>) -> Result<(ResolvedDate, ResolvedDate), Error> {
    let path = path.as_ref();
    validate(path)?;

    let metadata = match metadata_date(path)? {
        Some(dt) => ResolvedDate::metadata(dt),
        None => ResolvedDate::absent(),
    };
    Ok((metadata, filename_fallback(path)))
}

/// Resolve from an already-open handle.
///
/// `file_name` supplies the extension for classification and the text
/// for the filename fallback. The reader is rewound before probing. The
/// PNG CreationTime probe needs a real path and is skipped here; open
/// the file by path via [`resolve_date_taken`] to get it.
pub fn resolve_from_reader<R: BufRead + Seek>(mut reader: R, file_name: &str) -> ResolvedDate {
    if let Some(dt) = metadata_date_from_reader(&mut reader, file_name) {
        return ResolvedDate::metadata(dt);
    }
    filename::filename_date_taken(stem_of(file_name))
}

fn validate(path: &Path) -> Result<(), Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyPath);
    }
    if !path.is_absolute() {
        return Err(Error::NotAbsolute(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    Ok(())
}

fn metadata_date(path: &Path) -> Result<Option<NaiveDateTime>, Error> {
    let category = ContainerCategory::from_path(path);
    if category == ContainerCategory::Unsupported {
        return Ok(None);
    }

    // PNGs rarely carry EXIF but sometimes have a creation time only
    // exiftool can see. A hit here skips EXIF probing entirely.
    if category::is_png(path) {
        if let Some(dt) = exiftool::png_creation_time(path) {
            return Ok(Some(dt));
        }
    }

    let file = match File::open(path) {
        Ok(file) => file,
        // Some console and phone clips stat fine but deny reads; that is
        // "no metadata", not a failure.
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
        Err(source) => {
            return Err(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let mut reader = BufReader::new(file);

    Ok(match category {
        ContainerCategory::Photo => exif::exif_date(&mut reader),
        ContainerCategory::Video => quicktime::quicktime_created(&mut reader),
        ContainerCategory::Unsupported => None,
    })
}

fn metadata_date_from_reader<R: BufRead + Seek>(
    reader: &mut R,
    file_name: &str,
) -> Option<NaiveDateTime> {
    if reader.seek(SeekFrom::Start(0)).is_err() {
        return None;
    }
    match ContainerCategory::from_path(Path::new(file_name)) {
        ContainerCategory::Photo => exif::exif_date(reader),
        ContainerCategory::Video => quicktime::quicktime_created(reader),
        ContainerCategory::Unsupported => None,
    }
}

fn filename_fallback(path: &Path) -> ResolvedDate {
    filename::filename_date_taken(stem_of_path(path))
}

fn stem_of_path(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
}

fn stem_of(file_name: &str) -> &str {
    let stem = stem_of_path(Path::new(file_name));
    if stem.is_empty() {
        file_name
    } else {
        stem
    }
}
