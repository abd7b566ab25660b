//! Determine the Date Taken of a photo or video file.
//!
//! Embedded metadata is checked first (EXIF date tags for photos, the
//! QuickTime movie-header created date for videos), then the filename is
//! scanned for a 14-digit timestamp. Every "no date found" condition is
//! an absent [`ResolvedDate`], never an error. A separate write path
//! shells out to `exiftool` to set or clear the Date Taken fields in
//! place.
//!
//! ```no_run
//! use date_taken::{resolve_date_taken, DateTakenSource};
//!
//! let resolved = resolve_date_taken("/photos/IMG_20210320_175909.jpg")?;
//! assert_eq!(resolved.source(), DateTakenSource::Filename);
//! # Ok::<(), date_taken::Error>(())
//! ```

pub mod category;
pub mod date;
mod error;
mod exiftool;

pub use category::ContainerCategory;
pub use date::filename::filename_date_taken;
pub use date::{
    metadata_date_taken, resolve_both, resolve_date_taken, resolve_from_reader, DateTakenSource,
    ResolvedDate,
};
pub use error::Error;
pub use exiftool::write_date_taken;
