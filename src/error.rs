use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors reported by this crate.
///
/// "No date found" is never an error: it is the absent
/// [`ResolvedDate`](crate::ResolvedDate). Errors are reserved for bad
/// arguments and for failures of the environment (unreadable file,
/// exiftool missing or exiting non-zero).
#[derive(Debug, Error)]
pub enum Error {
    #[error("path is empty")]
    EmptyPath,

    #[error("path is not absolute: {0:?}")]
    NotAbsolute(PathBuf),

    #[error("file does not exist: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to launch exiftool: {0}")]
    ExifToolLaunch(#[source] std::io::Error),

    #[error("exiftool exited with {status}: {stderr}")]
    ExifTool { status: ExitStatus, stderr: String },
}
