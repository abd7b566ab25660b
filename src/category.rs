use std::path::Path;

/// Container category of a media file, derived from its extension.
///
/// The category decides which metadata schema gets probed: EXIF for
/// photos, the QuickTime movie header for videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerCategory {
    /// EXIF-capable image: `.jpg`, `.jpeg`, `.png`, `.gif`
    Photo,
    /// QuickTime-family video: `.mp4`, `.mov`, `.mkv`
    Video,
    /// Anything else; carries no date metadata this crate knows about
    Unsupported,
}

impl ContainerCategory {
    /// Classify a file extension. Case-insensitive, with or without the
    /// leading dot.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" => Self::Photo,
            "mp4" | "mov" | "mkv" => Self::Video,
            _ => Self::Unsupported,
        }
    }

    /// Classify by the extension of `path`. No extension is `Unsupported`.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(Self::Unsupported, Self::from_extension)
    }
}

/// True for `.png` specifically, which gets extra handling on both the
/// read path (exiftool CreationTime probe) and the write path (PNG tag
/// group).
pub(crate) fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
