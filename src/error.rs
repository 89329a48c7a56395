use std::path::{Path, PathBuf};

/// Failure while processing a single asset file or folder.
///
/// Batch operations record these per path and keep going; they never abort a run.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The audio stream could not be decoded.
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: vorbis_rs::VorbisError,
    },
    #[error("could not encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: vorbis_rs::VorbisError,
    },
    #[error("image error on {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The `meta.json` sidecar is unreadable or has an unexpected shape.
    #[error("bad metadata in {}: {reason}", .path.display())]
    Metadata { path: PathBuf, reason: String },
}

impl AssetError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn metadata(path: &Path, reason: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Short label for the error class, shown in per-file error lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } | Self::Copy { .. } => "io",
            Self::Decode { .. } => "decode",
            Self::Encode { .. } => "encode",
            Self::Image { .. } => "image",
            Self::Metadata { .. } => "metadata",
        }
    }
}
