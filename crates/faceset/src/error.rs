use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("image directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("no .{extension} images in {dir}")]
    NoImages { dir: PathBuf, extension: String },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("pixel buffer of {path} does not fit its dimensions: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: ndarray::ShapeError,
    },
    #[error("cache file {path} is unusable: {reason} — delete it to rebuild")]
    CacheCorrupt { path: PathBuf, reason: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CacheCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when a cache file exists but could not be used.
    ///
    /// The catalog never rebuilds on its own in that case; callers decide
    /// whether to delete the file and call `load_or_build` again.
    pub fn is_cache_corrupt(&self) -> bool {
        matches!(self, Self::CacheCorrupt { .. })
    }
}
