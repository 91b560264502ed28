use std::path::PathBuf;

const DEFAULT_IMAGE_SIZE: u32 = 256;
const DEFAULT_EXTENSION: &str = "jpg";

/// Catalog settings, loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the face images (default: ../images).
    pub image_dir: PathBuf,
    /// Where the decoded catalog is cached between runs.
    pub cache_path: PathBuf,
    /// Square side length images are resized to. `None` keeps source size.
    pub image_size: Option<u32>,
    /// File extension of catalog images, without the dot, case-insensitive.
    pub extension: String,
    /// Keep the RGB array of every record in memory and in the cache.
    /// When false, RGB queries decode the source files again.
    pub keep_rgb: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("../images"),
            cache_path: default_cache_dir().join("catalog.json"),
            image_size: Some(DEFAULT_IMAGE_SIZE),
            extension: DEFAULT_EXTENSION.to_string(),
            keep_rgb: true,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from `FACESET_*` environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let image_size = match env_u32("FACESET_IMAGE_SIZE") {
            Some(0) => None,
            Some(size) => Some(size),
            None => defaults.image_size,
        };

        Self {
            image_dir: std::env::var("FACESET_IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.image_dir),
            cache_path: std::env::var("FACESET_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_path),
            image_size,
            extension: std::env::var("FACESET_EXTENSION")
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or(defaults.extension),
            keep_rgb: std::env::var("FACESET_KEEP_RGB")
                .map(|v| v != "0")
                .unwrap_or(defaults.keep_rgb),
        }
    }

    /// Does `ext` (no leading dot) name a catalog image?
    pub fn accepts_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(&self.extension)
    }
}

fn default_cache_dir() -> PathBuf {
    std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".cache")
        })
        .join("faceset")
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
