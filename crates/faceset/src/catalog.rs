use crate::cache;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::pixels;
use crate::record::ImageRecord;
use faceset_core::{ColorMode, ImageLabels, Person, Query};
use ndarray::{Array2, Array3, ArrayD, ArrayViewD, Axis};
use std::path::{Path, PathBuf};

/// Immutable, ordered table of labelled face images.
///
/// Build it once with [`Catalog::build`] or [`Catalog::load_or_build`] and
/// pass `&Catalog` to whatever needs to query it. Records keep the sorted
/// file name order of the source directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    image_size: Option<u32>,
    records: Vec<ImageRecord>,
}

/// Pixels of one query result.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceImage {
    /// `(height, width)`
    Gray(Array2<u8>),
    /// `(height, width, 3)`
    Rgb(Array3<u8>),
}

impl FaceImage {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            FaceImage::Gray(a) => a.dim(),
            FaceImage::Rgb(a) => {
                let (h, w, _) = a.dim();
                (h, w)
            }
        }
    }

    pub fn as_gray(&self) -> Option<&Array2<u8>> {
        match self {
            FaceImage::Gray(a) => Some(a),
            FaceImage::Rgb(_) => None,
        }
    }

    pub fn as_rgb(&self) -> Option<&Array3<u8>> {
        match self {
            FaceImage::Rgb(a) => Some(a),
            FaceImage::Gray(_) => None,
        }
    }

    pub fn view(&self) -> ArrayViewD<'_, u8> {
        match self {
            FaceImage::Gray(a) => a.view().into_dyn(),
            FaceImage::Rgb(a) => a.view().into_dyn(),
        }
    }
}

/// Owned result of [`Catalog::query`]; nothing in it borrows the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub images: Vec<FaceImage>,
    /// Source file of each image, same order.
    pub paths: Vec<PathBuf>,
    /// Person of each image, present only when the query asked for labels.
    pub labels: Option<Vec<Option<Person>>>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// All images stacked along a new leading axis: `(n, h, w)` for grayscale,
    /// `(n, h, w, 3)` for RGB.
    ///
    /// Returns `None` for an empty selection or when shapes differ.
    pub fn stacked(&self) -> Option<ArrayD<u8>> {
        let views: Vec<ArrayViewD<'_, u8>> = self.images.iter().map(FaceImage::view).collect();
        ndarray::stack(Axis(0), &views).ok()
    }
}

impl Catalog {
    /// Scan `dir`, label every image by file name, and decode its pixels.
    ///
    /// Either every matching file is decoded or an error is returned; no
    /// partial catalog is produced.
    pub fn build(dir: &Path, config: &CatalogConfig) -> Result<Self, CatalogError> {
        if !dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound(dir.to_path_buf()));
        }
        let root = dir.canonicalize().map_err(|e| CatalogError::io(dir, e))?;

        let files = list_images(&root, config)?;
        if files.is_empty() {
            return Err(CatalogError::NoImages {
                dir: root,
                extension: config.extension.clone(),
            });
        }

        tracing::info!(
            dir = %root.display(),
            files = files.len(),
            image_size = ?config.image_size,
            keep_rgb = config.keep_rgb,
            "building catalog"
        );

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let labels = ImageLabels::from_path(&path);
            if !labels.is_complete() {
                tracing::warn!(
                    file = %path.display(),
                    unresolved = ?labels.unresolved(),
                    "file name did not match every label token"
                );
            }

            let decoded = pixels::decode_file(&path, config.image_size)?;
            tracing::debug!(file = %path.display(), ?labels, "catalogued image");

            let rgb = config.keep_rgb.then_some(decoded.rgb);
            records.push(ImageRecord::new(labels, path, decoded.grayscale, rgb));
        }

        tracing::info!(records = records.len(), "catalog built");

        Ok(Self::from_parts(root, config.image_size, records))
    }

    /// Load the catalog from `cache_path` if it exists, otherwise build it
    /// from `dir` and write the cache.
    ///
    /// A cache that exists but cannot be decoded is an error, never a
    /// silent rebuild.
    pub fn load_or_build(
        dir: &Path,
        cache_path: &Path,
        config: &CatalogConfig,
    ) -> Result<Self, CatalogError> {
        if cache_path.exists() {
            let catalog = cache::read(cache_path)?;
            if catalog.image_size != config.image_size {
                tracing::warn!(
                    cached = ?catalog.image_size,
                    configured = ?config.image_size,
                    "cached catalog was built with a different image size"
                );
            }
            tracing::info!(
                cache = %cache_path.display(),
                records = catalog.len(),
                "loaded catalog from cache"
            );
            return Ok(catalog);
        }

        let catalog = Self::build(dir, config)?;
        cache::write(&catalog, cache_path)?;
        Ok(catalog)
    }

    /// [`load_or_build`](Self::load_or_build) with the directory and cache
    /// path taken from `config`.
    pub fn open(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::load_or_build(&config.image_dir, &config.cache_path, config)
    }

    pub(crate) fn from_parts(
        root: PathBuf,
        image_size: Option<u32>,
        records: Vec<ImageRecord>,
    ) -> Self {
        Self {
            root,
            image_size,
            records,
        }
    }

    /// Records satisfying every filter of `query`, in catalog order.
    pub fn matching<'a>(&'a self, query: &Query) -> impl Iterator<Item = &'a ImageRecord> + 'a {
        let query = *query;
        self.records
            .iter()
            .filter(move |record| query.matches(&record.labels()))
    }

    /// Copy out the images (and optionally person labels) of every record
    /// matching `query`.
    ///
    /// Only RGB queries against records whose RGB array was not retained
    /// touch the disk, and only those can fail.
    pub fn query(&self, query: &Query) -> Result<Selection, CatalogError> {
        let mut selection = Selection {
            labels: query.with_labels.then(Vec::new),
            ..Selection::default()
        };

        for record in self.matching(query) {
            let image = match query.color {
                ColorMode::Grayscale => FaceImage::Gray(record.grayscale.clone()),
                ColorMode::Rgb => FaceImage::Rgb(self.rgb_of(record)?),
            };
            selection.images.push(image);
            selection.paths.push(record.path.clone());
            if let Some(labels) = selection.labels.as_mut() {
                labels.push(record.person);
            }
        }

        tracing::debug!(?query, matched = selection.len(), "catalog query");
        Ok(selection)
    }

    fn rgb_of(&self, record: &ImageRecord) -> Result<Array3<u8>, CatalogError> {
        match &record.rgb {
            Some(rgb) => Ok(rgb.clone()),
            None => Ok(pixels::decode_file(&record.path, self.image_size)?.rgb),
        }
    }

    /// Canonical source directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Square side length images were resized to, if any.
    pub fn image_size(&self) -> Option<u32> {
        self.image_size
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Files directly inside `dir` with the configured extension, sorted by name.
fn list_images(dir: &Path, config: &CatalogConfig) -> Result<Vec<PathBuf>, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CatalogError::io(dir, e))?.path();
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| config.accepts_extension(ext))
            .unwrap_or(false);
        if accepted && path.is_file() {
            files.push(path);
        }
    }

    // read_dir order depends on the filesystem
    files.sort();
    Ok(files)
}
