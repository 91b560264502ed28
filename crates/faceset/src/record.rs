use faceset_core::{Angle, ImageLabels, Orientation, Person, Split};
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One catalog row: a source image, its labels and its pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRecord {
    pub split: Option<Split>,
    pub person: Option<Person>,
    pub angle: Option<Angle>,
    pub orientation: Option<Orientation>,
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// `(height, width)` intensities.
    pub grayscale: Array2<u8>,
    /// `(height, width, 3)` colour pixels, absent when RGB retention is off.
    pub rgb: Option<Array3<u8>>,
}

impl ImageRecord {
    pub fn new(
        labels: ImageLabels,
        path: PathBuf,
        grayscale: Array2<u8>,
        rgb: Option<Array3<u8>>,
    ) -> Self {
        Self {
            split: labels.split,
            person: labels.person,
            angle: labels.angle,
            orientation: labels.orientation,
            path,
            grayscale,
            rgb,
        }
    }

    pub fn labels(&self) -> ImageLabels {
        ImageLabels {
            split: self.split,
            person: self.person,
            angle: self.angle,
            orientation: self.orientation,
        }
    }

    /// `(height, width)` of the record's pixel arrays.
    pub fn dimensions(&self) -> (usize, usize) {
        self.grayscale.dim()
    }

    /// Check that the grayscale and RGB arrays describe the same pixels,
    /// and that both are `size`×`size` when `size` is given.
    pub fn check_shape(&self, size: Option<u32>) -> Result<(), String> {
        let (h, w) = self.grayscale.dim();
        if let Some(rgb) = &self.rgb {
            if rgb.dim() != (h, w, 3) {
                return Err(format!(
                    "{}: rgb shape {:?} does not match grayscale shape {:?}",
                    self.path.display(),
                    rgb.dim(),
                    (h, w)
                ));
            }
        }
        if let Some(size) = size {
            let size = size as usize;
            if (h, w) != (size, size) {
                return Err(format!(
                    "{}: shape {:?}, expected {:?}",
                    self.path.display(),
                    (h, w),
                    (size, size)
                ));
            }
        }
        Ok(())
    }
}
