//! Image decoding into grayscale and RGB pixel arrays.

use crate::error::CatalogError;
use image::imageops::FilterType;
use image::RgbImage;
use ndarray::{Array2, Array3};
use std::path::Path;

// ITU-R BT.601 luma weights.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Both pixel representations of one decoded image.
pub struct DecodedImage {
    /// `(height, width)`
    pub grayscale: Array2<u8>,
    /// `(height, width, 3)`
    pub rgb: Array3<u8>,
}

/// Read and decode `path`, resizing to `size`×`size` with bilinear filtering
/// when `size` is set.
///
/// The format is detected from the file contents, not the extension.
pub fn decode_file(path: &Path, size: Option<u32>) -> Result<DecodedImage, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    let img = image::load_from_memory(&bytes).map_err(|source| CatalogError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rgb = img.to_rgb8();
    if let Some(size) = size {
        if rgb.dimensions() != (size, size) {
            rgb = image::imageops::resize(&rgb, size, size, FilterType::Triangle);
        }
    }

    let rgb = rgb_to_array(&rgb).map_err(|source| CatalogError::Shape {
        path: path.to_path_buf(),
        source,
    })?;
    let grayscale = to_grayscale(&rgb);

    tracing::trace!(
        path = %path.display(),
        height = rgb.dim().0,
        width = rgb.dim().1,
        "decoded image"
    );

    Ok(DecodedImage { grayscale, rgb })
}

/// Copy an interleaved RGB buffer into a `(height, width, 3)` array.
pub fn rgb_to_array(img: &RgbImage) -> Result<Array3<u8>, ndarray::ShapeError> {
    let (width, height) = img.dimensions();
    Array3::from_shape_vec((height as usize, width as usize, 3), img.as_raw().clone())
}

/// BT.601 luma of every pixel.
pub fn to_grayscale(rgb: &Array3<u8>) -> Array2<u8> {
    let (height, width, _) = rgb.dim();
    Array2::from_shape_fn((height, width), |(y, x)| {
        let r = rgb[[y, x, 0]] as f32;
        let g = rgb[[y, x, 1]] as f32;
        let b = rgb[[y, x, 2]] as f32;
        (LUMA_R * r + LUMA_G * g + LUMA_B * b).round().clamp(0.0, 255.0) as u8
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn write_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 128])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_grayscale_weights() {
        let mut rgb = Array3::<u8>::zeros((1, 4, 3));
        rgb[[0, 0, 0]] = 255; // red
        rgb[[0, 1, 1]] = 255; // green
        rgb[[0, 2, 2]] = 255; // blue
        for c in 0..3 {
            rgb[[0, 3, c]] = 255; // white
        }
        let gray = to_grayscale(&rgb);
        assert_eq!(gray.dim(), (1, 4));
        assert_eq!(gray[[0, 0]], 76);
        assert_eq!(gray[[0, 1]], 150);
        assert_eq!(gray[[0, 2]], 29);
        assert_eq!(gray[[0, 3]], 255);
    }

    #[test]
    fn test_rgb_to_array_layout() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 9]));
        let arr = rgb_to_array(&img).unwrap();
        assert_eq!(arr.dim(), (2, 3, 3));
        assert_eq!(arr[[1, 2, 0]], 2);
        assert_eq!(arr[[1, 2, 1]], 1);
        assert_eq!(arr[[1, 2, 2]], 9);
    }

    #[test]
    fn test_decode_resizes_to_square() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train_akshay_0_l_1.jpg");
        write_jpeg(&path, 40, 24);

        let decoded = decode_file(&path, Some(16)).unwrap();
        assert_eq!(decoded.rgb.dim(), (16, 16, 3));
        assert_eq!(decoded.grayscale.dim(), (16, 16));
    }

    #[test]
    fn test_decode_keeps_source_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.jpg");
        write_jpeg(&path, 40, 24);

        let decoded = decode_file(&path, None).unwrap();
        assert_eq!(decoded.rgb.dim(), (24, 40, 3));
        assert_eq!(decoded.grayscale.dim(), (24, 40));
    }

    #[test]
    fn test_decode_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = decode_file(&path, Some(16)).err().unwrap();
        assert!(matches!(err, CatalogError::Decode { .. }), "{err}");
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode_file(Path::new("/nonexistent/face.jpg"), None).err().unwrap();
        assert!(matches!(err, CatalogError::Io { .. }), "{err}");
    }
}
