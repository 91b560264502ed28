//! faceset — Cached, filterable catalog of labelled face images.
//!
//! Scans one directory of face photos, labels each by file name
//! (split, person, angle, orientation), decodes grayscale and RGB pixel
//! arrays, and answers conjunctive queries over the labels. The decoded
//! table can be cached on disk and reloaded verbatim.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pixels;
pub mod record;

pub use catalog::{Catalog, FaceImage, Selection};
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use faceset_core::{Angle, ColorMode, Filter, ImageLabels, Orientation, Person, Query, Split};
pub use record::ImageRecord;
