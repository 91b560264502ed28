//! faceset-core — Labels and filters for a small face image collection.
//!
//! Derives split, person, angle and orientation from image file names and
//! expresses categorical queries over them. No I/O happens here; the
//! `faceset` crate owns decoding and caching.

pub mod classify;
pub mod metrics;
pub mod query;
pub mod types;

pub use classify::ImageLabels;
pub use query::{ColorMode, Filter, Query};
pub use types::{Angle, Category, Orientation, Person, Split};
