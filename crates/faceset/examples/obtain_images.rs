//! Typical queries against the face catalog.
//!
//! Reads `FACESET_*` settings from the environment, loads (or builds and
//! caches) the catalog, and prints the shape of a few selections.
//!
//! ```text
//! FACESET_IMAGE_DIR=./images RUST_LOG=info cargo run --example obtain_images
//! ```

use anyhow::{Context, Result};
use faceset::{Angle, Catalog, CatalogConfig, ColorMode, Orientation, Person, Query, Selection};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CatalogConfig::from_env();
    let catalog = Catalog::open(&config).with_context(|| {
        format!(
            "opening catalog from {} (cache {})",
            config.image_dir.display(),
            config.cache_path.display()
        )
    })?;
    tracing::info!(records = catalog.len(), root = %catalog.root().display(), "catalog ready");

    let queries = [
        ("all akshay, grayscale", Query::new().person(Person::Akshay)),
        (
            "nabilah at 30°, grayscale",
            Query::new().person(Person::Nabilah).angle(Angle::Deg30),
        ),
        (
            "45° facing left, grayscale",
            Query::new().angle(Angle::Deg45).orientation(Orientation::Left),
        ),
        (
            "akshay at 0°, rgb",
            Query::new()
                .person(Person::Akshay)
                .angle(Angle::Deg0)
                .color(ColorMode::Rgb),
        ),
    ];

    for (name, query) in queries {
        let selection = catalog.query(&query)?;
        println!("{name}: {}", describe(&selection));
    }

    Ok(())
}

fn describe(selection: &Selection) -> String {
    match selection.stacked() {
        Some(batch) => format!("{:?}", batch.shape()),
        None if selection.is_empty() => "no images".to_string(),
        None => format!("{} images of differing sizes", selection.len()),
    }
}
