//! On-disk catalog cache.
//!
//! Layout: one JSON header line, a newline, then the JSON record table.
//! The header carries a SHA-256 of the table bytes so truncated or edited
//! files are rejected instead of half-loaded.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::record::ImageRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

const CACHE_FORMAT: &str = "faceset-catalog";
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CacheHeader {
    format: String,
    version: u32,
    created_at: DateTime<Utc>,
    root: PathBuf,
    image_size: Option<u32>,
    records: usize,
    sha256: String,
}

/// Serialize `catalog` to `path`, replacing any existing file atomically.
pub fn write(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let body = serde_json::to_vec(catalog.records()).map_err(|e| CatalogError::io(path, e.into()))?;

    let header = CacheHeader {
        format: CACHE_FORMAT.to_string(),
        version: CACHE_VERSION,
        created_at: Utc::now(),
        root: catalog.root().to_path_buf(),
        image_size: catalog.image_size(),
        records: catalog.len(),
        sha256: sha256_hex(&body),
    };

    let mut out = serde_json::to_vec(&header).map_err(|e| CatalogError::io(path, e.into()))?;
    out.push(b'\n');
    out.extend_from_slice(&body);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
    }

    let tmp = tmp_path(path);
    if let Err(e) = std::fs::write(&tmp, &out) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CatalogError::io(&tmp, e));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CatalogError::io(path, e));
    }

    tracing::info!(
        path = %path.display(),
        records = header.records,
        bytes = out.len(),
        "catalog cache written"
    );
    Ok(())
}

/// Load a catalog previously written by [`write`].
///
/// Every failure, including an unreadable file, is reported as
/// [`CatalogError::CacheCorrupt`].
pub fn read(path: &Path) -> Result<Catalog, CatalogError> {
    let bytes = std::fs::read(path)
        .map_err(|e| CatalogError::corrupt(path, format!("unreadable: {e}")))?;

    let newline = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| CatalogError::corrupt(path, "missing header line"))?;
    let (head, body) = (&bytes[..newline], &bytes[newline + 1..]);

    let header: CacheHeader = serde_json::from_slice(head)
        .map_err(|e| CatalogError::corrupt(path, format!("bad header: {e}")))?;
    if header.format != CACHE_FORMAT || header.version != CACHE_VERSION {
        return Err(CatalogError::corrupt(
            path,
            format!(
                "unsupported format {} v{} (expected {CACHE_FORMAT} v{CACHE_VERSION})",
                header.format, header.version
            ),
        ));
    }
    if sha256_hex(body) != header.sha256 {
        return Err(CatalogError::corrupt(path, "checksum mismatch"));
    }

    let records: Vec<ImageRecord> = serde_json::from_slice(body)
        .map_err(|e| CatalogError::corrupt(path, format!("bad record table: {e}")))?;
    if records.len() != header.records {
        return Err(CatalogError::corrupt(
            path,
            format!("header lists {} records, table has {}", header.records, records.len()),
        ));
    }
    if records.is_empty() {
        return Err(CatalogError::corrupt(path, "empty record table"));
    }
    for record in &records {
        record
            .check_shape(header.image_size)
            .map_err(|reason| CatalogError::corrupt(path, reason))?;
    }

    tracing::debug!(
        path = %path.display(),
        created_at = %header.created_at,
        records = records.len(),
        "catalog cache read"
    );

    Ok(Catalog::from_parts(header.root, header.image_size, records))
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
