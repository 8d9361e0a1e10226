//! JSON persistence for the catalog.
//!
//! Files hold a JSON array of records, pretty-printed with a four-space indent
//! and non-ASCII text written literally. Saving goes through a temporary file
//! in the destination directory that is renamed over the target, so a failed
//! save never leaves a truncated file behind. Loading only decodes; callers
//! run each candidate through the validator.

use crate::error::StoreError;
use crate::record::Record;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

const INDENT: &[u8] = b"    ";

/// Encode records as the persisted text form.
pub fn encode(records: &[Record]) -> Result<String, StoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Encode { source })?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|err| StoreError::Encode {
        source: serde_json::Error::custom(err),
    })
}

/// Decode persisted bytes into unvalidated candidates.
///
/// The bytes must be a UTF-8 JSON array; its elements are returned as-is.
/// Invalid UTF-8 is a decode failure like any other malformed content.
pub fn decode(bytes: impl AsRef<[u8]>, origin: &str) -> Result<Vec<Value>, StoreError> {
    serde_json::from_slice::<Vec<Value>>(bytes.as_ref()).map_err(|source| StoreError::Decode {
        origin: origin.to_string(),
        source,
    })
}

/// Atomically replace `path` with the encoded records.
pub fn save(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    let text = encode(records)?;
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    staged.write_all(text.as_bytes()).map_err(io_err)?;
    staged.as_file().sync_all().map_err(io_err)?;
    debug!(staged = %staged.path().display(), "staged catalog file");
    staged.persist(path).map_err(|err| io_err(err.error))?;

    info!(path = %path.display(), records = records.len(), "saved catalog");
    Ok(())
}

/// Read and decode `path` into candidates.
pub fn load(path: &Path) -> Result<Vec<Value>, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let candidates = decode(&bytes, &path.display().to_string())?;
    debug!(path = %path.display(), candidates = candidates.len(), "decoded catalog file");
    Ok(candidates)
}
