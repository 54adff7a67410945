// JSON array file operations

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Read every element of a JSON array document
///
/// A missing file yields an empty vector. Any other I/O failure, or content
/// that is not an array of `T`, is a `PersistenceRead` error.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(file = ?path, "JSON file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(read_error(path, e)),
    };

    let reader = BufReader::new(file);
    let records: Vec<T> = serde_json::from_reader(reader).map_err(|e| read_error(path, e))?;

    info!(file = ?path, count = records.len(), "Loaded records from JSON");

    Ok(records)
}

/// Overwrite `path` with `records` as a pretty-printed JSON array
///
/// The file is truncated and rewritten in place. A failure part-way through
/// can leave a truncated file behind.
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|e| write_error(path, e))?;

    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| write_error(path, e))?;

    info!(file = ?path, count = records.len(), "Saved records to JSON");

    Ok(())
}

fn read_error<E>(path: &Path, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::PersistenceRead {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

fn write_error<E>(path: &Path, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::PersistenceWrite {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}
