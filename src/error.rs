// Error kinds surfaced by the record store

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause behind a persistence failure (I/O or JSON)
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the library. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Data file exists but could not be read or parsed
    #[error("failed to load facturas from {}: {source}", .path.display())]
    PersistenceRead {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    /// Data file could not be serialized or written
    #[error("failed to save facturas to {}: {source}", .path.display())]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    /// Raw form input did not parse into the required numeric type
    #[error("invalid {field}: {value:?}")]
    InvalidInput { field: Field, value: String },

    /// Positional target is outside `[0, len)`
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: i64, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Form field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Quantity,
    UnitPrice,
    Tax,
    Total,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Quantity => write!(f, "cantidad"),
            Field::UnitPrice => write!(f, "precio"),
            Field::Tax => write!(f, "impuesto"),
            Field::Total => write!(f, "total"),
        }
    }
}

impl Error {
    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        }
    }

    pub(crate) fn invalid_input(field: Field, value: &str) -> Self {
        Error::InvalidInput {
            field,
            value: value.to_string(),
        }
    }

    /// True for failures that touched the data file
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::PersistenceRead { .. } | Error::PersistenceWrite { .. })
    }
}
