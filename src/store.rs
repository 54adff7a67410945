// Factura store: in-memory collection with whole-file JSON persistence

use crate::error::{Error, Result};
use crate::json;
use crate::record::Factura;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default data file, relative to the working directory
pub const DEFAULT_FILE_NAME: &str = "facturas.json";

/// Owns the authoritative collection of facturas and the file it persists to
///
/// Records are addressed by position. Removing an element shifts every later
/// element down by one.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    facturas: Vec<Factura>,
}

impl Store {
    /// Empty store bound to `path`; nothing is read
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            facturas: Vec::new(),
        }
    }

    /// Open a store and load its collection once
    ///
    /// Never fails. If the file exists but cannot be loaded the store starts
    /// empty and the read error is handed back so the caller can warn.
    pub fn open<P: AsRef<Path>>(path: P) -> (Self, Option<Error>) {
        let mut store = Self::new(path);

        match store.load_all() {
            Ok(facturas) => {
                store.facturas = facturas;
                (store, None)
            }
            Err(e) => {
                warn!(file = ?store.path, error = %e, "Failed to load facturas, starting empty");
                (store, Some(e))
            }
        }
    }

    /// Get the data file path of this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Read the full collection from disk
    ///
    /// A missing file is an empty collection. The in-memory collection is
    /// not touched.
    pub fn load_all(&self) -> Result<Vec<Factura>> {
        json::read_json_array(&self.path)
    }

    /// Overwrite the data file with `facturas`
    ///
    /// The in-memory collection is not touched, even on failure.
    pub fn save_all(&self, facturas: &[Factura]) -> Result<()> {
        json::write_json_array(&self.path, facturas)
    }

    /// Persist the current in-memory collection
    pub fn save(&self) -> Result<()> {
        self.save_all(&self.facturas)
    }

    // ========================================================================
    // Positional CRUD
    // ========================================================================

    /// All records in insertion/load order
    pub fn list(&self) -> &[Factura] {
        &self.facturas
    }

    pub fn get(&self, index: usize) -> Option<&Factura> {
        self.facturas.get(index)
    }

    pub fn len(&self) -> usize {
        self.facturas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facturas.is_empty()
    }

    /// Append a record; the caller saves afterwards
    pub fn add(&mut self, factura: Factura) {
        debug!(index = self.facturas.len(), code = factura.product_code(), "add: appending factura");
        self.facturas.push(factura);
    }

    /// Overwrite the record at `index`, returning the previous one
    pub fn replace_at(&mut self, index: usize, factura: Factura) -> Result<Factura> {
        self.check_index(index)?;
        debug!(index, code = factura.product_code(), "replace_at: replacing factura");
        Ok(std::mem::replace(&mut self.facturas[index], factura))
    }

    /// Remove the record at `index`, shifting later records left
    pub fn remove_at(&mut self, index: usize) -> Result<Factura> {
        self.check_index(index)?;
        let removed = self.facturas.remove(index);
        info!(index, code = removed.product_code(), remaining = self.facturas.len(), "Removed factura");
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.facturas.len() {
            Ok(())
        } else {
            Err(Error::index_out_of_range(index, self.facturas.len()))
        }
    }
}
