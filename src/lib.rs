// Facturas - invoice line catalog persisted as a JSON array file

pub mod config;
pub mod error;
pub mod form;
pub mod input;
pub mod json;
pub mod record;
pub mod store;
pub mod table;

// Re-export main types for convenience
pub use config::Config;
pub use error::{Error, Field, Result};
pub use form::{FormMode, FormSession, FormState, Submitted};
pub use input::FacturaInput;
pub use record::Factura;
pub use store::{DEFAULT_FILE_NAME, Store};
pub use table::render_table;
