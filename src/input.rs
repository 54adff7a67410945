// Raw form input and the parsing protocol that turns it into a Factura

use crate::error::{Error, Field, Result};
use crate::record::{Factura, compute_total};
use std::str::FromStr;

/// Unparsed text fields as typed into an add/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacturaInput {
    pub code: String,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax: String,
}

impl FacturaInput {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
        tax: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            tax: tax.into(),
        }
    }

    /// Pre-fill the fields from an existing record, as an edit form does
    ///
    /// Untouched numeric fields parse back to the same values.
    pub fn from_factura(factura: &Factura) -> Self {
        Self {
            code: factura.product_code().to_string(),
            name: factura.product_name().to_string(),
            quantity: factura.quantity().to_string(),
            unit_price: factura.unit_price().to_string(),
            tax: factura.tax().to_string(),
        }
    }

    /// Validate every field and build the record
    ///
    /// Fields are checked in form order and the first failure wins. Nothing
    /// is constructed on error.
    pub fn parse(&self) -> Result<Factura> {
        let quantity: i32 = parse_field(Field::Quantity, &self.quantity)?;
        let unit_price = parse_finite(Field::UnitPrice, &self.unit_price)?;
        let tax = parse_finite(Field::Tax, &self.tax)?;

        // Finite inputs can still overflow
        let total = compute_total(quantity, unit_price, tax);
        if !total.is_finite() {
            return Err(Error::invalid_input(Field::Total, &total.to_string()));
        }

        Ok(Factura::new(
            self.code.clone(),
            self.name.clone(),
            quantity,
            unit_price,
            tax,
        ))
    }
}

/// Parse the raw text as-is; surrounding whitespace is an error
fn parse_field<T: FromStr>(field: Field, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| Error::invalid_input(field, raw))
}

/// Decimal fields tolerate surrounding whitespace and must be finite
fn parse_finite(field: Field, raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| Error::invalid_input(field, raw))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_input(field, raw))
    }
}
