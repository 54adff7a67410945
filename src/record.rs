// Invoice line record

use serde::{Deserialize, Serialize};

/// One invoice line: a product, how many, at what price, plus tax
///
/// `total` is derived on construction and never set independently. Records
/// loaded from disk carry whatever total was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Factura {
    codigo_producto: String,
    nombre_producto: String,
    cantidad: i32,
    precio: f64,
    impuesto: f64,
    total: f64,
}

impl Factura {
    /// Build a record and compute `total = quantity * unit_price + tax`
    pub fn new(
        product_code: impl Into<String>,
        product_name: impl Into<String>,
        quantity: i32,
        unit_price: f64,
        tax: f64,
    ) -> Self {
        Self {
            codigo_producto: product_code.into(),
            nombre_producto: product_name.into(),
            cantidad: quantity,
            precio: unit_price,
            impuesto: tax,
            total: compute_total(quantity, unit_price, tax),
        }
    }

    pub fn product_code(&self) -> &str {
        &self.codigo_producto
    }

    pub fn product_name(&self) -> &str {
        &self.nombre_producto
    }

    pub fn quantity(&self) -> i32 {
        self.cantidad
    }

    pub fn unit_price(&self) -> f64 {
        self.precio
    }

    pub fn tax(&self) -> f64 {
        self.impuesto
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Line total, evaluated in f64
pub fn compute_total(quantity: i32, unit_price: f64, tax: f64) -> f64 {
    f64::from(quantity) * unit_price + tax
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_total() {
        let factura = Factura::new("A1", "Widget", 3, 10.0, 1.5);

        assert_eq!(factura.product_code(), "A1");
        assert_eq!(factura.product_name(), "Widget");
        assert_eq!(factura.quantity(), 3);
        assert_eq!(factura.unit_price(), 10.0);
        assert_eq!(factura.tax(), 1.5);
        assert_eq!(factura.total(), 31.5);
    }

    #[test]
    fn test_total_matches_formula() {
        let cases = [
            (2, 5.0, 0.5, 10.5),
            (0, 99.99, 0.0, 0.0),
            (-4, 2.25, 1.5, -7.5),
            (7, 0.5, 0.25, 3.75),
            (1, 0.0, 2.0, 2.0),
        ];

        for (quantity, price, tax, expected) in cases {
            let factura = Factura::new("", "", quantity, price, tax);
            assert_eq!(factura.total(), expected);
        }
    }

    #[test]
    fn test_empty_strings_allowed() {
        let factura = Factura::new("", "", 1, 1.0, 0.0);
        assert_eq!(factura.product_code(), "");
        assert_eq!(factura.product_name(), "");
    }

    #[test]
    fn test_json_keys() {
        let factura = Factura::new("B2", "Gadget", 2, 5.0, 0.5);
        let value = serde_json::to_value(&factura).unwrap();

        assert_eq!(value["codigoProducto"], "B2");
        assert_eq!(value["nombreProducto"], "Gadget");
        assert_eq!(value["cantidad"], 2);
        assert_eq!(value["precio"], 5.0);
        assert_eq!(value["impuesto"], 0.5);
        assert_eq!(value["total"], 10.5);
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_loaded_total_is_trusted() {
        let json = r#"{"codigoProducto":"X","nombreProducto":"Y","cantidad":1,"precio":2.0,"impuesto":0.0,"total":99.0}"#;
        let factura: Factura = serde_json::from_str(json).unwrap();
        assert_eq!(factura.total(), 99.0);
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"codigoProducto":"X","nombreProducto":"Y","cantidad":1,"precio":2.0,"impuesto":0.0}"#;
        assert!(serde_json::from_str::<Factura>(json).is_err());
    }
}
