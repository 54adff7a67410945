// Plain-text table of facturas

use crate::record::Factura;

/// Column headers, after the leading index column
pub const HEADERS: [&str; 6] = [
    "Código Producto",
    "Nombre Producto",
    "Cantidad",
    "Precio",
    "Impuesto",
    "Total",
];

const INDEX_HEADER: &str = "#";
const EMPTY_MESSAGE: &str = "(no hay facturas)";

/// Render the collection as an aligned table, one row per record in order
///
/// The first line is the header row and the second a separator. Widths are
/// counted in chars so accented headers line up.
pub fn render_table(facturas: &[Factura]) -> String {
    let header: Vec<String> = std::iter::once(INDEX_HEADER)
        .chain(HEADERS)
        .map(str::to_string)
        .collect();
    let rows: Vec<Vec<String>> = facturas.iter().enumerate().map(|(i, f)| row(i, f)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &separator, &widths);

    if rows.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
    }
    for row in &rows {
        push_line(&mut out, row, &widths);
    }

    out
}

/// Cells for one record, index first
pub fn row(index: usize, factura: &Factura) -> Vec<String> {
    vec![
        index.to_string(),
        factura.product_code().to_string(),
        factura.product_name().to_string(),
        factura.quantity().to_string(),
        factura.unit_price().to_string(),
        factura.tax().to_string(),
        factura.total().to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
