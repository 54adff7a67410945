//! Demo 01: Basic CRUD Operations
//!
//! Walks through loading, adding, editing and deleting facturas, saving the
//! whole collection after each change.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use facturas::{DEFAULT_FILE_NAME, Error, FacturaInput, FormSession, Store, render_table};

fn main() -> Result<()> {
    // Create a temporary directory for this demo
    let temp_dir = tempfile::tempdir()?;
    let data_file = temp_dir.path().join(DEFAULT_FILE_NAME);

    println!("Facturas Basic CRUD Demo");
    println!("========================\n");
    println!("Data file: {}\n", data_file.display());

    // Open the store; the file does not exist yet so it starts empty
    let (mut store, load_error) = Store::open(&data_file);
    assert!(load_error.is_none());
    println!("Store opened with {} facturas.\n", store.len());

    // CREATE: two facturas through the add form
    println!("1. CREATE - Adding two facturas...");
    for raw in [
        FacturaInput::new("A1", "Widget", "3", "10.0", "1.5"),
        FacturaInput::new("B2", "Gadget", "2", "5.0", "0.5"),
    ] {
        let mut form = FormSession::add();
        if let Some(input) = form.input_mut() {
            *input = raw;
        }
        if let Some(submitted) = form.submit(&mut store)? {
            println!("   Added at position {}", submitted.index);
        }
    }
    println!();
    print!("{}", render_table(store.list()));
    println!();

    // INVALID: a bad quantity is rejected and nothing changes
    println!("2. INVALID - Quantity \"abc\"...");
    let mut form = FormSession::add();
    if let Some(input) = form.input_mut() {
        *input = FacturaInput::new("C3", "Gizmo", "abc", "1.0", "0.0");
    }
    match form.submit(&mut store) {
        Err(e @ Error::InvalidInput { .. }) => println!("   Rejected: {}", e),
        other => println!("   Unexpected: {:?}", other.map(|s| s.map(|s| s.index))),
    }
    form.cancel();
    println!("   Still {} facturas.\n", store.len());

    // UPDATE: edit the first factura's quantity
    println!("3. UPDATE - Changing quantity at position 0...");
    let mut form = FormSession::edit(&store, 0)?;
    if let Some(input) = form.input_mut() {
        input.quantity = "4".to_string();
    }
    form.submit(&mut store)?;
    if let Some(factura) = store.get(0) {
        println!("   New total: {}\n", factura.total());
    }

    // DELETE: remove the first factura; the second moves up
    println!("4. DELETE - Removing position 0...");
    let removed = store.remove_at(0)?;
    store.save()?;
    println!("   Removed {}", removed.product_code());
    if let Some(factura) = store.get(0) {
        println!("   Position 0 is now {}\n", factura.product_code());
    }

    // Reload from disk to confirm what was persisted
    let reloaded = store.load_all()?;
    println!("Reloaded {} factura(s) from disk.", reloaded.len());
    assert_eq!(reloaded, store.list());

    Ok(())
}
