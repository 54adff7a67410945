use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::Result;
use facturas::config::CONFIG_ENV;
use facturas::{Config, Error, FacturaInput, FormSession, Store, render_table};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "facturas")]
#[command(about = "Facturas CLI - invoice line catalog stored in a JSON file")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the JSON data file (default: facturas.json or the configured data_file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Path to a YAML config file (default: $FACTURAS_CONFIG, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every factura as a table (default)
    List,

    /// Show one factura
    Show {
        /// Position in the table
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Add a factura at the end of the table
    Add {
        /// Product code
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        codigo: String,
        /// Product name
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        nombre: String,
        /// Quantity (integer)
        #[arg(long, allow_hyphen_values = true)]
        cantidad: String,
        /// Unit price
        #[arg(long, allow_hyphen_values = true)]
        precio: String,
        /// Tax amount
        #[arg(long, allow_hyphen_values = true)]
        impuesto: String,
    },

    /// Edit the factura at a position; omitted fields keep their value
    Edit {
        /// Position in the table
        #[arg(allow_negative_numbers = true)]
        index: i64,
        #[arg(long, allow_hyphen_values = true)]
        codigo: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        nombre: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        cantidad: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        precio: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        impuesto: Option<String>,
    },

    /// Delete the factura at a position; later rows move up by one
    Delete {
        /// Position in the table
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
}

fn main() -> Result<ExitCode> {
    // Setup tracing on stderr so stdout carries only the table
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::resolve_path(cli.config.as_deref(), env::var_os(CONFIG_ENV)) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let data_file = config.data_file(cli.file.as_deref());

    // Load once; a bad file degrades to an empty table
    let (mut store, load_error) = Store::open(&data_file);
    if let Some(e) = &load_error {
        report(e);
    }

    let outcome = match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            print_table(&store);
            Ok(())
        }
        Commands::Show { index } => show(&store, index),
        Commands::Add {
            codigo,
            nombre,
            cantidad,
            precio,
            impuesto,
        } => {
            let mut form = FormSession::add();
            if let Some(input) = form.input_mut() {
                *input = FacturaInput::new(codigo, nombre, cantidad, precio, impuesto);
            }
            submit(&mut form, &mut store)
        }
        Commands::Edit {
            index,
            codigo,
            nombre,
            cantidad,
            precio,
            impuesto,
        } => resolve_index(index, store.len()).and_then(|index| {
            let mut form = FormSession::edit(&store, index)?;
            if let Some(input) = form.input_mut() {
                let fields = [
                    (&mut input.code, codigo),
                    (&mut input.name, nombre),
                    (&mut input.quantity, cantidad),
                    (&mut input.unit_price, precio),
                    (&mut input.tax, impuesto),
                ];
                for (field, value) in fields {
                    if let Some(value) = value {
                        *field = value;
                    }
                }
            }
            submit(&mut form, &mut store)
        }),
        Commands::Delete { index } => resolve_index(index, store.len()).and_then(|index| {
            store.remove_at(index)?;
            if let Err(e) = store.save() {
                report(&e);
            }
            print_table(&store);
            Ok(())
        }),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            report(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Submit a form, warn if only the in-memory copy changed, then redraw
fn submit(form: &mut FormSession, store: &mut Store) -> facturas::Result<()> {
    if let Some(submitted) = form.submit(store)? {
        if let Some(e) = &submitted.save_error {
            report(e);
        }
    }
    print_table(store);
    Ok(())
}

fn show(store: &Store, index: i64) -> facturas::Result<()> {
    let factura = &store.list()[resolve_index(index, store.len())?];

    println!("{} {}", "Código Producto:".bold(), factura.product_code());
    println!("{} {}", "Nombre Producto:".bold(), factura.product_name());
    println!("{} {}", "Cantidad:".bold(), factura.quantity());
    println!("{} {}", "Precio:".bold(), factura.unit_price());
    println!("{} {}", "Impuesto:".bold(), factura.tax());
    println!("{} {}", "Total:".bold(), factura.total());
    Ok(())
}

/// Map a user-supplied position to a collection index
fn resolve_index(index: i64, len: usize) -> facturas::Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(Error::IndexOutOfRange { index, len })
}

fn print_table(store: &Store) {
    let table = render_table(store.list());
    let (header, body) = table.split_once('\n').unwrap_or((table.as_str(), ""));
    println!("{}", header.bold());
    print!("{}", body);
}

fn report(error: &Error) {
    let message = match error {
        Error::PersistenceRead { .. } => "Error al cargar facturas desde el archivo JSON.",
        Error::PersistenceWrite { .. } => "Error al guardar las facturas en el archivo JSON.",
        Error::InvalidInput { .. } => "Datos inválidos. Verifique los campos.",
        Error::IndexOutOfRange { .. } => "Seleccione una factura existente.",
    };
    eprintln!("{} {}", label(error), message);
    eprintln!("  {}", error.to_string().yellow());
}

/// Persistence failures leave the session usable, so they are warnings
fn label(error: &Error) -> ColoredString {
    if error.is_persistence() {
        "Aviso:".yellow().bold()
    } else {
        "Error:".red().bold()
    }
}
