//! Command-line interface for library-catalog.
//!
//! - **books**: search, show or list books
//! - **patrons**: search, show or list patrons
//! - **export**: write the loaded catalog as seed JSON
//! - **shell**: interactive session with search, add and lookup commands
//! - **serve**: start the web interface
//!
//! Every command starts from an empty catalog, or from the seed file passed
//! with `--catalog`.
//!
//! ## Usage
//!
//! ```text
//! # Search book titles
//! library-catalog books search hobbit --catalog library.json
//!
//! # JSON output for scripting
//! library-catalog --format json patrons show 5 --catalog library.json
//!
//! # Interactive session
//! library-catalog shell --catalog library.json
//!
//! # Start web UI
//! library-catalog serve --port 8080 --open
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::catalog::store::CatalogStore;

pub mod books;
pub mod patrons;
pub mod shell;

#[derive(Parser)]
#[command(name = "library-catalog")]
#[command(version)]
#[command(about = "Track library books and patrons")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query books
    Books(books::BooksArgs),

    /// Query patrons
    Patrons(patrons::PatronsArgs),

    /// Export the catalog to a seed file
    Export(ExportArgs),

    /// Start an interactive session
    Shell(shell::ShellArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file path
    #[arg(required = true)]
    pub output: PathBuf,

    /// Path to seed catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Path to seed catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the seed catalog, or start empty when no file is given
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<CatalogStore> {
    match path {
        Some(path) => Ok(CatalogStore::load_from_file(path)?),
        None => Ok(CatalogStore::new()),
    }
}

pub fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let json = catalog.to_json()?;
    std::fs::write(&args.output, json)?;
    eprintln!(
        "Exported {} books and {} patrons to {}",
        catalog.book_count(),
        catalog.patron_count(),
        args.output.display()
    );
    Ok(())
}

/// Replace tabs and newlines so a field stays in its TSV column
fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
