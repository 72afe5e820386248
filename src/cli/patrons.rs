use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_catalog, tsv_field, OutputFormat};
use crate::core::{Patron, PatronId};

#[derive(Args)]
pub struct PatronsArgs {
    #[command(subcommand)]
    pub command: PatronsCommands,
}

#[derive(Subcommand)]
pub enum PatronsCommands {
    /// Search patron names (case-insensitive substring)
    Search {
        /// Keyword to look for; empty matches every patron
        #[arg(default_value = "")]
        keyword: String,

        /// Path to seed catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the patron with the given id
    Show {
        /// Patron ID
        #[arg(required = true, allow_negative_numbers = true)]
        id: i32,

        /// Path to seed catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List all patrons in insertion order
    List {
        /// Path to seed catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: PatronsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        PatronsCommands::Search { keyword, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let found = catalog.search_patrons(&keyword);
            if verbose {
                eprintln!(
                    "{} of {} patrons match '{keyword}'",
                    found.len(),
                    catalog.patron_count()
                );
            }
            print_patrons(&found, format)
        }
        PatronsCommands::Show { id, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let patron = catalog.find_patron_by_id(PatronId::new(id))?;
            match format {
                OutputFormat::Text => println!("{patron}"),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(patron)?),
                OutputFormat::Tsv => print!("{}", format_tsv(&[patron])),
            }
            Ok(())
        }
        PatronsCommands::List { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let all: Vec<&Patron> = catalog.patrons().iter().collect();
            print_patrons(&all, format)
        }
    }
}

fn print_patrons(patrons: &[&Patron], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_search_text(patrons)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "count": patrons.len(),
                "patrons": patrons,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print!("{}", format_tsv(patrons)),
    }
    Ok(())
}

pub fn format_search_text(patrons: &[&Patron]) -> String {
    if patrons.is_empty() {
        return "No patrons found.\n".to_string();
    }

    let mut out = String::from("Patrons found:\n");
    for patron in patrons {
        let _ = writeln!(out, "{patron}");
    }
    out
}

fn format_tsv(patrons: &[&Patron]) -> String {
    let mut out = String::from("id\tname\tcontact_info\n");
    for patron in patrons {
        let _ = writeln!(
            out,
            "{}\t{}\t{}",
            patron.id(),
            tsv_field(patron.name()),
            tsv_field(patron.contact_info())
        );
    }
    out
}
