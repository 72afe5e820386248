use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_catalog, tsv_field, OutputFormat};
use crate::core::{Book, BookId};

#[derive(Args)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub command: BooksCommands,
}

#[derive(Subcommand)]
pub enum BooksCommands {
    /// Search book titles (case-insensitive substring)
    Search {
        /// Keyword to look for; empty matches every book
        #[arg(default_value = "")]
        keyword: String,

        /// Path to seed catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the book with the given id
    Show {
        /// Book ID
        #[arg(required = true, allow_negative_numbers = true)]
        id: i32,

        /// Path to seed catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List all books in insertion order
    List {
        /// Path to seed catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(args: BooksArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        BooksCommands::Search { keyword, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let found = catalog.search_books(&keyword);
            if verbose {
                eprintln!(
                    "{} of {} books match '{keyword}'",
                    found.len(),
                    catalog.book_count()
                );
            }
            print_books(&found, format)
        }
        BooksCommands::Show { id, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let book = catalog.find_book_by_id(BookId::new(id))?;
            match format {
                OutputFormat::Text => println!("{book}"),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(book)?),
                OutputFormat::Tsv => print!("{}", format_tsv(&[book])),
            }
            Ok(())
        }
        BooksCommands::List { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let all: Vec<&Book> = catalog.books().iter().collect();
            print_books(&all, format)
        }
    }
}

fn print_books(books: &[&Book], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_search_text(books)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "count": books.len(),
                "books": books,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print!("{}", format_tsv(books)),
    }
    Ok(())
}

/// Render search results the way the result pane shows them
pub fn format_search_text(books: &[&Book]) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let mut out = String::from("Books found:\n");
    for book in books {
        let _ = writeln!(out, "{book}");
    }
    out
}

fn format_tsv(books: &[&Book]) -> String {
    let mut out = String::from("id\ttitle\tauthor\tgenre\tavailability\n");
    for book in books {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            book.id(),
            tsv_field(book.title()),
            tsv_field(book.author()),
            tsv_field(book.genre()),
            book.availability()
        );
    }
    out
}
