//! Line-oriented interactive session over a single catalog.
//!
//! Each input line is parsed into a [`Command`] and handed to a [`Session`],
//! which runs it against the catalog and returns what to show. The session
//! never touches the terminal itself; [`run_session`] does the I/O.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use clap::Args;
use thiserror::Error;

use crate::catalog::store::CatalogStore;
use crate::cli::{books, load_catalog, patrons};
use crate::core::types::ParseAvailabilityError;
use crate::core::{Availability, Book, BookId, Patron, PatronId};

const HELP: &str = "\
Commands:
  search <keyword>                       search book titles
  patrons <keyword>                      search patron names
  book <id>                              show a book
  patron <id>                            show a patron
  add-book <id>|<title>|<author>|<genre>[|<availability>]
  add-patron <id>|<name>|<contact>
  borrow, return, fine, reports          not implemented yet
  clear                                  clear the screen
  help                                   show this message
  quit                                   leave the session
";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Args)]
pub struct ShellArgs {
    /// Path to seed catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid id '{0}'")]
    InvalidId(String),

    #[error("'{command}' expects {expected} fields separated by '|', found {found}")]
    WrongFieldCount {
        command: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error(transparent)]
    InvalidAvailability(#[from] ParseAvailabilityError),
}

/// Circulation features the catalog does not provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    BorrowBook,
    ReturnBook,
    CalculateFine,
    GenerateReports,
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BorrowBook => write!(f, "Borrow Book"),
            Self::ReturnBook => write!(f, "Return Book"),
            Self::CalculateFine => write!(f, "Calculate Fine"),
            Self::GenerateReports => write!(f, "Generate Reports"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SearchBooks(String),
    SearchPatrons(String),
    ShowBook(BookId),
    ShowPatron(PatronId),
    AddBook(Book),
    AddPatron(Patron),
    Unavailable(Unavailable),
    Clear,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Search keywords are everything after the single separator following
    /// the verb, spaces included.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let line = line.trim_start();
        let (verb, raw) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let rest = raw.trim();

        let command = match verb.to_ascii_lowercase().as_str() {
            "search" => Self::SearchBooks(raw.to_string()),
            "patrons" => Self::SearchPatrons(raw.to_string()),
            "book" => Self::ShowBook(BookId::new(parse_id("book", rest)?)),
            "patron" => Self::ShowPatron(PatronId::new(parse_id("patron", rest)?)),
            "add-book" => Self::AddBook(parse_book(rest)?),
            "add-patron" => Self::AddPatron(parse_patron(rest)?),
            "borrow" => Self::Unavailable(Unavailable::BorrowBook),
            "return" => Self::Unavailable(Unavailable::ReturnBook),
            "fine" => Self::Unavailable(Unavailable::CalculateFine),
            "reports" => Self::Unavailable(Unavailable::GenerateReports),
            "clear" => Self::Clear,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(command: &'static str, raw: &str) -> Result<i32, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            expected: "an id",
        });
    }
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

fn split_fields(raw: &str) -> Vec<&str> {
    raw.split('|').map(str::trim).collect()
}

fn parse_book(raw: &str) -> Result<Book, CommandError> {
    let fields = split_fields(raw);
    let availability = match fields.len() {
        4 => Availability::default(),
        5 => fields[4].parse()?,
        found => {
            return Err(CommandError::WrongFieldCount {
                command: "add-book",
                expected: "4 or 5",
                found,
            })
        }
    };
    let id = parse_id("add-book", fields[0])?;
    Ok(Book::new(id, fields[1], fields[2], fields[3], availability))
}

fn parse_patron(raw: &str) -> Result<Patron, CommandError> {
    let fields = split_fields(raw);
    if fields.len() != 3 {
        return Err(CommandError::WrongFieldCount {
            command: "add-patron",
            expected: "3",
            found: fields.len(),
        });
    }
    let id = parse_id("add-patron", fields[0])?;
    Ok(Patron::new(id, fields[1], fields[2]))
}

/// What the front end should do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Clear,
    Quit,
}

/// Catalog plus the command handlers that operate on it
#[derive(Debug, Default)]
pub struct Session {
    catalog: CatalogStore,
}

impl Session {
    pub fn new(catalog: CatalogStore) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::SearchBooks(keyword) => {
                Outcome::Output(books::format_search_text(&self.catalog.search_books(&keyword)))
            }
            Command::SearchPatrons(keyword) => Outcome::Output(patrons::format_search_text(
                &self.catalog.search_patrons(&keyword),
            )),
            Command::ShowBook(id) => Outcome::Output(match self.catalog.find_book_by_id(id) {
                Ok(book) => format!("{book}\n"),
                Err(e) => format!("{e}.\n"),
            }),
            Command::ShowPatron(id) => Outcome::Output(match self.catalog.find_patron_by_id(id) {
                Ok(patron) => format!("{patron}\n"),
                Err(e) => format!("{e}.\n"),
            }),
            Command::AddBook(book) => {
                let message = format!("Added {book}\n");
                self.catalog.add_book(book);
                Outcome::Output(message)
            }
            Command::AddPatron(patron) => {
                let message = format!("Added {patron}\n");
                self.catalog.add_patron(patron);
                Outcome::Output(message)
            }
            Command::Unavailable(feature) => {
                Outcome::Output(format!("{feature} functionality not implemented yet.\n"))
            }
            Command::Clear => Outcome::Clear,
            Command::Help => Outcome::Output(HELP.to_string()),
            Command::Quit => Outcome::Quit,
        }
    }
}

/// Read commands from `input` until end of input or `quit`
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    interactive: bool,
) -> anyhow::Result<()> {
    if interactive {
        write!(output, "> ")?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Some(command)) => match session.execute(command) {
                Outcome::Output(text) => write!(output, "{text}")?,
                Outcome::Clear => {
                    if interactive {
                        write!(output, "{CLEAR_SCREEN}")?;
                    }
                }
                Outcome::Quit => break,
            },
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("rejected input line: {e}");
                writeln!(output, "Error: {e}")?;
            }
        }

        if interactive {
            write!(output, "> ")?;
            output.flush()?;
        }
    }

    output.flush()?;
    Ok(())
}

pub fn run(args: ShellArgs, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    if verbose {
        eprintln!(
            "Catalog: {} books, {} patrons",
            catalog.book_count(),
            catalog.patron_count()
        );
    }

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut session = Session::new(catalog);
    let mut stdout = std::io::stdout().lock();
    run_session(&mut session, stdin.lock(), &mut stdout, interactive)
}
