use clap::Parser;
use tracing_subscriber::EnvFilter;

use library_catalog::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("library_catalog=debug,info")
    } else {
        EnvFilter::new("library_catalog=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Books(args) => {
            cli::books::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Patrons(args) => {
            cli::patrons::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Export(args) => {
            cli::run_export(args)?;
        }
        cli::Commands::Shell(args) => {
            cli::shell::run(args, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
