mod shell;

use clap::{Parser, Subcommand};
use deckbox_core::*;
use shell::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deckbox")]
#[command(about = "Trading card deck manager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override card catalog directory
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    /// Override saved decks directory
    #[arg(long, global = true)]
    decks_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive deck shell (default)
    Shell,

    /// Search the card catalog by name and exit
    Search {
        /// Case-insensitive text to look for in card names
        text: String,

        /// Maximum number of results to print
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        deckbox_core::logging::init_with_level("debug");
    } else {
        deckbox_core::logging::init();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(catalog_dir) = cli.catalog_dir {
        config.data.catalog_dir = Some(catalog_dir);
    }
    if let Some(decks_dir) = cli.decks_dir {
        config.data.decks_dir = Some(decks_dir);
    }

    // The catalog is required for every command
    let catalog = Catalog::load_from_dir(&config.data.catalog_dir())?;

    match cli.command {
        Some(Commands::Search { text, limit }) => {
            cmd_search(&catalog, &text, limit.unwrap_or(config.shell.search_limit))
        }
        Some(Commands::Shell) | None => cmd_shell(&catalog, &config),
    }
}

fn cmd_shell(catalog: &Catalog, config: &Config) -> Result<()> {
    let store = DeckStore::new(config.data.decks_dir());
    let mut shell = Shell::new(catalog, store, config.shell.search_limit);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.shell.autoload_decks {
        shell.autoload(&mut out)?;
    } else {
        std::fs::create_dir_all(config.data.decks_dir())?;
    }

    shell.run(io::stdin().lock(), &mut out)?;
    Ok(())
}

fn cmd_search(catalog: &Catalog, text: &str, limit: usize) -> Result<()> {
    let results = catalog.search(text);
    if results.is_empty() {
        println!("No cards found.");
        return Ok(());
    }

    for card in results.iter().take(limit) {
        println!("{}", card);
    }
    if results.len() > limit {
        println!("... and {} more", results.len() - limit);
    }
    Ok(())
}
