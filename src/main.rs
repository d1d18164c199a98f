//! Command-line front end for the machine database: create the file, seed the
//! defaults, and print what the tables hold.
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use machine_store::{Store, DEFAULT_DB_PATH};

#[derive(Debug, Parser)]
#[command(name = "machine-store", about = "Manage the vending machine database")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an empty database file if none exists yet.
    Init,
    /// Insert the default float and stock.
    Seed {
        /// Skip rows that already exist instead of failing.
        #[arg(long)]
        once: bool,
    },
    /// List the coin and note float.
    Change,
    /// List the product stock.
    Items,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Command::Init = cli.command {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&cli.db)
            .with_context(|| format!("failed to create {}", cli.db.display()))?;
    }

    let store = Store::open_at(&cli.db).context("failed to open machine database")?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Init => writeln!(out, "initialized {}", store.path().display())?,
        Command::Seed { once } => {
            let report = if once {
                store.seed_store_once()
            } else {
                store.seed_store()
            }
            .context("failed to seed machine database")?;
            writeln!(
                out,
                "inserted {} change rows and {} item rows",
                report.change_rows, report.item_rows
            )?;
        }
        Command::Change => {
            for row in store.change().all().context("failed to read change")? {
                writeln!(out, "{}\t{}", row.denomination, row.quantity)?;
            }
        }
        Command::Items => {
            for row in store.items().all().context("failed to read items")? {
                writeln!(out, "{}\t{}", row.name, row.quantity)?;
            }
        }
    }

    Ok(())
}
