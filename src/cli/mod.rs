mod chart;
mod records;

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging;
use crate::services::{RecordStore, SqliteStore};
use crate::types::Result;

use chart::ChartArgs;
use records::{AddArgs, DeleteArgs, EditArgs, ListArgs};

/// Egg laying tracker with weekly, monthly and yearly charts
#[derive(Parser)]
#[command(name = "eggtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database file (default ~/.eggtrack/database.db)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Add a record, replacing one on the same date
    Add(AddArgs),

    /// Change an existing record
    Edit(EditArgs),

    /// Delete a record
    Delete(DeleteArgs),

    /// List records
    List(ListArgs),

    /// Show the chart series for a week, month or year
    Chart(ChartArgs),
}

impl Commands {
    /// Run a batch command against `store`, returning what to print
    fn execute<S: RecordStore>(self, store: &mut S) -> Result<String> {
        match self {
            // Interactive mode never reaches the batch path
            Commands::Tui => Ok(String::new()),
            Commands::Add(args) => args.run(store),
            Commands::Edit(args) => args.run(store),
            Commands::Delete(args) => args.run(store),
            Commands::List(args) => args.run(store),
            Commands::Chart(args) => args.run(store, Local::now().date_naive()),
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::resolve(self.db)?;
        if let Err(e) = logging::init(&config, self.verbose) {
            eprintln!("[eggtrack] Warning: {}", e);
        }

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(&config),
            Some(command) => {
                let mut store = SqliteStore::open(&config.db_path)?;
                println!("{}", command.execute(&mut store)?);
                Ok(())
            }
        }
    }
}
