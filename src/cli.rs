use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wificalc", version, about = "Three-section calculator with history")]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the history store (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a single expression, ignoring stray characters.
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Compute the section totals and the grand total.
    Calc(CalcArgs),
    /// Inspect or modify saved calculations.
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Parser, Debug)]
pub struct CalcArgs {
    /// Expression for section A.
    #[arg(short = 'a', long = "section-a", default_value = "", allow_hyphen_values = true)]
    pub a: String,

    /// Expression for section D.
    #[arg(short = 'd', long = "section-d", default_value = "", allow_hyphen_values = true)]
    pub d: String,

    /// Expression for section M.
    #[arg(short = 'm', long = "section-m", default_value = "", allow_hyphen_values = true)]
    pub m: String,

    /// Save the calculation to history.
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved calculations, newest first.
    List,
    /// Show one saved calculation as JSON.
    Show { id: String },
    /// Delete one saved calculation.
    Delete { id: String },
    /// Delete all saved calculations.
    Clear,
}
