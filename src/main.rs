mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{CalcArgs, Cli, Command, HistoryCommand};
use wificalc::history::DeleteOutcome;
use wificalc::{Calculation, CalculationRecord, Config, FileStore, History, evaluate};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    init_logging(&config.logging.level);

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.storage_dir());
    let history = History::with_key(FileStore::new(data_dir), config.storage.history_key);

    match cli.command {
        Command::Eval { expression } => {
            println!("{}", evaluate(&expression));
            Ok(ExitCode::SUCCESS)
        }
        Command::Calc(args) => run_calc(&history, &args),
        Command::History(command) => run_history(&history, command),
    }
}

fn run_calc(history: &History<FileStore>, args: &CalcArgs) -> Result<ExitCode> {
    let calc = Calculation::new(&args.a, &args.d, &args.m);

    for result in calc.sections() {
        match result.error_message() {
            Some(message) => println!("{}: {}  ({message})", result.section, result.display_total()),
            None => println!("{}: {}", result.section, result.display_total()),
        }
    }
    println!("Grand total: {}", calc.grand_total_display());

    if !args.save {
        return Ok(ExitCode::SUCCESS);
    }

    let record = match calc.to_record() {
        Ok(record) => record,
        Err(err) => {
            eprintln!("Not saved, {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    history
        .append(record)
        .context("failed to save calculation to history")?;
    println!("Calculation saved to history.");
    Ok(ExitCode::SUCCESS)
}

fn run_history(history: &History<FileStore>, command: HistoryCommand) -> Result<ExitCode> {
    match command {
        HistoryCommand::List => {
            let records = history.list();
            if records.is_empty() {
                println!("No saved calculations.");
            }
            for record in &records {
                println!("{}", summary_line(record));
            }
        }
        HistoryCommand::Show { id } => {
            let Some(record) = history.get(&id) else {
                eprintln!("No saved calculation with id {id}");
                return Ok(ExitCode::FAILURE);
            };
            let json = serde_json::to_string_pretty(&record).context("failed to encode record")?;
            println!("{json}");
        }
        HistoryCommand::Delete { id } => {
            match history.delete(&id) {
                DeleteOutcome::Removed => println!("Deleted {id}"),
                DeleteOutcome::NotFound => {
                    eprintln!("No saved calculation with id {id}");
                    return Ok(ExitCode::FAILURE);
                }
                DeleteOutcome::Failed => {
                    eprintln!("Failed to delete {id}, see the log for details");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        HistoryCommand::Clear => {
            history.clear();
            println!("History cleared.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn summary_line(record: &CalculationRecord) -> String {
    format!(
        "{}  {}  A={} ({})  D={} ({})  M={} ({})  = {}",
        record.id(),
        record.saved_at().format("%Y-%m-%d %H:%M:%S"),
        record.section_a().value,
        record.section_a().total,
        record.section_d().value,
        record.section_d().total,
        record.section_m().value,
        record.section_m().total,
        record.final_total(),
    )
}
