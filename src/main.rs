use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod clockify;
mod config;
mod console;
mod daily_command;
mod datetime;
mod logger;
mod report;
mod time_entry;

use clockify::ClockifyClient;
use config::ClockifyConfig;
use console::{ConsoleTagReport, ReportPresenter};
use daily_command::{DailyArgs, DailyCommand};

/// Clockifyのtime entryをタグごとに集計して表示するCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- daily
/// $ cargo run -- -v daily --date 2024-04-01
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        short = 'v',
        long = "verbose",
        parse(from_occurrences),
        global = true,
        help = "Increases log verbosity"
    )]
    verbose: u64,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    Daily(DailyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::setup_logger(logger::level_from_verbosity(args.verbose))?;

    let config = ClockifyConfig::from_env().context("Failed to load configuration")?;
    let client = ClockifyClient::new(&config).context("Failed to new clockify client")?;

    match args.subcommand {
        SubCommands::Daily(daily) => {
            let groups = DailyCommand::new(&client).run(daily).await?;
            let mut stdout = io::stdout().lock();
            ConsoleTagReport::new(&mut stdout).show_report(&groups)?;
        }
    }

    Ok(())
}
