//! `weekendsync`: resolve, group and tally weekend windows from the command line.
//!
//! Results go to stdout as JSON; logs and errors go to stderr.

mod config;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weekend_engine::{
    group_by_weekend, resolve_weekend_with_options, tally_votes, upcoming_weekends,
    weekends_between, VoteSummary, WeekendAnchor, WeekendOptions, WeekendTally, WeekendVote,
};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "weekendsync",
    version,
    about = "Map timestamps onto Friday..Sunday weekend windows"
)]
struct Cli {
    /// TOML config file (defaults to ./weekendsync.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// IANA timezone used to read the date of timestamps with an offset
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Weekday the weekend starts on: thursday, friday or saturday
    #[arg(long, global = true)]
    anchor: Option<WeekendAnchor>,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one timestamp to its weekend window
    Resolve {
        /// ISO 8601 date or date-time
        timestamp: String,
    },
    /// List the next weekends, starting with the one in progress
    Upcoming {
        /// First date to consider (defaults to today)
        #[arg(long)]
        from: Option<String>,
        /// Number of weekends to list
        #[arg(long)]
        count: Option<usize>,
    },
    /// List every weekend overlapping a date range
    Between { start: String, end: String },
    /// Group a JSON array of objects by weekend
    Group {
        /// Input file (reads stdin when omitted or "-")
        file: Option<PathBuf>,
        /// Name of the timestamp field in each object
        #[arg(long, default_value = "timestamp")]
        field: String,
    },
    /// Tally a JSON array of {"voter", "timestamp"} votes per weekend
    Tally {
        /// Input file (reads stdin when omitted or "-")
        file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct TallyReport<'a> {
    #[serde(flatten)]
    summary: &'a VoteSummary,
    leader: Option<&'a WeekendTally>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    let options = config.weekend_options(cli.anchor, cli.timezone.as_deref())?;
    debug!(anchor = %options.anchor, timezone = ?options.timezone, "loaded options");

    let output = match cli.command {
        Command::Resolve { timestamp } => {
            let window = resolve_weekend_with_options(&timestamp, &options)
                .with_context(|| format!("cannot resolve a weekend for '{timestamp}'"))?;
            to_json(&window)?
        }
        Command::Upcoming { from, count } => {
            let from = from.unwrap_or_else(|| today(&options));
            let windows = upcoming_weekends(&from, config.upcoming_count(count), &options)?;
            to_json(&windows)?
        }
        Command::Between { start, end } => to_json(&weekends_between(&start, &end, &options)?)?,
        Command::Group { file, field } => {
            let items: Vec<Value> = serde_json::from_str(&read_input(file.as_deref())?)
                .context("input must be a JSON array of objects")?;
            let groups = group_by_weekend(
                items,
                |item| item.get(field.as_str()).and_then(Value::as_str),
                &options,
            );
            to_json(&groups)?
        }
        Command::Tally { file } => {
            let votes: Vec<WeekendVote> = serde_json::from_str(&read_input(file.as_deref())?)
                .context("input must be a JSON array of {\"voter\", \"timestamp\"} objects")?;
            let summary = tally_votes(&votes, &options);
            to_json(&TallyReport {
                summary: &summary,
                leader: summary.leader(),
            })?
        }
    };

    println!("{output}");
    Ok(())
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "weekendsync=debug,weekend_engine=debug"
    } else {
        "weekendsync=warn,weekend_engine=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Today's date in the configured zone, UTC otherwise.
fn today(options: &WeekendOptions) -> String {
    let now = chrono::Utc::now();
    let date = match options.timezone {
        Some(tz) => now.with_timezone(&tz).date_naive(),
        None => now.date_naive(),
    };
    date.format("%Y-%m-%d").to_string()
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing output")
}
