pub mod activity;
pub mod adhkar;
pub mod debt;
pub mod expense;
pub mod output;
pub mod profile;
pub mod tasbeeh;

use std::{fmt::Display, path::PathBuf, sync::Arc};

use activity::{process_activity_command, ActivityCommand};
use adhkar::{process_adhkar_command, AdhkarCommand};
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use debt::{process_debt_command, DebtCommand};
use expense::{process_expense_command, process_food_command, ExpenseCommand, FoodCommand};
use profile::{process_profile_command, ProfileCommand};
use tasbeeh::{process_tasbeeh_command, TasbeehCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    locale::Language,
    store::{record_store::Record, snapshot::FileSnapshotStorage},
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, LogConfig, CLI_PREFIX},
        time::parse_record_date,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

pub const DATE_HELP: &str =
    "Date of the record. Examples are \"today\", \"tomorrow\", \"2024-03-01\", \"15/03/2025\"";

#[derive(Parser, Debug)]
#[command(name = "lifeledger", version)]
#[command(about = "Local ledger for activities, expenses, debts and dhikr", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
    #[arg(long = "log-filter", global = true, help = "Log level, e.g. debug or trace")]
    log_filter: Option<LevelFilter>,
    #[arg(long, global = true, default_value_t = Language::En, help = "Language of labels")]
    lang: Language,
    #[arg(long = "date-style", global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Plan and track training activities")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },
    #[command(about = "Healthy food expenses")]
    Food {
        #[command(subcommand)]
        command: FoodCommand,
    },
    #[command(about = "General expenses")]
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    #[command(about = "Money lent and borrowed")]
    Debt {
        #[command(subcommand)]
        command: DebtCommand,
    },
    #[command(about = "Personal profile")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    #[command(about = "Dhikr counter")]
    Tasbeeh {
        #[command(subcommand)]
        command: TasbeehCommand,
    },
    #[command(about = "Catalogue of adhkar")]
    Adhkar {
        #[command(subcommand)]
        command: AdhkarCommand,
    },
}

/// Everything commands need besides their own arguments.
pub struct CliContext {
    pub storage: Arc<FileSnapshotStorage>,
    pub language: Language,
    pub date_style: DateStyle,
}

impl CliContext {
    pub fn clock(&self) -> Box<dyn Clock> {
        Box::new(DefaultClock)
    }

    pub fn today(&self) -> NaiveDate {
        DefaultClock.today()
    }

    pub fn parse_date(&self, input: &str) -> Result<NaiveDate> {
        parse_user_date(input, self.date_style)
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    enable_logging(LogConfig {
        level: args.log_filter,
        echo: args.log,
        ..LogConfig::new(CLI_PREFIX, &dir)
    })?;

    let context = CliContext {
        storage: Arc::new(FileSnapshotStorage::new(dir)?),
        language: args.lang,
        date_style: args.date_style,
    };

    match args.commands {
        Commands::Activity { command } => process_activity_command(command, &context).await,
        Commands::Food { command } => process_food_command(command, &context).await,
        Commands::Expense { command } => process_expense_command(command, &context).await,
        Commands::Debt { command } => process_debt_command(command, &context).await,
        Commands::Profile { command } => process_profile_command(command, &context).await,
        Commands::Tasbeeh { command } => process_tasbeeh_command(command, &context).await,
        Commands::Adhkar { command } => process_adhkar_command(command, &context).await,
    }
}

/// Accepts stored dates (`2024-03-01`) as well as human input such as "tomorrow" or
/// "15/03/2025".
pub fn parse_user_date(input: &str, date_style: DateStyle) -> Result<NaiveDate> {
    if let Some(date) = parse_record_date(input) {
        return Ok(date);
    }
    match parse_date_string(input, Local::now(), date_style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input:?}: {e}"),
            )
            .into()),
    }
}

/// Finds the id of the record referred to by `reference`, either a full id or an unambiguous
/// prefix of one. Listings only show id prefixes.
pub fn resolve_id<'a, T: Record>(records: &'a [T], reference: &str) -> Result<Option<&'a str>> {
    if let Some(exact) = records.iter().find(|v| v.id() == reference) {
        return Ok(Some(exact.id()));
    }
    if reference.is_empty() {
        return Ok(None);
    }
    let mut matches = records
        .iter()
        .map(Record::id)
        .filter(|id| id.starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(Some(id)),
        (Some(_), Some(_)) => bail!("Id prefix {reference:?} matches more than one record"),
        (None, _) => Ok(None),
    }
}
