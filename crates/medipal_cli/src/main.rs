//! MediPal command-line entry point.
//!
//! # Responsibility
//! - Parse subcommands and resolve runtime configuration.
//! - Call core store/analysis operations and print their results.
//!
//! # Invariants
//! - Every mutating command saves through `MediPalService`.
//! - User errors are printed and exit with status 1; they never panic.

mod config;
mod paint;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use config::{AppConfig, RawOptions};
use log::info;
use medipal_core::export::csv::{DEFAULT_DOSE_CSV, DEFAULT_SYMPTOM_CSV};
use medipal_core::{
    analyze_symptom, export_csv, init_logging, load_store_or_recover, parse_date, parse_time_list,
    symptom_daily_averages, weekly_adherence_chart, DoseStatus, Drug, DrugId, JsonFileRepository,
    LoadOutcome, MediPalService, StoreError, SymptomLog,
};
use paint::{Color, Painter};
use std::path::PathBuf;
use std::process::ExitCode;

const TREND_CHART_DAYS: u64 = 7;

#[derive(Parser, Debug)]
#[command(name = "medipal", version, about = "Keep meds on time and log symptoms")]
struct Cli {
    /// JSON data file.
    #[arg(long, global = true, env = "MEDIPAL_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, global = true, env = "MEDIPAL_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "MEDIPAL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today.
    #[arg(long, global = true)]
    today: Option<String>,

    /// Do not seed demo data into an empty store.
    #[arg(long, global = true)]
    no_sample: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage registered drugs.
    #[command(subcommand)]
    Drugs(DrugsCommand),
    /// Show the dose schedule for a date.
    Schedule {
        /// Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a scheduled dose by its schedule index.
    Mark {
        index: usize,
        /// TAKEN or MISSED (case-insensitive).
        status: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Log symptoms.
    #[command(subcommand)]
    Symptom(SymptomCommand),
    /// Weekly adherence and optional symptom insight.
    Stats {
        #[arg(long)]
        symptom: Option<String>,
    },
    /// Export dose and symptom logs as CSV.
    Export {
        #[arg(long, default_value = DEFAULT_DOSE_CSV)]
        doses: PathBuf,
        #[arg(long, default_value = DEFAULT_SYMPTOM_CSV)]
        symptoms: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum DrugsCommand {
    /// List drugs sorted by name.
    List {
        #[arg(long)]
        show_ids: bool,
    },
    Add(AddDrugArgs),
    /// Delete by list index, or by id with `--id`.
    Delete {
        #[arg(required_unless_present = "id")]
        index: Option<usize>,
        #[arg(long, conflicts_with = "index")]
        id: Option<DrugId>,
    },
}

#[derive(Args, Debug)]
struct AddDrugArgs {
    #[arg(long)]
    name: String,
    /// e.g. 500mg
    #[arg(long)]
    dosage: String,
    /// Comma-separated HH:MM list, e.g. "08:00, 20:00".
    #[arg(long)]
    times: String,
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand, Debug)]
enum SymptomCommand {
    /// Log one symptom and print its analysis.
    Add {
        #[arg(long)]
        name: String,
        /// 1..5
        #[arg(long)]
        intensity: u8,
        /// Defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let raw = RawOptions {
        data_file: cli.data_file.clone(),
        log_dir: cli.log_dir.clone(),
        log_level: cli.log_level.clone(),
        today: cli.today.clone(),
        no_sample: cli.no_sample,
    };
    let config = match AppConfig::resolve(raw) {
        Ok(config) => config,
        Err(err) => {
            Painter::new(false).err(&format!("Error: {err:#}"));
            return ExitCode::FAILURE;
        }
    };
    let painter = Painter::new(config.paint);

    match run(cli.command, &config, &painter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            painter.err(&format!("Error: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig, painter: &Painter) -> Result<()> {
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        painter.warn(&format!("Logging disabled: {err}"));
    }

    let loaded = load_store_or_recover(&config.data_file)
        .with_context(|| format!("cannot load `{}`", config.data_file.display()))?;
    if let LoadOutcome::Recovered { backup, reason } = &loaded.outcome {
        painter.warn(&format!(
            "Data file was unreadable ({reason}); moved to `{}` and started empty.",
            backup.display()
        ));
    }
    let repo = JsonFileRepository::new(&config.data_file);
    let mut service = MediPalService::with_store(repo, loaded.store);
    if config.seed_sample {
        service.ensure_sample(config.today)?;
    }
    info!("event=command_start module=cli status=ok");

    match command {
        Command::Drugs(drugs) => run_drugs(drugs, &mut service, painter),
        Command::Schedule { date } => {
            let date = date_or_today(date.as_deref(), config.today)?;
            let store = service.store();
            render::schedule_table(painter, store, date, &store.daily_schedule(date));
            Ok(())
        }
        Command::Mark {
            index,
            status,
            date,
            note,
        } => {
            let date = date_or_today(date.as_deref(), config.today)?;
            let status = status
                .trim()
                .to_uppercase()
                .parse::<DoseStatus>()
                .map_err(StoreError::from)?;
            let marked = service.mark_scheduled_dose(date, index, status, note)?;
            painter.ok(&format!(
                "Recorded {} {} as {}.",
                marked.drug_name,
                medipal_core::format_time(marked.time),
                marked.status
            ));
            Ok(())
        }
        Command::Symptom(SymptomCommand::Add {
            name,
            intensity,
            date,
            note,
        }) => {
            let date = date_or_today(date.as_deref(), config.today)?;
            let name = name.trim().to_string();
            let mut log = SymptomLog::new(date, name.as_str(), intensity);
            log.note = note.filter(|value| !value.trim().is_empty());
            service.add_symptom(log)?;
            painter.ok("Logged.");
            print_symptom_insight(painter, &service, &name, config.today);
            Ok(())
        }
        Command::Stats { symptom } => {
            println!(
                "{}",
                painter.paint("\n== Weekly Adherence ==", Color::Magenta, true)
            );
            let store = service.store();
            render::adherence_summary(painter, &store.adherence_last_7_days(config.today));
            render::weekly_chart(painter, &weekly_adherence_chart(store, config.today));
            if let Some(name) = symptom.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                print_symptom_insight(painter, &service, name, config.today);
            }
            Ok(())
        }
        Command::Export { doses, symptoms } => {
            export_csv(service.store(), &doses, &symptoms).context("CSV export failed")?;
            painter.ok(&format!(
                "Exported to {} and {}",
                doses.display(),
                symptoms.display()
            ));
            Ok(())
        }
    }
}

fn run_drugs(
    command: DrugsCommand,
    service: &mut MediPalService<JsonFileRepository>,
    painter: &Painter,
) -> Result<()> {
    match command {
        DrugsCommand::List { show_ids } => {
            render::drug_table(painter, &service.store().list_drugs(), show_ids);
        }
        DrugsCommand::Add(args) => {
            let times = parse_time_list(&args.times)?;
            let start = parse_date(&args.start)?;
            let mut drug = Drug::new(args.name.trim(), args.dosage.trim(), times, start);
            drug.end_date = args.end.as_deref().map(parse_date).transpose()?;
            drug.notes = args.notes.filter(|value| !value.trim().is_empty());
            service.add_drug(drug)?;
            painter.ok("Added.");
        }
        DrugsCommand::Delete { index, id } => {
            let removed = match (id, index) {
                (Some(id), _) => service.delete_drug(id)?,
                (None, Some(index)) => service.delete_drug_at_display(index)?,
                (None, None) => anyhow::bail!("give a list index or --id"),
            };
            painter.ok(&format!("Deleted {}", removed.name));
        }
    }
    Ok(())
}

fn print_symptom_insight(
    painter: &Painter,
    service: &MediPalService<JsonFileRepository>,
    symptom: &str,
    today: NaiveDate,
) {
    let store = service.store();
    render::symptom_analysis(painter, &analyze_symptom(store, symptom, today));
    render::symptom_chart(
        painter,
        symptom,
        &symptom_daily_averages(store, symptom, today, TREND_CHART_DAYS),
    );
}

fn date_or_today(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match value {
        Some(raw) => Ok(parse_date(raw)?),
        None => Ok(today),
    }
}
