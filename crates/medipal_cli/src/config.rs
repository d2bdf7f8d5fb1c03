//! Runtime configuration resolved from flags and environment.
//!
//! # Responsibility
//! - Turn parsed CLI arguments into absolute paths and a fixed "today".
//! - Decide whether ANSI color is allowed.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use medipal_core::{default_log_level, parse_date};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "medipal_data.json";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub today: NaiveDate,
    pub seed_sample: bool,
    pub paint: bool,
}

/// Raw global options as parsed by clap.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub data_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub today: Option<String>,
    pub no_sample: bool,
}

impl AppConfig {
    pub fn resolve(raw: RawOptions) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        let data_file = absolutize(
            &cwd,
            raw.data_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        );
        let log_dir = match raw.log_dir {
            Some(dir) => absolutize(&cwd, dir),
            None => data_file
                .parent()
                .map(|parent| parent.join(LOG_DIR_NAME))
                .unwrap_or_else(|| cwd.join(LOG_DIR_NAME)),
        };
        let today = match raw.today.as_deref() {
            Some(value) => parse_date(value).context("invalid --today")?,
            None => Local::now().date_naive(),
        };

        Ok(Self {
            data_file,
            log_dir,
            log_level: raw
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            today,
            seed_sample: !raw.no_sample,
            paint: paint_enabled(),
        })
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Color is off when stdout is not a terminal or `NOPAINT=1`.
fn paint_enabled() -> bool {
    std::io::stdout().is_terminal() && std::env::var("NOPAINT").map_or(true, |value| value != "1")
}
