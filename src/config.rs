/*
 *  config.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, command line
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use dirs_next::home_dir;
use log::warn;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::drivers::inky::InkyPins;
use crate::schedule::{ScheduleConfig, SATURDAY, SUNDAY};

pub const DEFAULT_TIMEZONE: &str = "Europe/London";
pub const DEFAULT_ROTATION: u16 = 90;
pub const DEFAULT_START_HOUR: u8 = 9;
pub const DEFAULT_END_HOUR: u8 = 17;
pub const DEFAULT_STATUS_FILE: &str = "/var/lib/work-clock/status";
pub const DEFAULT_OUTPUT: &str = "work-clock.ppm";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_WIDTH: u32 = 250;
pub const DEFAULT_HEIGHT: u32 = 122;

/// Format accepted by `--at`
pub const AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown timezone {0:?} (expected an IANA name such as Europe/London)")]
    Timezone(String),
}

/// Which output device receives the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// Inky pHAT on SPI
    Inky,
    /// Binary PPM file
    Netpbm,
    /// Nothing, just log
    Mock,
}

impl Default for PanelKind {
    fn default() -> Self {
        if cfg!(feature = "driver-inky") { PanelKind::Inky } else { PanelKind::Netpbm }
    }
}

/// Top-level file configuration. Every field is optional so layers can
/// overlay one another.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub timezone: Option<String>,      // IANA name
    pub status_file: Option<PathBuf>,
    pub schedule: Option<ScheduleSection>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default, PartialEq)]
pub struct ScheduleSection {
    pub weekend_days: Option<Vec<u8>>, // 0 = Monday .. 6 = Sunday
    pub start_hour: Option<u8>,
    pub end_hour: Option<u8>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub panel: Option<PanelKind>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotation: Option<u16>,
    pub output: Option<PathBuf>,       // netpbm target
    pub pins: Option<InkyPins>,        // inky wiring
}

impl Config {
    /// Built-in defaults, the lowest layer.
    pub fn with_defaults() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
            status_file: Some(PathBuf::from(DEFAULT_STATUS_FILE)),
            schedule: Some(ScheduleSection {
                weekend_days: Some(vec![SATURDAY, SUNDAY]),
                start_hour: Some(DEFAULT_START_HOUR),
                end_hour: Some(DEFAULT_END_HOUR),
            }),
            display: Some(DisplayConfig {
                panel: Some(PanelKind::default()),
                width: Some(DEFAULT_WIDTH),
                height: Some(DEFAULT_HEIGHT),
                rotation: Some(DEFAULT_ROTATION),
                output: Some(PathBuf::from(DEFAULT_OUTPUT)),
                pins: Some(InkyPins::default()),
            }),
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "work-clock", version, about = "It's about time, ish - an e-ink word clock")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// IANA timezone name [default: Europe/London]
    #[arg(short, long)]
    pub timezone: Option<String>,
    /// Panel rotation in degrees [default: 90]
    #[arg(short, long)]
    pub rotation: Option<u16>,
    /// Weekend days, comma separated, 0 = Monday [default: 5,6]
    #[arg(short, long, value_delimiter = ',', value_parser = parse_day)]
    pub days: Option<Vec<u8>>,
    /// First working hour [default: 9]
    #[arg(short, long)]
    pub start: Option<u8>,
    /// First hour after work [default: 17]
    #[arg(short, long)]
    pub end: Option<u8>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Where the last rendered state is kept
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub status_file: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub panel: Option<PanelKind>,
    /// PPM file written by the netpbm panel
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Evaluate at a fixed local time, YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub at: Option<String>,
    /// Render even when the state has not changed
    #[arg(long, action = ArgAction::SetTrue)]
    pub force: bool,
    /// Create an empty status file if there is none
    #[arg(long, action = ArgAction::SetTrue)]
    pub init_status: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Fully resolved settings for a single run
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_level: String,
    pub timezone: Tz,
    pub schedule: ScheduleConfig,
    pub status_file: PathBuf,
    pub panel: PanelKind,
    pub width: u32,
    pub height: u32,
    pub rotation: u16,
    pub output: PathBuf,
    pub pins: InkyPins,
    pub at: Option<NaiveDateTime>,
    pub force: bool,
    pub init_status: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Cli, Config), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;
    Ok((cli, cfg))
}

/// Merge defaults, file and `cli` into a validated config.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults
    let mut cfg = Config::with_defaults();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/work-clock/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/work-clock/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/work-clock.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["work-clock.yaml", "config/work-clock.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()    { dst.log_level = src.log_level; }
    if src.timezone.is_some()     { dst.timezone = src.timezone; }
    if src.status_file.is_some()  { dst.status_file = src.status_file; }
    match (&mut dst.schedule, src.schedule) {
        (None, Some(s)) => dst.schedule = Some(s),
        (Some(d), Some(s)) => merge_schedule(d, s),
        _ => {}
    }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_schedule(dst: &mut ScheduleSection, src: ScheduleSection) {
    if src.weekend_days.is_some() { dst.weekend_days = src.weekend_days; }
    if src.start_hour.is_some()   { dst.start_hour = src.start_hour; }
    if src.end_hour.is_some()     { dst.end_hour = src.end_hour; }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.panel.is_some()     { dst.panel = src.panel; }
    if src.width.is_some()     { dst.width = src.width; }
    if src.height.is_some()    { dst.height = src.height; }
    if src.rotation.is_some()  { dst.rotation = src.rotation; }
    if src.output.is_some()    { dst.output = src.output; }
    if src.pins.is_some()      { dst.pins = src.pins; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()    { cfg.log_level = cli.log_level.clone(); }
    if cli.timezone.is_some()     { cfg.timezone = cli.timezone.clone(); }
    if cli.status_file.is_some()  { cfg.status_file = cli.status_file.clone(); }

    let schedule = cfg.schedule.get_or_insert_with(ScheduleSection::default);
    if cli.days.is_some()   { schedule.weekend_days = cli.days.clone(); }
    if cli.start.is_some()  { schedule.start_hour = cli.start; }
    if cli.end.is_some()    { schedule.end_hour = cli.end; }

    let display = cfg.display.get_or_insert_with(DisplayConfig::default);
    if cli.panel.is_some()     { display.panel = cli.panel; }
    if cli.rotation.is_some()  { display.rotation = cli.rotation; }
    if cli.output.is_some()    { display.output = cli.output.clone(); }
}

/// One entry of `--days`, surrounding blanks allowed
fn parse_day(s: &str) -> Result<u8, String> {
    s.trim()
        .parse::<u8>()
        .map_err(|e| format!("{:?} is not a weekday number (0 = Monday): {}", s, e))
}

fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>().map_err(|_| ConfigError::Timezone(name.to_string()))
}

/// Range checks on the merged config.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(tz) = cfg.timezone.as_deref() {
        parse_timezone(tz)?;
    }
    if let Some(schedule) = cfg.schedule.as_ref() {
        if let Some(days) = schedule.weekend_days.as_ref() {
            if let Some(bad) = days.iter().find(|d| **d > 6) {
                return Err(ConfigError::Validation(format!(
                    "weekend day {bad} out of range, expected 0 (Monday) ..= 6 (Sunday)"
                )));
            }
        }
        for (name, hour) in [("start", schedule.start_hour), ("end", schedule.end_hour)] {
            if let Some(h) = hour {
                if h > 23 {
                    return Err(ConfigError::Validation(format!("{name} hour {h} must be 0..=23")));
                }
            }
        }
    }
    if let Some(display) = cfg.display.as_ref() {
        if let (Some(w), Some(h)) = (display.width, display.height) {
            if w == 0 || h == 0 {
                return Err(ConfigError::Validation("display width/height must be > 0".into()));
            }
        }
        if let Some(rot) = display.rotation {
            match rot {
                0 | 90 | 180 | 270 => {},
                _ => return Err(ConfigError::Validation("display rotation must be 0|90|180|270".into()))
            }
        }
    }
    Ok(())
}

impl Settings {
    /// Resolve a validated config plus per-run flags into settings.
    pub fn resolve(cfg: &Config, cli: &Cli) -> Result<Self, ConfigError> {
        let timezone = parse_timezone(cfg.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE))?;

        let schedule_section = cfg.schedule.clone().unwrap_or_default();
        let schedule = ScheduleConfig::new(
            schedule_section.weekend_days.unwrap_or_else(|| vec![SATURDAY, SUNDAY]),
            schedule_section.start_hour.unwrap_or(DEFAULT_START_HOUR),
            schedule_section.end_hour.unwrap_or(DEFAULT_END_HOUR),
        );
        if schedule.is_degenerate() {
            warn!(
                "Workday start {} is not before end {}, every working day will read as off hours",
                schedule.workday_start_hour, schedule.workday_end_hour
            );
        }

        let at = cli.at.as_deref()
            .map(|s| NaiveDateTime::parse_from_str(s, AT_FORMAT).map_err(|e| {
                ConfigError::Validation(format!("--at {s:?} is not YYYY-MM-DDTHH:MM: {e}"))
            }))
            .transpose()?;

        let display = cfg.display.clone().unwrap_or_default();

        Ok(Self {
            log_level: cfg.log_level.clone().unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            timezone,
            schedule,
            status_file: cfg.status_file.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_STATUS_FILE)),
            panel: display.panel.unwrap_or_default(),
            width: display.width.unwrap_or(DEFAULT_WIDTH),
            height: display.height.unwrap_or(DEFAULT_HEIGHT),
            rotation: display.rotation.unwrap_or(DEFAULT_ROTATION),
            output: display.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            pins: display.pins.unwrap_or_default(),
            at,
            force: cli.force,
            init_status: cli.init_status,
        })
    }
}
