use std::env;
use std::path::PathBuf;

use crate::error::{RosterError, RosterResult};
use crate::export::SCHEDULE_FILENAME;

/// Lower bound of the sales target the input form offers
pub const DEFAULT_SALES_TARGET: f64 = 500.0;
pub const ADVISORY_TARGET_RANGE: (f64, f64) = (500.0, 10_000.0);

/// Largest headcount a single slot may ask for
pub const MAX_EMPLOYEES_PER_SLOT: u32 = 1_000;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which pipeline variant to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterOptions {
    /// Split slots (and the `Department` column) by department
    pub department_aware: bool,
    /// Forbid putting the same employee on two slots of one day
    pub enforce_single_shift_per_day: bool,
}

impl RosterOptions {
    /// Day/shift slots, employees may work both shifts of a day
    pub fn simple() -> Self {
        RosterOptions {
            department_aware: false,
            enforce_single_shift_per_day: false,
        }
    }

    /// Day/shift/department slots, one slot per employee per day
    pub fn by_department() -> Self {
        RosterOptions {
            department_aware: true,
            enforce_single_shift_per_day: true,
        }
    }

    /// Variant defaults, with an explicit exclusion flag taking precedence
    pub fn for_variant(department_aware: bool, single_shift_per_day: Option<bool>) -> Self {
        let base = if department_aware {
            Self::by_department()
        } else {
            Self::simple()
        };
        RosterOptions {
            enforce_single_shift_per_day: single_shift_per_day
                .unwrap_or(base.enforce_single_shift_per_day),
            ..base
        }
    }
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self::simple()
    }
}

/// Rejects targets the estimator cannot scale (NaN, infinities)
pub fn validate_sales_target(target: f64) -> RosterResult<f64> {
    if target.is_finite() {
        Ok(target)
    } else {
        Err(RosterError::InvalidTarget { value: target })
    }
}

/// Logs a warning when the target is outside the range the form suggests.
/// The pipeline accepts any value.
pub fn check_sales_target(target: f64) {
    let (low, high) = ADVISORY_TARGET_RANGE;
    if !(low..=high).contains(&target) {
        log::warn!("sales target {target} is outside the usual range {low}-{high}");
    }
}

/// Settings for a one-shot CLI run
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub input: PathBuf,
    pub sales_target: f64,
    pub options: RosterOptions,
    pub output: PathBuf,
    pub show_averages: bool,
}

impl CliConfig {
    /// Parses `<history.csv> [--target N] [--departments] [--single-shift-per-day |
    /// --allow-double-shifts] [--out FILE] [--averages]`. `args` excludes the program name.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let input = args
            .first()
            .filter(|a| !a.starts_with("--"))
            .ok_or_else(|| "missing path to history CSV".to_string())?;

        let sales_target = match flag_value(args, "--target")? {
            Some(v) => v
                .parse::<f64>()
                .map_err(|_| format!("invalid --target value '{v}'"))?,
            None => env_parse("ROSTER_TARGET").unwrap_or(DEFAULT_SALES_TARGET),
        };
        let sales_target = validate_sales_target(sales_target).map_err(|e| e.to_string())?;

        let department_aware = has_flag(args, "--departments")
            || env::var("ROSTER_DEPARTMENTS").map(|v| parse_bool(&v)).unwrap_or(false);

        let single_shift = if has_flag(args, "--single-shift-per-day") {
            Some(true)
        } else if has_flag(args, "--allow-double-shifts") {
            Some(false)
        } else {
            None
        };

        let output = flag_value(args, "--out")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SCHEDULE_FILENAME));

        Ok(CliConfig {
            input: PathBuf::from(input),
            sales_target,
            options: RosterOptions::for_variant(department_aware, single_shift),
            output,
            show_averages: has_flag(args, "--averages"),
        })
    }
}

/// Settings for `web` mode
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// `args` are whatever follows `web` on the command line
    pub fn from_args(args: &[String]) -> Self {
        let port = args
            .first()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let bind = env::var("ROSTER_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let max_upload_bytes = env_parse("ROSTER_MAX_UPLOAD_BYTES").unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        ServerConfig {
            bind,
            port,
            max_upload_bytes,
        }
    }
}

/// Parses a boolean value from various string representations
pub fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "yes" || lower == "true" || lower == "1"
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`; a flag given without one is an error
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => Err(format!("{flag} needs a value")),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
