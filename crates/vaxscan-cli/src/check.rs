//! # Check Subcommand
//!
//! Reads one scanned payload, runs the decode/evaluate pipeline, and
//! renders the result. This stands in for the scanner app's result screen:
//! it formats, it performs no validation of its own.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::Args;

use vaxscan_cert::ValidityEvaluator;
use vaxscan_core::{DisplayZone, Timestamp};

use crate::render::render_result;

/// Arguments for the `vaxscan check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Payload file to read, or `-` for stdin.
    #[arg(value_name = "PATH", default_value = "-")]
    pub path: PathBuf,

    /// Evaluate against this clock (seconds since epoch) instead of the
    /// wall clock.
    #[arg(long, value_name = "EPOCH_SECS")]
    pub now: Option<i64>,

    /// Display-zone UTC offset, e.g. `+02:00`.
    #[arg(long, value_name = "OFFSET")]
    pub zone_offset: Option<String>,

    /// Display-zone name shown alongside the offset.
    #[arg(long, value_name = "NAME", requires = "zone_offset")]
    pub zone_name: Option<String>,

    /// Emit the validation result as JSON instead of the text view.
    #[arg(long)]
    pub json: bool,
}

/// Execute the check subcommand.
///
/// Returns exit code 0 when the certificate is valid, 1 when it is expired
/// or malformed. Operational failures (unreadable input, bad flags) are
/// errors and exit with 2.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let raw = read_payload(&args.path)?;

    let zone = resolve_zone(args)?;
    let now = match args.now {
        Some(secs) => Timestamp::from_epoch_secs(secs)
            .context("--now does not name a representable instant")?,
        None => Timestamp::now(),
    };

    tracing::debug!(zone = zone.name(), now = %now, "evaluating scanned payload");

    let evaluator = ValidityEvaluator::new(zone);
    let result = evaluator.process(raw.trim_end(), now);

    tracing::info!(state = %result.state, "scan classified");

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&result).context("serializing validation result")?;
        println!("{rendered}");
    } else {
        print!("{}", render_result(&result, evaluator.zone()));
    }

    Ok(if result.is_valid() { 0 } else { 1 })
}

/// Read the raw payload from a file, or from stdin for `-`.
fn read_payload(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading payload from stdin")?;
        Ok(raw)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("reading payload from {}", path.display()))
    }
}

/// The display zone: Africa/Johannesburg unless overridden.
fn resolve_zone(args: &CheckArgs) -> Result<DisplayZone> {
    match &args.zone_offset {
        None => Ok(DisplayZone::johannesburg()),
        Some(raw) => {
            let offset: FixedOffset = raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid --zone-offset {raw:?}: {e}"))?;
            let name = args
                .zone_name
                .clone()
                .unwrap_or_else(|| offset.to_string());
            Ok(DisplayZone::new(name, offset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(zone_offset: Option<&str>, zone_name: Option<&str>) -> CheckArgs {
        CheckArgs {
            path: PathBuf::from("-"),
            now: None,
            zone_offset: zone_offset.map(String::from),
            zone_name: zone_name.map(String::from),
            json: false,
        }
    }

    #[test]
    fn test_zone_defaults_to_johannesburg() {
        let zone = resolve_zone(&args(None, None)).unwrap();
        assert_eq!(zone, DisplayZone::johannesburg());
    }

    #[test]
    fn test_zone_override() {
        let zone = resolve_zone(&args(Some("-05:00"), Some("America/Bogota"))).unwrap();
        assert_eq!(zone.name(), "America/Bogota");
        assert_eq!(zone.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_zone_override_without_name_uses_offset() {
        let zone = resolve_zone(&args(Some("+02:00"), None)).unwrap();
        assert_eq!(zone.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_bad_offset_is_an_error() {
        assert!(resolve_zone(&args(Some("tomorrow"), None)).is_err());
    }
}
