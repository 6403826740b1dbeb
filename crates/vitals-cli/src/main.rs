//! Command-line interface for the patient vital-sign store.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Create or repair the data file |
//! | `record` | Append one reading |
//! | `history` | Show a patient's most recent readings |
//! | `patients` | List patients with stored readings |
//! | `completions` | Generate shell completions |
//!
//! # Data file resolution
//!
//! The data file is taken from `--data-path`, then `VITALS_DATA_PATH`, then
//! the `data_path` key of the configuration file, then `data/vitals.csv`.

mod cli;
mod format;

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vitals_store::{HistoryQuery, StoreConfig, VitalsStore};
use vitals_types::{Reading, SensorType, Timestamp, Value};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::format::{format_history_csv, format_history_json, format_history_text, format_patients};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completions don't touch the store, so handle them before logging starts
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "vitals", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = resolve_config(cli.config, cli.data_path)?;
    let store = VitalsStore::from_config(&config)
        .with_context(|| format!("Failed to open data file {}", config.data_path.display()))?;

    match cli.command {
        Commands::Init => {
            write_output(&format!("{}\n", store.path().display()))?;
        }
        Commands::Record {
            patient,
            sensor,
            value,
            timestamp,
        } => {
            let reading = build_reading(patient, sensor, &value, timestamp);
            store
                .store_vital_sign(&reading)
                .context("Failed to store reading")?;
            info!(
                "Recorded {} = {} for {}",
                reading.sensor_type.as_deref().unwrap_or("untagged"),
                reading.value,
                reading.patient_id
            );
        }
        Commands::History {
            patient,
            sensor,
            limit,
            format,
        } => {
            let mut query = HistoryQuery::new(&patient).limit(limit);
            if let Some(sensor) = sensor {
                query = query.sensor(sensor);
            }
            let history = store
                .query_history(&query)
                .context("Failed to read history")?;

            let content = match format {
                OutputFormat::Text => format_history_text(&patient, &history),
                OutputFormat::Json => format_history_json(&history)?,
                OutputFormat::Csv => format_history_csv(&history)?,
            };
            write_output(&content)?;
        }
        Commands::Patients => {
            let ids = store.patient_ids().context("Failed to read patients")?;
            write_output(&format_patients(&ids))?;
        }
        Commands::Completions { .. } => unreachable!("handled before store setup"),
    }

    Ok(())
}

/// Pick the store configuration from flags, environment, and config file.
///
/// An explicit `--config` file must exist; the default location is optional.
fn resolve_config(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<StoreConfig> {
    let mut config = match config_path {
        Some(path) => StoreConfig::load(&path)?,
        None => StoreConfig::load_default()?,
    };
    if let Some(path) = data_path {
        config.data_path = path;
    }
    config.validate()?;
    Ok(config)
}

/// Build a reading from command-line text.
///
/// Unrecognized sensor tags are kept as given; they are stored without a
/// feature column.
fn build_reading(
    patient: String,
    sensor: Option<String>,
    value: &str,
    timestamp: Option<String>,
) -> Reading {
    if let Some(tag) = sensor.as_deref()
        && let Err(e) = SensorType::from_str(tag)
    {
        warn!("{}; the reading will not fill a feature column", e);
    }

    Reading {
        patient_id: patient,
        timestamp: timestamp.map(Timestamp::Text),
        sensor_type: sensor,
        value: Value::parse(value),
    }
}

fn write_output(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reading_known_sensor() {
        let reading = build_reading("P1".into(), Some("ECG".into()), "72", None);
        assert_eq!(reading.sensor(), Some(SensorType::Ecg));
        assert_eq!(reading.value, Value::Number(72.0));
        assert!(reading.timestamp.is_none());
    }

    #[test]
    fn test_build_reading_keeps_unknown_sensor_and_text() {
        let reading = build_reading(
            "P1".into(),
            Some("RespRate".into()),
            "n/a",
            Some("yesterday".into()),
        );
        assert_eq!(reading.sensor_type.as_deref(), Some("RespRate"));
        assert!(reading.sensor().is_none());
        assert_eq!(reading.value, Value::Text("n/a".to_string()));
        assert_eq!(reading.timestamp, Some(Timestamp::Text("yesterday".into())));
    }

    #[test]
    fn test_resolve_config_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        StoreConfig::new(dir.path().join("from-file.csv"))
            .save(&config_path)
            .unwrap();

        let from_file = resolve_config(Some(config_path.clone()), None).unwrap();
        assert_eq!(from_file.data_path, dir.path().join("from-file.csv"));

        let overridden =
            resolve_config(Some(config_path), Some(dir.path().join("flag.csv"))).unwrap();
        assert_eq!(overridden.data_path, dir.path().join("flag.csv"));
    }

    #[test]
    fn test_resolve_config_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_config(Some(dir.path().join("absent.toml")), None).is_err());
    }

    #[test]
    fn test_resolve_config_rejects_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        StoreConfig::default().save(&config_path).unwrap();

        assert!(resolve_config(Some(config_path), Some(PathBuf::from("data/"))).is_err());
    }
}
