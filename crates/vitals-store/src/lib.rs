//! Flat-file persistence for patient vital-sign readings.
//!
//! This crate stores readings in a single comma-separated file with a fixed
//! nine-column schema and serves recent per-patient history from it.
//!
//! # Features
//!
//! - Schema repair on open (missing columns added, unknown columns dropped)
//! - Silent recovery from missing, empty, or corrupt files
//! - Long-form `sensor`/`value` rows with wide feature columns
//! - Tail-window history queries by patient and sensor
//!
//! Every write is a full read-modify-write of the file; concurrent writers
//! are not coordinated.
//!
//! # Example
//!
//! ```no_run
//! use vitals_store::VitalsStore;
//! use vitals_types::{Reading, SensorType};
//!
//! let store = VitalsStore::open_default()?;
//! store.store_vital_sign(&Reading::new("P1", SensorType::Ecg, 72))?;
//!
//! let recent = store.get_patient_vitals_history("P1", Some("ECG"), 10)?;
//! # Ok::<(), vitals_store::Error>(())
//! ```

mod config;
mod error;
mod queries;
mod schema;
mod store;
mod table;

pub use config::{ConfigError, StoreConfig, ValidationError, default_config_path};
pub use error::{Error, Result};
pub use queries::{DEFAULT_HISTORY_LIMIT, HistoryQuery};
pub use store::VitalsStore;
pub use table::Table;

/// Default data file path, relative to the working directory.
pub fn default_data_path() -> std::path::PathBuf {
    std::path::PathBuf::from("data").join("vitals.csv")
}
