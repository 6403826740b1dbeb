//! Main store implementation.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vitals_types::{Reading, VitalRecord};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::queries::HistoryQuery;
use crate::schema::{self, SchemaStatus};
use crate::table::{ReadFailure, Table};

/// Flat-file store for vital-sign readings.
///
/// Every operation reads or rewrites the whole file. Writers in separate
/// processes are not coordinated.
#[derive(Debug)]
pub struct VitalsStore {
    path: PathBuf,
}

impl VitalsStore {
    /// Open or create a data file at the given path.
    ///
    /// The parent directory is created if needed. A missing, empty, or
    /// unreadable file is replaced with a header-only file, and a file with
    /// any other header is rewritten to the required columns.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        match schema::initialize(path)? {
            SchemaStatus::Created => info!("Created data file at {}", path.display()),
            SchemaStatus::Recreated => debug!("Replaced unreadable data file at {}", path.display()),
            SchemaStatus::Repaired { added, dropped } => info!(
                "Repaired schema of {} (added: {:?}, dropped: {:?})",
                path.display(),
                added,
                dropped
            ),
            SchemaStatus::Unchanged => debug!("Opened data file at {}", path.display()),
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Open the default data file location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_data_path())
    }

    /// Open the data file named by a configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Self::open(&config.data_path)
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full table.
    ///
    /// The result always has exactly the required columns in order. A
    /// missing, empty, or unparseable file yields an empty table; other I/O
    /// failures are returned.
    pub fn load(&self) -> Result<Table> {
        match Table::read(&self.path) {
            Ok(table) => Ok(table.conform()),
            Err(ReadFailure::Missing) => {
                debug!("Data file {} is missing", self.path.display());
                Ok(Table::empty())
            }
            Err(ReadFailure::Empty) => {
                debug!("Data file {} is empty", self.path.display());
                Ok(Table::empty())
            }
            Err(ReadFailure::Corrupt(reason)) => {
                debug!("Data file {} is unreadable: {}", self.path.display(), reason);
                Ok(Table::empty())
            }
            Err(ReadFailure::Io(e)) => Err(e.into()),
        }
    }

    /// Overwrite the file with a table reshaped to the required columns.
    pub fn save(&self, table: Table) -> Result<()> {
        table.conform().write(&self.path)
    }

    /// Append one reading.
    ///
    /// This loads the whole table, appends the row, and saves it back.
    pub fn store_vital_sign(&self, reading: &Reading) -> Result<()> {
        let record = VitalRecord::from_reading(reading);
        let mut table = self.load()?;
        table.push_record(&record);
        self.save(table)?;

        debug!(
            "Stored {} reading for {}",
            reading.sensor_type.as_deref().unwrap_or("untagged"),
            reading.patient_id
        );
        Ok(())
    }

    /// The most recent `limit` rows for a patient, oldest first.
    ///
    /// When `sensor_type` is given and non-empty only rows with exactly that
    /// tag are considered.
    pub fn get_patient_vitals_history(
        &self,
        patient_id: &str,
        sensor_type: Option<&str>,
        limit: usize,
    ) -> Result<Vec<VitalRecord>> {
        let mut query = HistoryQuery::new(patient_id).limit(limit);
        if let Some(sensor) = sensor_type {
            query = query.sensor(sensor);
        }
        self.query_history(&query)
    }

    /// Run a history query.
    pub fn query_history(&self, query: &HistoryQuery) -> Result<Vec<VitalRecord>> {
        let table = self.load()?;
        if table.is_empty() {
            return Ok(Vec::new());
        }

        let records = query.apply(table.records());
        debug!(
            "History query for {} returned {} rows",
            query.patient_id,
            records.len()
        );
        Ok(records)
    }

    /// Accept a prediction. Predictions are not persisted.
    pub fn store_prediction<P: ?Sized>(&self, _prediction: &P) {}

    /// Count rows, optionally for one patient.
    pub fn count_readings(&self, patient_id: Option<&str>) -> Result<usize> {
        let table = self.load()?;
        let count = match patient_id {
            Some(id) => table
                .records()
                .filter(|r| r.patient_id.as_deref() == Some(id))
                .count(),
            None => table.len(),
        };
        Ok(count)
    }

    /// Distinct patient ids in order of first appearance.
    pub fn patient_ids(&self) -> Result<Vec<String>> {
        let table = self.load()?;
        let mut ids: Vec<String> = Vec::new();
        for id in table.records().filter_map(|r| r.patient_id) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
