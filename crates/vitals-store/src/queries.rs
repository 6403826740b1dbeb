//! Query builder for patient history.
//!
//! # Example
//!
//! ```
//! use vitals_store::HistoryQuery;
//!
//! // Last five ECG readings for a patient
//! let query = HistoryQuery::new("P1").sensor("ECG").limit(5);
//! assert_eq!(query.limit, 5);
//! ```

use vitals_types::VitalRecord;

/// Number of rows returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Fluent query builder for a patient's history.
///
/// Use this with [`VitalsStore::query_history`](crate::VitalsStore::query_history).
/// Results are the last `limit` matching rows, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Patient to match exactly.
    pub patient_id: String,
    /// Sensor tag to match exactly, if any.
    pub sensor_type: Option<String>,
    /// Size of the tail window.
    pub limit: usize,
}

impl HistoryQuery {
    /// Query a patient's history with the default limit and no sensor filter.
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            sensor_type: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Only include rows with this sensor tag. An empty tag clears the filter.
    pub fn sensor(mut self, sensor_type: impl Into<String>) -> Self {
        let sensor_type = sensor_type.into();
        self.sensor_type = (!sensor_type.is_empty()).then_some(sensor_type);
        self
    }

    /// Keep at most this many of the most recent matches.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether a record matches the patient and sensor filters.
    pub fn matches(&self, record: &VitalRecord) -> bool {
        if record.patient_id.as_deref() != Some(self.patient_id.as_str()) {
            return false;
        }
        match self.sensor_type.as_deref() {
            Some(sensor) if !sensor.is_empty() => record.sensor.as_deref() == Some(sensor),
            _ => true,
        }
    }

    /// Apply the filters and tail window to records in file order.
    pub(crate) fn apply<I>(&self, records: I) -> Vec<VitalRecord>
    where
        I: IntoIterator<Item = VitalRecord>,
    {
        let mut matched: Vec<VitalRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();
        let skip = matched.len().saturating_sub(self.limit);
        matched.drain(..skip);
        matched
    }
}
