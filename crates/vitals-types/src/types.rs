//! Core types for vital-sign data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::error::ParseError;
use crate::timestamp::{self, Timestamp};

/// Feature columns, one per known sensor.
pub const FEATURE_COLUMNS: [&str; 5] = [
    "heart_rate",
    "bp_systolic",
    "bp_diastolic",
    "oxygen_saturation",
    "temperature",
];

/// Every persisted column, in file order.
pub const COLUMNS: [&str; 9] = [
    "patient_id",
    "timestamp",
    "sensor",
    "value",
    "heart_rate",
    "bp_systolic",
    "bp_diastolic",
    "oxygen_saturation",
    "temperature",
];

/// Known sensor tags.
///
/// Tags are matched exactly and case-sensitively; `"ecg"` is not [`SensorType::Ecg`].
/// Readings may carry tags outside this set, they just populate no feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorType {
    /// Electrocardiogram, recorded as heart rate.
    #[cfg_attr(feature = "serde", serde(rename = "ECG"))]
    Ecg,
    /// Systolic blood pressure.
    #[cfg_attr(feature = "serde", serde(rename = "BP_SYS"))]
    BpSys,
    /// Diastolic blood pressure.
    #[cfg_attr(feature = "serde", serde(rename = "BP_DIA"))]
    BpDia,
    /// Peripheral oxygen saturation.
    #[cfg_attr(feature = "serde", serde(rename = "SpO2"))]
    SpO2,
    /// Body temperature.
    #[cfg_attr(feature = "serde", serde(rename = "Temp"))]
    Temp,
}

impl SensorType {
    /// All known sensors.
    pub const ALL: [SensorType; 5] = [
        SensorType::Ecg,
        SensorType::BpSys,
        SensorType::BpDia,
        SensorType::SpO2,
        SensorType::Temp,
    ];

    /// Look up a sensor by its tag.
    ///
    /// ```
    /// use vitals_types::SensorType;
    ///
    /// assert_eq!(SensorType::from_tag("SpO2"), Some(SensorType::SpO2));
    /// assert_eq!(SensorType::from_tag("spo2"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == tag)
    }

    /// The tag stored in the `sensor` column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Ecg => "ECG",
            SensorType::BpSys => "BP_SYS",
            SensorType::BpDia => "BP_DIA",
            SensorType::SpO2 => "SpO2",
            SensorType::Temp => "Temp",
        }
    }

    /// The feature column this sensor populates.
    #[must_use]
    pub fn feature_column(&self) -> &'static str {
        match self {
            SensorType::Ecg => "heart_rate",
            SensorType::BpSys => "bp_systolic",
            SensorType::BpDia => "bp_diastolic",
            SensorType::SpO2 => "oxygen_saturation",
            SensorType::Temp => "temperature",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ParseError::UnknownSensor(s.to_string()))
    }
}

impl From<SensorType> for String {
    fn from(value: SensorType) -> Self {
        value.as_str().to_string()
    }
}

/// A scalar cell value.
///
/// Cells are stored as text; anything that reads as a finite number becomes
/// [`Value::Number`], everything else stays [`Value::Text`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Numeric value.
    Number(f64),
    /// Opaque text value.
    Text(String),
}

impl Value {
    /// Interpret a stored cell.
    ///
    /// Cells padded with whitespace are not numbers, so they keep their
    /// exact text.
    ///
    /// ```
    /// use vitals_types::Value;
    ///
    /// assert_eq!(Value::parse("72"), Value::Number(72.0));
    /// assert_eq!(Value::parse("irregular"), Value::Text("irregular".into()));
    /// assert_eq!(Value::parse(" 72"), Value::Text(" 72".into()));
    /// ```
    #[must_use]
    pub fn parse(cell: &str) -> Self {
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(cell.to_string()),
        }
    }

    /// The numeric value, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// A single vital-sign observation to be stored.
///
/// # Example
///
/// ```
/// use vitals_types::{Reading, SensorType, Timestamp};
///
/// let reading = Reading::new("P1", SensorType::Ecg, 72)
///     .at(Timestamp::Unix(1_700_000_000));
/// assert_eq!(reading.sensor(), Some(SensorType::Ecg));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Patient identifier.
    pub patient_id: String,
    /// When the reading was taken; `None` means now.
    pub timestamp: Option<Timestamp>,
    /// Sensor tag, possibly unrecognized or absent.
    pub sensor_type: Option<String>,
    /// Observed value.
    pub value: Value,
}

impl Reading {
    /// Create a reading without a timestamp.
    pub fn new(
        patient_id: impl Into<String>,
        sensor_type: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            timestamp: None,
            sensor_type: Some(sensor_type.into()),
            value: value.into(),
        }
    }

    /// Create a reading with no sensor tag.
    pub fn untagged(patient_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            patient_id: patient_id.into(),
            timestamp: None,
            sensor_type: None,
            value: value.into(),
        }
    }

    /// Set the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// The known sensor for this reading's tag.
    #[must_use]
    pub fn sensor(&self) -> Option<SensorType> {
        self.sensor_type.as_deref().and_then(SensorType::from_tag)
    }
}

/// One stored row, with all nine columns.
///
/// Every column may be null because the table may have been repaired from a
/// file that lacked it. Serializes as a map keyed by column name in file order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VitalRecord {
    /// Patient identifier.
    pub patient_id: Option<String>,
    /// When the reading was taken, usually `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: Option<String>,
    /// Sensor tag as recorded.
    pub sensor: Option<String>,
    /// Observed value.
    pub value: Option<Value>,
    /// Heart rate in bpm, from ECG readings.
    pub heart_rate: Option<Value>,
    /// Systolic blood pressure in mmHg.
    pub bp_systolic: Option<Value>,
    /// Diastolic blood pressure in mmHg.
    pub bp_diastolic: Option<Value>,
    /// Blood oxygen saturation in percent.
    pub oxygen_saturation: Option<Value>,
    /// Body temperature.
    pub temperature: Option<Value>,
}

impl VitalRecord {
    /// Build the row stored for a reading.
    ///
    /// The timestamp is normalized (current time when absent) and the value
    /// is copied into the feature column mapped from the sensor tag, if any.
    #[must_use]
    pub fn from_reading(reading: &Reading) -> Self {
        let timestamp = match &reading.timestamp {
            Some(ts) => ts.normalize(),
            None => timestamp::wall_clock_now(),
        };

        let mut record = Self {
            patient_id: Some(reading.patient_id.clone()),
            timestamp: Some(timestamp),
            sensor: reading.sensor_type.clone(),
            value: Some(reading.value.clone()),
            ..Default::default()
        };

        if let Some(sensor) = reading.sensor() {
            *record.feature_mut(sensor) = Some(reading.value.clone());
        }

        record
    }

    /// Build a record from cells given in [`COLUMNS`] order.
    #[must_use]
    pub fn from_cells(cells: [Option<&str>; 9]) -> Self {
        let [patient_id, timestamp, sensor, value, hr, sys, dia, spo2, temp] = cells;
        let text = |c: Option<&str>| c.map(str::to_string);
        let scalar = |c: Option<&str>| c.map(Value::parse);

        Self {
            patient_id: text(patient_id),
            timestamp: text(timestamp),
            sensor: text(sensor),
            value: scalar(value),
            heart_rate: scalar(hr),
            bp_systolic: scalar(sys),
            bp_diastolic: scalar(dia),
            oxygen_saturation: scalar(spo2),
            temperature: scalar(temp),
        }
    }

    /// Cells in [`COLUMNS`] order; `None` is a null cell.
    #[must_use]
    pub fn to_cells(&self) -> [Option<String>; 9] {
        let scalar = |v: &Option<Value>| v.as_ref().map(Value::to_string);
        [
            self.patient_id.clone(),
            self.timestamp.clone(),
            self.sensor.clone(),
            scalar(&self.value),
            scalar(&self.heart_rate),
            scalar(&self.bp_systolic),
            scalar(&self.bp_diastolic),
            scalar(&self.oxygen_saturation),
            scalar(&self.temperature),
        ]
    }

    /// The feature column value for a sensor.
    #[must_use]
    pub fn feature(&self, sensor: SensorType) -> Option<&Value> {
        match sensor {
            SensorType::Ecg => self.heart_rate.as_ref(),
            SensorType::BpSys => self.bp_systolic.as_ref(),
            SensorType::BpDia => self.bp_diastolic.as_ref(),
            SensorType::SpO2 => self.oxygen_saturation.as_ref(),
            SensorType::Temp => self.temperature.as_ref(),
        }
    }

    fn feature_mut(&mut self, sensor: SensorType) -> &mut Option<Value> {
        match sensor {
            SensorType::Ecg => &mut self.heart_rate,
            SensorType::BpSys => &mut self.bp_systolic,
            SensorType::BpDia => &mut self.bp_diastolic,
            SensorType::SpO2 => &mut self.oxygen_saturation,
            SensorType::Temp => &mut self.temperature,
        }
    }

    /// The known sensor for this row's tag.
    #[must_use]
    pub fn sensor_type(&self) -> Option<SensorType> {
        self.sensor.as_deref().and_then(SensorType::from_tag)
    }

    /// The stored timestamp as a date/time, if it is in the standard format.
    #[must_use]
    pub fn recorded_at(&self) -> Option<PrimitiveDateTime> {
        self.timestamp.as_deref().and_then(timestamp::parse_stored)
    }
}
