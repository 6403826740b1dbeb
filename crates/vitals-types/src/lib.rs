//! Shared types for patient vital-sign readings.
//!
//! This crate provides the data types used by the vitals store and its
//! command-line front end.
//!
//! # Features
//!
//! - The fixed nine-column schema ([`COLUMNS`])
//! - Sensor tags and their feature columns ([`SensorType`])
//! - Explicit reading input ([`Reading`], [`Timestamp`])
//! - Stored rows ([`VitalRecord`])
//!
//! # Example
//!
//! ```
//! use vitals_types::{Reading, SensorType, VitalRecord};
//!
//! let reading = Reading::new("P1", SensorType::Ecg, 72);
//! let record = VitalRecord::from_reading(&reading);
//! assert_eq!(record.heart_rate, Some(72.into()));
//! ```

pub mod error;
pub mod timestamp;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use timestamp::{Timestamp, wall_clock_now};
pub use types::{COLUMNS, FEATURE_COLUMNS, Reading, SensorType, Value, VitalRecord};

#[cfg(test)]
mod tests {
    use super::*;

    // --- SensorType tests ---

    #[test]
    fn test_sensor_tags() {
        assert_eq!(SensorType::from_tag("ECG"), Some(SensorType::Ecg));
        assert_eq!(SensorType::from_tag("BP_SYS"), Some(SensorType::BpSys));
        assert_eq!(SensorType::from_tag("BP_DIA"), Some(SensorType::BpDia));
        assert_eq!(SensorType::from_tag("SpO2"), Some(SensorType::SpO2));
        assert_eq!(SensorType::from_tag("Temp"), Some(SensorType::Temp));
        assert_eq!(SensorType::from_tag("ecg"), None);
        assert_eq!(SensorType::from_tag(""), None);
    }

    #[test]
    fn test_sensor_feature_mapping() {
        assert_eq!(SensorType::Ecg.feature_column(), "heart_rate");
        assert_eq!(SensorType::BpSys.feature_column(), "bp_systolic");
        assert_eq!(SensorType::BpDia.feature_column(), "bp_diastolic");
        assert_eq!(SensorType::SpO2.feature_column(), "oxygen_saturation");
        assert_eq!(SensorType::Temp.feature_column(), "temperature");

        for sensor in SensorType::ALL {
            assert!(FEATURE_COLUMNS.contains(&sensor.feature_column()));
        }
    }

    #[test]
    fn test_sensor_from_str() {
        assert_eq!("Temp".parse::<SensorType>(), Ok(SensorType::Temp));

        let err = "Glucose".parse::<SensorType>().unwrap_err();
        assert_eq!(err, ParseError::UnknownSensor("Glucose".to_string()));
        assert_eq!(err.to_string(), "Unknown sensor type: Glucose");
    }

    #[test]
    fn test_sensor_display_matches_tag() {
        for sensor in SensorType::ALL {
            assert_eq!(sensor.to_string(), sensor.as_str());
        }
    }

    // --- Value tests ---

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse("72"), Value::Number(72.0));
        assert_eq!(Value::parse("98.6"), Value::Number(98.6));
        assert_eq!(Value::parse("-1.5"), Value::Number(-1.5));
        assert_eq!(Value::parse("120/80"), Value::Text("120/80".to_string()));
        assert_eq!(Value::parse("NaN"), Value::Text("NaN".to_string()));
    }

    #[test]
    fn test_value_padded_cell_keeps_text() {
        for cell in [" 72", "72 ", "\t98.6"] {
            let value = Value::parse(cell);
            assert_eq!(value, Value::Text(cell.to_string()));
            assert_eq!(value.to_string(), cell);
        }
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(72.0).to_string(), "72");
        assert_eq!(Value::Number(36.6).to_string(), "36.6");
        assert_eq!(Value::Text("n/a".to_string()).to_string(), "n/a");
    }

    // --- VitalRecord tests ---

    #[test]
    fn test_record_from_known_sensor() {
        let reading = Reading::new("P1", SensorType::BpSys, 120).at("2024-01-01 08:00:00");
        let record = VitalRecord::from_reading(&reading);

        assert_eq!(record.patient_id.as_deref(), Some("P1"));
        assert_eq!(record.timestamp.as_deref(), Some("2024-01-01 08:00:00"));
        assert_eq!(record.sensor.as_deref(), Some("BP_SYS"));
        assert_eq!(record.value, Some(Value::Number(120.0)));
        assert_eq!(record.bp_systolic, Some(Value::Number(120.0)));
        assert!(record.heart_rate.is_none());
        assert!(record.bp_diastolic.is_none());
        assert!(record.oxygen_saturation.is_none());
        assert!(record.temperature.is_none());
    }

    #[test]
    fn test_record_from_unknown_sensor() {
        let reading = Reading::new("P1", "Glucose", 5.4);
        let record = VitalRecord::from_reading(&reading);

        assert_eq!(record.sensor.as_deref(), Some("Glucose"));
        assert_eq!(record.value, Some(Value::Number(5.4)));
        for sensor in SensorType::ALL {
            assert!(record.feature(sensor).is_none());
        }
    }

    #[test]
    fn test_record_from_untagged_reading() {
        let record = VitalRecord::from_reading(&Reading::untagged("P2", "n/a"));

        assert!(record.sensor.is_none());
        assert_eq!(record.value, Some(Value::Text("n/a".to_string())));
        assert!(record.sensor_type().is_none());
    }

    #[test]
    fn test_record_without_timestamp_uses_now() {
        let before = wall_clock_now();
        let record = VitalRecord::from_reading(&Reading::new("P1", SensorType::Temp, 36.8));
        let after = wall_clock_now();

        let ts = record.timestamp.clone().unwrap();
        assert!(before <= ts && ts <= after);
        assert!(record.recorded_at().is_some());
    }

    #[test]
    fn test_record_cells_follow_column_order() {
        let reading = Reading::new("P1", SensorType::SpO2, 97).at("2024-01-01 08:00:00");
        let cells = VitalRecord::from_reading(&reading).to_cells();

        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0].as_deref(), Some("P1"));
        assert_eq!(cells[2].as_deref(), Some("SpO2"));
        assert_eq!(cells[3].as_deref(), Some("97"));
        assert_eq!(cells[7].as_deref(), Some("97"));
        assert!(cells[4].is_none());
    }

    #[test]
    fn test_record_from_cells() {
        let record = VitalRecord::from_cells([
            Some("P9"),
            Some("2024-01-01 08:00:00"),
            Some("ECG"),
            Some("72"),
            Some("72"),
            None,
            None,
            None,
            None,
        ]);

        assert_eq!(record.sensor_type(), Some(SensorType::Ecg));
        assert_eq!(record.feature(SensorType::Ecg), Some(&Value::Number(72.0)));
        assert!(record.feature(SensorType::Temp).is_none());
    }

    // --- Serialization tests ---

    #[test]
    fn test_record_serializes_all_columns_in_order() {
        let reading = Reading::new("P1", SensorType::Ecg, 72).at("2024-01-01 08:00:00");
        let json = serde_json::to_string(&VitalRecord::from_reading(&reading)).unwrap();

        assert_eq!(
            json,
            r#"{"patient_id":"P1","timestamp":"2024-01-01 08:00:00","sensor":"ECG","value":72.0,"heart_rate":72.0,"bp_systolic":null,"bp_diastolic":null,"oxygen_saturation":null,"temperature":null}"#
        );
    }

    #[test]
    fn test_sensor_serialization_uses_tags() {
        assert_eq!(serde_json::to_string(&SensorType::SpO2).unwrap(), "\"SpO2\"");
        assert_eq!(serde_json::to_string(&SensorType::BpDia).unwrap(), "\"BP_DIA\"");
    }

    #[test]
    fn test_value_deserialization_is_untagged() {
        let n: Value = serde_json::from_str("98.6").unwrap();
        assert_eq!(n, Value::Number(98.6));
        let t: Value = serde_json::from_str("\"irregular\"").unwrap();
        assert_eq!(t, Value::Text("irregular".to_string()));
    }
}
