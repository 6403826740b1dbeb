//! Output formatting for text, JSON, and CSV output.

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use vitals_types::{COLUMNS, Value, VitalRecord};

/// Placeholder for null cells in text output.
const NULL_CELL: &str = "-";

fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or(NULL_CELL).to_string()
}

fn value_cell(value: Option<&Value>) -> String {
    value.map_or_else(|| NULL_CELL.to_string(), Value::to_string)
}

#[must_use]
pub fn format_history_text(patient_id: &str, history: &[VitalRecord]) -> String {
    if history.is_empty() {
        return format!("No readings found for {}.\n", patient_id);
    }

    let mut output = format!("History for {} ({} readings):\n\n", patient_id, history.len());

    let mut builder = Builder::default();
    builder.push_record(["Timestamp", "Sensor", "Value"]);
    for record in history {
        builder.push_record([
            text_cell(record.timestamp.as_deref()),
            text_cell(record.sensor.as_deref()),
            value_cell(record.value.as_ref()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Format history rows as CSV with the full column set.
pub fn format_history_csv(history: &[VitalRecord]) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(COLUMNS)?;
        for record in history {
            let cells = record.to_cells();
            writer.write_record(cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Format history rows as a pretty-printed JSON array.
pub fn format_history_json(history: &[VitalRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(history)? + "\n")
}

#[must_use]
pub fn format_patients(patient_ids: &[String]) -> String {
    if patient_ids.is_empty() {
        return "No patients recorded.\n".to_string();
    }
    let mut output = String::new();
    for id in patient_ids {
        output.push_str(id);
        output.push('\n');
    }
    output
}
