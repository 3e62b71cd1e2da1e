// src/core/record.rs

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, Result};
use super::extract::FieldMap;

/// One normalized battery snapshot, as published to the shared slot.
///
/// Capacities are in the battery controller's raw units; `voltage_mv` is
/// millivolts. `temperature` is the controller's raw sensor value truncated
/// to its first two digits (see [`normalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryRecord {
    pub voltage_mv: i64,
    pub current_capacity: i64,
    pub max_capacity: i64,
    pub design_capacity: i64,
    pub cycle_count: i64,
    pub serial: String,
    pub charging: bool,
    pub temperature: i64,
}

impl BatteryRecord {
    /// The all-zeros fallback served when nothing was ever published.
    /// A consumer rendering this record (everything 0, serial "None") is
    /// the canonical sign the pipeline has never produced a valid pass.
    pub fn sentinel() -> Self {
        BatteryRecord {
            voltage_mv: 0,
            current_capacity: 0,
            max_capacity: 0,
            design_capacity: 0,
            cycle_count: 0,
            serial: "None".to_owned(),
            charging: false,
            temperature: 0,
        }
    }

    // Current charge as a fraction of what the aged pack can hold
    pub fn charge_percent(&self) -> f64 {
        percent(self.current_capacity, self.max_capacity)
    }

    // How much of the nominal design capacity the pack still delivers
    pub fn health_percent(&self) -> f64 {
        percent(self.max_capacity, self.design_capacity)
    }
}

fn percent(value: i64, max: i64) -> f64 {
    if max > 0 {
        (value as f64 / max as f64) * 100.0
    } else {
        0.0
    }
}

fn required_int(fields: &FieldMap, key: &'static str) -> Result<i64> {
    fields
        .get(key)
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(PipelineError::MissingRequiredField(key))
}

/// Turn a raw field map into a typed record.
///
/// Voltage, AppleRawCurrentCapacity, AppleRawMaxCapacity, DesignCapacity,
/// CycleCount and Serial are required; anything else defaults. Pure - no
/// I/O, and calling it twice on the same map yields identical records.
pub fn normalize(fields: &FieldMap) -> Result<BatteryRecord> {
    let voltage_mv = required_int(fields, "Voltage")?;
    let current_capacity = required_int(fields, "AppleRawCurrentCapacity")?;
    let max_capacity = required_int(fields, "AppleRawMaxCapacity")?;
    let mut design_capacity = required_int(fields, "DesignCapacity")?;
    let cycle_count = required_int(fields, "CycleCount")?;
    let serial = fields
        .get("Serial")
        .cloned()
        .ok_or(PipelineError::MissingRequiredField("Serial"))?;

    // An aged pack can report a raw max above its nominal design rating.
    // Floor design at max so derived percentages never exceed 100 and the
    // health divisor can't be smaller than the numerator.
    if max_capacity >= design_capacity {
        design_capacity = max_capacity;
    }

    // Long-standing quirk, kept bit-for-bit: the raw sensor string is
    // truncated to its first two characters and read as whole degrees
    // ("2534" becomes 25). Unparsable or absent reads as 0.
    let raw_temp = fields.get("Temperature").map(String::as_str).unwrap_or("0");
    let temperature = raw_temp
        .chars()
        .take(2)
        .collect::<String>()
        .parse::<i64>()
        .unwrap_or(0);

    // Anything other than a literal "No" counts as charging, including a
    // missing field. Unknown state deliberately reads as charging.
    let charging = fields.get("IsCharging").map(String::as_str) != Some("No");

    Ok(BatteryRecord {
        voltage_mv,
        current_capacity,
        max_capacity,
        design_capacity,
        cycle_count,
        serial,
        charging,
        temperature,
    })
}
