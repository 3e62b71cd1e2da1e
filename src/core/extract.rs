// src/core/extract.rs

use std::collections::HashMap;
use std::fmt::Write;

// Substrings that mark a line as carrying one of the fields we want.
const FIELD_MARKERS: &[&str] = &[
    "DeviceName",
    "Temperature",
    "CurrentCapacity",
    "AppleRawCurrentCapacity",
    "AppleRawBatteryVoltage",
    "IsCharging",
    "Serial",
    "NominalChargeCapacity",
    "DesignCapacity",
    "Voltage",
    "CycleCount",
    "AppleRawMaxCapacity",
];

// Nested sub-dictionaries of the registry entry reuse the top-level key
// names (BatteryData carries its own DesignCapacity, for instance). Any
// line mentioning one of these sections is rejected outright so the
// nested copies never shadow the top-level fields.
const NESTED_SECTIONS: &[&str] = &[
    "IOReportLegend",
    "CarrierMode",
    "BatteryData",
    "KioskMode",
    "ChargerData",
    "FedDetails",
    "PowerTelemetryData",
];

// Raw field-name -> raw value snapshot, built once per refresh pass and
// discarded after normalization.
pub type FieldMap = HashMap<String, String>;

/// Scan diagnostic-dump lines for the known battery fields.
///
/// A line qualifies when it contains at least one field marker and no
/// nested-section marker. Qualifying lines are stripped of quotes and
/// spaces, then split on the first `=`; later lines overwrite earlier
/// ones on duplicate keys. Non-matching input just yields fewer entries,
/// never an error.
pub fn extract_fields<S: AsRef<str>>(lines: &[S]) -> FieldMap {
    let mut fields = FieldMap::new();

    for line in lines {
        let line = line.as_ref();
        if !FIELD_MARKERS.iter().any(|m| line.contains(m)) {
            continue;
        }
        if NESTED_SECTIONS.iter().any(|m| line.contains(m)) {
            continue;
        }

        let cleaned: String = line.chars().filter(|c| *c != '"' && *c != ' ').collect();
        if let Some((key, value)) = cleaned.split_once('=') {
            fields.insert(key.to_owned(), value.to_owned());
        }
    }

    fields
}

// Render a field map as `key : value` lines, keys sorted so repeated
// dumps of the same battery produce identical output.
pub fn render_fields(fields: &FieldMap) -> String {
    let mut keys: Vec<&String> = fields.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        let _ = writeln!(out, "{key} : {}", fields[key]);
    }
    out
}
