// tests/pipeline.rs
//
// End-to-end pipeline behaviour against a canned diagnostic source and an
// in-memory record slot.

use battinfo_rs::core::error::PipelineError;
use battinfo_rs::core::record::BatteryRecord;
use battinfo_rs::core::service::BatteryService;
use battinfo_rs::core::source::DiagnosticSource;
use battinfo_rs::core::store::MemoryStore;

// A source serving a fixed dump, or refusing to run at all.
struct FakeSource {
    lines: Option<Vec<String>>,
}

impl FakeSource {
    fn with_dump(text: &str) -> Self {
        FakeSource {
            lines: Some(text.lines().map(str::to_owned).collect()),
        }
    }

    fn unavailable() -> Self {
        FakeSource { lines: None }
    }
}

impl DiagnosticSource for FakeSource {
    fn dump(&self) -> Result<Vec<String>, PipelineError> {
        self.lines
            .clone()
            .ok_or_else(|| PipelineError::SourceUnavailable("fake utility down".into()))
    }
}

// Shaped like a real `ioreg -l -n AppleSmartBattery -r` listing: nested
// sub-dictionaries sharing key names, structural braces, quoting noise.
const DUMP: &str = r#"+-o AppleSmartBattery  <class AppleSmartBattery, id 0x100000321, registered>
    {
      "BatteryData" = {"DesignCapacity"=9999,"CycleCount"=9999}
      "Voltage" = 12500
      "AppleRawCurrentCapacity" = 4000
      "AppleRawMaxCapacity" = 4800
      "DesignCapacity" = 5000
      "CycleCount" = 120
      "Serial" = "ABC123"
      "IsCharging" = No
      "Temperature" = 2534
      "PowerTelemetryData" = {"Voltage"=1}
    }
"#;

#[test]
fn full_pass_returns_normalized_record() {
    let service = BatteryService::new(FakeSource::with_dump(DUMP), MemoryStore::new());
    let record = service.current();

    assert_eq!(record.voltage_mv, 12500);
    assert_eq!(record.current_capacity, 4000);
    assert_eq!(record.max_capacity, 4800);
    // top-level DesignCapacity wins, not the BatteryData copy
    assert_eq!(record.design_capacity, 5000);
    assert_eq!(record.cycle_count, 120);
    assert_eq!(record.serial, "ABC123");
    assert!(!record.charging);
    assert_eq!(record.temperature, 25);
}

#[test]
fn dead_source_with_empty_slot_serves_sentinel() {
    let service = BatteryService::new(FakeSource::unavailable(), MemoryStore::new());
    assert_eq!(service.current(), BatteryRecord::sentinel());
}

#[test]
fn dead_source_serves_last_published_record() {
    let store = MemoryStore::new();

    // publish a good pass into the slot
    let published = BatteryService::new(FakeSource::with_dump(DUMP), &store).current();
    assert_ne!(published, BatteryRecord::sentinel());

    // same slot, broken source: the old record comes back
    let degraded = BatteryService::new(FakeSource::unavailable(), &store);
    assert_eq!(degraded.current(), published);
}

#[test]
fn missing_required_field_keeps_prior_record() {
    let store = MemoryStore::new();
    let published = BatteryService::new(FakeSource::with_dump(DUMP), &store).current();

    // Serial dropped from the dump: normalization fails, slot untouched
    let partial = DUMP.replace("\"Serial\" = \"ABC123\"\n", "");
    let degraded = BatteryService::new(FakeSource::with_dump(&partial), &store);
    assert_eq!(degraded.current(), published);
}

#[test]
fn corrupt_slot_serves_sentinel() {
    let store = MemoryStore::with_raw(b"{not json".to_vec());
    let service = BatteryService::new(FakeSource::unavailable(), store);
    assert_eq!(service.current(), BatteryRecord::sentinel());
}

#[test]
fn successful_pass_overwrites_corrupt_slot() {
    let store = MemoryStore::with_raw(b"{not json".to_vec());
    let service = BatteryService::new(FakeSource::with_dump(DUMP), store);
    assert_eq!(service.current().serial, "ABC123");
}

#[test]
fn field_report_is_sorted_and_clean() {
    let service = BatteryService::new(FakeSource::with_dump(DUMP), MemoryStore::new());
    let report = service.field_report().unwrap();

    let lines: Vec<&str> = report.lines().collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
    assert!(report.contains("Serial : ABC123"));
    assert!(!report.contains('"'));
    assert!(!report.contains("BatteryData"));
}

#[test]
fn field_report_surfaces_source_failure() {
    let service = BatteryService::new(FakeSource::unavailable(), MemoryStore::new());
    assert!(matches!(
        service.field_report(),
        Err(PipelineError::SourceUnavailable(_))
    ));
}
