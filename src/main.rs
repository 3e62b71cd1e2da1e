// src/main.rs
extern crate anyhow;
extern crate battinfo_rs;

use anyhow::{Context, Result};
use battinfo_rs::core::config::Config;
use battinfo_rs::core::service::BatteryService;
use battinfo_rs::core::source::IoregSource;
use battinfo_rs::core::store::FileStore;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Periodic consumer loop standing in for the panel/widget surfaces: pull
// a fresh record on each tick and print a one-line snapshot. The service
// itself holds no timer; the interval lives here.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().context("Loading application configuration")?;

    let source = IoregSource::from_config(&config.source);
    let store = match &config.store.path {
        Some(path) => FileStore::with_path(path.clone()),
        None => FileStore::shared().context("Resolving shared record slot")?,
    };
    let service = BatteryService::new(source, store);

    let mut ticker = tokio::time::interval(Duration::from_secs(config.refresh_secs.into()));
    loop {
        ticker.tick().await;

        let record = service.current();
        info!(
            serial = %record.serial,
            voltage_mv = record.voltage_mv,
            cycle_count = record.cycle_count,
            charging = record.charging,
            "battery snapshot"
        );
        println!(
            "{}: {:.0}% charged ({} / {}), health {:.0}%, {} cycles, {} mV, {} C{}",
            record.serial,
            record.charge_percent(),
            record.current_capacity,
            record.max_capacity,
            record.health_percent(),
            record.cycle_count,
            record.voltage_mv,
            record.temperature,
            if record.charging { ", charging" } else { "" },
        );
    }
}
