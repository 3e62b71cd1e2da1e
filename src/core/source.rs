// src/core/source.rs

use std::path::PathBuf;
use std::process::Command;

use super::config::SourceConfig;
use super::error::{PipelineError, Result};

const IOREG: &str = "/usr/sbin/ioreg";
const SMART_BATTERY_ENTRY: &str = "AppleSmartBattery";

/// Anything that can produce one full diagnostic dump as ordered lines.
///
/// The production implementation shells out to the platform registry tool;
/// tests substitute canned line sets.
pub trait DiagnosticSource {
    fn dump(&self) -> Result<Vec<String>>;
}

// Reads the smart-battery registry entry via the `ioreg` utility.
//
// One short-lived child process per call, captured to completion before
// any parsing happens. There is deliberately no timeout: a wedged utility
// blocks the caller, matching the platform tool's own behaviour.
pub struct IoregSource {
    program: PathBuf,
    args: Vec<String>,
}

impl IoregSource {
    // `ioreg -l -n AppleSmartBattery -r`: full listing of the named entry
    // and everything below it.
    pub fn new() -> Self {
        IoregSource::with_program(PathBuf::from(IOREG))
    }

    pub fn with_program(program: PathBuf) -> Self {
        let args = vec![
            "-l".to_owned(),
            "-n".to_owned(),
            SMART_BATTERY_ENTRY.to_owned(),
            "-r".to_owned(),
        ];
        IoregSource { program, args }
    }

    pub fn from_config(cfg: &SourceConfig) -> Self {
        match &cfg.command {
            Some(program) => IoregSource::with_program(program.clone()),
            None => IoregSource::new(),
        }
    }

    // Test/override hook: replace the argument list wholesale.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Default for IoregSource {
    fn default() -> Self {
        IoregSource::new()
    }
}

impl DiagnosticSource for IoregSource {
    fn dump(&self) -> Result<Vec<String>> {
        // .output() waits for exit and drains both pipes fully
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| {
                PipelineError::SourceUnavailable(format!(
                    "spawning {}: {e}",
                    self.program.display()
                ))
            })?;

        // The dump goes to stdout; diagnostics from the tool itself land
        // on stderr. Both are scanned, stdout first.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(text.lines().map(str::to_owned).collect())
    }
}
