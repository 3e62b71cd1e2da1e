// src/core/service.rs

use tracing::{debug, warn};

use super::error::Result;
use super::extract::{extract_fields, render_fields};
use super::record::{BatteryRecord, normalize};
use super::source::DiagnosticSource;
use super::store::RecordStore;

/// The one consumer-facing surface: dump -> extract -> normalize ->
/// publish, then serve whatever the shared slot holds.
///
/// Both collaborators are injected so the pipeline runs against fakes in
/// tests; production wires in [`IoregSource`](super::source::IoregSource)
/// and [`FileStore`](super::store::FileStore).
pub struct BatteryService<S, R> {
    source: S,
    store: R,
}

impl<S: DiagnosticSource, R: RecordStore> BatteryService<S, R> {
    pub fn new(source: S, store: R) -> Self {
        BatteryService { source, store }
    }

    /// Serve the current record. Never fails: a broken source, a field
    /// the dump stopped reporting, or a corrupt slot all degrade to the
    /// last published record, or to [`BatteryRecord::sentinel`] if
    /// nothing was ever published.
    pub fn current(&self) -> BatteryRecord {
        if let Err(e) = self.refresh() {
            warn!(error = %e, "refresh failed, serving last published record");
        }

        match self.store.read() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("slot empty, serving sentinel record");
                BatteryRecord::sentinel()
            }
            Err(e) => {
                warn!(error = %e, "slot unreadable, serving sentinel record");
                BatteryRecord::sentinel()
            }
        }
    }

    // One full pipeline pass. Publishing is best effort: a failed write
    // only means the next reader sees a stale value, so it is logged and
    // swallowed rather than failing the pass.
    fn refresh(&self) -> Result<()> {
        let lines = self.source.dump()?;
        let fields = extract_fields(&lines);
        let record = normalize(&fields)?;

        if let Err(e) = self.store.write(&record) {
            warn!(error = %e, "publishing record failed");
        }
        Ok(())
    }

    /// Raw sorted `key : value` report of the extracted fields, for
    /// inspection surfaces. Unlike [`current`](Self::current) this does
    /// surface a source failure, since there is no cached fallback for
    /// raw text.
    pub fn field_report(&self) -> Result<String> {
        let lines = self.source.dump()?;
        Ok(render_fields(&extract_fields(&lines)))
    }
}
