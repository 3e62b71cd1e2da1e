// src/core/store.rs

use once_cell::sync::OnceCell;

use directories::BaseDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use super::error::{PipelineError, Result};
use super::record::BatteryRecord;

const SLOT_FILE: &str = "battery.json";

static SHARED_SLOT_PATH: OnceCell<PathBuf> = OnceCell::new();

/// One named slot holding the most recent published record.
///
/// `write` overwrites whatever was there; `read` returns `None` for an
/// empty slot. Concurrent access from cooperating processes is
/// last-write-wins - the data is a frequently refreshed snapshot, not a
/// transactional record.
pub trait RecordStore {
    fn write(&self, record: &BatteryRecord) -> Result<()>;
    fn read(&self) -> Result<Option<BatteryRecord>>;
}

// Lets tests hold on to a store while the service borrows it
impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn write(&self, record: &BatteryRecord) -> Result<()> {
        (**self).write(record)
    }

    fn read(&self) -> Result<Option<BatteryRecord>> {
        (**self).read()
    }
}

// JSON file in a per-user data directory, so the panel process and the
// widget process see the same slot.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    // Resolve (once) and create the shared data directory
    pub fn shared() -> Result<Self> {
        let path = SHARED_SLOT_PATH
            .get_or_try_init(|| {
                let base = BaseDirs::new().ok_or_else(|| {
                    std::io::Error::new(ErrorKind::NotFound, "no home directory for data dir")
                })?;
                let dir = base.data_local_dir().join("battinfo-rs");
                fs::create_dir_all(&dir)?;
                Ok::<_, std::io::Error>(dir.join(SLOT_FILE))
            })?
            .clone();

        Ok(FileStore { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        FileStore { path }
    }
}

impl RecordStore for FileStore {
    fn write(&self, record: &BatteryRecord) -> Result<()> {
        let data = serde_json::to_vec(record).map_err(PipelineError::Encode)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<BatteryRecord>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_slice(&data).map_err(PipelineError::Decode)?;
        Ok(Some(record))
    }
}

// In-process slot for tests and for consumers that don't want a file on
// disk. Still round-trips through JSON so encode/decode behaves exactly
// like the file-backed store.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    // Pre-load the slot with arbitrary bytes (e.g. a corrupt payload)
    pub fn with_raw(data: Vec<u8>) -> Self {
        MemoryStore {
            slot: Mutex::new(Some(data)),
        }
    }
}

impl RecordStore for MemoryStore {
    fn write(&self, record: &BatteryRecord) -> Result<()> {
        let data = serde_json::to_vec(record).map_err(PipelineError::Encode)?;
        *self.slot.lock().unwrap() = Some(data);
        Ok(())
    }

    fn read(&self) -> Result<Option<BatteryRecord>> {
        match self.slot.lock().unwrap().as_deref() {
            Some(data) => {
                let record = serde_json::from_slice(data).map_err(PipelineError::Decode)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
