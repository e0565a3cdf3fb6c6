use std::{
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use anyhow::{anyhow, bail, ensure, Context, Result};
use fs4::tokio::AsyncFileExt;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::fs::File;
use tracing::{debug, warn};
use uuid::Uuid;

/// Version written into every snapshot envelope.
pub const SNAPSHOT_VERSION: u64 = 1;

/// Key-value backend holding one serialized snapshot per key. Stores always hand over the whole
/// snapshot, there are no partial writes.
pub trait SnapshotStorage {
    /// Returns `None` if nothing was ever written under `key`.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>>;

    /// Replaces the snapshot under `key`.
    fn write(&self, key: &str, snapshot: &str) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> SnapshotStorage for T
where
    T::Target: SnapshotStorage,
{
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>> {
        self.deref().read(key)
    }

    fn write(&self, key: &str, snapshot: &str) -> impl Future<Output = Result<()>> {
        self.deref().write(key, snapshot)
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Stores each key as `<key>.json` inside a directory. A sidecar `<key>.lock` file is locked
/// around every read and write so readers never observe a half-written snapshot.
pub struct FileSnapshotStorage {
    dir: PathBuf,
}

impl FileSnapshotStorage {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn open_lock(&self, key: &str) -> Result<File> {
        ensure!(is_valid_key(key), "Illegal snapshot key {key:?}");
        let path = self.dir.join(format!("{key}.lock"));
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open lock file {path:?}"))?;
        Ok(file)
    }

    async fn write_locked(&self, key: &str, snapshot: &str) -> Result<()> {
        let path = self.snapshot_path(key);
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        let written = async {
            tokio::fs::write(&temp_path, snapshot).await?;
            tokio::fs::rename(&temp_path, &path).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove temporary snapshot {temp_path:?}: {cleanup}");
                }
            }
            return Err(e).with_context(|| format!("Failed to write snapshot {path:?}"));
        }
        Ok(())
    }
}

impl SnapshotStorage for FileSnapshotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let lock = self.open_lock(key).await?;
        lock.lock_shared()?;
        let path = self.snapshot_path(key);
        debug!("Reading snapshot {path:?}");
        let result = tokio::fs::read_to_string(&path).await;
        lock.unlock_async().await?;

        match result {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read snapshot {path:?}")),
        }
    }

    async fn write(&self, key: &str, snapshot: &str) -> Result<()> {
        let lock = self.open_lock(key).await?;
        lock.lock_exclusive()?;
        let result = self.write_locked(key, snapshot).await;
        lock.unlock_async().await?;
        result
    }
}

/// Keeps snapshots in memory. Used by tests and by callers that don't want anything on disk.
#[derive(Default)]
pub struct MemorySnapshotStorage {
    slots: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `snapshot` already present under `key`.
    pub fn with_snapshot(key: &str, snapshot: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), snapshot.to_string());
        }
        storage
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    /// Number of writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| anyhow!("Snapshot storage lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    async fn write(&self, key: &str, snapshot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow!("Snapshot storage lock poisoned"))?;
        slots.insert(key.to_string(), snapshot.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Serialize)]
struct RecordsEnvelope<'a, T> {
    version: u64,
    records: &'a [T],
}

#[derive(Serialize)]
struct RecordEnvelope<'a, T> {
    version: u64,
    record: &'a T,
}

/// Serializes a collection as `{"version": 1, "records": [...]}`.
pub fn encode_records<T: Serialize>(records: &[T]) -> Result<String> {
    Ok(serde_json::to_string(&RecordsEnvelope {
        version: SNAPSHOT_VERSION,
        records,
    })?)
}

/// Serializes a singleton as `{"version": 1, "record": {...}}`.
pub fn encode_record<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string(&RecordEnvelope {
        version: SNAPSHOT_VERSION,
        record,
    })?)
}

fn check_version(envelope: &Map<String, Value>) -> Result<()> {
    match envelope.get("version").and_then(Value::as_u64) {
        Some(SNAPSHOT_VERSION) => Ok(()),
        Some(v) => bail!("Unsupported snapshot version {v}"),
        None => bail!("Snapshot envelope has no version"),
    }
}

/// Reads a collection snapshot. A bare JSON array, as written before snapshots were versioned,
/// is accepted as well.
pub fn decode_records<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(records) => Ok(serde_json::from_value(Value::Array(records))?),
        Value::Object(mut envelope) => {
            check_version(&envelope)?;
            let records = envelope
                .remove("records")
                .ok_or_else(|| anyhow!("Snapshot envelope has no records"))?;
            Ok(serde_json::from_value(records)?)
        }
        _ => bail!("Snapshot is neither an envelope nor an array"),
    }
}

/// Reads a singleton snapshot. A bare JSON object without an envelope is accepted as well, any
/// object carrying a `version` is treated as an envelope.
pub fn decode_record<T: DeserializeOwned>(raw: &str) -> Result<T> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(mut object) if object.contains_key("version") => {
            check_version(&object)?;
            let record = object
                .remove("record")
                .ok_or_else(|| anyhow!("Snapshot envelope has no record"))?;
            Ok(serde_json::from_value(record)?)
        }
        Value::Object(object) => Ok(serde_json::from_value(Value::Object(object))?),
        _ => bail!("Snapshot is not an object"),
    }
}
