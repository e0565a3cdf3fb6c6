use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{
    record_store::SnapshotOrigin,
    snapshot::{decode_record, encode_record, SnapshotStorage},
};

/// A domain consisting of exactly one record, e.g. the user profile.
pub trait Singleton: Serialize + DeserializeOwned + Default + Clone {
    type Patch;

    const DEFAULT_KEY: &'static str;

    fn apply(&mut self, patch: Self::Patch);
}

/// [RecordStore](super::record_store::RecordStore) counterpart for singleton domains. Falls back
/// to `T::default()` when nothing usable is stored.
pub struct SingletonStore<T, S> {
    storage: S,
    key: String,
    value: T,
    origin: SnapshotOrigin,
}

impl<T: Singleton, S: SnapshotStorage> SingletonStore<T, S> {
    pub async fn open(storage: S) -> Result<Self> {
        Self::load(storage, T::DEFAULT_KEY).await
    }

    pub async fn load(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let raw = storage
            .read(&key)
            .await
            .with_context(|| format!("Failed to load snapshot {key}"))?;

        let (value, origin) = match raw {
            None => (T::default(), SnapshotOrigin::Missing),
            Some(raw) => match decode_record::<T>(&raw) {
                Ok(value) => (value, SnapshotOrigin::Loaded),
                Err(e) => {
                    warn!("Snapshot {key} is malformed, using defaults: {e}");
                    (T::default(), SnapshotOrigin::Corrupt)
                }
            },
        };
        debug!("Loaded {key} ({origin:?})");

        Ok(Self {
            storage,
            key,
            value,
            origin,
        })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    /// Merges `patch` into the current value and persists the result.
    pub async fn update(&mut self, patch: T::Patch) -> Result<&T> {
        let mut next = self.value.clone();
        next.apply(patch);
        self.replace(next).await
    }

    pub async fn replace(&mut self, value: T) -> Result<&T> {
        let snapshot = encode_record(&value)?;
        self.storage
            .write(&self.key, &snapshot)
            .await
            .with_context(|| format!("Failed to persist snapshot {}", self.key))?;
        self.value = value;
        Ok(&self.value)
    }
}
