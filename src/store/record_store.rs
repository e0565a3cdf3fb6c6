use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::utils::clock::Clock;

use super::{
    entities::Activity,
    snapshot::{decode_records, encode_records, SnapshotStorage},
};

/// A single entity of a collection domain: activities, food expenses, general expenses or debts.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Fields supplied by the user when creating a record. Id and creation time are assigned by
    /// the store.
    type Draft;
    /// Partial update. Absent fields stay untouched.
    type Patch;

    /// Storage key used by [RecordStore::open].
    const DEFAULT_KEY: &'static str;

    fn id(&self) -> &str;

    fn create(id: String, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// What was found in storage when a store was loaded. Missing and corrupt snapshots both result
/// in an empty store, this only exists for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Missing,
    Loaded,
    Corrupt,
}

pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// The canonical collection of one domain. Records are kept newest first. Every mutation
/// rewrites the whole snapshot before the in-memory collection changes, so the two never
/// diverge.
pub struct RecordStore<T, S> {
    storage: S,
    key: String,
    records: Vec<T>,
    origin: SnapshotOrigin,
    clock: Box<dyn Clock>,
}

impl<T: Record, S: SnapshotStorage> RecordStore<T, S> {
    /// Loads the store from the domain's default key.
    pub async fn open(storage: S, clock: Box<dyn Clock>) -> Result<Self> {
        Self::load(storage, T::DEFAULT_KEY, clock).await
    }

    /// Loads the store from `key`. Missing or malformed snapshots produce an empty store, only
    /// storage failures are returned as errors.
    pub async fn load(storage: S, key: impl Into<String>, clock: Box<dyn Clock>) -> Result<Self> {
        let key = key.into();
        let raw = storage
            .read(&key)
            .await
            .with_context(|| format!("Failed to load snapshot {key}"))?;

        let (records, origin) = match raw {
            None => {
                debug!("No snapshot stored under {key}");
                (vec![], SnapshotOrigin::Missing)
            }
            Some(raw) => match decode_records::<T>(&raw) {
                Ok(records) => {
                    debug!("Loaded {} records from {key}", records.len());
                    (records, SnapshotOrigin::Loaded)
                }
                Err(e) => {
                    // The data is unusable either way, continue as if nothing was stored.
                    warn!("Snapshot {key} is malformed, starting empty: {e}");
                    (vec![], SnapshotOrigin::Corrupt)
                }
            },
        };

        Ok(Self {
            storage,
            key,
            records,
            origin,
            clock,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|v| v.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Creates a record with a fresh id and creation time and puts it in front of the collection.
    pub async fn add(&mut self, draft: T::Draft) -> Result<&T> {
        let record = T::create(new_record_id(), self.clock.time(), draft);
        debug!("Adding {} to {}", record.id(), self.key);

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next).await?;

        Ok(&self.records[0])
    }

    /// Merges `patch` into the record with `id`. Returns `false` without touching storage when
    /// no such record exists.
    pub async fn update(&mut self, id: &str, patch: T::Patch) -> Result<bool> {
        let now = self.clock.time();
        self.modify(id, |record| record.apply(patch, now)).await
    }

    /// Removes the record with `id`. Returns `false` without touching storage when no such record
    /// exists.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.position(id) else {
            debug!("Nothing to delete for {id} in {}", self.key);
            return Ok(false);
        };
        let mut next = self.records.clone();
        next.remove(index);
        self.commit(next).await?;
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|v| v.id() == id)
    }

    async fn modify(&mut self, id: &str, change: impl FnOnce(&mut T)) -> Result<bool> {
        let Some(index) = self.position(id) else {
            debug!("Nothing to modify for {id} in {}", self.key);
            return Ok(false);
        };
        let mut next = self.records.clone();
        change(&mut next[index]);
        self.commit(next).await?;
        Ok(true)
    }

    async fn commit(&mut self, next: Vec<T>) -> Result<()> {
        let snapshot = encode_records(&next)?;
        self.storage
            .write(&self.key, &snapshot)
            .await
            .with_context(|| format!("Failed to persist snapshot {}", self.key))?;
        self.records = next;
        Ok(())
    }
}

impl<S: SnapshotStorage> RecordStore<Activity, S> {
    /// Flips `completed` of the activity with `id`. Unknown ids are a no-op.
    pub async fn toggle_complete(&mut self, id: &str) -> Result<bool> {
        self.modify(id, |activity| activity.completed = !activity.completed)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::{future::Future, sync::Arc};

    use anyhow::{anyhow, Result};
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        store::{
            entities::{
                Activity, ActivityDraft, ActivityPatch, ActivityType, Debt, DebtDraft, DebtKind,
                DebtPatch,
            },
            snapshot::{FileSnapshotStorage, MemorySnapshotStorage, SnapshotStorage},
        },
        utils::{
            clock::{DefaultClock, MockClock},
            logging::TEST_LOGGING,
        },
    };

    use super::{RecordStore, SnapshotOrigin};

    fn morning_run() -> ActivityDraft {
        ActivityDraft {
            title: "Morning Run".into(),
            description: "5km along the coast".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            kind: ActivityType::Running,
            completed: false,
        }
    }

    async fn empty_store(
    ) -> Result<(Arc<MemorySnapshotStorage>, RecordStore<Activity, Arc<MemorySnapshotStorage>>)>
    {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let store = RecordStore::open(storage.clone(), Box::new(DefaultClock)).await?;
        Ok((storage, store))
    }

    #[tokio::test]
    async fn test_add_toggle_delete_scenario() -> Result<()> {
        *TEST_LOGGING;
        let (_, mut store) = empty_store().await?;

        let id = store.add(morning_run()).await?.id.clone();
        assert_eq!(store.len(), 1);
        assert!(!store.records()[0].completed);

        assert!(store.toggle_complete(&id).await?);
        assert!(store.get(&id).unwrap().completed);

        assert!(store.delete(&id).await?);
        assert!(store.is_empty());
        assert!(store.get(&id).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_creation_time() -> Result<()> {
        let moment = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        let mut clock = MockClock::new();
        clock.expect_time().return_const(moment);

        let mut store: RecordStore<Activity, _> =
            RecordStore::open(MemorySnapshotStorage::new(), Box::new(clock)).await?;
        let draft = morning_run();
        let added = store.add(draft.clone()).await?.clone();

        assert!(!added.id.is_empty());
        assert_eq!(added.created_at, moment);
        assert_eq!(added.title, draft.title);
        assert_eq!(added.description, draft.description);
        assert_eq!(added.date, draft.date);
        assert_eq!(added.kind, draft.kind);
        assert_eq!(added.completed, draft.completed);
        assert_eq!(store.get(&added.id), Some(&added));
        Ok(())
    }

    #[tokio::test]
    async fn test_newest_first_and_unique_ids() -> Result<()> {
        let (_, mut store) = empty_store().await?;
        let first = store.add(morning_run()).await?.id.clone();
        let second = store
            .add(ActivityDraft {
                title: "Gym".into(),
                kind: ActivityType::Training,
                ..morning_run()
            })
            .await?
            .id
            .clone();

        assert_ne!(first, second);
        assert_eq!(store.records()[0].id, second);
        assert_eq!(store.records()[1].id, first);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_only_touches_patched_fields() -> Result<()> {
        let (_, mut store) = empty_store().await?;
        let original = store.add(morning_run()).await?.clone();

        let updated = store
            .update(
                &original.id,
                ActivityPatch {
                    title: Some("Evening Run".into()),
                    ..Default::default()
                },
            )
            .await?;
        assert!(updated);

        let current = store.get(&original.id).unwrap();
        assert_eq!(
            current,
            &Activity {
                title: "Evening Run".into(),
                ..original
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_id_is_a_noop() -> Result<()> {
        let (storage, mut store) = empty_store().await?;
        store.add(morning_run()).await?;
        let before = storage.snapshot("activities");
        let writes = storage.writes();
        let records = store.records().to_vec();

        assert!(
            !store
                .update(
                    "missing",
                    ActivityPatch {
                        completed: Some(true),
                        ..Default::default()
                    }
                )
                .await?
        );
        assert!(!store.delete("missing").await?);
        assert!(!store.toggle_complete("missing").await?);

        assert_eq!(store.records(), records.as_slice());
        assert_eq!(storage.snapshot("activities"), before);
        assert_eq!(storage.writes(), writes);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_mutation_rewrites_snapshot() -> Result<()> {
        let (storage, mut store) = empty_store().await?;
        let id = store.add(morning_run()).await?.id.clone();
        store.toggle_complete(&id).await?;

        let reloaded: RecordStore<Activity, _> =
            RecordStore::open(storage.clone(), Box::new(DefaultClock)).await?;
        assert_eq!(reloaded.origin(), SnapshotOrigin::Loaded);
        assert_eq!(reloaded.records(), store.records());
        assert_eq!(storage.writes(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let mut store: RecordStore<Debt, _> = RecordStore::open(
            FileSnapshotStorage::new(dir.path().to_owned())?,
            Box::new(DefaultClock),
        )
        .await?;
        assert_eq!(store.origin(), SnapshotOrigin::Missing);

        store
            .add(DebtDraft {
                name: "Karim".into(),
                phone: Some("0555 12 34 56".into()),
                amount: 500.,
                kind: DebtKind::OwedToMe,
                notes: Some("Football boots".into()),
            })
            .await?;
        let id = store
            .add(DebtDraft {
                name: "Yacine".into(),
                phone: None,
                amount: 200.,
                kind: DebtKind::OwedByMe,
                notes: None,
            })
            .await?
            .id
            .clone();
        store
            .update(
                &id,
                DebtPatch {
                    amount: Some(150.),
                    ..Default::default()
                },
            )
            .await?;

        let reloaded: RecordStore<Debt, _> = RecordStore::open(
            FileSnapshotStorage::new(dir.path().to_owned())?,
            Box::new(DefaultClock),
        )
        .await?;
        assert_eq!(reloaded.records(), store.records());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_snapshot_starts_empty() -> Result<()> {
        for raw in ["{not json", r#"{"version":42,"records":[]}"#, r#"[{"id":1}]"#] {
            let storage = Arc::new(MemorySnapshotStorage::with_snapshot("activities", raw));
            let mut store: RecordStore<Activity, _> =
                RecordStore::open(storage.clone(), Box::new(DefaultClock)).await?;
            assert!(store.is_empty());
            assert_eq!(store.origin(), SnapshotOrigin::Corrupt);

            // The next write replaces the corrupt data.
            store.add(morning_run()).await?;
            let reloaded: RecordStore<Activity, _> =
                RecordStore::open(storage, Box::new(DefaultClock)).await?;
            assert_eq!(reloaded.len(), 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_array_snapshot_loads() -> Result<()> {
        let raw = r#"[{"id":"a1","title":"Rest day","description":"","date":"2024-03-02","type":"rest","completed":true,"createdAt":"2024-03-01T20:00:00.000Z"}]"#;
        let store: RecordStore<Activity, _> = RecordStore::open(
            MemorySnapshotStorage::with_snapshot("activities", raw),
            Box::new(DefaultClock),
        )
        .await?;
        assert_eq!(store.origin(), SnapshotOrigin::Loaded);
        assert_eq!(store.get("a1").map(|v| v.kind), Some(ActivityType::Rest));
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_key() -> Result<()> {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let mut store: RecordStore<Activity, _> =
            RecordStore::load(storage.clone(), "archive-2023", Box::new(DefaultClock)).await?;
        store.add(morning_run()).await?;
        assert!(storage.snapshot("archive-2023").is_some());
        assert!(storage.snapshot("activities").is_none());
        Ok(())
    }

    struct FailingStorage;

    impl SnapshotStorage for FailingStorage {
        fn read(&self, _key: &str) -> impl Future<Output = Result<Option<String>>> {
            async { Ok(None) }
        }

        fn write(&self, _key: &str, _snapshot: &str) -> impl Future<Output = Result<()>> {
            async { Err(anyhow!("disk full")) }
        }
    }

    #[tokio::test]
    async fn test_failed_write_keeps_collection() -> Result<()> {
        let mut store: RecordStore<Activity, _> =
            RecordStore::open(FailingStorage, Box::new(DefaultClock)).await?;
        assert!(store.add(morning_run()).await.is_err());
        assert!(store.is_empty());
        Ok(())
    }
}
