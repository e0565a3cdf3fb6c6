//! Dhikr counting. A session counts towards one preset's target, while every count also goes into
//! the persisted lifetime [TasbeehTally].

use anyhow::Result;
use tracing::debug;

use crate::{
    locale::{pick, Language, Localized},
    store::{
        entities::{TallyChange, TasbeehTally},
        singleton::SingletonStore,
        snapshot::SnapshotStorage,
    },
    utils::percentage::Percentage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhikrPreset {
    pub arabic: &'static str,
    pub transliteration: &'static str,
    pub target: u32,
}

impl Localized for DhikrPreset {
    fn label(&self, language: Language) -> &'static str {
        pick(language, self.arabic, self.transliteration)
    }
}

pub const PRESETS: [DhikrPreset; 6] = [
    DhikrPreset {
        arabic: "سبحان الله",
        transliteration: "SubhanAllah",
        target: 33,
    },
    DhikrPreset {
        arabic: "الحمد لله",
        transliteration: "Alhamdulillah",
        target: 33,
    },
    DhikrPreset {
        arabic: "الله أكبر",
        transliteration: "Allahu Akbar",
        target: 34,
    },
    DhikrPreset {
        arabic: "لا إله إلا الله",
        transliteration: "La ilaha illallah",
        target: 100,
    },
    DhikrPreset {
        arabic: "أستغفر الله",
        transliteration: "Astaghfirullah",
        target: 100,
    },
    DhikrPreset {
        arabic: "لا حول ولا قوة إلا بالله",
        transliteration: "La hawla wa la quwwata illa billah",
        target: 100,
    },
];

pub struct TasbeehSession<S> {
    preset: DhikrPreset,
    count: u32,
    tally: SingletonStore<TasbeehTally, S>,
}

impl<S: SnapshotStorage> TasbeehSession<S> {
    /// Starts counting `PRESETS[preset]`. Out of range indexes fall back to the first preset.
    pub fn new(tally: SingletonStore<TasbeehTally, S>, preset: usize) -> Self {
        let preset = PRESETS.get(preset).copied().unwrap_or(PRESETS[0]);
        Self {
            preset,
            count: 0,
            tally,
        }
    }

    pub fn preset(&self) -> &DhikrPreset {
        &self.preset
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn total(&self) -> u64 {
        self.tally.get().total_count
    }

    pub fn progress(&self) -> Percentage {
        Percentage::of_f64(self.count as f64, self.preset.target as f64)
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.preset.target
    }

    pub async fn increment(&mut self) -> Result<()> {
        self.tally.update(TallyChange::Add(1)).await?;
        self.count += 1;
        debug!("Session count {} total {}", self.count, self.total());
        Ok(())
    }

    /// Does nothing once the session is back at zero.
    pub async fn decrement(&mut self) -> Result<()> {
        if self.count == 0 {
            return Ok(());
        }
        self.tally.update(TallyChange::Subtract(1)).await?;
        self.count -= 1;
        Ok(())
    }

    /// Restarts the session, the lifetime total is kept.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub async fn reset_all(&mut self) -> Result<()> {
        self.tally.update(TallyChange::Reset).await?;
        self.count = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;

    use crate::store::{
        entities::TasbeehTally, singleton::SingletonStore, snapshot::MemorySnapshotStorage,
    };

    use super::{TasbeehSession, PRESETS};

    async fn session(
        storage: Arc<MemorySnapshotStorage>,
        preset: usize,
    ) -> Result<TasbeehSession<Arc<MemorySnapshotStorage>>> {
        let tally: SingletonStore<TasbeehTally, _> = SingletonStore::open(storage).await?;
        Ok(TasbeehSession::new(tally, preset))
    }

    #[tokio::test]
    async fn test_counting_updates_total() -> Result<()> {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let mut tasbeeh = session(storage.clone(), 2).await?;
        assert_eq!(tasbeeh.preset().target, 34);

        for _ in 0..34 {
            tasbeeh.increment().await?;
        }
        assert!(tasbeeh.is_complete());
        assert_eq!(*tasbeeh.progress(), 100);

        tasbeeh.decrement().await?;
        assert_eq!(tasbeeh.count(), 33);
        assert_eq!(tasbeeh.total(), 33);

        let reopened = session(storage, 0).await?;
        assert_eq!(reopened.total(), 33);
        assert_eq!(reopened.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_at_zero_changes_nothing() -> Result<()> {
        let storage = Arc::new(MemorySnapshotStorage::with_snapshot(
            "tasbeeh",
            r#"{"totalCount":10}"#,
        ));
        let mut tasbeeh = session(storage.clone(), 0).await?;
        tasbeeh.decrement().await?;
        assert_eq!(tasbeeh.count(), 0);
        assert_eq!(tasbeeh.total(), 10);
        assert_eq!(storage.writes(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_resets() -> Result<()> {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let mut tasbeeh = session(storage, 5).await?;
        tasbeeh.increment().await?;
        tasbeeh.increment().await?;

        tasbeeh.reset();
        assert_eq!(tasbeeh.count(), 0);
        assert_eq!(tasbeeh.total(), 2);

        tasbeeh.increment().await?;
        tasbeeh.reset_all().await?;
        assert_eq!(tasbeeh.count(), 0);
        assert_eq!(tasbeeh.total(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_preset_falls_back() -> Result<()> {
        let tasbeeh = session(Arc::new(MemorySnapshotStorage::new()), 42).await?;
        assert_eq!(tasbeeh.preset(), &PRESETS[0]);
        assert_eq!(*tasbeeh.progress(), 0);
        Ok(())
    }
}
