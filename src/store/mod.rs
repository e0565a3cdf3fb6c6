//! Persistence is organized through [record_store::RecordStore] and [singleton::SingletonStore].
//! The basic idea is:
//!  - Every domain owns one key in a [snapshot::SnapshotStorage].
//!  - The in-memory collection is the source of truth, the stored snapshot only mirrors it.
//!  - Each mutation serializes the whole domain and overwrites its snapshot.

pub mod entities;
pub mod record_store;
pub mod singleton;
pub mod snapshot;

use entities::{Activity, Debt, FoodExpense, GeneralExpense, TasbeehTally, UserProfile};
use record_store::RecordStore;
use singleton::SingletonStore;

pub type ActivityStore<S> = RecordStore<Activity, S>;
pub type FoodExpenseStore<S> = RecordStore<FoodExpense, S>;
pub type GeneralExpenseStore<S> = RecordStore<GeneralExpense, S>;
pub type DebtStore<S> = RecordStore<Debt, S>;
pub type ProfileStore<S> = SingletonStore<UserProfile, S>;
pub type TallyStore<S> = SingletonStore<TasbeehTally, S>;
