//! Local ledger for a personal lifestyle routine: training activities, food and general expenses,
//! debts, a profile and a dhikr counter. Everything lives in JSON snapshots on the local disk, no
//! server or account is involved.
//!

pub mod adhkar;
pub mod aggregate;
pub mod cli;
pub mod locale;
pub mod query;
pub mod store;
pub mod tasbeeh;
pub mod utils;
