//! Core types for the cabinet engine: ministers, ministries, ledgers, and the roster.
//!
//! A [`Cabinet`] owns every living [`Minister`]. Each minister carries hidden
//! traits (skill and corruption), the beliefs observers hold about them, and a
//! [`Ledger`] of savings, stolen funds and evidence. Ministers can be
//! flattened to a [`Record`] for saving and rebuilt from one.
//!
//! This crate holds no randomness; dice, theft and revelation live in
//! `cabinet-mechanics`.

/// The roster and its membership rules.
pub mod cabinet;
/// Error types used throughout the crate.
pub mod error;
/// Savings, stolen funds, theft records and evidence.
pub mod ledger;
/// Minister identity, hidden traits and apparent beliefs.
pub mod minister;
/// Ministries and the attributes observers can learn about.
pub mod ministry;
/// Flat key/value records for persistence.
pub mod record;

/// Re-export roster types.
pub use cabinet::{Cabinet, Departure};
/// Re-export error types.
pub use error::{CabinetError, CabinetResult, RecordError};
/// Re-export ledger types.
pub use ledger::{Ledger, LedgerSummary, TheftRecord, pay};
/// Re-export minister types.
pub use minister::{
    Apparent, ApparentState, Assignment, Background, HiddenTraits, Minister, MinisterId,
    StatusTier,
};
/// Re-export category types.
pub use ministry::{Attribute, Inquiry, Ministry};
/// Re-export record types.
pub use record::{Record, RecordValue, from_record, to_record};
