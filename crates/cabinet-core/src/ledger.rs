//! Per-minister money and evidence bookkeeping.
//!
//! Money only enters the system through theft from the treasury
//! ([`Ledger::record_theft`]); every other movement is a [`pay`] between
//! two ledgers, which conserves the total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ministry::Ministry;

/// A theft that nobody has noticed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheftRecord {
    /// How much was taken.
    pub amount: i64,
    /// The ministry whose budget was skimmed.
    pub ministry: Ministry,
}

impl fmt::Display for TheftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.amount, self.ministry.key())
    }
}

impl TheftRecord {
    /// Parse the `"amount:ministry"` form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        let (amount, ministry) = s.split_once(':')?;
        Some(Self {
            amount: amount.trim().parse().ok()?,
            ministry: Ministry::from_key(ministry)?,
        })
    }
}

/// Money and evidence held against one minister.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Honestly earned money. Never negative at rest.
    pub personal_savings: i64,
    /// Money taken from the treasury (or received as bribes). Never negative.
    pub stolen_money: i64,
    /// Thefts that have not been caught, oldest first.
    pub undetected: Vec<TheftRecord>,
    /// Proven corrupt acts on file.
    pub corruption_evidence: u32,
    /// Evidence planted this turn. Cleared by the turn hook.
    pub fabricated_evidence: u32,
}

impl Ledger {
    /// Create a ledger with the given savings and nothing else.
    pub fn with_savings(savings: i64) -> Self {
        Self {
            personal_savings: savings.max(0),
            ..Self::default()
        }
    }

    /// Everything this minister could hand over right now.
    pub fn liquid(&self) -> i64 {
        self.personal_savings + self.stolen_money
    }

    /// Returns true if a payment of `amount` can be covered in full.
    pub fn can_afford(&self, amount: i64) -> bool {
        self.liquid() >= amount
    }

    /// Add freshly stolen money. This is the only way money is created.
    pub fn record_theft(&mut self, amount: i64) {
        self.stolen_money += amount;
    }

    /// Remember a theft that went unnoticed.
    pub fn push_undetected(&mut self, record: TheftRecord) {
        self.undetected.push(record);
    }

    /// Remove and return the undetected theft at `index`.
    pub fn take_undetected(&mut self, index: usize) -> Option<TheftRecord> {
        if index < self.undetected.len() {
            Some(self.undetected.remove(index))
        } else {
            None
        }
    }

    /// File one piece of proven evidence.
    pub fn file_evidence(&mut self) {
        self.corruption_evidence += 1;
    }

    /// Plant one piece of fabricated evidence (lasts until the next turn).
    pub fn fabricate_evidence(&mut self) {
        self.fabricated_evidence += 1;
    }

    /// Sum of all thefts still undetected.
    pub fn undetected_total(&self) -> i64 {
        self.undetected.iter().map(|r| r.amount).sum()
    }

    /// Snapshot of the headline numbers.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            personal_savings: self.personal_savings,
            stolen_money: self.stolen_money,
            undetected_events: self.undetected.len(),
            undetected_total: self.undetected_total(),
            corruption_evidence: self.corruption_evidence,
            fabricated_evidence: self.fabricated_evidence,
        }
    }
}

/// Read-only view of a ledger for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Honest savings.
    pub personal_savings: i64,
    /// Stolen funds on hand.
    pub stolen_money: i64,
    /// Number of thefts nobody knows about.
    pub undetected_events: usize,
    /// Total amount of those thefts.
    pub undetected_total: i64,
    /// Evidence on file.
    pub corruption_evidence: u32,
    /// Fabricated evidence this turn.
    pub fabricated_evidence: u32,
}

/// Move `amount` from `payer` to `payee`.
///
/// Stolen funds are spent before personal savings. If the stolen balance
/// goes negative the shortfall comes out of savings, savings are floored at
/// zero, and the stolen balance is reset to zero. The payee always receives
/// the full amount into their stolen funds, so callers check
/// [`Ledger::can_afford`] first to keep the books balanced.
pub fn pay(payer: &mut Ledger, payee: &mut Ledger, amount: i64) {
    payer.stolen_money -= amount;
    if payer.stolen_money < 0 {
        payer.personal_savings = (payer.personal_savings + payer.stolen_money).max(0);
        payer.stolen_money = 0;
    }
    payee.stolen_money += amount;
}
