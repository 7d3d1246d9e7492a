//! The roster: every living minister, who holds which office, and who waits
//! in the pool.
//!
//! A living minister is always in exactly one place: the available pool or
//! one office. [`Cabinet`] owns both collections and is the only code that
//! moves ministers between them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CabinetError, CabinetResult};
use crate::minister::{Minister, MinisterId};
use crate::ministry::Ministry;

/// Why a minister left the game for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Departure {
    /// Dismissed by the ruler.
    Fired,
    /// Died in office or in the pool.
    Died,
    /// Retired of old age.
    Retired,
    /// Removed by the courts.
    Convicted,
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fired => write!(f, "fired"),
            Self::Died => write!(f, "died"),
            Self::Retired => write!(f, "retired"),
            Self::Convicted => write!(f, "convicted"),
        }
    }
}

/// Canonical owner of every living minister.
#[derive(Debug, Clone, Default)]
pub struct Cabinet {
    ministers: HashMap<MinisterId, Minister>,
    available: Vec<MinisterId>,
    appointed: BTreeMap<Ministry, MinisterId>,
}

impl Cabinet {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Add a minister to the available pool. Returns its ID.
    ///
    /// A minister whose ID is already on the roster is rejected.
    pub fn enlist(&mut self, mut minister: Minister) -> CabinetResult<MinisterId> {
        let id = minister.id;
        if self.ministers.contains_key(&id) {
            return Err(CabinetError::DuplicateMinister(id));
        }
        minister.set_position(None);
        self.available.push(id);
        self.ministers.insert(id, minister);
        Ok(id)
    }

    /// Put a minister into `role`, or back into the pool when `role` is `None`.
    ///
    /// Whoever held `role` before is moved to the pool and flagged as just
    /// removed. Returns the displaced minister, if any.
    pub fn appoint(
        &mut self,
        id: MinisterId,
        role: Option<Ministry>,
    ) -> CabinetResult<Option<MinisterId>> {
        let current = self
            .ministers
            .get(&id)
            .ok_or(CabinetError::MinisterNotFound(id))?
            .position();

        let Some(role) = role else {
            if let Some(old) = current {
                self.vacate(id, old);
                tracing::info!(minister = %id, office = %old, "minister returned to the pool");
            }
            return Ok(None);
        };

        if current == Some(role) {
            return Ok(None);
        }

        let displaced = match self.appointed.get(&role).copied() {
            Some(other) if other != id => {
                self.vacate(other, role);
                Some(other)
            }
            _ => None,
        };

        match current {
            Some(old) => {
                self.appointed.remove(&old);
            }
            None => self.available.retain(|m| *m != id),
        }
        self.appointed.insert(role, id);
        if let Some(minister) = self.ministers.get_mut(&id) {
            minister.set_position(Some(role));
        }
        tracing::info!(minister = %id, office = %role, "minister appointed");
        Ok(displaced)
    }

    /// Remove a minister from the game. Irreversible.
    pub fn terminate(&mut self, id: MinisterId, reason: Departure) -> CabinetResult<Minister> {
        let minister = self
            .ministers
            .remove(&id)
            .ok_or(CabinetError::MinisterNotFound(id))?;
        match minister.position() {
            Some(role) => {
                self.appointed.remove(&role);
            }
            None => self.available.retain(|m| *m != id),
        }
        tracing::info!(minister = %id, name = %minister.name, %reason, "minister left the cabinet");
        Ok(minister)
    }

    /// Clear and return every just-removed flag, sorted by ID.
    pub fn take_just_removed(&mut self) -> Vec<MinisterId> {
        let mut ids: Vec<MinisterId> = self
            .ministers
            .values_mut()
            .filter(|m| m.just_removed())
            .map(|m| {
                m.set_just_removed(false);
                m.id
            })
            .collect();
        ids.sort();
        ids
    }

    fn vacate(&mut self, id: MinisterId, role: Ministry) {
        self.appointed.remove(&role);
        self.available.push(id);
        if let Some(minister) = self.ministers.get_mut(&id) {
            minister.set_position(None);
            minister.set_just_removed(true);
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Get a reference to a minister by ID.
    pub fn get(&self, id: MinisterId) -> Option<&Minister> {
        self.ministers.get(&id)
    }

    /// Get a mutable reference to a minister by ID.
    pub fn get_mut(&mut self, id: MinisterId) -> Option<&mut Minister> {
        self.ministers.get_mut(&id)
    }

    /// Like [`Cabinet::get`], but a missing minister is an error.
    pub fn minister(&self, id: MinisterId) -> CabinetResult<&Minister> {
        self.get(id).ok_or(CabinetError::MinisterNotFound(id))
    }

    /// Like [`Cabinet::get_mut`], but a missing minister is an error.
    pub fn minister_mut(&mut self, id: MinisterId) -> CabinetResult<&mut Minister> {
        self.get_mut(id).ok_or(CabinetError::MinisterNotFound(id))
    }

    /// Borrow two different ministers mutably at once.
    pub fn pair_mut(
        &mut self,
        a: MinisterId,
        b: MinisterId,
    ) -> CabinetResult<(&mut Minister, &mut Minister)> {
        if a == b {
            return Err(CabinetError::SameMinister(a));
        }
        match self.ministers.get_disjoint_mut([&a, &b]) {
            [Some(first), Some(second)] => Ok((first, second)),
            [None, _] => Err(CabinetError::MinisterNotFound(a)),
            [_, None] => Err(CabinetError::MinisterNotFound(b)),
        }
    }

    /// Find a minister by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Minister> {
        let lower = name.trim().to_lowercase();
        self.ministers
            .values()
            .find(|m| m.name.to_lowercase() == lower)
    }

    /// Who holds `role`, if anyone.
    pub fn occupant(&self, role: Ministry) -> Option<MinisterId> {
        self.appointed.get(&role).copied()
    }

    /// The current prosecutor, who can catch thieves.
    pub fn prosecutor(&self) -> Option<MinisterId> {
        self.occupant(Ministry::Prosecution)
    }

    /// Ministers waiting in the pool, in the order they joined it.
    pub fn available(&self) -> &[MinisterId] {
        &self.available
    }

    /// Filled offices in ministry order.
    pub fn appointed(&self) -> impl Iterator<Item = (Ministry, MinisterId)> + '_ {
        self.appointed.iter().map(|(role, id)| (*role, *id))
    }

    /// All ministers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Minister> {
        self.ministers.values()
    }

    /// All ministers, mutably, in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Minister> {
        self.ministers.values_mut()
    }

    /// Number of living ministers.
    pub fn len(&self) -> usize {
        self.ministers.len()
    }

    /// Returns true if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.ministers.is_empty()
    }

    /// Total money held by every minister (savings plus stolen funds).
    pub fn total_wealth(&self) -> i64 {
        self.ministers.values().map(|m| m.ledger.liquid()).sum()
    }

    /// Insert a minister that already knows its office. Used when restoring
    /// snapshots.
    pub(crate) fn restore(&mut self, minister: Minister) -> CabinetResult<MinisterId> {
        let id = minister.id;
        if self.ministers.contains_key(&id) {
            return Err(CabinetError::DuplicateMinister(id));
        }
        match minister.position() {
            Some(role) => {
                if self.appointed.contains_key(&role) {
                    return Err(CabinetError::PositionTaken(role));
                }
                self.appointed.insert(role, id);
            }
            None => self.available.push(id),
        }
        self.ministers.insert(id, minister);
        Ok(id)
    }
}
