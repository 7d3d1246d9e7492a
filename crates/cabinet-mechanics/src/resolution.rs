//! Thresholds for a single die and how a face is read against them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A single-die check: `sides`, the lowest success and the highest
/// critical failure.
///
/// Faces between the two thresholds are plain failures; that band is what a
/// corrupt minister aims for when sabotaging a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Number of faces on the die.
    pub sides: i32,
    /// Faces at or above this succeed.
    pub min_success: i32,
    /// Faces at or below this are critical failures. Zero disables them.
    pub max_crit_fail: i32,
}

impl Check {
    /// Build a check, rejecting thresholds that leave no room for a result.
    /// At least one face must be a plain failure.
    pub fn new(sides: i32, min_success: i32, max_crit_fail: i32) -> MechResult<Self> {
        if sides < 1 {
            return Err(MechError::InvalidCheck(format!(
                "die needs at least one side, got {sides}"
            )));
        }
        if max_crit_fail < 0 || max_crit_fail >= min_success {
            return Err(MechError::InvalidCheck(format!(
                "critical failure ceiling {max_crit_fail} must sit below success floor {min_success}"
            )));
        }
        if min_success - max_crit_fail < 2 {
            return Err(MechError::InvalidCheck(format!(
                "no plain failure between {max_crit_fail} and {min_success}"
            )));
        }
        Ok(Self {
            sides,
            min_success,
            max_crit_fail,
        })
    }

    /// A six-sided check.
    pub fn d6(min_success: i32, max_crit_fail: i32) -> MechResult<Self> {
        Self::new(6, min_success, max_crit_fail)
    }

    /// Read a face.
    pub fn outcome(&self, value: i32) -> Outcome {
        if value >= self.min_success {
            Outcome::Success
        } else if value <= self.max_crit_fail {
            Outcome::CriticalFailure
        } else {
            Outcome::Failure
        }
    }

    /// Faces that fail without being critical, as an inclusive range.
    pub fn near_miss_band(&self) -> (i32, i32) {
        (self.max_crit_fail + 1, self.min_success - 1)
    }
}

/// How a single face reads against a [`Check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// At or above the success floor.
    Success,
    /// Between the thresholds.
    Failure,
    /// At or below the critical failure ceiling.
    CriticalFailure,
}

impl Outcome {
    /// Returns true for [`Outcome::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}
