//! Ministers: hidden truth, what observers believe, and the money trail.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{Ledger, LedgerSummary};
use crate::ministry::{Attribute, Ministry};

/// Unique identifier for a minister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinisterId(pub Uuid);

impl MinisterId {
    /// Generate a new random minister ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MinisterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MinisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Social standing, derived from background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusTier {
    /// Commoners.
    Low,
    /// Professionals and officers.
    Middle,
    /// Nobility and high clergy.
    High,
}

impl StatusTier {
    /// Savings a freshly recruited minister of this tier brings along.
    pub fn starting_savings(self) -> i64 {
        match self {
            Self::Low => 25,
            Self::Middle => 100,
            Self::High => 200,
        }
    }
}

/// Where a minister comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Landed nobility.
    Aristocrat,
    /// Ordained clergy.
    Clergy,
    /// Career army officer.
    Officer,
    /// Trader or shipowner.
    Merchant,
    /// Lawyer or magistrate.
    Jurist,
    /// University man.
    Scholar,
    /// Risen from the street.
    Commoner,
}

impl Background {
    /// Every background, in declaration order.
    pub const ALL: [Background; 7] = [
        Self::Aristocrat,
        Self::Clergy,
        Self::Officer,
        Self::Merchant,
        Self::Jurist,
        Self::Scholar,
        Self::Commoner,
    ];

    /// Stable lowercase key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Aristocrat => "aristocrat",
            Self::Clergy => "clergy",
            Self::Officer => "officer",
            Self::Merchant => "merchant",
            Self::Jurist => "jurist",
            Self::Scholar => "scholar",
            Self::Commoner => "commoner",
        }
    }

    /// Parse a background from its key (case-insensitive).
    pub fn from_key(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|b| b.key() == lower)
    }

    /// Social tier this background belongs to.
    pub fn status(self) -> StatusTier {
        match self {
            Self::Aristocrat | Self::Clergy => StatusTier::High,
            Self::Officer | Self::Merchant | Self::Jurist | Self::Scholar => StatusTier::Middle,
            Self::Commoner => StatusTier::Low,
        }
    }

    /// The ministry this background prepares someone for.
    pub fn affinity(self) -> Ministry {
        match self {
            Self::Aristocrat => Ministry::Diplomacy,
            Self::Clergy => Ministry::Religion,
            Self::Officer => Ministry::Military,
            Self::Merchant => Ministry::Commerce,
            Self::Jurist => Ministry::Prosecution,
            Self::Scholar => Ministry::Construction,
            Self::Commoner => Ministry::Agriculture,
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The truth about a minister. Generated once and never shown directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenTraits {
    general_skill: u8,
    specific_skills: BTreeMap<Ministry, u8>,
    corruption: u8,
}

impl HiddenTraits {
    /// Build hidden traits, clamping every value into its legal range.
    ///
    /// General skill is 1-3, corruption 1-6, and each specific skill is
    /// capped so that general + specific never exceeds 6.
    pub fn new(general_skill: u8, specific: &[(Ministry, u8)], corruption: u8) -> Self {
        let general_skill = general_skill.clamp(1, 3);
        let cap = 6 - general_skill;
        let specific_skills = Ministry::ALL
            .into_iter()
            .map(|m| {
                let value = specific
                    .iter()
                    .find(|(k, _)| *k == m)
                    .map(|(_, v)| *v)
                    .unwrap_or(0);
                (m, value.min(cap))
            })
            .collect();
        Self {
            general_skill,
            specific_skills,
            corruption: corruption.clamp(1, 6),
        }
    }

    /// General competence (1-3).
    pub fn general_skill(&self) -> u8 {
        self.general_skill
    }

    /// Ministry-specific competence on top of the general skill.
    pub fn specific_skill(&self, ministry: Ministry) -> u8 {
        self.specific_skills.get(&ministry).copied().unwrap_or(0)
    }

    /// General plus specific skill for one ministry (1-6).
    pub fn total_skill(&self, ministry: Ministry) -> u8 {
        self.general_skill + self.specific_skill(ministry)
    }

    /// How crooked this minister is (1-6).
    pub fn corruption(&self) -> u8 {
        self.corruption
    }

    /// Minimum d6 needed before a theft is even considered: `10 - corruption`.
    pub fn corruption_threshold(&self) -> u8 {
        10 - self.corruption
    }

    /// The true value of an attribute on the 1-6 scale.
    pub fn true_value(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Skill(m) => self.total_skill(m),
            Attribute::Loyalty => self.corruption,
        }
    }
}

/// An observer's belief about one attribute, with the phrase used to describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apparent {
    /// Believed value (1-6).
    pub value: u8,
    /// Textual bucket shown to the player.
    pub description: String,
}

/// Everything observers currently believe about a minister.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApparentState {
    /// Believed competence per ministry. Missing entries are unknown.
    pub skills: BTreeMap<Ministry, Apparent>,
    /// Believed corruption, if anyone has an opinion yet.
    pub corruption: Option<Apparent>,
}

impl ApparentState {
    /// Current belief about an attribute, or `None` if unknown.
    pub fn get(&self, attribute: Attribute) -> Option<&Apparent> {
        match attribute {
            Attribute::Skill(m) => self.skills.get(&m),
            Attribute::Loyalty => self.corruption.as_ref(),
        }
    }

    /// Description of an attribute, `"unknown"` if nothing is believed yet.
    pub fn describe(&self, attribute: Attribute) -> &str {
        self.get(attribute)
            .map(|a| a.description.as_str())
            .unwrap_or("unknown")
    }
}

/// Where a living minister currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Assignment {
    /// In the pool, waiting for an office.
    Available,
    /// Holding an office.
    Appointed(Ministry),
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Appointed(m) => write!(f, "{}", m.title()),
        }
    }
}

/// A minister: a character whose skill and honesty are only partly known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minister {
    /// Unique identifier.
    pub id: MinisterId,
    /// Display name.
    pub name: String,
    /// Social background.
    pub background: Background,
    hidden: HiddenTraits,
    apparent: ApparentState,
    /// Money and evidence.
    pub ledger: Ledger,
    position: Option<Ministry>,
    just_removed: bool,
    /// Set while a multi-die roll is being resolved so the batch records at
    /// most one theft.
    pub stolen_already: bool,
}

impl Minister {
    /// Create an unassigned minister with nothing revealed yet.
    pub fn new(name: impl Into<String>, background: Background, hidden: HiddenTraits) -> Self {
        Self {
            id: MinisterId::new(),
            name: name.into(),
            background,
            hidden,
            apparent: ApparentState::default(),
            ledger: Ledger::with_savings(background.status().starting_savings()),
            position: None,
            just_removed: false,
            stolen_already: false,
        }
    }

    /// Social tier derived from the background.
    pub fn status(&self) -> StatusTier {
        self.background.status()
    }

    /// The hidden truth.
    pub fn hidden(&self) -> &HiddenTraits {
        &self.hidden
    }

    /// What observers currently believe.
    pub fn apparent_state(&self) -> &ApparentState {
        &self.apparent
    }

    /// Believed value of one attribute, `None` while unknown.
    pub fn apparent(&self, attribute: Attribute) -> Option<u8> {
        self.apparent.get(attribute).map(|a| a.value)
    }

    /// Commit a new belief. Returns false (and keeps the old description)
    /// if the value is unchanged.
    pub fn set_apparent(&mut self, attribute: Attribute, value: u8, description: String) -> bool {
        let value = value.clamp(1, 6);
        if self.apparent(attribute) == Some(value) {
            return false;
        }
        let entry = Apparent { value, description };
        match attribute {
            Attribute::Skill(m) => {
                self.apparent.skills.insert(m, entry);
            }
            Attribute::Loyalty => self.apparent.corruption = Some(entry),
        }
        true
    }

    /// Current office or pool membership.
    pub fn assignment(&self) -> Assignment {
        match self.position {
            Some(m) => Assignment::Appointed(m),
            None => Assignment::Available,
        }
    }

    /// Current office, if any.
    pub fn position(&self) -> Option<Ministry> {
        self.position
    }

    /// True if the minister was moved out of office since the last turn hook.
    pub fn just_removed(&self) -> bool {
        self.just_removed
    }

    /// Headline ledger numbers.
    pub fn ledger_summary(&self) -> LedgerSummary {
        self.ledger.summary()
    }

    /// Skill total that governs this minister's rolls: the ministry they
    /// hold, or the general skill alone when unassigned.
    pub fn relevant_skill(&self) -> u8 {
        match self.position {
            Some(m) => self.hidden.total_skill(m),
            None => self.hidden.general_skill(),
        }
    }

    pub(crate) fn set_position(&mut self, position: Option<Ministry>) {
        self.position = position;
    }

    pub(crate) fn set_just_removed(&mut self, flag: bool) {
        self.just_removed = flag;
    }

    pub(crate) fn from_parts(parts: MinisterParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            background: parts.background,
            hidden: parts.hidden,
            apparent: parts.apparent,
            ledger: parts.ledger,
            position: parts.position,
            just_removed: parts.just_removed,
            stolen_already: false,
        }
    }
}

/// Raw fields used when rebuilding a minister from a record.
pub(crate) struct MinisterParts {
    pub id: MinisterId,
    pub name: String,
    pub background: Background,
    pub hidden: HiddenTraits,
    pub apparent: ApparentState,
    pub ledger: Ledger,
    pub position: Option<Ministry>,
    pub just_removed: bool,
}
