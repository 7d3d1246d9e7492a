//! Role categories ("ministries") and the attributes observers can learn about.
//!
//! Every ministry gates one skill dimension. A minister's effective skill in
//! a ministry is their general skill plus the ministry-specific skill.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in the cabinet. Each one gates a single skill dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ministry {
    /// Farming, granaries and land management.
    Agriculture,
    /// Trade, tariffs and the merchant fleet.
    Commerce,
    /// Public works and fortifications.
    Construction,
    /// Treaties and foreign courts.
    Diplomacy,
    /// The army and its officers.
    Military,
    /// The courts. Its occupant is the prosecutor who hunts for theft.
    Prosecution,
    /// The church and its lands.
    Religion,
}

impl Ministry {
    /// Every ministry, in declaration order.
    pub const ALL: [Ministry; 7] = [
        Self::Agriculture,
        Self::Commerce,
        Self::Construction,
        Self::Diplomacy,
        Self::Military,
        Self::Prosecution,
        Self::Religion,
    ];

    /// Stable lowercase key used in records and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Agriculture => "agriculture",
            Self::Commerce => "commerce",
            Self::Construction => "construction",
            Self::Diplomacy => "diplomacy",
            Self::Military => "military",
            Self::Prosecution => "prosecution",
            Self::Religion => "religion",
        }
    }

    /// Parse a ministry from its key (case-insensitive).
    pub fn from_key(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.key() == lower)
    }

    /// Title of the office holder.
    pub fn title(self) -> &'static str {
        match self {
            Self::Agriculture => "Minister of Agriculture",
            Self::Commerce => "Minister of Commerce",
            Self::Construction => "Minister of Works",
            Self::Diplomacy => "Foreign Minister",
            Self::Military => "Minister of War",
            Self::Prosecution => "Prosecutor General",
            Self::Religion => "Minister of Religion",
        }
    }

    /// The skill dimension this ministry gates.
    pub fn skill_name(self) -> &'static str {
        match self {
            Self::Agriculture => "farming",
            Self::Commerce => "trade",
            Self::Construction => "engineering",
            Self::Diplomacy => "negotiation",
            Self::Military => "command",
            Self::Prosecution => "investigation",
            Self::Religion => "theology",
        }
    }
}

impl fmt::Display for Ministry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Agriculture => "Agriculture",
            Self::Commerce => "Commerce",
            Self::Construction => "Construction",
            Self::Diplomacy => "Diplomacy",
            Self::Military => "Military",
            Self::Prosecution => "Prosecution",
            Self::Religion => "Religion",
        };
        write!(f, "{name}")
    }
}

/// A hidden attribute that rumors and investigations can reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Competence in one ministry (general + specific skill).
    Skill(Ministry),
    /// Honesty, backed by the hidden corruption score.
    Loyalty,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill(m) => write!(f, "{} skill", m.skill_name()),
            Self::Loyalty => write!(f, "loyalty"),
        }
    }
}

/// One line of questioning in a formal investigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inquiry {
    /// Probe competence in a ministry.
    Skill(Ministry),
    /// Probe honesty.
    Loyalty,
    /// Dig for an unreported theft.
    Evidence,
}

impl Inquiry {
    /// Every inquiry an investigation runs, in order: all ministries, then
    /// loyalty, then evidence.
    pub fn all() -> impl Iterator<Item = Inquiry> {
        Ministry::ALL
            .into_iter()
            .map(Self::Skill)
            .chain([Self::Loyalty, Self::Evidence])
    }

    /// The attribute this inquiry reveals, if any.
    pub fn attribute(self) -> Option<Attribute> {
        match self {
            Self::Skill(m) => Some(Attribute::Skill(m)),
            Self::Loyalty => Some(Attribute::Loyalty),
            Self::Evidence => None,
        }
    }
}

impl fmt::Display for Inquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill(m) => write!(f, "{m}"),
            Self::Loyalty => write!(f, "loyalty"),
            Self::Evidence => write!(f, "evidence"),
        }
    }
}
