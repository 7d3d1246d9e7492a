//! Formal investigations of one minister by the prosecutor.

use std::fmt;

use cabinet_core::{Apparent, Attribute, Cabinet, Inquiry, MinisterId, Ministry, TheftRecord};
use serde::{Deserialize, Serialize};

use crate::context::Court;
use crate::corruption::offer_bribe;
use crate::error::MechResult;
use crate::notice::AUDIO_GAVEL;
use crate::rumor::reveal;

/// Something an investigation turned up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finding {
    /// A belief about the target changed.
    Revealed {
        /// What was looked at.
        attribute: Attribute,
        /// The belief before, if there was one.
        previous: Option<Apparent>,
        /// The belief now.
        current: Apparent,
    },
    /// An unnoticed theft was proven.
    TheftUncovered(TheftRecord),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revealed {
                attribute,
                previous,
                current,
            } => {
                write!(f, "{attribute}: {} ({})", current.description, current.value)?;
                match previous {
                    Some(before) => write!(f, ", formerly {}", before.description),
                    None => write!(f, ", formerly unknown"),
                }
            }
            Self::TheftUncovered(record) => write!(
                f,
                "evidence of {} embezzled from the Ministry of {}",
                record.amount, record.ministry
            ),
        }
    }
}

/// Everything learned in one investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigationReport {
    /// Who was investigated.
    pub target: MinisterId,
    /// The target's name, for display.
    pub target_name: String,
    /// Who ran it, if anyone.
    pub investigator: Option<MinisterId>,
    /// Findings in inquiry order.
    pub findings: Vec<Finding>,
}

impl InvestigationReport {
    /// Returns true if nothing was learned.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// The finding for `attribute`, if its belief changed.
    pub fn revealed(&self, attribute: Attribute) -> Option<&Finding> {
        self.findings
            .iter()
            .find(|f| matches!(f, Finding::Revealed { attribute: a, .. } if *a == attribute))
    }

    /// Thefts proven by this investigation.
    pub fn uncovered(&self) -> impl Iterator<Item = &TheftRecord> {
        self.findings.iter().filter_map(|f| match f {
            Finding::TheftUncovered(record) => Some(record),
            Finding::Revealed { .. } => None,
        })
    }
}

impl fmt::Display for InvestigationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.investigator.is_none() {
            return write!(f, "No one is available to investigate {}.", self.target_name);
        }
        if self.findings.is_empty() {
            return write!(f, "The investigation of {} found nothing new.", self.target_name);
        }
        write!(f, "The investigation of {} found:", self.target_name)?;
        for finding in &self.findings {
            write!(f, "\n  - {finding}")?;
        }
        Ok(())
    }
}

/// Target number for one line of inquiry: easiest for the target's own
/// office, hardest for the offices they do not hold.
fn difficulty(inquiry: Inquiry, office: Option<Ministry>) -> i32 {
    match inquiry {
        Inquiry::Skill(m) if office == Some(m) => 4,
        Inquiry::Loyalty | Inquiry::Evidence => 5,
        Inquiry::Skill(_) => 6,
    }
}

/// Have `investigator` dig into `target`.
///
/// Each line of inquiry needs a d6 against its difficulty. Attribute lines
/// run a detector reveal; the evidence line picks one unnoticed theft and
/// files it, unless the target buys the investigator off. Without an
/// investigator nothing happens and the report is empty.
pub fn run_investigation(
    cabinet: &mut Cabinet,
    investigator: Option<MinisterId>,
    target: MinisterId,
    court: &mut Court<'_>,
) -> MechResult<InvestigationReport> {
    let target_minister = cabinet.minister(target)?;
    let mut report = InvestigationReport {
        target,
        target_name: target_minister.name.clone(),
        investigator,
        findings: Vec::new(),
    };
    let office = target_minister.position();
    let Some(investigator) = investigator else {
        return Ok(report);
    };
    cabinet.minister(investigator)?;

    for inquiry in Inquiry::all() {
        let roll = court.dice.d6();
        if roll < difficulty(inquiry, office) {
            continue;
        }
        match inquiry.attribute() {
            Some(attribute) => {
                let previous = cabinet
                    .minister(target)?
                    .apparent_state()
                    .get(attribute)
                    .cloned();
                reveal(cabinet, target, attribute, Some(investigator), court)?;
                let Some(current) = cabinet
                    .minister(target)?
                    .apparent_state()
                    .get(attribute)
                    .cloned()
                else {
                    continue;
                };
                if previous.as_ref().map(|p| p.value) != Some(current.value) {
                    report.findings.push(Finding::Revealed {
                        attribute,
                        previous,
                        current,
                    });
                }
            }
            None => {
                if let Some(record) = uncover_theft(cabinet, investigator, target, court)? {
                    report.findings.push(Finding::TheftUncovered(record));
                }
            }
        }
    }

    tracing::info!(
        target = %target,
        investigator = %investigator,
        findings = report.findings.len(),
        "investigation finished"
    );
    court.notify(&report.to_string(), Some(AUDIO_GAVEL));
    Ok(report)
}

fn uncover_theft(
    cabinet: &mut Cabinet,
    investigator: MinisterId,
    target: MinisterId,
    court: &mut Court<'_>,
) -> MechResult<Option<TheftRecord>> {
    let pending = cabinet.minister(target)?.ledger.undetected.len();
    if pending == 0 {
        return Ok(None);
    }
    let last = i32::try_from(pending - 1).unwrap_or(i32::MAX);
    let index = usize::try_from(court.dice.roll(0, last)).unwrap_or(0);
    let Some(record) = cabinet.minister_mut(target)?.ledger.take_undetected(index) else {
        return Ok(None);
    };

    let price = (record.amount / 2).max(court.config.min_bribe);
    if offer_bribe(cabinet, target, investigator, price, court)?.is_some() {
        tracing::info!(target = %target, amount = record.amount, "evidence buried");
        return Ok(None);
    }
    cabinet.minister_mut(target)?.ledger.file_evidence();
    Ok(Some(record))
}
