//! Corruption checks, theft, detection and bribery.

use std::fmt;

use cabinet_core::{Cabinet, Minister, MinisterId, Ministry, TheftRecord, pay};
use serde::{Deserialize, Serialize};

use crate::config::ScenarioOverride;
use crate::context::Court;
use crate::error::MechResult;
use crate::notice::AUDIO_ALARM;
use crate::roll::base_roll;

/// Money at risk in an action, and the budget it comes out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// How much a corrupt minister would pocket.
    pub amount: i64,
    /// The ministry the money belongs to.
    pub ministry: Ministry,
}

impl Stake {
    /// Money at risk from `ministry`'s budget.
    pub fn new(amount: i64, ministry: Ministry) -> Self {
        Self { amount, ministry }
    }
}

/// What happened to a theft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TheftOutcome {
    /// Nothing worth tracking was taken.
    Untracked,
    /// The money is gone and nobody noticed.
    Undetected,
    /// The prosecutor caught it and filed evidence.
    Caught,
    /// The prosecutor caught it and was paid to look away.
    Bribed {
        /// What the thief paid.
        bribe: i64,
    },
}

impl fmt::Display for TheftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untracked => write!(f, "untracked"),
            Self::Undetected => write!(f, "undetected"),
            Self::Caught => write!(f, "caught"),
            Self::Bribed { bribe } => write!(f, "bribed ({bribe})"),
        }
    }
}

/// The prosecutor's reaction to a theft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detection {
    /// No one was in a position to notice.
    Unobserved,
    /// The prosecutor looked and missed it.
    Missed,
    /// Caught, evidence filed.
    Caught,
    /// Caught, then bought off.
    Bribed {
        /// What the thief paid.
        bribe: i64,
    },
}

fn is_corrupt(minister: &Minister, is_prosecutor: bool, court: &mut Court<'_>) -> bool {
    for scenario in ScenarioOverride::PRIORITY {
        if !court.config.has_override(scenario) {
            continue;
        }
        match scenario {
            ScenarioOverride::AlwaysCorrupt => return true,
            ScenarioOverride::NeverCorrupt => return false,
            ScenarioOverride::InfallibleDetector if is_prosecutor => return false,
            ScenarioOverride::InfallibleDetector => {}
        }
    }
    let threshold = i32::from(minister.hidden().corruption_threshold());
    let temptation = court.dice.d6();
    if temptation < threshold {
        return false;
    }
    court.dice.d6() > i32::from(court.config.fear)
}

/// Does `id` act corruptly this time?
///
/// Scenario switches win. Otherwise a d6 must reach the minister's corruption
/// threshold and a second d6 must beat the current fear level.
pub fn check_corruption(
    cabinet: &Cabinet,
    id: MinisterId,
    court: &mut Court<'_>,
) -> MechResult<bool> {
    let minister = cabinet.minister(id)?;
    let corrupt = is_corrupt(minister, cabinet.prosecutor() == Some(id), court);
    tracing::debug!(minister = %id, corrupt, "corruption check");
    Ok(corrupt)
}

fn with_advantage(minister: &Minister, is_prosecutor: bool, court: &mut Court<'_>) -> bool {
    is_corrupt(minister, is_prosecutor, court) || is_corrupt(minister, is_prosecutor, court)
}

/// Both parties must agree to a corrupt deal. Each gets two tries, the
/// briber first.
pub fn conspiracy_check(
    cabinet: &Cabinet,
    briber: MinisterId,
    official: MinisterId,
    court: &mut Court<'_>,
) -> MechResult<bool> {
    let prosecutor = cabinet.prosecutor();
    let briber_willing = with_advantage(
        cabinet.minister(briber)?,
        prosecutor == Some(briber),
        court,
    );
    if !briber_willing {
        return Ok(false);
    }
    Ok(with_advantage(
        cabinet.minister(official)?,
        prosecutor == Some(official),
        court,
    ))
}

/// Move `amount` from one minister to another. See [`cabinet_core::pay`].
pub fn transfer(
    cabinet: &mut Cabinet,
    payer: MinisterId,
    payee: MinisterId,
    amount: i64,
) -> MechResult<()> {
    let (from, to) = cabinet.pair_mut(payer, payee)?;
    pay(&mut from.ledger, &mut to.ledger, amount);
    tracing::info!(payer = %payer, payee = %payee, amount, "money changed hands");
    Ok(())
}

/// Try to buy off `official`. Returns the price paid, or `None` if either
/// side refused or the briber could not cover it.
pub(crate) fn offer_bribe(
    cabinet: &mut Cabinet,
    briber: MinisterId,
    official: MinisterId,
    price: i64,
    court: &mut Court<'_>,
) -> MechResult<Option<i64>> {
    if briber == official {
        return Ok(None);
    }
    if !conspiracy_check(cabinet, briber, official, court)? {
        return Ok(None);
    }
    if !cabinet.minister(briber)?.ledger.can_afford(price) {
        tracing::debug!(briber = %briber, price, "bribe agreed but unaffordable");
        return Ok(None);
    }
    transfer(cabinet, briber, official, price)?;
    Ok(Some(price))
}

/// Does the prosecutor notice `thief` taking `stake`?
///
/// Both sides roll a skill-modified d6; the prosecutor catches the thief
/// when their roll meets the thief's. A caught thief may buy silence with
/// half the take (never less than the configured minimum). Otherwise the
/// evidence is filed.
pub fn attempt_detection(
    cabinet: &mut Cabinet,
    thief: MinisterId,
    stake: Stake,
    court: &mut Court<'_>,
) -> MechResult<Detection> {
    let Some(prosecutor) = cabinet.prosecutor() else {
        return Ok(Detection::Unobserved);
    };
    let difficulty = base_roll(6, cabinet.minister(thief)?, court.dice);
    let result = base_roll(6, cabinet.minister(prosecutor)?, court.dice);
    if prosecutor == thief {
        return Ok(Detection::Unobserved);
    }

    let infallible = court.config.has_override(ScenarioOverride::InfallibleDetector);
    if result < difficulty && !infallible {
        tracing::debug!(thief = %thief, difficulty, result, "theft missed");
        return Ok(Detection::Missed);
    }

    let price = (stake.amount / 2).max(court.config.min_bribe);
    if let Some(bribe) = offer_bribe(cabinet, thief, prosecutor, price, court)? {
        tracing::info!(thief = %thief, prosecutor = %prosecutor, bribe, "prosecutor bribed");
        return Ok(Detection::Bribed { bribe });
    }

    let thief_minister = cabinet.minister_mut(thief)?;
    thief_minister.ledger.file_evidence();
    let message = format!(
        "{} was caught embezzling {} from the Ministry of {}.",
        thief_minister.name, stake.amount, stake.ministry
    );
    tracing::info!(thief = %thief, amount = stake.amount, "theft caught");
    court.notify(&message, Some(AUDIO_ALARM));
    Ok(Detection::Caught)
}

/// Pocket `stake` and see whether anyone notices.
///
/// Non-positive amounts are not recorded. With `suppress_detection` the theft
/// goes straight onto the undetected list.
pub fn steal(
    cabinet: &mut Cabinet,
    thief: MinisterId,
    stake: Stake,
    suppress_detection: bool,
    court: &mut Court<'_>,
) -> MechResult<TheftOutcome> {
    if stake.amount <= 0 {
        cabinet.minister(thief)?;
        return Ok(TheftOutcome::Untracked);
    }
    cabinet.minister_mut(thief)?.ledger.record_theft(stake.amount);
    tracing::debug!(thief = %thief, amount = stake.amount, ministry = %stake.ministry, "theft");

    let detection = if suppress_detection {
        Detection::Unobserved
    } else {
        attempt_detection(cabinet, thief, stake, court)?
    };
    let outcome = match detection {
        Detection::Unobserved | Detection::Missed => {
            cabinet
                .minister_mut(thief)?
                .ledger
                .push_undetected(TheftRecord {
                    amount: stake.amount,
                    ministry: stake.ministry,
                });
            TheftOutcome::Undetected
        }
        Detection::Caught => TheftOutcome::Caught,
        Detection::Bribed { bribe } => TheftOutcome::Bribed { bribe },
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::ScriptedDice;
    use crate::notice::NoticeLog;
    use cabinet_core::{Background, HiddenTraits};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn recruit(cabinet: &mut Cabinet, name: &str, corruption: u8, savings: i64) -> MinisterId {
        let mut m = Minister::new(name, Background::Merchant, HiddenTraits::new(3, &[], corruption));
        m.ledger.personal_savings = savings;
        cabinet.enlist(m).unwrap()
    }

    fn stake(amount: i64) -> Stake {
        Stake::new(amount, Ministry::Commerce)
    }

    #[test]
    fn overrides_win_in_order() {
        let mut cabinet = Cabinet::new();
        let id = recruit(&mut cabinet, "Ada", 1, 0);
        let config = EngineConfig::default()
            .with_override(ScenarioOverride::AlwaysCorrupt)
            .with_override(ScenarioOverride::NeverCorrupt);
        let mut dice = ScriptedDice::default();
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        assert!(check_corruption(&cabinet, id, &mut court).unwrap());
        assert_eq!(dice.drawn(), 0);
    }

    #[test]
    fn infallible_prosecutor_is_honest() {
        let mut cabinet = Cabinet::new();
        let id = recruit(&mut cabinet, "Ada", 6, 0);
        let other = recruit(&mut cabinet, "Bo", 6, 0);
        cabinet.appoint(id, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::InfallibleDetector);
        let mut dice = ScriptedDice::new([6, 6, 6, 6]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        assert!(!check_corruption(&cabinet, id, &mut court).unwrap());
        assert!(check_corruption(&cabinet, other, &mut court).unwrap());
    }

    #[test]
    fn threshold_then_fear() {
        let mut cabinet = Cabinet::new();
        let id = recruit(&mut cabinet, "Ada", 5, 0);
        let config = EngineConfig::default().with_fear(3);
        // threshold 5: 4 fails outright, 5 then 3 is stopped by fear, 6 then 4 acts.
        let mut dice = ScriptedDice::new([4, 5, 3, 6, 4]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        assert!(!check_corruption(&cabinet, id, &mut court).unwrap());
        assert!(!check_corruption(&cabinet, id, &mut court).unwrap());
        assert!(check_corruption(&cabinet, id, &mut court).unwrap());
    }

    #[test]
    fn caught_when_conspiracy_fails() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 3, 100);
        let prosecutor = recruit(&mut cabinet, "Judge", 3, 0);
        cabinet.appoint(prosecutor, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default();
        // thief rolls 3, prosecutor rolls 5; every later draw falls back to 1.
        let mut dice = ScriptedDice::new([3, 0, 5, 0]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, thief, stake(40), false, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Caught);
        let ledger = &cabinet.minister(thief).unwrap().ledger;
        assert_eq!(ledger.corruption_evidence, 1);
        assert_eq!(ledger.stolen_money, 40);
        assert!(ledger.undetected.is_empty());
        assert_eq!(log.len(), 1);
        assert_eq!(log.notices()[0].audio.as_deref(), Some(AUDIO_ALARM));
    }

    #[test]
    fn missed_theft_is_undetected() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 3, 100);
        let prosecutor = recruit(&mut cabinet, "Judge", 3, 0);
        cabinet.appoint(prosecutor, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::new([5, 0, 2, 0]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, thief, stake(40), false, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Undetected);
        let ledger = &cabinet.minister(thief).unwrap().ledger;
        assert_eq!(ledger.corruption_evidence, 0);
        assert_eq!(
            ledger.undetected,
            vec![TheftRecord {
                amount: 40,
                ministry: Ministry::Commerce
            }]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn bribe_pays_half_the_take() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 6, 100);
        let prosecutor = recruit(&mut cabinet, "Judge", 6, 0);
        cabinet.appoint(prosecutor, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default();
        // detection 3 vs 5, then thief and prosecutor each pass on the first try
        let mut dice = ScriptedDice::new([3, 0, 5, 0, 6, 6, 6, 6]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, thief, stake(60), false, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Bribed { bribe: 30 });
        assert_eq!(cabinet.minister(thief).unwrap().ledger.stolen_money, 30);
        assert_eq!(cabinet.minister(thief).unwrap().ledger.corruption_evidence, 0);
        assert_eq!(cabinet.minister(prosecutor).unwrap().ledger.stolen_money, 30);
        assert!(log.is_empty());
    }

    #[test]
    fn small_theft_pays_minimum_bribe() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 6, 100);
        let prosecutor = recruit(&mut cabinet, "Judge", 6, 0);
        cabinet.appoint(prosecutor, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::new([3, 0, 5, 0, 6, 6, 6, 6]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, thief, stake(4), false, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Bribed { bribe: 10 });
        let ledger = &cabinet.minister(thief).unwrap().ledger;
        assert_eq!(ledger.stolen_money, 0);
        assert_eq!(ledger.personal_savings, 94);
    }

    #[test]
    fn no_prosecutor_means_undetected() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 3, 0);
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::default();
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, thief, stake(12), false, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Undetected);
        assert_eq!(cabinet.minister(thief).unwrap().ledger.undetected.len(), 1);
        assert_eq!(dice.drawn(), 0);
    }

    #[test]
    fn prosecutor_cannot_catch_themself() {
        let mut cabinet = Cabinet::new();
        let judge = recruit(&mut cabinet, "Judge", 3, 0);
        cabinet.appoint(judge, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::InfallibleDetector);
        let mut dice = ScriptedDice::new([1, 0, 6, 0]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, judge, stake(12), false, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Undetected);
        assert_eq!(dice.drawn(), 4);
    }

    #[test]
    fn zero_theft_untracked() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 3, 0);
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::default();
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        for amount in [0, -5] {
            let outcome = steal(&mut cabinet, thief, stake(amount), false, &mut court).unwrap();
            assert_eq!(outcome, TheftOutcome::Untracked);
        }
        let ledger = &cabinet.minister(thief).unwrap().ledger;
        assert_eq!(ledger.stolen_money, 0);
        assert!(ledger.undetected.is_empty());
    }

    #[test]
    fn suppressed_theft_skips_detection() {
        let mut cabinet = Cabinet::new();
        let thief = recruit(&mut cabinet, "Thief", 3, 0);
        let judge = recruit(&mut cabinet, "Judge", 3, 0);
        cabinet.appoint(judge, Some(Ministry::Prosecution)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::InfallibleDetector);
        let mut dice = ScriptedDice::default();
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let outcome = steal(&mut cabinet, thief, stake(8), true, &mut court).unwrap();
        assert_eq!(outcome, TheftOutcome::Undetected);
        assert_eq!(dice.drawn(), 0);
    }

    proptest! {
        #[test]
        fn money_is_conserved(seed in any::<u64>(), amounts in proptest::collection::vec(1i64..200, 1..20)) {
            let mut cabinet = Cabinet::new();
            let thief = recruit(&mut cabinet, "Thief", 6, 50);
            let judge = recruit(&mut cabinet, "Judge", 5, 50);
            cabinet.appoint(judge, Some(Ministry::Prosecution)).unwrap();
            let config = EngineConfig::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut log = NoticeLog::default();
            let mut court = Court::new(&config, &mut rng, &mut log);
            let mut expected = cabinet.total_wealth();
            for amount in amounts {
                steal(&mut cabinet, thief, stake(amount), false, &mut court).unwrap();
                expected += amount;
                prop_assert_eq!(cabinet.total_wealth(), expected);
                for m in cabinet.iter() {
                    prop_assert!(m.ledger.stolen_money >= 0);
                    prop_assert!(m.ledger.personal_savings >= 0);
                }
            }
        }
    }
}
