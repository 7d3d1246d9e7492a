//! Skill-modified rolls, including the ones a corrupt minister quietly throws.

use cabinet_core::{Cabinet, Minister, MinisterId};
use serde::{Deserialize, Serialize};

use crate::context::Court;
use crate::corruption::{Stake, check_corruption, steal};
use crate::dice::Dice;
use crate::error::MechResult;
use crate::resolution::Check;

/// Modifier from a minister's relevant skill: -1 at 2 or below, +1 at 5 or above.
pub fn skill_modifier(minister: &Minister) -> i32 {
    match minister.relevant_skill() {
        0..=2 => -1,
        5.. => 1,
        _ => 0,
    }
}

/// Roll a face, then on a coin flip apply `modifier`. Clamped to the die.
fn modified_roll(sides: i32, modifier: i32, dice: &mut dyn Dice) -> i32 {
    let sides = sides.max(1);
    let face = dice.roll(1, sides);
    let value = if dice.coin() { face + modifier } else { face };
    value.clamp(1, sides)
}

/// An honest roll by `minister`.
pub fn base_roll(sides: i32, minister: &Minister, dice: &mut dyn Dice) -> i32 {
    modified_roll(sides, skill_modifier(minister), dice)
}

/// A roll with nobody behind it, as when an office stands empty.
pub fn passive_roll(sides: i32, dice: &mut dyn Dice) -> i32 {
    modified_roll(sides, -1, dice)
}

/// A face that fails the check without being a critical failure.
fn near_miss(check: &Check, dice: &mut dyn Dice) -> i32 {
    let (low, high) = check.near_miss_band();
    dice.roll(low, high).clamp(1, check.sides.max(1))
}

/// Steal once, unless this minister already stole for the current batch.
fn steal_once(
    cabinet: &mut Cabinet,
    id: MinisterId,
    stake: Stake,
    court: &mut Court<'_>,
) -> MechResult<()> {
    if cabinet.minister(id)?.stolen_already {
        return Ok(());
    }
    steal(cabinet, id, stake, false, court)?;
    Ok(())
}

fn resolve(
    cabinet: &mut Cabinet,
    id: MinisterId,
    check: &Check,
    stake: Stake,
    forced: Option<bool>,
    court: &mut Court<'_>,
) -> MechResult<i32> {
    let honest = base_roll(check.sides, cabinet.minister(id)?, court.dice);
    let corrupt = match forced {
        Some(c) => c,
        None => check_corruption(cabinet, id, court)?,
    };
    if !corrupt {
        return Ok(honest);
    }
    steal_once(cabinet, id, stake, court)?;
    let value = near_miss(check, court.dice);
    tracing::debug!(minister = %id, honest, value, "roll thrown");
    Ok(value)
}

/// A single check on behalf of `id`.
///
/// An honest minister rolls normally. A corrupt one pockets `stake` and
/// reports a face that fails without being a critical failure.
pub fn resolved_roll(
    cabinet: &mut Cabinet,
    id: MinisterId,
    check: &Check,
    stake: Stake,
    court: &mut Court<'_>,
) -> MechResult<i32> {
    resolve(cabinet, id, check, stake, None, court)
}

/// `count` dice rolled together on behalf of `id`.
///
/// Corruption is decided once for the whole batch. A corrupt minister steals
/// once, one die at random shows a near miss and the rest are plain failures,
/// so the batch as a whole cannot succeed.
pub fn resolved_roll_batch(
    cabinet: &mut Cabinet,
    id: MinisterId,
    check: &Check,
    stake: Stake,
    count: usize,
    court: &mut Court<'_>,
) -> MechResult<Vec<i32>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if !check_corruption(cabinet, id, court)? {
        let minister = cabinet.minister(id)?;
        return Ok((0..count)
            .map(|_| base_roll(check.sides, minister, court.dice))
            .collect());
    }

    steal_once(cabinet, id, stake, court)?;
    cabinet.minister_mut(id)?.stolen_already = true;

    let last = i32::try_from(count - 1).unwrap_or(i32::MAX);
    let chosen = usize::try_from(court.dice.roll(0, last)).unwrap_or(0);
    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        let value = if i == chosen {
            resolve(cabinet, id, check, stake, Some(true), court)?
        } else {
            court
                .dice
                .roll(1, check.min_success - 1)
                .clamp(1, check.sides.max(1))
        };
        values.push(value);
    }

    cabinet.minister_mut(id)?.stolen_already = false;
    Ok(values)
}

/// Modifiers and dice count for a contested roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    /// Added to the minister's die when comparing.
    pub own_modifier: i32,
    /// Added to the opponent's die when comparing.
    pub enemy_modifier: i32,
    /// How many dice the minister's side rolls.
    pub own_dice: usize,
}

/// The result of a contested roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestedRoll {
    /// The opponent's die.
    pub enemy: i32,
    /// The minister's dice.
    pub own: Vec<i32>,
}

impl ContestedRoll {
    /// The minister's best die, if any were rolled.
    pub fn best_own(&self) -> Option<i32> {
        self.own.iter().copied().max()
    }
}

/// Roll the minister's dice against an opponent.
///
/// A corrupt minister steals `stake` and keeps redrawing until the two sides
/// finish within one point of each other (after modifiers), so the loss looks
/// narrow. The search gives up after `contest_max_attempts` and keeps the
/// last draw. One die shows that result and the others roll at or below it.
pub fn contested_roll(
    cabinet: &mut Cabinet,
    id: MinisterId,
    contest: &Contest,
    mut opponent: impl FnMut(&mut dyn Dice) -> i32,
    stake: Stake,
    court: &mut Court<'_>,
) -> MechResult<ContestedRoll> {
    if !check_corruption(cabinet, id, court)? {
        let enemy = opponent(&mut *court.dice);
        let minister = cabinet.minister(id)?;
        let own = (0..contest.own_dice)
            .map(|_| base_roll(6, minister, court.dice))
            .collect();
        return Ok(ContestedRoll { enemy, own });
    }

    steal_once(cabinet, id, stake, court)?;
    let minister = cabinet.minister(id)?;
    let mut own = 1;
    let mut enemy = 1;
    for attempt in 0..court.config.contest_max_attempts.max(1) {
        own = base_roll(6, minister, court.dice);
        enemy = opponent(&mut *court.dice);
        let gap = (own + contest.own_modifier) - (enemy + contest.enemy_modifier);
        if gap.abs() < 2 {
            tracing::debug!(minister = %id, attempt, own, enemy, "close contest staged");
            break;
        }
    }

    if contest.own_dice == 0 {
        return Ok(ContestedRoll {
            enemy,
            own: Vec::new(),
        });
    }
    let last = i32::try_from(contest.own_dice - 1).unwrap_or(i32::MAX);
    let chosen = usize::try_from(court.dice.roll(0, last)).unwrap_or(0);
    let dice = (0..contest.own_dice)
        .map(|i| if i == chosen { own } else { court.dice.roll(1, own) })
        .collect();
    Ok(ContestedRoll { enemy, own: dice })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, ScenarioOverride};
    use crate::dice::ScriptedDice;
    use crate::notice::NoticeLog;
    use cabinet_core::{Background, HiddenTraits, Ministry};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn minister(general: u8, corruption: u8) -> Minister {
        Minister::new("Vera", Background::Merchant, HiddenTraits::new(general, &[], corruption))
    }

    fn stake(amount: i64) -> Stake {
        Stake::new(amount, Ministry::Commerce)
    }

    #[test]
    fn modifier_bands() {
        assert_eq!(skill_modifier(&minister(1, 1)), -1);
        assert_eq!(skill_modifier(&minister(3, 1)), 0);
        let mut cabinet = Cabinet::new();
        let id = cabinet
            .enlist(Minister::new(
                "Ada",
                Background::Merchant,
                HiddenTraits::new(3, &[(Ministry::Commerce, 3)], 1),
            ))
            .unwrap();
        cabinet.appoint(id, Some(Ministry::Commerce)).unwrap();
        assert_eq!(skill_modifier(cabinet.minister(id).unwrap()), 1);
    }

    #[test]
    fn coin_applies_modifier() {
        let low = minister(1, 1);
        let mut dice = ScriptedDice::new([4, 1, 4, 0, 1, 1]);
        assert_eq!(base_roll(6, &low, &mut dice), 3);
        assert_eq!(base_roll(6, &low, &mut dice), 4);
        assert_eq!(base_roll(6, &low, &mut dice), 1);
    }

    #[test]
    fn passive_roll_penalised() {
        let mut dice = ScriptedDice::new([6, 1]);
        assert_eq!(passive_roll(6, &mut dice), 5);
    }

    #[test]
    fn corrupt_roll_is_near_miss_and_steals() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 6)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::AlwaysCorrupt);
        let mut rng = StdRng::seed_from_u64(1);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut rng, &mut log);
        let check = Check::d6(5, 1).unwrap();
        for _ in 0..50 {
            let v = resolved_roll(&mut cabinet, id, &check, stake(4), &mut court).unwrap();
            assert!((2..=4).contains(&v), "got {v}");
        }
        let ledger = &cabinet.minister(id).unwrap().ledger;
        assert_eq!(ledger.stolen_money, 200);
        assert_eq!(ledger.undetected.len(), 50);
    }

    #[test]
    fn honest_roll_steals_nothing() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 6)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::NeverCorrupt);
        let mut dice = ScriptedDice::new([6, 0]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let check = Check::d6(5, 1).unwrap();
        assert_eq!(resolved_roll(&mut cabinet, id, &check, stake(50), &mut court).unwrap(), 6);
        assert_eq!(cabinet.minister(id).unwrap().ledger.stolen_money, 0);
    }

    #[test]
    fn corrupt_batch_steals_once() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 6)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::AlwaysCorrupt);
        let mut rng = StdRng::seed_from_u64(5);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut rng, &mut log);
        let check = Check::d6(5, 1).unwrap();
        let values =
            resolved_roll_batch(&mut cabinet, id, &check, stake(30), 4, &mut court).unwrap();
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| *v < 5));
        let m = cabinet.minister(id).unwrap();
        assert_eq!(m.ledger.undetected.len(), 1);
        assert_eq!(m.ledger.stolen_money, 30);
        assert!(!m.stolen_already);
    }

    #[test]
    fn empty_batch() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 6)).unwrap();
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::default();
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let check = Check::d6(5, 1).unwrap();
        let values =
            resolved_roll_batch(&mut cabinet, id, &check, stake(30), 0, &mut court).unwrap();
        assert!(values.is_empty());
        assert_eq!(dice.drawn(), 0);
    }

    #[test]
    fn rigged_contest_is_close() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 6)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::AlwaysCorrupt);
        let mut rng = StdRng::seed_from_u64(11);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut rng, &mut log);
        let contest = Contest {
            own_modifier: 0,
            enemy_modifier: 0,
            own_dice: 3,
        };
        for _ in 0..20 {
            let result = contested_roll(
                &mut cabinet,
                id,
                &contest,
                |d: &mut dyn Dice| d.d6(),
                stake(0),
                &mut court,
            )
            .unwrap();
            let best = result.best_own().unwrap();
            assert!((best - result.enemy).abs() < 2);
            assert_eq!(result.own.len(), 3);
        }
    }

    #[test]
    fn unreachable_contest_keeps_last_draw() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 6)).unwrap();
        let config = EngineConfig::default()
            .with_override(ScenarioOverride::AlwaysCorrupt)
            .with_contest_max_attempts(3);
        let mut dice = ScriptedDice::default();
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let contest = Contest {
            own_modifier: 0,
            enemy_modifier: 0,
            own_dice: 2,
        };
        let mut throws = 0;
        let result = contested_roll(
            &mut cabinet,
            id,
            &contest,
            |_: &mut dyn Dice| {
                throws += 1;
                6
            },
            stake(0),
            &mut court,
        )
        .unwrap();
        assert_eq!(throws, 3);
        assert_eq!(
            result,
            ContestedRoll {
                enemy: 6,
                own: vec![1, 1],
            }
        );
    }

    #[test]
    fn honest_contest_rolls_enemy_first() {
        let mut cabinet = Cabinet::new();
        let id = cabinet.enlist(minister(3, 1)).unwrap();
        let config = EngineConfig::default().with_override(ScenarioOverride::NeverCorrupt);
        let mut dice = ScriptedDice::new([2, 5, 0]);
        let mut log = NoticeLog::default();
        let mut court = Court::new(&config, &mut dice, &mut log);
        let contest = Contest {
            own_modifier: 1,
            enemy_modifier: 0,
            own_dice: 1,
        };
        let result = contested_roll(
            &mut cabinet,
            id,
            &contest,
            |d: &mut dyn Dice| d.d6(),
            stake(0),
            &mut court,
        )
        .unwrap();
        assert_eq!(result.enemy, 2);
        assert_eq!(result.own, vec![5]);
    }

    proptest! {
        #[test]
        fn base_roll_in_range(seed in any::<u64>(), general in 1u8..=3, sides in 1i32..=20) {
            let m = minister(general, 3);
            let mut rng = StdRng::seed_from_u64(seed);
            let v = base_roll(sides, &m, &mut rng);
            prop_assert!((1..=sides).contains(&v));
        }

        #[test]
        fn resolved_roll_in_range(seed in any::<u64>(), corruption in 1u8..=6) {
            let mut cabinet = Cabinet::new();
            let id = cabinet.enlist(minister(2, corruption)).unwrap();
            let config = EngineConfig::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut log = NoticeLog::default();
            let mut court = Court::new(&config, &mut rng, &mut log);
            let check = Check::d6(4, 1).unwrap();
            let v = resolved_roll(&mut cabinet, id, &check, stake(5), &mut court).unwrap();
            prop_assert!((1..=6).contains(&v));
        }
    }
}
