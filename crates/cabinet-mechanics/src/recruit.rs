//! Generating fresh ministers.

use cabinet_core::{Background, HiddenTraits, Minister, Ministry};

use crate::config::EngineConfig;
use crate::dice::Dice;
use crate::rumor::reveal_all;

const GIVEN_NAMES: &[&str] = &[
    "Albrecht", "Beatrix", "Casimir", "Dorothea", "Emeric", "Falk", "Gisela", "Henrike",
    "Ignaz", "Jutta", "Konrad", "Leopold", "Mechthild", "Nikolaus", "Ottilie", "Radomir",
];

const FAMILY_NAMES: &[&str] = &[
    "Adler", "Brenner", "Drechsler", "Eisen", "Falkner", "Gerber", "Hartmann", "Kessler",
    "Lindqvist", "Morrow", "Novak", "Quist", "Reinholt", "Sauer", "Vogt", "Wexler",
];

fn pick<'t>(table: &[&'t str], dice: &mut dyn Dice) -> &'t str {
    let last = i32::try_from(table.len().saturating_sub(1)).unwrap_or(0);
    let index = usize::try_from(dice.roll(0, last)).unwrap_or(0);
    table.get(index).copied().unwrap_or_default()
}

/// A random "Given Family" name.
pub fn random_name(dice: &mut dyn Dice) -> String {
    let given = pick(GIVEN_NAMES, dice);
    let family = pick(FAMILY_NAMES, dice);
    format!("{given} {family}")
}

/// A random background, each equally likely.
pub fn random_background(dice: &mut dyn Dice) -> Background {
    let last = i32::try_from(Background::ALL.len() - 1).unwrap_or(0);
    let index = usize::try_from(dice.roll(0, last)).unwrap_or(0);
    Background::ALL
        .get(index)
        .copied()
        .unwrap_or(Background::Commoner)
}

/// Roll up a new minister.
///
/// General skill is 1-3, each ministry gets 0-2 more (+1 where the
/// background has an affinity), and corruption is 1-6. Nothing is known
/// about them unless the engine runs transparent.
pub fn recruit(
    name: impl Into<String>,
    background: Background,
    config: &EngineConfig,
    dice: &mut dyn Dice,
) -> Minister {
    let general = u8::try_from(dice.roll(1, 3)).unwrap_or(1);
    let specific: Vec<(Ministry, u8)> = Ministry::ALL
        .iter()
        .map(|&ministry| {
            let bonus = i32::from(ministry == background.affinity());
            let value = dice.roll(0, 2) + bonus;
            (ministry, u8::try_from(value).unwrap_or(0))
        })
        .collect();
    let corruption = u8::try_from(dice.roll(1, 6)).unwrap_or(1);

    let hidden = HiddenTraits::new(general, &specific, corruption);
    let mut minister = Minister::new(name, background, hidden);
    tracing::debug!(
        minister = %minister.id,
        name = %minister.name,
        %background,
        general,
        corruption,
        "recruited"
    );
    if config.transparent {
        reveal_all(&mut minister, dice);
    }
    minister
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use cabinet_core::Attribute;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scripted_recruit() {
        // general 3; agriculture..religion; corruption 5
        let mut dice = ScriptedDice::new([3, 2, 0, 1, 0, 0, 2, 0, 5]);
        let m = recruit("Ilse Vogt", Background::Jurist, &EngineConfig::default(), &mut dice);
        let hidden = m.hidden();
        assert_eq!(hidden.general_skill(), 3);
        assert_eq!(hidden.specific_skill(Ministry::Agriculture), 2);
        assert_eq!(hidden.specific_skill(Ministry::Construction), 1);
        assert_eq!(hidden.specific_skill(Ministry::Prosecution), 3);
        assert_eq!(hidden.corruption(), 5);
        assert_eq!(m.ledger.personal_savings, 100);
        assert!(m.apparent_state().corruption.is_none());
        assert!(m.apparent_state().skills.is_empty());
    }

    #[test]
    fn transparent_recruit_is_revealed() {
        let config = EngineConfig::default().with_transparency(true);
        let mut rng = StdRng::seed_from_u64(3);
        let m = recruit("Open Book", Background::Clergy, &config, &mut rng);
        for ministry in Ministry::ALL {
            let attr = Attribute::Skill(ministry);
            assert_eq!(m.apparent(attr), Some(m.hidden().true_value(attr)));
        }
        assert_eq!(m.apparent(Attribute::Loyalty), Some(m.hidden().corruption()));
    }

    #[test]
    fn random_names_come_from_tables() {
        let mut dice = ScriptedDice::new([0, 15]);
        assert_eq!(random_name(&mut dice), "Albrecht Wexler");
        let mut dice = ScriptedDice::new([6]);
        assert_eq!(random_background(&mut dice), Background::Commoner);
    }

    proptest! {
        #[test]
        fn traits_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let background = random_background(&mut rng);
            let m = recruit(random_name(&mut rng), background, &EngineConfig::default(), &mut rng);
            let hidden = m.hidden();
            prop_assert!((1..=3).contains(&hidden.general_skill()));
            prop_assert!((1..=6).contains(&hidden.corruption()));
            for ministry in Ministry::ALL {
                prop_assert!((1..=6).contains(&hidden.total_skill(ministry)));
            }
        }
    }
}
