//! Words observers use for what they believe about a minister.

use cabinet_core::{Attribute, Minister};

use crate::dice::Dice;

const SKILL_PHRASES: [[&str; 2]; 6] = [
    ["incompetent", "hopeless"],
    ["inexperienced", "clumsy"],
    ["mediocre", "adequate"],
    ["competent", "capable"],
    ["skilled", "accomplished"],
    ["brilliant", "masterful"],
];

const CORRUPTION_PHRASES: [[&str; 2]; 6] = [
    ["incorruptible", "saintly"],
    ["honest", "principled"],
    ["mostly honest", "pragmatic"],
    ["questionable", "opportunistic"],
    ["shady", "venal"],
    ["crooked", "rapacious"],
];

/// Phrases that fit `value` (1..=6) for `attribute`.
pub fn phrases(attribute: Attribute, value: u8) -> &'static [&'static str] {
    let index = usize::from(value.clamp(1, 6) - 1);
    match attribute {
        Attribute::Skill(_) => &SKILL_PHRASES[index],
        Attribute::Loyalty => &CORRUPTION_PHRASES[index],
    }
}

/// Pick a phrase for `value` at random.
pub fn describe(attribute: Attribute, value: u8, dice: &mut dyn Dice) -> String {
    let options = phrases(attribute, value);
    let last = i32::try_from(options.len().saturating_sub(1)).unwrap_or(0);
    let pick = usize::try_from(dice.roll(0, last)).unwrap_or(0);
    options
        .get(pick)
        .or(options.first())
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// Commit a belief about `minister`, wording it afresh only if it changed.
/// Returns true if anything changed.
pub fn commit_apparent(
    minister: &mut Minister,
    attribute: Attribute,
    value: u8,
    dice: &mut dyn Dice,
) -> bool {
    let value = value.clamp(1, 6);
    if minister.apparent(attribute) == Some(value) {
        return false;
    }
    let description = describe(attribute, value, dice);
    minister.set_apparent(attribute, value, description)
}
