//! How observers come to believe things about ministers.

use cabinet_core::{Attribute, Cabinet, Minister, MinisterId, Ministry};

use crate::context::Court;
use crate::corruption::offer_bribe;
use crate::describe::commit_apparent;
use crate::dice::Dice;
use crate::error::MechResult;
use crate::roll::{base_roll, passive_roll};

/// Let `detector` (or nobody, for a passive rumor) look into `target`'s
/// `attribute`, and commit what they conclude.
///
/// A poor roll blurs the truth by up to three points. A suspicious loyalty
/// reading can be bought down if both parties are willing and the target can
/// pay. Returns the new apparent value.
pub fn reveal(
    cabinet: &mut Cabinet,
    target: MinisterId,
    attribute: Attribute,
    detector: Option<MinisterId>,
    court: &mut Court<'_>,
) -> MechResult<u8> {
    let roll = match detector {
        Some(id) => base_roll(6, cabinet.minister(id)?, court.dice),
        None => passive_roll(6, court.dice),
    };
    let truth = i32::from(cabinet.minister(target)?.hidden().true_value(attribute));
    let mut value = if roll < court.config.accuracy_threshold {
        let noise: i32 = (0..3).map(|_| court.dice.roll(-1, 1)).sum();
        (truth + noise).clamp(1, 6)
    } else {
        truth
    };

    let suspicious = attribute == Attribute::Loyalty && value >= 4;
    if let Some(official) = detector.filter(|_| suspicious) {
        let price = court.config.loyalty_bribe;
        if offer_bribe(cabinet, target, official, price, court)?.is_some() {
            value = court.dice.roll(1, 2);
            tracing::info!(target = %target, official = %official, value, "loyalty report bought");
        }
    }

    let value = u8::try_from(value.clamp(1, 6)).unwrap_or(1);
    let minister = cabinet.minister_mut(target)?;
    if commit_apparent(minister, attribute, value, court.dice) {
        tracing::debug!(target = %target, %attribute, value, roll, "belief updated");
    }
    Ok(value)
}

/// Reveal every true value at once. Used in transparency mode.
pub fn reveal_all(minister: &mut Minister, dice: &mut dyn Dice) {
    for ministry in Ministry::ALL {
        let attribute = Attribute::Skill(ministry);
        let truth = minister.hidden().true_value(attribute);
        commit_apparent(minister, attribute, truth, dice);
    }
    let truth = minister.hidden().true_value(Attribute::Loyalty);
    commit_apparent(minister, Attribute::Loyalty, truth, dice);
}
