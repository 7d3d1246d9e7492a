//! Random sources for every roll in the engine.
//!
//! All randomness goes through the [`Dice`] trait so that a seeded
//! [`StdRng`] can drive a game and a [`ScriptedDice`] can replay exact draws
//! in tests.

pub mod scripted;

pub use scripted::ScriptedDice;

use rand::Rng;
use rand::rngs::StdRng;

/// A source of uniform integer draws.
pub trait Dice {
    /// Draw uniformly from `low..=high`. Returns `low` if the range is empty.
    fn roll(&mut self, low: i32, high: i32) -> i32;

    /// A six-sided die.
    fn d6(&mut self) -> i32 {
        self.roll(1, 6)
    }

    /// A fair coin flip.
    fn coin(&mut self) -> bool {
        self.roll(0, 1) == 1
    }
}

impl Dice for StdRng {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            low
        } else {
            self.random_range(low..=high)
        }
    }
}
