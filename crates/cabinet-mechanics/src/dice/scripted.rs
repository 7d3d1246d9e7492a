//! A dice source that replays a fixed sequence of draws.

use std::collections::VecDeque;

use super::Dice;

/// Replays queued values in order.
///
/// Each value is clamped into the requested range. Once the queue runs dry
/// every draw returns the low end of its range, which fails every d6 check
/// and keeps coins on "no".
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    queue: VecDeque<i32>,
    drawn: usize,
}

impl ScriptedDice {
    /// Queue the given values.
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Append more values to the end of the queue.
    pub fn push(&mut self, values: impl IntoIterator<Item = i32>) {
        self.queue.extend(values);
    }

    /// Values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Number of draws made so far, including fallback draws.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        self.drawn += 1;
        match self.queue.pop_front() {
            Some(v) => v.clamp(low, high.max(low)),
            None => low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order() {
        let mut dice = ScriptedDice::new([3, 5, 1]);
        assert_eq!(dice.d6(), 3);
        assert_eq!(dice.d6(), 5);
        assert!(dice.coin());
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.drawn(), 3);
    }

    #[test]
    fn clamps_into_range() {
        let mut dice = ScriptedDice::new([9, -4]);
        assert_eq!(dice.d6(), 6);
        assert_eq!(dice.roll(-1, 1), -1);
    }

    #[test]
    fn falls_back_to_low() {
        let mut dice = ScriptedDice::default();
        assert_eq!(dice.d6(), 1);
        assert_eq!(dice.roll(-1, 1), -1);
        assert!(!dice.coin());
        dice.push([4]);
        assert_eq!(dice.d6(), 4);
    }
}
