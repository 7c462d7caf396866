// dice.rs
use rand::{Rng, RngCore};
use std::collections::VecDeque;

pub const DICE_SIDES: u8 = 6;

/// A source of six-sided die rolls.
pub trait Dice {
    /// Returns a value in `1..=DICE_SIDES`.
    fn roll(&mut self) -> u8;
}

impl<R: RngCore> Dice for R {
    fn roll(&mut self) -> u8 {
        self.gen_range(1..=DICE_SIDES)
    }
}

/// Dice that return a fixed sequence of values, for replaying a known battle.
///
/// The script is a test fixture: it must list every roll the battle needs.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    rolls: VecDeque<u8>,
}

impl LoadedDice {
    /// # Panics
    ///
    /// Panics if any roll is outside `1..=DICE_SIDES`.
    pub fn new(rolls: &[u8]) -> Self {
        if let Some(bad) = rolls.iter().find(|roll| !(1..=DICE_SIDES).contains(*roll)) {
            panic!("loaded die face {bad} is not on a {DICE_SIDES}-sided die");
        }
        Self {
            rolls: rolls.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for LoadedDice {
    /// # Panics
    ///
    /// Panics when the script has run out; the fixture was too short.
    fn roll(&mut self) -> u8 {
        match self.rolls.pop_front() {
            Some(roll) => roll,
            None => panic!("loaded dice ran out of scripted rolls"),
        }
    }
}
