// odds.rs
use crate::combat::MIN_TROOPS_TO_ATTACK;
use crate::dice::DICE_SIDES;
use itertools::iproduct;
use std::collections::HashMap;

/// Chance the attacker wins one round: both dice enumerated, ties go to the attacker.
pub fn round_win_probability() -> f64 {
    let faces = 1..=DICE_SIDES;
    let outcomes = iproduct!(faces.clone(), faces);
    let (wins, total) = outcomes.fold((0u32, 0u32), |(wins, total), (attack, defense)| {
        (wins + u32::from(attack >= defense), total + 1)
    });
    f64::from(wins) / f64::from(total)
}

/// Memoised conquest probabilities keyed by `(attacker_troops, defender_troops)`.
#[derive(Debug, Clone, Default)]
pub struct OddsTable {
    cache: HashMap<(u32, u32), f64>,
    round_win: Option<f64>,
}

impl OddsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probability (0.0..=1.0) that repeated rounds end with the defender
    /// conquered before the attacker drops below the attack threshold.
    pub fn conquest_probability(&mut self, attacker_troops: u32, defender_troops: u32) -> f64 {
        if defender_troops == 0 {
            return 1.0;
        }
        if attacker_troops < MIN_TROOPS_TO_ATTACK {
            return 0.0;
        }
        if let Some(&prob) = self.cache.get(&(attacker_troops, defender_troops)) {
            return prob;
        }

        let p_win = *self.round_win.get_or_insert_with(round_win_probability);
        let prob = p_win * self.conquest_probability(attacker_troops, defender_troops - 1)
            + (1.0 - p_win) * self.conquest_probability(attacker_troops - 1, defender_troops);

        self.cache.insert((attacker_troops, defender_troops), prob);
        prob
    }

    /// Same as [`conquest_probability`](Self::conquest_probability), as a
    /// percentage rounded to two decimals.
    pub fn conquest_percent(&mut self, attacker_troops: u32, defender_troops: u32) -> f64 {
        to_percent(self.conquest_probability(attacker_troops, defender_troops))
    }
}

pub fn to_percent(probability: f64) -> f64 {
    (probability * 10000.0).round() / 100.0
}
