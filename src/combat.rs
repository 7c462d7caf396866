// combat.rs
use crate::board::Board;
use crate::dice::Dice;
use crate::error::CombatError;
use crate::territory::Territory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Troops a territory needs before it may attack.
pub const MIN_TROOPS_TO_ATTACK: u32 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The defender lost its last troop and changed hands.
    Conquered,
    DefenderDamaged,
    AttackerDamaged,
}

/// A territory as it stands after the battle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combatant {
    pub index: usize,
    pub name: String,
    pub army_color: String,
    pub troops: u32,
}

impl Combatant {
    fn snapshot(index: usize, territory: &Territory) -> Self {
        Self {
            index,
            name: territory.name.clone(),
            army_color: territory.army_color.clone(),
            troops: territory.troops,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattleReport {
    pub attack_roll: u8,
    pub defense_roll: u8,
    pub outcome: BattleOutcome,
    pub attacker: Combatant,
    pub defender: Combatant,
    /// Color that held the defending territory when the battle started.
    pub defender_previous_color: String,
}

impl BattleReport {
    pub fn is_conquest(&self) -> bool {
        self.outcome == BattleOutcome::Conquered
    }

    /// Troops lost by both sides together.
    pub fn troops_lost(&self) -> u32 {
        match self.outcome {
            BattleOutcome::Conquered => 2,
            BattleOutcome::DefenderDamaged | BattleOutcome::AttackerDamaged => 1,
        }
    }
}

impl Board {
    /// Checks `attacker` names a territory strong enough to attack anything.
    pub fn validate_attacker(&self, attacker: usize) -> Result<&Territory, CombatError> {
        let from = self
            .get_territory(attacker)
            .ok_or(CombatError::InvalidIndex(attacker))?;
        if !from.can_attack() {
            return Err(CombatError::InsufficientTroops {
                name: from.name.clone(),
                troops: from.troops,
                required: MIN_TROOPS_TO_ATTACK,
            });
        }
        Ok(from)
    }

    /// Checks an attack could be resolved, without touching any state.
    pub fn validate_attack(&self, attacker: usize, defender: usize) -> Result<(), CombatError> {
        if !Board::is_valid_index(attacker) {
            return Err(CombatError::InvalidIndex(attacker));
        }
        if !Board::is_valid_index(defender) {
            return Err(CombatError::InvalidIndex(defender));
        }
        if attacker == defender {
            return Err(CombatError::SameTerritory);
        }
        self.validate_attacker(attacker)?;
        Ok(())
    }

    /// Fights a single round between two territories.
    ///
    /// Each side rolls one die and the attacker wins ties. The loser of the
    /// round gives up one troop. A defender reduced to zero troops is taken
    /// over: it switches to the attacker's color and receives one troop, which
    /// the attacker pays for out of its own count.
    ///
    /// Validation happens before any die is rolled, so a rejected attack
    /// leaves both the board and the dice untouched.
    pub fn resolve_attack<D: Dice + ?Sized>(
        &mut self,
        attacker: usize,
        defender: usize,
        dice: &mut D,
    ) -> Result<BattleReport, CombatError> {
        self.validate_attack(attacker, defender)?;

        let attack_roll = dice.roll();
        let defense_roll = dice.roll();
        let defender_previous_color = self.territories[defender].army_color.clone();

        let outcome = if attack_roll >= defense_roll {
            let remaining = self.territories[defender].troops.saturating_sub(1);
            if remaining == 0 {
                let conqueror = self.territories[attacker].army_color.clone();
                let target = &mut self.territories[defender];
                target.army_color = conqueror;
                target.troops = 1;
                // Always >= 1 here: the attacker started with at least two.
                self.territories[attacker].troops -= 1;
                BattleOutcome::Conquered
            } else {
                self.territories[defender].troops = remaining;
                BattleOutcome::DefenderDamaged
            }
        } else {
            self.territories[attacker].troops -= 1;
            BattleOutcome::AttackerDamaged
        };

        debug!(
            attacker,
            defender, attack_roll, defense_roll, ?outcome, "battle resolved"
        );

        Ok(BattleReport {
            attack_roll,
            defense_roll,
            outcome,
            attacker: Combatant::snapshot(attacker, &self.territories[attacker]),
            defender: Combatant::snapshot(defender, &self.territories[defender]),
            defender_previous_color,
        })
    }
}
