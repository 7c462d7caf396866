use crate::board::Board;
use crate::combat::BattleReport;
use crate::error::{GameError, MissionError};
use crate::game_config::{GameConfig, Variant};
use crate::mission::{self, draw_mission, Mission, MissionStatus};
use crate::odds::OddsTable;
use crate::territory::Territory;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub variant: Variant,
    pub player_color: String,
    pub seed: u64,
    pub rounds_fought: usize,
    pub conquests: usize,
    pub territories: Vec<Territory>,
    pub last_battle: Option<BattleReport>,
    pub mission: Option<MissionStatus>,
    pub conquer_probs: Vec<(String, String, f64)>,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    pub variant: Variant,
    pub player_color: String,
    pub mission: Option<Mission>,
    pub rounds_fought: usize,
    pub conquests: usize,
    pub last_battle: Option<BattleReport>,
    target_color: String,
    /// Kind of the assigned mission, kept even when it names no known mission.
    mission_tag: Option<u8>,
    seed: u64,
    rng: ChaCha8Rng,
    odds: OddsTable,
}

/// Seed taken from the wall clock, for games started without `--seed`.
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp_millis().unsigned_abs()
}

impl Game {
    /// Sets up a game from a config. The same generator, seeded once here,
    /// draws the mission and every later die.
    pub fn new(config: &GameConfig, seed: Option<u64>) -> Result<Self, GameError> {
        config.validate()?;
        let board = config.to_board()?;

        let seed = seed.unwrap_or_else(clock_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        info!(seed, variant = ?config.variant, "starting game");

        let player_color = config.player_color.trim().to_string();
        let target_color = config.target_color.trim().to_string();
        let (mission_tag, mission) = match (config.variant.has_missions(), config.mission) {
            (false, _) => (None, None),
            (true, Some(tag)) => match Mission::from_tag(tag, &target_color) {
                Ok(mission) => (Some(tag), Some(mission)),
                Err(e) => {
                    warn!(tag, error = %e, "forced mission can never be satisfied");
                    (Some(tag), None)
                }
            },
            (true, None) => {
                let mission = draw_mission(&mut rng, &target_color);
                (Some(mission.tag()), Some(mission))
            }
        };
        if let Some(mission) = &mission {
            info!(mission = ?mission, "mission assigned");
        }

        Ok(Self {
            board,
            variant: config.variant,
            player_color,
            mission,
            rounds_fought: 0,
            conquests: 0,
            last_battle: None,
            target_color,
            mission_tag,
            seed,
            rng,
            odds: OddsTable::new(),
        })
    }

    /// Fights one round from `attacker` into `defender` (zero-based indices).
    pub fn attack(&mut self, attacker: usize, defender: usize) -> Result<BattleReport, GameError> {
        if !self.variant.allows_attacks() {
            return Err(GameError::AttacksDisabled);
        }

        let report = self
            .board
            .resolve_attack(attacker, defender, &mut self.rng)
            .map_err(|e| {
                warn!(attacker, defender, error = %e, "attack rejected");
                e
            })?;

        self.rounds_fought += 1;
        if report.is_conquest() {
            self.conquests += 1;
            info!(
                territory = %report.defender.name,
                from = %report.defender_previous_color,
                to = %report.defender.army_color,
                "territory conquered"
            );
        }

        self.last_battle = Some(report.clone());
        Ok(report)
    }

    pub fn check_mission(&self) -> Result<MissionStatus, GameError> {
        let Some(mission) = &self.mission else {
            let error = match self.mission_tag {
                Some(tag) => MissionError::UnknownKind(tag),
                None => MissionError::NoMission,
            };
            return Err(error.into());
        };
        let status = mission::evaluate(&self.board, mission, &self.player_color);
        if status.satisfied {
            info!(mission = ?status.mission, "mission accomplished");
        }
        Ok(status)
    }

    /// Whether the assigned mission is satisfied right now. A mission of an
    /// unknown kind never is.
    pub fn mission_accomplished(&self) -> bool {
        self.mission_tag.map_or(false, |tag| {
            mission::check_victory_by_tag(&self.board, tag, &self.target_color, &self.player_color)
        })
    }

    /// Conquest odds for every pair of differently colored territories where
    /// the first one is able to attack.
    pub fn calculate_conquer_probabilities(&mut self) -> Vec<(String, String, f64)> {
        let territories = self.board.territories();
        let mut pairs = Vec::new();
        for from in territories.iter().filter(|t| t.can_attack()) {
            for to in territories {
                if to.army_color != from.army_color {
                    pairs.push((from.name.clone(), to.name.clone(), (from.troops, to.troops)));
                }
            }
        }

        pairs
            .into_iter()
            .map(|(from, to, (att, def))| (from, to, self.odds.conquest_percent(att, def)))
            .collect()
    }

    pub fn get_game_state(&mut self) -> GameState {
        let conquer_probs = if self.variant.allows_attacks() {
            self.calculate_conquer_probabilities()
        } else {
            vec![]
        };
        let mission = self.check_mission().ok();

        GameState {
            variant: self.variant,
            player_color: self.player_color.clone(),
            seed: self.seed,
            rounds_fought: self.rounds_fought,
            conquests: self.conquests,
            territories: self.board.territories().to_vec(),
            last_battle: self.last_battle.clone(),
            mission,
            conquer_probs,
        }
    }
}
