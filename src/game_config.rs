use crate::board::Board;
use crate::combat::MIN_TROOPS_TO_ATTACK;
use crate::error::ConfigError;
use crate::territory::{validate_color, Territory};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule set a game is played with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Register and display territories only.
    Basic,
    /// Territories can attack each other.
    Attack,
    /// Attacks plus a secret mission.
    Mission,
}

impl Variant {
    /// Troops every territory must start with.
    pub fn min_troops(self) -> u32 {
        match self {
            Variant::Basic => 1,
            Variant::Attack | Variant::Mission => MIN_TROOPS_TO_ATTACK,
        }
    }

    pub fn allows_attacks(self) -> bool {
        self != Variant::Basic
    }

    pub fn has_missions(self) -> bool {
        self == Variant::Mission
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub variant: Variant,
    pub player_color: String,
    pub target_color: String,
    /// Forces a mission kind instead of drawing one (`0` eliminate, `1` conquer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<u8>,
    pub territories: Vec<TerritoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerritoryConfig {
    pub name: String,
    pub army_color: String,
    pub troops: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        serde_json::from_str(include_str!("config.json")).expect("embedded config.json is valid")
    }
}

impl GameConfig {
    pub fn to_board(&self) -> Result<Board, ConfigError> {
        let territories = self
            .territories
            .iter()
            .map(|t| Territory::new(&t.name, &t.army_color, t.troops))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Board::with_min_troops(territories, self.variant.min_troops())?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_board()?;
        if self.variant.has_missions() {
            let player = validate_color(&self.player_color)?;
            let target = validate_color(&self.target_color)?;
            if player == target {
                return Err(ConfigError::SameColors(player));
            }
        }
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoardError, TerritoryError};

    #[test]
    fn embedded_config_is_playable() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.variant, Variant::Mission);
        let board = config.to_board().unwrap();
        assert_eq!(board.get_territory(0).unwrap().name, "Brasil");
    }

    #[test]
    fn variant_sets_minimum_troops() {
        let mut config = GameConfig::default();
        config.territories[2].troops = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Board(BoardError::NotEnoughTroops { required: 2, .. }))
        ));

        config.variant = Variant::Basic;
        assert!(config.validate().is_ok());

        config.territories[2].troops = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn wrong_territory_count_is_rejected() {
        let mut config = GameConfig::default();
        config.territories.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Board(BoardError::WrongSize(4)))
        ));
    }

    #[test]
    fn overlong_color_is_rejected() {
        let mut config = GameConfig::default();
        config.territories[0].army_color = "Azul-marinho-muito-escuro".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Territory(TerritoryError::ColorTooLong(_)))
        ));
    }

    #[test]
    fn mission_colors_must_differ() {
        let mut config = GameConfig::default();
        config.target_color = " Azul ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::SameColors(c)) if c == "Azul"));

        // Only the mission variant cares about the target.
        config.variant = Variant::Attack;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mission_colors_are_bounded_text() {
        let mut config = GameConfig::default();
        config.player_color = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Territory(TerritoryError::EmptyColor))
        ));

        config.player_color = "Azul".to_string();
        config.target_color = "Verde-esmeralda-brilhante".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Territory(TerritoryError::ColorTooLong(c))) if c == config.target_color
        ));
    }

    #[test]
    fn unknown_forced_mission_still_loads() {
        // The game treats it as a mission that is never satisfied.
        let config = GameConfig {
            mission: Some(4),
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_json_with_lowercase_variant() {
        let json = r#"{
            "variant": "basic",
            "player_color": "Azul",
            "target_color": "Verde",
            "territories": [
                { "name": "A", "army_color": "Azul", "troops": 1 },
                { "name": "B", "army_color": "Verde", "troops": 1 },
                { "name": "C", "army_color": "Azul", "troops": 1 },
                { "name": "D", "army_color": "Verde", "troops": 1 },
                { "name": "E", "army_color": "Azul", "troops": 1 }
            ]
        }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.mission, None);
        assert!(config.validate().is_ok());
    }
}
