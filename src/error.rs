// error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerritoryError {
    #[error("Territory name must not be empty")]
    EmptyName,

    #[error(
        "Territory name '{0}' is longer than {max} characters",
        max = crate::territory::MAX_NAME_LENGTH
    )]
    NameTooLong(String),

    #[error("Army color must not be empty")]
    EmptyColor,

    #[error(
        "Army color '{0}' is longer than {max} characters",
        max = crate::territory::MAX_COLOR_LENGTH
    )]
    ColorTooLong(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error(
        "The board needs exactly {expected} territories, got {0}",
        expected = crate::board::BOARD_SIZE
    )]
    WrongSize(usize),

    #[error("Territory '{name}' has {troops} troops, at least {required} are required")]
    NotEnoughTroops {
        name: String,
        troops: u32,
        required: u32,
    },

    #[error(transparent)]
    Territory(#[from] TerritoryError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("Territory index {0} is out of range")]
    InvalidIndex(usize),

    #[error("A territory cannot attack itself")]
    SameTerritory,

    #[error("Territory '{name}' needs at least {required} troops to attack (has {troops})")]
    InsufficientTroops {
        name: String,
        troops: u32,
        required: u32,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    #[error("Unknown mission kind {0}")]
    UnknownKind(u8),

    #[error("This game variant has no missions")]
    NoMission,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error(
        "Choose a number between 1 and {max}, or 0 to cancel (got {0})",
        max = crate::board::BOARD_SIZE
    )]
    OutOfRange(i64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Player color and mission target color are both '{0}'")]
    SameColors(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Territory(#[from] TerritoryError),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Attacks are disabled in the basic variant")]
    AttacksDisabled,

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Mission(#[from] MissionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
