// board.rs
use crate::error::BoardError;
use crate::territory::Territory;
use serde::{Deserialize, Serialize};

/// Number of territories on every board.
pub const BOARD_SIZE: usize = 5;

/// The territory registry: exactly [`BOARD_SIZE`] territories in a fixed order.
///
/// Slots are never added or removed after construction. Only the combat engine
/// mutates territories, through [`Board::resolve_attack`](crate::combat).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    pub(crate) territories: [Territory; BOARD_SIZE],
}

impl Board {
    pub fn new(territories: Vec<Territory>) -> Result<Self, BoardError> {
        let territories: [Territory; BOARD_SIZE] = territories
            .try_into()
            .map_err(|rejected: Vec<Territory>| BoardError::WrongSize(rejected.len()))?;
        Ok(Self { territories })
    }

    /// Builds a board and checks every territory holds at least `min_troops`.
    pub fn with_min_troops(
        territories: Vec<Territory>,
        min_troops: u32,
    ) -> Result<Self, BoardError> {
        let board = Self::new(territories)?;
        if let Some(weak) = board.territories.iter().find(|t| t.troops < min_troops) {
            return Err(BoardError::NotEnoughTroops {
                name: weak.name.clone(),
                troops: weak.troops,
                required: min_troops,
            });
        }
        Ok(board)
    }

    pub fn get_territory(&self, index: usize) -> Option<&Territory> {
        self.territories.get(index)
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn is_valid_index(index: usize) -> bool {
        index < BOARD_SIZE
    }

    pub fn count_owned_by(&self, army_color: &str) -> usize {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(army_color))
            .count()
    }

    pub fn total_troops(&self) -> u32 {
        self.territories.iter().map(|t| t.troops).sum()
    }
}
