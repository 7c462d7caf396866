// selection.rs
use crate::board::BOARD_SIZE;
use crate::error::SelectionError;

/// What the player picked when asked for a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based board index.
    Territory(usize),
    Cancelled,
}

/// Converts a 1-based menu number into a board index. `0` cancels.
pub fn select_territory(choice: i64) -> Result<Selection, SelectionError> {
    match choice {
        0 => Ok(Selection::Cancelled),
        n if n >= 1 && n <= BOARD_SIZE as i64 => Ok(Selection::Territory((n - 1) as usize)),
        n => Err(SelectionError::OutOfRange(n)),
    }
}
