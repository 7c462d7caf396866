// territory.rs
use crate::error::TerritoryError;
use serde::{Deserialize, Serialize};

/// Longest accepted territory name, in characters.
pub const MAX_NAME_LENGTH: usize = 49;
/// Longest accepted army color, in characters.
pub const MAX_COLOR_LENGTH: usize = 19;

/// A named slot on the board. The army color doubles as the owner key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Territory {
    pub name: String,
    pub army_color: String,
    pub troops: u32,
}

/// Trims a territory name and checks it is non-empty and within
/// [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<String, TerritoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TerritoryError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(TerritoryError::NameTooLong(name.to_string()));
    }
    Ok(name.to_string())
}

/// Trims an army color and checks it is non-empty and within
/// [`MAX_COLOR_LENGTH`] characters.
pub fn validate_color(army_color: &str) -> Result<String, TerritoryError> {
    let army_color = army_color.trim();
    if army_color.is_empty() {
        return Err(TerritoryError::EmptyColor);
    }
    if army_color.chars().count() > MAX_COLOR_LENGTH {
        return Err(TerritoryError::ColorTooLong(army_color.to_string()));
    }
    Ok(army_color.to_string())
}

impl Territory {
    pub fn new(name: &str, army_color: &str, troops: u32) -> Result<Self, TerritoryError> {
        Ok(Self {
            name: validate_name(name)?,
            army_color: validate_color(army_color)?,
            troops,
        })
    }

    pub fn is_owned_by(&self, army_color: &str) -> bool {
        self.army_color == army_color
    }

    pub fn can_attack(&self) -> bool {
        self.troops >= crate::combat::MIN_TROOPS_TO_ATTACK
    }
}
