// mission.rs
use crate::board::Board;
use crate::error::MissionError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Territories a player must hold to complete a conquest mission.
pub const CONQUEST_GOAL: usize = 3;

/// Number of mission kinds a game may draw from.
pub const MISSION_KINDS: u8 = 2;

/// A secret victory condition, drawn once per game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum Mission {
    /// Leave no territory under the target color.
    Eliminate { target_color: String },
    /// Hold at least `territories` territories.
    Conquer { territories: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionStatus {
    pub mission: Mission,
    pub satisfied: bool,
    /// Territories still held by the target, or territories held by the player.
    pub count: usize,
    /// Value `count` must reach for the mission to be satisfied.
    pub goal: usize,
}

impl Mission {
    /// Maps a numeric mission tag: `0` eliminates the target, `1` conquers.
    pub fn from_tag(tag: u8, target_color: &str) -> Result<Self, MissionError> {
        match tag {
            0 => Ok(Mission::Eliminate {
                target_color: target_color.to_string(),
            }),
            1 => Ok(Mission::Conquer {
                territories: CONQUEST_GOAL,
            }),
            other => Err(MissionError::UnknownKind(other)),
        }
    }

    pub fn tag(&self) -> u8 {
        match self {
            Mission::Eliminate { .. } => 0,
            Mission::Conquer { .. } => 1,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Mission::Eliminate { target_color } => {
                format!("Eliminate every territory held by the {target_color} army")
            }
            Mission::Conquer { territories } => {
                format!("Control at least {territories} territories")
            }
        }
    }
}

/// Picks one of the mission kinds with equal probability.
pub fn draw_mission<R: Rng>(rng: &mut R, target_color: &str) -> Mission {
    match rng.gen_range(0..MISSION_KINDS) {
        0 => Mission::Eliminate {
            target_color: target_color.to_string(),
        },
        _ => Mission::Conquer {
            territories: CONQUEST_GOAL,
        },
    }
}

pub fn check_victory(board: &Board, mission: &Mission, player_color: &str) -> bool {
    evaluate(board, mission, player_color).satisfied
}

pub fn evaluate(board: &Board, mission: &Mission, player_color: &str) -> MissionStatus {
    let (satisfied, count, goal) = match mission {
        Mission::Eliminate { target_color } => {
            let remaining = board.count_owned_by(target_color);
            (remaining == 0, remaining, 0)
        }
        Mission::Conquer { territories } => {
            let owned = board.count_owned_by(player_color);
            (owned >= *territories, owned, *territories)
        }
    };

    MissionStatus {
        mission: mission.clone(),
        satisfied,
        count,
        goal,
    }
}

/// Evaluates a mission known only by its tag. An unknown tag is logged and
/// never counts as satisfied.
pub fn check_victory_by_tag(
    board: &Board,
    tag: u8,
    target_color: &str,
    player_color: &str,
) -> bool {
    match Mission::from_tag(tag, target_color) {
        Ok(mission) => check_victory(board, &mission, player_color),
        Err(e) => {
            warn!(tag, error = %e, "mission cannot be evaluated");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn conquer() -> Mission {
        Mission::Conquer {
            territories: CONQUEST_GOAL,
        }
    }

    fn eliminate_green() -> Mission {
        Mission::Eliminate {
            target_color: "Verde".to_string(),
        }
    }

    #[test]
    fn conquest_needs_three_territories() {
        let three = board(&[
            ("A", "Azul", 2),
            ("B", "Azul", 2),
            ("C", "Azul", 2),
            ("D", "Verde", 2),
            ("E", "Verde", 2),
        ]);
        assert!(check_victory(&three, &conquer(), "Azul"));

        let two = board(&[
            ("A", "Azul", 2),
            ("B", "Azul", 2),
            ("C", "Vermelho", 2),
            ("D", "Verde", 2),
            ("E", "Verde", 2),
        ]);
        assert!(!check_victory(&two, &conquer(), "Azul"));

        let status = evaluate(&two, &conquer(), "Azul");
        assert_eq!((status.count, status.goal), (2, CONQUEST_GOAL));
    }

    #[test]
    fn elimination_needs_target_wiped_out() {
        let cleared = board(&[
            ("A", "Azul", 2),
            ("B", "Azul", 2),
            ("C", "Vermelho", 2),
            ("D", "Azul", 2),
            ("E", "Vermelho", 2),
        ]);
        assert!(check_victory(&cleared, &eliminate_green(), "Azul"));

        let holdout = board(&[
            ("A", "Azul", 2),
            ("B", "Azul", 2),
            ("C", "Vermelho", 2),
            ("D", "Verde", 2),
            ("E", "Vermelho", 2),
        ]);
        assert!(!check_victory(&holdout, &eliminate_green(), "Azul"));
        assert_eq!(evaluate(&holdout, &eliminate_green(), "Azul").count, 1);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let board = board(&[
            ("A", "Azul", 2),
            ("B", "Verde", 2),
            ("C", "Azul", 2),
            ("D", "Verde", 2),
            ("E", "Azul", 2),
        ]);
        for mission in [conquer(), eliminate_green()] {
            let first = evaluate(&board, &mission, "Azul");
            let second = evaluate(&board, &mission, "Azul");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn tags_round_trip_and_unknown_tag_is_an_error() {
        assert_eq!(Mission::from_tag(0, "Verde").unwrap(), eliminate_green());
        assert_eq!(Mission::from_tag(1, "Verde").unwrap(), conquer());
        assert_eq!(eliminate_green().tag(), 0);
        assert_eq!(conquer().tag(), 1);
        assert_eq!(
            Mission::from_tag(7, "Verde"),
            Err(MissionError::UnknownKind(7))
        );

        let board = board(&[
            ("A", "Azul", 2),
            ("B", "Azul", 2),
            ("C", "Azul", 2),
            ("D", "Azul", 2),
            ("E", "Azul", 2),
        ]);
        assert!(check_victory_by_tag(&board, 1, "Verde", "Azul"));
        assert!(check_victory_by_tag(&board, 0, "Verde", "Azul"));
        // Even a board the player owns outright does not satisfy an unknown kind.
        assert!(!check_victory_by_tag(&board, 9, "Verde", "Azul"));
    }

    #[test]
    fn draws_cover_both_kinds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws: Vec<Mission> = (0..200).map(|_| draw_mission(&mut rng, "Verde")).collect();
        let eliminations = draws.iter().filter(|m| m.tag() == 0).count();
        assert!(eliminations > 50 && eliminations < 150);
    }
}
