// console.rs
//! Terminal front end: menus, prompts and the map table.
//!
//! Everything here is generic over the reader and writer so a whole session
//! can be scripted in tests.

use crate::board::{Board, BOARD_SIZE};
use crate::combat::{BattleOutcome, BattleReport, MIN_TROOPS_TO_ATTACK};
use crate::game::Game;
use crate::game_config::{GameConfig, TerritoryConfig, Variant};
use crate::mission::{Mission, MissionStatus};
use crate::selection::{select_territory, Selection};
use crate::territory::{validate_color, validate_name};
use std::io::{self, BufRead, Write};
use tracing::debug;

const RULE: &str = "+------+---------------------------+----------------------+----------+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Attack,
    CheckMission,
    ShowOdds,
    Exit,
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next line without its line ending, or `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    pub fn prompt_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks until the answer parses as an integer.
    pub fn prompt_int(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt_text(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Error: enter numbers only.")?,
            }
        }
    }

    fn pause(&mut self) -> io::Result<()> {
        self.prompt_text("\nPress Enter to continue...")?;
        Ok(())
    }

    pub fn choose_territory(&mut self, role: &str, board: &Board) -> io::Result<Selection> {
        writeln!(self.output, "\nChoose the {role} territory:")?;
        self.show_map(board)?;
        loop {
            let prompt = format!("Territory number (1-{BOARD_SIZE}) or 0 to cancel: ");
            let Some(choice) = self.prompt_int(&prompt)? else {
                return Ok(Selection::Cancelled);
            };
            match select_territory(choice) {
                Ok(Selection::Cancelled) => {
                    writeln!(self.output, "Operation cancelled.")?;
                    return Ok(Selection::Cancelled);
                }
                Ok(selection) => return Ok(selection),
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }
    }

    fn prompt_territory(
        &mut self,
        number: usize,
        variant: Variant,
    ) -> io::Result<Option<TerritoryConfig>> {
        writeln!(self.output, "--- Territory {number} ---")?;
        let (name, army_color) = loop {
            let Some(name) = self.prompt_text("Territory name: ")? else {
                return Ok(None);
            };
            let Some(color) = self.prompt_text("Army color: ")? else {
                return Ok(None);
            };
            match validate_name(&name).and_then(|name| Ok((name, validate_color(&color)?))) {
                Ok(text) => break text,
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        };

        let min = variant.min_troops();
        let troops = loop {
            let prompt = format!("Troops (at least {min}): ");
            let Some(troops) = self.prompt_int(&prompt)? else {
                return Ok(None);
            };
            match u32::try_from(troops) {
                Ok(troops) if troops >= min => break troops,
                _ => writeln!(self.output, "Error: a territory needs at least {min} troops.")?,
            }
        };

        writeln!(self.output, "Territory registered.\n")?;
        Ok(Some(TerritoryConfig {
            name,
            army_color,
            troops,
        }))
    }

    fn prompt_color(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            let Some(color) = self.prompt_text(prompt)? else {
                return Ok(None);
            };
            match validate_color(&color) {
                Ok(color) => return Ok(Some(color)),
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }
    }

    /// Registers all territories interactively. `None` if input ran out.
    pub fn setup_config(&mut self, variant: Variant) -> io::Result<Option<GameConfig>> {
        let mut territories = Vec::with_capacity(BOARD_SIZE);
        for number in 1..=BOARD_SIZE {
            match self.prompt_territory(number, variant)? {
                Some(territory) => territories.push(territory),
                None => return Ok(None),
            }
        }

        let (player_color, target_color) = if variant.has_missions() {
            let Some(player) = self.prompt_color("Your army color: ")? else {
                return Ok(None);
            };
            let target = loop {
                let Some(target) = self.prompt_color("Enemy army color for missions: ")? else {
                    return Ok(None);
                };
                if target != player {
                    break target;
                }
                writeln!(self.output, "Error: the enemy must have a different color.")?;
            };
            (player, target)
        } else {
            let defaults = GameConfig::default();
            (defaults.player_color, defaults.target_color)
        };

        Ok(Some(GameConfig {
            variant,
            player_color,
            target_color,
            mission: None,
            territories,
        }))
    }

    pub fn show_map(&mut self, board: &Board) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(
            self.output,
            "| {:<4} | {:<25} | {:<20} | {:<8} |",
            "No.", "Territory", "Army", "Troops"
        )?;
        writeln!(self.output, "{RULE}")?;
        for (i, territory) in board.territories().iter().enumerate() {
            writeln!(
                self.output,
                "| {:<4} | {:<25} | {:<20} | {:<8} |",
                i + 1,
                territory.name,
                territory.army_color,
                territory.troops
            )?;
        }
        writeln!(self.output, "{RULE}")
    }

    pub fn show_battle(&mut self, report: &BattleReport) -> io::Result<()> {
        writeln!(self.output, "\n--- BATTLE ---")?;
        writeln!(
            self.output,
            "Attacker {} ({}) rolled {}",
            report.attacker.name, report.attacker.army_color, report.attack_roll
        )?;
        writeln!(
            self.output,
            "Defender {} ({}) rolled {}",
            report.defender.name, report.defender_previous_color, report.defense_roll
        )?;
        match report.outcome {
            BattleOutcome::Conquered => {
                writeln!(self.output, "The attacker won the battle!")?;
                writeln!(
                    self.output,
                    "*** {} was conquered by the {} army! ***",
                    report.defender.name, report.defender.army_color
                )?;
            }
            BattleOutcome::DefenderDamaged => {
                writeln!(self.output, "The attacker won the battle! The defender lost 1 troop.")?;
            }
            BattleOutcome::AttackerDamaged => {
                writeln!(self.output, "The defender held! The attacker lost 1 troop.")?;
            }
        }
        writeln!(
            self.output,
            "Troops now: {} {} / {} {}",
            report.attacker.name,
            report.attacker.troops,
            report.defender.name,
            report.defender.troops
        )
    }

    pub fn show_mission(&mut self, status: &MissionStatus) -> io::Result<()> {
        writeln!(self.output, "\nMission: {}", status.mission.description())?;
        match &status.mission {
            Mission::Eliminate { target_color } => writeln!(
                self.output,
                "Territories still held by {target_color}: {}",
                status.count
            )?,
            Mission::Conquer { .. } => writeln!(
                self.output,
                "Territories under your control: {}/{}",
                status.count, status.goal
            )?,
        }
        if status.satisfied {
            writeln!(self.output, "*** MISSION ACCOMPLISHED! You win! ***")
        } else {
            writeln!(self.output, "Mission not accomplished yet. Keep fighting!")
        }
    }

    pub fn show_odds(&mut self, game: &mut Game) -> io::Result<()> {
        let odds = game.calculate_conquer_probabilities();
        if odds.is_empty() {
            return writeln!(
                self.output,
                "\nNo territory can attack an enemy \
                 (at least {MIN_TROOPS_TO_ATTACK} troops needed)."
            );
        }
        writeln!(self.output, "\nChance to conquer by attacking until one side gives out:")?;
        for (from, to, percent) in odds {
            writeln!(self.output, "  {from} -> {to}: {percent:.2}%")?;
        }
        Ok(())
    }

    fn show_menu(&mut self, variant: Variant) -> io::Result<()> {
        writeln!(self.output, "\n=== MAIN MENU ===")?;
        if variant.allows_attacks() {
            writeln!(self.output, "1 - Attack")?;
        }
        if variant.has_missions() {
            writeln!(self.output, "2 - Check mission")?;
        }
        if variant.allows_attacks() {
            writeln!(self.output, "3 - Show conquest odds")?;
        }
        writeln!(self.output, "0 - Quit")?;
        writeln!(self.output, "=================")
    }

    fn menu_choice(choice: i64, variant: Variant) -> Option<MenuChoice> {
        match choice {
            0 => Some(MenuChoice::Exit),
            1 if variant.allows_attacks() => Some(MenuChoice::Attack),
            2 if variant.has_missions() => Some(MenuChoice::CheckMission),
            3 if variant.allows_attacks() => Some(MenuChoice::ShowOdds),
            _ => None,
        }
    }

    fn attack_phase(&mut self, game: &mut Game) -> io::Result<()> {
        writeln!(self.output, "\n=== ATTACK PHASE ===")?;
        let Selection::Territory(attacker) = self.choose_territory("ATTACKING", &game.board)?
        else {
            return Ok(());
        };
        if let Err(e) = game.board.validate_attacker(attacker) {
            return writeln!(self.output, "Error: {e}");
        }

        let Selection::Territory(defender) = self.choose_territory("DEFENDING", &game.board)?
        else {
            return Ok(());
        };
        if let Err(e) = game.board.validate_attack(attacker, defender) {
            return writeln!(self.output, "Error: {e}");
        }

        writeln!(self.output)?;
        for (role, index) in [("Attacker", attacker), ("Defender", defender)] {
            if let Some(t) = game.board.get_territory(index) {
                writeln!(
                    self.output,
                    "{role}: {} ({}, {} troops)",
                    t.name, t.army_color, t.troops
                )?;
            }
        }

        match game.attack(attacker, defender) {
            Ok(report) => self.show_battle(&report),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    /// Runs the menu loop until the player quits, wins, or input ends.
    pub fn run(&mut self, game: &mut Game) -> io::Result<()> {
        writeln!(self.output, "=== WAR: STRATEGIC BATTLES ===")?;
        if let Some(mission) = &game.mission {
            writeln!(
                self.output,
                "Your army: {}. Secret mission: {}",
                game.player_color,
                mission.description()
            )?;
        }

        loop {
            writeln!(self.output, "\n=== CURRENT MAP ===")?;
            self.show_map(&game.board)?;
            self.show_menu(game.variant)?;

            let Some(choice) = self.prompt_int("Your choice: ")? else {
                break;
            };
            let Some(choice) = Self::menu_choice(choice, game.variant) else {
                writeln!(self.output, "Invalid option! Try again.")?;
                continue;
            };
            debug!(?choice, "menu");

            match choice {
                MenuChoice::Attack => self.attack_phase(game)?,
                MenuChoice::CheckMission => {
                    match game.check_mission() {
                        Ok(status) => self.show_mission(&status)?,
                        Err(e) => {
                            writeln!(self.output, "Error: {e}")?;
                            writeln!(self.output, "Mission not accomplished yet.")?;
                        }
                    }
                    if game.mission_accomplished() {
                        break;
                    }
                }
                MenuChoice::ShowOdds => self.show_odds(game)?,
                MenuChoice::Exit => break,
            }
            self.pause()?;
        }

        writeln!(self.output, "Thanks for playing!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str, game: &mut Game) -> String {
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
        console.run(game).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    fn game(variant: Variant, mission: Option<u8>) -> Game {
        let config = GameConfig {
            variant,
            mission,
            ..GameConfig::default()
        };
        Game::new(&config, Some(11)).unwrap()
    }

    #[test]
    fn prompt_int_retries_until_a_number() {
        let mut console = Console::new(Cursor::new("abc\n\n 42 \n"), Vec::new());
        assert_eq!(console.prompt_int("> ").unwrap(), Some(42));
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out.matches("enter numbers only").count(), 2);
    }

    #[test]
    fn choose_territory_rejects_out_of_range_then_cancels() {
        let board = GameConfig::default().to_board().unwrap();
        let mut console = Console::new(Cursor::new("9\n0\n"), Vec::new());
        assert_eq!(
            console.choose_territory("ATTACKING", &board).unwrap(),
            Selection::Cancelled
        );
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("between 1 and 5"));
        assert!(out.contains("Operation cancelled."));
    }

    #[test]
    fn attack_session_fights_one_round() {
        let mut game = game(Variant::Attack, None);
        let out = session("1\n1\n2\n\n0\n", &mut game);
        assert_eq!(game.rounds_fought, 1);
        assert!(out.contains("Attacker: Brasil (Azul, 5 troops)"));
        assert!(out.contains("Defender: Argentina (Verde, 3 troops)"));
        assert!(out.contains("--- BATTLE ---"));
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn self_attack_is_reported_not_fought() {
        let mut game = game(Variant::Attack, None);
        let out = session("1\n2\n2\n\n0\n", &mut game);
        assert_eq!(game.rounds_fought, 0);
        assert!(out.contains("cannot attack itself"));
    }

    #[test]
    fn weak_attacker_is_turned_away_before_choosing_a_defender() {
        let mut game = game(Variant::Attack, None);
        game.board.territories[1].troops = 1;
        let out = session("1\n2\n\n0\n", &mut game);
        assert_eq!(game.rounds_fought, 0);
        assert!(out.contains("'Argentina' needs at least 2 troops to attack (has 1)"));
        assert!(!out.contains("DEFENDING"));
        assert!(!out.contains("Attacker:"));
    }

    #[test]
    fn basic_variant_hides_attacks() {
        let mut game = game(Variant::Basic, None);
        let out = session("1\n0\n", &mut game);
        assert!(out.contains("Invalid option!"));
        assert!(!out.contains("1 - Attack"));
    }

    #[test]
    fn mission_check_reports_progress() {
        let mut game = game(Variant::Mission, Some(1));
        let out = session("2\n\n0\n", &mut game);
        assert!(out.contains("Control at least 3 territories"));
        assert!(out.contains("Territories under your control: 1/3"));
        assert!(out.contains("not accomplished"));
    }

    #[test]
    fn unknown_mission_is_reported_and_play_continues() {
        let mut game = game(Variant::Mission, Some(5));
        let out = session("2\n\n1\n1\n2\n\n0\n", &mut game);
        assert!(out.contains("Unknown mission kind 5"));
        assert!(out.contains("Mission not accomplished yet."));
        assert_eq!(game.rounds_fought, 1);
    }

    #[test]
    fn accomplished_mission_ends_the_game() {
        let mut game = game(Variant::Mission, Some(1));
        for territory in game.board.territories.iter_mut().take(3) {
            territory.army_color = "Azul".to_string();
        }
        let out = session("2\n", &mut game);
        assert!(out.contains("MISSION ACCOMPLISHED"));
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let mut game = game(Variant::Attack, None);
        let out = session("", &mut game);
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn interactive_setup_builds_a_valid_config() {
        let script = "\
Brasil\nAzul\n1\n3\n\
Argentina\nVerde\n2\n\
Chile\nVermelho\n2\n\
Peru\nVerde\n4\n\
Colombia\nAzul\n2\n\
Azul\nAzul\nVerde\n";
        let mut console = Console::new(Cursor::new(script), Vec::new());
        let config = console.setup_config(Variant::Mission).unwrap().unwrap();
        assert_eq!(config.territories.len(), BOARD_SIZE);
        assert_eq!(config.territories[0].troops, 3);
        assert_eq!(config.player_color, "Azul");
        assert_eq!(config.target_color, "Verde");
        assert!(config.validate().is_ok());

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("at least 2 troops"));
        assert!(out.contains("different color"));
    }

    #[test]
    fn setup_stops_when_input_runs_out() {
        let mut console = Console::new(Cursor::new("Brasil\nAzul\n"), Vec::new());
        assert_eq!(console.setup_config(Variant::Attack).unwrap(), None);
    }

    #[test]
    fn setup_rejects_blank_and_overlong_text() {
        let long_color = "c".repeat(crate::territory::MAX_COLOR_LENGTH + 1);
        let script = format!("  \nAzul\nBrasil\n{long_color}\nBrasil\n Azul \n2\n");
        let mut console = Console::new(Cursor::new(script), Vec::new());
        let territory = console.prompt_territory(1, Variant::Attack).unwrap().unwrap();
        assert_eq!(territory.name, "Brasil");
        assert_eq!(territory.army_color, "Azul");

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Territory name must not be empty"));
        assert!(out.contains("is longer than 19 characters"));
    }
}
