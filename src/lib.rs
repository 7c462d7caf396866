// lib.rs
pub mod board;
pub mod combat;
pub mod console;
pub mod dice;
pub mod error;
pub mod game;
pub mod game_config;
pub mod mission;
pub mod odds;
pub mod selection;
pub mod territory;
