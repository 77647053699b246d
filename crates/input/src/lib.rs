//! Terminal input module (engine-facing).
//!
//! Maps lines typed by the player into [`map::PlayerCommand`]s. Independent of
//! any terminal library; the runner owns stdin.

pub mod map;

pub use word_scramble_types as types;

pub use map::{parse_command, should_quit, PlayerCommand};
