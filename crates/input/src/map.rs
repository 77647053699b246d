//! Line mapping from terminal input to player commands.

use crate::types::HintKind;

/// What a line of player input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Guess(String),
    Hint(HintKind),
    /// Show the current leaderboard.
    Leaderboard,
    Help,
    Quit,
    /// A `:` command nobody understands.
    Unknown(String),
}

/// Map one input line to a command. Blank lines map to nothing.
///
/// Lines starting with `:` are commands (`:1`, `:hint 2`, `:definition`,
/// `:board`, `:q`, `:help`); anything else is a guess, trimmed and lowercased.
pub fn parse_command(line: &str) -> Option<PlayerCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(PlayerCommand::Guess(line.to_lowercase()));
    };

    let command = command.trim();
    let arg = command
        .strip_prefix("hint")
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(command);

    match command.to_lowercase().as_str() {
        "q" | "quit" | "exit" => return Some(PlayerCommand::Quit),
        "h" | "help" | "?" => return Some(PlayerCommand::Help),
        "board" | "leaderboard" | "top" => return Some(PlayerCommand::Leaderboard),
        _ => {}
    }

    Some(match HintKind::from_str(arg) {
        Some(kind) => PlayerCommand::Hint(kind),
        None => PlayerCommand::Unknown(command.to_string()),
    })
}

/// Check if a line should end the session.
pub fn should_quit(line: &str) -> bool {
    matches!(parse_command(line), Some(PlayerCommand::Quit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guesses() {
        assert_eq!(parse_command("cats"), Some(PlayerCommand::Guess("cats".into())));
        assert_eq!(parse_command("  CATS \n"), Some(PlayerCommand::Guess("cats".into())));
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_hint_commands() {
        assert_eq!(parse_command(":1"), Some(PlayerCommand::Hint(HintKind::Speech)));
        assert_eq!(parse_command(":letter"), Some(PlayerCommand::Hint(HintKind::Letter)));
        assert_eq!(
            parse_command(":hint 3"),
            Some(PlayerCommand::Hint(HintKind::Definition))
        );
        assert_eq!(
            parse_command(": Definition"),
            Some(PlayerCommand::Hint(HintKind::Definition))
        );
    }

    #[test]
    fn test_control_commands() {
        assert_eq!(parse_command(":q"), Some(PlayerCommand::Quit));
        assert_eq!(parse_command(":QUIT"), Some(PlayerCommand::Quit));
        assert_eq!(parse_command(":help"), Some(PlayerCommand::Help));
        assert_eq!(parse_command(":hint"), Some(PlayerCommand::Unknown("hint".into())));
        assert_eq!(parse_command(":4"), Some(PlayerCommand::Unknown("4".into())));
    }

    #[test]
    fn test_leaderboard_command() {
        assert_eq!(parse_command(":board"), Some(PlayerCommand::Leaderboard));
        assert_eq!(parse_command(" :Leaderboard "), Some(PlayerCommand::Leaderboard));
        assert_eq!(parse_command("board"), Some(PlayerCommand::Guess("board".into())));
    }

    #[test]
    fn test_quit_lines() {
        assert!(should_quit(":q\n"));
        assert!(should_quit(":exit"));
        assert!(!should_quit("q"));
    }
}
