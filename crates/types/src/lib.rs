//! Core types module - shared data structures and rule constants
//!
//! Everything here is plain data with no external dependencies, so the same
//! types can be used by the round engine, the HTTP client and the terminal
//! runner.
//!
//! # Round Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_LETTERS` | 3 | Shortest selectable word |
//! | `MAX_LETTERS` | 6 | Longest selectable word |
//! | `MAX_GUESSES` | 8 | Guesses available per round |
//! | `TICK_MS` | 1000 | Timer cadence while a round is active |
//! | `POINTS_PER_LETTER` | 3 | Word score multiplier |
//!
//! # Time Bonus
//!
//! Bonus tiers are `[lower, upper)` second ranges; a solve at exactly 5, 10 or
//! 15 seconds drops into the next lower tier.
//!
//! | Elapsed | Bonus |
//! |---------|-------|
//! | 0-4s | 15 |
//! | 5-9s | 10 |
//! | 10-14s | 5 |
//! | 15s+ | 0 |
//!
//! # Examples
//!
//! ```
//! use word_scramble_types::{HintKind, HintSet, RoundPhase};
//!
//! let mut hints = HintSet::empty();
//! assert!(hints.insert(HintKind::Letter));
//! assert!(!hints.insert(HintKind::Letter));
//! assert_eq!(hints.penalty(), 2);
//!
//! assert_eq!(HintKind::from_str("definition"), Some(HintKind::Definition));
//! assert!(RoundPhase::Solved.is_terminal());
//! ```

use std::fmt;

/// Shortest word a round can be played with.
pub const MIN_LETTERS: u8 = 3;

/// Longest word a round can be played with.
pub const MAX_LETTERS: u8 = 6;

/// Guesses available in a single round.
pub const MAX_GUESSES: u8 = 8;

/// Timer cadence in milliseconds while a round is active.
pub const TICK_MS: u64 = 1000;

/// Word score is `letters * POINTS_PER_LETTER`.
pub const POINTS_PER_LETTER: i32 = 3;

/// Time bonus tiers as `(exclusive upper bound in seconds, bonus)`.
///
/// The first tier whose bound is greater than the elapsed seconds wins; past the
/// last tier the bonus is zero.
pub const TIME_BONUS_TIERS: [(u64, i32); 3] = [(5, 15), (10, 10), (15, 5)];


/// The three hint tiers a player can buy during a round.
///
/// - **Speech**: part of speech of the target word (costs 1)
/// - **Letter**: first letter of the target word (costs 2)
/// - **Definition**: dictionary definition (costs 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKind {
    Speech,
    Letter,
    Definition,
}

impl HintKind {
    pub const ALL: [HintKind; 3] = [HintKind::Speech, HintKind::Letter, HintKind::Definition];

    /// Points deducted from a solved round's score when this hint was used.
    pub fn cost(&self) -> i32 {
        match self {
            HintKind::Speech => 1,
            HintKind::Letter => 2,
            HintKind::Definition => 4,
        }
    }

    /// Parse from player-facing names or tier numbers (case-insensitive).
    ///
    /// ```
    /// use word_scramble_types::HintKind;
    ///
    /// assert_eq!(HintKind::from_str("2"), Some(HintKind::Letter));
    /// assert_eq!(HintKind::from_str("Speech"), Some(HintKind::Speech));
    /// assert_eq!(HintKind::from_str("colour"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "speech" | "pos" => Some(HintKind::Speech),
            "2" | "letter" | "first" => Some(HintKind::Letter),
            "3" | "definition" | "def" => Some(HintKind::Definition),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HintKind::Speech => "speech",
            HintKind::Letter => "letter",
            HintKind::Definition => "definition",
        }
    }

    /// Text shown in place of the hint when the hint service could not answer.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            HintKind::Speech => "Unknown",
            HintKind::Letter => "?",
            HintKind::Definition => "No definition available",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            HintKind::Speech => 0b001,
            HintKind::Letter => 0b010,
            HintKind::Definition => 0b100,
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of hints used in a round. Only ever grows while the round is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HintSet {
    bits: u8,
}

impl HintSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn all() -> Self {
        HintKind::ALL.iter().copied().collect()
    }

    /// Add a hint; returns `false` if it was already present.
    pub fn insert(&mut self, kind: HintKind) -> bool {
        let had = self.contains(kind);
        self.bits |= kind.bit();
        !had
    }

    pub fn contains(&self, kind: HintKind) -> bool {
        self.bits & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Used hints in tier order.
    pub fn iter(&self) -> impl Iterator<Item = HintKind> + '_ {
        HintKind::ALL.into_iter().filter(|k| self.contains(*k))
    }

    /// Sum of the costs of every used hint (positive; subtracted by scoring).
    pub fn penalty(&self) -> i32 {
        self.iter().map(|k| k.cost()).sum()
    }
}

impl FromIterator<HintKind> for HintSet {
    fn from_iter<I: IntoIterator<Item = HintKind>>(iter: I) -> Self {
        let mut set = HintSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Round lifecycle phase.
///
/// `Idle -> Active -> {Solved, Exhausted}`; the terminal phases are never left
/// except by starting a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    Active,
    Solved,
    Exhausted,
}

impl RoundPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, RoundPhase::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Solved | RoundPhase::Exhausted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Active => "active",
            RoundPhase::Solved => "solved",
            RoundPhase::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accuracy figures reported by the accuracy service after a round (percent).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accuracy {
    /// Rounds solved out of rounds played.
    pub completion: f64,
    /// `100 / guesses` for the round just played.
    pub round_accuracy: f64,
    /// Mean round accuracy over the session.
    pub game_accuracy: f64,
}

/// One ranked line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub score: i32,
}

impl LeaderboardEntry {
    /// Parse a `"<rank>. <name>, <score>"` line.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let (rank, rest) = line.split_once(". ")?;
        let (name, score) = rest.rsplit_once(", ")?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            rank: rank.trim().parse().ok()?,
            name: name.to_string(),
            score: score.trim().parse().ok()?,
        })
    }

    /// Parse a newline-delimited listing, skipping lines that are not entries.
    pub fn parse_listing(text: &str) -> Vec<Self> {
        text.lines().filter_map(Self::parse_line).collect()
    }
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}, {}", self.rank, self.name, self.score)
    }
}
