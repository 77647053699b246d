//! Per-guess diagnostics returned by the checker.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::MAX_LETTERS;

/// One letter's position verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMark {
    /// Letter sits where it belongs (`*`).
    Correct,
    /// Letter is elsewhere in the target word or absent (`-`).
    Misplaced,
}

impl PositionMark {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(PositionMark::Correct),
            '-' => Some(PositionMark::Misplaced),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            PositionMark::Correct => '*',
            PositionMark::Misplaced => '-',
        }
    }
}

/// Position code for a whole guess, one mark per letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PositionFeedback {
    marks: ArrayVec<PositionMark, { MAX_LETTERS as usize }>,
}

impl PositionFeedback {
    /// Parse a code such as `"*--*"`. Returns `None` for unknown symbols or
    /// codes longer than the longest playable word.
    pub fn parse(code: &str) -> Option<Self> {
        let mut marks = ArrayVec::new();
        for c in code.trim().chars() {
            marks.try_push(PositionMark::from_char(c)?).ok()?;
        }
        Some(Self { marks })
    }

    pub fn marks(&self) -> &[PositionMark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn correct_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| **m == PositionMark::Correct)
            .count()
    }
}

impl fmt::Display for PositionFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.marks {
            write!(f, "{}", mark.as_char())?;
        }
        Ok(())
    }
}

/// Share of letters in the right position, as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Similarity {
    percent: f64,
}

impl Similarity {
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }

    /// Parse `"75.00%"` (the `%` is optional).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let number = s.strip_suffix('%').unwrap_or(s).trim();
        let percent: f64 = number.parse().ok()?;
        if !(0.0..=100.0).contains(&percent) {
            return None;
        }
        Some(Self { percent })
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent)
    }
}

/// The checker's answer for one guess.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckVerdict {
    pub correct: bool,
    pub feedback: PositionFeedback,
    pub similarity: Similarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_code() {
        let fb = PositionFeedback::parse("*--*").unwrap();
        assert_eq!(fb.len(), 4);
        assert_eq!(fb.correct_count(), 2);
        assert_eq!(fb.marks()[1], PositionMark::Misplaced);
        assert_eq!(fb.to_string(), "*--*");
    }

    #[test]
    fn test_reject_unknown_symbols_and_long_codes() {
        assert!(PositionFeedback::parse("*x*").is_none());
        assert!(PositionFeedback::parse("*******").is_none());
        assert!(PositionFeedback::parse("Input words have different lengths").is_none());
    }

    #[test]
    fn test_parse_similarity() {
        let s = Similarity::parse("75.00%").unwrap();
        assert_eq!(s.percent(), 75.0);
        assert_eq!(s.to_string(), "75.00%");

        assert_eq!(Similarity::parse("33.333").unwrap().to_string(), "33.33%");
        assert!(Similarity::parse("abc%").is_none());
        assert!(Similarity::parse("120%").is_none());
    }
}
