use std::fmt;

use serde::Serialize;

use crate::error::{DigestError, DigestResult};

pub const CARD_SEPARATOR: &str = ",";
pub const HOLE_CARD_COUNT: usize = 2;
pub const CARD_TOKEN_WIDTH: usize = 2;

/// Betting round, derived from how many community cards are on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn from_board_len(len: usize) -> Option<Street> {
        match len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ALL_STREETS: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

/// Sorts tokens by raw byte order and joins them, so any permutation of the
/// same cards yields the same key.
pub fn canonicalize_cards<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    sorted.sort_unstable();
    sorted.join(CARD_SEPARATOR)
}

/// Re-sorts a separator-joined card string. Already-canonical input is returned unchanged.
pub fn recanonicalize(cards: &str) -> String {
    let tokens: Vec<&str> = cards
        .split(CARD_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    canonicalize_cards(&tokens)
}

/// Exactly two cards, each rendered in a fixed token width.
pub fn is_valid_hole_cards(canonical: &str) -> bool {
    let tokens: Vec<&str> = canonical.split(CARD_SEPARATOR).collect();
    tokens.len() == HOLE_CARD_COUNT && tokens.iter().all(|t| t.chars().count() == CARD_TOKEN_WIDTH)
}

pub fn canonical_hole_cards<S: AsRef<str>>(tokens: &[S]) -> DigestResult<String> {
    let canonical = canonicalize_cards(tokens);
    if is_valid_hole_cards(&canonical) {
        Ok(canonical)
    } else {
        Err(DigestError::InvalidHandShape(canonical))
    }
}

/// Canonical board plus the street it implies.
pub fn canonical_board<S: AsRef<str>>(tokens: &[S]) -> DigestResult<(String, Street)> {
    let street = Street::from_board_len(tokens.len())
        .ok_or(DigestError::InvalidBoardShape(tokens.len()))?;
    Ok((canonicalize_cards(tokens), street))
}

pub fn suit_symbol(suit: char) -> Option<&'static str> {
    match suit.to_ascii_lowercase() {
        's' => Some("\u{2660}"),
        'h' => Some("\u{2665}"),
        'd' => Some("\u{2666}"),
        'c' => Some("\u{2663}"),
        _ => None,
    }
}
