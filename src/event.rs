use chrono::NaiveDateTime;

use crate::cards::Street;
use crate::table::TableSnapshot;

/// One player decision, with its situational key already canonicalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
    pub time: NaiveDateTime,
    pub table: TableSnapshot,
    pub cards: String,
    pub board: String,
    pub street: Street,
    pub action: String,
    pub player: String,
    /// Acting player's stack when the action was logged.
    pub chips: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinningHand {
    pub rank: f64,
    pub message: Option<String>,
}

/// A player's state once the round has been settled.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalState {
    pub name: String,
    pub chips: i64,
    pub winner: Option<WinningHand>,
}

impl FinalState {
    pub fn is_winner(&self) -> bool {
        self.winner.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettlementEvent {
    pub time: NaiveDateTime,
    pub table: TableSnapshot,
    pub players: Vec<FinalState>,
}

impl SettlementEvent {
    pub fn find_player(&self, name: &str) -> Option<&FinalState> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn find_winner(&self, name: &str) -> Option<&WinningHand> {
        self.find_player(name).and_then(|p| p.winner.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    Action(ActionEvent),
    Settlement(SettlementEvent),
}
