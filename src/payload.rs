//! JSON payloads of `SHOW_ACTION` / `GAME_OVER` events and their conversion
//! into typed events.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::cards::{canonical_board, canonical_hole_cards};
use crate::error::{DigestError, DigestResult};
use crate::event::{ActionEvent, DecodedEvent, FinalState, SettlementEvent, WinningHand};
use crate::logline::{EventKind, EventLine};
use crate::table::TableSnapshot;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Record {
    pub data: Option<Data>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Data {
    pub players: Option<Vec<PlayerEntry>>,
    pub table: Option<TableEntry>,
    pub action: Option<ActionEntry>,
    pub winners: Option<Vec<WinnerEntry>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerEntry {
    pub player_name: Option<String>,
    pub chips: i64,
    pub cards: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TableEntry {
    pub table_number: i64,
    pub board: Option<Vec<String>>,
    pub small_blind: Option<BlindEntry>,
    pub big_blind: Option<BlindEntry>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlindEntry {
    pub player_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionEntry {
    pub action: Option<String>,
    pub player_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WinnerEntry {
    pub player_name: Option<String>,
    pub hand: Option<HandEntry>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct HandEntry {
    pub rank: Option<f64>,
    pub message: Option<String>,
}

fn malformed(what: &str) -> DigestError {
    DigestError::MalformedPayload(format!("missing {}", what))
}

impl TableEntry {
    fn snapshot(&self) -> DigestResult<TableSnapshot> {
        let small = self
            .small_blind
            .as_ref()
            .and_then(|b| b.player_name.as_deref())
            .ok_or_else(|| malformed("table.smallBlind"))?;
        let big = self
            .big_blind
            .as_ref()
            .and_then(|b| b.player_name.as_deref())
            .ok_or_else(|| malformed("table.bigBlind"))?;
        Ok(TableSnapshot::new(self.table_number, small, big))
    }
}

impl PlayerEntry {
    fn name(&self) -> DigestResult<&str> {
        self.player_name.as_deref().ok_or_else(|| malformed("players[].playerName"))
    }

    fn hole_cards(&self) -> DigestResult<String> {
        canonical_hole_cards(self.cards.as_deref().unwrap_or_default())
    }
}

impl Data {
    fn table(&self) -> DigestResult<&TableEntry> {
        self.table.as_ref().ok_or_else(|| malformed("table"))
    }

    /// Every listed player must hold a well-formed two-card hand.
    fn checked_players(&self) -> DigestResult<Vec<(&PlayerEntry, String)>> {
        let players = self.players.as_ref().ok_or_else(|| malformed("players"))?;
        players
            .iter()
            .map(|p| p.hole_cards().map(|cards| (p, cards)))
            .collect()
    }

    pub fn into_action(self, time: NaiveDateTime) -> DigestResult<ActionEvent> {
        let players = self.checked_players()?;
        let table = self.table()?;
        let snapshot = table.snapshot()?;
        let (board, street) = canonical_board(table.board.as_deref().unwrap_or_default())?;

        let action = self.action.as_ref().ok_or_else(|| malformed("action"))?;
        let label = action.action.as_deref().ok_or_else(|| malformed("action.action"))?;
        let actor = action.player_name.as_deref().ok_or_else(|| malformed("action.playerName"))?;

        let (player, cards) = players
            .into_iter()
            .find(|(p, _)| p.player_name.as_deref() == Some(actor))
            .ok_or_else(|| {
                DigestError::MalformedPayload(format!("acting player {} not seated", actor))
            })?;

        Ok(ActionEvent {
            time,
            table: snapshot,
            cards,
            board,
            street,
            action: label.to_string(),
            player: actor.to_string(),
            chips: player.chips,
        })
    }

    pub fn into_settlement(self, time: NaiveDateTime) -> DigestResult<SettlementEvent> {
        let players = self.checked_players()?;
        let snapshot = self.table()?.snapshot()?;
        let winners = self.winners.as_deref().unwrap_or_default();

        let players = players
            .into_iter()
            .map(|(p, _)| -> DigestResult<FinalState> {
                let name = p.name()?;
                // A win without a hand-strength score carries no rank.
                let winner = winners
                    .iter()
                    .find(|w| w.player_name.as_deref() == Some(name))
                    .and_then(|w| w.hand.as_ref())
                    .and_then(|hand| {
                        Some(WinningHand {
                            rank: hand.rank?,
                            message: hand.message.clone(),
                        })
                    });
                Ok(FinalState {
                    name: name.to_string(),
                    chips: p.chips,
                    winner,
                })
            })
            .collect::<DigestResult<Vec<_>>>()?;

        Ok(SettlementEvent {
            time,
            table: snapshot,
            players,
        })
    }
}

pub fn parse_record(json: &str) -> DigestResult<Record> {
    serde_json::from_str(json).map_err(|e| DigestError::MalformedPayload(e.to_string()))
}

/// `Ok(None)` for event kinds the digest does not track.
pub fn decode(event: &EventLine<'_>) -> DigestResult<Option<DecodedEvent>> {
    if !event.kind.is_tracked() {
        return Ok(None);
    }
    let record = parse_record(event.payload)?;
    let data = record.data.ok_or_else(|| malformed("data"))?;
    let decoded = match event.kind {
        EventKind::ShowAction => DecodedEvent::Action(data.into_action(event.time)?),
        EventKind::GameOver => DecodedEvent::Settlement(data.into_settlement(event.time)?),
        EventKind::Other(_) => return Ok(None),
    };
    Ok(Some(decoded))
}
