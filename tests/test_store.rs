use chrono::{NaiveDate, NaiveDateTime};

use holdem_digest::cards::Street;
use holdem_digest::event::{ActionEvent, DecodedEvent, FinalState, SettlementEvent};
use holdem_digest::store::EventStore;
use holdem_digest::table::TableSnapshot;

fn at(second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 5, 24)
        .unwrap()
        .and_hms_milli_opt(10, 0, second, 0)
        .unwrap()
}

fn action(second: u32, label: &str) -> DecodedEvent {
    DecodedEvent::Action(ActionEvent {
        time: at(second),
        table: TableSnapshot::new(1, "A", "B"),
        cards: "2c,2d".to_string(),
        board: String::new(),
        street: Street::Preflop,
        action: label.to_string(),
        player: "A".to_string(),
        chips: 1000,
    })
}

fn settlement(second: u32, chips: i64) -> DecodedEvent {
    DecodedEvent::Settlement(SettlementEvent {
        time: at(second),
        table: TableSnapshot::new(1, "A", "B"),
        players: vec![FinalState {
            name: "A".to_string(),
            chips,
            winner: None,
        }],
    })
}

#[test]
fn test_ingest_partitions_by_kind() {
    let store = EventStore::ingest(vec![
        action(1, "call"),
        settlement(2, 900),
        action(3, "raise"),
    ]);
    assert_eq!(store.action_count(), 2);
    assert_eq!(store.settlement_count(), 1);
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
}

#[test]
fn test_actions_in_time_order() {
    let store = EventStore::ingest(vec![action(5, "fold"), action(1, "call"), action(3, "raise")]);
    let labels: Vec<&str> = store.actions_in_time_order().map(|a| a.action.as_str()).collect();
    assert_eq!(labels, vec!["call", "raise", "fold"]);
}

#[test]
fn test_same_timestamp_last_write_wins() {
    let store = EventStore::ingest(vec![action(1, "call"), action(1, "raise")]);
    assert_eq!(store.action_count(), 1);
    assert_eq!(store.actions_in_time_order().next().unwrap().action, "raise");
}

#[test]
fn test_action_and_settlement_may_share_timestamp() {
    let store = EventStore::ingest(vec![action(1, "call"), settlement(1, 900)]);
    assert_eq!(store.action_count(), 1);
    assert_eq!(store.settlement_count(), 1);
}

#[test]
fn test_settlements_after_is_strict_and_ascending() {
    let store = EventStore::ingest(vec![
        settlement(4, 400),
        settlement(2, 200),
        settlement(3, 300),
        settlement(1, 100),
    ]);
    let chips: Vec<i64> = store
        .settlements_after(at(2))
        .map(|s| s.players[0].chips)
        .collect();
    assert_eq!(chips, vec![300, 400]);
    assert_eq!(store.settlements_after(at(4)).count(), 0);
}

#[test]
fn test_empty_store() {
    let store = EventStore::ingest(Vec::new());
    assert!(store.is_empty());
    assert_eq!(store.actions_in_time_order().count(), 0);
    assert_eq!(store.settlements_after(at(0)).count(), 0);
}
