use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::NaiveDateTime;

use crate::event::{ActionEvent, DecodedEvent, SettlementEvent};

/// Time-ordered events of one log source.
///
/// Each kind is keyed by timestamp; a later event with the same timestamp
/// replaces the earlier one.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    actions: BTreeMap<NaiveDateTime, ActionEvent>,
    settlements: BTreeMap<NaiveDateTime, SettlementEvent>,
}

impl EventStore {
    pub fn new() -> EventStore {
        EventStore::default()
    }

    pub fn ingest<I>(events: I) -> EventStore
    where
        I: IntoIterator<Item = DecodedEvent>,
    {
        let mut store = EventStore::new();
        for event in events {
            store.insert(event);
        }
        store
    }

    pub fn insert(&mut self, event: DecodedEvent) {
        match event {
            DecodedEvent::Action(a) => {
                self.actions.insert(a.time, a);
            }
            DecodedEvent::Settlement(s) => {
                self.settlements.insert(s.time, s);
            }
        }
    }

    pub fn actions_in_time_order(&self) -> impl Iterator<Item = &ActionEvent> + '_ {
        self.actions.values()
    }

    /// Settlements strictly later than `time`, oldest first.
    pub fn settlements_after(&self, time: NaiveDateTime) -> impl Iterator<Item = &SettlementEvent> + '_ {
        self.settlements
            .range((Bound::Excluded(time), Bound::Unbounded))
            .map(|(_, s)| s)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn settlement_count(&self) -> usize {
        self.settlements.len()
    }

    pub fn len(&self) -> usize {
        self.actions.len() + self.settlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.settlements.is_empty()
    }
}
