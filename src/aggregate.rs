use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;

use crate::cards::Street;
use crate::event::ActionEvent;

/// Situation signature of one accumulation row.
///
/// Field order is the report order: street, then cards, board and action.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub street: Street,
    pub cards: String,
    pub board: String,
    pub action: String,
}

impl BucketKey {
    pub fn new(street: Street, cards: &str, board: &str, action: &str) -> BucketKey {
        BucketKey {
            street,
            cards: cards.to_string(),
            board: board.to_string(),
            action: action.to_string(),
        }
    }

    pub fn for_action(action: &ActionEvent) -> BucketKey {
        BucketKey::new(action.street, &action.cards, &action.board, &action.action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub sum: f64,
    pub count: u64,
}

impl Bucket {
    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// One correlated action's outcome, ready to be accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub time: NaiveDateTime,
    pub key: BucketKey,
    pub metric: f64,
}

#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    buckets: BTreeMap<BucketKey, Bucket>,
    seen: HashSet<NaiveDateTime>,
    dedup: bool,
}

impl Aggregator {
    pub fn new() -> Aggregator {
        Aggregator::default()
    }

    /// Keeps at most one contribution per action timestamp across all sources,
    /// so re-reading a rotated or copied log does not count actions twice.
    pub fn with_dedup() -> Aggregator {
        Aggregator {
            dedup: true,
            ..Aggregator::default()
        }
    }

    pub fn accumulate(&mut self, key: BucketKey, metric: f64) {
        self.buckets
            .entry(key)
            .and_modify(|b| {
                b.sum += metric;
                b.count += 1;
            })
            .or_insert(Bucket { sum: metric, count: 1 });
    }

    /// Returns `false` when the contribution was dropped as a duplicate.
    pub fn record(&mut self, contribution: Contribution) -> bool {
        if self.dedup && !self.seen.insert(contribution.time) {
            return false;
        }
        self.accumulate(contribution.key, contribution.metric);
        true
    }

    pub fn absorb<I>(&mut self, contributions: I) -> usize
    where
        I: IntoIterator<Item = Contribution>,
    {
        let mut accepted = 0;
        for contribution in contributions {
            if self.record(contribution) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn get(&self, key: &BucketKey) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    pub fn buckets(&self) -> &BTreeMap<BucketKey, Bucket> {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
