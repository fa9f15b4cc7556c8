use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::aggregate::{Bucket, BucketKey};
use crate::cards::Street;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub street: Street,
    pub cards: String,
    pub board: String,
    pub action: String,
    pub average: f64,
    pub count: u64,
}

impl Row {
    pub fn new(key: &BucketKey, bucket: &Bucket) -> Row {
        Row {
            street: key.street,
            cards: key.cards.clone(),
            board: key.board.clone(),
            action: key.action.clone(),
            average: bucket.average(),
            count: bucket.count,
        }
    }

    fn same_situation(&self, other: &Row) -> bool {
        self.street == other.street && self.cards == other.cards && self.board == other.board
    }
}

pub type Report = BTreeMap<Street, Vec<Row>>;

fn sorted(buckets: &BTreeMap<BucketKey, Bucket>) -> impl Iterator<Item = Row> + '_ {
    // BTreeMap iteration is already (street, cards, board, action) ascending.
    buckets.iter().map(|(key, bucket)| Row::new(key, bucket))
}

/// Every bucket as its own row.
pub fn dump(buckets: &BTreeMap<BucketKey, Bucket>) -> Report {
    let mut report = Report::new();
    for row in sorted(buckets) {
        report.entry(row.street).or_default().push(row);
    }
    report
}

/// One row per (street, cards, board): the action with the highest average.
///
/// Equal averages keep the earlier row, i.e. the lexically-first action.
pub fn collapse(buckets: &BTreeMap<BucketKey, Bucket>) -> Report {
    let mut report = Report::new();
    for (street, group) in &sorted(buckets).chunk_by(|row| row.street) {
        let mut rows = Vec::new();
        let mut best: Option<Row> = None;
        for row in group {
            best = match best.take() {
                Some(current) if current.same_situation(&row) => {
                    if row.average > current.average {
                        Some(row)
                    } else {
                        Some(current)
                    }
                }
                Some(current) => {
                    rows.push(current);
                    Some(row)
                }
                None => Some(row),
            };
        }
        rows.extend(best);
        report.insert(street, rows);
    }
    report
}

pub fn row_count(report: &Report) -> usize {
    report.values().map(Vec::len).sum()
}
