use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};

use holdem_digest::aggregate::{Aggregator, BucketKey, Contribution};
use holdem_digest::cards::Street;

fn at(second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 5, 24)
        .unwrap()
        .and_hms_milli_opt(10, 0, second, 0)
        .unwrap()
}

fn key(action: &str) -> BucketKey {
    BucketKey::new(Street::Flop, "2c,2d", "2h,Kh,Qh", action)
}

#[test]
fn test_first_contribution_creates_bucket() {
    let mut agg = Aggregator::new();
    assert!(agg.is_empty());
    agg.accumulate(key("raise"), 7.5);
    let bucket = agg.get(&key("raise")).unwrap();
    assert_relative_eq!(bucket.sum, 7.5);
    assert_eq!(bucket.count, 1);
    assert_eq!(agg.len(), 1);
}

#[test]
fn test_accumulation_commutative() {
    let orders: [[f64; 3]; 3] = [[5.0, 3.0, 10.0], [10.0, 5.0, 3.0], [3.0, 10.0, 5.0]];
    for order in orders {
        let mut agg = Aggregator::new();
        for metric in order {
            agg.accumulate(key("call"), metric);
        }
        let bucket = agg.get(&key("call")).unwrap();
        assert_relative_eq!(bucket.sum, 18.0);
        assert_eq!(bucket.count, 3);
        assert_relative_eq!(bucket.average(), 6.0);
    }
}

#[test]
fn test_keys_are_independent() {
    let mut agg = Aggregator::new();
    agg.accumulate(key("call"), 1.0);
    agg.accumulate(key("raise"), 2.0);
    agg.accumulate(BucketKey::new(Street::Turn, "2c,2d", "2h,3s,Kh,Qh", "call"), 3.0);
    assert_eq!(agg.len(), 3);
    assert_eq!(agg.get(&key("call")).unwrap().count, 1);
}

#[test]
fn test_negative_metrics_average() {
    let mut agg = Aggregator::new();
    agg.accumulate(key("call"), -200.0);
    agg.accumulate(key("call"), 100.0);
    assert_relative_eq!(agg.get(&key("call")).unwrap().average(), -50.0);
}

#[test]
fn test_record_dedups_by_action_time() {
    let mut agg = Aggregator::with_dedup();
    let first = Contribution {
        time: at(1),
        key: key("call"),
        metric: 4.0,
    };
    assert!(agg.record(first.clone()));
    assert!(!agg.record(first.clone()));
    assert!(agg.record(Contribution { time: at(2), ..first }));
    assert_eq!(agg.get(&key("call")).unwrap().count, 2);
}

#[test]
fn test_record_without_dedup_counts_everything() {
    let mut agg = Aggregator::new();
    let contribution = Contribution {
        time: at(1),
        key: key("call"),
        metric: 4.0,
    };
    let accepted = agg.absorb(vec![contribution.clone(), contribution]);
    assert_eq!(accepted, 2);
    assert_eq!(agg.get(&key("call")).unwrap().count, 2);
}

#[test]
fn test_buckets_sorted_by_street_then_key() {
    let mut agg = Aggregator::new();
    agg.accumulate(BucketKey::new(Street::River, "2c,2d", "2h,3s,4d,Kh,Qh", "call"), 1.0);
    agg.accumulate(BucketKey::new(Street::Preflop, "Ah,Kh", "", "raise"), 1.0);
    agg.accumulate(BucketKey::new(Street::Preflop, "2c,2d", "", "fold"), 1.0);
    let streets: Vec<Street> = agg.buckets().keys().map(|k| k.street).collect();
    assert_eq!(streets, vec![Street::Preflop, Street::Preflop, Street::River]);
    let first = agg.buckets().keys().next().unwrap();
    assert_eq!(first.cards, "2c,2d");
}
