use std::fs;

use approx::assert_relative_eq;
use tempfile::tempdir;

use holdem_digest::book::{split_record, DecisionBook};
use holdem_digest::error::DigestError;

const CSV: &str = "Cards,Board,Action,AverageRank,Count
\"7C,7D\",\"8C,KH,QS,TH\",check,19.2367992401123,1
\"5C,AS\",\"8C,KH,QS,TH\",fold,3,4
\"2c,2d\",\"\",raise,7.5,2
";

#[test]
fn test_split_record_quoted_fields() {
    assert_eq!(
        split_record("\"7C,7D\",\"8C,KH\",check,1.5,2"),
        vec!["7C,7D", "8C,KH", "check", "1.5", "2"]
    );
    assert_eq!(split_record("a,\"b \"\"x\"\"\",c"), vec!["a", "b \"x\"", "c"]);
    assert_eq!(split_record("\"\",x"), vec!["", "x"]);
}

#[test]
fn test_lookup_exact_key() {
    let book = DecisionBook::parse(CSV).unwrap();
    assert_eq!(book.len(), 3);
    assert_eq!(book.decision("7C,7D", "8C,KH,QS,TH"), Some("check"));
    assert_eq!(book.decision("5C,AS", "8C,KH,QS,TH"), Some("fold"));
}

#[test]
fn test_lookup_any_card_order() {
    let book = DecisionBook::parse(CSV).unwrap();
    assert_eq!(book.decision("7D,7C", "TH,QS,KH,8C"), Some("check"));
    assert_eq!(book.decision("2d, 2c", ""), Some("raise"));
}

#[test]
fn test_lookup_details() {
    let book = DecisionBook::parse(CSV).unwrap();
    let decision = book.lookup("2c,2d", "").unwrap();
    assert_relative_eq!(decision.average, 7.5);
    assert_eq!(decision.count, 2);
}

#[test]
fn test_lookup_missing() {
    let book = DecisionBook::parse(CSV).unwrap();
    assert!(book.decision("Ah,Ad", "").is_none());
    assert!(book.decision("7C,7D", "").is_none());
}

#[test]
fn test_header_only_book_is_empty() {
    let book = DecisionBook::parse("Cards,Board,Action,AverageRank,Count\n").unwrap();
    assert!(book.is_empty());
}

#[test]
fn test_invalid_book_line() {
    let err = DecisionBook::parse("Cards,Board,Action,AverageRank,Count\n\"2c,2d\",\"\",raise\n").unwrap_err();
    assert!(matches!(err, DigestError::InvalidBook { line: 2, .. }));

    let err = DecisionBook::parse("header\n\"2c,2d\",\"\",raise,high,2\n").unwrap_err();
    assert!(matches!(err, DigestError::InvalidBook { line: 2, .. }));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("parsed.csv");
    fs::write(&path, CSV).unwrap();
    let book = DecisionBook::load(&path).unwrap();
    assert_eq!(book.decision("7C,7D", "8C,KH,QS,TH"), Some("check"));

    assert!(DecisionBook::load(&dir.path().join("missing.csv")).is_err());
}
