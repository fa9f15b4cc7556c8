use std::fs;

use serde_json::{json, Value};
use tempfile::tempdir;

use holdem_digest::book::DecisionBook;
use holdem_digest::cli::run_with_args;

fn line(second: u32, event: &str, payload: Value) -> String {
    format!(
        "[2018-05-24T10:00:{:02}.000] [INFO] userDebugLog - 2018-05-24 10:00:{:02} 0 : >>> event {} >>> {}",
        second, second, event, payload
    )
}

fn round(start: u32, action: &str, winner_rank: Option<f64>) -> Vec<String> {
    let table = json!({
        "tableNumber": 3,
        "board": [],
        "smallBlind": { "playerName": "A" },
        "bigBlind": { "playerName": "B" }
    });
    let players = json!([
        { "playerName": "A", "chips": 500, "cards": ["Ah", "Kh"] },
        { "playerName": "B", "chips": 500, "cards": ["7c", "2d"] }
    ]);
    let winners = match winner_rank {
        Some(rank) => json!([{ "playerName": "A", "hand": { "rank": rank } }]),
        None => json!([{ "playerName": "B", "hand": { "rank": 1.0 } }]),
    };
    vec![
        line(
            start,
            "SHOW_ACTION",
            json!({ "data": { "table": table, "players": players, "action": { "action": action, "playerName": "A" } } }),
        ),
        line(
            start + 1,
            "GAME_OVER",
            json!({ "data": { "table": table, "players": players, "winners": winners } }),
        ),
    ]
}

#[test]
fn test_run_writes_collapsed_csv() {
    let dir = tempdir().unwrap();
    let mut lines = round(1, "call", Some(4.0));
    lines.extend(round(3, "raise", Some(6.0)));
    lines.extend(round(5, "raise", None));
    lines.extend(round(7, "raise", Some(10.0)));
    fs::write(dir.path().join("table.log"), lines.join("\n")).unwrap();

    let output = dir.path().join("parsed.csv");
    run_with_args(vec![
        "digest".to_string(),
        "run".to_string(),
        dir.path().display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ]);

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "Cards,Board,Action,AverageRank,Count\n\"Ah,Kh\",\"\",raise,8,2\n"
    );

    let book = DecisionBook::load(&output).unwrap();
    assert_eq!(book.decision("Kh,Ah", ""), Some("raise"));
}

#[test]
fn test_run_raw_json() {
    let dir = tempdir().unwrap();
    let mut lines = round(1, "call", Some(4.0));
    lines.extend(round(3, "raise", Some(6.0)));
    fs::write(dir.path().join("table.log"), lines.join("\n")).unwrap();

    let output = dir.path().join("parsed.json");
    run_with_args(vec![
        "digest".to_string(),
        "run".to_string(),
        dir.path().display().to_string(),
        "--raw".to_string(),
        "--format".to_string(),
        "json".to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ]);

    let rows: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["action"], "call");
    assert_eq!(rows[0]["street"], "preflop");
    assert_eq!(rows[1]["action"], "raise");
    assert_eq!(rows[1]["count"], 1);
}
