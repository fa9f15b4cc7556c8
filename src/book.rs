//! Looks up the best recorded action for a hand and board in a collapsed
//! digest CSV.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::cards::recanonicalize;
use crate::error::{DigestError, DigestResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: String,
    pub average: f64,
    pub count: u64,
}

#[derive(Debug, Default)]
pub struct DecisionBook {
    decisions: HashMap<String, Decision>,
}

fn book_key(cards: &str, board: &str) -> String {
    format!("{};{}", cards, board)
}

/// Splits one CSV record, honouring double-quoted fields.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

impl DecisionBook {
    pub fn parse(csv: &str) -> DigestResult<DecisionBook> {
        let mut decisions = HashMap::new();
        for (n, line) in csv.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let invalid = |reason: &str| DigestError::InvalidBook {
                line: n + 1,
                reason: reason.to_string(),
            };
            let fields = split_record(line);
            let [cards, board, action, average, count] = fields.as_slice() else {
                return Err(invalid("expected 5 fields"));
            };
            let average = average.parse::<f64>().map_err(|_| invalid("average is not a number"))?;
            let count = count.parse::<u64>().map_err(|_| invalid("count is not an integer"))?;
            decisions.insert(
                book_key(cards, board),
                Decision {
                    action: action.clone(),
                    average,
                    count,
                },
            );
        }
        Ok(DecisionBook { decisions })
    }

    pub fn load(path: &Path) -> DigestResult<DecisionBook> {
        let csv = fs::read_to_string(path).map_err(|source| DigestError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        DecisionBook::parse(&csv)
    }

    /// Cards and board may be given in any order.
    pub fn lookup(&self, cards: &str, board: &str) -> Option<&Decision> {
        self.decisions
            .get(&book_key(&recanonicalize(cards), &recanonicalize(board)))
    }

    pub fn decision(&self, cards: &str, board: &str) -> Option<&str> {
        self.lookup(cards, board).map(|d| d.action.as_str())
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
