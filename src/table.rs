use std::fmt;

/// The identifying part of a table as seen in one event.
///
/// Table numbers are reused by unrelated sessions, so a seating is the table
/// number together with the two players posting the blinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableSnapshot {
    pub table_number: i64,
    pub small_blind: String,
    pub big_blind: String,
}

impl TableSnapshot {
    pub fn new(table_number: i64, small_blind: &str, big_blind: &str) -> TableSnapshot {
        TableSnapshot {
            table_number,
            small_blind: small_blind.to_string(),
            big_blind: big_blind.to_string(),
        }
    }

    pub fn same_seating(&self, other: &TableSnapshot) -> bool {
        self.table_number == other.table_number
            && self.small_blind == other.small_blind
            && self.big_blind == other.big_blind
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table {} ({}/{})", self.table_number, self.small_blind, self.big_blind)
    }
}
