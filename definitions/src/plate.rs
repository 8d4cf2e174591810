use std::fmt;

use serde::{Deserialize, Serialize};

/// A row of the crystallization plate. The plate has exactly four rows;
/// anything outside this set is rejected at parse time rather than mapped
/// to an undefined index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Row {
    A,
    B,
    C,
    D,
}

impl Row {
    /// All rows, top to bottom.
    pub const ALL: [Row; 4] = [Row::A, Row::B, Row::C, Row::D];

    /// Zero-based index of the row, `A` being 0.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_letter(letter: char) -> Option<Row> {
        match letter {
            'A' => Some(Row::A),
            'B' => Some(Row::B),
            'C' => Some(Row::C),
            'D' => Some(Row::D),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Row::A => 'A',
            Row::B => 'B',
            Row::C => 'C',
            Row::D => 'D',
        }
    }
}

/// Identifies one well of the crystallization plate, e.g. `A1`.
///
/// The derived ordering is plate order: all of row A left to right, then
/// row B, and so on. This is the order every phase of the protocol visits
/// the wells in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WellId {
    pub row: Row,
    /// One-based column number.
    pub column: u8,
}

impl WellId {
    pub fn new(row: Row, column: u8) -> WellId {
        WellId { row, column }
    }

    /// The well address as the hardware layer expects it, e.g. `"B3"`.
    pub fn address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row.letter(), self.column)
    }
}
