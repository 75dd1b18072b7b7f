use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// How players name a cell when typing a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelScheme {
    /// Column letter then 1-based row, `C7`. Only reaches 26 columns.
    Letters,
    /// 1-based `column:row`, `31:7`. Any width.
    Numeric,
}

impl LabelScheme {
    pub const MAX_LETTER_COLUMNS: Coord = LETTERS.len() as Coord;

    pub const fn for_width(width: Coord) -> Self {
        if width <= Self::MAX_LETTER_COLUMNS {
            Self::Letters
        } else {
            Self::Numeric
        }
    }

    pub fn column_header(self, x: Coord) -> String {
        match self {
            Self::Letters => LETTERS
                .get(usize::from(x))
                .map(|&letter| String::from(char::from(letter)))
                .unwrap_or_else(|| String::from("?")),
            Self::Numeric => format!("{}", u32::from(x) + 1),
        }
    }

    pub fn label(self, (x, y): Coord2) -> String {
        let row = u32::from(y) + 1;
        match self {
            Self::Letters => format!("{}{}", self.column_header(x), row),
            Self::Numeric => format!("{}:{}", u32::from(x) + 1, row),
        }
    }

    /// Case-insensitive; `None` when malformed or off the board.
    pub fn parse(self, token: &str, (width, height): Coord2) -> Option<Coord2> {
        let token = token.trim();
        let (x, y) = match self {
            Self::Letters => {
                let mut chars = token.chars();
                let letter = chars.next()?.to_ascii_uppercase();
                let x = LETTERS.iter().position(|&l| char::from(l) == letter)?;
                (x, parse_one_based(chars.as_str())?)
            }
            Self::Numeric => {
                let (column, row) = token.split_once(':')?;
                (parse_one_based(column)?, parse_one_based(row)?)
            }
        };
        let x = Coord::try_from(x).ok().filter(|&x| x < width)?;
        let y = Coord::try_from(y).ok().filter(|&y| y < height)?;
        Some((x, y))
    }
}

fn parse_one_based(text: &str) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<usize>().ok()?.checked_sub(1)
}
