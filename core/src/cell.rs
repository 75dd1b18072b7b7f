use serde::{Deserialize, Serialize};

/// State of one square on the board.
///
/// `adjacent_mines` is computed once when the grid is built and only means something for
/// safe cells. A revealed cell is never flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
        self.is_flagged = false;
    }

    pub const fn view(self) -> CellView {
        match (self.is_revealed, self.is_flagged, self.is_mine) {
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
            (true, _, true) => CellView::Mine,
            (true, _, false) if self.adjacent_mines == 0 => CellView::Blank,
            (true, _, false) => CellView::Count(self.adjacent_mines),
        }
    }
}

/// What the player gets to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Blank,
    Count(u8),
    Mine,
}
