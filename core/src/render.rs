use alloc::string::{String, ToString};
use core::fmt;

use crate::*;

const ROW_HEADER_WIDTH: usize = 4;

impl Grid {
    /// Text snapshot of the board with the mines-remaining counter on top.
    pub fn render(&self, mines_remaining: i64) -> String {
        BoardView::new(self, mines_remaining).to_string()
    }
}

/// `Display` adapter for a grid plus the externally kept mine counter.
#[derive(Copy, Clone, Debug)]
pub struct BoardView<'a> {
    grid: &'a Grid,
    mines_remaining: i64,
}

impl<'a> BoardView<'a> {
    pub fn new(grid: &'a Grid, mines_remaining: i64) -> Self {
        Self {
            grid,
            mines_remaining,
        }
    }

    fn border(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$} ", "", width = ROW_HEADER_WIDTH)?;
        for _ in 0..self.grid.width() {
            f.write_str("---")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.grid.size();
        let labels = self.grid.labels();

        writeln!(f, "Mines remaining: {}", self.mines_remaining)?;
        write!(f, "{:width$}", "", width = ROW_HEADER_WIDTH)?;
        for x in 0..width {
            write!(f, "{:>3}", labels.column_header(x))?;
        }
        writeln!(f)?;
        self.border(f)?;

        for y in 0..height {
            write!(f, "{:<width$}|", u32::from(y) + 1, width = ROW_HEADER_WIDTH)?;
            for x in 0..width {
                f.write_str(glyph(self.grid.cell_at((x, y)).view()))?;
            }
            writeln!(f, "|")?;
        }

        self.border(f)
    }
}

fn glyph(view: CellView) -> &'static str {
    const COUNTS: [&str; 9] = [
        "   ", " 1 ", " 2 ", " 3 ", " 4 ", " 5 ", " 6 ", " 7 ", " 8 ",
    ];
    match view {
        CellView::Hidden => "▒▒▒",
        CellView::Flagged => " ⚑ ",
        CellView::Blank => "   ",
        CellView::Count(n) => COUNTS.get(usize::from(n)).copied().unwrap_or(" ? "),
        CellView::Mine => " X ",
    }
}
