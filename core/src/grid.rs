use alloc::collections::VecDeque;
use alloc::string::String;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The board for one round: mines, what has been revealed and what has been flagged.
///
/// Mines and adjacency counts are fixed at construction, everything else is mutated in place
/// until the round ends and the grid is dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    labels: LabelScheme,
    all_revealed: bool,
    /// Flags put aside while the reveal toggle shows the whole board.
    stashed_flags: Option<Array2<bool>>,
}

impl Grid {
    /// Random board, mines sampled uniformly over every position.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((width, height), mine_count)?;
        Ok(Self::generate(config, RandomMinefieldGenerator::new(seed)))
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Self {
        Self::from_layout(generator.generate(config))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());
        for ((x, y), cell) in cells.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            cell.is_mine = layout[coords];
            if !cell.is_mine {
                cell.adjacent_mines = layout.adjacent_mine_count(coords);
            }
        }
        Self {
            cells,
            mine_count: layout.mine_count(),
            labels: LabelScheme::for_width(size.0),
            all_revealed: false,
            stashed_flags: None,
        }
    }

    pub fn with_labels(mut self, labels: LabelScheme) -> Self {
        self.labels = labels;
        self
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn labels(&self) -> LabelScheme {
        self.labels
    }

    pub fn is_all_revealed(&self) -> bool {
        self.all_revealed
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    /// Map a typed label such as `B7` to coordinates on this board.
    pub fn resolve(&self, token: &str) -> Option<Coord2> {
        self.labels.parse(token, self.size())
    }

    pub fn label(&self, coords: Coord2) -> String {
        self.labels.label(coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(if cell.is_revealed {
            FlagOutcome::NoChange
        } else if cell.is_flagged {
            cell.is_flagged = false;
            FlagOutcome::Unflagged
        } else {
            cell.is_flagged = true;
            FlagOutcome::Flagged
        })
    }

    /// Flood reveal from a safe cell, returns how many cells became revealed.
    ///
    /// A numbered start cell is revealed alone. A zero start expands breadth-first through
    /// every connected zero cell, revealing the numbered cells along the border without
    /// expanding them. Uses an explicit queue so board size is not limited by stack depth.
    pub fn reveal_cluster(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.validate_coords(coords)?;
        let start = self.cell_at(coords);
        if start.is_mine {
            return Err(GameError::UnexpectedMine);
        }

        let mut revealed = 0;
        if !start.is_revealed {
            self.cells[coords.to_nd_index()].reveal();
            revealed += 1;
        }
        if start.adjacent_mines > 0 {
            log::trace!("Revealed numbered cell {:?}", coords);
            return Ok(revealed);
        }

        let mut to_check = VecDeque::from([coords]);
        while let Some(current) = to_check.pop_front() {
            for pos in self.cells.iter_neighbors(current) {
                let neighbor = &mut self.cells[pos.to_nd_index()];
                if neighbor.is_revealed {
                    continue;
                }
                neighbor.reveal();
                revealed += 1;
                if neighbor.adjacent_mines == 0 {
                    to_check.push_back(pos);
                }
            }
        }

        log::debug!("Flood from {:?} revealed {} cells", coords, revealed);
        Ok(revealed)
    }

    /// Reveal around an already revealed cell once enough neighbors are flagged.
    ///
    /// Stops at the first unflagged mine it uncovers and reports it; exposing the rest of the
    /// board is left to the caller.
    pub fn reveal_chord(&mut self, coords: Coord2) -> Result<ChordOutcome> {
        let coords = self.validate_coords(coords)?;
        let center = self.cell_at(coords);
        if !center.is_revealed {
            return Err(GameError::NotRevealed);
        }

        let needed = center.adjacent_mines;
        let flagged = self.count_flagged_neighbors(coords);
        log::debug!(
            "Chord at {:?}: {} flags around, {} needed",
            coords,
            flagged,
            needed
        );
        if flagged < needed {
            return Ok(ChordOutcome::Blocked { flagged, needed });
        }

        let mut revealed = 0;
        for pos in self.cells.iter_neighbors(coords) {
            let neighbor = self.cell_at(pos);
            if neighbor.is_revealed || neighbor.is_flagged {
                continue;
            }
            if neighbor.is_mine {
                log::debug!("Chord at {:?} uncovered mine at {:?}", coords, pos);
                return Ok(ChordOutcome::HitMine(pos));
            }
            revealed += self.reveal_cluster(pos)?;
        }
        Ok(ChordOutcome::Revealed(revealed))
    }

    /// True once only mines remain hidden, whether or not they were flagged. Exposes the whole
    /// board when it fires.
    pub fn check_win(&mut self) -> bool {
        let total = self.total_cells();
        let revealed = self.revealed_count();
        log::trace!(
            "Total cells: {} | Revealed cells: {} | Total mines: {}",
            total,
            revealed,
            self.mine_count
        );
        if total - revealed == self.mine_count {
            self.reveal_all();
            true
        } else {
            false
        }
    }

    pub fn reveal_all(&mut self) {
        self.cells.iter_mut().for_each(Cell::reveal);
        self.all_revealed = true;
    }

    pub fn hide_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.is_revealed = false);
        self.all_revealed = false;
    }

    /// Debug aid: alternately expose and hide every cell. Returns the new toggle state.
    ///
    /// Flags are cleared while the board is exposed and come back when it is hidden again.
    pub fn toggle_reveal_all(&mut self) -> bool {
        if self.all_revealed {
            self.hide_all();
            if let Some(flags) = self.stashed_flags.take() {
                for (cell, &flagged) in self.cells.iter_mut().zip(flags.iter()) {
                    cell.is_flagged = flagged;
                }
            }
        } else {
            self.stashed_flags = Some(self.cells.map(|cell| cell.is_flagged));
            self.reveal_all();
        }
        log::debug!("Reveal toggle is {}", self.all_revealed);
        self.all_revealed
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_flagged)
            .count() as u8
    }
}
