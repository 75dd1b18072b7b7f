use super::*;

/// Purely random placement: every cell is equally likely to hold a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = config.total_cells() as usize;
        let (width, _) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        let wanted = config.mines as usize;
        if wanted > total_cells {
            log::warn!(
                "Minefield already full, requested {} mines but only {} cells fit",
                wanted,
                total_cells
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for index in rand::seq::index::sample(&mut rng, total_cells, wanted.min(total_cells)) {
            let x = (index % width as usize) as Coord;
            let y = (index / width as usize) as Coord;
            mine_mask[(x, y).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Placed {} mines on {}x{} with seed {}",
            layout.mine_count(),
            config.size.0,
            config.size.1,
            self.seed
        );
        layout
    }
}
