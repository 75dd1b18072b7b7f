use crate::*;

/// Named board setup offered in the menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub key: char,
    pub name: &'static str,
    pub config: GameConfig,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        key: 'E',
        name: "EASY",
        config: GameConfig::new_unchecked((9, 9), 8),
    },
    Preset {
        key: 'M',
        name: "MEDIUM",
        config: GameConfig::new_unchecked((12, 12), 15),
    },
    Preset {
        key: 'H',
        name: "HARD",
        config: GameConfig::new_unchecked((15, 15), 25),
    },
    Preset {
        key: 'W',
        name: "WIDE",
        config: GameConfig::new_unchecked((20, 10), 25),
    },
];

impl Preset {
    pub fn find(input: &str) -> Option<&'static Preset> {
        let input = input.trim();
        let mut chars = input.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(key), None) => Some(key.to_ascii_uppercase()),
            _ => None,
        };
        PRESETS
            .iter()
            .find(|preset| key == Some(preset.key) || preset.name.eq_ignore_ascii_case(input))
    }
}

/// Side and area limits for player-sized boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_side: Coord,
    pub max_side: Coord,
    pub max_cells: CellCount,
}

impl Bounds {
    /// Custom mode, capped at what letter labels can name.
    pub const CUSTOM: Self = Self {
        min_side: 3,
        max_side: LabelScheme::MAX_LETTER_COLUMNS,
        max_cells: mult(
            LabelScheme::MAX_LETTER_COLUMNS,
            LabelScheme::MAX_LETTER_COLUMNS,
        ),
    };

    /// Any side length, as long as the whole board still fits in memory.
    pub const UNLIMITED: Self = Self {
        min_side: 1,
        max_side: Coord::MAX,
        max_cells: 1 << 24,
    };

    pub fn check_width(&self, raw: i64) -> Result<Coord> {
        self.check_side(raw).ok_or(GameError::WidthOutOfRange {
            min: self.min_side,
            max: self.max_side,
        })
    }

    /// The tallest allowed board shrinks as `width` grows, keeping the area within `max_cells`.
    pub fn check_height(&self, width: Coord, raw: i64) -> Result<Coord> {
        let max = self.max_height(width);
        Coord::try_from(raw)
            .ok()
            .filter(|side| (self.min_side..=max).contains(side))
            .ok_or(GameError::HeightOutOfRange {
                min: self.min_side,
                max,
            })
    }

    pub fn check_mines(&self, size: Coord2, raw: i64) -> Result<CellCount> {
        let max = mult(size.0, size.1);
        CellCount::try_from(raw)
            .ok()
            .filter(|&mines| (1..=max).contains(&mines))
            .ok_or(GameError::MinesOutOfRange { max })
    }

    fn max_height(&self, width: Coord) -> Coord {
        let by_area = self.max_cells / CellCount::from(width.max(1));
        Coord::try_from(by_area)
            .unwrap_or(Coord::MAX)
            .min(self.max_side)
    }

    fn check_side(&self, raw: i64) -> Option<Coord> {
        Coord::try_from(raw)
            .ok()
            .filter(|side| (self.min_side..=self.max_side).contains(side))
    }
}

/// Everything needed to start a round, plus the name it is recorded under.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pub label: &'static str,
    pub config: GameConfig,
    pub labels: LabelScheme,
}

impl Difficulty {
    pub const CUSTOM_LABEL: &'static str = "CUSTOM";
    pub const UNLIMITED_LABEL: &'static str = "UNLIMITED";

    pub fn preset(preset: &Preset) -> Self {
        Self {
            label: preset.name,
            config: preset.config,
            labels: LabelScheme::for_width(preset.config.size.0),
        }
    }

    pub fn custom(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Ok(Self {
            label: Self::CUSTOM_LABEL,
            config: Self::bounded(Bounds::CUSTOM, width, height, mines)?,
            labels: LabelScheme::Letters,
        })
    }

    /// Any size at all; moves are typed as `column:row` no matter the width.
    pub fn unlimited(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Ok(Self {
            label: Self::UNLIMITED_LABEL,
            config: Self::bounded(Bounds::UNLIMITED, width, height, mines)?,
            labels: LabelScheme::Numeric,
        })
    }

    pub fn new_grid(&self, seed: u64) -> Grid {
        Grid::generate(self.config, RandomMinefieldGenerator::new(seed)).with_labels(self.labels)
    }

    fn bounded(bounds: Bounds, width: Coord, height: Coord, mines: CellCount) -> Result<GameConfig> {
        let width = bounds.check_width(width.into())?;
        let height = bounds.check_height(width, height.into())?;
        let mines = bounds.check_mines((width, height), mines.into())?;
        GameConfig::new((width, height), mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_menu() {
        let easy = Preset::find("e").unwrap();
        assert_eq!(easy.config, GameConfig::new_unchecked((9, 9), 8));
        assert_eq!(Preset::find("Medium").unwrap().config.mines, 15);
        assert_eq!(Preset::find("H").unwrap().config.size, (15, 15));
        assert_eq!(Preset::find("w").unwrap().config.size, (20, 10));
        assert_eq!(Preset::find("x"), None);
        assert_eq!(Preset::find("ez"), None);
        for preset in PRESETS {
            assert!(GameConfig::new(preset.config.size, preset.config.mines).is_ok());
        }
    }

    #[test]
    fn custom_bounds() {
        let bounds = Bounds::CUSTOM;
        assert_eq!(bounds.check_width(3), Ok(3));
        assert_eq!(bounds.check_width(26), Ok(26));
        assert_eq!(
            bounds.check_width(27),
            Err(GameError::WidthOutOfRange { min: 3, max: 26 })
        );
        assert_eq!(
            bounds.check_height(3, 2),
            Err(GameError::HeightOutOfRange { min: 3, max: 26 })
        );
        assert!(bounds.check_height(3, -4).is_err());
        assert_eq!(bounds.check_height(26, 26), Ok(26));
        assert_eq!(bounds.check_mines((3, 3), 9), Ok(9));
        assert_eq!(
            bounds.check_mines((3, 3), 10),
            Err(GameError::MinesOutOfRange { max: 9 })
        );
        assert!(bounds.check_mines((3, 3), 0).is_err());
    }

    #[test]
    fn unlimited_only_has_lower_bounds() {
        let bounds = Bounds::UNLIMITED;
        assert_eq!(bounds.check_width(1), Ok(1));
        assert_eq!(bounds.check_width(1000), Ok(1000));
        assert!(bounds.check_width(0).is_err());
        assert!(bounds.check_width(i64::from(Coord::MAX) + 1).is_err());
    }

    #[test]
    fn unlimited_area_stays_allocatable() {
        let bounds = Bounds::UNLIMITED;
        assert_eq!(bounds.check_height(1000, 1000), Ok(1000));
        assert_eq!(bounds.check_height(4096, 4096), Ok(4096));
        assert_eq!(
            bounds.check_height(4096, 4097),
            Err(GameError::HeightOutOfRange { min: 1, max: 4096 })
        );
        assert_eq!(
            bounds.check_height(Coord::MAX, 1000),
            Err(GameError::HeightOutOfRange { min: 1, max: 256 })
        );
        assert_eq!(bounds.check_height(1, i64::from(Coord::MAX)), Ok(Coord::MAX));
        assert!(Difficulty::unlimited(Coord::MAX, Coord::MAX, 1).is_err());

        let difficulty = Difficulty::unlimited(40, 2, 3).unwrap();
        assert_eq!(difficulty.labels, LabelScheme::Numeric);
        assert_eq!(difficulty.label, "UNLIMITED");
    }

    #[test]
    fn difficulty_builds_matching_grid() {
        let difficulty = Difficulty::custom(5, 4, 6).unwrap();
        let grid = difficulty.new_grid(3);
        assert_eq!(grid.size(), (5, 4));
        assert_eq!(grid.mine_count(), 6);
        assert_eq!(grid.labels(), LabelScheme::Letters);

        assert!(Difficulty::custom(2, 4, 1).is_err());
        assert!(Difficulty::unlimited(1, 1, 1).is_ok());
    }
}
