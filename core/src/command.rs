use crate::*;

const FLAG_PREFIX: &str = "-F";

/// One line typed during a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundCommand {
    Play(Action),
    Help,
    Debug,
}

impl RoundCommand {
    /// Labels resolve against `grid`, so a move for a cell off the board is rejected here.
    pub fn parse(input: &str, grid: &Grid) -> Result<Self> {
        let input = input.trim();

        if let Some(target) = strip_flag_prefix(input) {
            return grid
                .resolve(target)
                .map(|coords| Self::Play(Action::Flag(coords)))
                .ok_or(GameError::InvalidMove);
        }
        if let Some(coords) = grid.resolve(input) {
            return Ok(Self::Play(Action::Reveal(coords)));
        }

        let word = input.to_ascii_lowercase();
        Ok(match word.as_str() {
            "reveal" => Self::Play(Action::ToggleRevealAll),
            "reset" | "restart" | "exit" | "quit" => Self::Play(Action::Quit),
            "help" => Self::Help,
            "debug" => Self::Debug,
            _ => return Err(GameError::InvalidMove),
        })
    }
}

/// `-f <label>`, with at least one space between the flag and the label.
fn strip_flag_prefix(input: &str) -> Option<&str> {
    let prefix = input.get(..FLAG_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(FLAG_PREFIX) {
        return None;
    }
    let rest = &input[FLAG_PREFIX.len()..];
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DifficultyChoice {
    Preset(&'static Preset),
    Custom,
    Unlimited,
}

/// One line typed at the difficulty prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Select(DifficultyChoice),
    Help,
    Debug,
    Quit,
    /// Nothing to reset before a round starts.
    Reset,
    /// Nothing to reveal before a round starts.
    Reveal,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Result<Self> {
        if let Some(preset) = Preset::find(input) {
            return Ok(Self::Select(DifficultyChoice::Preset(preset)));
        }

        let word = input.trim().to_ascii_lowercase();
        Ok(match word.as_str() {
            "c" | "custom" => Self::Select(DifficultyChoice::Custom),
            "u" | "unlimited" => Self::Select(DifficultyChoice::Unlimited),
            "help" => Self::Help,
            "debug" => Self::Debug,
            "exit" | "quit" => Self::Quit,
            "reset" | "restart" => Self::Reset,
            "reveal" => Self::Reveal,
            _ => return Err(GameError::InvalidDifficulty),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_layout(MineLayout::from_mine_coords((9, 9), &[(4, 4)]).unwrap())
    }

    #[test]
    fn parses_moves_and_flags() {
        let grid = grid();
        assert_eq!(
            RoundCommand::parse("b3", &grid),
            Ok(RoundCommand::Play(Action::Reveal((1, 2))))
        );
        assert_eq!(
            RoundCommand::parse("  I9 ", &grid),
            Ok(RoundCommand::Play(Action::Reveal((8, 8))))
        );
        assert_eq!(
            RoundCommand::parse("-f a1", &grid),
            Ok(RoundCommand::Play(Action::Flag((0, 0))))
        );
        assert_eq!(
            RoundCommand::parse("-F   c2", &grid),
            Ok(RoundCommand::Play(Action::Flag((2, 1))))
        );
    }

    #[test]
    fn rejects_bad_moves() {
        let grid = grid();
        for input in ["-fa1", "-f", "-f j1", "j1", "a10", "", "flag a1", "quit now"] {
            assert_eq!(
                RoundCommand::parse(input, &grid),
                Err(GameError::InvalidMove),
                "{input}"
            );
        }
    }

    #[test]
    fn parses_round_keywords() {
        let grid = grid();
        assert_eq!(
            RoundCommand::parse("REVEAL", &grid),
            Ok(RoundCommand::Play(Action::ToggleRevealAll))
        );
        for quit in ["reset", "Restart", "exit", "QUIT"] {
            assert_eq!(
                RoundCommand::parse(quit, &grid),
                Ok(RoundCommand::Play(Action::Quit))
            );
        }
        assert_eq!(RoundCommand::parse("Help", &grid), Ok(RoundCommand::Help));
        assert_eq!(RoundCommand::parse("debug", &grid), Ok(RoundCommand::Debug));
    }

    #[test]
    fn numeric_labels_on_wide_boards() {
        let grid = Grid::from_layout(MineLayout::from_mine_coords((30, 2), &[(0, 0)]).unwrap());
        assert_eq!(
            RoundCommand::parse("30:2", &grid),
            Ok(RoundCommand::Play(Action::Reveal((29, 1))))
        );
        assert_eq!(
            RoundCommand::parse("-f 1:1", &grid),
            Ok(RoundCommand::Play(Action::Flag((0, 0))))
        );
        assert_eq!(RoundCommand::parse("a1", &grid), Err(GameError::InvalidMove));
    }

    #[test]
    fn parses_menu() {
        assert_eq!(
            MenuCommand::parse("e"),
            Ok(MenuCommand::Select(DifficultyChoice::Preset(&PRESETS[0])))
        );
        assert_eq!(
            MenuCommand::parse("wide"),
            Ok(MenuCommand::Select(DifficultyChoice::Preset(&PRESETS[3])))
        );
        assert_eq!(
            MenuCommand::parse("C"),
            Ok(MenuCommand::Select(DifficultyChoice::Custom))
        );
        assert_eq!(
            MenuCommand::parse(" unlimited "),
            Ok(MenuCommand::Select(DifficultyChoice::Unlimited))
        );
        assert_eq!(MenuCommand::parse("quit"), Ok(MenuCommand::Quit));
        assert_eq!(MenuCommand::parse("RESTART"), Ok(MenuCommand::Reset));
        assert_eq!(MenuCommand::parse("reveal"), Ok(MenuCommand::Reveal));
        assert_eq!(MenuCommand::parse("help"), Ok(MenuCommand::Help));
        assert_eq!(MenuCommand::parse("debug"), Ok(MenuCommand::Debug));
        assert_eq!(MenuCommand::parse("z"), Err(GameError::InvalidDifficulty));
        assert_eq!(MenuCommand::parse(""), Err(GameError::InvalidDifficulty));
    }
}
