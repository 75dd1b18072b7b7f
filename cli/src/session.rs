use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use textsweep_core::*;

use crate::config::Settings;
use crate::play::{HELP, RoundEnd, play_round, toggle_debug};
use crate::prompt::Prompt;

/// Winning times for this session, oldest first. Never cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct History {
    entries: Vec<(u64, &'static str)>,
}

impl History {
    pub(crate) fn record(&mut self, elapsed_secs: u64, label: &'static str) {
        self.entries.push((elapsed_secs, label));
    }

    pub(crate) fn entries(&self) -> &[(u64, &'static str)] {
        &self.entries
    }
}

/// Menu, rounds and play-again loop until the player leaves or input runs out.
pub(crate) struct Session<R, W> {
    prompt: Prompt<R, W>,
    settings: Settings,
    rng: SmallRng,
    history: History,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn new(prompt: Prompt<R, W>, settings: Settings, seed: u64) -> Self {
        log::debug!("Session seed: {}", seed);
        Self {
            prompt,
            settings,
            rng: SmallRng::seed_from_u64(seed),
            history: History::default(),
        }
    }

    pub(crate) fn run(&mut self) -> io::Result<()> {
        self.prompt.say("Minesweeper initiated.")?;
        self.prompt.say("Type 'help' at any point for instructions.")?;

        while let Some(difficulty) = self.choose_difficulty()? {
            let seed = self.rng.next_u64();
            log::debug!(
                "Starting {} round: {:?}, seed {}",
                difficulty.label,
                difficulty.config,
                seed
            );
            let round = Round::new(difficulty.new_grid(seed));

            let (end, settings) = play_round(&mut self.prompt, round, self.settings)?;
            self.settings = settings;
            log::debug!("Round ended: {:?}", end);
            match end {
                RoundEnd::Won { elapsed_secs } => self.history.record(elapsed_secs, difficulty.label),
                RoundEnd::InputClosed => break,
                RoundEnd::Lost | RoundEnd::Quit | RoundEnd::Aborted => {}
            }

            if !self.play_again()? {
                break;
            }
        }

        self.prompt.say("Goodbye!")
    }

    /// `None` when the player quits from the menu or input runs out.
    fn choose_difficulty(&mut self) -> io::Result<Option<Difficulty>> {
        self.show_history()?;
        self.show_menu()?;

        loop {
            let Some(line) = self.prompt.ask("Enter difficulty level: ")? else {
                return Ok(None);
            };
            let choice = match MenuCommand::parse(&line) {
                Ok(MenuCommand::Select(choice)) => choice,
                Ok(MenuCommand::Help) => {
                    self.prompt.show(HELP)?;
                    continue;
                }
                Ok(MenuCommand::Debug) => {
                    self.settings = toggle_debug(&mut self.prompt, self.settings)?;
                    continue;
                }
                Ok(MenuCommand::Quit) => {
                    log::debug!("Quit from menu");
                    return Ok(None);
                }
                Ok(MenuCommand::Reset) => {
                    self.prompt.say(
                        "The game hasn't started, there's nothing to reset. You can quit or exit though.",
                    )?;
                    continue;
                }
                Ok(MenuCommand::Reveal) => {
                    self.prompt.say(
                        "You can't reveal the grid before the game starts. Use it during the game.",
                    )?;
                    continue;
                }
                Err(err) => {
                    self.prompt.say(err)?;
                    continue;
                }
            };

            let difficulty = match choice {
                DifficultyChoice::Preset(preset) => Ok(Difficulty::preset(preset)),
                DifficultyChoice::Custom => {
                    self.prompt.say("You have chosen CUSTOM")?;
                    let Some((width, height, mines)) = self.ask_board(Bounds::CUSTOM, "MAX 26")?
                    else {
                        return Ok(None);
                    };
                    Difficulty::custom(width, height, mines)
                }
                DifficultyChoice::Unlimited => {
                    self.prompt.say(
                        "You have chosen the UNLIMITED difficulty. Note this is not intended for playing.",
                    )?;
                    self.prompt
                        .say("Moves are entered as column:row in this mode. (e.g. 31:7)")?;
                    self.prompt.say(format_args!(
                        "Boards are limited to {} cells in total.",
                        Bounds::UNLIMITED.max_cells
                    ))?;
                    let Some((width, height, mines)) =
                        self.ask_board(Bounds::UNLIMITED, "NO LIMIT")?
                    else {
                        return Ok(None);
                    };
                    Difficulty::unlimited(width, height, mines)
                }
            };
            match difficulty {
                Ok(difficulty) => return Ok(Some(difficulty)),
                Err(err) => self.prompt.say(err)?,
            }
        }
    }

    fn ask_board(
        &mut self,
        bounds: Bounds,
        limit: &str,
    ) -> io::Result<Option<(Coord, Coord, CellCount)>> {
        let Some(width) =
            self.ask_number(&format!("Enter width ({limit}): "), |raw| bounds.check_width(raw))?
        else {
            return Ok(None);
        };
        let Some(height) =
            self.ask_number(&format!("Enter height ({limit}): "), |raw| {
                bounds.check_height(width, raw)
            })?
        else {
            return Ok(None);
        };
        let Some(mines) = self.ask_number("Enter number of mines: ", |raw| {
            bounds.check_mines((width, height), raw)
        })?
        else {
            return Ok(None);
        };
        Ok(Some((width, height, mines)))
    }

    /// Re-asks until `check` accepts the number.
    fn ask_number<T>(
        &mut self,
        question: &str,
        check: impl Fn(i64) -> Result<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt.ask(question)? else {
                return Ok(None);
            };
            let Ok(raw) = line.trim().parse::<i64>() else {
                log::debug!("Not an integer: {:?}", line);
                self.prompt.say("Invalid input. Please enter a valid integer.")?;
                continue;
            };
            match check(raw) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => self.prompt.say(err)?,
            }
        }
    }

    fn play_again(&mut self) -> io::Result<bool> {
        loop {
            let Some(answer) = self.prompt.ask("Would you like to play again? (Y/N): ")? else {
                return Ok(false);
            };
            match answer.trim().to_ascii_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                _ => self.prompt.say("Invalid input. Please enter Y or N.")?,
            }
        }
    }

    fn show_history(&mut self) -> io::Result<()> {
        if self.history.entries().is_empty() {
            return Ok(());
        }
        self.prompt.say("Previous times:")?;
        for &(elapsed_secs, label) in self.history.entries() {
            self.prompt
                .say(format_args!("Difficulty: {label}   |  time: {elapsed_secs} seconds"))?;
        }
        self.prompt.say("")
    }

    fn show_menu(&mut self) -> io::Result<()> {
        self.prompt.say("Available difficulty presets:")?;
        for preset in PRESETS {
            let GameConfig {
                size: (width, height),
                mines,
            } = preset.config;
            self.prompt.say(format_args!(
                "{}: {}: {width} by {height} with {mines} mines.",
                preset.key, preset.name
            ))?;
        }
        self.prompt.say("C: CUSTOM: Choose your own settings.")?;
        self.prompt
            .say("U: UNLIMITED: For hardcore testing. Use at your own risk.")
    }

    #[cfg(test)]
    fn into_parts(self) -> (History, W) {
        (self.history, self.prompt.into_output())
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;

    fn run(script: &str) -> (History, String) {
        let prompt = Prompt::new(script.as_bytes(), Vec::new());
        let mut session = Session::new(prompt, Settings::new(LevelFilter::Off, false), 7);
        session.run().unwrap();
        let (history, output) = session.into_parts();
        (history, String::from_utf8(output).unwrap())
    }

    #[test]
    fn quit_mid_round_records_nothing() {
        let (history, output) = run("e\nquit\nn\n");

        assert!(history.entries().is_empty());
        assert!(output.contains("E: EASY: 9 by 9 with 8 mines."));
        assert!(output.contains("Mines remaining: 8"));
        assert!(output.contains("Would you like to play again? (Y/N): "));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn custom_win_is_recorded_and_listed() {
        let script = "c\n2\nabc\n3\n27\n3\n10\n9\n-f a1\ny\nquit\n";
        let (history, output) = run(script);

        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.entries()[0].1, "CUSTOM");
        assert!(output.contains("Invalid input. Width cannot be less than 3 or exceed 26."));
        assert!(output.contains("Invalid input. Please enter a valid integer."));
        assert!(output.contains("Invalid input. Height cannot be less than 3 or exceed 26."));
        assert!(output.contains("Invalid input. Number of mines cannot exceed 9 or be less than 1."));
        assert!(output.contains("You win! Congratulations!"));
        assert!(output.contains("Previous times:"));
        assert!(output.contains("Difficulty: CUSTOM   |  time: "));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn unlimited_uses_numeric_labels() {
        let (history, output) = run("u\n30\n1\n30\n-f 1:1\nn\n");

        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.entries()[0].1, "UNLIMITED");
        assert!(output.contains("Moves are entered as column:row"));
        assert!(output.contains("     1  2  3"));
    }

    #[test]
    fn menu_explains_commands_before_a_round() {
        let (history, output) = run("x\nreset\nreveal\nhelp\nquit\n");

        assert!(history.entries().is_empty());
        assert!(output.contains("Invalid input. Please enter a valid difficulty level."));
        assert!(output.contains("there's nothing to reset"));
        assert!(output.contains("You can't reveal the grid before the game starts."));
        assert!(output.contains("Type 'help' at any point to repeat this message."));
        assert!(!output.contains("Would you like to play again?"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn play_again_insists_on_yes_or_no() {
        let (_, output) = run("m\nexit\nmaybe\nN\n");

        assert!(output.contains("Invalid input. Please enter Y or N."));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn garbled_input_is_rejected_not_fatal() {
        let mut script = b"e\n".to_vec();
        script.extend_from_slice(b"\xff\xfe\n");
        script.extend_from_slice(b"quit\n\xc3\nn\n");

        let prompt = Prompt::new(&script[..], Vec::new());
        let mut session = Session::new(prompt, Settings::new(LevelFilter::Off, false), 7);
        session.run().unwrap();
        let (history, output) = session.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(history.entries().is_empty());
        assert!(output.contains("Invalid input. Please enter a valid move."));
        assert!(output.contains("Invalid input. Please enter Y or N."));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn unlimited_height_shrinks_with_width() {
        let (history, output) = run("u\n4097\n4097\n");

        assert!(history.entries().is_empty());
        assert!(output.contains("Boards are limited to 16777216 cells in total."));
        assert!(output.contains("Invalid input. Height cannot be less than 1 or exceed 4095."));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn closed_input_ends_cleanly() {
        for script in ["", "e\n", "c\n5\n", "w\nquit\n"] {
            let (history, output) = run(script);
            assert!(history.entries().is_empty(), "{script:?}");
            assert!(output.ends_with("Goodbye!\n"), "{script:?}");
        }
    }

    #[test]
    fn same_seed_same_boards() {
        let script = "h\nreveal\nquit\nn\n";
        assert_eq!(run(script).1, run(script).1);
    }
}
