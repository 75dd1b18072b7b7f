use std::io::{self, BufRead, Write};

use textsweep_core::*;

use crate::config::Settings;
use crate::prompt::Prompt;
use crate::timer::RoundTimer;

pub(crate) const HELP: &str = "\
To check a square, enter a letter followed by a number. (e.g. a1, B2, c3, etc.)
On boards wider than 26 columns, enter column:row instead. (e.g. 31:7)
To flag, type '-f' followed by the square you want to flag. (e.g. '-f a1', '-f B2', '-f c3', etc.)
Flags can be removed by flagging the same square again.
Enter a revealed number to search the squares around it, skipping flagged squares.
That only works once enough flags surround the number, like in normal minesweeper.
Type 'reveal' to toggle REVEAL mode. This shows the mine locations (for testing purposes).
Type 'reset', 'restart', 'exit', or 'quit' at any point to end the current game.
Type 'debug' to toggle debug logging on or off.
Type 'help' at any point to repeat this message.
";

const MOVE_QUESTION: &str = "Enter move or -f (move): ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RoundEnd {
    Won { elapsed_secs: u64 },
    Lost,
    Quit,
    Aborted,
    /// Input ran out mid-round.
    InputClosed,
}

/// Flip debug logging and tell the player about it.
pub(crate) fn toggle_debug<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    settings: Settings,
) -> io::Result<Settings> {
    let settings = settings.toggled_debug();
    settings.apply();
    prompt.say(settings.toggle_message())?;
    Ok(settings)
}

/// Drive one round to completion.
pub(crate) fn play_round<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    mut round: Round,
    mut settings: Settings,
) -> io::Result<(RoundEnd, Settings)> {
    let timer = RoundTimer::start()?;

    loop {
        prompt.say("")?;
        prompt.say(format_args!("Time elapsed: {} seconds", timer.elapsed_secs()))?;
        prompt.show(&round.render())?;

        let outcome = loop {
            let Some(line) = prompt.ask(MOVE_QUESTION)? else {
                return Ok((RoundEnd::InputClosed, settings));
            };
            let action = match RoundCommand::parse(&line, round.grid()) {
                Ok(RoundCommand::Play(action)) => action,
                Ok(RoundCommand::Help) => {
                    prompt.show(HELP)?;
                    continue;
                }
                Ok(RoundCommand::Debug) => {
                    settings = toggle_debug(prompt, settings)?;
                    continue;
                }
                Err(err) => {
                    log::debug!("Rejected move {:?}", line);
                    prompt.say(err)?;
                    continue;
                }
            };
            match round.play(action) {
                Ok(outcome) => break outcome,
                Err(err) if err.is_rejection() => prompt.say(err)?,
                Err(err) => {
                    log::error!("Round failed on {:?}: {}", action, err);
                    prompt.say("Error, game loop interrupted.")?;
                    return Ok((RoundEnd::Aborted, settings));
                }
            }
        };
        log::debug!("Turn: {:?}", outcome);

        let end = match outcome.state {
            RoundState::AwaitingMove => {
                if let TurnEvent::ChordBlocked { flagged, needed } = outcome.event {
                    prompt.say(format_args!(
                        "Not enough flags around that cell. ({flagged} of {needed})"
                    ))?;
                }
                continue;
            }
            RoundState::QuitRequested => RoundEnd::Quit,
            RoundState::Hit => {
                prompt.show(&round.render())?;
                prompt.say("You hit a mine! Game over.")?;
                RoundEnd::Lost
            }
            RoundState::Won => {
                let elapsed_secs = timer.stop();
                prompt.show(&round.render())?;
                prompt.say("You win! Congratulations!")?;
                prompt.say(format_args!("Time elapsed: {elapsed_secs} seconds"))?;
                return Ok((RoundEnd::Won { elapsed_secs }, settings));
            }
        };
        return Ok((end, settings));
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;

    fn run(script: &str, round: Round) -> (RoundEnd, String) {
        let mut prompt = Prompt::new(script.as_bytes(), Vec::new());
        let settings = Settings::new(LevelFilter::Off, false);
        let (end, _) = play_round(&mut prompt, round, settings).unwrap();
        (end, String::from_utf8(prompt.into_output()).unwrap())
    }

    fn round(size: Coord2, mines: &[Coord2]) -> Round {
        Round::new(Grid::from_layout(
            MineLayout::from_mine_coords(size, mines).unwrap(),
        ))
    }

    #[test]
    fn win_reports_time() {
        let (end, output) = run("a1\n", round((3, 3), &[(2, 2)]));

        assert!(matches!(end, RoundEnd::Won { .. }));
        assert!(output.contains("You win! Congratulations!"));
        assert!(output.contains("Mines remaining: 1"));
        assert!(output.ends_with(" seconds\n"));
    }

    #[test]
    fn loss_shows_board() {
        let (end, output) = run("c3\n", round((3, 3), &[(2, 2)]));

        assert_eq!(end, RoundEnd::Lost);
        assert!(output.contains(" X "));
        assert!(output.contains("You hit a mine! Game over."));
    }

    #[test]
    fn rejections_keep_the_round_going() {
        let script = "zz\n-f c3\nc3\nhelp\nb2\n-f b2\nquit\n";
        let (end, output) = run(script, round((3, 3), &[(2, 2)]));

        assert_eq!(end, RoundEnd::Quit);
        assert!(output.contains("Invalid input. Please enter a valid move."));
        assert!(output.contains("Cell is flagged. Remove the flag first."));
        assert!(output.contains("To flag, type '-f'"));
        assert!(output.contains("You can't flag a revealed cell."));
        assert!(output.contains("Mines remaining: 0"));
    }

    #[test]
    fn blocked_chord_is_explained() {
        let (end, output) = run("b2\nb2\n", round((3, 3), &[(0, 1), (2, 1)]));

        assert_eq!(end, RoundEnd::InputClosed);
        assert!(output.contains("Not enough flags around that cell. (0 of 2)"));
    }

    #[test]
    fn debug_toggle_survives_the_round() {
        let mut prompt = Prompt::new("debug\nquit\n".as_bytes(), Vec::new());
        let settings = Settings::new(LevelFilter::Off, false);

        let (end, settings) =
            play_round(&mut prompt, round((3, 3), &[(2, 2)]), settings).unwrap();

        assert_eq!(end, RoundEnd::Quit);
        assert!(settings.is_debug());
        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(output.contains("DEBUG logging turned on."));
    }
}
