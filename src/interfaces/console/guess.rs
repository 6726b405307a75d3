use super::Console;
use crate::domain::game::{GameRules, GuessOutcome, Round, Scoreboard};
use crate::error::{KioskError, Result};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::debug;

/// Plays rounds until the player declines another one or input ends, then
/// prints and returns the final totals.
pub fn run<R: BufRead, W: Write, G: Rng + ?Sized>(
    console: &mut Console<R, W>,
    rng: &mut G,
    rules: GameRules,
) -> Result<Scoreboard> {
    let mut board = Scoreboard::default();
    match play(console, rng, rules, &mut board) {
        Ok(()) | Err(KioskError::EndOfInput) => {}
        Err(e) => return Err(e),
    }

    console.blank()?;
    console.say("Game Ended!")?;
    console.say(format!("Final Score: {}", board.total_score))?;
    console.say(format!("Rounds Played: {}", board.rounds_played))?;
    Ok(board)
}

fn play<R: BufRead, W: Write, G: Rng + ?Sized>(
    console: &mut Console<R, W>,
    rng: &mut G,
    rules: GameRules,
    board: &mut Scoreboard,
) -> Result<()> {
    loop {
        let mut round = Round::draw(rng, rules);
        debug!(target_number = round.target(), "round started");

        console.blank()?;
        console.say(format!(
            "New Round! I'm thinking of a number between {} and {}",
            rules.min, rules.max
        ))?;
        console.say(format!(
            "You have {} attempts to guess it!",
            rules.max_attempts
        ))?;

        while !round.is_over() {
            let Ok(value) = console.prompt("Enter your guess: ")?.parse::<i64>() else {
                console.say("Please enter a valid number!")?;
                continue;
            };
            match round.guess(value)? {
                GuessOutcome::TooLow { attempts_left } => {
                    console.say(format!("Too low! Attempts left: {attempts_left}"))?
                }
                GuessOutcome::TooHigh { attempts_left } => {
                    console.say(format!("Too high! Attempts left: {attempts_left}"))?
                }
                GuessOutcome::Correct { attempts, score } => {
                    console.say(format!(
                        "Congratulations! You guessed the number in {attempts} attempts!"
                    ))?;
                    console.say(format!("Round score: {score}"))?;
                }
            }
        }
        if !round.is_won() {
            console.say(format!("Game Over! The number was: {}", round.target()))?;
        }
        board.record(&round);

        console.blank()?;
        console.say("Current Stats:")?;
        console.say(format!("Rounds played: {}", board.rounds_played))?;
        console.say(format!("Total score: {}", board.total_score))?;

        console.blank()?;
        let reply = console
            .prompt("Would you like to play another round? (yes/no): ")?
            .to_lowercase();
        if reply != "yes" && reply != "y" {
            return Ok(());
        }
    }
}
