use crate::error::{KioskError, Result};
use rand::Rng;
use std::cmp::Ordering;

/// Fixed parameters of a guessing round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub min: i64,
    pub max: i64,
    pub max_attempts: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            max_attempts: 7,
        }
    }
}

/// Points for a round won after `attempts` guesses.
pub fn calculate_score(attempts: u32, max_attempts: u32) -> u32 {
    (max_attempts + 1).saturating_sub(attempts) * 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    TooLow { attempts_left: u32 },
    TooHigh { attempts_left: u32 },
    Correct { attempts: u32, score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundState {
    InProgress,
    Won { score: u32 },
    Lost,
}

/// A single round: one hidden target and a bounded number of guesses.
#[derive(Debug, Clone)]
pub struct Round {
    target: i64,
    attempts: u32,
    rules: GameRules,
    state: RoundState,
}

impl Round {
    pub fn new(target: i64, rules: GameRules) -> Self {
        Self {
            target,
            attempts: 0,
            rules,
            state: RoundState::InProgress,
        }
    }

    /// Starts a round with a target drawn uniformly from the rules' range.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, rules: GameRules) -> Self {
        Self::new(rng.gen_range(rules.min..=rules.max), rules)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn attempts_left(&self) -> u32 {
        self.rules.max_attempts - self.attempts
    }

    pub fn is_over(&self) -> bool {
        self.state != RoundState::InProgress
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, RoundState::Won { .. })
    }

    /// Score earned by this round; zero until won.
    pub fn score(&self) -> u32 {
        match self.state {
            RoundState::Won { score } => score,
            _ => 0,
        }
    }

    /// Records a guess. Each call consumes one attempt.
    pub fn guess(&mut self, value: i64) -> Result<GuessOutcome> {
        if self.is_over() {
            return Err(KioskError::RoundOver);
        }
        self.attempts += 1;

        let outcome = match value.cmp(&self.target) {
            Ordering::Equal => {
                let score = calculate_score(self.attempts, self.rules.max_attempts);
                self.state = RoundState::Won { score };
                GuessOutcome::Correct {
                    attempts: self.attempts,
                    score,
                }
            }
            Ordering::Less => GuessOutcome::TooLow {
                attempts_left: self.attempts_left(),
            },
            Ordering::Greater => GuessOutcome::TooHigh {
                attempts_left: self.attempts_left(),
            },
        };

        if self.state == RoundState::InProgress && self.attempts >= self.rules.max_attempts {
            self.state = RoundState::Lost;
        }
        Ok(outcome)
    }
}

/// Running totals across rounds in one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub total_score: u32,
    pub rounds_played: u32,
}

impl Scoreboard {
    /// Adds a finished round. Unfinished rounds are ignored.
    pub fn record(&mut self, round: &Round) {
        if round.is_over() {
            self.total_score += round.score();
            self.rounds_played += 1;
        }
    }
}
