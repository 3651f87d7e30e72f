// Core game logic
// Holds the secret target, the displayed movie and the guess counter,
// and maps guess outcomes onto display instructions

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info};

use crate::xtm_catalog::{Catalog, MovieRecord};
use crate::xtm_error::GameError;
use crate::xtm_feedback::{AttributeFeedback, MatchRule};

/// Guesses allowed per round
pub const MAX_GUESSES: u32 = 5;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Ended(EndReason),
}

/// Result of a single submit_guess call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Input was empty or the round is over; nothing changed
    Ignored,
    /// The guess named the target
    Won,
    /// Wrong guess with guesses left; `known` is true if the title is in the catalog
    Missed { known: bool },
    /// Wrong guess that used up the last attempt
    Lost { known: bool },
}

/// Receives display instructions from the game session
pub trait DisplayAdapter {
    fn render(&mut self, feedback: &[AttributeFeedback]);
    fn show_ended(&mut self, reason: EndReason);
    fn show_playing(&mut self);
    fn clear_input(&mut self);
}

/// One game session over a fixed catalog
pub struct GameSession<R: Rng = ThreadRng> {
    catalog: Catalog,
    rng: R,
    rule: MatchRule,
    target: usize,          // Index of the secret answer
    selected: usize,        // Index of the movie whose tiles are shown
    remaining_guesses: u32, // Counts down from MAX_GUESSES
    state: GameState,
}

impl GameSession<ThreadRng> {
    pub fn with_thread_rng(catalog: Catalog, rule: MatchRule) -> Result<Self, GameError> {
        GameSession::new(catalog, rand::thread_rng(), rule)
    }
}

impl<R: Rng> GameSession<R> {
    /// Start a session with a random target
    /// Fails if the catalog has no movies
    pub fn new(catalog: Catalog, mut rng: R, rule: MatchRule) -> Result<Self, GameError> {
        let target = catalog.pick_index(&mut rng).ok_or(GameError::EmptyCatalog)?;
        debug!(answer = catalog.movies()[target].title(), "new round");
        Ok(GameSession {
            catalog,
            rng,
            rule,
            target,
            selected: target,
            remaining_guesses: MAX_GUESSES,
            state: GameState::Playing,
        })
    }

    /// Evaluate one guess
    pub fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        let guess = text.trim();
        if guess.is_empty() || self.state != GameState::Playing || self.remaining_guesses == 0 {
            return GuessOutcome::Ignored;
        }

        self.remaining_guesses -= 1;

        if self.target().title_matches(guess) {
            self.state = GameState::Ended(EndReason::Won);
            info!(guess, remaining = self.remaining_guesses, "target guessed");
            return GuessOutcome::Won;
        }

        // a known title switches the displayed movie, the target stays the same
        let known = match self.catalog.find_by_title(guess) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        };
        debug!(guess, known, remaining = self.remaining_guesses, "wrong guess");

        if self.remaining_guesses == 0 {
            self.state = GameState::Ended(EndReason::Lost);
            info!(answer = self.target().title(), "out of guesses");
            GuessOutcome::Lost { known }
        } else {
            GuessOutcome::Missed { known }
        }
    }

    /// Start a fresh round with a new random target
    pub fn restart(&mut self) {
        // catalog is non-empty, checked in new()
        let target = self.catalog.pick_index(&mut self.rng).unwrap_or(0);
        self.target = target;
        self.selected = target;
        self.remaining_guesses = MAX_GUESSES;
        self.state = GameState::Playing;
        debug!(answer = self.target().title(), "new round");
    }

    /// Tiles for the currently displayed movie
    pub fn current_feedback(&self) -> Vec<AttributeFeedback> {
        self.rule.feedback(self.selected(), self.target())
    }

    pub fn target(&self) -> &MovieRecord {
        &self.catalog.movies()[self.target]
    }

    pub fn selected(&self) -> &MovieRecord {
        &self.catalog.movies()[self.selected]
    }

    pub fn remaining_guesses(&self) -> u32 {
        self.remaining_guesses
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Forward the result of a guess to the display
pub fn present<R: Rng, D: DisplayAdapter + ?Sized>(
    session: &GameSession<R>,
    outcome: GuessOutcome,
    display: &mut D,
) {
    match outcome {
        GuessOutcome::Ignored => {}
        GuessOutcome::Won => {
            display.clear_input();
            display.show_ended(EndReason::Won);
        }
        GuessOutcome::Missed { .. } => {
            display.clear_input();
            display.render(&session.current_feedback());
        }
        GuessOutcome::Lost { .. } => {
            display.clear_input();
            display.render(&session.current_feedback());
            display.show_ended(EndReason::Lost);
        }
    }
}

/// Show a freshly started or restarted round
pub fn present_fresh<R: Rng, D: DisplayAdapter + ?Sized>(session: &GameSession<R>, display: &mut D) {
    display.show_playing();
    display.render(&session.current_feedback());
}
