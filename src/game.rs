//! The game object strategies play against.
//!
//! [`Game`] is the capability every strategy depends on: the current state,
//! a terminal test, a winner test and move parsing. [`StonehengeGame`] is the
//! concrete Stonehenge implementation and also advances play for a driver.

use log::debug;

use crate::board::Player;
use crate::error::Result;
use crate::state::{BoardState, Move};

/// A two-player game as seen by a move-selection strategy.
pub trait Game {
    /// The state the next move will be played from.
    fn current_state(&self) -> &BoardState;

    /// Whether `state` is terminal.
    fn is_over(&self, state: &BoardState) -> bool;

    /// Whether the player named by `player` (`"p1"` or `"p2"`) has won in the
    /// current state. Unknown tokens are never winners.
    fn is_winner(&self, player: &str) -> bool;

    /// Parse user text into a move, or [`Move::Invalid`] if it is not one.
    fn str_to_move(&self, text: &str) -> Move;
}

/// A game of Stonehenge.
#[derive(Clone, Debug)]
pub struct StonehengeGame {
    current_state: BoardState,
}

impl StonehengeGame {
    /// Start a game on an empty board of the given side length.
    ///
    /// # Errors
    /// Returns an error for side lengths outside `1..=5`.
    pub fn new(p1_starts: bool, side_length: usize) -> Result<Self> {
        let first = if p1_starts { Player::P1 } else { Player::P2 };
        Ok(Self {
            current_state: BoardState::new(first, side_length)?,
        })
    }

    /// Resume play from an existing state.
    pub fn from_state(state: BoardState) -> Self {
        Self {
            current_state: state,
        }
    }

    pub fn instructions() -> &'static str {
        "Players take turns claiming cells. When a player captures at least \
         half of the cells in a ley-line, that player captures the ley-line. \
         The first player to capture at least half of the ley-lines wins."
    }

    /// Play `mv` for the player to move.
    ///
    /// # Errors
    /// Returns an error if `mv` does not name an unclaimed cell; the current
    /// state is left unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<()> {
        self.current_state = self.current_state.make_move(mv)?;
        debug!("applied {mv}");
        Ok(())
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<Player> {
        [Player::P1, Player::P2]
            .into_iter()
            .find(|&p| self.current_state.is_winner(p))
    }
}

impl Game for StonehengeGame {
    fn current_state(&self) -> &BoardState {
        &self.current_state
    }

    fn is_over(&self, state: &BoardState) -> bool {
        state.is_over()
    }

    fn is_winner(&self, player: &str) -> bool {
        Player::from_token(player).is_some_and(|p| self.current_state.is_winner(p))
    }

    fn str_to_move(&self, text: &str) -> Move {
        Move::parse(text)
    }
}
