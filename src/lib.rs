//! Stonehenge: a two-player cell-claiming game with game-tree search.
//!
//! Players take turns claiming cells on a hexagonal board. Each claim counts
//! towards the three ley-lines through the cell, and the first player to hold
//! half of a ley-line's cells captures it. Whoever captures half of all
//! ley-lines wins.
//!
//! ## Modules
//!
//! - [`constants`] - Board bounds and display markers
//! - [`board`] - Players, cells, ley-line geometry and the board diagram
//! - [`state`] - Immutable game states, move execution and the rough-outcome heuristic
//! - [`game`] - The [`Game`](game::Game) capability and the Stonehenge game object
//! - [`tree`] - Arena-backed search tree for iterative minimax
//! - [`strategy`] - Interactive, heuristic and minimax move selection
//! - [`error`] - Crate error type
//!
//! ## Example
//!
//! ```
//! use stonehenge::game::{Game, StonehengeGame};
//! use stonehenge::strategy::minimax_iterative_strategy;
//!
//! let mut game = StonehengeGame::new(true, 2).unwrap();
//! let mv = minimax_iterative_strategy(&game).unwrap();
//! game.apply(mv).unwrap();
//! println!("{}", game.current_state());
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod state;
pub mod strategy;
pub mod tree;

pub use error::{Error, Result};
