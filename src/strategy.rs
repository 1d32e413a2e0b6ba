//! Move-selection strategies.
//!
//! Every strategy reads the game through the [`Game`] trait and returns the
//! move it picks without touching the game itself:
//! - [`interactive_strategy`] asks a human
//! - [`rough_outcome_strategy`] picks the move whose successor looks worst for
//!   the opponent under [`BoardState::rough_outcome`]
//! - [`minimax_recursive_strategy`] and [`minimax_iterative_strategy`] search
//!   the full game tree and always agree on the chosen move
//!
//! ## Scores
//!
//! Minimax scores a state from the point of view of the player who moved into
//! it. A terminal state is a win for that player when the opponent (the player
//! now to move) did not win, and the score of any other state is the negation
//! of its best child score.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::constants::MOVE_PROMPT;
use crate::error::Result;
use crate::game::Game;
use crate::state::{BoardState, Move, Outcome};
use crate::tree::{StateTree, TreeNode};

/// Ask for a move on `output` and read one line of `input`.
///
/// Unparsable input yields [`Move::Invalid`]; checking it is up to the caller.
///
/// # Errors
/// Returns an I/O error if the prompt cannot be written, the line cannot be
/// read, or `input` is exhausted.
pub fn interactive_strategy<G, R, W>(game: &G, input: &mut R, output: &mut W) -> Result<Move>
where
    G: Game,
    R: BufRead,
    W: Write,
{
    write!(output, "{MOVE_PROMPT}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(game.str_to_move(&line))
}

/// Pick the move whose successor has the lowest rough outcome for the
/// opponent. Ties go to the first such move. `None` once the game is over.
pub fn rough_outcome_strategy<G: Game>(game: &G) -> Option<Move> {
    let mut best: Option<(Move, Outcome)> = None;
    for (mv, next) in game.current_state().successors() {
        let guess = -next.rough_outcome();
        if best.is_none_or(|(_, score)| guess > score) {
            best = Some((mv, guess));
        }
    }
    best.map(|(mv, _)| mv)
}

/// Score a terminal state for the player who moved into it.
pub fn score_state_over(state: &BoardState) -> Outcome {
    let mover = state.current_player();
    if state.is_winner(mover) {
        Outcome::Lose
    } else if state.is_winner(mover.opponent()) {
        Outcome::Win
    } else {
        Outcome::Draw
    }
}

/// Minimax score of `state` for the player who moved into it, by recursion.
pub fn recursive_score<G: Game>(game: &G, state: &BoardState) -> Outcome {
    if game.is_over(state) {
        return score_state_over(state);
    }
    -state
        .successors()
        .map(|(_, next)| recursive_score(game, &next))
        .fold(Outcome::Lose, Ord::max)
}

/// Minimax score of the tree's root, computed with an explicit stack.
///
/// A node is visited twice. The first pop expands it and pushes it back
/// followed by its children; the second pop, after every child has been
/// scored, takes the negated best child score. Terminal nodes are scored on
/// their first pop.
pub fn iterative_score<G: Game>(game: &G, tree: &mut StateTree) -> Outcome {
    let mut stack = vec![StateTree::ROOT];

    while let Some(id) = stack.pop() {
        let score = match tree.node(id) {
            node if game.is_over(&node.state) => Some(score_state_over(&node.state)),
            TreeNode {
                children: Some(children),
                ..
            } => Some(
                -children
                    .iter()
                    .filter_map(|&child| tree.node(child).score)
                    .fold(Outcome::Lose, Ord::max),
            ),
            _ => None,
        };

        match score {
            Some(score) => tree.set_score(id, score),
            None => {
                let children = tree.expand(id);
                stack.push(id);
                stack.extend(children);
            }
        }
    }

    tree.root().score.unwrap_or(Outcome::Draw)
}

/// Pick the first forced win, else the first draw, else the first move.
fn choose_scored_move(scored: impl IntoIterator<Item = (Move, Outcome)>) -> Option<Move> {
    let mut first = None;
    let mut draw = None;
    for (mv, score) in scored {
        first.get_or_insert(mv);
        match score {
            Outcome::Win => return Some(mv),
            Outcome::Draw => {
                draw.get_or_insert(mv);
            }
            Outcome::Lose => {}
        }
    }
    draw.or(first)
}

/// Pick a move by exhaustive recursive minimax. `None` once the game is over.
///
/// Moves are scored in order and the search stops at the first forced win.
pub fn minimax_recursive_strategy<G: Game>(game: &G) -> Option<Move> {
    let scored = game
        .current_state()
        .successors()
        .map(|(mv, next)| (mv, recursive_score(game, &next)));
    let choice = choose_scored_move(scored);
    debug!("recursive minimax chose {choice:?}");
    choice
}

/// Pick a move by exhaustive minimax over an explicit [`StateTree`].
///
/// Chooses exactly as [`minimax_recursive_strategy`] does, reading each
/// child's score from the tree. `None` once the game is over.
pub fn minimax_iterative_strategy<G: Game>(game: &G) -> Option<Move> {
    let mut tree = StateTree::new(game.current_state().clone());
    let root_score = iterative_score(game, &mut tree);
    let scored = tree
        .children(StateTree::ROOT)
        .filter_map(|child| child.mv.zip(child.score));
    let choice = choose_scored_move(scored);
    debug!(
        "iterative minimax chose {choice:?} (root {root_score:?}, {} nodes)",
        tree.len()
    );
    choice
}
