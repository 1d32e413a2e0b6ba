//! Stonehenge game state and move execution.
//!
//! A [`BoardState`] is a snapshot of one turn: cell ownership, ley-line claim
//! counters and capture markers, and the player to move. States are never
//! mutated after construction; [`BoardState::make_move`] always returns a fresh
//! successor, so search branches never alias each other.

use std::fmt;
use std::ops::Neg;

use log::trace;

use crate::board::{
    Cell, LeyLine, Player, cell_index, cell_label, cell_ley_lines, draw_hexagon, ley_line_size,
    total_cells, total_ley_lines,
};
use crate::constants::{MAX_CELLS, MAX_LEY_LINES, MAX_SIDE_LENGTH, MIN_SIDE_LENGTH};
use crate::error::{Error, Result};

/// A move: the label of the cell to claim, or the sentinel for unparsable input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Cell(char),
    Invalid,
}

impl Move {
    /// Parse user text into a move.
    ///
    /// Surrounding whitespace is ignored. Anything other than a single
    /// alphabetic character yields [`Move::Invalid`].
    pub fn parse(text: &str) -> Self {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Move::Cell(c),
            _ => Move::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Move::Cell(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Cell(c) => write!(f, "{c}"),
            Move::Invalid => f.write_str("<invalid>"),
        }
    }
}

/// Game value from one player's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Lose = -1,
    Draw = 0,
    Win = 1,
}

impl Outcome {
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl Neg for Outcome {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
            Outcome::Win => Outcome::Lose,
        }
    }
}

/// A Stonehenge position.
///
/// Arrays are sized for the largest supported board; only the first
/// `total_cells` cells and `total_ley_lines` lines are in play.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    side_length: usize,
    current: Player,
    cells: [Cell; MAX_CELLS],
    ley_lines: [LeyLine; MAX_LEY_LINES],
}

impl BoardState {
    /// Create an empty board with `first` to move.
    ///
    /// # Errors
    /// [`Error::UnsupportedSideLength`] unless `1 <= side_length <= 5`.
    pub fn new(first: Player, side_length: usize) -> Result<Self> {
        if !(MIN_SIDE_LENGTH..=MAX_SIDE_LENGTH).contains(&side_length) {
            return Err(Error::UnsupportedSideLength { side_length });
        }
        let mut ley_lines = [LeyLine::default(); MAX_LEY_LINES];
        for (id, line) in ley_lines
            .iter_mut()
            .enumerate()
            .take(total_ley_lines(side_length))
        {
            *line = LeyLine::new(ley_line_size(id, side_length));
        }
        Ok(Self {
            side_length,
            current: first,
            cells: [Cell::Unclaimed; MAX_CELLS],
            ley_lines,
        })
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// The player about to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Cells in play, in scan order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..total_cells(self.side_length)]
    }

    /// Ley-lines in play, in id order.
    pub fn ley_lines(&self) -> &[LeyLine] {
        &self.ley_lines[..total_ley_lines(self.side_length)]
    }

    /// Number of cells `player` has claimed.
    pub fn claimed_count(&self, player: Player) -> usize {
        self.cells()
            .iter()
            .filter(|&&c| c == Cell::Claimed(player))
            .count()
    }

    pub fn unclaimed_count(&self) -> usize {
        self.cells()
            .iter()
            .filter(|&&c| c == Cell::Unclaimed)
            .count()
    }

    /// Number of ley-lines captured by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.ley_lines()
            .iter()
            .filter(|line| line.captured_by == Some(player))
            .count()
    }

    /// Whether `player` holds at least half of all ley-lines.
    fn has_majority(&self, player: Player) -> bool {
        2 * self.count(player) >= total_ley_lines(self.side_length)
    }

    /// The game ends as soon as either player captures half the ley-lines,
    /// which can happen before every cell is claimed.
    pub fn is_over(&self) -> bool {
        self.has_majority(Player::P1) || self.has_majority(Player::P2)
    }

    /// Whether the game is over with `player` holding a majority of ley-lines.
    pub fn is_winner(&self, player: Player) -> bool {
        self.is_over() && self.has_majority(player)
    }

    /// Unclaimed cells in label order; empty once the game is over.
    pub fn possible_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Unclaimed)
            .map(|(i, _)| Move::Cell(cell_label(i)))
            .collect()
    }

    /// Successor states paired with the move producing them, in move order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, BoardState)> + '_ {
        self.possible_moves()
            .into_iter()
            .filter_map(|mv| self.make_move(mv).ok().map(|next| (mv, next)))
    }

    /// Claim a cell for the player to move and return the resulting state.
    ///
    /// Every ley-line through the cell gains a claim for the mover and is
    /// captured if still open and the mover now holds half of it. The turn
    /// passes to the opponent. `self` is left untouched.
    ///
    /// # Errors
    /// [`Error::InvalidMove`] if `mv` does not name an unclaimed cell.
    pub fn make_move(&self, mv: Move) -> Result<BoardState> {
        let index = match mv {
            Move::Cell(label) => cell_index(label, self.side_length),
            Move::Invalid => None,
        }
        .filter(|&i| self.cells[i] == Cell::Unclaimed)
        .ok_or(Error::InvalidMove { mv })?;

        let mover = self.current;
        let mut next = self.clone();
        next.cells[index] = Cell::Claimed(mover);
        for line in cell_ley_lines(index, self.side_length) {
            next.ley_lines[line].claim(mover);
        }
        next.current = mover.opponent();
        trace!("{mover} claims {mv}");
        Ok(next)
    }

    /// Whether some move ends the game at once (always in the mover's favour,
    /// since only the mover's claims change).
    pub fn win_in_one(&self) -> bool {
        !self.is_over() && self.successors().any(|(_, next)| next.is_over())
    }

    /// Cheap estimate of the value of this state for the player to move.
    ///
    /// Looks at most two plies ahead:
    /// - over: `Win` if only the mover holds a majority, `Lose` if the mover
    ///   does not hold one
    /// - `Win` if some move ends the game now
    /// - `Lose` if every move lets the opponent end the game next turn
    /// - `Draw` otherwise
    pub fn rough_outcome(&self) -> Outcome {
        if self.is_over() {
            let mover = self.current;
            return if !self.has_majority(mover) {
                Outcome::Lose
            } else if !self.has_majority(mover.opponent()) {
                Outcome::Win
            } else {
                Outcome::Draw
            };
        }
        if self.win_in_one() {
            return Outcome::Win;
        }
        if self.successors().all(|(_, next)| next.win_in_one()) {
            Outcome::Lose
        } else {
            Outcome::Draw
        }
    }

    /// One-line header naming the mover and board size.
    pub fn summary(&self) -> String {
        format!(
            "P1's Turn: {}, Side Length: {}",
            self.current == Player::P1,
            self.side_length
        )
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<char> = self
            .cells()
            .iter()
            .enumerate()
            .map(|(i, c)| match c {
                Cell::Unclaimed => cell_label(i),
                Cell::Claimed(p) => p.marker(),
            })
            .collect();
        let lines: Vec<char> = self.ley_lines().iter().map(LeyLine::marker).collect();
        draw_hexagon(f, self.side_length, &cells, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(side_length: usize, moves: &str) -> BoardState {
        let mut state = BoardState::new(Player::P1, side_length).unwrap();
        for c in moves.chars() {
            state = state.make_move(Move::Cell(c)).unwrap();
        }
        state
    }

    fn markers(state: &BoardState) -> String {
        state.ley_lines().iter().map(LeyLine::marker).collect()
    }

    #[test]
    fn test_new_state() {
        let state = BoardState::new(Player::P1, 3).unwrap();
        assert_eq!(state.cells().len(), 12);
        assert_eq!(state.ley_lines().len(), 12);
        assert_eq!(markers(&state), "@".repeat(12));
        assert_eq!(state.current_player(), Player::P1);

        let state = BoardState::new(Player::P1, 1).unwrap();
        let sizes: Vec<u8> = state.ley_lines().iter().map(|l| l.size).collect();
        assert_eq!(sizes, vec![2, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_unsupported_side_length() {
        assert!(matches!(
            BoardState::new(Player::P1, 0),
            Err(Error::UnsupportedSideLength { side_length: 0 })
        ));
        assert!(BoardState::new(Player::P2, 6).is_err());
        assert!(BoardState::new(Player::P2, 5).is_ok());
    }

    #[test]
    fn test_possible_moves() {
        let state = play(1, "");
        assert_eq!(
            state.possible_moves(),
            vec![Move::Cell('A'), Move::Cell('B'), Move::Cell('C')]
        );
        assert!(play(1, "A").possible_moves().is_empty());
    }

    #[test]
    fn test_make_move_updates_claims() {
        let state = play(2, "A");
        assert_eq!(state.cells()[0], Cell::Claimed(Player::P1));
        assert_eq!(markers(&state), "1@@@@@@@1");
        assert_eq!(state.ley_lines()[4].p1, 1);
        assert_eq!(state.current_player(), Player::P2);

        let state = play(2, "B");
        assert_eq!(markers(&state), "1@@@@1@@@");
        assert_eq!(state.ley_lines()[7].p1, 1);
    }

    #[test]
    fn test_make_move_rejects_bad_moves() {
        let state = play(2, "A");
        for mv in [Move::Cell('A'), Move::Cell('H'), Move::Cell('b'), Move::Invalid] {
            assert!(
                matches!(state.make_move(mv), Err(Error::InvalidMove { mv: m }) if m == mv),
                "{mv} should be rejected"
            );
        }
    }

    #[test]
    fn test_make_move_leaves_receiver_untouched() {
        let state = play(2, "AE");
        let before = state.clone();
        let _ = state.make_move(Move::Cell('F')).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_count() {
        let state = play(2, "ABG");
        assert_eq!(state.count(Player::P1), 5);
        assert_eq!(state.count(Player::P2), 1);
    }

    #[test]
    fn test_is_over() {
        assert!(!play(1, "").is_over());
        assert!(play(1, "A").is_over());
        assert!(play(1, "A").is_winner(Player::P1));
        assert!(!play(1, "A").is_winner(Player::P2));
    }

    #[test]
    fn test_win_in_one() {
        assert!(play(1, "").win_in_one());
        assert!(!play(1, "A").win_in_one());
        assert!(!play(2, "").win_in_one());
    }

    #[test]
    fn test_rough_outcome() {
        assert_eq!(play(1, "").rough_outcome(), Outcome::Win);
        assert_eq!(play(2, "A").rough_outcome(), Outcome::Draw);
        assert_eq!(play(2, "AE").rough_outcome(), Outcome::Draw);
        assert_eq!(play(2, "AEF").rough_outcome(), Outcome::Lose);
        assert_eq!(play(2, "AB").rough_outcome(), Outcome::Win);
        // Game over, and the player to move is the one who lost
        assert_eq!(play(1, "A").rough_outcome(), Outcome::Lose);
    }

    #[test]
    fn test_move_parse() {
        assert_eq!(Move::parse("  B \n"), Move::Cell('B'));
        assert_eq!(Move::parse("b"), Move::Cell('b'));
        assert_eq!(Move::parse(""), Move::Invalid);
        assert_eq!(Move::parse("3"), Move::Invalid);
        assert_eq!(Move::parse("AB"), Move::Invalid);
        assert!(!Move::Invalid.is_valid());
    }

    #[test]
    fn test_outcome_order_and_negation() {
        assert!(Outcome::Lose < Outcome::Draw && Outcome::Draw < Outcome::Win);
        assert_eq!(-Outcome::Win, Outcome::Lose);
        assert_eq!(-Outcome::Draw, Outcome::Draw);
        assert_eq!(Outcome::Lose.value(), -1);
    }

    #[test]
    fn test_display() {
        let state = play(2, "ABG");
        let expected = "        1   @\n       /   /\n  1 - 1 - 2   1\n     / \\ / \\ /\n\
                        @ - C - D - E\n     \\ / \\ / \\\n  1 - F - 1   2\n       \\   \\\n        @   1\n";
        assert_eq!(state.to_string(), expected);
        assert_eq!(state.summary(), "P1's Turn: false, Side Length: 2");
    }
}
