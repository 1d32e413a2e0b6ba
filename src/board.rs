//! Board geometry: players, cells, ley-lines and the hexagonal diagram.
//!
//! A board of side length `n` has `n(n+5)/2` cells laid out in `n+1` rows.
//! Row `r < n` holds `r+2` cells, and the last row holds `n` cells shifted one
//! column to the right. Cells are numbered in row-major scan order and labelled
//! `A`, `B`, `C`, ... in that order.
//!
//! Every cell sits on exactly three ley-lines, one per direction. Line ids are
//! laid out as:
//! - `0..=n`: rows, top to bottom
//! - `n+1..=2n+1`: down-right diagonals
//! - `2n+2..=3n+2`: down-left diagonals
//!
//! In each direction the `i`-th line (`i < n`) covers `i+2` cells and the last
//! one covers `n` cells.

use std::fmt;

use crate::constants::{FIRST_LABEL, UNCAPTURED_MARKER};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// Parse a `"p1"` / `"p2"` token. Anything else is not a player.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            _ => None,
        }
    }

    /// The token naming this player.
    pub fn token(self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    /// Character drawn on claimed cells and captured ley-lines.
    pub fn marker(self) -> char {
        match self {
            Player::P1 => '1',
            Player::P2 => '2',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Ownership of a single cell. A claimed cell is never released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Unclaimed,
    Claimed(Player),
}

/// Claim counters and capture marker for one ley-line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LeyLine {
    /// Number of cells on the line
    pub size: u8,
    /// Cells claimed by player 1
    pub p1: u8,
    /// Cells claimed by player 2
    pub p2: u8,
    /// First player to hold at least half the cells; permanent once set
    pub captured_by: Option<Player>,
}

impl LeyLine {
    pub fn new(size: usize) -> Self {
        Self {
            size: size as u8,
            ..Self::default()
        }
    }

    /// Number of cells `player` has claimed on this line.
    pub fn claims(&self, player: Player) -> u8 {
        match player {
            Player::P1 => self.p1,
            Player::P2 => self.p2,
        }
    }

    /// Record a claim by `player`, capturing the line if it is still open and
    /// `player` now holds at least half of its cells.
    pub fn claim(&mut self, player: Player) {
        match player {
            Player::P1 => self.p1 += 1,
            Player::P2 => self.p2 += 1,
        }
        if self.captured_by.is_none() && 2 * self.claims(player) >= self.size {
            self.captured_by = Some(player);
        }
    }

    /// Character drawn at the end of this line.
    pub fn marker(&self) -> char {
        self.captured_by
            .map(Player::marker)
            .unwrap_or(UNCAPTURED_MARKER)
    }
}

/// Number of cells on a board of side length `n`.
#[inline]
pub fn total_cells(n: usize) -> usize {
    n * (n + 5) / 2
}

/// Number of ley-lines on a board of side length `n`.
#[inline]
pub fn total_ley_lines(n: usize) -> usize {
    3 * (n + 1)
}

/// Label of the cell at `index` in scan order.
#[inline]
pub fn cell_label(index: usize) -> char {
    (FIRST_LABEL + index as u8) as char
}

/// Scan-order index of the cell labelled `label`, if the board has one.
pub fn cell_index(label: char, n: usize) -> Option<usize> {
    if !label.is_ascii_uppercase() {
        return None;
    }
    let index = (label as u8 - FIRST_LABEL) as usize;
    (index < total_cells(n)).then_some(index)
}

/// Number of cells covered by ley-line `line`.
pub fn ley_line_size(line: usize, n: usize) -> usize {
    let i = line % (n + 1);
    if i == n { n } else { i + 2 }
}

/// The three ley-lines through cell `index`: `[row, down-left, down-right]`.
pub fn cell_ley_lines(index: usize, n: usize) -> [usize; 3] {
    let mut col = index;
    let mut row = 0;
    let mut width = 2;
    while col >= width && width <= n + 1 {
        col -= width;
        width += 1;
        row += 1;
    }
    // The last row starts one column in.
    if row == n {
        col += 1;
    }
    let down_left = total_ley_lines(n) - col - 1;
    let down_right = 2 * (n + 1) - 1 - (row + 1 - col);
    [row, down_left, down_right]
}

/// Draw the hexagonal board diagram.
///
/// `cells` holds one character per cell in scan order, `lines` one marker per
/// ley-line in id order. Row markers sit on the left, down-left markers on the
/// top and right edges, down-right markers along the bottom.
pub fn draw_hexagon<W: fmt::Write>(
    out: &mut W,
    n: usize,
    cells: &[char],
    lines: &[char],
) -> fmt::Result {
    let total = total_ley_lines(n);
    let pad = |k: usize| " ".repeat(k);
    let mut cells = cells.iter().copied();
    let mut next_cell = move || cells.next().unwrap_or(' ');

    writeln!(out, "{}{}   {}", pad(2 * (n + 2)), lines[total - 1], lines[total - 2])?;
    writeln!(out, "{}/   /", pad(2 * (n + 2) - 1))?;

    for i in 0..n.saturating_sub(1) {
        write!(out, "{}{}", pad(2 * (n - 1 - i)), lines[i])?;
        for _ in 0..i + 2 {
            write!(out, " - {}", next_cell())?;
        }
        writeln!(out, "   {}", lines[total - i - 3])?;
        write!(out, "{}", pad(2 * (n - i + 1) - 1))?;
        for _ in 0..i + 2 {
            write!(out, "/ \\ ")?;
        }
        writeln!(out, "/")?;
    }

    // Widest row
    write!(out, "{}", lines[n - 1])?;
    for _ in 0..=n {
        write!(out, " - {}", next_cell())?;
    }
    writeln!(out)?;
    write!(out, "{}", pad(5))?;
    for _ in 0..n {
        write!(out, "\\ / ")?;
    }
    writeln!(out, "\\")?;

    // Last row
    write!(out, "  {}", lines[n])?;
    for _ in 0..n {
        write!(out, " - {}", next_cell())?;
    }
    writeln!(out, "   {}", lines[total - n - 2])?;

    write!(out, "{}", pad(4))?;
    for _ in 0..n {
        write!(out, "   \\")?;
    }
    writeln!(out)?;
    write!(out, "{}", pad(5))?;
    for j in 0..n {
        write!(out, "   {}", lines[n + 1 + j])?;
    }
    writeln!(out)
}
