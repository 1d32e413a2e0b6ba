//! Board bounds and display markers.
//!
//! Cells are labelled with single uppercase letters, so the board can hold at
//! most 26 cells. The largest side length whose board fits that alphabet is 5
//! (25 cells), which fixes the array bounds used by [`crate::state::BoardState`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest supported side length.
pub const MIN_SIDE_LENGTH: usize = 1;

/// Largest supported side length (25 cells, labels `A..=Y`).
pub const MAX_SIDE_LENGTH: usize = 5;

/// Cell count of the largest board: `n(n+5)/2` with `n = MAX_SIDE_LENGTH`.
pub const MAX_CELLS: usize = MAX_SIDE_LENGTH * (MAX_SIDE_LENGTH + 5) / 2;

/// Ley-line count of the largest board: `3(n+1)`.
pub const MAX_LEY_LINES: usize = 3 * (MAX_SIDE_LENGTH + 1);

/// Label of the first cell; the rest follow in alphabet order.
pub const FIRST_LABEL: u8 = b'A';

// =============================================================================
// Display Markers
// =============================================================================

/// Marker drawn for a ley-line nobody has captured yet.
pub const UNCAPTURED_MARKER: char = '@';

/// Prompt shown by the interactive strategy.
pub const MOVE_PROMPT: &str = "Enter a move: ";
