//! D4 symmetry group operations for board canonicalization

use serde::{Deserialize, Serialize};

use super::board::{BOARD_DIM, BoardState, CELL_COUNT, Cell};

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to apply reflection
    pub reflection: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// Get all 8 D4 transforms
    pub fn all() -> Vec<D4Transform> {
        let mut transforms = Vec::with_capacity(8);
        for rotation in [0, 90, 180, 270] {
            transforms.push(D4Transform {
                rotation,
                reflection: false,
            });
            transforms.push(D4Transform {
                rotation,
                reflection: true,
            });
        }
        transforms
    }

    /// Apply transform to a position (0-15)
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / BOARD_DIM, pos % BOARD_DIM);

        // Reflect across the vertical axis first, then rotate clockwise.
        if self.reflection {
            col = BOARD_DIM - 1 - col;
        }

        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = BOARD_DIM - 1 - row;
            row = new_row;
            col = new_col;
        }

        row * BOARD_DIM + col
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            // Reflect-then-rotate elements are reflections of the square,
            // and every reflection is an involution.
            *self
        } else {
            D4Transform {
                rotation: (360 - self.rotation) % 360,
                reflection: false,
            }
        }
    }
}

impl BoardState {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for i in 0..CELL_COUNT {
            cells[t.transform_position(i)] = self.cells[i];
        }
        BoardState {
            cells,
            to_move: self.to_move,
        }
    }

    /// Get the canonical (minimal) form under D4 symmetry.
    ///
    /// Rows map to columns, columns to rows, and the diagonals to each other
    /// under every transform, so the misère value of the canonical form
    /// equals the value of the original position. The search engine relies
    /// on this to merge memoization entries.
    pub fn canonical(&self) -> Self {
        let mut best = *self;
        for transform in D4Transform::all() {
            let candidate = self.transform(&transform);
            if candidate < best {
                best = candidate;
            }
        }
        best
    }
}
