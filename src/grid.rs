/*
grid.rs

Copyright 2026 the Crucigrama authors

This file is part of Crucigrama.

Crucigrama is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Crucigrama is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Crucigrama. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! The cell grid of a puzzle.
//!
//! A [`GridCell`] exists only where a placed word occupies the position. A cell
//! that belongs to both an across and a down word is an intersection; placement
//! guarantees that both words contribute the same answer letter there.
//!
//! Cells reference their words by identifier and letter offset. They never hold the
//! player's letters on behalf of a word: the across and down entry letters stored
//! here are copies that the single write operation of [`crate::game::Game`] keeps
//! equal to the word buffers on every mutation path.

use crate::word::{BLANK, Orientation, WordId};

/// Reference from a cell to one of the words occupying it.
#[derive(Debug, Clone, Copy)]
pub struct WordRef {
    /// Identifier of the word.
    pub word_id: WordId,

    /// Index of this cell's letter within the word.
    pub char_index: usize,
}

/// A cell of the puzzle grid.
#[derive(Debug, Clone)]
pub struct GridCell {
    /// The answer letter for this position. Every word occupying the cell
    /// contributes this same letter.
    pub answer_char: char,

    /// The across word occupying the cell, if any.
    pub across: Option<WordRef>,

    /// The down word occupying the cell, if any.
    pub down: Option<WordRef>,

    /// Letter entered by the player for the across word, or [`BLANK`].
    pub user_char_across: char,

    /// Letter entered by the player for the down word, or [`BLANK`].
    pub user_char_down: char,
}

impl GridCell {
    /// Create a cell holding the given answer letter.
    pub fn new(answer_char: char) -> Self {
        Self {
            answer_char,
            across: None,
            down: None,
            user_char_across: BLANK,
            user_char_down: BLANK,
        }
    }

    /// Whether both an across and a down word occupy the cell.
    pub fn is_intersection(&self) -> bool {
        self.across.is_some() && self.down.is_some()
    }

    /// The word reference for the given orientation.
    pub fn word_ref(&self, orientation: Orientation) -> Option<WordRef> {
        match orientation {
            Orientation::Across => self.across,
            Orientation::Down => self.down,
        }
    }

    /// The player's letter for the given orientation.
    pub fn user_char_of(&self, orientation: Orientation) -> char {
        match orientation {
            Orientation::Across => self.user_char_across,
            Orientation::Down => self.user_char_down,
        }
    }

    /// Store the player's letter for the given orientation.
    pub fn set_user_char(&mut self, orientation: Orientation, ch: char) {
        match orientation {
            Orientation::Across => self.user_char_across = ch,
            Orientation::Down => self.user_char_down = ch,
        }
    }

    /// The player's letter to display: the down letter when present, the across
    /// letter otherwise.
    pub fn user_char(&self) -> char {
        if self.user_char_down != BLANK {
            self.user_char_down
        } else {
            self.user_char_across
        }
    }

    /// Whether the player has not filled in the cell yet.
    pub fn is_blank(&self) -> bool {
        self.user_char() == BLANK
    }

    /// Whether the displayed letter differs from the answer letter.
    pub fn has_user_error(&self) -> bool {
        self.user_char() != self.answer_char
    }
}

/// Rectangular grid of optional cells, indexed by row and column.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Cells in row-major order. None where no word occupies the position.
    cells: Vec<Vec<Option<GridCell>>>,
}

impl Grid {
    /// Create an empty grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        }
    }

    /// Whether the position is within the grid bounds.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// The cell at the given position, or None when the position is out of bounds
    /// or not occupied by any word.
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Mutable access to the cell at the given position.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut GridCell> {
        self.cells.get_mut(row)?.get_mut(col)?.as_mut()
    }

    /// Whether any word occupies the given position.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some()
    }

    /// Create the cell at the given position if no word occupies it yet, and return
    /// a mutable reference to it. The position must be within bounds.
    pub fn cell_or_insert(&mut self, row: usize, col: usize, answer_char: char) -> &mut GridCell {
        self.cells[row][col].get_or_insert_with(|| GridCell::new(answer_char))
    }

    /// Drop every cell, leaving the dimensions unchanged.
    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(None);
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }

    /// Iterate over the occupied cells with their positions, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|c| (row, col, c)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_no_cells() {
        let grid: Grid = Grid::new(4, 3);
        assert!(grid.contains(2, 3));
        assert!(!grid.contains(3, 0));
        assert!(grid.cell(0, 0).is_none());
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn cell_or_insert_keeps_existing_cell() {
        let mut grid: Grid = Grid::new(4, 3);
        grid.cell_or_insert(1, 2, 'a').across = Some(WordRef {
            word_id: 7,
            char_index: 0,
        });

        // A second word landing on the same cell must not replace it.
        let cell: &mut GridCell = grid.cell_or_insert(1, 2, 'a');
        assert!(cell.across.is_some());
        assert_eq!(cell.answer_char, 'a');
    }

    #[test]
    fn display_char_prefers_down() {
        let mut cell: GridCell = GridCell::new('a');
        assert!(cell.is_blank());

        cell.set_user_char(Orientation::Across, 'x');
        assert_eq!(cell.user_char(), 'x');
        assert!(cell.has_user_error());

        cell.set_user_char(Orientation::Down, 'a');
        assert_eq!(cell.user_char(), 'a');
        assert!(!cell.has_user_error());
    }

    #[test]
    fn clear_drops_all_cells() {
        let mut grid: Grid = Grid::new(2, 2);
        grid.cell_or_insert(0, 0, 'a');
        grid.cell_or_insert(1, 1, 'b');
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.width, 2);
        assert_eq!(grid.height, 2);
    }
}
