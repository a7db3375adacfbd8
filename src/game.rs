/*
game.rs

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

//! Manage the status of a game in progress: the placed words, the cell grid, the
//! selection, and the player's edits.
//!
//! Every letter the player enters funnels through one private operation,
//! [`Game::write_char`], which updates the word's entry buffer and the grid cell
//! together, and synchronizes the crossing word when the cell is an intersection.
//! Editing operations return an [`EditOutcome`] naming the words they touched so
//! the caller can persist them; the core emits plain values and never reaches into
//! storage itself.

use log::debug;
use std::collections::HashMap;

use crate::grid::{Grid, GridCell, WordRef};
use crate::placer::{self, PlacementResult};
use crate::word::{BLANK, GameWord, Orientation, WordId};

/// The currently selected cell: a word and a letter position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Identifier of the selected word.
    pub word_id: WordId,

    /// Index of the selected letter within the word.
    pub char_index: usize,
}

/// Words touched by an editing operation. The caller persists each of them.
#[derive(Debug, Clone, Default)]
pub struct EditOutcome {
    /// Identifiers of the touched words, without duplicates. Contains the edited
    /// word, plus the crossing words whose letters changed.
    pub touched: Vec<WordId>,
}

/// Displayable state of one grid cell.
#[derive(Debug, Clone, Copy)]
pub struct CellView {
    /// The player's letter for the cell, or [`BLANK`].
    pub display_char: char,

    /// Whether the cell belongs to the selected word.
    pub is_selected: bool,

    /// Whether the cell is the selected cell itself.
    pub is_individually_selected: bool,

    /// Whether the player's letter differs from the answer letter.
    pub has_error: bool,
}

/// Clue data of the selected word, for the presentation layer.
#[derive(Debug, Clone)]
pub struct SelectedWordView {
    /// Clue label for the tense (for example, "Preterit tense of").
    pub tense_label: String,

    /// Subject pronoun label, empty for gerunds and past participles.
    pub pronoun_label: String,

    /// Infinitive clue.
    pub infinitive: String,

    /// English translation of the infinitive.
    pub translation: String,

    /// Direction of the word.
    pub orientation: Orientation,

    /// Number of letters in the word.
    pub length: usize,
}

/// Row span of the selected word, for the caller's scroll computation. The
/// scrolling math itself belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// Row of the first letter.
    pub start_row: usize,

    /// Row of the last letter. Equal to `start_row` for an across word.
    pub end_row: usize,

    /// Row of the selected letter.
    pub selected_row: usize,
}

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct Game {
    /// The cell grid.
    grid: Grid,

    /// The placed words, in canonical order: row-major by start position, across
    /// before down at equal positions.
    words: Vec<GameWord>,

    /// Position of each word in the list, by identifier.
    index_by_id: HashMap<WordId, usize>,

    /// The selected cell, or None when the grid is empty.
    selection: Option<Selection>,
}

impl Game {
    /// Create a game from a fresh placement run.
    pub fn from_placement(result: PlacementResult) -> Self {
        let PlacementResult { words, grid } = result;
        Self::build(words, grid)
    }

    /// Create a game from reconstructed words, replaying each word into a fresh
    /// grid of the given dimensions and re-deriving the intersections. The words
    /// must fit the grid (see [`placer::words_fit_in_grid`]).
    pub fn from_words(words: Vec<GameWord>, width: usize, height: usize) -> Self {
        let mut grid: Grid = Grid::new(width, height);
        for word in &words {
            placer::add_to_grid(word, &mut grid);
        }
        Self::build(words, grid)
    }

    fn build(mut words: Vec<GameWord>, grid: Grid) -> Self {
        words.sort_by_key(canonical_key);
        let index_by_id: HashMap<WordId, usize> = words
            .iter()
            .enumerate()
            .map(|(index, word)| (word.id, index))
            .collect();

        let mut game: Game = Self {
            grid,
            words,
            index_by_id,
            selection: None,
        };

        // Auto-select the first word of the canonical order, landing the cursor on
        // its first letter that needs changing.
        if let Some(word) = game.words.first() {
            game.selection = Some(Selection {
                word_id: word.id,
                char_index: word.default_selection_index(),
            });
        }
        game
    }

    /// Number of columns of the grid.
    pub fn grid_width(&self) -> usize {
        self.grid.width
    }

    /// Number of rows of the grid.
    pub fn grid_height(&self) -> usize {
        self.grid.height
    }

    /// The placed words, in canonical order.
    pub fn words(&self) -> &[GameWord] {
        &self.words
    }

    /// Number of placed words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The word with the given identifier.
    pub fn word(&self, word_id: WordId) -> Option<&GameWord> {
        self.index_by_id
            .get(&word_id)
            .map(|index| &self.words[*index])
    }

    /// The current selection, or None when the grid is empty.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The currently selected word.
    pub fn selected_word(&self) -> Option<&GameWord> {
        self.selection
            .and_then(|selection| self.word(selection.word_id))
    }

    /// Select a word. Without an explicit index, the cursor lands on the word's
    /// default selection index; an explicit index is clamped to the word length.
    ///
    /// Return false when no word has the given identifier.
    pub fn select_word(&mut self, word_id: WordId, char_index: Option<usize>) -> bool {
        let Some(word) = self.word(word_id) else {
            return false;
        };
        let index: usize = match char_index {
            Some(index) => index.min(word.len() - 1),
            None => word.default_selection_index(),
        };
        self.selection = Some(Selection {
            word_id,
            char_index: index,
        });
        true
    }

    /// Select the word owning the cell at the given position.
    ///
    /// When the cell belongs to both orientations, the orientation of the
    /// currently selected word wins if that word occupies the cell; otherwise the
    /// across word is preferred. Return false when no word occupies the position.
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        let Some(cell) = self.grid.cell(row, col) else {
            return false;
        };

        let current_id: Option<WordId> = self.selection.map(|s| s.word_id);
        let owned_by_current = |word_ref: Option<WordRef>| -> Option<WordRef> {
            word_ref.filter(|r| Some(r.word_id) == current_id)
        };

        let chosen: Option<WordRef> = owned_by_current(cell.across)
            .or_else(|| owned_by_current(cell.down))
            .or(cell.across)
            .or(cell.down);

        match chosen {
            Some(word_ref) => {
                self.selection = Some(Selection {
                    word_id: word_ref.word_id,
                    char_index: word_ref.char_index,
                });
                true
            }
            None => false,
        }
    }

    /// Select the next word in canonical order, wrapping to the first word after
    /// the last. Return false when the grid is empty.
    pub fn select_next_word(&mut self) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let next_index: usize = match self.selection {
            Some(selection) => match self.index_by_id.get(&selection.word_id) {
                Some(index) => (index + 1) % self.words.len(),
                None => 0,
            },
            None => 0,
        };
        let word_id: WordId = self.words[next_index].id;
        self.select_word(word_id, None)
    }

    /// Select the next word, in canonical order with wrap-around, that still has
    /// visibly blank cells, or failing that one with errored cells. Return false
    /// when every word is complete and correct.
    pub fn select_next_incomplete_word(&mut self) -> bool {
        self.select_next_word_matching(|game, word| game.has_visible_blanks(word))
            || self.select_next_word_matching(|_, word| word.has_errored_cells())
    }

    /// Shift the selected letter position by the given delta, clamped to the word.
    /// Return false when the selection was already at the boundary, so the caller
    /// can apply its own cross-word navigation.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        let Some(word) = self.word(selection.word_id) else {
            return false;
        };
        let moved: isize = selection.char_index as isize + delta;
        let clamped: usize = moved.clamp(0, word.len() as isize - 1) as usize;
        let changed: bool = clamped != selection.char_index;
        self.selection = Some(Selection {
            word_id: selection.word_id,
            char_index: clamped,
        });
        changed
    }

    /// Set the selected cell to the given letter, or to [`BLANK`] to erase it,
    /// then advance the selection by one letter (clamped to the word).
    ///
    /// Return the touched words: the selected word, plus the crossing word if the
    /// cell is an intersection and its letter changed.
    pub fn update_char_of_selected_cell(&mut self, ch: char) -> Option<EditOutcome> {
        let selection: Selection = self.selection?;
        let mut outcome: EditOutcome = EditOutcome::default();
        self.write_char(selection.word_id, selection.char_index, ch, &mut outcome);
        self.move_selection(1);
        Some(outcome)
    }

    /// Replace the entry of the selected word with the given text: positions
    /// beyond the text are cleared back to [`BLANK`], text beyond the word length
    /// is ignored. The selection moves to the word's default selection index.
    ///
    /// Return the touched words, once per call regardless of how many letters
    /// changed.
    pub fn update_text_of_selected_word(&mut self, text: &str) -> Option<EditOutcome> {
        let selection: Selection = self.selection?;
        let word_len: usize = self.word(selection.word_id)?.len();

        let mut outcome: EditOutcome = EditOutcome::default();
        let mut letters = text.chars();
        for char_index in 0..word_len {
            let ch: char = letters.next().unwrap_or(BLANK);
            self.write_char(selection.word_id, char_index, ch, &mut outcome);
        }

        if let Some(word) = self.word(selection.word_id) {
            self.selection = Some(Selection {
                word_id: selection.word_id,
                char_index: word.default_selection_index(),
            });
        }
        Some(outcome)
    }

    /// Discard the words and the grid cells, returning to the no-selection state.
    pub fn clear(&mut self) {
        self.words.clear();
        self.index_by_id.clear();
        self.grid.clear();
        self.selection = None;
    }

    /// Whether the puzzle is completely filled in.
    ///
    /// With `correctly`, every cell must also hold its answer letter.
    pub fn is_puzzle_complete(&self, correctly: bool) -> bool {
        if self.words.is_empty() {
            return false;
        }
        for (_, _, cell) in self.grid.iter_cells() {
            if cell.is_blank() || (correctly && cell.has_user_error()) {
                return false;
            }
        }
        true
    }

    /// Displayable state of the whole grid, row by row. Positions no word occupies
    /// hold None.
    pub fn cell_views(&self) -> Vec<Vec<Option<CellView>>> {
        let selected_word: Option<&GameWord> = self.selected_word();
        let selected_position: Option<(usize, usize)> = self
            .selection
            .zip(selected_word)
            .map(|(selection, word)| word.position_of(selection.char_index));

        (0..self.grid.height)
            .map(|row| {
                (0..self.grid.width)
                    .map(|col| {
                        self.grid.cell(row, col).map(|cell| {
                            self.cell_view(cell, row, col, selected_word, selected_position)
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Clue data of the selected word.
    pub fn selected_word_view(&self) -> Option<SelectedWordView> {
        self.selected_word().map(|word| SelectedWordView {
            tense_label: word.tense_label.clone(),
            pronoun_label: word.pronoun_label.clone(),
            infinitive: word.infinitive.clone(),
            translation: word.translation.clone(),
            orientation: word.orientation,
            length: word.len(),
        })
    }

    /// Row span of the selected word, for the caller's scroll computation.
    pub fn selected_row_span(&self) -> Option<RowSpan> {
        let selection: Selection = self.selection?;
        let word: &GameWord = self.word(selection.word_id)?;
        let (end_row, _) = word.position_of(word.len() - 1);
        let (selected_row, _) = word.position_of(selection.char_index);
        Some(RowSpan {
            start_row: word.row,
            end_row,
            selected_row,
        })
    }

    /// The one place that writes a letter: update the word buffer and the grid
    /// cell together, and pull the crossing word along when the cell is an
    /// intersection and its letter differs.
    fn write_char(
        &mut self,
        word_id: WordId,
        char_index: usize,
        ch: char,
        outcome: &mut EditOutcome,
    ) {
        let Some(word_index) = self.index_by_id.get(&word_id).copied() else {
            return;
        };

        let (row, col, orientation) = {
            let word: &mut GameWord = &mut self.words[word_index];
            if char_index >= word.len() {
                return;
            }
            word.user_entry[char_index] = ch;
            let (row, col) = word.position_of(char_index);
            (row, col, word.orientation)
        };
        if !outcome.touched.contains(&word_id) {
            outcome.touched.push(word_id);
        }

        let crossing: Option<WordRef> = match self.grid.cell_mut(row, col) {
            Some(cell) => {
                cell.set_user_char(orientation, ch);

                // Synchronize the crossing word when its letter differs, so the
                // word buffers and the cell always agree.
                let crossing_orientation: Orientation = orientation.crossing();
                match cell.word_ref(crossing_orientation) {
                    Some(word_ref) if cell.user_char_of(crossing_orientation) != ch => {
                        cell.set_user_char(crossing_orientation, ch);
                        Some(word_ref)
                    }
                    _ => None,
                }
            }
            None => {
                debug!("No cell at ({row}, {col}) for word {word_id}");
                None
            }
        };

        if let Some(word_ref) = crossing
            && let Some(crossing_index) = self.index_by_id.get(&word_ref.word_id).copied()
        {
            self.words[crossing_index].user_entry[word_ref.char_index] = ch;
            if !outcome.touched.contains(&word_ref.word_id) {
                outcome.touched.push(word_ref.word_id);
            }
        }
    }

    fn cell_view(
        &self,
        cell: &GridCell,
        row: usize,
        col: usize,
        selected_word: Option<&GameWord>,
        selected_position: Option<(usize, usize)>,
    ) -> CellView {
        let is_selected: bool = selected_word.is_some_and(|word| {
            cell.word_ref(word.orientation)
                .is_some_and(|word_ref| word_ref.word_id == word.id)
        });
        CellView {
            display_char: cell.user_char(),
            is_selected,
            is_individually_selected: selected_position == Some((row, col)),
            has_error: !cell.is_blank() && cell.has_user_error(),
        }
    }

    /// Whether the word has cells that are visibly blank. Cells filled in through
    /// the crossing word do not count as blank.
    fn has_visible_blanks(&self, word: &GameWord) -> bool {
        (0..word.len()).any(|char_index| {
            let (row, col) = word.position_of(char_index);
            self.grid.cell(row, col).is_some_and(GridCell::is_blank)
        })
    }

    /// Scan the canonical order starting after the current selection, with
    /// wrap-around, for a word matching the predicate, and select it.
    fn select_next_word_matching(
        &mut self,
        predicate: impl Fn(&Game, &GameWord) -> bool,
    ) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let start: usize = match self.selection.and_then(|s| self.index_by_id.get(&s.word_id)) {
            Some(index) => index + 1,
            None => 0,
        };
        for offset in 0..self.words.len() {
            let index: usize = (start + offset) % self.words.len();
            let word_id: WordId = self.words[index].id;
            let already_selected: bool = self.selection.is_some_and(|s| s.word_id == word_id);
            if !already_selected && predicate(self, &self.words[index]) {
                return self.select_word(word_id, None);
            }
        }
        false
    }
}

fn canonical_key(word: &GameWord) -> (usize, usize, u8) {
    let orientation_rank: u8 = match word.orientation {
        Orientation::Across => 0,
        Orientation::Down => 1,
    };
    (word.row, word.col, orientation_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{InfinitiveEnding, IrregularityCategory, SubjectPronoun, Tense};
    use crate::word::WordCandidate;

    fn candidate(answer: &str) -> WordCandidate {
        WordCandidate {
            answer: answer.to_owned(),
            infinitive: format!("{answer}-inf"),
            translation: String::new(),
            tense: Tense::Present,
            pronoun: Some(SubjectPronoun::Yo),
            ending: InfinitiveEnding::Ar,
            category: IrregularityCategory::Regular,
        }
    }

    /// An across word and a down word sharing the cell at (0, 0).
    fn crossing_pair() -> Game {
        let across: GameWord =
            GameWord::from_candidate(0, &candidate("sol"), 0, 0, Orientation::Across);
        let down: GameWord =
            GameWord::from_candidate(1, &candidate("sal"), 0, 0, Orientation::Down);
        Game::from_words(vec![across, down], 5, 5)
    }

    #[test]
    fn first_word_is_auto_selected_at_default_index() {
        let game: Game = crossing_pair();
        let selection: Selection = game.selection().expect("a word must be selected");
        // Canonical order puts the across word first at equal positions.
        assert_eq!(
            game.word(selection.word_id).unwrap().orientation,
            Orientation::Across
        );
        assert_eq!(selection.char_index, 0);
    }

    #[test]
    fn writing_to_one_word_updates_the_crossing_word() {
        let mut game: Game = crossing_pair();
        let down_id: WordId = game
            .words()
            .iter()
            .find(|w| w.orientation == Orientation::Down)
            .unwrap()
            .id;

        game.select_word(down_id, Some(0));
        let outcome: EditOutcome = game.update_char_of_selected_cell('z').unwrap();

        // Both words were touched: the edited one and the crossing one.
        assert_eq!(outcome.touched.len(), 2);

        // The across side of the shared cell reads the new letter, without the
        // across word having been edited directly.
        let cell: &GridCell = game.grid.cell(0, 0).unwrap();
        assert_eq!(cell.user_char_across, 'z');
        assert_eq!(cell.user_char_down, 'z');

        let across_word: &GameWord = game
            .words()
            .iter()
            .find(|w| w.orientation == Orientation::Across)
            .unwrap();
        assert_eq!(across_word.user_entry[0], 'z');
    }

    #[test]
    fn writing_the_same_letter_touches_only_one_word() {
        let mut game: Game = crossing_pair();
        let down_id: WordId = game
            .words()
            .iter()
            .find(|w| w.orientation == Orientation::Down)
            .unwrap()
            .id;

        game.select_word(down_id, Some(0));
        game.update_char_of_selected_cell('z');

        // The crossing letter already reads 'z', so it does not change again.
        game.select_word(down_id, Some(0));
        let outcome: EditOutcome = game.update_char_of_selected_cell('z').unwrap();
        assert_eq!(outcome.touched.len(), 1);
    }

    #[test]
    fn update_char_advances_the_selection() {
        let mut game: Game = crossing_pair();
        game.update_char_of_selected_cell('s');
        assert_eq!(game.selection().unwrap().char_index, 1);

        // The selection clamps at the last letter.
        game.update_char_of_selected_cell('o');
        game.update_char_of_selected_cell('l');
        assert_eq!(game.selection().unwrap().char_index, 2);
    }

    #[test]
    fn text_update_truncates_and_pads() {
        let mut game: Game = crossing_pair();

        // Longer text is truncated to the word length.
        game.update_text_of_selected_word("soleado");
        let entry: Vec<char> = game.selected_word().unwrap().user_entry.clone();
        assert_eq!(entry, vec!['s', 'o', 'l']);

        // Shorter text clears the remainder back to blank.
        game.update_text_of_selected_word("s");
        let entry: Vec<char> = game.selected_word().unwrap().user_entry.clone();
        assert_eq!(entry, vec!['s', BLANK, BLANK]);
    }

    #[test]
    fn text_update_reports_touched_words_once() {
        let mut game: Game = crossing_pair();
        let outcome: EditOutcome = game.update_text_of_selected_word("sol").unwrap();
        // The across word plus the down word crossed at the first letter.
        assert_eq!(outcome.touched.len(), 2);
        let unique: std::collections::HashSet<WordId> =
            outcome.touched.iter().copied().collect();
        assert_eq!(unique.len(), outcome.touched.len());
    }

    #[test]
    fn select_cell_prefers_the_current_orientation() {
        let mut game: Game = crossing_pair();
        let down_id: WordId = game
            .words()
            .iter()
            .find(|w| w.orientation == Orientation::Down)
            .unwrap()
            .id;

        // With the down word selected, clicking the shared cell keeps it.
        game.select_word(down_id, Some(2));
        assert!(game.select_cell(0, 0));
        assert_eq!(game.selection().unwrap().word_id, down_id);

        // After moving to a cell only the across word owns, the shared cell
        // resolves to the across word.
        assert!(game.select_cell(0, 1));
        assert!(game.select_cell(0, 0));
        let selected: &GameWord = game.selected_word().unwrap();
        assert_eq!(selected.orientation, Orientation::Across);
    }

    #[test]
    fn select_next_word_wraps_around() {
        let mut game: Game = crossing_pair();
        let first_id: WordId = game.selection().unwrap().word_id;

        assert!(game.select_next_word());
        let second_id: WordId = game.selection().unwrap().word_id;
        assert_ne!(second_id, first_id);

        assert!(game.select_next_word());
        assert_eq!(game.selection().unwrap().word_id, first_id);
    }

    #[test]
    fn select_next_incomplete_word_skips_answered_words() {
        let mut game: Game = crossing_pair();

        // Answer the across word completely.
        game.update_text_of_selected_word("sol");
        let down_id: WordId = game
            .words()
            .iter()
            .find(|w| w.orientation == Orientation::Down)
            .unwrap()
            .id;

        assert!(game.select_next_incomplete_word());
        assert_eq!(game.selection().unwrap().word_id, down_id);
    }

    #[test]
    fn move_selection_signals_the_boundary() {
        let mut game: Game = crossing_pair();
        assert!(!game.move_selection(-1));
        assert!(game.move_selection(1));
        assert!(game.move_selection(1));
        assert!(!game.move_selection(1));
        assert_eq!(game.selection().unwrap().char_index, 2);
    }

    #[test]
    fn clear_discards_everything() {
        let mut game: Game = crossing_pair();
        game.update_char_of_selected_cell('s');
        game.clear();
        assert!(game.selection().is_none());
        assert_eq!(game.word_count(), 0);
        assert!(game.grid.cell(0, 0).is_none());
        assert!(!game.is_puzzle_complete(false));
    }

    #[test]
    fn completion_requires_correct_letters_when_asked() {
        let mut game: Game = crossing_pair();
        game.update_text_of_selected_word("sxl");
        game.select_next_word();
        game.update_text_of_selected_word("sal");

        // "sxl" fills every cell of the across word, but with an error; the shared
        // first letter was corrected through the down word.
        assert!(game.is_puzzle_complete(false));
        assert!(!game.is_puzzle_complete(true));

        game.select_next_word();
        game.update_text_of_selected_word("sol");
        assert!(game.is_puzzle_complete(true));
    }

    #[test]
    fn cell_views_mark_selection_and_errors() {
        let mut game: Game = crossing_pair();
        game.update_char_of_selected_cell('x');

        let views: Vec<Vec<Option<CellView>>> = game.cell_views();
        let origin: CellView = views[0][0].expect("cell at origin");
        assert!(origin.is_selected);
        assert!(!origin.is_individually_selected);
        assert!(origin.has_error);
        assert_eq!(origin.display_char, 'x');

        let next: CellView = views[0][1].expect("cell at (0, 1)");
        assert!(next.is_individually_selected);
        assert!(!next.has_error);

        // (1, 0) belongs to the down word only.
        let below: CellView = views[1][0].expect("cell at (1, 0)");
        assert!(!below.is_selected);
    }

    #[test]
    fn row_span_follows_the_selected_word() {
        let mut game: Game = crossing_pair();
        assert_eq!(
            game.selected_row_span(),
            Some(RowSpan {
                start_row: 0,
                end_row: 0,
                selected_row: 0
            })
        );

        let down_id: WordId = game
            .words()
            .iter()
            .find(|w| w.orientation == Orientation::Down)
            .unwrap()
            .id;
        game.select_word(down_id, Some(1));
        assert_eq!(
            game.selected_row_span(),
            Some(RowSpan {
                start_row: 0,
                end_row: 2,
                selected_row: 1
            })
        );
    }
}
