/*
placer.rs

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

//! Arrange word candidates into a crossword grid.
//!
//! The placer works in one greedy pass: the first candidate is seeded at the
//! origin, and every subsequent candidate is tried against the letters of the
//! already-placed words, in the orientation perpendicular to the matched word.
//! Among the legal positions for a candidate, the placer keeps the one that
//! creates the most intersections, breaking ties by scanning order so that a fixed
//! candidate order always produces the same layout.
//!
//! A candidate with no legal position is skipped, not an error: the caller checks
//! the size of the placed set and may retry with other dimensions or another
//! candidate sample (see [`crate::setup`]).

use log::debug;
use std::collections::HashMap;

use crate::grid::{Grid, WordRef};
use crate::word::{GameWord, Orientation, WordCandidate, WordId};

/// Minimum answer length for a placeable candidate.
const MIN_WORD_LEN: usize = 2;

/// Outcome of a placement run: the words that found a position, bound to their
/// coordinates, and the resulting cell grid.
#[derive(Debug)]
pub struct PlacementResult {
    /// The placed words, in placement order. May be a strict subset of the
    /// candidates.
    pub words: Vec<GameWord>,

    /// The cell grid the words were placed into.
    pub grid: Grid,
}

/// A candidate attempt position, with the number of intersections it would create.
struct ScoredPosition {
    row: usize,
    col: usize,
    crossings: usize,
}

/// Candidate wrapper tracking how far the placed-word list was already scanned,
/// per orientation, so a retried candidate only looks at words placed since its
/// last attempt.
struct CandidateSlot {
    candidate: WordCandidate,
    answer: Vec<char>,
    last_tried_across: isize,
    last_tried_down: isize,
}

impl CandidateSlot {
    fn new(candidate: WordCandidate) -> Self {
        let answer: Vec<char> = candidate.answer.chars().collect();
        Self {
            candidate,
            answer,
            last_tried_across: -1,
            last_tried_down: -1,
        }
    }

    fn last_tried(&self, orientation: Orientation) -> isize {
        match orientation {
            Orientation::Across => self.last_tried_across,
            Orientation::Down => self.last_tried_down,
        }
    }

    fn set_last_tried(&mut self, orientation: Orientation, position: isize) {
        match orientation {
            Orientation::Across => self.last_tried_across = position,
            Orientation::Down => self.last_tried_down = position,
        }
    }
}

/// Place as many candidates as legally possible into a grid of the given
/// dimensions.
///
/// Candidates are first ordered by roughly descending length (see
/// [`sort_candidates`]), then placed one by one. The run is deterministic for a
/// fixed candidate order.
pub fn place(candidates: &[WordCandidate], width: usize, height: usize) -> PlacementResult {
    let mut grid: Grid = Grid::new(width, height);
    let mut words: Vec<GameWord> = Vec::new();

    let mut slots: Vec<CandidateSlot> = sort_candidates(candidates.to_vec())
        .into_iter()
        .map(CandidateSlot::new)
        .collect();

    let mut orientation: Orientation = Orientation::Across;
    let mut is_first_word: bool = true;
    let mut last_gasp_effort_taken: bool = false;
    let mut next_id: WordId = 0;

    let mut i: usize = 0;
    while i < slots.len() {
        let placed: Option<GameWord> = try_place_candidate(
            &mut grid,
            &words,
            &mut slots[i],
            orientation,
            is_first_word,
            next_id,
        );

        match placed {
            Some(word) => {
                debug!(
                    "Placed {} {} at ({}, {})",
                    word.answer_text(),
                    word.orientation,
                    word.row,
                    word.col
                );
                words.push(word);
                slots.remove(i);
                next_id += 1;

                // Start over at the beginning of the list for the next word:
                // earlier candidates that failed may now have a crossing available.
                i = 0;
                orientation = orientation.crossing();
                is_first_word = false;
                last_gasp_effort_taken = false;
            }
            None => {
                // Before giving up, make one last pass with the opposite
                // orientation.
                if !last_gasp_effort_taken && i == slots.len() - 1 {
                    last_gasp_effort_taken = true;
                    orientation = orientation.crossing();
                    i = 0;
                } else {
                    i += 1;
                }
            }
        }
    }

    for slot in &slots {
        debug!("No legal position for {}", slot.candidate);
    }
    debug!(
        "Placement done: {} of {} candidates placed",
        words.len(),
        candidates.len()
    );
    PlacementResult { words, grid }
}

/// Dry run: whether every candidate of the set can be mutually placed into a grid
/// of the given dimensions.
///
/// A negative result is an ordinary outcome, not an error. The check performs the
/// same legality rules as [`place`] on a scratch grid and does not mutate any
/// caller state.
pub fn fits_in_grid(candidates: &[WordCandidate], width: usize, height: usize) -> bool {
    let result: PlacementResult = place(candidates, width, height);
    result.words.len() == candidates.len()
}

/// Whether previously placed words all lie within a grid of the given dimensions.
/// Used to validate a persisted game against the current grid size before
/// replaying it.
pub fn words_fit_in_grid(words: &[GameWord], width: usize, height: usize) -> bool {
    words.iter().all(|word| {
        let (end_row, end_col) = word.position_of(word.len() - 1);
        word.row < height && word.col < width && end_row < height && end_col < width
    })
}

/// Write a word into the grid: create the missing cells and bind the word
/// reference and the player's letters for the word's orientation.
///
/// The cell might already exist because of a word in the other direction; in that
/// case its answer letter is kept (placement legality guarantees it is equal).
/// Also used when replaying a persisted game into a fresh grid, which re-derives
/// the intersections.
pub fn add_to_grid(word: &GameWord, grid: &mut Grid) {
    for (char_index, ch) in word.answer.iter().enumerate() {
        let (row, col) = word.position_of(char_index);
        let cell = grid.cell_or_insert(row, col, *ch);
        let word_ref: WordRef = WordRef {
            word_id: word.id,
            char_index,
        };
        match word.orientation {
            Orientation::Across => {
                cell.across = Some(word_ref);
                cell.user_char_across = word.user_entry[char_index];
            }
            Orientation::Down => {
                cell.down = Some(word_ref);
                cell.user_char_down = word.user_entry[char_index];
            }
        }
    }
}

/// Order candidates by roughly descending answer length.
///
/// Sorting strictly by length would favor the pronouns and tenses that produce the
/// longest conjugations, so the sorted list is split into per-pronoun-and-tense
/// groups and the groups are interweaved, longest of each group first.
pub fn sort_candidates(mut candidates: Vec<WordCandidate>) -> Vec<WordCandidate> {
    candidates.sort_by(|a, b| b.answer.chars().count().cmp(&a.answer.chars().count()));

    // Group by pronoun and tense, preserving the first-seen group order so the
    // result stays deterministic.
    let mut group_keys: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<WordCandidate>> = HashMap::new();
    for candidate in candidates {
        let key: String = format!("{:?}_{:?}", candidate.pronoun, candidate.tense);
        if !groups.contains_key(&key) {
            group_keys.push(key.clone());
        }
        groups.entry(key).or_default().push(candidate);
    }

    // Interweave the groups.
    let total: usize = groups.values().map(Vec::len).sum();
    let mut result: Vec<WordCandidate> = Vec::with_capacity(total);
    while result.len() < total {
        for key in &group_keys {
            if let Some(group) = groups.get_mut(key)
                && !group.is_empty()
            {
                result.push(group.remove(0));
            }
        }
    }
    result
}

/// Try to place one candidate, preferring the legal position that creates the most
/// intersections. Return the resulting word if a position was found.
fn try_place_candidate(
    grid: &mut Grid,
    placed_words: &[GameWord],
    slot: &mut CandidateSlot,
    orientation: Orientation,
    is_first_word: bool,
    id: WordId,
) -> Option<GameWord> {
    let mut best: Option<ScoredPosition> = None;

    if is_first_word {
        if location_crossings(grid, &slot.answer, 0, 0, orientation, true).is_some() {
            best = Some(ScoredPosition {
                row: 0,
                col: 0,
                crossings: 0,
            });
        }
        slot.set_last_tried(orientation, 0);
    } else {
        let last_tried: isize = slot.last_tried(orientation);

        // Traverse the laid-down words backwards, skipping the ones this candidate
        // was already tried against in this orientation.
        let mut word_index: isize = placed_words.len() as isize - 1;
        while word_index > last_tried {
            let placed: &GameWord = &placed_words[word_index as usize];
            if placed.orientation != orientation {
                scan_word_for_positions(grid, &slot.answer, placed, orientation, &mut best);
            }
            word_index -= 1;
        }
        slot.set_last_tried(orientation, placed_words.len() as isize - 1);
    }

    best.map(|position| {
        let word: GameWord = GameWord::from_candidate(
            id,
            &slot.candidate,
            position.row,
            position.col,
            orientation,
        );
        add_to_grid(&word, grid);
        word
    })
}

/// Scan the letters of one placed word for alignments with the candidate, keeping
/// the best-scoring legal position in `best`. Ties keep the earliest-found
/// position.
fn scan_word_for_positions(
    grid: &Grid,
    answer: &[char],
    placed: &GameWord,
    orientation: Orientation,
    best: &mut Option<ScoredPosition>,
) {
    // Letters of the placed word, backwards.
    for i_char in (0..placed.answer.len()).rev() {
        let letter: char = placed.answer[i_char];

        // Every occurrence of that letter in the candidate.
        for (index_of_char, _) in answer.iter().enumerate().filter(|(_, c)| **c == letter) {
            // Align the candidate through the shared letter, perpendicular to the
            // placed word.
            let (row, col): (isize, isize) = match placed.orientation {
                Orientation::Across => (
                    placed.row as isize - index_of_char as isize,
                    (placed.col + i_char) as isize,
                ),
                Orientation::Down => (
                    (placed.row + i_char) as isize,
                    placed.col as isize - index_of_char as isize,
                ),
            };

            if let Some(crossings) = location_crossings(grid, answer, row, col, orientation, false)
                && best.as_ref().is_none_or(|b| crossings > b.crossings)
            {
                *best = Some(ScoredPosition {
                    row: row as usize,
                    col: col as usize,
                    crossings,
                });
            }
        }
    }
}

/// Whether the candidate can legally occupy the given position, and with how many
/// intersections.
///
/// Legality: every cell within bounds; every already-populated cell holds the same
/// answer letter and has no word in the candidate's own orientation; empty cells
/// have no occupied neighbor along the candidate (and none just before the first
/// or just after the last letter). Except for the first word of the grid, at least
/// one intersection is required.
fn location_crossings(
    grid: &Grid,
    answer: &[char],
    starting_row: isize,
    starting_col: isize,
    orientation: Orientation,
    is_first_word: bool,
) -> Option<usize> {
    let word_len: usize = answer.len();
    if word_len < MIN_WORD_LEN {
        return None;
    }
    if starting_row < 0 || starting_col < 0 {
        return None;
    }

    let row: usize = starting_row as usize;
    let col: usize = starting_col as usize;
    match orientation {
        Orientation::Across => {
            if row >= grid.height || col + word_len > grid.width {
                return None;
            }
        }
        Orientation::Down => {
            if col >= grid.width || row + word_len > grid.height {
                return None;
            }
        }
    }

    // The first word only has to fit physically.
    if is_first_word {
        return Some(0);
    }

    let mut crossings: usize = 0;
    for (char_index, ch) in answer.iter().enumerate() {
        let (cell_row, cell_col): (usize, usize) = match orientation {
            Orientation::Across => (row, col + char_index),
            Orientation::Down => (row + char_index, col),
        };

        match grid.cell(cell_row, cell_col) {
            Some(cell) => {
                // Letter conflict: never overwrite a populated cell.
                if cell.answer_char != *ch {
                    return None;
                }
                // A word in the same direction already runs through the cell.
                if cell.word_ref(orientation).is_some() {
                    return None;
                }
                crossings += 1;
            }
            None => {
                // The cell is free: the adjacent positions must also be free, so
                // the candidate does not create accidental letter runs along an
                // existing word.
                let first: bool = char_index == 0;
                let last: bool = char_index == word_len - 1;
                let blocked: bool = match orientation {
                    Orientation::Across => {
                        (cell_row > 0 && grid.is_occupied(cell_row - 1, cell_col))
                            || grid.is_occupied(cell_row + 1, cell_col)
                            || (first && cell_col > 0 && grid.is_occupied(cell_row, cell_col - 1))
                            || (last && grid.is_occupied(cell_row, cell_col + 1))
                    }
                    Orientation::Down => {
                        (cell_col > 0 && grid.is_occupied(cell_row, cell_col - 1))
                            || grid.is_occupied(cell_row, cell_col + 1)
                            || (first && cell_row > 0 && grid.is_occupied(cell_row - 1, cell_col))
                            || (last && grid.is_occupied(cell_row + 1, cell_col))
                    }
                };
                if blocked {
                    return None;
                }
            }
        }
    }

    if crossings > 0 { Some(crossings) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{InfinitiveEnding, IrregularityCategory, SubjectPronoun, Tense};

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

    fn sample_candidates() -> Vec<WordCandidate> {
        ["hablamos", "comemos", "vivo", "hablas", "sales", "miras", "beben", "toman"]
            .iter()
            .map(|answer| candidate(answer))
            .collect()
    }

    #[test]
    fn first_word_is_seeded_at_origin() {
        let result: PlacementResult = place(&[candidate("hablo")], 10, 10);
        assert_eq!(result.words.len(), 1);
        assert_eq!(result.words[0].row, 0);
        assert_eq!(result.words[0].col, 0);
        assert_eq!(result.words[0].orientation, Orientation::Across);
    }

    #[test]
    fn second_word_crosses_the_first() {
        let result: PlacementResult = place(&[candidate("hablo"), candidate("bebe")], 10, 10);
        assert_eq!(result.words.len(), 2);

        let down: &GameWord = &result.words[1];
        assert_eq!(down.orientation, Orientation::Down);

        // The down word must share a cell with the across word.
        let crossing = result
            .grid
            .iter_cells()
            .find(|(_, _, cell)| cell.is_intersection());
        assert!(crossing.is_some());
    }

    #[test]
    fn intersections_are_consistent() {
        let result: PlacementResult = place(&sample_candidates(), 15, 15);
        assert!(result.words.len() > 2);

        for (_, _, cell) in result.grid.iter_cells() {
            if let (Some(across), Some(down)) = (cell.across, cell.down) {
                let across_word: &GameWord = &result.words[across.word_id];
                let down_word: &GameWord = &result.words[down.word_id];
                assert_eq!(
                    across_word.answer[across.char_index],
                    down_word.answer[down.char_index],
                );
                assert_eq!(across_word.answer[across.char_index], cell.answer_char);
            }
        }
    }

    #[test]
    fn every_word_after_the_first_crosses_another() {
        let result: PlacementResult = place(&sample_candidates(), 15, 15);
        for word in result.words.iter().skip(1) {
            let crosses: bool = (0..word.len()).any(|i| {
                let (row, col) = word.position_of(i);
                result
                    .grid
                    .cell(row, col)
                    .is_some_and(|cell| cell.is_intersection())
            });
            assert!(crosses, "{} does not cross any word", word.answer_text());
        }
    }

    #[test]
    fn unplaceable_candidate_is_skipped() {
        // No letter in common with the first word, so no crossing exists.
        let result: PlacementResult = place(&[candidate("pan"), candidate("club")], 10, 10);
        assert_eq!(result.words.len(), 1);
    }

    #[test]
    fn placement_is_deterministic() {
        let candidates: Vec<WordCandidate> = sample_candidates();
        let first: PlacementResult = place(&candidates, 15, 15);
        let second: PlacementResult = place(&candidates, 15, 15);

        let layout = |result: &PlacementResult| -> Vec<(String, usize, usize, Orientation)> {
            result
                .words
                .iter()
                .map(|w| (w.answer_text(), w.row, w.col, w.orientation))
                .collect()
        };
        assert_eq!(layout(&first), layout(&second));
    }

    #[test]
    fn equal_words_do_not_fit_a_one_cell_grid() {
        assert!(!fits_in_grid(&[candidate("a"), candidate("a")], 1, 1));
        assert!(!fits_in_grid(&[candidate("sol"), candidate("sol")], 1, 1));
    }

    #[test]
    fn fits_in_grid_accepts_a_crossing_pair() {
        assert!(fits_in_grid(&[candidate("hablo"), candidate("bebe")], 10, 10));
    }

    #[test]
    fn words_fit_checks_span_bounds() {
        let result: PlacementResult = place(&[candidate("hablo")], 10, 10);
        assert!(words_fit_in_grid(&result.words, 10, 10));
        assert!(words_fit_in_grid(&result.words, 5, 1));
        assert!(!words_fit_in_grid(&result.words, 4, 4));
    }

    #[test]
    fn sorted_candidates_lead_with_longer_answers() {
        let sorted: Vec<WordCandidate> =
            sort_candidates(vec![candidate("va"), candidate("hablamos"), candidate("come")]);
        assert_eq!(sorted[0].answer, "hablamos");
    }
}
