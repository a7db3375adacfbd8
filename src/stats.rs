/*
stats.rs

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

//! Completion statistics and the heat-map index.
//!
//! Every verb form is classified along three axes: tense, infinitive ending, and
//! irregularity category. The heat map shows the classification on a 2-D grid with
//! the tenses as columns and the ending within the irregularity category as rows.
//! [`stats_index`] encodes a classification as a linear index, and
//! [`coordinates`] decodes an index back to its column and row; the two functions
//! are exact inverses over `[0, ROW_COUNT * COLUMN_COUNT)`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

use crate::options::{
    ALL_CATEGORIES, ALL_ENDINGS, ALL_TENSES, InfinitiveEnding, IrregularityCategory, Tense,
};
use crate::word::GameWord;

/// Number of columns in the heat map, one per tense.
pub const COLUMN_COUNT: usize = ALL_TENSES.len();

/// Number of rows in the heat map, one per irregularity category and ending pair.
pub const ROW_COUNT: usize = ALL_CATEGORIES.len() * ALL_ENDINGS.len();

/// Linear heat-map index for a verb form classification.
pub fn stats_index(
    tense: Tense,
    ending: InfinitiveEnding,
    category: IrregularityCategory,
) -> usize {
    let row: usize = category.stats_ordinal() * ALL_ENDINGS.len() + ending.stats_ordinal();
    row * COLUMN_COUNT + tense.stats_ordinal()
}

/// Column and row of a stats index, where (0, 0) is the top left of the heat map.
pub fn coordinates(index: usize) -> (usize, usize) {
    (index % COLUMN_COUNT, index / COLUMN_COUNT)
}

/// Decode a stats index back to its classification, or None when the index is out
/// of the heat-map range.
pub fn classification(
    index: usize,
) -> Option<(Tense, InfinitiveEnding, IrregularityCategory)> {
    let (x, y) = coordinates(index);
    let tense: Tense = Tense::from_repr(x)?;
    let ending: InfinitiveEnding = InfinitiveEnding::from_repr(y % ALL_ENDINGS.len())?;
    let category: IrregularityCategory = IrregularityCategory::from_repr(y / ALL_ENDINGS.len())?;
    Some((tense, ending, category))
}

/// Completion counters for the stats heat map.
///
/// Each counter records how many words of one classification the player completed
/// over all games. The object is persisted by [`crate::saver::stats`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GameStats {
    /// Completion count per stats index.
    counts: HashMap<usize, usize>,

    /// When the player last completed a game.
    pub last_completed: Option<SystemTime>,
}

impl GameStats {
    /// Create an empty [`GameStats`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the words of a completed game to the counters.
    pub fn record_words(&mut self, words: &[GameWord]) {
        for word in words {
            *self.counts.entry(word.stats_index).or_insert(0) += 1;
        }
        self.last_completed = Some(SystemTime::now());
    }

    /// Increment the counter of one stats index.
    pub fn record_index(&mut self, index: usize) {
        *self.counts.entry(index).or_insert(0) += 1;
    }

    /// The completion count for one stats index.
    pub fn count(&self, index: usize) -> usize {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Total number of completed words over all games.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coordinates_are_inverses() {
        for index in 0..ROW_COUNT * COLUMN_COUNT {
            let (tense, ending, category) =
                classification(index).expect("index within heat-map range");
            assert_eq!(stats_index(tense, ending, category), index);

            let (x, y) = coordinates(index);
            assert_eq!(y * COLUMN_COUNT + x, index);
        }
    }

    #[test]
    fn classification_rejects_out_of_range_indexes() {
        assert!(classification(ROW_COUNT * COLUMN_COUNT).is_none());
    }

    #[test]
    fn index_places_category_on_row_groups() {
        let index: usize = stats_index(
            Tense::Preterit,
            InfinitiveEnding::Er,
            IrregularityCategory::StemChange,
        );
        // Row = 2 * 3 + 1, column = 1.
        assert_eq!(coordinates(index), (1, 7));
    }

    #[test]
    fn recording_words_sets_the_completion_time() {
        use crate::options::SubjectPronoun;
        use crate::word::{Orientation, WordCandidate};

        let candidate = WordCandidate {
            answer: "hablo".to_owned(),
            infinitive: "hablar".to_owned(),
            translation: "to speak".to_owned(),
            tense: Tense::Present,
            pronoun: Some(SubjectPronoun::Yo),
            ending: InfinitiveEnding::Ar,
            category: IrregularityCategory::Regular,
        };
        let word: GameWord = GameWord::from_candidate(0, &candidate, 0, 0, Orientation::Across);

        let mut stats: GameStats = GameStats::new();
        assert!(stats.last_completed.is_none());
        stats.record_words(&[word]);
        assert_eq!(stats.total(), 1);
        assert_eq!(
            stats.count(stats_index(
                Tense::Present,
                InfinitiveEnding::Ar,
                IrregularityCategory::Regular
            )),
            1
        );
        assert!(stats.last_completed.is_some());
    }

    #[test]
    fn counters_accumulate_per_index() {
        let mut stats: GameStats = GameStats::new();
        stats.record_index(4);
        stats.record_index(4);
        stats.record_index(9);
        assert_eq!(stats.count(4), 2);
        assert_eq!(stats.count(9), 1);
        assert_eq!(stats.count(0), 0);
        assert_eq!(stats.total(), 3);
    }
}
