/*
word.rs

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

//! Placed words and word candidates.
//!
//! A [`WordCandidate`] is a conjugated verb form, with its clue metadata, that the
//! placer may bind to a grid position. A [`GameWord`] is the placed result: it owns
//! the player's entry buffer for that word. Grid cells reference words by
//! identifier and offset, never by pointer, so the buffer has a single owner (see
//! [`crate::grid`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::options::{GameOptions, InfinitiveEnding, IrregularityCategory, SubjectPronoun, Tense};
use crate::stats;

/// Marker for a cell position that the player has not filled in yet.
/// Distinct from every letter a puzzle answer can contain.
pub const BLANK: char = '\u{0}';

/// Identifier of a placed word, stable for the lifetime of a game.
pub type WordId = usize;

/// Direction of a placed word.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    /// The perpendicular direction.
    pub fn crossing(&self) -> Self {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Across => write!(f, "across"),
            Orientation::Down => write!(f, "down"),
        }
    }
}

/// A conjugated verb form offered to the placer.
///
/// The clue metadata is carried through to the [`GameWord`] unchanged; the placer
/// only looks at the answer text.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WordCandidate {
    /// The conjugated verb form, which is the answer in the puzzle.
    pub answer: String,

    /// Infinitive clue (for example, "hablar").
    pub infinitive: String,

    /// English translation of the infinitive.
    pub translation: String,

    /// Tense of the conjugated form.
    pub tense: Tense,

    /// Subject pronoun, or None for gerunds and past participles.
    pub pronoun: Option<SubjectPronoun>,

    /// Ending of the infinitive.
    pub ending: InfinitiveEnding,

    /// Irregularity category of the verb.
    pub category: IrregularityCategory,
}

impl WordCandidate {
    /// Key identifying the verb form in persisted storage.
    ///
    /// A conjugated form can be duplicated between two tenses (imperative and
    /// subjunctive for instance), so the answer text alone is not a key.
    pub fn unique_key(&self) -> String {
        let pronoun: &str = match self.pronoun {
            Some(p) => p.text(),
            None => "na",
        };
        format!("{}|{:?}|{}", self.infinitive, self.tense, pronoun)
    }

    /// Label of the subject pronoun, empty for gerunds and past participles.
    pub fn pronoun_label(&self) -> String {
        self.pronoun.map(|p| p.text().to_owned()).unwrap_or_default()
    }

    /// Whether the candidate matches the enabled game options.
    pub fn matches(&self, options: &GameOptions) -> bool {
        if !options.qualifying_tenses().contains(&self.tense) {
            return false;
        }
        if !options.qualifying_endings().contains(&self.ending) {
            return false;
        }
        if !options.qualifying_categories().contains(&self.category) {
            return false;
        }
        match self.pronoun {
            Some(p) => options.qualifying_pronouns().contains(&p),
            // Gerunds and past participles have no pronoun and always qualify.
            None => true,
        }
    }
}

impl fmt::Display for WordCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.infinitive, self.answer)
    }
}

/// Source of word candidates for a new puzzle.
///
/// The conjugation rule engine that produces verb forms is an external
/// collaborator; the game only depends on this interface. The built-in
/// [`crate::wordlist`] module provides a small implementation for the
/// command-line front end.
pub trait CandidateSource {
    /// Return at most `target_count` candidates matching the enabled options.
    fn candidates(&self, options: &GameOptions, target_count: usize) -> Vec<WordCandidate>;
}

/// A word placed in the puzzle, with the player's entry buffer.
#[derive(Debug, Clone)]
pub struct GameWord {
    /// Stable identifier, assigned at placement or reconstruction time.
    pub id: WordId,

    /// Key identifying the word in persisted storage.
    pub unique_key: String,

    /// The answer, one element per letter. Never mutated after placement.
    pub answer: Vec<char>,

    /// Clue label for the tense (for example, "Preterit tense of").
    pub tense_label: String,

    /// Subject pronoun label, empty for gerunds and past participles.
    pub pronoun_label: String,

    /// Infinitive clue.
    pub infinitive: String,

    /// English translation of the infinitive.
    pub translation: String,

    /// Index of the word in the stats heat map.
    pub stats_index: usize,

    /// Row of the first letter.
    pub row: usize,

    /// Column of the first letter.
    pub col: usize,

    /// Direction of the word.
    pub orientation: Orientation,

    /// Letters entered by the player, same length as the answer. Positions the
    /// player has not filled hold [`BLANK`].
    pub user_entry: Vec<char>,
}

impl GameWord {
    /// Create a word from a placed candidate, with an empty entry buffer.
    pub fn from_candidate(
        id: WordId,
        candidate: &WordCandidate,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Self {
        let answer: Vec<char> = candidate.answer.chars().collect();
        let len: usize = answer.len();
        Self {
            id,
            unique_key: candidate.unique_key(),
            answer,
            tense_label: candidate.tense.clue_label().to_owned(),
            pronoun_label: candidate.pronoun_label(),
            infinitive: candidate.infinitive.clone(),
            translation: candidate.translation.clone(),
            stats_index: stats::stats_index(candidate.tense, candidate.ending, candidate.category),
            row,
            col,
            orientation,
            user_entry: vec![BLANK; len],
        }
    }

    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.answer.len()
    }

    /// Whether the word has no letters. Never true for a placed word.
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// The answer as text.
    pub fn answer_text(&self) -> String {
        self.answer.iter().collect()
    }

    /// Grid position of the letter at the given index.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Across => (self.row, self.col + index),
            Orientation::Down => (self.row + index, self.col),
        }
    }

    /// Whether every position of the entry buffer matches the answer.
    pub fn is_answered_completely_and_correctly(&self) -> bool {
        self.user_entry == self.answer
    }

    /// Whether the player entered a wrong letter somewhere. A [`BLANK`] position is
    /// not yet answered, not wrong.
    pub fn has_errored_cells(&self) -> bool {
        self.user_entry
            .iter()
            .zip(self.answer.iter())
            .any(|(entry, answer)| entry != answer && *entry != BLANK)
    }

    /// Index to select when the word is auto-selected: the first letter that needs
    /// changing, or the last letter if the word is already fully correct.
    pub fn default_selection_index(&self) -> usize {
        for (i, answer) in self.answer.iter().enumerate() {
            if self.user_entry[i] != *answer {
                return i;
            }
        }
        self.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn test_candidate(answer: &str) -> WordCandidate {
        WordCandidate {
            answer: answer.to_owned(),
            infinitive: "hablar".to_owned(),
            translation: "to speak".to_owned(),
            tense: Tense::Present,
            pronoun: Some(SubjectPronoun::Yo),
            ending: InfinitiveEnding::Ar,
            category: IrregularityCategory::Regular,
        }
    }

    #[test]
    fn correctness_requires_exact_match() {
        let mut word: GameWord =
            GameWord::from_candidate(0, &test_candidate("hablo"), 0, 0, Orientation::Across);
        assert!(!word.is_answered_completely_and_correctly());

        word.user_entry = "hablo".chars().collect();
        assert!(word.is_answered_completely_and_correctly());

        word.user_entry[2] = 'x';
        assert!(!word.is_answered_completely_and_correctly());
    }

    #[test]
    fn blank_is_unanswered_not_wrong() {
        let mut word: GameWord =
            GameWord::from_candidate(0, &test_candidate("hablo"), 0, 0, Orientation::Across);
        assert!(!word.has_errored_cells());

        word.user_entry[0] = 'x';
        assert!(word.has_errored_cells());

        word.user_entry[0] = 'h';
        assert!(!word.has_errored_cells());
    }

    #[test]
    fn default_selection_lands_on_first_wrong_letter() {
        let mut word: GameWord =
            GameWord::from_candidate(0, &test_candidate("hablo"), 0, 0, Orientation::Across);
        assert_eq!(word.default_selection_index(), 0);

        word.user_entry[0] = 'h';
        assert_eq!(word.default_selection_index(), 1);

        word.user_entry = "hablo".chars().collect();
        assert_eq!(word.default_selection_index(), word.len() - 1);
    }

    #[test]
    fn positions_follow_orientation() {
        let across: GameWord =
            GameWord::from_candidate(0, &test_candidate("hablo"), 2, 3, Orientation::Across);
        assert_eq!(across.position_of(2), (2, 5));

        let down: GameWord =
            GameWord::from_candidate(1, &test_candidate("hablo"), 2, 3, Orientation::Down);
        assert_eq!(down.position_of(2), (4, 3));
    }

    #[test]
    fn unique_key_distinguishes_tenses() {
        let mut candidate: WordCandidate = test_candidate("hable");
        let present_key: String = candidate.unique_key();
        candidate.tense = Tense::SubjunctivePresent;
        assert_ne!(candidate.unique_key(), present_key);
    }
}
