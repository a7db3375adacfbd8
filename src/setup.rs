/*
setup.rs

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

//! Build games in the background.
//!
//! Placement can take a while on large grids, so [`GameSetup`] runs it in a worker
//! thread and delivers the finished [`Game`] over an [`async_channel`] channel.
//! Every request bumps a generation counter and every result carries the
//! generation of its request: when the user starts a new game while a previous one
//! is still being built, the owner drops the late result with
//! [`GameSetup::is_current`].
//!
//! The synchronous [`create_game`] and [`restore_game`] functions do the actual
//! work and can be called directly when blocking is acceptable.

use async_channel::Receiver;
use log::{debug, warn};
use std::thread;

use crate::game::Game;
use crate::grid::Grid;
use crate::placer::{self, PlacementResult};
use crate::saver::game::SavedGame;
use crate::word::{GameWord, WordCandidate};

/// A finished setup request.
#[derive(Debug)]
pub enum SetupEvent {
    /// A new game was created. The game may hold fewer words than requested, or
    /// none at all, when candidates did not fit the grid.
    Created(Game),

    /// A saved game was restored. None when no usable word record remained.
    Restored(Option<Game>),
}

/// A setup result tagged with the generation of its request.
#[derive(Debug)]
pub struct SetupResult {
    /// Generation of the request that produced this result.
    pub generation: u64,

    /// The finished game.
    pub event: SetupEvent,
}

/// Build a new game from the given candidates.
pub fn create_game(candidates: &[WordCandidate], width: usize, height: usize) -> Game {
    let result: PlacementResult = placer::place(candidates, width, height);
    debug!(
        "Placed {} of {} candidates on the {width}x{height} grid",
        result.words.len(),
        candidates.len()
    );
    Game::from_placement(result)
}

/// Rebuild the game from its saved records.
///
/// Each record is validated independently: a record that does not fit the saved
/// grid dimensions, or whose answer disagrees with an already restored word at a
/// shared cell, is dropped with a warning rather than failing the whole restore.
/// Return None when no usable record remains.
pub fn restore_game(saved: &SavedGame) -> Option<Game> {
    let mut grid: Grid = Grid::new(saved.width, saved.height);
    let mut words: Vec<GameWord> = Vec::new();

    for record in &saved.words {
        let Some(word) = record.to_word(words.len()) else {
            continue;
        };
        if !placer::words_fit_in_grid(std::slice::from_ref(&word), saved.width, saved.height) {
            warn!("Dropping the saved word outside the grid: {}", word.infinitive);
            continue;
        }
        if conflicts_with_grid(&word, &grid) {
            warn!(
                "Dropping the saved word that disagrees at a shared cell: {}",
                word.infinitive
            );
            continue;
        }
        placer::add_to_grid(&word, &mut grid);
        words.push(word);
    }

    if words.is_empty() {
        return None;
    }
    Some(Game::from_words(words, saved.width, saved.height))
}

/// Whether the word's answer disagrees with an occupied cell.
fn conflicts_with_grid(word: &GameWord, grid: &Grid) -> bool {
    word.answer.iter().enumerate().any(|(char_index, ch)| {
        let (row, col) = word.position_of(char_index);
        grid.cell(row, col)
            .is_some_and(|cell| cell.answer_char != *ch)
    })
}

/// Owner of the setup worker threads and the request generation counter.
#[derive(Debug, Default)]
pub struct GameSetup {
    /// Generation of the latest request.
    generation: u64,
}

impl GameSetup {
    /// Create a [`GameSetup`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new game in a worker thread.
    ///
    /// Return the channel on which the result is delivered.
    pub fn start_create(
        &mut self,
        candidates: Vec<WordCandidate>,
        width: usize,
        height: usize,
    ) -> Receiver<SetupResult> {
        let generation: u64 = self.next_generation();
        let (sender, receiver) = async_channel::bounded::<SetupResult>(1);

        thread::spawn(move || {
            let game: Game = create_game(&candidates, width, height);
            // The send fails when the owner dropped the channel, which already
            // means that the result is not wanted anymore.
            let _ = sender.send_blocking(SetupResult {
                generation,
                event: SetupEvent::Created(game),
            });
        });
        receiver
    }

    /// Restore the saved game in a worker thread.
    ///
    /// Return the channel on which the result is delivered.
    pub fn start_restore(&mut self, saved: SavedGame) -> Receiver<SetupResult> {
        let generation: u64 = self.next_generation();
        let (sender, receiver) = async_channel::bounded::<SetupResult>(1);

        thread::spawn(move || {
            let game: Option<Game> = restore_game(&saved);
            let _ = sender.send_blocking(SetupResult {
                generation,
                event: SetupEvent::Restored(game),
            });
        });
        receiver
    }

    /// Whether the result belongs to the latest request. The owner must drop
    /// results from superseded requests.
    pub fn is_current(&self, result: &SetupResult) -> bool {
        result.generation == self.generation
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{InfinitiveEnding, IrregularityCategory, SubjectPronoun, Tense};
    use crate::saver::game::PersistedWord;
    use crate::word::Orientation;

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

    fn record(answer: &str, row: usize, col: usize, orientation: Orientation) -> PersistedWord {
        let word: GameWord =
            GameWord::from_candidate(0, &candidate(answer), row, col, orientation);
        PersistedWord::from_word(&word)
    }

    #[test]
    fn worker_delivers_the_created_game() {
        let mut setup: GameSetup = GameSetup::new();
        let receiver = setup.start_create(vec![candidate("hablo"), candidate("bebe")], 10, 10);

        let result: SetupResult = receiver.recv_blocking().expect("worker result");
        assert!(setup.is_current(&result));
        match result.event {
            SetupEvent::Created(game) => assert_eq!(game.word_count(), 2),
            SetupEvent::Restored(_) => panic!("expected a created game"),
        }
    }

    #[test]
    fn superseded_request_is_not_current() {
        let mut setup: GameSetup = GameSetup::new();
        let first = setup.start_create(vec![candidate("hablo")], 10, 10);
        let _second = setup.start_create(vec![candidate("bebe")], 10, 10);

        let stale: SetupResult = first.recv_blocking().expect("worker result");
        assert!(!setup.is_current(&stale));
    }

    #[test]
    fn restore_drops_unusable_records() {
        let saved: SavedGame = SavedGame {
            width: 5,
            height: 5,
            words: vec![
                record("sol", 0, 0, Orientation::Across),
                // Does not fit a 5x5 grid.
                record("hablamos", 1, 0, Orientation::Across),
                // Disagrees with "sol" at (0, 0).
                record("pan", 0, 0, Orientation::Down),
                record("sal", 0, 0, Orientation::Down),
            ],
        };

        let game: Game = restore_game(&saved).expect("a game must remain");
        assert_eq!(game.word_count(), 2);
        let infinitives: Vec<&str> = game
            .words()
            .iter()
            .map(|word| word.infinitive.as_str())
            .collect();
        assert!(infinitives.contains(&"sol-inf"));
        assert!(infinitives.contains(&"sal-inf"));
    }

    #[test]
    fn restore_preserves_the_player_entries() {
        let mut word: GameWord =
            GameWord::from_candidate(0, &candidate("sol"), 0, 0, Orientation::Across);
        word.user_entry[0] = 's';
        word.user_entry[2] = 'x';
        let saved: SavedGame = SavedGame::from_words(&[word], 5, 5);

        let game: Game = restore_game(&saved).expect("a game must remain");
        let restored: &GameWord = &game.words()[0];
        assert_eq!(restored.user_entry[0], 's');
        assert_eq!(restored.user_entry[2], 'x');
        assert!(restored.has_errored_cells());
    }

    #[test]
    fn restore_with_no_usable_record_returns_none() {
        let saved: SavedGame = SavedGame {
            width: 2,
            height: 2,
            words: vec![record("hablo", 0, 0, Orientation::Across)],
        };
        assert!(restore_game(&saved).is_none());
    }
}
