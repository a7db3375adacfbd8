/*
saver.rs

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

//! Persistence of the game in progress, the statistics, and the game options.
//!
//! The game state modules never touch the file system: they go through the
//! [`PersistenceGateway`] interface. [`JsonSaver`] is the file implementation,
//! which stores each object as a JSON file in the data directory by using
//! [`serde`]:
//!
//! * `savegame.json`, managed by [`game::SaverGame`]
//! * `stats.json`, managed by [`stats::SaverStats`]
//! * `options.json`, managed by [`options::SaverOptions`]

use std::error::Error;
use std::path::PathBuf;

use crate::options::GameOptions;
use crate::saver::game::{SavedGame, SaverGame};
use crate::saver::options::SaverOptions;
use crate::saver::stats::SaverStats;
use crate::stats::GameStats;

pub mod game;
pub mod options;
pub mod stats;

/// Interface between the game state and its storage.
pub trait PersistenceGateway {
    /// Retrieve the saved game, or None when no game was saved.
    fn load_game(&self) -> Result<Option<SavedGame>, Box<dyn Error>>;

    /// Save the game in progress.
    fn save_game(&self, saved: &SavedGame) -> Result<(), Box<dyn Error>>;

    /// Delete the saved game.
    fn delete_game(&self);

    /// Retrieve the completion statistics, or None when no statistics were saved.
    fn load_stats(&self) -> Result<Option<GameStats>, Box<dyn Error>>;

    /// Save the completion statistics.
    fn save_stats(&self, stats: &GameStats) -> Result<(), Box<dyn Error>>;

    /// Retrieve the saved game options, or None when no options were saved.
    fn load_options(&self) -> Result<Option<GameOptions>, Box<dyn Error>>;

    /// Save the game options.
    fn save_options(&self, options: &GameOptions) -> Result<(), Box<dyn Error>>;
}

/// File-backed implementation of the [`PersistenceGateway`] interface.
pub struct JsonSaver {
    game: SaverGame,
    stats: SaverStats,
    options: SaverOptions,
}

impl JsonSaver {
    /// Create a [`JsonSaver`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the files must
    /// be saved.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            game: SaverGame::new(data_dir.clone()),
            stats: SaverStats::new(data_dir.clone()),
            options: SaverOptions::new(data_dir),
        }
    }
}

impl PersistenceGateway for JsonSaver {
    fn load_game(&self) -> Result<Option<SavedGame>, Box<dyn Error>> {
        self.game.get_game()
    }

    fn save_game(&self, saved: &SavedGame) -> Result<(), Box<dyn Error>> {
        self.game.save_game(saved)
    }

    fn delete_game(&self) {
        self.game.delete_save();
    }

    fn load_stats(&self) -> Result<Option<GameStats>, Box<dyn Error>> {
        self.stats.get_stats()
    }

    fn save_stats(&self, stats: &GameStats) -> Result<(), Box<dyn Error>> {
        self.stats.save_stats(stats)
    }

    fn load_options(&self) -> Result<Option<GameOptions>, Box<dyn Error>> {
        self.options.get_options()
    }

    fn save_options(&self, options: &GameOptions) -> Result<(), Box<dyn Error>> {
        self.options.save_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Tense;

    #[test]
    fn gateway_returns_none_for_missing_files() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver: JsonSaver = JsonSaver::new(dir.path().to_path_buf());
        assert!(saver.load_game().expect("no game file").is_none());
        assert!(saver.load_stats().expect("no stats file").is_none());
        assert!(saver.load_options().expect("no options file").is_none());
    }

    #[test]
    fn options_survive_a_save_and_load_cycle() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver: JsonSaver = JsonSaver::new(dir.path().to_path_buf());

        let mut options: GameOptions = GameOptions::default();
        options.tenses = vec![Tense::Preterit, Tense::Future];
        saver.save_options(&options).expect("save options");

        let loaded: GameOptions = saver
            .load_options()
            .expect("load options")
            .expect("options file exists");
        assert_eq!(loaded.tenses, options.tenses);
        assert_eq!(loaded.pronouns, options.pronouns);
    }

    #[test]
    fn stats_survive_a_save_and_load_cycle() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let saver: JsonSaver = JsonSaver::new(dir.path().to_path_buf());

        let mut stats: GameStats = GameStats::new();
        stats.record_index(3);
        stats.record_index(3);
        saver.save_stats(&stats).expect("save stats");

        let loaded: GameStats = saver
            .load_stats()
            .expect("load stats")
            .expect("stats file exists");
        assert_eq!(loaded.count(3), 2);
        assert_eq!(loaded.total(), 2);
    }
}
