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

//! Save and restore the puzzle in progress when quitting or starting Crucigrama.
//!
//! When a puzzle is in progress and the user quits Crucigrama, the placed words and
//! the player's entries are saved in the `savegame.json` file.
//! When Crucigrama is restarted, the saved puzzle is loaded, and the user can
//! continue where they left off.
//!
//! The saved object is a [`SavedGame`], one [`PersistedWord`] record per placed
//! word, serialized in JSON format by using [`serde`]. Words are persisted as
//! independent records: [`crate::setup::load_game`] validates each record and drops
//! the ones that no longer fit, instead of rejecting the whole file.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::word::{BLANK, GameWord, Orientation, WordId};

/// One placed word as stored in the save file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PersistedWord {
    /// Key identifying the verb form.
    pub unique_key: String,

    /// The answer text.
    pub answer: String,

    /// The player's entry. NUL characters mark the positions that the player has
    /// not filled in.
    pub user_entry: String,

    /// Clue label for the tense.
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
}

impl PersistedWord {
    /// Create a record from a placed word.
    pub fn from_word(word: &GameWord) -> Self {
        Self {
            unique_key: word.unique_key.clone(),
            answer: word.answer_text(),
            user_entry: word.user_entry.iter().collect(),
            tense_label: word.tense_label.clone(),
            pronoun_label: word.pronoun_label.clone(),
            infinitive: word.infinitive.clone(),
            translation: word.translation.clone(),
            stats_index: word.stats_index,
            row: word.row,
            col: word.col,
            orientation: word.orientation,
        }
    }

    /// Rebuild the placed word, or None when the record is not usable.
    ///
    /// The save file may come from an older version or may have been edited, so
    /// nothing about a record is trusted: an empty answer or an entry whose length
    /// does not match the answer invalidates the record.
    pub fn to_word(&self, id: WordId) -> Option<GameWord> {
        let answer: Vec<char> = self.answer.chars().collect();
        if answer.is_empty() {
            debug!("Dropping the saved record with an empty answer: {self:?}");
            return None;
        }
        let mut user_entry: Vec<char> = self.user_entry.chars().collect();
        if user_entry.is_empty() {
            user_entry = vec![BLANK; answer.len()];
        }
        if user_entry.len() != answer.len() {
            debug!("Dropping the saved record with a bad entry length: {self:?}");
            return None;
        }
        Some(GameWord {
            id,
            unique_key: self.unique_key.clone(),
            answer,
            tense_label: self.tense_label.clone(),
            pronoun_label: self.pronoun_label.clone(),
            infinitive: self.infinitive.clone(),
            translation: self.translation.clone(),
            stats_index: self.stats_index,
            row: self.row,
            col: self.col,
            orientation: self.orientation,
            user_entry,
        })
    }
}

/// The saved puzzle: its grid dimensions and its placed words.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SavedGame {
    /// Number of grid columns.
    pub width: usize,

    /// Number of grid rows.
    pub height: usize,

    /// The placed words.
    pub words: Vec<PersistedWord>,
}

impl SavedGame {
    /// Create a record of the given placed words.
    pub fn from_words(words: &[GameWord], width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            words: words.iter().map(PersistedWord::from_word).collect(),
        }
    }
}

/// Object to save and restore a puzzle in progress.
pub struct SaverGame {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzle must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("savegame.json");
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`SavedGame`] object for the saved puzzle.
    ///
    /// Return the [`SavedGame`] object or None if there is no saved puzzle.
    pub fn get_game(&self) -> Result<Option<SavedGame>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let saved: SavedGame = serde_json::from_reader(reader)?;
        Ok(Some(saved))
    }

    /// Save the provided [`SavedGame`] object.
    pub fn save_game(&self, saved: &SavedGame) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, saved)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved game.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
