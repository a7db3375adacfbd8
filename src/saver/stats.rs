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

//! Save and restore the completion statistics.
//!
//! The saved object is a serialization of the [`GameStats`] object in JSON format
//! by using [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::stats::GameStats;

/// Object to save and restore the completion statistics.
pub struct SaverStats {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverStats {
    /// Create a [`SaverStats`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the statistics must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("stats.json");
        debug!("Statistics file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`GameStats`] object for the statistics file.
    ///
    /// Return the [`GameStats`] object or None if the statistics file does not exist.
    pub fn get_stats(&self) -> Result<Option<GameStats>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let stats: GameStats = serde_json::from_reader(reader)?;
        Ok(Some(stats))
    }

    /// Save the provided [`GameStats`] object.
    pub fn save_stats(&self, stats: &GameStats) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, stats)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the statistics file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
