/*
options.rs

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

//! Save and restore the game options.
//!
//! The saved object is a serialization of the [`GameOptions`] object in JSON
//! format by using [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::options::GameOptions;

/// Object to save and restore the game options.
pub struct SaverOptions {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverOptions {
    /// Create a [`SaverOptions`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the options must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("options.json");
        debug!("Options file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`GameOptions`] object for the options file.
    ///
    /// Return the [`GameOptions`] object or None if the options file does not exist.
    pub fn get_options(&self) -> Result<Option<GameOptions>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let options: GameOptions = serde_json::from_reader(reader)?;
        Ok(Some(options))
    }

    /// Save the provided [`GameOptions`] object.
    pub fn save_options(&self, options: &GameOptions) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the options file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
