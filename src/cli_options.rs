/*
cli_options.rs

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

//! Process command-line options.
//!
//! Crucigrama builds crossword puzzles from conjugated Spanish verb forms. The
//! command line generates a puzzle, prints its grid and its clues, and can save it
//! so that a later run continues it.
//!
//! # Examples
//!
//! Generate a puzzle of preterit forms on a 13 by 13 grid:
//!
//! ```
//! $ crucigrama --width 13 --height 13 --tense preterit
//! ```
//!
//! Continue the saved puzzle and show the completion statistics:
//!
//! ```
//! $ crucigrama --resume
//! $ crucigrama --stats
//! ```

use clap::Parser;
use chrono::{DateTime, Local};
use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::{env, fmt};

use crate::game::Game;
use crate::options::{
    ALL_CATEGORIES, ALL_ENDINGS, ALL_TENSES, GameOptions, InfinitiveEnding, IrregularityCategory,
    SubjectPronoun, Tense,
};
use crate::saver::game::SavedGame;
use crate::saver::{JsonSaver, PersistenceGateway};
use crate::setup::{GameSetup, SetupEvent, SetupResult};
use crate::stats::{self, GameStats};
use crate::word::{BLANK, CandidateSource, GameWord, WordCandidate};
use crate::wordlist::SampleWordList;

/// Build crossword puzzles from conjugated Spanish verb forms.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Number of grid columns
    #[arg(short = 'W', long, default_value_t = 15)]
    width: usize,

    /// Number of grid rows
    #[arg(short = 'H', long, default_value_t = 15)]
    height: usize,

    /// Number of words to place, 0 to derive it from the grid size
    #[arg(short, long, default_value_t = 0)]
    count: usize,

    /// Only use forms of these tenses
    #[arg(value_enum, short, long = "tense")]
    tenses: Vec<Tense>,

    /// Only use verbs with these infinitive endings
    #[arg(value_enum, short, long = "ending")]
    endings: Vec<InfinitiveEnding>,

    /// Only use verbs of these irregularity categories
    #[arg(value_enum, short = 'g', long = "category")]
    categories: Vec<IrregularityCategory>,

    /// Only use forms conjugated for these subject pronouns
    #[arg(value_enum, short, long = "pronoun")]
    pronouns: Vec<SubjectPronoun>,

    /// Read the word candidates from a JSON file instead of the built-in list
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Directory holding the saved game, options, and statistics files
    #[arg(short = 'D', long, default_value = ".")]
    data_dir: PathBuf,

    /// Continue the saved puzzle instead of generating a new one
    #[arg(short, long, default_value_t = false)]
    resume: bool,

    /// Save the puzzle so that a later run can continue it
    #[arg(short = 'S', long, default_value_t = false)]
    save: bool,

    /// Print the completion statistics heat map and exit
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Print a placement summary after the puzzle
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process the command-line options. Return the process exit code.
pub fn run() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match execute(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}

fn execute(args: &Args) -> Result<u8, Box<dyn Error>> {
    let saver: JsonSaver = JsonSaver::new(args.data_dir.clone());

    //
    // Print the statistics heat map
    //
    if args.stats {
        let stats: GameStats = saver.load_stats()?.unwrap_or_default();
        print_stats(&stats);
        return Ok(0);
    }

    let options: GameOptions = build_options(args, &saver)?;

    //
    // Build the game, in a worker thread like the graphical front end does
    //
    let mut setup: GameSetup = GameSetup::new();
    let receiver = if args.resume {
        match saver.load_game()? {
            Some(saved) => setup.start_restore(saved),
            None => {
                eprintln!("No saved puzzle in {:?}. Generate one with --save.", args.data_dir);
                return Ok(1);
            }
        }
    } else {
        let candidates: Vec<WordCandidate> = load_candidates(args, &options)?;
        let requested: usize = if args.count > 0 {
            args.count
        } else {
            target_word_count(args.width, args.height)
        };
        debug!("Requesting {requested} of {} candidates", candidates.len());
        setup.start_create(
            crate::wordlist::random_selection(candidates, requested),
            args.width,
            args.height,
        )
    };

    let result: SetupResult = receiver.recv_blocking()?;
    if !setup.is_current(&result) {
        debug!("Dropping the result of a superseded setup request");
        return Ok(1);
    }

    let game: Game = match result.event {
        SetupEvent::Created(game) => game,
        SetupEvent::Restored(Some(game)) => game,
        SetupEvent::Restored(None) => {
            eprintln!("The saved puzzle is not usable anymore.");
            saver.delete_game();
            return Ok(1);
        }
    };

    if game.word_count() == 0 {
        eprintln!("No word fits the grid. Enlarge it or relax the options.");
        return Ok(1);
    }

    // A resumed puzzle shows the player's entries; a fresh one shows the solution.
    print_game(&game, args.resume);

    if args.resume && game.is_puzzle_complete(true) {
        let mut stats: GameStats = saver.load_stats()?.unwrap_or_default();
        stats.record_words(game.words());
        saver.save_stats(&stats)?;
        saver.delete_game();
        println!("\nPuzzle complete!");
    }

    if args.summary {
        println!(
            "\n{} words placed on the {}x{} grid",
            game.word_count(),
            game.grid_width(),
            game.grid_height()
        );
    }

    if args.save {
        let saved: SavedGame =
            SavedGame::from_words(game.words(), game.grid_width(), game.grid_height());
        saver.save_game(&saved)?;
        println!("\nPuzzle saved in {:?}", args.data_dir);
    }
    Ok(0)
}

/// The game options: the saved ones as a base, overridden by the command line.
/// Options given on the command line are persisted for the next run.
fn build_options(args: &Args, saver: &JsonSaver) -> Result<GameOptions, Box<dyn Error>> {
    let mut options: GameOptions = saver.load_options()?.unwrap_or_default();
    let mut overridden: bool = false;

    if !args.tenses.is_empty() {
        options.tenses = args.tenses.clone();
        overridden = true;
    }
    if !args.endings.is_empty() {
        options.endings = args.endings.clone();
        overridden = true;
    }
    if !args.categories.is_empty() {
        options.categories = args.categories.clone();
        overridden = true;
    }
    if !args.pronouns.is_empty() {
        options.pronouns = args.pronouns.clone();
        overridden = true;
    }

    if overridden {
        saver.save_options(&options)?;
    }
    Ok(options)
}

/// The word candidates, from the JSON file when one is given, from the built-in
/// list otherwise.
fn load_candidates(args: &Args, options: &GameOptions) -> Result<Vec<WordCandidate>, Box<dyn Error>> {
    match &args.words {
        Some(path) => {
            let file: File = File::open(path)?;
            let reader: BufReader<File> = BufReader::new(file);
            let words: Vec<WordCandidate> = serde_json::from_reader(reader)?;
            Ok(words
                .into_iter()
                .filter(|candidate| candidate.matches(options))
                .collect())
        }
        None => Ok(SampleWordList.candidates(options, usize::MAX)),
    }
}

/// Number of words to request for a grid, about one word per fifteen cells.
fn target_word_count(width: usize, height: usize) -> usize {
    ((width * height) / 15).max(4)
}

fn print_game(game: &Game, show_entries: bool) {
    //
    // The grid: player entries when resuming, the solution otherwise
    //
    let words: &[GameWord] = game.words();
    if show_entries {
        for row in game.cell_views() {
            let mut line: String = String::with_capacity(row.len() * 2);
            for view in row {
                match view {
                    Some(view) if view.display_char != BLANK => {
                        line.push(view.display_char);
                        line.push(' ');
                    }
                    Some(_) => line.push_str("_ "),
                    None => line.push_str(". "),
                }
            }
            println!("{}", line.trim_end());
        }
    } else {
        for row in 0..game.grid_height() {
            let mut line: String = String::with_capacity(game.grid_width() * 2);
            for col in 0..game.grid_width() {
                match words.iter().find_map(|word| letter_at(word, row, col)) {
                    Some(ch) => {
                        line.push(ch);
                        line.push(' ');
                    }
                    None => line.push_str(". "),
                }
            }
            println!("{}", line.trim_end());
        }
    }

    //
    // The clues, in grid order
    //
    println!();
    for (index, word) in words.iter().enumerate() {
        let pronoun: String = if word.pronoun_label.is_empty() {
            String::new()
        } else {
            format!(", {}", word.pronoun_label)
        };
        println!(
            "{:2}. ({}, {}) {}: {} {} ({}){}",
            index + 1,
            word.row,
            word.col,
            word.orientation,
            word.tense_label,
            word.infinitive,
            word.translation,
            pronoun
        );
    }
}

fn letter_at(word: &GameWord, row: usize, col: usize) -> Option<char> {
    (0..word.len()).find_map(|char_index| {
        if word.position_of(char_index) == (row, col) {
            Some(word.answer[char_index])
        } else {
            None
        }
    })
}

fn print_stats(stats: &GameStats) {
    println!("Completed words per tense, ending, and irregularity category:\n");

    let mut header: String = String::from("                        ");
    for tense in ALL_TENSES {
        header.push_str(&format!("{:>5}", column_label(tense)));
    }
    println!("{header}");

    for category in ALL_CATEGORIES {
        for ending in ALL_ENDINGS {
            let mut line: String = format!("{:>20} {:>3}", format!("{category:?}"), row_label(ending));
            for tense in ALL_TENSES {
                let count: usize = stats.count(stats::stats_index(tense, ending, category));
                if count == 0 {
                    line.push_str("    .");
                } else {
                    line.push_str(&format!("{count:>5}"));
                }
            }
            println!("{line}");
        }
    }

    println!("\nTotal: {} words", stats.total());
    if let Some(time) = stats.last_completed {
        let when: DateTime<Local> = time.into();
        println!("Last completed puzzle: {}", when.format("%Y-%m-%d %H:%M"));
    }
}

fn column_label(tense: Tense) -> &'static str {
    match tense {
        Tense::Present => "Pres",
        Tense::Preterit => "Pret",
        Tense::Imperfect => "Impf",
        Tense::Conditional => "Cond",
        Tense::Future => "Fut",
        Tense::Imperative => "Impv",
        Tense::SubjunctivePresent => "SubP",
        Tense::SubjunctiveImperfect => "SubI",
        Tense::Gerund => "Ger",
        Tense::PastParticiple => "Part",
    }
}

fn row_label(ending: InfinitiveEnding) -> impl fmt::Display {
    match ending {
        InfinitiveEnding::Ar => "-ar",
        InfinitiveEnding::Er => "-er",
        InfinitiveEnding::Ir => "-ir",
    }
}
