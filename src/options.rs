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

//! Game options: which verb forms qualify for the next puzzle.
//!
//! The [`GameOptions`] object lists every recognized tense, infinitive ending,
//! irregularity category, and subject pronoun together with its enabled status.
//! An empty selection for an axis means that the whole axis is enabled, so the word
//! list can always produce candidates.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Conjugation tense or mood of a puzzle answer.
///
/// The declaration order defines the column order of the stats heat map.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, FromRepr,
)]
#[repr(usize)]
pub enum Tense {
    Present,
    Preterit,
    Imperfect,
    Conditional,
    Future,
    Imperative,
    SubjunctivePresent,
    SubjunctiveImperfect,
    PastParticiple,
    Gerund,
}

/// All the tenses, in heat-map column order.
pub const ALL_TENSES: [Tense; 10] = [
    Tense::Present,
    Tense::Preterit,
    Tense::Imperfect,
    Tense::Conditional,
    Tense::Future,
    Tense::Imperative,
    Tense::SubjunctivePresent,
    Tense::SubjunctiveImperfect,
    Tense::PastParticiple,
    Tense::Gerund,
];

impl Tense {
    /// Column of the tense in the stats heat map.
    pub fn stats_ordinal(&self) -> usize {
        *self as usize
    }

    /// Clue label for the tense (for example, "Preterit tense of").
    pub fn clue_label(&self) -> &'static str {
        match self {
            Tense::Present => "Present tense of",
            Tense::Preterit => "Preterit tense of",
            Tense::Imperfect => "Imperfect tense of",
            Tense::Conditional => "Conditional tense of",
            Tense::Future => "Future tense of",
            Tense::Imperative => "Imperative of",
            Tense::SubjunctivePresent => "Present subjunctive of",
            Tense::SubjunctiveImperfect => "Imperfect subjunctive of",
            Tense::PastParticiple => "Past participle of",
            Tense::Gerund => "Gerund of",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.clue_label())
    }
}

/// Ending of the infinitive form of a verb.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, FromRepr,
)]
#[repr(usize)]
pub enum InfinitiveEnding {
    Ar,
    Er,
    Ir,
}

/// All the infinitive endings, in heat-map row order.
pub const ALL_ENDINGS: [InfinitiveEnding; 3] = [
    InfinitiveEnding::Ar,
    InfinitiveEnding::Er,
    InfinitiveEnding::Ir,
];

impl InfinitiveEnding {
    /// Position of the ending within an irregularity category row group.
    pub fn stats_ordinal(&self) -> usize {
        *self as usize
    }
}

/// Irregularity category of a verb.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, FromRepr,
)]
#[repr(usize)]
pub enum IrregularityCategory {
    Regular,
    SpellingChange,
    StemChange,
    Irregular,
}

/// All the irregularity categories, in heat-map row-group order.
pub const ALL_CATEGORIES: [IrregularityCategory; 4] = [
    IrregularityCategory::Regular,
    IrregularityCategory::SpellingChange,
    IrregularityCategory::StemChange,
    IrregularityCategory::Irregular,
];

impl IrregularityCategory {
    /// Row group of the category in the stats heat map.
    pub fn stats_ordinal(&self) -> usize {
        *self as usize
    }
}

/// Subject pronoun of a conjugated verb form.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, FromRepr,
)]
#[repr(usize)]
pub enum SubjectPronoun {
    Yo,
    Tu,
    ElEllaUsted,
    EllosEllasUstedes,
    Nosotros,
    Vosotros,
}

/// All the subject pronouns.
pub const ALL_PRONOUNS: [SubjectPronoun; 6] = [
    SubjectPronoun::Yo,
    SubjectPronoun::Tu,
    SubjectPronoun::ElEllaUsted,
    SubjectPronoun::EllosEllasUstedes,
    SubjectPronoun::Nosotros,
    SubjectPronoun::Vosotros,
];

impl SubjectPronoun {
    /// Display text for the pronoun.
    pub fn text(&self) -> &'static str {
        match self {
            SubjectPronoun::Yo => "Yo",
            SubjectPronoun::Tu => "Tú",
            SubjectPronoun::ElEllaUsted => "Él/Ella/Ud.",
            SubjectPronoun::EllosEllasUstedes => "Ellos/Ellas/Uds.",
            SubjectPronoun::Nosotros => "Nosotros",
            SubjectPronoun::Vosotros => "Vosotros",
        }
    }
}

impl fmt::Display for SubjectPronoun {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Enabled verb forms for the next puzzle.
///
/// Each axis lists the enabled values explicitly. The `qualifying_*` methods fall
/// back to the full axis when the user disabled every value, so candidate selection
/// never runs dry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameOptions {
    /// Enabled tenses.
    pub tenses: Vec<Tense>,

    /// Enabled infinitive endings.
    pub endings: Vec<InfinitiveEnding>,

    /// Enabled irregularity categories.
    pub categories: Vec<IrregularityCategory>,

    /// Enabled subject pronouns.
    pub pronouns: Vec<SubjectPronoun>,
}

impl Default for GameOptions {
    /// Default selection: present tense, regular verbs, all endings, and all
    /// pronouns except Vosotros.
    fn default() -> Self {
        Self {
            tenses: vec![Tense::Present],
            endings: ALL_ENDINGS.to_vec(),
            categories: vec![IrregularityCategory::Regular],
            pronouns: ALL_PRONOUNS
                .iter()
                .copied()
                .filter(|p| *p != SubjectPronoun::Vosotros)
                .collect(),
        }
    }
}

impl GameOptions {
    /// Return the enabled tenses, or all the tenses if none is enabled.
    pub fn qualifying_tenses(&self) -> Vec<Tense> {
        if self.tenses.is_empty() {
            ALL_TENSES.to_vec()
        } else {
            self.tenses.clone()
        }
    }

    /// Return the enabled infinitive endings, or all the endings if none is enabled.
    pub fn qualifying_endings(&self) -> Vec<InfinitiveEnding> {
        if self.endings.is_empty() {
            ALL_ENDINGS.to_vec()
        } else {
            self.endings.clone()
        }
    }

    /// Return the enabled irregularity categories, or all the categories if none is
    /// enabled.
    pub fn qualifying_categories(&self) -> Vec<IrregularityCategory> {
        if self.categories.is_empty() {
            ALL_CATEGORIES.to_vec()
        } else {
            self.categories.clone()
        }
    }

    /// Return the enabled subject pronouns, or all the pronouns if none is enabled.
    pub fn qualifying_pronouns(&self) -> Vec<SubjectPronoun> {
        if self.pronouns.is_empty() {
            ALL_PRONOUNS.to_vec()
        } else {
            self.pronouns.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_exclude_vosotros() {
        let options: GameOptions = GameOptions::default();
        assert_eq!(options.tenses, vec![Tense::Present]);
        assert_eq!(options.categories, vec![IrregularityCategory::Regular]);
        assert!(!options.pronouns.contains(&SubjectPronoun::Vosotros));
        assert_eq!(options.pronouns.len(), ALL_PRONOUNS.len() - 1);
    }

    #[test]
    fn empty_selection_falls_back_to_all() {
        let options = GameOptions {
            tenses: Vec::new(),
            endings: Vec::new(),
            categories: Vec::new(),
            pronouns: Vec::new(),
        };
        assert_eq!(options.qualifying_tenses(), ALL_TENSES.to_vec());
        assert_eq!(options.qualifying_endings(), ALL_ENDINGS.to_vec());
        assert_eq!(options.qualifying_categories(), ALL_CATEGORIES.to_vec());
        assert_eq!(options.qualifying_pronouns(), ALL_PRONOUNS.to_vec());
    }

    #[test]
    fn stats_ordinals_follow_declaration_order() {
        for (i, tense) in ALL_TENSES.iter().enumerate() {
            assert_eq!(tense.stats_ordinal(), i);
        }
        assert_eq!(Tense::from_repr(3), Some(Tense::Conditional));
    }
}
