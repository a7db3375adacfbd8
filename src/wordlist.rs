/*
wordlist.rs

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

//! Built-in list of conjugated verb forms.
//!
//! The conjugation rule engine is an external collaborator; this module provides a
//! small precomputed list so the command-line front end can build puzzles without
//! it. [`SampleWordList`] implements [`CandidateSource`]: it filters the list
//! against the enabled game options and returns a random sample, so two runs with
//! the same options still produce different puzzles.

use rand::Rng;

use crate::options::{GameOptions, InfinitiveEnding, IrregularityCategory, SubjectPronoun, Tense};
use crate::word::{CandidateSource, WordCandidate};

/// Candidate source backed by the built-in verb form list.
pub struct SampleWordList;

impl CandidateSource for SampleWordList {
    fn candidates(&self, options: &GameOptions, target_count: usize) -> Vec<WordCandidate> {
        let qualifying: Vec<WordCandidate> = all_words()
            .into_iter()
            .filter(|candidate| candidate.matches(options))
            .collect();
        random_selection(qualifying, target_count)
    }
}

/// Select at most `quantity` items from the list in a pseudo-random way.
pub fn random_selection<T>(items: Vec<T>, quantity: usize) -> Vec<T> {
    let mut source: Vec<T> = items;
    let mut destination: Vec<T> = Vec::with_capacity(quantity.min(source.len()));

    // Move random items from the source to the destination list, and return
    // whichever list reaches the target size first.
    loop {
        if destination.len() >= quantity {
            return destination;
        }
        if source.len() <= quantity.saturating_sub(destination.len()) {
            destination.append(&mut source);
            return destination;
        }
        let index: usize = rand::rng().random_range(0..source.len());
        destination.push(source.swap_remove(index));
    }
}

fn word(
    answer: &str,
    infinitive: &str,
    translation: &str,
    tense: Tense,
    pronoun: Option<SubjectPronoun>,
    ending: InfinitiveEnding,
    category: IrregularityCategory,
) -> WordCandidate {
    WordCandidate {
        answer: answer.to_owned(),
        infinitive: infinitive.to_owned(),
        translation: translation.to_owned(),
        tense,
        pronoun,
        ending,
        category,
    }
}

/// The full built-in list.
pub fn all_words() -> Vec<WordCandidate> {
    use IrregularityCategory::{Irregular, Regular, SpellingChange, StemChange};
    use InfinitiveEnding::{Ar, Er, Ir};
    use SubjectPronoun::{ElEllaUsted, EllosEllasUstedes, Nosotros, Tu, Vosotros, Yo};
    use Tense::{
        Conditional, Future, Gerund, Imperfect, PastParticiple, Present, Preterit,
        SubjunctivePresent,
    };

    vec![
        // hablar, regular -ar
        word("hablo", "hablar", "to speak", Present, Some(Yo), Ar, Regular),
        word("hablas", "hablar", "to speak", Present, Some(Tu), Ar, Regular),
        word("habla", "hablar", "to speak", Present, Some(ElEllaUsted), Ar, Regular),
        word("hablamos", "hablar", "to speak", Present, Some(Nosotros), Ar, Regular),
        word("hablan", "hablar", "to speak", Present, Some(EllosEllasUstedes), Ar, Regular),
        word("hablaba", "hablar", "to speak", Imperfect, Some(Yo), Ar, Regular),
        word("hablaré", "hablar", "to speak", Future, Some(Yo), Ar, Regular),
        word("hablando", "hablar", "to speak", Gerund, None, Ar, Regular),
        word("hablado", "hablar", "to speak", PastParticiple, None, Ar, Regular),
        // mirar, regular -ar
        word("miro", "mirar", "to look at", Present, Some(Yo), Ar, Regular),
        word("miras", "mirar", "to look at", Present, Some(Tu), Ar, Regular),
        word("miramos", "mirar", "to look at", Present, Some(Nosotros), Ar, Regular),
        word("miraría", "mirar", "to look at", Conditional, Some(Yo), Ar, Regular),
        // tomar, regular -ar
        word("tomas", "tomar", "to take", Present, Some(Tu), Ar, Regular),
        word("toman", "tomar", "to take", Present, Some(EllosEllasUstedes), Ar, Regular),
        word("tomabais", "tomar", "to take", Imperfect, Some(Vosotros), Ar, Regular),
        // comer, regular -er
        word("como", "comer", "to eat", Present, Some(Yo), Er, Regular),
        word("comes", "comer", "to eat", Present, Some(Tu), Er, Regular),
        word("comemos", "comer", "to eat", Present, Some(Nosotros), Er, Regular),
        word("comía", "comer", "to eat", Imperfect, Some(Yo), Er, Regular),
        word("comeré", "comer", "to eat", Future, Some(Yo), Er, Regular),
        word("comiendo", "comer", "to eat", Gerund, None, Er, Regular),
        // beber, regular -er
        word("bebo", "beber", "to drink", Present, Some(Yo), Er, Regular),
        word("beben", "beber", "to drink", Present, Some(EllosEllasUstedes), Er, Regular),
        word("bebimos", "beber", "to drink", Preterit, Some(Nosotros), Er, Regular),
        // vivir, regular -ir
        word("vivo", "vivir", "to live", Present, Some(Yo), Ir, Regular),
        word("vives", "vivir", "to live", Present, Some(Tu), Ir, Regular),
        word("vivimos", "vivir", "to live", Present, Some(Nosotros), Ir, Regular),
        word("vivía", "vivir", "to live", Imperfect, Some(Yo), Ir, Regular),
        word("vivido", "vivir", "to live", PastParticiple, None, Ir, Regular),
        // escribir, regular -ir
        word("escribo", "escribir", "to write", Present, Some(Yo), Ir, Regular),
        word("escriben", "escribir", "to write", Present, Some(EllosEllasUstedes), Ir, Regular),
        // buscar, spelling-change -ar
        word("busco", "buscar", "to look for", Present, Some(Yo), Ar, SpellingChange),
        word("busqué", "buscar", "to look for", Preterit, Some(Yo), Ar, SpellingChange),
        // llegar, spelling-change -ar
        word("llego", "llegar", "to arrive", Present, Some(Yo), Ar, SpellingChange),
        word("llegué", "llegar", "to arrive", Preterit, Some(Yo), Ar, SpellingChange),
        // leer, spelling-change -er
        word("leo", "leer", "to read", Present, Some(Yo), Er, SpellingChange),
        word("leyó", "leer", "to read", Preterit, Some(ElEllaUsted), Er, SpellingChange),
        word("leyendo", "leer", "to read", Gerund, None, Er, SpellingChange),
        // dirigir, spelling-change -ir
        word("dirijo", "dirigir", "to direct", Present, Some(Yo), Ir, SpellingChange),
        // pensar, stem-change -ar
        word("pienso", "pensar", "to think", Present, Some(Yo), Ar, StemChange),
        word("piensan", "pensar", "to think", Present, Some(EllosEllasUstedes), Ar, StemChange),
        // poder, stem-change -er
        word("puedo", "poder", "to be able", Present, Some(Yo), Er, StemChange),
        word("pudiendo", "poder", "to be able", Gerund, None, Er, StemChange),
        // dormir, stem-change -ir
        word("duermo", "dormir", "to sleep", Present, Some(Yo), Ir, StemChange),
        word("durmió", "dormir", "to sleep", Preterit, Some(ElEllaUsted), Ir, StemChange),
        // pedir, stem-change -ir
        word("pido", "pedir", "to ask for", Present, Some(Yo), Ir, StemChange),
        // estar, irregular -ar
        word("estoy", "estar", "to be", Present, Some(Yo), Ar, Irregular),
        word("estuve", "estar", "to be", Preterit, Some(Yo), Ar, Irregular),
        // dar, irregular -ar
        word("doy", "dar", "to give", Present, Some(Yo), Ar, Irregular),
        word("dieron", "dar", "to give", Preterit, Some(EllosEllasUstedes), Ar, Irregular),
        // ser, irregular -er
        word("soy", "ser", "to be", Present, Some(Yo), Er, Irregular),
        word("somos", "ser", "to be", Present, Some(Nosotros), Er, Irregular),
        word("fui", "ser", "to be", Preterit, Some(Yo), Er, Irregular),
        word("sea", "ser", "to be", SubjunctivePresent, Some(Yo), Er, Irregular),
        // tener, irregular -er
        word("tengo", "tener", "to have", Present, Some(Yo), Er, Irregular),
        word("tenemos", "tener", "to have", Present, Some(Nosotros), Er, Irregular),
        word("tendré", "tener", "to have", Future, Some(Yo), Er, Irregular),
        // ir, irregular -ir
        word("voy", "ir", "to go", Present, Some(Yo), Ir, Irregular),
        word("vamos", "ir", "to go", Present, Some(Nosotros), Ir, Irregular),
        word("yendo", "ir", "to go", Gerund, None, Ir, Irregular),
        // decir, irregular -ir
        word("digo", "decir", "to say", Present, Some(Yo), Ir, Irregular),
        word("dicho", "decir", "to say", PastParticiple, None, Ir, Irregular),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_words_are_placeable() {
        for candidate in all_words() {
            assert!(
                candidate.answer.chars().count() >= 2,
                "{} is too short",
                candidate.answer
            );
        }
    }

    #[test]
    fn source_honors_the_enabled_options() {
        let options = GameOptions {
            tenses: vec![Tense::Preterit],
            endings: vec![InfinitiveEnding::Ar],
            categories: vec![IrregularityCategory::SpellingChange],
            pronouns: vec![SubjectPronoun::Yo],
        };
        let candidates: Vec<WordCandidate> = SampleWordList.candidates(&options, 100);
        assert!(!candidates.is_empty());
        for candidate in candidates {
            assert_eq!(candidate.tense, Tense::Preterit);
            assert_eq!(candidate.ending, InfinitiveEnding::Ar);
            assert_eq!(candidate.category, IrregularityCategory::SpellingChange);
        }
    }

    #[test]
    fn selection_respects_the_target_count() {
        let items: Vec<usize> = (0..20).collect();
        assert_eq!(random_selection(items.clone(), 5).len(), 5);
        assert_eq!(random_selection(items, 50).len(), 20);
    }
}
