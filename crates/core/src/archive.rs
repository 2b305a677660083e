use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ArchiveError;
use crate::loader::{self, LetterRow};
use crate::models::{Letter, LetterSummary, Place};
use crate::types::RecordId;

/// The in-memory letter archive.
///
/// Built once at startup and never mutated afterwards; share it behind an
/// `Arc` and read it concurrently without locking.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    letters: Vec<Letter>,
    places: BTreeMap<RecordId, Place>,
}

impl Archive {
    /// Load places, then letters, from disk.
    pub fn load(places_path: &Path, letters_path: &Path) -> Result<Self, ArchiveError> {
        let places = loader::load_places(places_path)?;
        let letters = loader::load_letters(letters_path, &places)?;
        Ok(Self { letters, places })
    }

    /// Build an archive from already parsed records.
    ///
    /// Letters get ids `1..=N` in iteration order; places with a repeated id
    /// replace earlier ones.
    pub fn from_records(
        places: impl IntoIterator<Item = Place>,
        rows: impl IntoIterator<Item = LetterRow>,
    ) -> Self {
        let places: BTreeMap<_, _> = places.into_iter().map(|p| (p.id, p)).collect();
        let letters = loader::resolve_letters(rows, &places);
        Self { letters, places }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn places(&self) -> &BTreeMap<RecordId, Place> {
        &self.places
    }

    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Summaries of every letter, in stored order.
    pub fn summaries(&self) -> Vec<LetterSummary> {
        self.letters.iter().map(LetterSummary::from).collect()
    }

    /// Look up a letter by its 1-based id.
    pub fn letter(&self, letter_id: RecordId) -> Result<&Letter, ArchiveError> {
        if letter_id < 1 {
            return Err(ArchiveError::InvalidLetterId { letter_id });
        }
        usize::try_from(letter_id - 1)
            .ok()
            .and_then(|index| self.letters.get(index))
            .ok_or(ArchiveError::LetterNotFound {
                letter_id,
                total_letters: self.letters.len(),
            })
    }

    pub fn place(&self, place_id: RecordId) -> Result<&Place, ArchiveError> {
        self.places
            .get(&place_id)
            .ok_or(ArchiveError::PlaceNotFound { place_id })
    }
}
