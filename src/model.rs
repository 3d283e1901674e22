//! # Song Model
//!
//! Structured form of a chord-annotated song.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── id: Option<u64> (storage key, None until persisted)
//!   ├── title, artist
//!   └── Vec<Line>
//!         ├── text: String (lyrics with chord markup stripped)
//!         └── Vec<ChordAnnotation>
//!               ├── position: usize (character column into text)
//!               └── name: String (opaque chord token)
//! ```
//!
//! ## Key Concepts
//!
//! ### Positions
//! Positions count characters, not bytes, so `(Am)Привет` puts `Am` at 0 and
//! `При(Dm)вет` puts `Dm` at 3. A position may equal the text length: the chord
//! sits after the last character.
//!
//! ### Ordering
//! Chords are kept in ascending position order. Chords sharing a position stay
//! in the order they were written, e.g. `(Am)(Dm)word` yields two annotations
//! at position 0, `Am` first.
//!
//! ### Ownership
//! A song owns its lines and each line owns its chords. Editing the lyrics of a
//! song replaces every line; individual lines are never patched in place.

use crate::grammar::ChordGrammar;
use serde::{Deserialize, Serialize};

/// A chord placed at a character column of a lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordAnnotation {
    pub position: usize,
    pub name: String,
}

impl ChordAnnotation {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// One lyric line with its chords
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    pub text: String,
    #[serde(default)]
    pub chords: Vec<ChordAnnotation>,
}

impl Line {
    /// Build a line, sorting chords by position (stable, so equal positions
    /// keep their order).
    pub fn new(text: impl Into<String>, mut chords: Vec<ChordAnnotation>) -> Self {
        chords.sort_by_key(|c| c.position);
        Self {
            text: text.into(),
            chords,
        }
    }

    /// A line with lyrics and no chords.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Length of the text in characters, the unit chord positions use.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// No text and no chords: a visual spacer between verses.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.chords.is_empty()
    }

    /// Chords but no lyric text (intros, instrumental bars).
    pub fn is_chord_only(&self) -> bool {
        self.text.is_empty() && !self.chords.is_empty()
    }

    /// Chords in ascending position order.
    ///
    /// Lines built through [`Line::new`] or the tokenizer are already ordered;
    /// this also copes with lines deserialized from storage in arbitrary order.
    pub fn ordered_chords(&self) -> Vec<&ChordAnnotation> {
        let mut chords: Vec<&ChordAnnotation> = self.chords.iter().collect();
        chords.sort_by_key(|c| c.position);
        chords
    }
}

/// A song: title, artist and its lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Song {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    /// Artist name or storage reference, carried through untouched
    pub artist: String,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            artist: artist.into(),
            lines: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Drop every line and re-derive them from `lyrics`.
    ///
    /// Id, title and artist are left as they are.
    pub fn replace_lyrics(&mut self, grammar: &ChordGrammar, lyrics: &str) {
        self.lines.clear();
        self.lines.extend(crate::structure::structure(grammar, lyrics));
    }

    /// Every chord name in the song, in reading order.
    pub fn chord_names(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .flat_map(|line| line.chords.iter().map(|c| c.name.as_str()))
    }
}
