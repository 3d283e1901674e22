//! Bracket tokenizer: pulls `(chord)` markup out of a single lyric line.
//!
//! Each removal shifts every later character to the left, so the tokenizer
//! keeps a running shift. A chord that started at character `start` of the
//! original line lands at `start - shift` in the stripped text, after which the
//! shift grows by the length of the removed `(chord)` group:
//!
//! ```text
//! (Bm)Help! I need some(Bm/A)body
//! ^0                   ^21
//! Bm   -> 0 - 0  = 0   shift = 4
//! Bm/A -> 21 - 4 = 17  shift = 10
//! Help! I need somebody
//! ```

use crate::grammar::ChordGrammar;
use crate::model::{ChordAnnotation, Line};

/// A line with its chord markup removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    pub text: String,
    pub chords: Vec<ChordAnnotation>,
}

impl From<TokenizedLine> for Line {
    fn from(tokenized: TokenizedLine) -> Self {
        // Already in position order, no need to go through Line::new.
        Line {
            text: tokenized.text,
            chords: tokenized.chords,
        }
    }
}

/// Trim `line`, strip every bracketed chord, and record where each one was.
///
/// Text in parentheses that is not a chord (`(oh yeah)`, `(Hm)`) is left in
/// place as lyrics. Back-to-back chords keep separate entries at the same
/// position.
pub fn tokenize_line(grammar: &ChordGrammar, line: &str) -> TokenizedLine {
    let line = line.trim();
    let mut text = String::with_capacity(line.len());
    let mut chords = Vec::new();

    let mut shift = 0; // characters removed so far
    let mut consumed = 0; // characters of the original line before `cursor`
    let mut cursor = 0; // byte offset into the original line

    for chord in grammar.bracketed_chords(line) {
        let between = &line[cursor..chord.range.start];
        text.push_str(between);
        consumed += between.chars().count();

        chords.push(ChordAnnotation::new(consumed - shift, chord.name));

        let removed = line[chord.range.clone()].chars().count();
        shift += removed;
        consumed += removed;
        cursor = chord.range.end;
    }
    text.push_str(&line[cursor..]);

    TokenizedLine { text, chords }
}
