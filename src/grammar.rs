//! # Chord Grammar
//!
//! Defines what a chord token looks like on the surface:
//!
//! ```text
//! ROOT [accidental] [quality] [extension digits] [/ bass note]
//!
//! ROOT        A B C D E F G
//! accidental  # b
//! quality     m maj min dim aug sus add
//! extension   0-9 (any number of digits)
//! bass note   ROOT [accidental]
//! ```
//!
//! Chord names are opaque strings. Nothing here interprets them musically.
//!
//! ## Matchers
//! All matchers are compiled from the single [`CHORD_TOKEN`] pattern, so they
//! accept exactly the same tokens:
//! - **exact** - the whole string is one chord (`Am`, `Bm/A`)
//! - **bracketed** - a chord wrapped in parentheses inside a line (`(Am)Hello`)
//! - **prefix** - the longest chord at the start of a word (`DHey` -> `D`)
//!
//! ## Example
//! ```rust
//! use chordsheet::ChordGrammar;
//!
//! let grammar = ChordGrammar::standard();
//! assert!(grammar.is_chord_token("C#maj7"));
//! assert!(!grammar.is_chord_token("Hm"));
//! assert_eq!(grammar.chord_prefix("DHey"), Some("D"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Chord token pattern, usable as a sub-pattern of larger expressions.
///
/// Quality alternatives are listed longest first so that prefix matching
/// takes `maj` over `m`.
pub const CHORD_TOKEN: &str = r"[A-G][#b]?(?:maj|min|dim|aug|sus|add|m)?[0-9]*(?:/[A-G][#b]?)?";

static STANDARD: Lazy<ChordGrammar> = Lazy::new(ChordGrammar::new);

/// A bracketed chord found inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketedChord<'a> {
    /// Byte range of the whole match, parentheses included
    pub range: Range<usize>,
    /// Chord name without parentheses
    pub name: &'a str,
}

/// Compiled chord matchers.
#[derive(Debug, Clone)]
pub struct ChordGrammar {
    exact: Regex,
    bracketed: Regex,
    prefix: Regex,
}

impl ChordGrammar {
    pub fn new() -> Self {
        Self {
            exact: compile(&format!(r"^(?:{CHORD_TOKEN})$")),
            bracketed: compile(&format!(r"\(({CHORD_TOKEN})\)")),
            prefix: compile(&format!(r"^(?:{CHORD_TOKEN})")),
        }
    }

    /// The grammar shared by the top-level helpers, built on first use.
    pub fn standard() -> &'static ChordGrammar {
        &STANDARD
    }

    /// True if `token` is exactly one bare chord.
    pub fn is_chord_token(&self, token: &str) -> bool {
        self.exact.is_match(token)
    }

    /// True if `token` is exactly one chord wrapped in parentheses, e.g. `(Am)`.
    pub fn is_bracketed_chord(&self, token: &str) -> bool {
        self.bracketed
            .find(token)
            .map(|m| m.start() == 0 && m.end() == token.len())
            .unwrap_or(false)
    }

    /// True if the line holds at least one bracketed chord anywhere.
    pub fn contains_bracketed(&self, line: &str) -> bool {
        self.bracketed.is_match(line)
    }

    /// Every bracketed chord in `line`, left to right, non-overlapping.
    pub fn bracketed_chords<'a>(
        &'a self,
        line: &'a str,
    ) -> impl Iterator<Item = BracketedChord<'a>> + 'a {
        self.bracketed.captures_iter(line).filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(BracketedChord {
                range: whole.range(),
                name: name.as_str(),
            })
        })
    }

    /// Longest chord token at the start of `word`, if any.
    pub fn chord_prefix<'a>(&self, word: &'a str) -> Option<&'a str> {
        self.prefix.find(word).map(|m| m.as_str())
    }
}

impl Default for ChordGrammar {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are built from a constant; failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid chord pattern {pattern}: {e}"))
}
