//! # Format Normalizer
//!
//! Rewrites informal chord-sheet conventions into inline-bracket notation so
//! the structurer only ever sees one input shape.
//!
//! ## Conventions
//!
//! ### Chord line above a lyric line
//! A line made mostly of bare chords (more than `chord_line_threshold` of its
//! whitespace-separated tokens) followed by a lyric line. Chords are spliced
//! into the lyric line at the column where they started on the chord line:
//!
//! ```text
//! C     G                 (C)Hello (G)world
//! Hello world       ->
//! ```
//!
//! Chords at or past the end of the lyric line are appended to it. Only chord
//! lines made entirely of chords are merged. One that also carries other
//! tokens (`Intro:`, `x2`) is left as it is, and so is the line below it.
//!
//! A chord line with no lyric line under it (intro, a blank line follows, end
//! of song) passes through unchanged, keeping its column layout.
//!
//! ### Chord glued to the first word
//! Leading bare chords with the last one stuck to a capitalised word:
//!
//! ```text
//! D A A7 DHey Jude   ->   (D)(A)(A7)(D)Hey Jude
//! ```
//!
//! With no free-standing chord in front, the word must also contain a
//! lowercase letter, so `CD player` is left alone while `DHey Jude` is split.
//! A line holding a glued word is never a chord line, however many chords
//! come before it.
//!
//! ## Order
//! The chord-line test runs first because it needs the next line. The glued
//! test only runs when it fails. Lines that already contain a bracketed chord
//! are never rewritten, which keeps normalization idempotent.

use crate::grammar::ChordGrammar;
use tracing::debug;

/// Share of chord tokens above which a line counts as a chord line
pub const DEFAULT_CHORD_LINE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Strictly-greater-than threshold, between 0 and 1 (exclusive)
    pub chord_line_threshold: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            chord_line_threshold: DEFAULT_CHORD_LINE_THRESHOLD,
        }
    }
}

/// A whitespace-delimited token and where it sits in its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    column: usize,
    start: usize,
    end: usize,
    text: &'a str,
}

/// Split a line into whitespace-delimited tokens, tracking character columns.
fn tokens(line: &str) -> Vec<Token<'_>> {
    let mut result = Vec::new();
    let mut current: Option<(usize, usize)> = None; // (column, byte start)

    for (column, (offset, c)) in line.char_indices().enumerate() {
        match (c.is_whitespace(), current) {
            (true, Some((col, start))) => {
                result.push(Token {
                    column: col,
                    start,
                    end: offset,
                    text: &line[start..offset],
                });
                current = None;
            }
            (false, None) => current = Some((column, offset)),
            _ => {}
        }
    }
    if let Some((column, start)) = current {
        result.push(Token {
            column,
            start,
            end: line.len(),
            text: &line[start..],
        });
    }
    result
}

pub struct Normalizer<'g> {
    grammar: &'g ChordGrammar,
    options: NormalizeOptions,
}

impl<'g> Normalizer<'g> {
    pub fn new(grammar: &'g ChordGrammar, options: NormalizeOptions) -> Self {
        Self { grammar, options }
    }

    /// Rewrite `lyrics` into inline-bracket notation.
    ///
    /// Lines are joined with `\n`; a trailing line break in the input is kept.
    pub fn normalize(&self, lyrics: &str) -> String {
        let lines: Vec<&str> = lyrics.lines().collect();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if let Some(chord_tokens) = self.chord_line(line) {
                let only_chords = self.chords_only(&chord_tokens).count() == chord_tokens.len();
                let lyric = lines
                    .get(i + 1)
                    .filter(|next| only_chords && self.is_lyric_line(next));
                match lyric {
                    Some(lyric) => {
                        debug!(line = i + 1, "merging chord line into the lyric line below");
                        out.push(self.merge(&chord_tokens, lyric));
                        i += 2;
                    }
                    None => {
                        debug!(line = i + 1, only_chords, "keeping chord line as it is");
                        out.push(line.to_string());
                        i += 1;
                    }
                }
                continue;
            }

            match self.unglue(line) {
                Some(rewritten) => {
                    debug!(line = i + 1, "split chords glued to the first word");
                    out.push(rewritten);
                }
                None => out.push(line.to_string()),
            }
            i += 1;
        }

        let mut result = out.join("\n");
        if !out.is_empty() && lyrics.ends_with('\n') {
            result.push('\n');
        }
        result
    }

    /// Tokens of `line` if it is a chord line, `None` otherwise.
    fn chord_line<'a>(&self, line: &'a str) -> Option<Vec<Token<'a>>> {
        if self.grammar.contains_bracketed(line) {
            return None;
        }
        let tokens = tokens(line);
        if tokens.is_empty() || tokens.iter().any(|token| self.is_glued(token.text)) {
            return None;
        }
        let chords = self.chords_only(&tokens).count();
        let share = chords as f64 / tokens.len() as f64;
        (share > self.options.chord_line_threshold).then_some(tokens)
    }

    fn chords_only<'a>(
        &'a self,
        tokens: &'a [Token<'a>],
    ) -> impl Iterator<Item = &'a Token<'a>> + 'a {
        tokens
            .iter()
            .filter(move |token| self.grammar.is_chord_token(token.text))
    }

    /// A line chords from the line above can be merged into.
    fn is_lyric_line(&self, line: &str) -> bool {
        !line.trim().is_empty()
            && !self.grammar.contains_bracketed(line)
            && self.chord_line(line).is_none()
    }

    /// Splice chord-line chords into `lyric` at their columns.
    fn merge(&self, chord_tokens: &[Token<'_>], lyric: &str) -> String {
        let mut out = String::with_capacity(lyric.len() + chord_tokens.len() * 6);
        let mut pending = self.chords_only(chord_tokens).peekable();

        for (column, c) in lyric.chars().enumerate() {
            while let Some(chord) = pending.next_if(|chord| chord.column <= column) {
                push_bracketed(&mut out, chord.text);
            }
            out.push(c);
        }
        for chord in pending {
            push_bracketed(&mut out, chord.text);
        }
        out
    }

    /// A word with a chord stuck to its front, e.g. `DHey`.
    fn is_glued(&self, word: &str) -> bool {
        if self.grammar.is_chord_token(word) {
            return false;
        }
        self.grammar
            .chord_prefix(word)
            .is_some_and(|prefix| looks_like_glued_word(&word[prefix.len()..], true))
    }

    /// Split leading chords off a line whose last chord is glued to a word.
    fn unglue(&self, line: &str) -> Option<String> {
        if self.grammar.contains_bracketed(line) {
            return None;
        }
        let tokens = tokens(line);
        let first = tokens.first()?;
        let mut chords: Vec<&str> = Vec::new();

        for token in &tokens {
            if self.grammar.is_chord_token(token.text) {
                chords.push(token.text);
                continue;
            }

            let prefix = self.grammar.chord_prefix(token.text)?;
            let word = &token.text[prefix.len()..];
            if !looks_like_glued_word(word, !chords.is_empty()) {
                return None;
            }

            let mut out = String::with_capacity(line.len() + chords.len() * 3 + 2);
            out.push_str(&line[..first.start]);
            for chord in chords {
                push_bracketed(&mut out, chord);
            }
            push_bracketed(&mut out, prefix);
            out.push_str(word);
            out.push_str(&line[token.end..]);
            return Some(out);
        }
        None
    }
}

fn looks_like_glued_word(word: &str, after_chords: bool) -> bool {
    let starts_upper = word.chars().next().is_some_and(|c| c.is_uppercase());
    starts_upper && (after_chords || word.chars().any(|c| c.is_lowercase()))
}

fn push_bracketed(out: &mut String, chord: &str) {
    out.push('(');
    out.push_str(chord);
    out.push(')');
}
