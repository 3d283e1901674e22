//! # Line Structurer
//!
//! Turns a block of inline-bracket lyrics into structured lines.
//!
//! ## Rules
//! - The block is split on `\n` (a preceding `\r` is dropped)
//! - Each line is trimmed and run through the bracket tokenizer
//! - Blank lines are kept as empty lines, they carry verse spacing
//! - Nothing fails: unknown `(...)` groups stay in the text
//!
//! ## Example
//! ```rust
//! use chordsheet::{parse, ChordAnnotation};
//!
//! let song = parse("(Am)Hello (Dm)world\n\nBye", "Greeting", "Someone");
//! assert_eq!(song.lines.len(), 3);
//! assert_eq!(song.lines[0].text, "Hello world");
//! assert_eq!(song.lines[0].chords[1], ChordAnnotation::new(6, "Dm"));
//! assert!(song.lines[1].is_blank());
//! ```

use crate::grammar::ChordGrammar;
use crate::model::{Line, Song};
use crate::tokenizer::tokenize_line;
use tracing::trace;

/// Structure every line of `lyrics`, in order.
pub fn structure(grammar: &ChordGrammar, lyrics: &str) -> Vec<Line> {
    let lines: Vec<Line> = lyrics
        .lines()
        .map(|line| Line::from(tokenize_line(grammar, line)))
        .collect();
    trace!(lines = lines.len(), "structured lyrics");
    lines
}

/// Build a new song from a lyrics block.
pub fn parse_song(
    grammar: &ChordGrammar,
    lyrics: &str,
    title: impl Into<String>,
    artist: impl Into<String>,
) -> Song {
    let mut song = Song::new(title, artist);
    song.lines = structure(grammar, lyrics);
    song
}

/// Replace the lines of an existing song, keeping its id, title and artist.
pub fn parse_into_existing(grammar: &ChordGrammar, lyrics: &str, mut song: Song) -> Song {
    song.replace_lyrics(grammar, lyrics);
    song
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChordAnnotation;

    #[test]
    fn test_blank_lines_are_preserved() {
        let lines = structure(&ChordGrammar::new(), "Line A\n\nLine B");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "Line A");
        assert!(lines[1].is_blank());
        assert_eq!(lines[2].text, "Line B");
    }

    #[test]
    fn test_windows_line_endings() {
        let lines = structure(&ChordGrammar::new(), "(C)One\r\n(G)Two\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "Two");
        assert_eq!(lines[1].chords, vec![ChordAnnotation::new(0, "G")]);
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert!(structure(&ChordGrammar::new(), "").is_empty());
    }

    #[test]
    fn test_parse_song_sets_metadata() {
        let song = parse_song(&ChordGrammar::new(), "(E7)Help!", "Help!", "The Beatles");
        assert_eq!(song.title, "Help!");
        assert_eq!(song.artist, "The Beatles");
        assert_eq!(song.id, None);
        assert_eq!(song.lines[0].chords[0].name, "E7");
    }

    #[test]
    fn test_parse_into_existing_replaces_lines() {
        let grammar = ChordGrammar::new();
        let song = parse_song(&grammar, "a\nb\nc", "Title", "Artist").with_id(3);
        let song = parse_into_existing(&grammar, "(D)only", song);
        assert_eq!(song.id, Some(3));
        assert_eq!(song.title, "Title");
        assert_eq!(song.lines, vec![Line::new("only", vec![ChordAnnotation::new(0, "D")])]);
    }
}
