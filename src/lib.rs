//! # chordsheet
//!
//! Parse chord-annotated lyrics into a position-addressed structure and render
//! them back as inline-bracket text or chords-above-lyrics text.
//!
//! ## Pipeline
//! ```text
//! raw text ──normalize──▶ (Am)inline (Dm)brackets ──structure──▶ Song
//!                                                                 │
//!                       render_raw ◀──────────────┬───────────────┘
//!                       render_display ◀──────────┘
//! ```
//!
//! The free functions below use the standard [`ChordGrammar`] and default
//! options. Build a grammar and [`Normalizer`] yourself to change them.
//!
//! ## Example
//! ```rust
//! use chordsheet::{normalize, parse, render_display, render_raw};
//!
//! let lyrics = normalize("C     G\nHello world");
//! assert_eq!(lyrics, "(C)Hello (G)world");
//!
//! let song = parse(&lyrics, "Greeting", "Someone");
//! assert_eq!(render_raw(&song), "(C)Hello (G)world\n");
//! assert_eq!(render_display(&song), "C     G\nHello world\n");
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod model;
pub mod normalize;
pub mod render;
pub mod sheet;
pub mod songfile;
pub mod structure;
pub mod tokenizer;
pub mod views;

pub use config::Config;
pub use error::SheetError;
pub use grammar::ChordGrammar;
pub use model::{ChordAnnotation, Line, Song};
pub use normalize::{NormalizeOptions, Normalizer};
pub use sheet::{render_sheet, SheetLayout};
pub use songfile::{load_song_file, load_song_files, SongSource};
pub use views::{DisplayMode, SongView};

/// Structure a lyrics block into lines.
pub fn structure(lyrics: &str) -> Vec<Line> {
    structure::structure(ChordGrammar::standard(), lyrics)
}

/// Build a new song from inline-bracket lyrics.
pub fn parse(lyrics: &str, title: impl Into<String>, artist: impl Into<String>) -> Song {
    structure::parse_song(ChordGrammar::standard(), lyrics, title, artist)
}

/// Replace the lines of `song` with ones parsed from `lyrics`.
pub fn parse_into_existing(lyrics: &str, song: Song) -> Song {
    structure::parse_into_existing(ChordGrammar::standard(), lyrics, song)
}

/// Lyrics with chords in brackets, as typed in an edit form.
pub fn render_raw(song: &Song) -> String {
    render::render_raw(&song.lines)
}

/// Lyrics with chords on their own row above each line.
pub fn render_display(song: &Song) -> String {
    render::render_display(&song.lines)
}

/// Rewrite chord-line and glued-chord conventions into inline brackets.
pub fn normalize(lyrics: &str) -> String {
    Normalizer::new(ChordGrammar::standard(), NormalizeOptions::default()).normalize(lyrics)
}
