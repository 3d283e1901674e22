//! # Song Files
//!
//! Reads standalone song files. Two layouts are accepted:
//!
//! ```text
//! Help!                      ---
//! The Beatles                title: Help!
//! (Bm)Help! I need some...   artist: The Beatles
//!                            ---
//!                            (Bm)Help! I need some...
//! ```
//!
//! The left form puts the title on line 1 and the artist on line 2. The right
//! form opens with a YAML frontmatter block; everything after the closing
//! `---` is lyrics.

use crate::error::SheetError;
use crate::grammar::ChordGrammar;
use crate::model::Song;
use crate::normalize::Normalizer;
use crate::structure::parse_song;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Frontmatter keys
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawSongMetadata {
    title: Option<String>,
    artist: Option<String>,
}

/// Title, artist and unparsed lyrics of one song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongSource {
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

impl SongSource {
    /// Split a song file into title, artist and lyrics.
    pub fn parse(source: &str) -> Result<Self, SheetError> {
        match split_frontmatter(source) {
            Some((metadata, lyrics)) => Self::from_frontmatter(metadata, lyrics),
            None => Self::from_header_lines(source),
        }
    }

    fn from_frontmatter(metadata: &str, lyrics: &str) -> Result<Self, SheetError> {
        let raw: RawSongMetadata = if metadata.trim().is_empty() {
            RawSongMetadata::default()
        } else {
            serde_yaml::from_str(metadata).map_err(|e| SheetError::MetadataError(e.to_string()))?
        };

        let title = required(raw.title, 1, "title")?;
        let artist = required(raw.artist, 1, "artist")?;
        Ok(Self {
            title,
            artist,
            lyrics: lyrics.to_string(),
        })
    }

    fn from_header_lines(source: &str) -> Result<Self, SheetError> {
        let mut lines = source.lines();
        let title = required(lines.next().map(str::to_string), 1, "title")?;
        let artist = required(lines.next().map(str::to_string), 2, "artist")?;
        let lyrics: Vec<&str> = lines.collect();
        Ok(Self {
            title,
            artist,
            lyrics: lyrics.join("\n"),
        })
    }

    /// Structure the lyrics, normalizing them first when a normalizer is given.
    pub fn into_song(self, grammar: &ChordGrammar, normalizer: Option<&Normalizer<'_>>) -> Song {
        let lyrics = match normalizer {
            Some(normalizer) => normalizer.normalize(&self.lyrics),
            None => self.lyrics,
        };
        parse_song(grammar, &lyrics, self.title, self.artist)
    }
}

fn required(
    value: Option<String>,
    line: usize,
    field: &'static str,
) -> Result<String, SheetError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(SheetError::MissingFieldError { line, field })
}

/// Split off a leading `---` block. Returns (metadata, rest).
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let trimmed = source.trim_start();
    let body = trimmed
        .strip_prefix("---\r\n")
        .or_else(|| trimmed.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim() == "---" {
            let metadata = &body[..offset];
            let rest = &body[offset + line.len()..];
            return Some((metadata, rest));
        }
        offset += line.len();
    }
    None
}

/// Read and split one song file.
pub fn load_song_file(path: impl AsRef<Path>) -> Result<SongSource, SheetError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SheetError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let song = SongSource::parse(&source)?;
    debug!(path = %path.display(), title = %song.title, "loaded song file");
    Ok(song)
}

/// Read several song files, stopping at the first failure.
pub fn load_song_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SongSource>, SheetError> {
    paths.iter().map(load_song_file).collect()
}
