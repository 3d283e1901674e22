//! Read models handed to API and export layers.
//!
//! Lyrics views are built in two steps: the plain summary record first, then
//! the lyrics string produced by the matching codec is assigned to it.

use crate::model::{Line, Song};
use crate::render::{render_display, render_raw};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Id, title and artist only
    Short,
    /// Structured lines with chord positions
    #[default]
    Full,
    /// Inline-bracket lyrics, for an edit form
    ForEdit,
    /// Chords-above-lyrics text
    ForDisplay,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Short,
        DisplayMode::Full,
        DisplayMode::ForEdit,
        DisplayMode::ForDisplay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Short => "short",
            DisplayMode::Full => "full",
            DisplayMode::ForEdit => "for_edit",
            DisplayMode::ForDisplay => "for_display",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown display mode: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongSummary {
    pub id: Option<u64>,
    pub title: String,
    pub artist: String,
}

impl From<&Song> for SongSummary {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id,
            title: song.title.clone(),
            artist: song.artist.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordRead {
    pub position: usize,
    pub chord: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRead {
    pub line: String,
    pub chords: Vec<ChordRead>,
}

impl From<&Line> for LineRead {
    fn from(line: &Line) -> Self {
        Self {
            line: line.text.clone(),
            chords: line
                .ordered_chords()
                .into_iter()
                .map(|c| ChordRead {
                    position: c.position,
                    chord: c.name.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongRead {
    #[serde(flatten)]
    pub summary: SongSummary,
    pub lines: Vec<LineRead>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongLyrics {
    #[serde(flatten)]
    pub summary: SongSummary,
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SongView {
    Short(SongSummary),
    Full(SongRead),
    Lyrics(SongLyrics),
}

impl SongView {
    pub fn build(song: &Song, mode: DisplayMode) -> Self {
        let summary = SongSummary::from(song);
        match mode {
            DisplayMode::Short => SongView::Short(summary),
            DisplayMode::Full => SongView::Full(SongRead {
                summary,
                lines: song.lines.iter().map(LineRead::from).collect(),
            }),
            DisplayMode::ForEdit => SongView::Lyrics(SongLyrics {
                summary,
                lyrics: render_raw(&song.lines),
            }),
            DisplayMode::ForDisplay => SongView::Lyrics(SongLyrics {
                summary,
                lyrics: render_display(&song.lines),
            }),
        }
    }
}
