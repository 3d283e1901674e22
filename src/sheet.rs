//! # Sheet Layout
//!
//! Lays songs out as printable rows for monospaced output. This is the part of
//! PDF export that decides *what* goes on each page; turning rows into PDF
//! drawing calls is left to the caller.
//!
//! ## Row Rules
//! For each source line:
//! - No chords and no text: one [`SheetRow::Spacer`] (double height)
//! - Otherwise a [`SheetRow::Chords`] row (possibly empty, to keep lyric rows
//!   aligned) followed by a [`SheetRow::Lyrics`] row when the line has text
//! - A chord-only line directly above a sung line still gets an empty lyric
//!   row, so the chords stand apart from the verse below
//!
//! ## Pages
//! Every song starts on a fresh page with a title and artist header. Before
//! each source line the [`PageBreakPolicy`] is asked whether two more rows fit;
//! if not, a new page begins.

use crate::model::{Line, Song};
use crate::render::chord_row;

/// One printable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRow {
    Title(String),
    Artist(String),
    Chords(String),
    Lyrics(String),
    /// Blank source line, two rows tall
    Spacer,
}

impl SheetRow {
    /// Height in rows
    pub fn height(&self) -> usize {
        match self {
            SheetRow::Spacer => 2,
            _ => 1,
        }
    }
}

/// Rows of one page, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub rows: Vec<SheetRow>,
}

impl Page {
    pub fn height(&self) -> usize {
        self.rows.iter().map(SheetRow::height).sum()
    }
}

/// Decides where pages break.
pub trait PageBreakPolicy {
    /// Whether `needed` more rows fit on a page that already holds `used` rows.
    fn fits(&self, used: usize, needed: usize) -> bool;
}

/// Never breaks: one page per song.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaged;

impl PageBreakPolicy for Unpaged {
    fn fits(&self, _used: usize, _needed: usize) -> bool {
        true
    }
}

/// Pages of a fixed number of rows.
#[derive(Debug, Clone, Copy)]
pub struct FixedHeight(pub usize);

impl PageBreakPolicy for FixedHeight {
    fn fits(&self, used: usize, needed: usize) -> bool {
        // An empty page always takes the line, even if it is too tall.
        used == 0 || used + needed <= self.0
    }
}

/// Rows for each source line, one group per line.
pub fn line_rows(lines: &[Line]) -> Vec<Vec<SheetRow>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let chords = chord_row(line);
            if chords.is_empty() && line.text.is_empty() {
                return vec![SheetRow::Spacer];
            }

            let closes_chord_block = !chords.is_empty()
                && line.text.is_empty()
                && lines.get(i + 1).is_some_and(|next| !next.text.is_empty());

            let mut rows = vec![SheetRow::Chords(chords)];
            if !line.text.is_empty() || closes_chord_block {
                rows.push(SheetRow::Lyrics(line.text.clone()));
            }
            rows
        })
        .collect()
}

/// Split a song into pages.
pub fn paginate(song: &Song, policy: &dyn PageBreakPolicy) -> Vec<Page> {
    let mut pages = vec![Page {
        rows: vec![
            SheetRow::Title(song.title.clone()),
            SheetRow::Artist(song.artist.clone()),
        ],
    }];

    for group in line_rows(&song.lines) {
        let used = pages.last().map(Page::height).unwrap_or(0);
        if !policy.fits(used, 2) {
            pages.push(Page::default());
        }
        if let Some(page) = pages.last_mut() {
            page.rows.extend(group);
        }
    }
    pages
}

/// How a songbook is turned into text
pub struct SheetLayout {
    pub policy: Box<dyn PageBreakPolicy>,
    /// Columns used to centre titles and right-align artists
    pub width: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            policy: Box::new(Unpaged),
            width: 80,
        }
    }
}

impl SheetLayout {
    pub fn new(policy: Box<dyn PageBreakPolicy>, width: usize) -> Self {
        Self { policy, width }
    }

    fn write_row(&self, out: &mut String, row: &SheetRow) {
        match row {
            SheetRow::Title(title) => {
                let pad = self.width.saturating_sub(title.chars().count()) / 2;
                out.extend(std::iter::repeat(' ').take(pad));
                out.push_str(title);
                out.push('\n');
            }
            SheetRow::Artist(artist) => {
                let pad = self.width.saturating_sub(artist.chars().count());
                out.extend(std::iter::repeat(' ').take(pad));
                out.push_str(artist);
                out.push('\n');
            }
            SheetRow::Chords(text) | SheetRow::Lyrics(text) => {
                out.push_str(text);
                out.push('\n');
            }
            SheetRow::Spacer => out.push_str("\n\n"),
        }
    }
}

/// Render songs as monospaced text, pages separated by a form feed line.
pub fn render_sheet(songs: &[Song], layout: &SheetLayout) -> String {
    let mut out = String::new();
    let mut first = true;

    for song in songs {
        for page in paginate(song, layout.policy.as_ref()) {
            if !first {
                out.push_str("\u{c}\n");
            }
            first = false;
            for row in &page.rows {
                layout.write_row(&mut out, row);
            }
        }
    }
    out
}
