//! # Lyrics Codecs
//!
//! Render structured lines back to text.
//!
//! ## Raw (inline brackets)
//! The form users type and edit. Each chord is inserted as `(name)` at its
//! position; every earlier insertion pushes later insertion points right by
//! `len(name) + 2`.
//!
//! ```text
//! text:   Help! I need somebody     chords: (0, Bm) (17, Bm/A)
//! raw:    (Bm)Help! I need some(Bm/A)body
//! ```
//!
//! ## Display (chords above lyrics)
//! Two rows per line for monospaced output. Chord names start at their column;
//! a chord that would touch the previous one is pushed one space right.
//!
//! ```text
//! Bm               Bm/A
//! Help! I need somebody
//! ```
//!
//! Both codecs end every line, the last one included, with `\n`.

use crate::model::Line;

/// Render one line in inline-bracket form.
///
/// Chords past the end of the text are written at the end.
pub fn raw_line(line: &Line) -> String {
    let mut out = String::with_capacity(line.text.len() + line.chords.len() * 6);
    let mut chars = line.text.chars();
    let mut column = 0;

    for chord in line.ordered_chords() {
        while column < chord.position {
            match chars.next() {
                Some(c) => out.push(c),
                None => break,
            }
            column += 1;
        }
        out.push('(');
        out.push_str(&chord.name);
        out.push(')');
    }
    out.extend(chars);
    out
}

/// Render lines in inline-bracket form, one per row.
pub fn render_raw(lines: &[Line]) -> String {
    let mut result = String::new();
    for line in lines {
        result.push_str(&raw_line(line));
        result.push('\n');
    }
    result
}

/// The row of chord names that sits above a line's lyrics.
///
/// Empty when the line has no chords.
pub fn chord_row(line: &Line) -> String {
    let mut row = String::new();
    let mut width = 0;

    for chord in line.ordered_chords() {
        let mut pad = chord.position.saturating_sub(width);
        if pad == 0 && width > 0 {
            pad = 1;
        }
        row.extend(std::iter::repeat(' ').take(pad));
        row.push_str(&chord.name);
        width += pad + chord.name.chars().count();
    }
    row
}

/// Render lines as chord row + lyric row pairs.
pub fn render_display(lines: &[Line]) -> String {
    let mut result = String::new();
    for line in lines {
        result.push_str(&chord_row(line));
        result.push('\n');
        result.push_str(&line.text);
        result.push('\n');
    }
    result
}
