//! Integration tests for chordsheet
//!
//! Tests the full pipeline from raw lyrics to rendered text.

use chordsheet::{
    normalize, parse, parse_into_existing, render_display, render_raw, render_sheet, structure,
    ChordAnnotation, ChordGrammar, DisplayMode, Line, SheetLayout, Song, SongSource, SongView,
};
use chordsheet::sheet::FixedHeight;

#[test]
fn test_help_round_trip() {
    let lyrics = "(Bm)Help! I need some(Bm/A)body, (G)help! Not just anybody,\n\
                  (E7)Help! You know I need someone, (A)help!\n";
    let song = parse(lyrics, "Help!", "The Beatles");
    assert_eq!(song.lines.len(), 2);
    assert_eq!(song.lines[0].text, "Help! I need somebody, help! Not just anybody,");
    assert_eq!(song.lines[0].chords[1], ChordAnnotation::new(17, "Bm/A"));
    assert_eq!(render_raw(&song), lyrics);
}

#[test]
fn test_display_fixture() {
    // Three lines of "Line N of song 1" with C1 at 0 and C2 at 5
    let mut song = Song::new("Test Song 1", "Artist 1");
    for j in 1..=3 {
        song.lines.push(Line::new(
            format!("Line {} of song 1", j),
            vec![ChordAnnotation::new(0, "C1"), ChordAnnotation::new(5, "C2")],
        ));
    }
    let display = render_display(&song);
    let rows: Vec<&str> = display.lines().collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], "C1   C2");
    assert_eq!(rows[1], "Line 1 of song 1");
    assert_eq!(rows[4], "C1   C2");
    assert_eq!(rows[5], "Line 3 of song 1");
}

#[test]
fn test_chord_sheet_to_display() {
    let sheet = "\
Am         F
Yesterday, all my troubles
C  G

(C)Here I (G)stand";
    let normalized = normalize(sheet);
    assert_eq!(
        normalized,
        "(Am)Yesterday, (F)all my troubles\nC  G\n\n(C)Here I (G)stand"
    );

    // The chord line with nothing under it keeps its columns as plain text
    let song = parse(&normalized, "Yesterday", "The Beatles");
    assert_eq!(song.lines.len(), 4);
    assert_eq!(song.lines[1].text, "C  G");
    assert!(song.lines[1].chords.is_empty());
    assert!(song.lines[2].is_blank());
    assert_eq!(
        render_display(&song),
        "Am         F\nYesterday, all my troubles\n\nC  G\n\n\nC      G\nHere I stand\n"
    );
}

#[test]
fn test_glued_chords_survive_a_chord_heavy_line() {
    let normalized = normalize("D A A7 G DHey Jude\nTake a sad song");
    let song = parse(&normalized, "Hey Jude", "The Beatles");
    assert_eq!(song.lines[0].text, "Hey Jude");
    assert_eq!(song.chord_names().collect::<Vec<_>>(), vec!["D", "A", "A7", "G", "D"]);
    assert_eq!(song.lines[1].text, "Take a sad song");
}

#[test]
fn test_glued_chords_structure() {
    let song = parse(&normalize("D A A7 DHey Jude"), "Hey Jude", "The Beatles");
    let line = &song.lines[0];
    assert_eq!(line.text, "Hey Jude");
    let chords: Vec<(usize, &str)> = line
        .chords
        .iter()
        .map(|c| (c.position, c.name.as_str()))
        .collect();
    assert_eq!(chords, vec![(0, "D"), (0, "A"), (0, "A7"), (0, "D")]);
    assert_eq!(render_raw(&song), "(D)(A)(A7)(D)Hey Jude\n");
}

#[test]
fn test_edit_replaces_all_lines() {
    let song = parse("(C)one\n(G)two\n(F)three", "Song", "Artist").with_id(12);
    let edited = parse_into_existing("(Am)just one", song);
    assert_eq!(edited.id, Some(12));
    assert_eq!(edited.title, "Song");
    assert_eq!(edited.artist, "Artist");
    assert_eq!(edited.lines.len(), 1);
    assert_eq!(render_raw(&edited), "(Am)just one\n");
}

#[test]
fn test_malformed_brackets_stay_literal() {
    let lines = structure("(Hm)not a chord (C##) nor this (Am");
    assert_eq!(lines[0].text, "(Hm)not a chord (C##) nor this (Am");
    assert!(lines[0].chords.is_empty());
}

#[test]
fn test_song_file_to_views() {
    let file = "---\ntitle: Let It Be\nartist: The Beatles\n---\n(C)When I find (G)myself\n";
    let source = SongSource::parse(file).unwrap();
    let song = source.into_song(ChordGrammar::standard(), None).with_id(5);

    let edit = serde_json::to_value(SongView::build(&song, DisplayMode::ForEdit)).unwrap();
    assert_eq!(edit["lyrics"], "(C)When I find (G)myself\n");
    assert_eq!(edit["title"], "Let It Be");

    let display = serde_json::to_value(SongView::build(&song, DisplayMode::ForDisplay)).unwrap();
    assert_eq!(display["lyrics"], "C           G\nWhen I find myself\n");
}

#[test]
fn test_songbook_pages() {
    let verse = "(C)one\n(G)two\n(Am)three\n(F)four";
    let songs = vec![
        parse(verse, "First", "Band"),
        parse(verse, "Second", "Band"),
    ];
    // header 2 rows + two lines of 2 rows each per page
    let layout = SheetLayout::new(Box::new(FixedHeight(6)), 20);
    let text = render_sheet(&songs, &layout);
    let pages: Vec<&str> = text.split("\u{c}\n").collect();
    assert_eq!(pages.len(), 4);
    assert!(pages[0].contains("First"));
    assert!(pages[0].contains("one\n"));
    assert!(pages[1].starts_with("Am\nthree\n"));
    assert!(pages[2].contains("Second"));
}

#[test]
fn test_song_json_round_trip() {
    let song = parse("(Am)(Dm)word\n\nBye(G)", "T", "A");
    let json = serde_json::to_string(&song).unwrap();
    let back: Song = serde_json::from_str(&json).unwrap();
    assert_eq!(back, song);
    assert_eq!(render_raw(&back), "(Am)(Dm)word\n\nBye(G)\n");
}
