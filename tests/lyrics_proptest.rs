//! Property-based tests for the lyrics engine
//!
//! - The exact, bracketed and prefix chord matchers agree on every token
//! - Normalizing twice gives the same text as normalizing once
//! - Rendering structured lyrics back to brackets reproduces the input
//! - Chord positions are ordered and never past the end of the line

use chordsheet::{normalize, render_raw, structure, ChordGrammar, Song};
use proptest::prelude::*;

/// Generate chords from the grammar's building blocks
fn chord_strategy() -> impl Strategy<Value = String> {
    let root = "[A-G][#b]?";
    let quality = prop_oneof![
        Just(""),
        Just("m"),
        Just("maj"),
        Just("min"),
        Just("dim"),
        Just("aug"),
        Just("sus"),
        Just("add"),
    ];
    (root, quality, "[0-9]{0,2}", proptest::option::of(root)).prop_map(
        |(root, quality, ext, bass)| match bass {
            Some(bass) => format!("{}{}{}/{}", root, quality, ext, bass),
            None => format!("{}{}{}", root, quality, ext),
        },
    )
}

/// Tokens that may or may not be chords
fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![chord_strategy(), "[A-Za-z0-9#/]{1,7}"]
}

/// Lowercase lyric words, never mistaken for chords
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}[,!]?"
}

/// A bracketed line with at most one chord per position
fn bracketed_line_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((proptest::option::of(chord_strategy()), word_strategy()), 1..8),
        proptest::option::of(chord_strategy()),
    )
        .prop_map(|(words, trailing)| {
            let mut line = words
                .into_iter()
                .map(|(chord, word)| match chord {
                    Some(chord) => format!("({}){}", chord, word),
                    None => word,
                })
                .collect::<Vec<_>>()
                .join(" ");
            if let Some(chord) = trailing {
                line.push_str(&format!("({})", chord));
            }
            line
        })
}

/// Free-form chord sheet lines: chord lines, lyric lines, glued lines, blanks
fn sheet_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(chord_strategy(), 1..5).prop_map(|c| c.join("   ")),
        prop::collection::vec(token_strategy(), 0..6).prop_map(|t| t.join(" ")),
        (prop::collection::vec(chord_strategy(), 0..3), chord_strategy(), "[A-Z][a-z]{1,6}")
            .prop_map(|(run, glued, word)| {
                let mut line = run.join(" ");
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&glued);
                line.push_str(&word);
                line
            }),
        bracketed_line_strategy(),
        Just(String::new()),
    ]
}

fn sheet_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(sheet_line_strategy(), 0..10).prop_map(|lines| lines.join("\n"))
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_chords_are_accepted(chord in chord_strategy()) {
            let grammar = ChordGrammar::standard();
            prop_assert!(grammar.is_chord_token(&chord), "rejected {}", chord);
            let bracketed = format!("({})", chord);
            prop_assert!(grammar.is_bracketed_chord(&bracketed));
            prop_assert_eq!(grammar.chord_prefix(&chord), Some(chord.as_str()));
        }

        #[test]
        fn test_matchers_agree(token in token_strategy()) {
            let grammar = ChordGrammar::standard();
            let bare = grammar.is_chord_token(&token);
            let bracketed = grammar.is_bracketed_chord(&format!("({})", token));
            prop_assert_eq!(bare, bracketed, "matchers disagree on {}", token);
            if bare {
                prop_assert_eq!(grammar.chord_prefix(&token), Some(token.as_str()));
            }
        }

        #[test]
        fn test_normalize_is_idempotent(sheet in sheet_strategy()) {
            let once = normalize(&sheet);
            let twice = normalize(&once);
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn test_raw_round_trip(lines in prop::collection::vec(bracketed_line_strategy(), 1..6)) {
            let lyrics = lines.join("\n");
            let mut song = Song::new("T", "A");
            song.lines = structure(&lyrics);
            prop_assert_eq!(render_raw(&song), format!("{}\n", lyrics));
        }

        #[test]
        fn test_positions_are_ordered_and_in_range(sheet in sheet_strategy()) {
            for line in structure(&normalize(&sheet)) {
                let len = line.char_len();
                let mut previous = 0;
                for chord in &line.chords {
                    prop_assert!(chord.position >= previous);
                    prop_assert!(chord.position <= len);
                    previous = chord.position;
                }
            }
        }
    }
}
