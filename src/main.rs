//! Command-line interface for chordsheet
//!
//! Usage:
//!   chordsheet parse `<file>`                  - Song structure as JSON
//!   chordsheet raw `<file>`                    - Lyrics with inline bracket chords
//!   chordsheet display `<file>`                - Chords above lyrics
//!   chordsheet normalize `<file>`              - Rewrite a lyrics block into bracket notation
//!   chordsheet sheet `<file>...`               - Paged text songbook
//!   chordsheet show `<file>` --mode `<mode>`   - Read model as JSON
//!
//! Song files hold the title on line 1 and the artist on line 2, or a YAML
//! frontmatter block with `title` and `artist`.
use chordsheet::{
    load_song_file, load_song_files, render_sheet, ChordGrammar, Config, DisplayMode,
    Normalizer, SheetError, Song, SongView,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = setup_tracing() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let file_arg = || {
        Arg::new("path")
            .help("Path to the song file")
            .required(true)
            .index(1)
    };

    let matches = Command::new("chordsheet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, normalize and render chord-annotated song lyrics")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("YAML configuration file"),
        )
        .arg(
            Arg::new("normalize")
                .long("normalize")
                .short('n')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Normalize chord lines and glued chords before parsing"),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the song structure as JSON")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("raw")
                .about("Print lyrics with inline chords")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("display")
                .about("Print chords above lyrics")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Rewrite a lyrics block into inline bracket notation")
                .arg(
                    Arg::new("path")
                        .help("Path to a lyrics file (no title or artist lines)")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("sheet").about("Print a paged songbook").arg(
                Arg::new("paths")
                    .help("Song files, in songbook order")
                    .required(true)
                    .num_args(1..)
                    .index(1),
            ),
        )
        .subcommand(
            Command::new("show")
                .about("Print a song read model as JSON")
                .arg(file_arg())
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .help("short, full, for_edit or for_display")
                        .default_value("full"),
                ),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_tracing() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| format!("failed to initialise tracing: {}", err))
}

fn run(matches: &ArgMatches) -> Result<(), SheetError> {
    let (command, sub) = matches
        .subcommand()
        .ok_or_else(|| SheetError::ConfigError("no command given".to_string()))?;

    // Global flags are propagated into the subcommand matches.
    let config_path = sub.get_one::<String>("config").map(Path::new);
    let mut config = Config::load(config_path)?;
    if sub.get_flag("normalize") {
        config.normalize = true;
    }

    let grammar = ChordGrammar::standard();
    let normalizer = Normalizer::new(grammar, config.normalize_options());
    let app = App {
        grammar,
        normalizer: config.normalize.then_some(&normalizer),
    };

    match command {
        "parse" => {
            let song = app.load(path_arg(sub))?;
            println!("{}", to_json(&song)?);
        }
        "raw" => {
            let song = app.load(path_arg(sub))?;
            print!("{}", chordsheet::render_raw(&song));
        }
        "display" => {
            let song = app.load(path_arg(sub))?;
            print!("{}", chordsheet::render_display(&song));
        }
        "normalize" => {
            let path = path_arg(sub);
            let lyrics = std::fs::read_to_string(path).map_err(|source| SheetError::IoError {
                path: path.into(),
                source,
            })?;
            print!("{}", normalizer.normalize(&lyrics));
        }
        "sheet" => {
            let paths: Vec<&String> = sub
                .get_many::<String>("paths")
                .into_iter()
                .flatten()
                .collect();
            let songs: Vec<Song> = load_song_files(&paths)?
                .into_iter()
                .map(|source| source.into_song(app.grammar, app.normalizer))
                .collect();
            print!("{}", render_sheet(&songs, &config.sheet_layout()));
        }
        "show" => {
            let mode: DisplayMode = sub
                .get_one::<String>("mode")
                .map(String::as_str)
                .unwrap_or("full")
                .parse()
                .map_err(SheetError::ConfigError)?;
            let song = app.load(path_arg(sub))?;
            println!("{}", to_json(&SongView::build(&song, mode))?);
        }
        _ => unreachable!(),
    }
    Ok(())
}

struct App<'a> {
    grammar: &'a ChordGrammar,
    normalizer: Option<&'a Normalizer<'a>>,
}

impl App<'_> {
    fn load(&self, path: &str) -> Result<Song, SheetError> {
        Ok(load_song_file(path)?.into_song(self.grammar, self.normalizer))
    }
}

fn path_arg(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, SheetError> {
    Ok(serde_json::to_string_pretty(value)?)
}
