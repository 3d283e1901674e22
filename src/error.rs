//! # Error Types
//!
//! Parsing and rendering lyrics never fails: any text is acceptable input and
//! malformed chord markup degrades to literal lyric text. Errors only come from
//! the edges of the crate, where song files and configuration are read.
//!
//! ## Error Types
//! - `MetadataError` - Invalid YAML frontmatter in a song file
//! - `MissingFieldError` - Song file without a title or artist line
//! - `IoError` - A song or config file could not be read
//! - `ConfigError` - A configuration value is out of range
//! - `OutputError` - JSON output could not be produced
//!
//! ## Usage
//! ```rust
//! use chordsheet::{SheetError, SongSource};
//!
//! match SongSource::parse("Only a title") {
//!     Ok(source) => println!("Loaded {}", source.title),
//!     Err(SheetError::MissingFieldError { line, field }) => {
//!         eprintln!("Line {} should hold the {}", line, field);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    /// Invalid metadata error.
    ///
    /// Occurs when the YAML frontmatter of a song file cannot be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::MetadataError("expected a mapping".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: expected a mapping");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// A song file is missing its title or artist.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::MissingFieldError { line: 2, field: "artist" };
    /// assert_eq!(err.to_string(), "Missing artist at line 2");
    /// ```
    #[error("Missing {field} at line {line}")]
    MissingFieldError { line: usize, field: &'static str },

    /// A song or config file could not be read.
    ///
    /// Keeps the path that was being read alongside the underlying IO error.
    #[error("Failed to read '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration value out of range or unparsable.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A song or read model could not be written as JSON.
    #[error("Failed to serialize output: {0}")]
    OutputError(#[from] serde_json::Error),
}
