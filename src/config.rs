//! Runtime configuration: defaults, then a YAML file, then environment.
//!
//! ```yaml
//! chord-line-threshold: 0.6
//! normalize: true
//! page-height: 60
//! page-width: 80
//! ```

use crate::error::SheetError;
use crate::normalize::{NormalizeOptions, DEFAULT_CHORD_LINE_THRESHOLD};
use crate::sheet::{FixedHeight, PageBreakPolicy, SheetLayout, Unpaged};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const ENV_CONFIG_PATH: &str = "CHORDSHEET_CONFIG";
const ENV_CHORD_LINE_THRESHOLD: &str = "CHORDSHEET_CHORD_LINE_THRESHOLD";
const ENV_NORMALIZE: &str = "CHORDSHEET_NORMALIZE";
const ENV_PAGE_HEIGHT: &str = "CHORDSHEET_PAGE_HEIGHT";
const ENV_PAGE_WIDTH: &str = "CHORDSHEET_PAGE_WIDTH";

const MIN_PAGE_HEIGHT: usize = 4;
const MIN_PAGE_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub chord_line_threshold: f64,
    /// Normalize song file lyrics before structuring
    pub normalize: bool,
    /// Rows per page; `None` prints each song on one page
    pub page_height: Option<usize>,
    pub page_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chord_line_threshold: DEFAULT_CHORD_LINE_THRESHOLD,
            normalize: false,
            page_height: None,
            page_width: 80,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct PartialConfig {
    chord_line_threshold: Option<f64>,
    normalize: Option<bool>,
    page_height: Option<usize>,
    page_width: Option<usize>,
}

impl Config {
    /// Load from `path` (or `CHORDSHEET_CONFIG` when `path` is `None`) and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SheetError> {
        let mut config = Self::default();

        let path = path.map(Path::to_path_buf).or_else(|| {
            env::var_os(ENV_CONFIG_PATH)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        if let Some(path) = path {
            config.apply_partial(read_partial(&path)?);
            debug!(path = %path.display(), "read config file");
        }

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document on top of the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, SheetError> {
        let mut config = Self::default();
        config.apply_partial(parse_partial(contents)?);
        config.validate()?;
        Ok(config)
    }

    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(threshold) = partial.chord_line_threshold {
            self.chord_line_threshold = threshold;
        }
        if let Some(normalize) = partial.normalize {
            self.normalize = normalize;
        }
        if partial.page_height.is_some() {
            self.page_height = partial.page_height;
        }
        if let Some(width) = partial.page_width {
            self.page_width = width;
        }
    }

    /// Override settings from environment variables, read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SheetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(ENV_CHORD_LINE_THRESHOLD) {
            self.chord_line_threshold = parse_env(ENV_CHORD_LINE_THRESHOLD, &value)?;
        }
        if let Some(value) = get(ENV_NORMALIZE) {
            self.normalize = parse_env(ENV_NORMALIZE, &value)?;
        }
        if let Some(value) = get(ENV_PAGE_HEIGHT) {
            self.page_height = Some(parse_env(ENV_PAGE_HEIGHT, &value)?);
        }
        if let Some(value) = get(ENV_PAGE_WIDTH) {
            self.page_width = parse_env(ENV_PAGE_WIDTH, &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SheetError> {
        if !(self.chord_line_threshold > 0.0 && self.chord_line_threshold < 1.0) {
            return Err(SheetError::ConfigError(format!(
                "chord-line-threshold must be between 0 and 1 (exclusive), got {}",
                self.chord_line_threshold
            )));
        }
        if let Some(height) = self.page_height {
            if height < MIN_PAGE_HEIGHT {
                return Err(SheetError::ConfigError(format!(
                    "page-height must be at least {}, got {}",
                    MIN_PAGE_HEIGHT, height
                )));
            }
        }
        if self.page_width < MIN_PAGE_WIDTH {
            return Err(SheetError::ConfigError(format!(
                "page-width must be at least {}, got {}",
                MIN_PAGE_WIDTH, self.page_width
            )));
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            chord_line_threshold: self.chord_line_threshold,
        }
    }

    pub fn sheet_layout(&self) -> SheetLayout {
        let policy: Box<dyn PageBreakPolicy> = match self.page_height {
            Some(height) => Box::new(FixedHeight(height)),
            None => Box::new(Unpaged),
        };
        SheetLayout::new(policy, self.page_width)
    }
}

fn read_partial(path: &Path) -> Result<PartialConfig, SheetError> {
    let contents = fs::read_to_string(path).map_err(|source| SheetError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_partial(&contents)
}

fn parse_partial(contents: &str) -> Result<PartialConfig, SheetError> {
    if contents.trim().is_empty() {
        return Ok(PartialConfig::default());
    }
    serde_yaml::from_str(contents).map_err(|e| SheetError::ConfigError(e.to_string()))
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, SheetError> {
    value
        .trim()
        .parse()
        .map_err(|_| SheetError::ConfigError(format!("{} has an invalid value: {}", key, value)))
}
