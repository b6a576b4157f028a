//! Game options and configuration
//!
//! Options are read from an optional JSON file; anything missing keeps its
//! default. Command-line flags are applied on top by the binaries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DEFAULT_DIR_PREFIX, DEFAULT_TIME_COMMAND, DEFAULT_TIME_FILE, DEFAULT_TRIM_CHARS};

/// Options file errors
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("could not read options file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid option {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// User-configurable options shared by the generator and the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Directory holding the generated room directories
    pub base_dir: PathBuf,
    /// Room directories are named `<dir_prefix><pid>`
    pub dir_prefix: String,
    /// Where the time worker writes the timestamp
    pub time_file: PathBuf,
    /// Command word that asks for the time
    pub time_command: String,
    /// Trailing characters stripped from each input line
    pub trim_chars: String,
    /// Fixed generator seed; random when unset
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            dir_prefix: DEFAULT_DIR_PREFIX.to_string(),
            time_file: PathBuf::from(DEFAULT_TIME_FILE),
            time_command: DEFAULT_TIME_COMMAND.to_string(),
            trim_chars: DEFAULT_TRIM_CHARS.to_string(),
            seed: None,
        }
    }
}

impl GameOptions {
    /// Load options from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_config(&contents)
    }

    /// Parse options from JSON text
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(contents)?;
        options.check()?;
        Ok(options)
    }

    fn check(&self) -> Result<(), OptionsError> {
        if self.dir_prefix.is_empty() {
            return Err(OptionsError::Invalid {
                name: "dir_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        let command = self.time_command.trim_end_matches(|c: char| self.trim_chars.contains(c));
        if command.is_empty() || command != self.time_command {
            return Err(OptionsError::Invalid {
                name: "time_command",
                reason: format!("{:?} would be altered by input trimming", self.time_command),
            });
        }
        Ok(())
    }

    /// Strip the configured trailing characters from an input line
    pub fn trim_input<'a>(&self, line: &'a str) -> &'a str {
        line.trim_end_matches(|c: char| self.trim_chars.contains(c))
    }
}
