//! Locating generated room directories

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::SaveError;

/// Directory name for a graph generated by process `pid`
pub fn graph_dir_name(prefix: &str, pid: u32) -> String {
    format!("{prefix}{pid}")
}

/// Find the most recently modified directory in `base` named
/// `<prefix><n>` with `n` a positive integer.
///
/// Ties on modification time go to the larger `n`.
pub fn find_latest(base: &Path, prefix: &str) -> Result<PathBuf, SaveError> {
    let entries = fs::read_dir(base).map_err(|_| SaveError::NotFound(base.to_path_buf()))?;

    let mut latest: Option<(SystemTime, u64, PathBuf)> = None;
    for entry in entries.flatten() {
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(suffix) = name.to_str().and_then(|n| n.strip_prefix(prefix)) else {
            continue;
        };
        let Ok(number) = suffix.parse::<u64>() else {
            continue;
        };
        if number == 0 {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let newer = latest
            .as_ref()
            .is_none_or(|(time, n, _)| (modified, number) > (*time, *n));
        if newer {
            latest = Some((modified, number, entry.path()));
        }
    }

    match latest {
        Some((_, _, path)) => {
            log::debug!("latest room directory: {}", path.display());
            Ok(path)
        }
        None => Err(SaveError::NotFound(base.to_path_buf())),
    }
}
