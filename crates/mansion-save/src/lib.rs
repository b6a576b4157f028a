//! mansion-save: room file storage for the mansion text adventure
//!
//! Each room of a graph is stored as a small line-oriented text file:
//!
//! ```text
//! ROOM NAME: Kitchen
//! CONNECTION 1: Library
//! CONNECTION 2: Hall
//! CONNECTION 3: Study
//! ROOM TYPE: START_ROOM
//! ```
//!
//! A generated graph lives in its own directory named `<prefix><pid>`;
//! [`find_latest`] locates the newest one.

use std::path::PathBuf;

use thiserror::Error;

use mansion_core::GraphError;

mod discovery;
mod roomfile;

pub use discovery::{find_latest, graph_dir_name};
pub use roomfile::{format_room, load_graph, load_room, parse_room, room_file_name, write_graph};

/// Storage errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no room directory found at {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "malformed room file {}{}: {reason}",
        path.display(),
        line.map(|n| format!(" line {n}")).unwrap_or_default()
    )]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        reason: String,
    },

    #[error("{} holds {found} room files", dir.display())]
    RoomCount { dir: PathBuf, found: usize },

    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("failed to write rooms: {}", failed.join(", "))]
    PartialWrite { failed: Vec<String> },

    #[error("refusing to write into non-empty directory {}", .0.display())]
    DirectoryNotEmpty(PathBuf),
}
