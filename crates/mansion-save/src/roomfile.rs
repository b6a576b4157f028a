//! Room file format: writing a graph out and reading it back

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mansion_core::{Graph, MAX_CONNECTIONS, NUM_ROOMS, Room, RoomRole};

use crate::SaveError;

const NAME_PREFIX: &str = "ROOM NAME: ";
const CONNECTION_PREFIX: &str = "CONNECTION ";
const ROLE_PREFIX: &str = "ROOM TYPE: ";

/// File name used for a room inside a graph directory
pub fn room_file_name(room_name: &str) -> String {
    format!("{room_name}_room")
}

/// Render a room in the on-disk layout
pub fn format_room(room: &Room) -> String {
    let mut text = format!("{NAME_PREFIX}{}\n", room.name());
    for (i, target) in room.connections().iter().enumerate() {
        text.push_str(&format!("{CONNECTION_PREFIX}{}: {target}\n", i + 1));
    }
    text.push_str(&format!("{ROLE_PREFIX}{}\n", room.role()));
    text
}

fn write_room(room: &Room, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(format_room(room).as_bytes())?;
    writer.flush()
}

/// Write every room of `graph` into `dir`, one file per room.
///
/// The directory is created if missing; an existing non-empty directory is
/// left untouched. A room that cannot be written is logged and skipped, the
/// rest are still written, and the call then fails with
/// [`SaveError::PartialWrite`] naming every room that failed.
pub fn write_graph(graph: &Graph, dir: &Path) -> Result<(), SaveError> {
    let io_err = |source| SaveError::Io {
        path: dir.to_path_buf(),
        source,
    };
    if dir.exists() && fs::read_dir(dir).map_err(io_err)?.next().is_some() {
        return Err(SaveError::DirectoryNotEmpty(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(io_err)?;
    write_rooms(graph, dir)
}

/// Write one file per room into an existing directory, continuing past
/// rooms that fail.
fn write_rooms(graph: &Graph, dir: &Path) -> Result<(), SaveError> {
    let mut failed = Vec::new();
    for room in graph.rooms() {
        let path = dir.join(room_file_name(room.name()));
        match write_room(room, &path) {
            Ok(()) => log::debug!("wrote {}", path.display()),
            Err(err) => {
                log::error!("failed to write room file {}: {err}", path.display());
                failed.push(room.name().to_string());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(SaveError::PartialWrite { failed })
    }
}

/// Parse the text of one room file.
///
/// `path` is only used for error messages. Lines that are not a name,
/// connection or room type declaration are ignored.
pub fn parse_room(text: &str, path: &Path) -> Result<Room, SaveError> {
    let malformed = |line: Option<usize>, reason: String| SaveError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut name: Option<&str> = None;
    let mut role: Option<RoomRole> = None;
    let mut connections: Vec<&str> = Vec::with_capacity(MAX_CONNECTIONS);

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        if let Some(value) = line.strip_prefix(NAME_PREFIX) {
            if name.replace(value).is_some() {
                return Err(malformed(Some(lineno), "second room name".to_string()));
            }
        } else if let Some(rest) = line.strip_prefix(CONNECTION_PREFIX) {
            let Some((number, target)) = rest.split_once(": ") else {
                return Err(malformed(Some(lineno), "bad connection line".to_string()));
            };
            let expected = connections.len() + 1;
            if number.parse::<usize>().ok() != Some(expected) {
                return Err(malformed(
                    Some(lineno),
                    format!("expected connection {expected}, found {number:?}"),
                ));
            }
            if expected > MAX_CONNECTIONS {
                return Err(malformed(
                    Some(lineno),
                    format!("more than {MAX_CONNECTIONS} connections"),
                ));
            }
            connections.push(target);
        } else if let Some(tag) = line.strip_prefix(ROLE_PREFIX) {
            let parsed = RoomRole::from_str(tag)
                .map_err(|_| malformed(Some(lineno), format!("unknown room type {tag:?}")))?;
            if role.replace(parsed).is_some() {
                return Err(malformed(Some(lineno), "second room type".to_string()));
            }
        }
    }

    let name = name.ok_or_else(|| malformed(None, "missing room name".to_string()))?;
    let role = role.ok_or_else(|| malformed(None, "missing room type".to_string()))?;

    let mut room = Room::new(name)
        .map_err(|e| malformed(None, e.to_string()))?
        .with_role(role);
    for target in connections {
        room.add_connection(target)
            .map_err(|e| malformed(None, e.to_string()))?;
    }
    Ok(room)
}

/// Read and parse one room file.
///
/// A file that is not valid UTF-8 is malformed, not an I/O failure.
pub fn load_room(path: &Path) -> Result<Room, SaveError> {
    let bytes = fs::read(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| SaveError::Parse {
        path: path.to_path_buf(),
        line: None,
        reason: format!("not valid UTF-8: {e}"),
    })?;
    parse_room(&text, path)
}

/// Rebuild a graph from a directory written by [`write_graph`].
///
/// Every regular file in `dir` is treated as a room file; files are read in
/// name order. Graph invariants are not checked here, see
/// [`Graph::validate`].
pub fn load_graph(dir: &Path) -> Result<Graph, SaveError> {
    if !dir.is_dir() {
        return Err(SaveError::NotFound(dir.to_path_buf()));
    }
    let io_err = |source| SaveError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::with_capacity(NUM_ROOMS);
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_file() {
            files.push(entry.path());
        }
    }
    if files.len() != NUM_ROOMS {
        return Err(SaveError::RoomCount {
            dir: dir.to_path_buf(),
            found: files.len(),
        });
    }
    files.sort();

    let rooms = files
        .iter()
        .map(|path| load_room(path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Graph::try_from(rooms)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mansion_core::{GameRng, generate_graph};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mansion_save_{}_{}", std::process::id(), name));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_format_room() {
        let mut room = Room::new("Kitchen").unwrap().with_role(RoomRole::Start);
        for target in ["Library", "Hall", "Study"] {
            room.add_connection(target).unwrap();
        }
        assert_eq!(
            format_room(&room),
            "ROOM NAME: Kitchen\n\
             CONNECTION 1: Library\n\
             CONNECTION 2: Hall\n\
             CONNECTION 3: Study\n\
             ROOM TYPE: START_ROOM\n"
        );
        assert_eq!(parse_room(&format_room(&room), Path::new("Kitchen_room")).unwrap(), room);
    }

    #[test]
    fn test_parse_ignores_unknown_lines() {
        let text = "# written by hand\n\
                    ROOM NAME: Hall\n\
                    CONNECTION 1: Study\n\
                    FLOOR: marble\n\
                    CONNECTION 2: Lounge\n\
                    CONNECTION 3: Kitchen\n\
                    ROOM TYPE: MID_ROOM\n";
        let room = parse_room(text, Path::new("Hall_room")).unwrap();
        assert_eq!(room.name(), "Hall");
        assert_eq!(room.role(), RoomRole::Mid);
        assert_eq!(room.connections(), ["Study", "Lounge", "Kitchen"]);
    }

    #[test]
    fn test_parse_errors() {
        let path = Path::new("bad_room");
        let cases = [
            "CONNECTION 1: Hall\nROOM TYPE: MID_ROOM\n",
            "ROOM NAME: Study\nCONNECTION 1: Hall\n",
            "ROOM NAME: Study\nROOM TYPE: ATTIC_ROOM\n",
            "ROOM NAME: Study\nCONNECTION 2: Hall\nROOM TYPE: MID_ROOM\n",
            "ROOM NAME: Study\nCONNECTION 1 Hall\nROOM TYPE: MID_ROOM\n",
            "ROOM NAME: Study\nROOM NAME: Hall\nROOM TYPE: MID_ROOM\n",
            "ROOM NAME: Study\nROOM TYPE: MID_ROOM\nROOM TYPE: END_ROOM\n",
            "ROOM NAME: Study\nCONNECTION 1: Hall\nCONNECTION 2: Hall\nROOM TYPE: MID_ROOM\n",
            "ROOM NAME: Study\nCONNECTION 1: Study\nROOM TYPE: MID_ROOM\n",
            "ROOM NAME: Dining Room\nROOM TYPE: MID_ROOM\n",
        ];
        for text in cases {
            assert!(
                matches!(parse_room(text, path), Err(SaveError::Parse { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_parse_error_line_numbers() {
        let path = Path::new("Study_room");
        let text = "ROOM NAME: Study\nCONNECTION 1: Hall\nCONNECTION 3: Lounge\nROOM TYPE: MID_ROOM\n";
        assert!(matches!(
            parse_room(text, path),
            Err(SaveError::Parse { line: Some(3), .. })
        ));
        assert!(matches!(
            parse_room("ROOM TYPE: MID_ROOM\n", path),
            Err(SaveError::Parse { line: None, .. })
        ));
        let err = parse_room("ROOM NAME: Study\nROOM TYPE: ATTIC\n", path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_parse_too_many_connections() {
        let mut text = String::from("ROOM NAME: Hall\n");
        for (i, target) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            text.push_str(&format!("CONNECTION {}: {target}\n", i + 1));
        }
        text.push_str("ROOM TYPE: MID_ROOM\n");
        assert!(matches!(
            parse_room(&text, Path::new("Hall_room")),
            Err(SaveError::Parse { .. })
        ));
    }

    #[test]
    fn test_write_refuses_existing_graph() {
        let dir = scratch("existing");
        let graph = generate_graph(&mut GameRng::new(3)).unwrap();
        write_graph(&graph, &dir).unwrap();
        assert!(matches!(
            write_graph(&graph, &dir),
            Err(SaveError::DirectoryNotEmpty(_))
        ));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_room_does_not_stop_the_rest() {
        let dir = scratch("partial");
        fs::create_dir_all(&dir).unwrap();
        let graph = generate_graph(&mut GameRng::new(11)).unwrap();
        let blocked = graph.rooms()[2].name().to_string();
        fs::create_dir(dir.join(room_file_name(&blocked))).unwrap();

        match write_rooms(&graph, &dir) {
            Err(SaveError::PartialWrite { failed }) => assert_eq!(failed, [blocked.clone()]),
            other => panic!("expected a partial write, got {other:?}"),
        }
        for room in graph.rooms().iter().filter(|r| r.name() != blocked) {
            assert!(dir.join(room_file_name(room.name())).is_file());
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_dir() {
        assert!(matches!(
            load_graph(Path::new("/nonexistent/mansion.rooms.1")),
            Err(SaveError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_wrong_file_count() {
        let dir = scratch("count");
        let graph = generate_graph(&mut GameRng::new(8)).unwrap();
        write_graph(&graph, &dir).unwrap();
        fs::write(dir.join("notes.txt"), "ROOM NAME: Attic\n").unwrap();
        assert!(matches!(
            load_graph(&dir),
            Err(SaveError::RoomCount { found: 8, .. })
        ));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_malformed_room() {
        let dir = scratch("malformed");
        let graph = generate_graph(&mut GameRng::new(9)).unwrap();
        write_graph(&graph, &dir).unwrap();
        let victim = dir.join(room_file_name(graph.rooms()[0].name()));
        fs::write(&victim, "ROOM NAME: Broken\n").unwrap();
        assert!(matches!(load_graph(&dir), Err(SaveError::Parse { .. })));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_non_utf8_room() {
        let dir = scratch("non_utf8");
        let graph = generate_graph(&mut GameRng::new(10)).unwrap();
        write_graph(&graph, &dir).unwrap();
        let victim = dir.join(room_file_name(graph.rooms()[0].name()));
        fs::write(&victim, b"ROOM NAME: \xff\xfe\nROOM TYPE: MID_ROOM\n").unwrap();
        assert!(matches!(load_room(&victim), Err(SaveError::Parse { .. })));
        assert!(matches!(load_graph(&dir), Err(SaveError::Parse { .. })));
        fs::remove_dir_all(&dir).ok();
    }
}
