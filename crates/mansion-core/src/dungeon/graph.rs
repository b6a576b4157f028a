//! The fixed-size room graph
//!
//! A graph always holds exactly [`NUM_ROOMS`] rooms with unique names.
//! Connections are stored per room; the generator adds them in mirrored
//! pairs through [`Graph::connect`].

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::room::{Room, RoomRole};
use crate::NUM_ROOMS;

/// Violations of the room and graph invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid room name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("room {room} already has the maximum number of connections")]
    ConnectionLimit { room: String },

    #[error("room {room} cannot connect to itself")]
    SelfConnection { room: String },

    #[error("room {from} is already connected to {to}")]
    DuplicateConnection { from: String, to: String },

    #[error("room name {name} appears more than once")]
    DuplicateRoom { name: String },

    #[error("expected {expected} rooms, found {found}")]
    RoomCount { expected: usize, found: usize },

    #[error("expected {expected} {role} rooms, found {found}")]
    RoleCount {
        role: RoomRole,
        expected: usize,
        found: usize,
    },

    #[error("room {room} has {count} connections")]
    DegreeOutOfRange { room: String, count: usize },

    #[error("room {from} connects to unknown room {to}")]
    UnknownConnection { from: String, to: String },

    #[error("connection {from} -> {to} has no matching {to} -> {from}")]
    Unmirrored { from: String, to: String },

    #[error("no room at index {index}")]
    NoSuchRoom { index: usize },
}

/// The adventure graph: exactly [`NUM_ROOMS`] rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    rooms: [Room; NUM_ROOMS],
}

impl Graph {
    /// Wrap a set of rooms, rejecting duplicate names.
    ///
    /// Roles and connections are not checked here; see [`Graph::validate`].
    pub fn new(rooms: [Room; NUM_ROOMS]) -> Result<Self, GraphError> {
        check_unique_names(&rooms)?;
        Ok(Self { rooms })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a room by exact name
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name() == name)
    }

    /// First room with the START role
    pub fn start(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.role() == RoomRole::Start)
    }

    /// First room with the END role
    pub fn end(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.role() == RoomRole::End)
    }

    pub(crate) fn room_mut(&mut self, index: usize) -> Result<&mut Room, GraphError> {
        self.rooms
            .get_mut(index)
            .ok_or(GraphError::NoSuchRoom { index })
    }

    /// Connect rooms `a` and `b` in both directions as a single step.
    ///
    /// Nothing is modified unless both directions can be added.
    pub fn connect(&mut self, a: usize, b: usize) -> Result<(), GraphError> {
        let a_name = self.room_mut(a)?.name().to_string();
        let b_name = self.room_mut(b)?.name().to_string();
        self.rooms[a].can_connect_to(&b_name)?;
        self.rooms[b].can_connect_to(&a_name)?;
        self.rooms[a].add_connection(&b_name)?;
        self.rooms[b].add_connection(&a_name)
    }

    /// True once every room has between MIN and MAX connections
    pub fn is_full(&self) -> bool {
        self.rooms.iter().all(Room::is_satisfied)
    }

    /// Number of undirected connections (each mirrored pair counts once)
    pub fn edge_count(&self) -> usize {
        self.rooms.iter().map(Room::connection_count).sum::<usize>() / 2
    }

    /// Check every graph invariant, reporting the first violation found.
    pub fn validate(&self) -> Result<(), GraphError> {
        check_unique_names(&self.rooms)?;

        for (role, expected) in [
            (RoomRole::Start, 1),
            (RoomRole::End, 1),
            (RoomRole::Mid, NUM_ROOMS - 2),
        ] {
            let found = self.rooms.iter().filter(|r| r.role() == role).count();
            if found != expected {
                return Err(GraphError::RoleCount {
                    role,
                    expected,
                    found,
                });
            }
        }

        for room in &self.rooms {
            if !room.is_satisfied() {
                return Err(GraphError::DegreeOutOfRange {
                    room: room.name().to_string(),
                    count: room.connection_count(),
                });
            }
            let mut targets = HashSet::with_capacity(room.connection_count());
            for target in room.connections() {
                if target == room.name() {
                    return Err(GraphError::SelfConnection {
                        room: room.name().to_string(),
                    });
                }
                if !targets.insert(target.as_str()) {
                    return Err(GraphError::DuplicateConnection {
                        from: room.name().to_string(),
                        to: target.clone(),
                    });
                }
                let Some(other) = self.room(target) else {
                    return Err(GraphError::UnknownConnection {
                        from: room.name().to_string(),
                        to: target.clone(),
                    });
                };
                if !other.is_connected_to(room.name()) {
                    return Err(GraphError::Unmirrored {
                        from: room.name().to_string(),
                        to: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_unique_names(rooms: &[Room]) -> Result<(), GraphError> {
    let mut seen = HashSet::with_capacity(rooms.len());
    for room in rooms {
        if !seen.insert(room.name()) {
            return Err(GraphError::DuplicateRoom {
                name: room.name().to_string(),
            });
        }
    }
    Ok(())
}

impl TryFrom<Vec<Room>> for Graph {
    type Error = GraphError;

    fn try_from(rooms: Vec<Room>) -> Result<Self, Self::Error> {
        let found = rooms.len();
        let rooms: [Room; NUM_ROOMS] = rooms.try_into().map_err(|_| GraphError::RoomCount {
            expected: NUM_ROOMS,
            found,
        })?;
        Self::new(rooms)
    }
}

/// Hand-built graph used across the crate's tests.
///
/// Kitchen (START) connects to Library, Hall and Study; Courtyard is the END
/// room and is reachable through Library.
#[cfg(test)]
pub(crate) fn scenario_graph() -> Graph {
    let names = [
        "Kitchen",
        "Library",
        "Hall",
        "Study",
        "Ballroom",
        "DiningRoom",
        "Courtyard",
    ];
    let rooms: Vec<Room> = names.iter().map(|n| Room::new(*n).unwrap()).collect();
    let mut graph = Graph::try_from(rooms).unwrap();
    graph.room_mut(0).unwrap().set_role(RoomRole::Start);
    graph.room_mut(6).unwrap().set_role(RoomRole::End);
    let edges = [
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 6),
        (1, 4),
        (2, 4),
        (2, 5),
        (3, 5),
        (3, 6),
        (4, 5),
        (5, 6),
    ];
    for (a, b) in edges {
        graph.connect(a, b).unwrap();
    }
    graph
}
