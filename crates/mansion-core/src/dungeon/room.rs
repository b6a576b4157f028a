//! Room types and structures
//!
//! A room is a named node with a role tag and an ordered list of outgoing
//! connections, capped at [`MAX_CONNECTIONS`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::graph::GraphError;
use crate::{MAX_CONNECTIONS, MAX_ROOM_NAME_LEN, MIN_CONNECTIONS};

/// Role a room plays in the adventure.
///
/// The string forms are the tags written to room files.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum RoomRole {
    /// Where the player begins
    #[strum(serialize = "START_ROOM")]
    Start,
    /// Any room that is neither start nor end
    #[default]
    #[strum(serialize = "MID_ROOM")]
    Mid,
    /// Reaching this room ends the session
    #[strum(serialize = "END_ROOM")]
    End,
}

/// A single room of the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    name: String,
    connections: Vec<String>,
    role: RoomRole,
}

impl Room {
    /// Create a MID room with no connections.
    ///
    /// Fails if the name is empty, longer than [`MAX_ROOM_NAME_LEN`] bytes, or
    /// contains whitespace, `,`, `.` or `:` (those would break the prompt
    /// tokenizer or the room file layout).
    pub fn new(name: impl Into<String>) -> Result<Self, GraphError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            connections: Vec::with_capacity(MAX_CONNECTIONS),
            role: RoomRole::Mid,
        })
    }

    /// Builder-style role assignment
    pub fn with_role(mut self, role: RoomRole) -> Self {
        self.role = role;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> RoomRole {
        self.role
    }

    pub fn set_role(&mut self, role: RoomRole) {
        self.role = role;
    }

    /// Outgoing connections in the order they were added
    pub fn connections(&self) -> &[String] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// True while another connection can be added
    pub fn has_capacity(&self) -> bool {
        self.connections.len() < MAX_CONNECTIONS
    }

    /// True once the room has between MIN and MAX connections
    pub fn is_satisfied(&self) -> bool {
        (MIN_CONNECTIONS..=MAX_CONNECTIONS).contains(&self.connections.len())
    }

    /// Check for an outgoing connection to `other`
    pub fn is_connected_to(&self, other: &str) -> bool {
        self.connections.iter().any(|c| c == other)
    }

    /// Append a one-way connection to `target`.
    ///
    /// Rejects self-connections, duplicates and connections past capacity.
    pub fn add_connection(&mut self, target: &str) -> Result<(), GraphError> {
        self.can_connect_to(target)?;
        self.connections.push(target.to_string());
        Ok(())
    }

    /// Check whether [`Room::add_connection`] would accept `target`
    pub fn can_connect_to(&self, target: &str) -> Result<(), GraphError> {
        if target == self.name {
            return Err(GraphError::SelfConnection {
                room: self.name.clone(),
            });
        }
        if self.is_connected_to(target) {
            return Err(GraphError::DuplicateConnection {
                from: self.name.clone(),
                to: target.to_string(),
            });
        }
        if !self.has_capacity() {
            return Err(GraphError::ConnectionLimit {
                room: self.name.clone(),
            });
        }
        validate_name(target)
    }

    /// Human-readable connection list, e.g. `"Hall, Study, Lounge."`
    pub fn connection_list(&self) -> String {
        let mut list = self.connections.join(", ");
        if !list.is_empty() {
            list.push('.');
        }
        list
    }
}

fn validate_name(name: &str) -> Result<(), GraphError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.len() > MAX_ROOM_NAME_LEN {
        "name is too long"
    } else if name
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, ',' | '.' | ':'))
    {
        "name contains a separator character"
    } else {
        return Ok(());
    };
    Err(GraphError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
