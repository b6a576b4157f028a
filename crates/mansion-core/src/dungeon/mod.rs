//! Room graph
//!
//! Contains the room and graph structures and the random graph generator.

mod generation;
mod graph;
mod room;

pub use generation::{GenerationError, generate_graph};
pub use graph::{Graph, GraphError};
#[cfg(test)]
pub(crate) use graph::scenario_graph;
pub use room::{Room, RoomRole};
