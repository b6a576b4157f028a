//! mansion-core: room graph model and game logic for the mansion text adventure
//!
//! Contains the fixed-size room graph, the random graph generator, the
//! navigation session loop and the background time worker. Reading and
//! writing room files lives in `mansion-save`.

pub mod dungeon;
pub mod world;

mod consts;
mod gameloop;
mod options;
mod rng;

pub use consts::*;
pub use dungeon::{GenerationError, Graph, GraphError, Room, RoomRole, generate_graph};
pub use gameloop::{Navigator, SessionError, SessionSummary, Step, TimeService, run_session};
pub use options::{GameOptions, OptionsError};
pub use rng::GameRng;
pub use world::{TimeKeeper, WorkerError, format_timestamp};
