//! Navigation session loop
//!
//! A session starts in the START room and ends on arrival at the END room.
//! Each input line is either the name of one of the current room's
//! connections, the time command, or something the game does not
//! understand.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::dungeon::{Graph, Room, RoomRole};
use crate::options::GameOptions;
use crate::world::{TimeKeeper, WorkerError};

const NOT_UNDERSTOOD: &str = "HUH? I DON'T UNDERSTAND THAT ROOM. TRY AGAIN.";

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input is neither a connection of the current room nor the time
    /// command. [`run_session`] answers it and re-prompts.
    #[error("not a connection or command: {0:?}")]
    InvalidInput(String),

    #[error("input ended before reaching the end room")]
    InputClosed,

    #[error("graph has no {0} room")]
    MissingRole(RoomRole),

    #[error("connection names unknown room {0}")]
    UnknownRoom(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// Source of the formatted current time for the time command
pub trait TimeService {
    fn current_time(&mut self) -> Result<String, WorkerError>;
}

impl TimeService for TimeKeeper {
    fn current_time(&mut self) -> Result<String, WorkerError> {
        self.request_time()
    }
}

/// Result of handling one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Moved to a room that is not the end
    Moved { to: String },
    /// Moved into the END room
    Arrived { to: String },
    /// The player asked for the time
    ShowTime,
}

/// Tracks the player's position and the path taken so far
#[derive(Debug, Clone)]
pub struct Navigator<'g> {
    graph: &'g Graph,
    current: &'g Room,
    path: Vec<String>,
}

impl<'g> Navigator<'g> {
    /// Place the player in the START room
    pub fn new(graph: &'g Graph) -> Result<Self, SessionError> {
        let current = graph
            .start()
            .ok_or(SessionError::MissingRole(RoomRole::Start))?;
        Ok(Self {
            graph,
            current,
            path: Vec::new(),
        })
    }

    pub fn current(&self) -> &'g Room {
        self.current
    }

    /// Successful moves so far
    pub fn steps(&self) -> usize {
        self.path.len()
    }

    /// Rooms entered, in order
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.current.role() == RoomRole::End
    }

    /// Handle one already-trimmed input line.
    ///
    /// Connection names must match exactly; the time command is only
    /// recognized when no connection has the same name.
    pub fn step(&mut self, input: &str, time_command: &str) -> Result<Step, SessionError> {
        if self.current.is_connected_to(input) {
            let next = self
                .graph
                .room(input)
                .ok_or_else(|| SessionError::UnknownRoom(input.to_string()))?;
            self.current = next;
            self.path.push(next.name().to_string());
            let to = next.name().to_string();
            return Ok(if self.is_finished() {
                Step::Arrived { to }
            } else {
                Step::Moved { to }
            });
        }
        if input == time_command {
            return Ok(Step::ShowTime);
        }
        Err(SessionError::InvalidInput(input.to_string()))
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub steps: usize,
    pub path: Vec<String>,
}

/// Run a full session, reading commands from `input` and writing the game
/// text to `out`.
pub fn run_session<R, W, T>(
    graph: &Graph,
    options: &GameOptions,
    mut input: R,
    mut out: W,
    time: &mut T,
) -> Result<SessionSummary, SessionError>
where
    R: BufRead,
    W: Write,
    T: TimeService + ?Sized,
{
    let mut nav = Navigator::new(graph)?;
    let mut line = String::new();

    while !nav.is_finished() {
        let room = nav.current();
        writeln!(out, "CURRENT LOCATION: {}", room.name())?;
        writeln!(out, "POSSIBLE CONNECTIONS: {}", room.connection_list())?;
        write!(out, "WHERE TO? > ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }

        match nav.step(options.trim_input(&line), &options.time_command) {
            Ok(Step::Moved { to }) => log::debug!("moved to {to}"),
            Ok(Step::Arrived { to }) => log::info!("reached end room {to}"),
            Ok(Step::ShowTime) => match time.current_time() {
                Ok(stamp) => writeln!(out, "{stamp}")?,
                Err(WorkerError::Io { path, reason }) => {
                    log::warn!("time request failed: {}: {reason}", path.display());
                    writeln!(out, "THE CLOCK IS NOT WORKING RIGHT NOW.")?;
                }
                Err(err) => return Err(err.into()),
            },
            Err(SessionError::InvalidInput(text)) => {
                log::debug!("not understood: {text:?}");
                writeln!(out, "{NOT_UNDERSTOOD}")?;
            }
            Err(err) => return Err(err),
        }
    }

    writeln!(out, "YOU HAVE FOUND THE END ROOM. CONGRATULATIONS!")?;
    writeln!(
        out,
        "YOU TOOK {} STEPS. YOUR PATH TO VICTORY WAS:",
        nav.steps()
    )?;
    for room in nav.path() {
        writeln!(out, "{room}")?;
    }
    out.flush()?;

    Ok(SessionSummary {
        steps: nav.steps(),
        path: nav.path().to_vec(),
    })
}
