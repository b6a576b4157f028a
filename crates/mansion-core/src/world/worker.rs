//! Background time worker
//!
//! One long-lived thread writes the current time to a file on request. The
//! player and the worker share a single mutex-guarded [`TimeState`] and a
//! condition variable:
//!
//! - the worker sleeps until `requested` or `ending` is set
//! - on a request it writes the file, clears `requested`, sets `ready`
//! - the requester sleeps until `ready`, reads the file back, clears `ready`
//!
//! The requester blocks for the whole round trip, so at most one request is
//! ever outstanding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use thiserror::Error;

use super::time::now_timestamp;

/// Time worker failures
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to start time worker: {0}")]
    Start(#[source] io::Error),

    #[error("time file {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    #[error("time worker lock poisoned")]
    Poisoned,

    #[error("time worker panicked")]
    Panicked,

    #[error("time worker is not running")]
    Stopped,
}

/// Flags shared by the requester and the worker
#[derive(Debug, Default)]
struct TimeState {
    requested: bool,
    ready: bool,
    ending: bool,
    /// Error text from the most recent write, if it failed
    failure: Option<String>,
    /// Timestamps written so far
    served: u64,
}

#[derive(Debug, Default)]
struct Monitor {
    state: Mutex<TimeState>,
    signal: Condvar,
}

/// Handle to the running time worker
#[derive(Debug)]
pub struct TimeKeeper {
    monitor: Arc<Monitor>,
    path: PathBuf,
    handle: Option<JoinHandle<()>>,
}

impl TimeKeeper {
    /// Start the worker thread. Timestamps are written to `path`.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self, WorkerError> {
        let path = path.into();
        let monitor = Arc::new(Monitor::default());

        let handle = {
            let monitor = Arc::clone(&monitor);
            let path = path.clone();
            thread::Builder::new()
                .name("time-worker".to_string())
                .spawn(move || worker_loop(&monitor, &path))
                .map_err(WorkerError::Start)?
        };
        log::debug!("time worker started, writing to {}", path.display());

        Ok(Self {
            monitor,
            path,
            handle: Some(handle),
        })
    }

    /// Ask the worker for the current time and wait for the answer.
    ///
    /// The worker writes the timestamp file; this reads it back once the
    /// worker has flagged it ready.
    pub fn request_time(&self) -> Result<String, WorkerError> {
        if self.handle.as_ref().is_none_or(JoinHandle::is_finished) {
            return Err(WorkerError::Stopped);
        }

        let mut state = self
            .monitor
            .state
            .lock()
            .map_err(|_| WorkerError::Poisoned)?;
        state.requested = true;
        self.monitor.signal.notify_all();

        let mut state = self
            .monitor
            .signal
            .wait_while(state, |s| !s.ready)
            .map_err(|_| WorkerError::Poisoned)?;

        let result = match state.failure.take() {
            Some(reason) => Err(WorkerError::Io {
                path: self.path.clone(),
                reason,
            }),
            None => read_timestamp(&self.path),
        };
        state.ready = false;
        result
    }

    /// Number of timestamps the worker has written
    pub fn served(&self) -> u64 {
        match self.monitor.state.lock() {
            Ok(state) => state.served,
            Err(poisoned) => poisoned.into_inner().served,
        }
    }

    /// Tell the worker to exit and wait for it.
    pub fn shutdown(mut self) -> Result<(), WorkerError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), WorkerError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match self.monitor.state.lock() {
            Ok(mut state) => state.ending = true,
            Err(poisoned) => poisoned.into_inner().ending = true,
        }
        self.monitor.signal.notify_all();
        handle.join().map_err(|_| WorkerError::Panicked)?;
        log::debug!("time worker stopped after {} requests", self.served());
        Ok(())
    }
}

impl Drop for TimeKeeper {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::warn!("time worker shutdown: {err}");
        }
    }
}

fn worker_loop(monitor: &Monitor, path: &Path) {
    let Ok(mut state) = monitor.state.lock() else {
        return;
    };
    loop {
        state = match monitor
            .signal
            .wait_while(state, |s| !s.requested && !s.ending)
        {
            Ok(state) => state,
            Err(_) => return,
        };
        if state.ending {
            break;
        }

        let stamp = now_timestamp();
        state.failure = write_timestamp(path, &stamp).err().map(|e| e.to_string());
        state.served += 1;
        log::debug!("time worker wrote {stamp:?}");

        state.requested = false;
        state.ready = true;
        monitor.signal.notify_all();
    }
}

fn write_timestamp(path: &Path, stamp: &str) -> io::Result<()> {
    fs::write(path, format!("{stamp}\n"))
}

fn read_timestamp(path: &Path) -> Result<String, WorkerError> {
    let contents = fs::read_to_string(path).map_err(|e| WorkerError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(contents.lines().next().unwrap_or_default().to_string())
}
