//! World services
//!
//! Wall-clock formatting and the background time worker.

pub mod time;
mod worker;

pub use time::{format_timestamp, now_timestamp, parse_timestamp};
pub use worker::{TimeKeeper, WorkerError};
