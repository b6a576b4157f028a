//! adventure: play the most recently generated mansion
//!
//! Reads room names (or `time`) from standard input until the end room is
//! reached.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use thiserror::Error;

use mansion_core::{
    GameOptions, GraphError, OptionsError, SessionError, TimeKeeper, WorkerError, run_session,
};
use mansion_save::{SaveError, find_latest, load_graph};

/// Explore the mansion from the start room to the end room
#[derive(Parser, Debug)]
#[command(name = "adventure")]
#[command(author, version, about = "Find your way through the mansion", long_about = None)]
struct Args {
    /// Directory searched for generated room directories
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Play this room directory instead of the most recent one
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<PathBuf>,

    /// File the time worker writes to
    #[arg(short = 't', long = "time-file")]
    time_file: Option<PathBuf>,

    /// JSON options file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum PlayError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Worker(#[from] WorkerError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("adventure: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(args: Args) -> Result<(), PlayError> {
    let mut options = match &args.config {
        Some(path) => GameOptions::load_from_file(path)?,
        None => GameOptions::default(),
    };
    if let Some(dir) = args.dir {
        options.base_dir = dir;
    }
    if let Some(time_file) = args.time_file {
        options.time_file = time_file;
    }

    let dir = match args.rooms {
        Some(dir) => dir,
        None => find_latest(&options.base_dir, &options.dir_prefix)?,
    };
    log::info!("loading rooms from {}", dir.display());
    let graph = load_graph(&dir)?;
    graph.validate()?;

    let mut keeper = TimeKeeper::spawn(&options.time_file)?;
    let result = run_session(
        &graph,
        &options,
        io::stdin().lock(),
        io::stdout().lock(),
        &mut keeper,
    );
    let stopped = keeper.shutdown();

    let summary = result?;
    stopped?;
    log::info!("finished in {} steps", summary.steps);
    Ok(())
}
