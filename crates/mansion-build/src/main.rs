//! buildrooms: generate a random mansion and write its room files
//!
//! Writes seven room files into `<base>/<prefix><pid>`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use thiserror::Error;

use mansion_core::{GameOptions, GameRng, GenerationError, OptionsError, generate_graph};
use mansion_save::{SaveError, graph_dir_name, write_graph};

/// Generate a random room graph for the mansion adventure
#[derive(Parser, Debug)]
#[command(name = "buildrooms")]
#[command(author, version, about = "Build a random mansion for the adventure", long_about = None)]
struct Args {
    /// Seed for the room generator (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Directory in which the room directory is created
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// JSON options file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Also print the generated graph as JSON
    #[arg(long = "print")]
    print: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum BuildError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("could not encode graph: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("buildrooms: {err}");
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

fn run(args: Args) -> Result<(), BuildError> {
    let mut options = match &args.config {
        Some(path) => GameOptions::load_from_file(path)?,
        None => GameOptions::default(),
    };
    if let Some(dir) = args.dir {
        options.base_dir = dir;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }

    let mut rng = options.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    log::info!("generating mansion with seed {}", rng.seed());

    let graph = generate_graph(&mut rng)?;
    for room in graph.rooms() {
        log::info!(
            "{} ({}): {}",
            room.name(),
            room.role(),
            room.connections().join(", ")
        );
    }

    let dir = options
        .base_dir
        .join(graph_dir_name(&options.dir_prefix, std::process::id()));
    write_graph(&graph, &dir)?;
    log::info!("wrote {} rooms to {}", graph.rooms().len(), dir.display());

    if args.print {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    }
    Ok(())
}
