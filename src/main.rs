use docopt::Docopt;
use hypermaze::{
    generators::{self, Maze},
    matrix,
    parameters::MazeParameters,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io::{self, prelude::*},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Hypermaze

Generate a random maze over an N dimensional grid. Rooms sit at the cells whose coordinates are all
odd; every room is reachable from every other, along exactly one path unless extra walls are broken.

Usage:
    hypermaze_driver -h | --help
    hypermaze_driver [--shape=<s>] [--exits=<n>] [--internal-breaks=<n>] [--seed=<n>] [--matrix] [--text-out=<path>]

Options:
    -h --help                 Show this screen.
    --shape=<s>               Extent of each axis separated by ',' or 'x', e.g. 11,11 or 9x9x9 [default: 11,11].
    --exits=<n>               Most openings to carve in the outer boundary [default: 2].
    --internal-breaks=<n>     Most extra walls to break after the maze is connected, each adding a loop [default: 0].
    --seed=<n>                Seed the random generator for a reproducible maze.
    --matrix                  Print the maze as a dense matrix, 1 for a wall and 0 for a way, instead of as text.
    --text-out=<path>         Output file path for the textual rendering of the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_shape: String,
    flag_exits: String,
    flag_internal_breaks: String,
    flag_seed: Option<u64>,
    flag_matrix: bool,
    flag_text_out: String,
}

mod errors {
    #![allow(deprecated)]

    use error_chain::*;
    error_chain! {
        links {
            Maze(hypermaze::errors::Error, hypermaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        Err(e) if !e.fatal() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let parameters = MazeParameters::parse(&args.flag_shape, &args.flag_exits, &args.flag_internal_breaks)?;
    let rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    let maze = generators::generate(&parameters, rng)?;
    let counts = maze.counts();
    info!(shape = ?parameters.shape,
          ways = maze.grid().ways_count(),
          exits = counts.exits,
          passages = counts.passages,
          braids = counts.braids,
          "generated maze");

    if args.flag_matrix {
        println!("{}", matrix::to_array::<u8, _>(&maze)?);
    } else if args.flag_text_out.is_empty() {
        print!("{}", maze);
    } else {
        write_maze_to_file(&maze, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn write_maze_to_file(maze: &Maze, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    write!(f, "{}", maze)?;
    Ok(())
}
