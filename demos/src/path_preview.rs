//! Path preview: find a path on a battle map and print it over the layout.
//!
//! ```text
//! path-preview --from 1,1,0 --to 8,1,1 --mode fly
//! path-preview --map base.txt --from 0,0,0 --to 5,5,0 --max-tu 40 --trace
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use battlescape_core::{MovementMode, Position};
use battlescape_map::BattleMap;
use battlescape_paths::{PathRequest, Pathfinder, PathfinderConfig};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

const SAMPLE_MAP: &str = "
    ##########
    #^.....,,#
    #.####.,,#
    #.#~~#...#
    #...~....#
    ##########

    ##########
    #^.......#
    #_####...#
    #_#__#...#
    #____#...#
    ##########
";

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    Walk,
    Fly,
    Missile,
}

impl From<Mode> for MovementMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Walk => MovementMode::Walk,
            Mode::Fly => MovementMode::Fly,
            Mode::Missile => MovementMode::Missile,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Preview a unit path on a battle map")]
struct Args {
    /// Map layout file. A built-in two-level map is used when omitted.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Start tile as x,y,z.
    #[arg(long, default_value = "1,4,0")]
    from: Position,
    /// Goal tile as x,y,z.
    #[arg(long, default_value = "7,3,1")]
    to: Position,
    #[arg(long, value_enum, default_value_t = Mode::Walk)]
    mode: Mode,
    /// Time unit budget.
    #[arg(long)]
    max_tu: Option<i32>,
    /// Give up after settling this many tiles.
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Log every node expansion.
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = if args.trace { "trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a path was found.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let map = match &args.map {
        Some(path) => BattleMap::parse(&std::fs::read_to_string(path)?)?,
        None => BattleMap::parse(SAMPLE_MAP)?,
    };

    let mut config = PathfinderConfig::default().with_debug_trace(args.trace);
    config.max_expansions = args.max_expansions;
    let mut pf = Pathfinder::with_config(map.bounds(), config);

    let mut req = PathRequest::new(args.from, args.to).mode(args.mode.into());
    if let Some(tu) = args.max_tu {
        req = req.max_tu(tu);
    }

    let Some(path) = pf.find_path(&map, &req)? else {
        log::info!("no path from {} to {}", args.from, args.to);
        println!("No path ({:?}).", pf.stats());
        return Ok(false);
    };

    let bounds = map.bounds();
    for z in bounds.min.z..bounds.max.z {
        println!("level {z}:");
        let text = map.render_level(z, |p| {
            if p == path.origin() {
                Some('A')
            } else if p == path.destination() {
                Some('B')
            } else if path.positions().contains(&p) {
                Some('*')
            } else {
                None
            }
        });
        println!("{text}");
    }

    let moves: Vec<String> = path.directions().iter().map(ToString::to_string).collect();
    println!("moves: {}", moves.join(" "));
    println!("cost:  {} TU over {} moves", path.total_tu(), path.len());
    let stats = pf.stats();
    println!(
        "search: {} expanded, {} pushed, {} discarded, {} touched",
        stats.expanded, stats.pushed, stats.discarded, stats.touched
    );
    Ok(true)
}
