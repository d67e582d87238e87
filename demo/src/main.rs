//! `solve`: run a grid search in the terminal.
//!
//! ```text
//! solve [--rows N] [--cols N] [--algo astar|dijkstra] [--maze] [--seed N] [--step]
//! ```
//!
//! Without `--maze` the grid is empty apart from the two endpoints. With
//! `--step` the grid is printed after every expansion.

use log::info;
use pathviz_core::{Grid, GridConfig};
use pathviz_maze::MazeGen;
use pathviz_search::{Algorithm, SearchEngine, StepResult};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Default)]
struct Options {
    config: GridConfig,
    algorithm: Algorithm,
    maze: bool,
    seed: Option<u64>,
    step: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut opts = Self::default();
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "--rows" => opts.config.rows = number(&value()?)?,
                "--cols" => opts.config.cols = number(&value()?)?,
                "--algo" => {
                    opts.algorithm = value()?.parse::<Algorithm>().map_err(|e| e.to_string())?
                }
                "--seed" => {
                    opts.seed = Some(number(&value()?)?);
                    opts.maze = true;
                }
                "--maze" => opts.maze = true,
                "--step" => opts.step = true,
                other => return Err(format!("unknown argument {other}")),
            }
        }
        opts.config.validate().map_err(|e| e.to_string())?;
        Ok(opts)
    }
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("invalid number {s}"))
}

fn build_grid(opts: &Options) -> Result<Grid, Box<dyn std::error::Error>> {
    if !opts.maze {
        return Ok(opts.config.empty_grid()?);
    }
    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    Ok(MazeGen::new(rng).generate_for(&opts.config)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Options::parse(std::env::args().skip(1))?;
    let grid = build_grid(&opts)?;
    let start = grid.robot().ok_or("grid has no start cell")?;
    let target = grid.target().ok_or("grid has no target cell")?;
    info!(
        "{} search on a {}x{} grid from {} to {}",
        opts.algorithm,
        grid.width(),
        grid.height(),
        start,
        target
    );

    let mut engine = SearchEngine::new(grid);
    engine.reset(start, target, opts.algorithm)?;

    let result = if opts.step {
        loop {
            let r = engine.advance()?;
            println!("{}\n", engine.grid());
            if r != StepResult::Continue {
                break r;
            }
        }
    } else {
        engine.run_to_end()?
    };

    match result {
        StepResult::Found => {
            let route = engine.plot_route()?;
            println!("{}", engine.grid());
            println!("{}", engine.summary(&route));
        }
        _ => {
            println!("{}", engine.grid());
            println!("No solution. Nodes expanded: {}", engine.expanded());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, String> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_are_parsed() {
        let opts = parse(&[
            "--rows", "9", "--cols", "11", "--algo", "dijkstra", "--seed", "4",
        ])
        .unwrap();
        assert_eq!(opts.config, GridConfig::new(9, 11));
        assert_eq!(opts.algorithm, Algorithm::Dijkstra);
        assert_eq!(opts.seed, Some(4));
        assert!(opts.maze);
        assert!(!opts.step);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse(&["--algo", "bfs"]).is_err());
        assert!(parse(&["--rows"]).is_err());
        assert!(parse(&["--rows", "x"]).is_err());
        assert!(parse(&["--wat"]).is_err());
    }

    #[test]
    fn tiny_grids_are_rejected() {
        assert!(parse(&["--rows", "3", "--cols", "3"]).is_err());
        assert!(parse(&["--rows", "5", "--cols", "5"]).is_ok());
    }

    #[test]
    fn smallest_maze_has_both_endpoints() {
        let opts = parse(&["--rows", "5", "--cols", "5", "--seed", "2"]).unwrap();
        let grid = build_grid(&opts).unwrap();
        assert!(grid.robot().is_some());
        assert!(grid.target().is_some());
    }
}
