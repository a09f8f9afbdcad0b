//! Backrooms level generator
//!
//! Generates a level, prints it as ASCII or JSON, and optionally overlays
//! an A* route between two cells.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info};

use br_core::generation::perfect_maze::{convert_to_backrooms, generate_perfect_maze};
use br_core::generation::{
    BackroomsConversion, Generator, GeneratorConfig, find_safe_spawn_position,
};
use br_core::path::path_length;
use br_core::{Coord, Grid, LevelRng, ROUTE_SYM, find_path};

/// Backrooms level generator
#[derive(Parser, Debug)]
#[command(name = "backrooms")]
#[command(author, version, about = "Generate maze and backrooms levels", long_about = None)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON generator configuration (defaults to the backrooms preset)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Generate a single perfect maze of COLSxROWS and convert it instead
    #[arg(short = 'm', long = "maze", value_parser = parse_size)]
    maze: Option<(usize, usize)>,

    /// Dead-end pruning passes for --maze
    #[arg(long = "dead-end-passes", default_value_t = br_core::DEFAULT_DEAD_END_PASSES)]
    dead_end_passes: usize,

    /// Overlay the shortest route between two cells, as x0,y0:x1,y1
    #[arg(short = 'p', long = "path", value_parser = parse_route)]
    route: Option<(Coord, Coord)>,

    /// Print the grid as JSON
    #[arg(long = "json")]
    json: bool,

    /// Print a safe spawn position in world coordinates
    #[arg(long = "spawn")]
    spawn: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let mut rng = match args.seed {
        Some(seed) => LevelRng::new(seed),
        None => LevelRng::from_entropy(),
    };
    eprintln!("seed: {}", rng.seed());

    let grid = match args.maze {
        Some((cols, rows)) => build_maze(cols, rows, args.dead_end_passes, &mut rng)?,
        None => build_backrooms(args.config.as_ref(), &mut rng)?,
    };
    info!(
        "{}x{} level, {} open cells ({:.1}%)",
        grid.width(),
        grid.height(),
        grid.path_count(),
        grid.coverage() * 100.0
    );

    let route = match args.route {
        Some((start, goal)) => {
            let path = find_path(start, goal, &grid)?;
            if path.is_empty() {
                eprintln!("no route from {} to {}", start, goal);
            } else {
                eprintln!("route length: {}", path_length(&path));
            }
            path
        }
        None => Vec::new(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        println!("{}", render(&grid, &route));
    }

    if args.spawn {
        let pos = find_safe_spawn_position(&grid, &mut rng);
        println!("spawn: {:.2}, {:.2}", pos.x, pos.y);
    }

    Ok(())
}

fn build_backrooms(config_path: Option<&PathBuf>, rng: &mut LevelRng) -> Result<Grid> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not open file '{}'", path.display()))?;
            GeneratorConfig::from_json(&text)
                .with_context(|| format!("Invalid configuration in '{}'", path.display()))?
        }
        None => GeneratorConfig::backrooms(),
    };
    let generator = Generator::new(config)?;
    Ok(generator.generate(rng))
}

fn build_maze(cols: usize, rows: usize, passes: usize, rng: &mut LevelRng) -> Result<Grid> {
    let mut grid = generate_perfect_maze(cols, rows, 1.0, rng)?;
    let conversion = BackroomsConversion {
        dead_end_passes: passes,
        ..BackroomsConversion::default()
    };
    let report = convert_to_backrooms(&mut grid, &conversion, rng)?;
    info!(
        "{} rooms carved, {} dead-end cells removed in {} passes",
        report.rooms.len(),
        report.dead_ends.removed,
        report.dead_ends.passes
    );
    Ok(grid)
}

/// ASCII map with the route drawn over it
fn render(grid: &Grid, route: &[Coord]) -> String {
    let mut rows: Vec<Vec<char>> = grid
        .to_string()
        .lines()
        .map(|line| line.chars().collect())
        .collect();
    for c in route {
        if let Some(ch) = rows.get_mut(c.y).and_then(|row| row.get_mut(c.x)) {
            *ch = ROUTE_SYM;
        }
    }
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse `COLSxROWS`
fn parse_size(s: &str) -> Result<(usize, usize)> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("expected COLSxROWS, got '{}'", s);
    };
    let w = w.trim().parse().with_context(|| format!("bad column count '{}'", w))?;
    let h = h.trim().parse().with_context(|| format!("bad row count '{}'", h))?;
    Ok((w, h))
}

/// Parse `x,y`
fn parse_coord(s: &str) -> Result<Coord> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected x,y, got '{}'", s);
    };
    let x = x.trim().parse().with_context(|| format!("bad x '{}'", x))?;
    let y = y.trim().parse().with_context(|| format!("bad y '{}'", y))?;
    Ok(Coord::new(x, y))
}

/// Parse `x0,y0:x1,y1`
fn parse_route(s: &str) -> Result<(Coord, Coord)> {
    let Some((from, to)) = s.split_once(':') else {
        bail!("expected x0,y0:x1,y1, got '{}'", s);
    };
    Ok((parse_coord(from)?, parse_coord(to)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("31x21").unwrap(), (31, 21));
        assert_eq!(parse_size("8X4").unwrap(), (8, 4));
        assert!(parse_size("31").is_err());
        assert!(parse_size("ax3").is_err());
    }

    #[test]
    fn test_parse_route() {
        let (a, b) = parse_route("1,2:3, 4").unwrap();
        assert_eq!(a, Coord::new(1, 2));
        assert_eq!(b, Coord::new(3, 4));
        assert!(parse_route("1,2").is_err());
        assert!(parse_route("1:2").is_err());
    }

    #[test]
    fn test_render_overlays_route() {
        let grid = Grid::from_ascii("...\n#.#").unwrap();
        let route = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 1)];
        assert_eq!(render(&grid, &route), "**.\n#*#");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "backrooms", "-s", "7", "--maze", "11x9", "-p", "1,1:9,7",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.maze, Some((11, 9)));
        assert_eq!(args.route, Some((Coord::new(1, 1), Coord::new(9, 7))));
        assert_eq!(args.dead_end_passes, br_core::DEFAULT_DEAD_END_PASSES);
    }
}
