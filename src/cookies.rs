//! Scatters collectible cookies over the maze's path cells.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::grid::Pos;
use crate::maze::Maze;

/// Probability that the first pass drops a cookie on any given path cell.
pub const COOKIE_CHANCE: f64 = 0.35;

/// Budget for topping the set up to the minimum before giving up.
const TOPUP_ATTEMPTS: usize = 1_000;

/// The maze cannot satisfy the requested cookie count. This is a
/// configuration fault; presets are covered by tests so it never fires at
/// runtime.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScatterError {
    #[error("maze has {available} path cells but at least {wanted} cookies were requested")]
    TooFewPathCells { available: usize, wanted: usize },
    #[error("gave up topping up to {wanted} cookies after {attempts} samples")]
    AttemptsExhausted { wanted: usize, attempts: usize },
}

/// Picks cookie positions: one probabilistic sweep over the path cells, then
/// random top-up to `min`, then truncation to `max`. The result has no
/// duplicates and every position is a path cell.
pub fn scatter(
    maze: &Maze,
    min: usize,
    max: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Pos>, ScatterError> {
    let path: Vec<Pos> = maze.path_cells().collect();
    if path.len() < min {
        return Err(ScatterError::TooFewPathCells {
            available: path.len(),
            wanted: min,
        });
    }

    let mut chosen: Vec<Pos> = path
        .iter()
        .copied()
        .filter(|_| rng.gen_bool(COOKIE_CHANCE))
        .collect();

    let mut attempts = 0;
    while chosen.len() < min {
        if attempts >= TOPUP_ATTEMPTS {
            return Err(ScatterError::AttemptsExhausted {
                wanted: min,
                attempts,
            });
        }
        attempts += 1;
        let candidate = path[rng.gen_range(0..path.len())];
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }

    if chosen.len() > max {
        chosen.shuffle(rng);
        chosen.truncate(max);
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MAZE_LAYOUT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn count_stays_within_bounds() {
        let maze = Maze::parse(MAZE_LAYOUT);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cookies = scatter(&maze, 12, 24, &mut rng).expect("scatter");
            assert!(cookies.len() >= 12, "seed {seed}: {} cookies", cookies.len());
            assert!(cookies.len() <= 24, "seed {seed}: {} cookies", cookies.len());
        }
    }

    #[test]
    fn positions_are_unique_path_cells() {
        let maze = Maze::parse(MAZE_LAYOUT);
        let mut rng = StdRng::seed_from_u64(7);
        let cookies = scatter(&maze, 12, 24, &mut rng).expect("scatter");
        for (i, pos) in cookies.iter().enumerate() {
            assert!(maze.is_path(pos.x, pos.y), "{pos:?} is not a path cell");
            assert!(!cookies[..i].contains(pos), "{pos:?} appears twice");
        }
    }

    #[test]
    fn top_up_fills_a_tight_maze_completely() {
        // Three path cells, minimum three: the top-up loop must pick them all
        // no matter what the first sweep produced.
        let maze = Maze::parse(&["#####", "#...#", "#####"]);
        let mut rng = StdRng::seed_from_u64(1);
        let cookies = scatter(&maze, 3, 3, &mut rng).expect("scatter");
        assert_eq!(cookies.len(), 3);
    }

    #[test]
    fn impossible_minimum_is_a_config_fault() {
        let maze = Maze::parse(&["#####", "#...#", "#####"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            scatter(&maze, 4, 8, &mut rng),
            Err(ScatterError::TooFewPathCells {
                available: 3,
                wanted: 4
            })
        );
    }

    #[test]
    fn same_seed_same_cookies() {
        let maze = Maze::parse(MAZE_LAYOUT);
        let a = scatter(&maze, 12, 24, &mut StdRng::seed_from_u64(42)).expect("scatter");
        let b = scatter(&maze, 12, 24, &mut StdRng::seed_from_u64(42)).expect("scatter");
        assert_eq!(a, b);
    }
}
