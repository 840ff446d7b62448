//! Autonomous ghosts that wander the maze without chasing anyone.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Dir, Pos};
use crate::maze::Maze;

/// Display identity of a ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostColor {
    Red,
    Pink,
    Cyan,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub color: GhostColor,
    pub pos: Pos,
    pub facing: Dir,
}

impl Ghost {
    pub fn new(color: GhostColor, pos: Pos, facing: Dir) -> Self {
        Self { color, pos, facing }
    }

    /// Advances one step. Keeps going straight while the way is clear,
    /// otherwise picks uniformly among valid directions excluding the exact
    /// reverse. The reverse is only taken in a dead end; a fully boxed-in
    /// ghost stays put with unchanged facing.
    pub fn wander(&mut self, maze: &Maze, rng: &mut impl Rng) {
        if let Some(next) = maze.neighbor(self.pos, self.facing) {
            self.pos = next;
            return;
        }

        let reverse = self.facing.reverse();
        let options: Vec<(Dir, Pos)> = Dir::ALL
            .into_iter()
            .filter(|dir| *dir != reverse)
            .filter_map(|dir| maze.neighbor(self.pos, dir).map(|next| (dir, next)))
            .collect();

        if let Some(&(dir, next)) = options.choose(rng) {
            self.facing = dir;
            self.pos = next;
        } else if let Some(next) = maze.neighbor(self.pos, reverse) {
            self.facing = reverse;
            self.pos = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn keeps_going_straight_in_a_corridor() {
        let maze = Maze::parse(&["#####", "#...#", "#####"]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ghost = Ghost::new(GhostColor::Red, Pos::new(1, 1), Dir::Right);
        ghost.wander(&maze, &mut rng);
        assert_eq!(ghost.pos, Pos::new(2, 1));
        assert_eq!(ghost.facing, Dir::Right);
    }

    #[test]
    fn never_reverses_when_another_exit_exists() {
        // L-shaped bend: arriving rightward at the corner, the only legal
        // non-reverse option is down. Across many seeds the ghost must never
        // pick the reverse.
        let maze = Maze::parse(&["#####", "#...#", "###.#", "#####"]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ghost = Ghost::new(GhostColor::Pink, Pos::new(3, 1), Dir::Right);
            ghost.wander(&maze, &mut rng);
            assert_eq!(ghost.pos, Pos::new(3, 2), "seed {seed} reversed");
            assert_eq!(ghost.facing, Dir::Down);
        }
    }

    #[test]
    fn reverses_only_in_a_dead_end() {
        let maze = Maze::parse(&["#####", "#...#", "#####"]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ghost = Ghost::new(GhostColor::Cyan, Pos::new(3, 1), Dir::Right);
        ghost.wander(&maze, &mut rng);
        assert_eq!(ghost.pos, Pos::new(2, 1));
        assert_eq!(ghost.facing, Dir::Left);
    }

    #[test]
    fn boxed_in_ghost_stays_put() {
        let maze = Maze::parse(&["###", "#.#", "###"]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ghost = Ghost::new(GhostColor::Red, Pos::new(1, 1), Dir::Up);
        ghost.wander(&maze, &mut rng);
        assert_eq!(ghost.pos, Pos::new(1, 1));
        assert_eq!(ghost.facing, Dir::Up);
    }

    #[test]
    fn junction_choice_is_uniform_over_non_reverse_exits() {
        // T-junction reached moving up: straight ahead is a wall, exits are
        // left and right. Both must occur, reverse (down) never.
        let maze = Maze::parse(&["#####", "#...#", "##.##", "#####"]);
        let mut saw_left = false;
        let mut saw_right = false;
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ghost = Ghost::new(GhostColor::Red, Pos::new(2, 1), Dir::Up);
            ghost.wander(&maze, &mut rng);
            match ghost.pos {
                Pos { x: 1, y: 1 } => saw_left = true,
                Pos { x: 3, y: 1 } => saw_right = true,
                other => panic!("seed {seed} moved to {other:?}"),
            }
        }
        assert!(saw_left && saw_right);
    }
}
