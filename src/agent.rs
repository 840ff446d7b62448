//! The player-controlled cookie monster.

use crate::grid::{Dir, Pos};
use crate::maze::Maze;

#[derive(Clone, Debug)]
pub struct Agent {
    pub pos: Pos,
    pub facing: Dir,
}

impl Agent {
    pub fn new(pos: Pos, facing: Dir) -> Self {
        Self { pos, facing }
    }

    /// Applies one directional command. A blocked move is a silent no-op;
    /// an accepted move updates position and facing together. Returns
    /// whether the agent moved.
    pub fn try_move(&mut self, maze: &Maze, dir: Dir) -> bool {
        match maze.neighbor(self.pos, dir) {
            Some(next) => {
                self.pos = next;
                self.facing = dir;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_move_updates_position_and_facing() {
        let maze = Maze::parse(&["#####", "#...#", "#####"]);
        let mut agent = Agent::new(Pos::new(1, 1), Dir::Left);
        assert!(agent.try_move(&maze, Dir::Right));
        assert_eq!(agent.pos, Pos::new(2, 1));
        assert_eq!(agent.facing, Dir::Right);
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let maze = Maze::parse(&["#####", "#...#", "#####"]);
        let mut agent = Agent::new(Pos::new(1, 1), Dir::Right);
        assert!(!agent.try_move(&maze, Dir::Up));
        assert!(!agent.try_move(&maze, Dir::Left));
        assert_eq!(agent.pos, Pos::new(1, 1));
        assert_eq!(agent.facing, Dir::Right);
    }

    #[test]
    fn agent_stays_on_path_cells_for_any_command_sequence() {
        let maze = Maze::parse(crate::maze::MAZE_LAYOUT);
        let mut agent = Agent::new(Pos::new(9, 7), Dir::Right);
        let commands = [
            Dir::Up,
            Dir::Up,
            Dir::Left,
            Dir::Down,
            Dir::Down,
            Dir::Down,
            Dir::Right,
            Dir::Right,
            Dir::Up,
            Dir::Left,
            Dir::Left,
            Dir::Left,
            Dir::Down,
            Dir::Right,
        ];
        for dir in commands {
            let _ = agent.try_move(&maze, dir);
            assert!(maze.is_path(agent.pos.x, agent.pos.y), "left the path at {:?}", agent.pos);
        }
    }
}
