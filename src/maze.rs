//! The immutable wall/path grid every entity moves against.

use crate::grid::{Dir, Pos};

/// Kind of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
}

/// Fixed rows x cols matrix of walls and paths. Built once, never mutated.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Canonical layout for the maze-chase variant. `#` is a wall, everything
/// else is walkable.
pub const MAZE_LAYOUT: &[&str] = &[
    "###################",
    "#........#........#",
    "#.###.##.#.##.###.#",
    "#.................#",
    "#.###.#.###.#.###.#",
    "#.....#.....#.....#",
    "###.#.##...##.#.###",
    "#...#.........#...#",
    "#.###.#.###.#.###.#",
    "#.....#.....#.....#",
    "#.###.##.#.##.###.#",
    "#........#........#",
    "###################",
];

impl Maze {
    /// Builds a maze from an ASCII layout. The first row fixes the width;
    /// anything past a row's end counts as wall, so ragged layouts stay safe.
    pub fn parse(rows: &[&str]) -> Maze {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = vec![Cell::Wall; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(width).enumerate() {
                if ch != '#' {
                    cells[y * width + x] = Cell::Path;
                }
            }
        }
        Maze {
            width,
            height,
            cells,
        }
    }

    /// An all-path grid. The boundary check in `is_path` is the only wall,
    /// which is how the original fixed-grid cookie game clamped movement.
    pub fn open(width: usize, height: usize) -> Maze {
        Maze {
            width,
            height,
            cells: vec![Cell::Path; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True iff (x, y) is inside the grid and not a wall.
    pub fn is_path(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x] == Cell::Path
    }

    /// The cell one step from `pos` in `dir`, if that cell is walkable.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        pos.step(dir).filter(|next| self.is_path(next.x, next.y))
    }

    /// All path cells in row-major order.
    pub fn path_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.is_path(x, y).then_some(Pos::new(x, y)))
        })
    }
}
