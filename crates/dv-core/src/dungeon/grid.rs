//! The cell grid and cardinal directions
//!
//! The grid spans `[0, n_rows] x [0, n_cols]` with `n_rows = 2 * n_i` and
//! `n_cols = 2 * n_j`. Odd coordinates are intersections (room and corridor
//! centres); even coordinates are walls and joints between them.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::cell::Cell;

/// Cardinal direction
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All directions in canonical order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// (row, col) step
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}

/// Bounded 2-D cell array, row-major (`cells[row][col]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    n_i: usize,
    n_j: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Grid with `n_i x n_j` intersections, all rock
    pub fn new(n_i: usize, n_j: usize) -> Self {
        Self {
            n_i,
            n_j,
            cells: vec![vec![Cell::empty(); 2 * n_j + 1]; 2 * n_i + 1],
        }
    }

    /// Intersection rows
    pub fn n_i(&self) -> usize {
        self.n_i
    }

    /// Intersection columns
    pub fn n_j(&self) -> usize {
        self.n_j
    }

    /// Largest row index
    pub fn n_rows(&self) -> usize {
        2 * self.n_i
    }

    /// Largest column index
    pub fn n_cols(&self) -> usize {
        2 * self.n_j
    }

    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && r as usize <= self.n_rows() && c as usize <= self.n_cols()
    }

    pub fn get(&self, r: usize, c: usize) -> Option<&Cell> {
        self.cells.get(r).and_then(|row| row.get(c))
    }

    /// Signed lookup; `None` outside the grid
    pub fn get_signed(&self, r: isize, c: isize) -> Option<&Cell> {
        if self.in_bounds(r, c) {
            Some(&self.cells[r as usize][c as usize])
        } else {
            None
        }
    }

    /// Position `steps` cells away in `dir`, if still on the grid
    pub fn step(&self, r: usize, c: usize, dir: Direction, steps: usize) -> Option<(usize, usize)> {
        let (dr, dc) = dir.delta();
        let nr = r as isize + dr * steps as isize;
        let nc = c as isize + dc * steps as isize;
        self.in_bounds(nr, nc).then_some((nr as usize, nc as usize))
    }

    /// True when the cell at the signed position is walkable
    pub fn is_open_at(&self, r: isize, c: isize) -> bool {
        self.get_signed(r, c).is_some_and(Cell::is_open)
    }

    /// Number of walkable cardinal neighbours
    pub fn open_neighbours(&self, r: usize, c: usize) -> usize {
        Direction::ALL
            .iter()
            .filter(|dir| {
                let (dr, dc) = dir.delta();
                self.is_open_at(r as isize + dr, c as isize + dc)
            })
            .count()
    }

    /// All intersection coordinates in raster order
    pub fn intersections(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n_i).flat_map(move |i| (0..self.n_j).map(move |j| (2 * i + 1, 2 * j + 1)))
    }

    /// Every cell with its coordinates, raster order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| ((r, c), cell)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flat_map(|row| row.iter_mut())
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (r, c): (usize, usize)) -> &Cell {
        &self.cells[r][c]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Cell {
        &mut self.cells[r][c]
    }
}
