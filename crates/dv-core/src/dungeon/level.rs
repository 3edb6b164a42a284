//! Finished single-floor dungeon

use serde::{Deserialize, Serialize};

use crate::options::Options;

use super::cell::{Cell, RoomId, Terrain};
use super::connect::RegionMap;
use super::door::Door;
use super::grid::Grid;
use super::room::Room;
use super::stairs::Stair;

/// One generated floor. Built once by the pipeline and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    /// Seed this floor was generated from
    pub seed: u64,
    /// Position in a multi-floor stack
    pub floor: Option<usize>,
    /// Options after coercion
    pub options: Options,
    grid: Grid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    stairs: Vec<Stair>,
}

impl Dungeon {
    pub(crate) fn new(
        seed: u64,
        floor: Option<usize>,
        options: Options,
        grid: Grid,
        rooms: Vec<Room>,
        doors: Vec<Door>,
        stairs: Vec<Stair>,
    ) -> Self {
        Self {
            seed,
            floor,
            options,
            grid,
            rooms,
            doors,
            stairs,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `(r, c)`, `None` off the grid
    pub fn cell(&self, r: usize, c: usize) -> Option<&Cell> {
        self.grid.get(r, c)
    }

    pub fn n_i(&self) -> usize {
        self.grid.n_i()
    }

    pub fn n_j(&self) -> usize {
        self.grid.n_j()
    }

    /// Largest row index
    pub fn n_rows(&self) -> usize {
        self.grid.n_rows()
    }

    /// Largest column index
    pub fn n_cols(&self) -> usize {
        self.grid.n_cols()
    }

    /// Rooms in id order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Room by 1-based id
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        usize::from(id).checked_sub(1).and_then(|idx| self.rooms.get(idx))
    }

    /// Every door once, in room and wall order
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn stairs(&self) -> &[Stair] {
        &self.stairs
    }

    /// Count of room and corridor cells
    pub fn open_cells(&self) -> usize {
        self.grid.iter().filter(|(_, cell)| cell.is_open()).count()
    }

    /// Count of corridor cells
    pub fn corridor_cells(&self) -> usize {
        self.grid
            .iter()
            .filter(|(_, cell)| cell.terrain == Terrain::Corridor)
            .count()
    }

    /// Number of 4-connected open regions; 1 for a well-formed dungeon
    pub fn region_count(&self) -> usize {
        RegionMap::build(&self.grid).count()
    }

    /// Stair positions, in placement order
    pub fn stair_positions(&self) -> Vec<(usize, usize)> {
        self.stairs.iter().map(|s| s.position()).collect()
    }
}
