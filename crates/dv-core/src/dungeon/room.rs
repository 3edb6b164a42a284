//! Room records, placement and labeling
//!
//! Rooms are axis-aligned boxes whose corners sit on intersections. Each
//! accepted room is stamped into the grid and closed off with a perimeter
//! ring that corridors may only cross through a door.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ROOMS;
use crate::options::{Options, RoomLayout};
use crate::rng::GenRng;

use super::cell::{RoomId, Terrain};
use super::door::Door;
use super::grid::{Direction, Grid};

/// A placed room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// 1-based id, in creation order
    pub id: RoomId,
    /// Top interior row (odd)
    pub north: usize,
    /// Bottom interior row (odd)
    pub south: usize,
    /// Left interior column (odd)
    pub west: usize,
    /// Right interior column (odd)
    pub east: usize,
    /// Interior height in cells
    pub height: usize,
    /// Interior width in cells
    pub width: usize,
    /// Interior area in cells
    pub area: usize,
    /// Doors keyed by the wall they sit in
    pub doors: BTreeMap<Direction, Vec<Door>>,
}

impl Room {
    /// Create a room from its interior bounds
    pub fn new(id: RoomId, north: usize, south: usize, west: usize, east: usize) -> Self {
        let height = south - north + 1;
        let width = east - west + 1;
        Self {
            id,
            north,
            south,
            west,
            east,
            height,
            width,
            area: height * width,
            doors: BTreeMap::new(),
        }
    }

    /// Height in intersections
    pub fn height_units(&self) -> usize {
        (self.south - self.north) / 2 + 1
    }

    /// Width in intersections
    pub fn width_units(&self) -> usize {
        (self.east - self.west) / 2 + 1
    }

    /// Check if a cell lies inside the room interior
    pub fn contains(&self, r: usize, c: usize) -> bool {
        r >= self.north && r <= self.south && c >= self.west && c <= self.east
    }

    /// Get center point of room
    pub fn center(&self) -> (usize, usize) {
        ((self.north + self.south) / 2, (self.west + self.east) / 2)
    }

    /// Check if two rooms share any interior cell
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.south < other.north
            || other.south < self.north
            || self.east < other.west
            || other.east < self.west)
    }

    /// Interior cells, raster order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.north..=self.south).flat_map(move |r| (self.west..=self.east).map(move |c| (r, c)))
    }

    /// Doors in one wall
    pub fn doors_in(&self, dir: Direction) -> &[Door] {
        self.doors.get(&dir).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All doors, walls in N, S, W, E order
    pub fn all_doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.values().flatten()
    }

    pub fn door_count(&self) -> usize {
        self.doors.values().map(Vec::len).sum()
    }
}

/// Partially specified room; unset fields are rolled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomProto {
    /// Anchor intersection row
    pub i: Option<usize>,
    /// Anchor intersection column
    pub j: Option<usize>,
    /// Height in intersections
    pub height: Option<usize>,
    /// Width in intersections
    pub width: Option<usize>,
}

impl RoomProto {
    pub fn at(i: usize, j: usize) -> Self {
        Self {
            i: Some(i),
            j: Some(j),
            ..Self::default()
        }
    }
}

/// Room size rolls derived from the options, in intersections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSizing {
    /// Smallest side
    pub base: usize,
    /// Number of side lengths above `base`
    pub radix: usize,
}

impl RoomSizing {
    pub fn from_options(opts: &Options) -> Self {
        Self {
            base: (opts.room_min + 1) / 2,
            radix: opts.room_max.saturating_sub(opts.room_min) / 2 + 1,
        }
    }

    /// Roll one side. Anchored rooms are tightened so they fit before `limit`.
    fn roll(&self, anchor: Option<usize>, limit: usize, rng: &mut GenRng) -> usize {
        match anchor {
            Some(at) => {
                let room_left = limit.saturating_sub(self.base + at);
                rng.rand_int(room_left.min(self.radix)) + self.base
            }
            None => rng.rand_int(self.radix) + self.base,
        }
    }
}

/// Outcome of probing a candidate box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sound {
    Clear,
    Blocked,
    Occupied,
}

/// Place rooms per the options' room layout
pub fn emplace_rooms(grid: &mut Grid, opts: &Options, rng: &mut GenRng) -> Vec<Room> {
    let sizing = RoomSizing::from_options(opts);
    let mut rooms = Vec::new();
    match opts.room_layout {
        RoomLayout::Packed => pack_rooms(grid, &mut rooms, sizing, rng),
        RoomLayout::Scattered => scatter_rooms(grid, &mut rooms, sizing, opts.room_max, rng),
    }
    tracing::debug!(layout = %opts.room_layout, rooms = rooms.len(), "rooms placed");
    rooms
}

/// One attempt per intersection in raster order; edge anchors are skipped half the time
fn pack_rooms(grid: &mut Grid, rooms: &mut Vec<Room>, sizing: RoomSizing, rng: &mut GenRng) {
    for i in 0..grid.n_i() {
        let r = 2 * i + 1;
        for j in 0..grid.n_j() {
            let c = 2 * j + 1;
            if grid[(r, c)].is_room() {
                continue;
            }
            if (i == 0 || j == 0) && rng.coin() {
                continue;
            }
            emplace_room(grid, rooms, RoomProto::at(i, j), sizing, rng);
        }
    }
}

/// A fixed budget of unanchored attempts
fn scatter_rooms(
    grid: &mut Grid,
    rooms: &mut Vec<Room>,
    sizing: RoomSizing,
    room_max: usize,
    rng: &mut GenRng,
) {
    let budget = alloc_rooms(grid, room_max);
    for _ in 0..budget {
        emplace_room(grid, rooms, RoomProto::default(), sizing, rng);
    }
}

/// Scattered attempt budget: grid area over the largest room's area
pub fn alloc_rooms(grid: &Grid, room_max: usize) -> usize {
    let dungeon_area = grid.n_rows() * grid.n_cols();
    let room_area = (room_max * room_max).max(1);
    dungeon_area / room_area
}

/// Roll missing fields of a proto
pub fn set_room(proto: RoomProto, grid: &Grid, sizing: RoomSizing, rng: &mut GenRng) -> RoomProto {
    let height = match proto.height {
        Some(h) => h,
        None => sizing.roll(proto.i, grid.n_i(), rng),
    };
    let width = match proto.width {
        Some(w) => w,
        None => sizing.roll(proto.j, grid.n_j(), rng),
    };
    let i = match proto.i {
        Some(i) => i,
        None => rng.rand_int(grid.n_i().saturating_sub(height)),
    };
    let j = match proto.j {
        Some(j) => j,
        None => rng.rand_int(grid.n_j().saturating_sub(width)),
    };
    RoomProto {
        i: Some(i),
        j: Some(j),
        height: Some(height),
        width: Some(width),
    }
}

fn sound_room(grid: &Grid, r1: usize, c1: usize, r2: usize, c2: usize) -> Sound {
    let mut occupied = false;
    for r in r1..=r2 {
        for c in c1..=c2 {
            let cell = &grid[(r, c)];
            if cell.is_blocked() {
                return Sound::Blocked;
            }
            if cell.is_room() {
                occupied = true;
            }
        }
    }
    if occupied { Sound::Occupied } else { Sound::Clear }
}

/// Try to place one room. Returns its id when accepted.
///
/// Out-of-bounds, blocked or overlapping candidates are dropped silently,
/// as is every attempt once `MAX_ROOMS` exist.
pub fn emplace_room(
    grid: &mut Grid,
    rooms: &mut Vec<Room>,
    proto: RoomProto,
    sizing: RoomSizing,
    rng: &mut GenRng,
) -> Option<RoomId> {
    if rooms.len() >= MAX_ROOMS {
        return None;
    }
    let proto = set_room(proto, grid, sizing, rng);
    let (i, j) = (proto.i?, proto.j?);
    let (height, width) = (proto.height?, proto.width?);
    if height == 0 || width == 0 {
        return None;
    }

    let r1 = 2 * i + 1;
    let c1 = 2 * j + 1;
    let r2 = 2 * (i + height) - 1;
    let c2 = 2 * (j + width) - 1;
    if r2 > grid.n_rows() - 1 || c2 > grid.n_cols() - 1 {
        tracing::trace!(r1, c1, r2, c2, "room out of bounds");
        return None;
    }
    if sound_room(grid, r1, c1, r2, c2) != Sound::Clear {
        tracing::trace!(r1, c1, r2, c2, "room rejected");
        return None;
    }

    let id = RoomId::try_from(rooms.len() + 1).ok()?;
    for r in r1..=r2 {
        for c in c1..=c2 {
            let cell = &mut grid[(r, c)];
            cell.entrance = false;
            cell.door = None;
            cell.label = None;
            cell.perimeter = false;
            cell.terrain = Terrain::Room;
            cell.room_id = Some(id);
        }
    }

    for r in r1 - 1..=r2 + 1 {
        mark_perimeter(grid, r, c1 - 1);
        mark_perimeter(grid, r, c2 + 1);
    }
    for c in c1 - 1..=c2 + 1 {
        mark_perimeter(grid, r1 - 1, c);
        mark_perimeter(grid, r2 + 1, c);
    }

    rooms.push(Room::new(id, r1, r2, c1, c2));
    Some(id)
}

fn mark_perimeter(grid: &mut Grid, r: usize, c: usize) {
    let cell = &mut grid[(r, c)];
    if !cell.is_room() && !cell.entrance {
        cell.perimeter = true;
    }
}

/// Write each room's id, centred, into its middle row
pub fn label_rooms(grid: &mut Grid, rooms: &[Room]) {
    for room in rooms {
        let label = room.id.to_string();
        let row = (room.north + room.south) / 2;
        let start = (room.west + room.east).saturating_sub(label.len()) / 2 + 1;
        for (k, ch) in label.chars().enumerate() {
            if let Some(cell) = grid.get(row, start + k)
                && cell.is_room()
            {
                grid[(row, start + k)].label = Some(ch);
            }
        }
    }
}
