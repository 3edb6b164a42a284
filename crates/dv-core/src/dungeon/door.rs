//! Door sills and door opening
//!
//! A sill is a room edge cell paired with the wall cell just outside it
//! and the cell beyond that wall. Opening a sill breaches the perimeter and
//! stamps a door kind on the wall cell.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::rng::GenRng;

use super::cell::{DoorKind, RoomId};
use super::grid::{Direction, Grid};
use super::room::Room;

/// Unordered pair of rooms already joined by a door, as `(min, max)`
pub type RoomPair = (RoomId, RoomId);

/// Set of room pairs that already share a door
pub type Connections = HashSet<RoomPair>;

pub fn room_pair(a: RoomId, b: RoomId) -> RoomPair {
    (a.min(b), a.max(b))
}

/// A door record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub row: usize,
    pub col: usize,
    pub kind: DoorKind,
    /// Room on the far side, if the door opens into one
    pub out_id: Option<RoomId>,
}

impl Door {
    /// Short key for renderers
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }

    /// Human readable type label
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Candidate wall opening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sill {
    /// Room cell the door opens from
    pub sill_r: usize,
    pub sill_c: usize,
    /// Wall the door sits in
    pub dir: Direction,
    /// Wall cell that receives the door
    pub door_r: usize,
    pub door_c: usize,
    /// Room beyond the wall
    pub out_id: Option<RoomId>,
}

/// Collect valid sills for a room, walls in N, S, W, E order.
///
/// Walls closer than three cells to the grid edge are skipped.
pub fn door_sills(grid: &Grid, room: &Room) -> Vec<Sill> {
    let mut sills = Vec::new();
    for (dir, positions) in wall_positions(grid, room) {
        for (r, c) in positions {
            if let Some(sill) = check_sill(grid, room, r, c, dir) {
                sills.push(sill);
            }
        }
    }
    sills
}

/// Room edge cells, stepping by two, for every wall far enough from the edge
pub(crate) fn wall_positions(grid: &Grid, room: &Room) -> Vec<(Direction, Vec<(usize, usize)>)> {
    let cols = || (room.west..=room.east).step_by(2);
    let rows = || (room.north..=room.south).step_by(2);
    let mut walls = Vec::with_capacity(4);
    if room.north >= 3 {
        walls.push((Direction::North, cols().map(|c| (room.north, c)).collect()));
    }
    if room.south + 3 <= grid.n_rows() {
        walls.push((Direction::South, cols().map(|c| (room.south, c)).collect()));
    }
    if room.west >= 3 {
        walls.push((Direction::West, rows().map(|r| (r, room.west)).collect()));
    }
    if room.east + 3 <= grid.n_cols() {
        walls.push((Direction::East, rows().map(|r| (r, room.east)).collect()));
    }
    walls
}

/// Validate one sill
pub fn check_sill(grid: &Grid, room: &Room, r: usize, c: usize, dir: Direction) -> Option<Sill> {
    let (door_r, door_c) = grid.step(r, c, dir, 1)?;
    let (out_r, out_c) = grid.step(r, c, dir, 2)?;

    let door = &grid[(door_r, door_c)];
    if !door.perimeter || door.blocks_door() {
        return None;
    }
    let out = &grid[(out_r, out_c)];
    if out.is_blocked() {
        return None;
    }
    let out_id = if out.is_room() { out.room_id } else { None };
    if out_id == Some(room.id) {
        return None;
    }

    Some(Sill {
        sill_r: r,
        sill_c: c,
        dir,
        door_r,
        door_c,
        out_id,
    })
}

/// Number of doors to try for a room: `f + rand_int(f)`, `f = floor(sqrt(units))`
pub fn alloc_opens(room: &Room, rng: &mut GenRng) -> usize {
    let units = (room.height_units() * room.width_units()) as f64;
    let base = units.sqrt() as usize;
    base + rng.rand_int(base)
}

/// Open doors for every room in id order. Returns the joined room pairs.
pub fn open_rooms(grid: &mut Grid, rooms: &mut [Room], rng: &mut GenRng) -> Connections {
    let mut connected = Connections::new();
    let mut opened = 0usize;
    for room in rooms.iter_mut() {
        opened += open_room(grid, room, &mut connected, rng);
    }
    tracing::debug!(doors = opened, pairs = connected.len(), "doors opened");
    connected
}

fn open_room(grid: &mut Grid, room: &mut Room, connected: &mut Connections, rng: &mut GenRng) -> usize {
    let sills = door_sills(grid, room);
    if sills.is_empty() {
        return 0;
    }
    let sills = rng.shuffled(&sills);
    let n_opens = alloc_opens(room, rng);

    let mut opened = 0;
    for sill in sills.into_iter().take(n_opens) {
        if grid[(sill.door_r, sill.door_c)].door.is_some() {
            continue;
        }
        if let Some(out_id) = sill.out_id
            && !connected.insert(room_pair(room.id, out_id))
        {
            continue;
        }
        let kind = DoorKind::roll(rng);
        open_door(grid, room, &sill, kind);
        opened += 1;
    }
    opened
}

/// Breach the wall at a sill and record the door on the room
pub(crate) fn open_door(grid: &mut Grid, room: &mut Room, sill: &Sill, kind: DoorKind) -> Door {
    for steps in 0..=2 {
        if let Some(pos) = grid.step(sill.sill_r, sill.sill_c, sill.dir, steps) {
            let cell = &mut grid[pos];
            cell.perimeter = false;
            cell.entrance = true;
        }
    }

    let cell = &mut grid[(sill.door_r, sill.door_c)];
    cell.door = Some(kind);
    cell.label = kind.glyph();

    let door = Door {
        row: sill.door_r,
        col: sill.door_c,
        kind,
        out_id: sill.out_id,
    };
    room.doors.entry(sill.dir).or_default().push(door);
    door
}
