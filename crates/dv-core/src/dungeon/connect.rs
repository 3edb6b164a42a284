//! Region tracking and stitching
//!
//! Tunneling alone can leave pockets of the map that no walk reaches, for
//! example a room whose only usable walls face a sealed part of the grid.
//! After carving, open cells are grouped into 4-connected regions and
//! neighbouring regions are joined through room walls until one remains.

use crate::rng::GenRng;

use super::cell::{Cell, DoorKind};
use super::door::{open_door, room_pair, wall_positions, Connections, Sill};
use super::grid::{Direction, Grid};
use super::room::Room;

/// Region label for every open cell
#[derive(Debug, Clone)]
pub struct RegionMap {
    labels: Vec<Vec<Option<usize>>>,
    sizes: Vec<usize>,
}

impl RegionMap {
    /// Flood-fill open cells into regions, labelled in raster order of
    /// their first cell
    pub fn build(grid: &Grid) -> Self {
        let mut labels = vec![vec![None; grid.n_cols() + 1]; grid.n_rows() + 1];
        let mut sizes = Vec::new();
        for ((r, c), cell) in grid.iter() {
            if !cell.is_open() || labels[r][c].is_some() {
                continue;
            }
            let region = sizes.len();
            let mut size = 0;
            let mut stack = vec![(r, c)];
            labels[r][c] = Some(region);
            while let Some((cr, cc)) = stack.pop() {
                size += 1;
                for dir in Direction::ALL {
                    if let Some((nr, nc)) = grid.step(cr, cc, dir, 1)
                        && labels[nr][nc].is_none()
                        && grid[(nr, nc)].is_open()
                    {
                        labels[nr][nc] = Some(region);
                        stack.push((nr, nc));
                    }
                }
            }
            sizes.push(size);
        }
        Self { labels, sizes }
    }

    /// Number of regions
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn region_at(&self, r: usize, c: usize) -> Option<usize> {
        self.labels.get(r).and_then(|row| row.get(c)).copied().flatten()
    }

    /// Cell count of each region
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Index of the largest region; the earliest wins ties
    pub fn largest(&self) -> Option<usize> {
        self.sizes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(idx, _)| idx)
    }
}

/// A wall position that would join two regions
#[derive(Debug, Clone, Copy)]
struct Bridge {
    room: usize,
    sill: Sill,
    /// The door cell already carries a door that was never carved through
    reopen: bool,
}

/// Join regions until the open cells form one. Returns the number of joins.
pub fn stitch_regions(
    grid: &mut Grid,
    rooms: &mut [Room],
    connected: &mut Connections,
    rng: &mut GenRng,
) -> usize {
    let mut joins = 0;
    loop {
        let regions = RegionMap::build(grid);
        if regions.count() <= 1 {
            break;
        }
        let bridges = find_bridges(grid, rooms, &regions);
        if bridges.is_empty() {
            prune_regions(grid, &regions);
            break;
        }
        let bridge = bridges[rng.rand_int(bridges.len())];
        join(grid, &mut rooms[bridge.room], &bridge, connected, rng);
        joins += 1;
    }
    tracing::debug!(joins, "regions stitched");
    joins
}

fn find_bridges(grid: &Grid, rooms: &[Room], regions: &RegionMap) -> Vec<Bridge> {
    let mut bridges = Vec::new();
    for (idx, room) in rooms.iter().enumerate() {
        for (dir, positions) in wall_positions(grid, room) {
            for (r, c) in positions {
                if let Some(bridge) = check_bridge(grid, room, idx, r, c, dir, regions) {
                    bridges.push(bridge);
                }
            }
        }
    }
    bridges
}

fn check_bridge(
    grid: &Grid,
    room: &Room,
    idx: usize,
    r: usize,
    c: usize,
    dir: Direction,
    regions: &RegionMap,
) -> Option<Bridge> {
    let (door_r, door_c) = grid.step(r, c, dir, 1)?;
    let (out_r, out_c) = grid.step(r, c, dir, 2)?;

    let door = &grid[(door_r, door_c)];
    if door.is_blocked() {
        return None;
    }
    let reopen = match door.door {
        Some(_) if !door.is_open() => true,
        None if door.perimeter => false,
        _ => return None,
    };

    let out = &grid[(out_r, out_c)];
    let here = regions.region_at(r, c)?;
    let there = regions.region_at(out_r, out_c)?;
    if here == there {
        return None;
    }
    let out_id = if out.is_room() { out.room_id } else { None };
    if out_id == Some(room.id) {
        return None;
    }

    Some(Bridge {
        room: idx,
        sill: Sill {
            sill_r: r,
            sill_c: c,
            dir,
            door_r,
            door_c,
            out_id,
        },
        reopen,
    })
}

fn join(
    grid: &mut Grid,
    room: &mut Room,
    bridge: &Bridge,
    connected: &mut Connections,
    rng: &mut GenRng,
) {
    let sill = &bridge.sill;
    if !bridge.reopen {
        let kind = DoorKind::roll(rng);
        open_door(grid, room, sill, kind);
    }
    if let Some(out_id) = sill.out_id {
        connected.insert(room_pair(room.id, out_id));
    }
    for steps in 1..=2 {
        if let Some(pos) = grid.step(sill.sill_r, sill.sill_c, sill.dir, steps) {
            grid[pos].carve();
        }
    }
    tracing::trace!(room = room.id, row = sill.door_r, col = sill.door_c, "regions joined");
}

/// Erase regions that hold no room, keeping the largest region
fn prune_regions(grid: &mut Grid, regions: &RegionMap) {
    let Some(main) = regions.largest() else {
        return;
    };
    let mut has_room = vec![false; regions.count()];
    for ((r, c), cell) in grid.iter() {
        if cell.is_room()
            && let Some(region) = regions.region_at(r, c)
        {
            has_room[region] = true;
        }
    }

    let mut erased = 0;
    for r in 0..=grid.n_rows() {
        for c in 0..=grid.n_cols() {
            if let Some(region) = regions.region_at(r, c)
                && region != main
                && !has_room[region]
            {
                grid[(r, c)] = Cell::empty();
                erased += 1;
            }
        }
    }

    let stranded = has_room
        .iter()
        .enumerate()
        .filter(|&(region, &rooms)| region != main && rooms)
        .count();
    if stranded > 0 {
        tracing::warn!(stranded, "room regions could not be joined");
    }
    tracing::debug!(erased, "unreachable corridors erased");
}
