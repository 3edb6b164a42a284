//! Stair placement
//!
//! Stairs go on corridor intersections near walls or in narrow passages.
//! Multi-floor dungeons reuse the first floor's positions on every later
//! floor, anchoring a position into the local corridor network when the
//! new floor left it as rock.

use serde::{Deserialize, Serialize};

use crate::rng::GenRng;

use super::cell::StairKind;
use super::grid::{Direction, Grid};

/// A stair record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stair {
    pub row: usize,
    pub col: usize,
    /// Open neighbour the stair leads out to
    pub next_row: usize,
    pub next_col: usize,
    pub kind: StairKind,
}

impl Stair {
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn key(&self) -> &'static str {
        self.kind.key()
    }
}

/// Candidate stair cells, raster order.
///
/// A corridor intersection with no stair and no door qualifies when at
/// least one cardinal neighbour is closed.
pub fn stair_sites(grid: &Grid) -> Vec<(usize, usize)> {
    grid.intersections()
        .filter(|&(r, c)| {
            let cell = &grid[(r, c)];
            cell.is_corridor()
                && cell.stair.is_none()
                && cell.door.is_none()
                && grid.open_neighbours(r, c) < Direction::ALL.len()
        })
        .collect()
}

/// Kind of the `k`-th stair on a single-floor dungeon
fn single_floor_kind(k: usize, rng: &mut GenRng) -> StairKind {
    match k {
        0 => StairKind::Down,
        1 => StairKind::Up,
        _ if rng.coin() => StairKind::Up,
        _ => StairKind::Down,
    }
}

/// Kind of the `k`-th stair on floor `floor` of `floors`
pub fn floor_kind(floor: usize, floors: usize, k: usize) -> StairKind {
    if floor == 0 {
        StairKind::Down
    } else if floor + 1 >= floors || (floor + k) % 2 == 1 {
        StairKind::Up
    } else {
        StairKind::Down
    }
}

/// Place up to `count` stairs on shuffled sites. When `all_down` is set
/// every stair leads down (first floor of a stack).
pub fn place_stairs(grid: &mut Grid, count: usize, all_down: bool, rng: &mut GenRng) -> Vec<Stair> {
    let sites = stair_sites(grid);
    let sites = rng.shuffled(&sites);
    let mut stairs = Vec::with_capacity(count.min(sites.len()));
    for (k, (r, c)) in sites.into_iter().take(count).enumerate() {
        let kind = if all_down {
            StairKind::Down
        } else {
            single_floor_kind(k, rng)
        };
        stairs.push(set_stair(grid, r, c, kind));
    }
    tracing::debug!(requested = count, placed = stairs.len(), "stairs placed");
    stairs
}

/// Place stairs at fixed positions on floor `floor` of `floors`.
/// Positions that are rock and cannot be anchored are skipped.
pub fn place_fixed_stairs(
    grid: &mut Grid,
    positions: &[(usize, usize)],
    floor: usize,
    floors: usize,
) -> Vec<Stair> {
    let mut stairs = Vec::with_capacity(positions.len());
    for (k, &(r, c)) in positions.iter().enumerate() {
        let Some(cell) = grid.get(r, c) else {
            tracing::warn!(row = r, col = c, "stair position off the grid");
            continue;
        };
        if cell.door.is_some() {
            continue;
        }
        if !cell.is_open() && !anchor_stair(grid, r, c) {
            tracing::debug!(floor, row = r, col = c, "stair position skipped");
            continue;
        }
        stairs.push(set_stair(grid, r, c, floor_kind(floor, floors, k)));
    }
    stairs
}

/// Tunnel one step from a rock intersection into a neighbouring open
/// intersection. Returns false when no direction works.
pub fn anchor_stair(grid: &mut Grid, r: usize, c: usize) -> bool {
    if grid[(r, c)].is_blocked() {
        return false;
    }
    for dir in Direction::ALL {
        let (Some(mid), Some(next)) = (grid.step(r, c, dir, 1), grid.step(r, c, dir, 2)) else {
            continue;
        };
        let mid_cell = &grid[mid];
        if mid_cell.is_blocked() || mid_cell.perimeter || !grid[next].is_open() {
            continue;
        }
        grid[mid].carve();
        grid[(r, c)].carve();
        tracing::trace!(row = r, col = c, %dir, "stair anchored");
        return true;
    }
    false
}

fn set_stair(grid: &mut Grid, r: usize, c: usize, kind: StairKind) -> Stair {
    grid[(r, c)].stair = Some(kind);
    let (next_row, next_col) = next_cell(grid, r, c);
    Stair {
        row: r,
        col: c,
        next_row,
        next_col,
        kind,
    }
}

/// First open cardinal neighbour in N, S, W, E order, or the cell itself
pub fn next_cell(grid: &Grid, r: usize, c: usize) -> (usize, usize) {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| grid.step(r, c, dir, 1))
        .find(|&pos| grid[pos].is_open())
        .unwrap_or((r, c))
}

/// Recompute `next` for every stair after later stages reshaped corridors
pub fn refresh_next(grid: &Grid, stairs: &mut [Stair]) {
    for stair in stairs {
        (stair.next_row, stair.next_col) = next_cell(grid, stair.row, stair.col);
    }
}
