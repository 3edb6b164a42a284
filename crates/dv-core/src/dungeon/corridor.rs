//! Corridor tunneling
//!
//! A depth-first walk over intersections. From each cell the walk tries the
//! four directions in shuffled order, optionally preferring the direction it
//! arrived from, and opens a two-cell step whenever the span ahead is free.
//! The walk keeps an explicit frame stack so large grids cannot overflow the
//! call stack; draws happen in the same order a recursive walk would make.

use crate::options::CorridorLayout;
use crate::rng::GenRng;

use super::grid::{Direction, Grid};

/// Pending directions at one intersection
#[derive(Debug, Clone)]
struct Frame {
    i: usize,
    j: usize,
    dirs: Vec<Direction>,
    next: usize,
}

/// Tunnel from every interior intersection the walk has not reached yet.
/// Returns the number of steps opened.
pub fn carve_corridors(grid: &mut Grid, layout: CorridorLayout, rng: &mut GenRng) -> usize {
    let straight = layout.straight_percent();
    let mut opened = 0;
    for i in 1..grid.n_i() {
        for j in 1..grid.n_j() {
            let cell = &grid[(2 * i + 1, 2 * j + 1)];
            if cell.carved || cell.is_blocked() {
                continue;
            }
            opened += tunnel(grid, i, j, straight, rng);
        }
    }
    tracing::debug!(%layout, steps = opened, "corridors carved");
    opened
}

/// Depth-first walk from `(i, j)`
pub fn tunnel(grid: &mut Grid, i: usize, j: usize, straight: u32, rng: &mut GenRng) -> usize {
    let mut opened = 0;
    let mut stack = vec![Frame {
        i,
        j,
        dirs: tunnel_dirs(None, straight, rng),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.dirs.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let (fi, fj) = (frame.i, frame.j);

        if let Some((ni, nj)) = open_tunnel(grid, fi, fj, dir) {
            opened += 1;
            stack.push(Frame {
                i: ni,
                j: nj,
                dirs: tunnel_dirs(Some(dir), straight, rng),
                next: 0,
            });
        }
    }
    opened
}

/// Shuffled directions, with `last` pushed to the front `straight` percent of the time
pub fn tunnel_dirs(last: Option<Direction>, straight: u32, rng: &mut GenRng) -> Vec<Direction> {
    let mut dirs = rng.shuffled(&Direction::ALL);
    if let Some(last) = last
        && straight > 0
        && rng.percent(straight)
    {
        dirs.insert(0, last);
    }
    dirs
}

/// Try one step from intersection `(i, j)`. On success the span from this
/// cell to the next intersection is carved and the next intersection
/// returned.
pub fn open_tunnel(grid: &mut Grid, i: usize, j: usize, dir: Direction) -> Option<(usize, usize)> {
    let (this_r, this_c) = (2 * i + 1, 2 * j + 1);
    let (next_r, next_c) = grid.step(this_r, this_c, dir, 2)?;
    let (mid_r, mid_c) = grid.step(this_r, this_c, dir, 1)?;

    if !sound_tunnel(grid, (mid_r, mid_c), (next_r, next_c)) {
        return None;
    }
    delve_tunnel(grid, (this_r, this_c), (next_r, next_c));
    Some(((next_r - 1) / 2, (next_c - 1) / 2))
}

fn span(a: (usize, usize), b: (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
    let (r1, r2) = (a.0.min(b.0), a.0.max(b.0));
    let (c1, c2) = (a.1.min(b.1), a.1.max(b.1));
    (r1..=r2).flat_map(move |r| (c1..=c2).map(move |c| (r, c)))
}

fn sound_tunnel(grid: &Grid, mid: (usize, usize), next: (usize, usize)) -> bool {
    span(mid, next).all(|pos| !grid[pos].blocks_corridor())
}

fn delve_tunnel(grid: &mut Grid, this: (usize, usize), next: (usize, usize)) {
    for pos in span(this, next) {
        grid[pos].carve();
    }
}
