//! Dead-end removal
//!
//! A dead end is a corridor cell whose only open neighbour lies in one
//! direction. Collapsing one walks back along the corridor, filling cells
//! with rock, until it reaches a junction, a room or a stair.

use crate::rng::GenRng;

use super::cell::Cell;
use super::grid::{Direction, Grid};

/// Offsets that must all be closed for a cell to be a dead end opening
/// toward `dir`, and the step to take after filling it
struct DeadEnd {
    walled: [(isize, isize); 5],
    recurse: (isize, isize),
}

const fn dead_end(dir: Direction) -> DeadEnd {
    match dir {
        Direction::North => DeadEnd {
            walled: [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1)],
            recurse: (-1, 0),
        },
        Direction::South => DeadEnd {
            walled: [(0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)],
            recurse: (1, 0),
        },
        Direction::West => DeadEnd {
            walled: [(-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0)],
            recurse: (0, -1),
        },
        Direction::East => DeadEnd {
            walled: [(-1, 0), (-1, -1), (0, -1), (1, -1), (1, 0)],
            recurse: (0, 1),
        },
    }
}

/// Remove dead ends with the given chance (0-100). Returns the number of
/// cells filled.
pub fn remove_deadends(grid: &mut Grid, percent: u32, rng: &mut GenRng) -> usize {
    if percent == 0 {
        return 0;
    }
    let all = percent >= 100;
    let starts: Vec<_> = grid.intersections().collect();
    let mut filled = 0;
    for (r, c) in starts {
        let cell = &grid[(r, c)];
        if !cell.is_open() || cell.stair.is_some() {
            continue;
        }
        if all || rng.percent(percent) {
            filled += collapse(grid, r, c);
        }
    }
    tracing::debug!(percent, filled, "dead ends removed");
    filled
}

/// Fill a dead-end corridor starting at `(r, c)`
pub fn collapse(grid: &mut Grid, r: usize, c: usize) -> usize {
    let mut filled = 0;
    let (mut r, mut c) = (r as isize, c as isize);
    loop {
        let Some(cell) = grid.get_signed(r, c) else {
            break;
        };
        if !cell.is_corridor() || cell.stair.is_some() {
            break;
        }
        let Some(step) = Direction::ALL
            .into_iter()
            .map(dead_end)
            .find(|end| is_walled(grid, r, c, &end.walled))
            .map(|end| end.recurse)
        else {
            break;
        };
        grid[(r as usize, c as usize)] = Cell::empty();
        filled += 1;
        r += step.0;
        c += step.1;
    }
    filled
}

fn is_walled(grid: &Grid, r: isize, c: isize, offsets: &[(isize, isize)]) -> bool {
    offsets
        .iter()
        .all(|&(dr, dc)| !grid.is_open_at(r + dr, c + dc))
}
