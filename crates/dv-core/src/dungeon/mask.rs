//! Layout masks
//!
//! Marks cells outside the dungeon's overall shape as blocked before any
//! room is placed. Blocked cells never hold rooms or corridors.

use crate::options::DungeonLayout;

use super::cell::Terrain;
use super::grid::Grid;

const BOX_MASK: [[u8; 3]; 3] = [[1, 1, 1], [1, 0, 1], [1, 1, 1]];
const CROSS_MASK: [[u8; 3]; 3] = [[0, 1, 0], [1, 1, 1], [0, 1, 0]];

/// Apply the layout's mask to a fresh grid. Returns the number of blocked cells.
pub fn apply_mask(grid: &mut Grid, layout: DungeonLayout) -> usize {
    let blocked = match layout {
        DungeonLayout::None => 0,
        DungeonLayout::Box => mask_cells(grid, &BOX_MASK),
        DungeonLayout::Cross => mask_cells(grid, &CROSS_MASK),
        DungeonLayout::Round => round_mask(grid),
    };
    tracing::debug!(%layout, blocked, "layout mask applied");
    blocked
}

/// Scale a small template over the grid; 0 entries block
fn mask_cells(grid: &mut Grid, mask: &[[u8; 3]; 3]) -> usize {
    let rows = grid.n_rows() + 1;
    let cols = grid.n_cols() + 1;
    let mut blocked = 0;
    for r in 0..rows {
        let mr = r * mask.len() / rows;
        for c in 0..cols {
            let mc = c * mask[mr].len() / cols;
            if mask[mr][mc] == 0 {
                grid[(r, c)].terrain = Terrain::Blocked;
                blocked += 1;
            }
        }
    }
    blocked
}

/// Block everything farther than `n_cols / 2` from the grid centre
fn round_mask(grid: &mut Grid) -> usize {
    let center_r = (grid.n_rows() / 2) as f64;
    let center_c = (grid.n_cols() / 2) as f64;
    let mut blocked = 0;
    for r in 0..=grid.n_rows() {
        for c in 0..=grid.n_cols() {
            if distance(r, c, center_r, center_c) > center_c {
                grid[(r, c)].terrain = Terrain::Blocked;
                blocked += 1;
            }
        }
    }
    blocked
}

/// Euclidean distance from a cell to a point
pub fn distance(r: usize, c: usize, center_r: f64, center_c: f64) -> f64 {
    let dr = r as f64 - center_r;
    let dc = c as f64 - center_c;
    (dr * dr + dc * dc).sqrt()
}
