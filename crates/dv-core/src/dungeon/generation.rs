//! Single-floor generation pipeline
//!
//! One mutable grid is threaded through every stage in a fixed order, and
//! every stage draws from the same generator. Changing the stage order
//! changes every dungeon.

use crate::options::Options;
use crate::rng::GenRng;

use super::cleanup::clean_dungeon;
use super::connect::stitch_regions;
use super::corridor::carve_corridors;
use super::door::open_rooms;
use super::grid::Grid;
use super::level::Dungeon;
use super::mask::apply_mask;
use super::room::{emplace_rooms, label_rooms};
use super::stairs::{place_fixed_stairs, place_stairs, refresh_next};

/// How a floor gets its stairs
#[derive(Debug, Clone, Copy)]
pub(crate) enum StairPlan<'a> {
    /// Standalone floor: shuffled sites, mixed kinds
    Single,
    /// Bottom of a stack: shuffled sites, all leading down
    FirstFloor,
    /// Later floor of a stack: reuse the first floor's positions
    Fixed {
        positions: &'a [(usize, usize)],
        floor: usize,
        floors: usize,
    },
}

/// Generate one floor from the options' seed
pub fn generate_floor(opts: &Options) -> Dungeon {
    let opts = opts.normalized();
    build_floor(&opts, opts.seed, None, StairPlan::Single)
}

/// Run the whole pipeline. `opts` must already be normalized.
pub(crate) fn build_floor(opts: &Options, seed: u64, floor: Option<usize>, plan: StairPlan<'_>) -> Dungeon {
    let mut rng = GenRng::new(seed);
    let mut grid = Grid::new(opts.n_i(), opts.n_j());

    apply_mask(&mut grid, opts.dungeon_layout);
    let mut rooms = emplace_rooms(&mut grid, opts, &mut rng);
    let mut connected = open_rooms(&mut grid, &mut rooms, &mut rng);
    label_rooms(&mut grid, &rooms);
    carve_corridors(&mut grid, opts.corridor_layout, &mut rng);
    stitch_regions(&mut grid, &mut rooms, &mut connected, &mut rng);

    let mut stairs = match plan {
        StairPlan::Single => place_stairs(&mut grid, opts.add_stairs, false, &mut rng),
        StairPlan::FirstFloor => place_stairs(&mut grid, opts.add_stairs, true, &mut rng),
        StairPlan::Fixed {
            positions,
            floor,
            floors,
        } => place_fixed_stairs(&mut grid, positions, floor, floors),
    };

    let doors = clean_dungeon(&mut grid, &mut rooms, opts.remove_deadends, &mut rng);
    refresh_next(&grid, &mut stairs);

    tracing::info!(
        seed,
        floor = ?floor,
        rooms = rooms.len(),
        doors = doors.len(),
        stairs = stairs.len(),
        draws = rng.draws(),
        "floor generated"
    );

    Dungeon::new(seed, floor, opts.clone(), grid, rooms, doors, stairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::cell::{StairKind, Terrain};
    use crate::options::{CorridorLayout, DungeonLayout, RoomLayout};

    #[test]
    fn test_generate_floor_basic() {
        let dungeon = generate_floor(&Options::with_seed(42));
        assert_eq!(dungeon.seed, 42);
        assert_eq!(dungeon.floor, None);
        assert_eq!(dungeon.n_rows(), 38);
        assert_eq!(dungeon.n_cols(), 38);
        assert!(!dungeon.rooms().is_empty());
        assert_eq!(dungeon.region_count(), 1);
    }

    #[test]
    fn test_generate_floor_deterministic() {
        let opts = Options::with_seed(1234);
        assert_eq!(generate_floor(&opts), generate_floor(&opts));
        let other = generate_floor(&Options::with_seed(1235));
        assert_ne!(generate_floor(&opts).grid(), other.grid());
    }

    #[test]
    fn test_generate_floor_coerces_options() {
        let mut opts = Options::with_seed(3);
        opts.n_rows = 2;
        opts.n_cols = 0;
        opts.room_min = 0;
        opts.remove_deadends = 400;
        let dungeon = generate_floor(&opts);
        assert_eq!(dungeon.options.n_rows, 7);
        assert_eq!(dungeon.options.remove_deadends, 100);
        assert_eq!(dungeon.n_rows(), 6);
        assert!(dungeon.grid().iter().all(|(_, cell)| !cell.is_blocked()));
    }

    #[test]
    fn test_stairs_reference_open_cells() {
        for seed in 0..10 {
            let dungeon = generate_floor(&Options::with_seed(seed));
            for stair in dungeon.stairs() {
                let cell = dungeon.cell(stair.row, stair.col).unwrap();
                assert!(cell.is_open());
                assert_eq!(cell.stair, Some(stair.kind));
                assert_eq!(cell.door, None);
                assert!(dungeon.cell(stair.next_row, stair.next_col).unwrap().is_open());
            }
            if let [first, second, ..] = dungeon.stairs() {
                assert_eq!(first.kind, StairKind::Down);
                assert_eq!(second.kind, StairKind::Up);
            }
        }
    }

    #[test]
    fn test_every_layout_combination() {
        for dungeon_layout in [DungeonLayout::None, DungeonLayout::Box, DungeonLayout::Cross, DungeonLayout::Round] {
            for room_layout in [RoomLayout::Packed, RoomLayout::Scattered] {
                for corridor_layout in [CorridorLayout::Labyrinth, CorridorLayout::Bent, CorridorLayout::Straight] {
                    let opts = Options {
                        dungeon_layout,
                        room_layout,
                        corridor_layout,
                        ..Options::with_seed(99)
                    };
                    let dungeon = generate_floor(&opts);
                    assert!(dungeon.region_count() <= 1, "{dungeon_layout}/{room_layout}/{corridor_layout}");
                    assert!(dungeon
                        .grid()
                        .iter()
                        .all(|(_, cell)| cell.terrain != Terrain::Blocked));
                }
            }
        }
    }

    #[test]
    fn test_doors_sit_on_open_cells() {
        let dungeon = generate_floor(&Options::with_seed(8));
        for door in dungeon.doors() {
            let cell = dungeon.cell(door.row, door.col).unwrap();
            assert!(cell.is_open());
            assert_eq!(cell.door, Some(door.kind));
            assert_eq!(cell.stair, None);
        }
        for room in dungeon.rooms() {
            for door in room.all_doors() {
                assert!(dungeon.doors().iter().any(|d| d.row == door.row && d.col == door.col));
            }
        }
    }
}
