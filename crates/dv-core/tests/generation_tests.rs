use dv_core::dungeon::{Dungeon, StairKind, Terrain};
use dv_core::{
    generate, generate_floor, generate_floors, CorridorLayout, DungeonLayout, Generated, Options,
    RoomLayout, MAX_ROOMS,
};

fn assert_well_formed(dungeon: &Dungeon) {
    let n_rows = dungeon.n_rows();
    let n_cols = dungeon.n_cols();

    for (k, room) in dungeon.rooms().iter().enumerate() {
        assert_eq!(usize::from(room.id), k + 1);
        assert!(room.north >= 1 && room.south <= n_rows - 1);
        assert!(room.west >= 1 && room.east <= n_cols - 1);
        for (r, c) in room.cells() {
            let cell = dungeon.cell(r, c).unwrap();
            assert_eq!(cell.terrain, Terrain::Room);
            assert_eq!(cell.room_id, Some(room.id));
        }
        for other in &dungeon.rooms()[k + 1..] {
            assert!(!room.overlaps(other), "rooms {} and {} overlap", room.id, other.id);
        }
    }

    for (_, cell) in dungeon.grid().iter() {
        assert_ne!(cell.terrain, Terrain::Blocked);
        assert!(!(cell.door.is_some() && cell.stair.is_some()));
        if cell.door.is_some() || cell.stair.is_some() {
            assert!(cell.is_open());
        }
    }

    if dungeon.open_cells() > 0 {
        assert_eq!(dungeon.region_count(), 1);
    }
}

#[test]
fn test_scenario_small_straight() {
    let opts = Options {
        n_rows: 21,
        n_cols: 21,
        room_layout: RoomLayout::Scattered,
        corridor_layout: CorridorLayout::Straight,
        add_stairs: 2,
        floors: 1,
        ..Options::with_seed(42)
    };
    let dungeon = match generate(&opts) {
        Generated::Single(dungeon) => dungeon,
        Generated::Multi(_) => panic!("one floor requested"),
    };
    assert_eq!(dungeon.stairs().len(), 2);
    assert!(!dungeon.rooms().is_empty());
    assert_eq!(dungeon.region_count(), 1);
    assert_well_formed(&dungeon);

    let again = generate_floor(&opts);
    assert_eq!(again.rooms().len(), dungeon.rooms().len());
    assert_eq!(again.doors().len(), dungeon.doors().len());
    assert_eq!(again.stair_positions(), dungeon.stair_positions());
    assert_eq!(again, dungeon);
}

#[test]
fn test_scenario_three_floor_stack() {
    let opts = Options {
        floors: 3,
        add_stairs: 1,
        ..Options::with_seed(42)
    };
    let stack = generate_floors(&opts);
    assert_eq!(stack.floors.len(), 3);
    assert_eq!(stack.stair_positions.len(), 1);

    let kinds: Vec<_> = stack
        .floors
        .iter()
        .map(|floor| {
            assert_eq!(floor.stair_positions(), stack.stair_positions);
            floor.stairs()[0].kind
        })
        .collect();
    assert_eq!(kinds, [StairKind::Down, StairKind::Up, StairKind::Up]);
    for floor in &stack.floors {
        assert_well_formed(floor);
    }
}

#[test]
fn test_determinism_across_layouts() {
    for dungeon_layout in [DungeonLayout::None, DungeonLayout::Box, DungeonLayout::Cross, DungeonLayout::Round] {
        let opts = Options {
            dungeon_layout,
            room_layout: RoomLayout::Packed,
            ..Options::with_seed(2024)
        };
        assert_eq!(generate_floor(&opts), generate_floor(&opts));
    }
}

#[test]
fn test_well_formed_over_seeds() {
    for seed in 0..25 {
        let opts = Options {
            dungeon_layout: match seed % 4 {
                0 => DungeonLayout::None,
                1 => DungeonLayout::Box,
                2 => DungeonLayout::Cross,
                _ => DungeonLayout::Round,
            },
            room_layout: if seed % 2 == 0 { RoomLayout::Packed } else { RoomLayout::Scattered },
            ..Options::with_seed(seed)
        };
        assert_well_formed(&generate_floor(&opts));
    }
}

#[test]
fn test_round_mask_containment() {
    let opts = Options {
        dungeon_layout: DungeonLayout::Round,
        n_rows: 41,
        n_cols: 41,
        ..Options::with_seed(7)
    };
    let dungeon = generate_floor(&opts);
    let center_r = (dungeon.n_rows() / 2) as f64;
    let center_c = (dungeon.n_cols() / 2) as f64;
    for ((r, c), cell) in dungeon.grid().iter() {
        if cell.is_open() {
            let d = dv_core::dungeon::mask::distance(r, c, center_r, center_c);
            assert!(d <= center_c, "open cell ({r},{c}) outside radius");
        }
    }
}

#[test]
fn test_doors_mirrored_once() {
    for seed in 0..10 {
        let opts = Options {
            room_layout: RoomLayout::Packed,
            ..Options::with_seed(seed)
        };
        let dungeon = generate_floor(&opts);
        let mut seen = std::collections::HashSet::new();
        for door in dungeon.doors() {
            assert!(seen.insert((door.row, door.col)), "door listed twice");
        }
        for room in dungeon.rooms() {
            for door in room.all_doors() {
                if let Some(out_id) = door.out_id {
                    let other = dungeon.room(out_id).unwrap();
                    let back: Vec<_> = other
                        .all_doors()
                        .filter(|d| d.row == door.row && d.col == door.col)
                        .collect();
                    assert_eq!(back.len(), 1);
                    assert_eq!(back[0].out_id, Some(room.id));
                }
            }
        }
    }
}

#[test]
fn test_room_cap() {
    let opts = Options {
        n_rows: 71,
        n_cols: 71,
        room_min: 1,
        room_max: 1,
        room_layout: RoomLayout::Packed,
        add_stairs: 0,
        ..Options::with_seed(1)
    };
    let dungeon = generate_floor(&opts);
    assert_eq!(dungeon.rooms().len(), MAX_ROOMS);
    assert!(dungeon.stairs().is_empty());
}

#[test]
fn test_no_deadend_removal_keeps_more_corridor() {
    let keep = Options {
        remove_deadends: 0,
        ..Options::with_seed(12)
    };
    let clear = Options {
        remove_deadends: 100,
        ..Options::with_seed(12)
    };
    let kept = generate_floor(&keep);
    let cleared = generate_floor(&clear);
    assert!(kept.corridor_cells() >= cleared.corridor_cells());
    assert_well_formed(&cleared);
}

#[test]
fn test_json_shape() {
    let dungeon = generate_floor(&Options::with_seed(5));
    let value = serde_json::to_value(&dungeon).unwrap();
    assert_eq!(value["seed"], 5);
    assert!(value["rooms"].is_array());
    assert!(value["grid"]["cells"].is_array());
    let back: Dungeon = serde_json::from_value(value).unwrap();
    assert_eq!(back, dungeon);

    let stack = generate(&Options {
        floors: 2,
        ..Options::with_seed(5)
    });
    let value = serde_json::to_value(&stack).unwrap();
    assert_eq!(value["kind"], "multi");
    assert_eq!(value["floors"].as_array().unwrap().len(), 2);
}
