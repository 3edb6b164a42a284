//! Final cleanup
//!
//! Drops doors that lead nowhere, mirrors room-to-room doors onto both
//! rooms, builds the flat door list and turns mask rock back into plain
//! rock.

use hashbrown::HashSet;

use crate::rng::GenRng;

use super::cell::Terrain;
use super::deadend::remove_deadends;
use super::door::Door;
use super::grid::Grid;
use super::room::Room;

/// Run the cleanup stages in order. Returns the flat door list.
pub fn clean_dungeon(grid: &mut Grid, rooms: &mut [Room], remove_percent: u32, rng: &mut GenRng) -> Vec<Door> {
    remove_deadends(grid, remove_percent, rng);
    let doors = fix_doors(grid, rooms);
    empty_blocks(grid);
    doors
}

/// Keep doors whose cell is walkable, mirror room-to-room doors and
/// collect each door cell once.
pub fn fix_doors(grid: &mut Grid, rooms: &mut [Room]) -> Vec<Door> {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut doors = Vec::new();
    let mut mirrors = Vec::new();

    for room in rooms.iter_mut() {
        let room_id = room.id;
        for (&dir, list) in room.doors.iter_mut() {
            list.retain(|door| {
                let cell = &mut grid[(door.row, door.col)];
                if cell.is_open() {
                    return true;
                }
                cell.clear_door();
                cell.perimeter = true;
                false
            });
            for door in list.iter() {
                if !seen.insert((door.row, door.col)) {
                    continue;
                }
                doors.push(*door);
                if let Some(out_id) = door.out_id {
                    let mirrored = Door {
                        out_id: Some(room_id),
                        ..*door
                    };
                    mirrors.push((out_id, dir.opposite(), mirrored));
                }
            }
        }
        room.doors.retain(|_, list| !list.is_empty());
    }

    for (out_id, dir, door) in mirrors {
        let Some(room) = usize::from(out_id).checked_sub(1).and_then(|idx| rooms.get_mut(idx)) else {
            continue;
        };
        let list = room.doors.entry(dir).or_default();
        if !list.iter().any(|d| d.row == door.row && d.col == door.col) {
            list.push(door);
        }
    }

    scrub_overlays(grid);
    tracing::debug!(doors = doors.len(), "doors fixed");
    doors
}

/// Clear door and entrance overlays left on cells that are not walkable
fn scrub_overlays(grid: &mut Grid) {
    for cell in grid.iter_mut() {
        if cell.is_open() {
            continue;
        }
        if cell.door.is_some() {
            cell.clear_door();
        }
        cell.entrance = false;
    }
}

/// Mask rock becomes plain rock; perimeter marks stay
pub fn empty_blocks(grid: &mut Grid) {
    for cell in grid.iter_mut() {
        if cell.is_blocked() {
            cell.terrain = Terrain::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::cell::DoorKind;
    use crate::dungeon::grid::Direction;
    use crate::dungeon::door::{check_sill, open_door};
    use crate::dungeon::room::{emplace_room, RoomProto, RoomSizing};
    use crate::options::Options;

    fn two_rooms() -> (Grid, Vec<Room>) {
        let mut grid = Grid::new(10, 10);
        let mut rooms = Vec::new();
        let sizing = RoomSizing::from_options(&Options::with_seed(0));
        for j in [2, 4] {
            let proto = RoomProto {
                i: Some(2),
                j: Some(j),
                height: Some(2),
                width: Some(2),
            };
            emplace_room(&mut grid, &mut rooms, proto, sizing, &mut GenRng::new(0)).unwrap();
        }
        (grid, rooms)
    }

    #[test]
    fn test_fix_doors_mirrors_shared_door() {
        let (mut grid, mut rooms) = two_rooms();
        let sill = check_sill(&grid, &rooms[0], 5, 7, Direction::East).unwrap();
        open_door(&mut grid, &mut rooms[0], &sill, DoorKind::Door);
        grid[(5, 8)].carve();

        let doors = fix_doors(&mut grid, &mut rooms);
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].out_id, Some(2));

        let mirrored = rooms[1].doors_in(Direction::West);
        assert_eq!(mirrored.len(), 1);
        assert_eq!((mirrored[0].row, mirrored[0].col), (5, 8));
        assert_eq!(mirrored[0].out_id, Some(1));
        assert_eq!(mirrored[0].kind, DoorKind::Door);

        // a second pass must not mirror again
        let again = fix_doors(&mut grid, &mut rooms);
        assert_eq!(again.len(), 1);
        assert_eq!(rooms[1].door_count(), 1);
        assert_eq!(rooms[0].door_count(), 1);
    }

    #[test]
    fn test_fix_doors_drops_uncarved() {
        let (mut grid, mut rooms) = two_rooms();
        let sill = check_sill(&grid, &rooms[0], 5, 5, Direction::North).unwrap();
        open_door(&mut grid, &mut rooms[0], &sill, DoorKind::Trapped);
        assert_eq!(grid[(4, 5)].label, Some('t'));

        let doors = fix_doors(&mut grid, &mut rooms);
        assert!(doors.is_empty());
        assert_eq!(rooms[0].door_count(), 0);
        let cell = grid[(4, 5)];
        assert_eq!(cell.door, None);
        assert_eq!(cell.label, None);
        assert!(!cell.entrance);
        assert!(cell.perimeter);
        assert!(!grid[(3, 5)].entrance);
    }

    #[test]
    fn test_empty_blocks() {
        let mut grid = Grid::new(4, 4);
        grid[(0, 0)].terrain = Terrain::Blocked;
        grid[(0, 0)].perimeter = true;
        empty_blocks(&mut grid);
        assert!(grid.iter().all(|(_, cell)| !cell.is_blocked()));
        assert!(grid[(0, 0)].perimeter);
    }

    #[test]
    fn test_clean_dungeon_runs_all_stages() {
        let (mut grid, mut rooms) = two_rooms();
        grid[(19, 19)].terrain = Terrain::Blocked;
        let sill = check_sill(&grid, &rooms[0], 5, 7, Direction::East).unwrap();
        open_door(&mut grid, &mut rooms[0], &sill, DoorKind::Arch);
        grid[(5, 8)].carve();
        let doors = clean_dungeon(&mut grid, &mut rooms, 100, &mut GenRng::new(2));
        assert_eq!(doors.len(), 1);
        assert!(!grid[(19, 19)].is_blocked());
        assert!(grid[(5, 8)].is_open());
    }
}
