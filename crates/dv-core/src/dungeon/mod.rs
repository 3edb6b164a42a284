//! Dungeon model and generation stages
//!
//! Stages run in this order: layout mask, rooms, doors, labels, corridors,
//! region stitching, stairs, then cleanup (dead ends, doors, mask rock).

pub mod cell;
pub mod cleanup;
pub mod connect;
pub mod corridor;
pub mod deadend;
pub mod door;
pub mod floors;
pub mod generation;
pub mod grid;
pub mod level;
pub mod mask;
pub mod room;
pub mod stairs;

pub use cell::{Cell, DoorKind, RoomId, StairKind, Terrain};
pub use connect::RegionMap;
pub use door::{Door, Sill};
pub use floors::{floor_seed, generate, generate_floors, Generated, MultiFloorDungeon};
pub use generation::generate_floor;
pub use grid::{Direction, Grid};
pub use level::Dungeon;
pub use room::Room;
pub use stairs::Stair;
