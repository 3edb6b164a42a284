//! dv-core: deterministic dungeon layout generation
//!
//! Given a seed and a handful of shape/density options this crate produces
//! a grid of rooms, corridors, doors and stairs. Generation is pure: no I/O,
//! no global state, and the same options always give the same dungeon.
//!
//! ```
//! use dv_core::{generate_floor, Options};
//!
//! let dungeon = generate_floor(&Options::with_seed(42));
//! assert!(!dungeon.rooms().is_empty());
//! ```

pub mod dungeon;

mod consts;
mod error;
mod options;
mod rng;

pub use consts::*;
pub use dungeon::{
    generate, generate_floor, generate_floors, Dungeon, Generated, MultiFloorDungeon,
};
pub use error::OptionsError;
pub use options::{time_seed, CorridorLayout, DungeonLayout, Options, RoomLayout};
pub use rng::GenRng;
