//! Map cell types
//!
//! A cell is a tagged structure: terrain is a sum type, and the overlays
//! (perimeter wall, entrance line, door, stair, label) sit beside it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DOOR_ROLL;
use crate::rng::GenRng;

/// Room id; 1-based, in creation order
pub type RoomId = u16;

/// Cell terrain
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Terrain {
    /// Solid rock
    #[default]
    Empty = 0,
    /// Masked out by the dungeon layout; never survives generation
    Blocked = 1,
    Room = 2,
    Corridor = 3,
}

/// Door kinds, mutually exclusive on a door cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DoorKind {
    Arch,
    Door,
    Locked,
    Trapped,
    Secret,
    Portcullis,
}

impl DoorKind {
    /// Map a roll in `0..DOOR_ROLL` to a kind.
    ///
    /// Bands: 15 arch, 45 unlocked, 15 locked, 15 trapped, 10 secret,
    /// 10 portcullis.
    pub const fn from_roll(roll: usize) -> Self {
        match roll {
            0..15 => DoorKind::Arch,
            15..60 => DoorKind::Door,
            60..75 => DoorKind::Locked,
            75..90 => DoorKind::Trapped,
            90..100 => DoorKind::Secret,
            _ => DoorKind::Portcullis,
        }
    }

    /// Draw a kind from the fixed probability bands
    pub fn roll(rng: &mut GenRng) -> Self {
        Self::from_roll(rng.rand_int(DOOR_ROLL))
    }

    /// Short key used by renderers
    pub const fn key(self) -> &'static str {
        match self {
            DoorKind::Arch => "arch",
            DoorKind::Door => "open",
            DoorKind::Locked => "lock",
            DoorKind::Trapped => "trap",
            DoorKind::Secret => "secret",
            DoorKind::Portcullis => "portc",
        }
    }

    /// Human readable type label
    pub const fn name(self) -> &'static str {
        match self {
            DoorKind::Arch => "Archway",
            DoorKind::Door => "Unlocked Door",
            DoorKind::Locked => "Locked Door",
            DoorKind::Trapped => "Trapped Door",
            DoorKind::Secret => "Secret Door",
            DoorKind::Portcullis => "Portcullis",
        }
    }

    /// Label stamped on the door cell; arches and secret doors carry none
    pub const fn glyph(self) -> Option<char> {
        match self {
            DoorKind::Arch | DoorKind::Secret => None,
            DoorKind::Door => Some('o'),
            DoorKind::Locked => Some('x'),
            DoorKind::Trapped => Some('t'),
            DoorKind::Portcullis => Some('#'),
        }
    }

    /// Character for text maps
    pub const fn symbol(self) -> char {
        match self {
            DoorKind::Arch => '\'',
            DoorKind::Door => '+',
            DoorKind::Locked => 'x',
            DoorKind::Trapped => 't',
            DoorKind::Secret => 's',
            DoorKind::Portcullis => '=',
        }
    }
}

/// Stair direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StairKind {
    Down,
    Up,
}

impl StairKind {
    pub const fn key(self) -> &'static str {
        match self {
            StairKind::Down => "down",
            StairKind::Up => "up",
        }
    }

    /// Character for text maps
    pub const fn symbol(self) -> char {
        match self {
            StairKind::Down => '>',
            StairKind::Up => '<',
        }
    }
}

/// A single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,

    /// Wall ring around a room; corridors may only cross it through a door
    pub perimeter: bool,

    /// On a sill -> door -> beyond line that a door opened
    pub entrance: bool,

    /// The tunneler has passed through this cell
    pub carved: bool,

    pub door: Option<DoorKind>,

    pub stair: Option<StairKind>,

    /// Owning room, only meaningful on `Terrain::Room`
    pub room_id: Option<RoomId>,

    /// Display label (room number digit or door glyph)
    pub label: Option<char>,
}

impl Cell {
    /// Create an empty rock cell
    pub const fn empty() -> Self {
        Self {
            terrain: Terrain::Empty,
            perimeter: false,
            entrance: false,
            carved: false,
            door: None,
            stair: None,
            room_id: None,
            label: None,
        }
    }

    pub const fn is_blocked(&self) -> bool {
        matches!(self.terrain, Terrain::Blocked)
    }

    pub const fn is_room(&self) -> bool {
        matches!(self.terrain, Terrain::Room)
    }

    pub const fn is_corridor(&self) -> bool {
        matches!(self.terrain, Terrain::Corridor)
    }

    /// Room or corridor: walkable space
    pub const fn is_open(&self) -> bool {
        matches!(self.terrain, Terrain::Room | Terrain::Corridor)
    }

    /// A tunnel may not enter this cell
    pub const fn blocks_corridor(&self) -> bool {
        self.is_blocked() || self.perimeter || self.carved
    }

    /// A new door may not be cut here
    pub const fn blocks_door(&self) -> bool {
        self.is_blocked() || self.door.is_some()
    }

    /// Mark as passed by the tunneler. Room interiors keep their terrain.
    pub fn carve(&mut self) {
        self.entrance = false;
        self.carved = true;
        if !self.is_room() {
            self.terrain = Terrain::Corridor;
        }
    }

    /// Drop door overlays from a cell that ended up outside walkable space
    pub fn clear_door(&mut self) {
        self.door = None;
        self.entrance = false;
        self.label = None;
    }
}
