//! Generator constants and option defaults

/// Default grid height in cells
pub const DEFAULT_ROWS: usize = 39;
/// Default grid width in cells
pub const DEFAULT_COLS: usize = 39;

/// Smallest accepted grid dimension; anything lower is raised to this
pub const MIN_DIMENSION: usize = 7;

/// Default room size bounds, in cells
pub const DEFAULT_ROOM_MIN: usize = 3;
pub const DEFAULT_ROOM_MAX: usize = 9;

/// Default dead-end removal chance, in percent
pub const DEFAULT_REMOVE_DEADENDS: u32 = 50;

/// Default number of stairs per floor
pub const DEFAULT_ADD_STAIRS: usize = 2;

/// Default cell size in pixels (only read by renderers)
pub const DEFAULT_CELL_SIZE: u32 = 18;

/// Hard cap on rooms per floor; room creation silently stops here
pub const MAX_ROOMS: usize = 999;

/// Exclusive bound of the door-kind roll (see `DoorKind::from_roll`)
pub const DOOR_ROLL: usize = 110;
