//! Generation options
//!
//! `Options` is the whole configuration surface of the generator. It is
//! serde-deserializable with per-field defaults, so a partial JSON document
//! is a valid options file.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::consts::*;
use crate::error::OptionsError;

/// Global shape constraint applied before any room is placed
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum DungeonLayout {
    /// No mask
    #[default]
    None,
    /// Square ring; the middle ninth is solid rock
    Box,
    /// Plus shape; the four corner ninths are solid rock
    Cross,
    /// Disc inscribed in the grid
    Round,
}

/// How rooms are distributed over the grid
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum RoomLayout {
    /// One attempt per grid intersection, raster order
    Packed,
    /// A fixed budget of attempts at random anchors
    #[default]
    Scattered,
}

/// How strongly corridors keep going in the same direction
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum CorridorLayout {
    Labyrinth,
    #[default]
    Bent,
    Straight,
}

impl CorridorLayout {
    /// Chance (percent) that a tunnel keeps its previous direction first
    pub const fn straight_percent(self) -> u32 {
        match self {
            CorridorLayout::Labyrinth => 0,
            CorridorLayout::Bent => 50,
            CorridorLayout::Straight => 100,
        }
    }
}

fn parse_layout<T>(kind: &'static str, value: &str) -> Result<T, OptionsError>
where
    T: FromStr + VariantNames,
{
    value.trim().parse::<T>().map_err(|_| OptionsError::UnknownLayout {
        kind,
        value: value.to_string(),
        expected: T::VARIANTS.join(", "),
    })
}

impl DungeonLayout {
    /// Parse a layout name, case-insensitively
    pub fn parse(value: &str) -> Result<Self, OptionsError> {
        parse_layout("dungeon_layout", value)
    }
}

impl RoomLayout {
    /// Parse a layout name, case-insensitively
    pub fn parse(value: &str) -> Result<Self, OptionsError> {
        parse_layout("room_layout", value)
    }
}

impl CorridorLayout {
    /// Parse a layout name, case-insensitively
    pub fn parse(value: &str) -> Result<Self, OptionsError> {
        parse_layout("corridor_layout", value)
    }
}

impl TryFrom<String> for DungeonLayout {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for RoomLayout {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for CorridorLayout {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DungeonLayout> for String {
    fn from(layout: DungeonLayout) -> Self {
        layout.to_string()
    }
}

impl From<RoomLayout> for String {
    fn from(layout: RoomLayout) -> Self {
        layout.to_string()
    }
}

impl From<CorridorLayout> for String {
    fn from(layout: CorridorLayout) -> Self {
        layout.to_string()
    }
}

/// Seed derived from the wall clock (seconds since the Unix epoch)
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Sole source of variation; equal seeds give equal dungeons
    pub seed: u64,
    /// Grid height in cells
    pub n_rows: usize,
    /// Grid width in cells
    pub n_cols: usize,
    pub dungeon_layout: DungeonLayout,
    /// Smallest room side, in cells
    pub room_min: usize,
    /// Largest room side, in cells
    pub room_max: usize,
    pub room_layout: RoomLayout,
    pub corridor_layout: CorridorLayout,
    /// Dead-end removal chance, 0-100
    pub remove_deadends: u32,
    /// Stairs per floor
    pub add_stairs: usize,
    /// Pixel size of one cell; carried for renderers, unused here
    pub cell_size: u32,
    /// Number of floors; more than one aligns stairs across floors
    pub floors: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            n_rows: DEFAULT_ROWS,
            n_cols: DEFAULT_COLS,
            dungeon_layout: DungeonLayout::None,
            room_min: DEFAULT_ROOM_MIN,
            room_max: DEFAULT_ROOM_MAX,
            room_layout: RoomLayout::Scattered,
            corridor_layout: CorridorLayout::Bent,
            remove_deadends: DEFAULT_REMOVE_DEADENDS,
            add_stairs: DEFAULT_ADD_STAIRS,
            cell_size: DEFAULT_CELL_SIZE,
            floors: 1,
        }
    }
}

impl Options {
    /// Default options with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON options document
    pub fn from_json(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Strict check, for front ends that prefer rejecting bad input over
    /// the generator's silent coercion
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.n_rows < MIN_DIMENSION {
            return Err(OptionsError::TooSmall {
                field: "n_rows",
                min: MIN_DIMENSION,
                value: self.n_rows,
            });
        }
        if self.n_cols < MIN_DIMENSION {
            return Err(OptionsError::TooSmall {
                field: "n_cols",
                min: MIN_DIMENSION,
                value: self.n_cols,
            });
        }
        if self.room_min == 0 {
            return Err(OptionsError::TooSmall {
                field: "room_min",
                min: 1,
                value: 0,
            });
        }
        if self.room_min > self.room_max {
            return Err(OptionsError::RoomSizeOrder {
                min: self.room_min,
                max: self.room_max,
            });
        }
        if self.remove_deadends > 100 {
            return Err(OptionsError::Percent {
                field: "remove_deadends",
                value: self.remove_deadends,
            });
        }
        Ok(())
    }

    /// Copy with out-of-range values coerced into range
    pub fn normalized(&self) -> Options {
        let mut opts = self.clone();
        if opts.n_rows < MIN_DIMENSION {
            tracing::warn!(n_rows = opts.n_rows, min = MIN_DIMENSION, "grid height raised");
            opts.n_rows = MIN_DIMENSION;
        }
        if opts.n_cols < MIN_DIMENSION {
            tracing::warn!(n_cols = opts.n_cols, min = MIN_DIMENSION, "grid width raised");
            opts.n_cols = MIN_DIMENSION;
        }
        if opts.room_min == 0 {
            tracing::warn!("room_min raised to 1");
            opts.room_min = 1;
        }
        if opts.room_max < opts.room_min {
            tracing::warn!(
                room_min = opts.room_min,
                room_max = opts.room_max,
                "room_max raised to room_min"
            );
            opts.room_max = opts.room_min;
        }
        if opts.remove_deadends > 100 {
            tracing::warn!(remove_deadends = opts.remove_deadends, "dead-end chance capped at 100");
            opts.remove_deadends = 100;
        }
        if opts.floors == 0 {
            opts.floors = 1;
        }
        opts
    }

    /// Intersections per column (`n_i`); grid height is `2 * n_i + 1`
    pub fn n_i(&self) -> usize {
        self.n_rows / 2
    }

    /// Intersections per row (`n_j`); grid width is `2 * n_j + 1`
    pub fn n_j(&self) -> usize {
        self.n_cols / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_defaults() {
        let opts = Options::with_seed(1);
        assert_eq!(opts.n_rows, 39);
        assert_eq!(opts.n_cols, 39);
        assert_eq!(opts.room_min, 3);
        assert_eq!(opts.room_max, 9);
        assert_eq!(opts.room_layout, RoomLayout::Scattered);
        assert_eq!(opts.corridor_layout, CorridorLayout::Bent);
        assert_eq!(opts.dungeon_layout, DungeonLayout::None);
        assert_eq!(opts.remove_deadends, 50);
        assert_eq!(opts.add_stairs, 2);
        assert_eq!(opts.cell_size, 18);
        assert_eq!(opts.floors, 1);
    }

    #[test]
    fn test_layout_parse_case_insensitive() {
        assert_eq!(DungeonLayout::parse("round").unwrap(), DungeonLayout::Round);
        assert_eq!(DungeonLayout::parse("CROSS").unwrap(), DungeonLayout::Cross);
        assert_eq!(RoomLayout::parse("packed").unwrap(), RoomLayout::Packed);
        assert_eq!(
            CorridorLayout::parse("Labyrinth").unwrap(),
            CorridorLayout::Labyrinth
        );
    }

    #[test]
    fn test_layout_parse_unknown() {
        let err = DungeonLayout::parse("hexagon").unwrap_err();
        match err {
            OptionsError::UnknownLayout { kind, value, expected } => {
                assert_eq!(kind, "dungeon_layout");
                assert_eq!(value, "hexagon");
                assert!(expected.contains("Round"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_layout_display_round_trips() {
        for layout in DungeonLayout::iter() {
            assert_eq!(DungeonLayout::parse(&layout.to_string()).unwrap(), layout);
        }
        for layout in CorridorLayout::iter() {
            assert_eq!(CorridorLayout::parse(&layout.to_string()).unwrap(), layout);
        }
    }

    #[test]
    fn test_straight_percent() {
        assert_eq!(CorridorLayout::Labyrinth.straight_percent(), 0);
        assert_eq!(CorridorLayout::Bent.straight_percent(), 50);
        assert_eq!(CorridorLayout::Straight.straight_percent(), 100);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let opts = Options::from_json(
            r#"{"seed": 9, "n_rows": 21, "dungeon_layout": "round", "corridor_layout": "Straight"}"#,
        )
        .unwrap();
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.n_rows, 21);
        assert_eq!(opts.n_cols, 39);
        assert_eq!(opts.dungeon_layout, DungeonLayout::Round);
        assert_eq!(opts.corridor_layout, CorridorLayout::Straight);
        assert_eq!(opts.room_layout, RoomLayout::Scattered);
    }

    #[test]
    fn test_json_rejects_unknown_layout() {
        let err = Options::from_json(r#"{"room_layout": "stacked"}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
        assert!(err.to_string().contains("stacked"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut opts = Options::with_seed(77);
        opts.dungeon_layout = DungeonLayout::Box;
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"Box\""));
        assert_eq!(Options::from_json(&json).unwrap(), opts);
    }

    #[test]
    fn test_validate() {
        assert!(Options::with_seed(1).validate().is_ok());

        let mut opts = Options::with_seed(1);
        opts.room_min = 10;
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::RoomSizeOrder { min: 10, max: 9 })
        ));

        let mut opts = Options::with_seed(1);
        opts.n_cols = 3;
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::TooSmall { field: "n_cols", .. })
        ));

        let mut opts = Options::with_seed(1);
        opts.remove_deadends = 101;
        assert!(matches!(opts.validate(), Err(OptionsError::Percent { .. })));
    }

    #[test]
    fn test_normalized_coerces() {
        let mut opts = Options::with_seed(1);
        opts.n_rows = 2;
        opts.room_min = 0;
        opts.room_max = 0;
        opts.remove_deadends = 250;
        opts.floors = 0;

        let norm = opts.normalized();
        assert_eq!(norm.n_rows, MIN_DIMENSION);
        assert_eq!(norm.room_min, 1);
        assert_eq!(norm.room_max, 1);
        assert_eq!(norm.remove_deadends, 100);
        assert_eq!(norm.floors, 1);
        assert!(norm.validate().is_ok());
    }

    #[test]
    fn test_intersection_counts() {
        let opts = Options::with_seed(1);
        assert_eq!(opts.n_i(), 19);
        assert_eq!(opts.n_j(), 19);
    }
}
