//! Multi-floor stacks
//!
//! The first floor picks stair sites freely; every later floor is generated
//! from its own seed but places its stairs at the first floor's positions,
//! so stairs line up through the whole stack.

use serde::{Deserialize, Serialize};

use crate::options::Options;

use super::generation::{build_floor, generate_floor, StairPlan};
use super::level::Dungeon;

/// A stack of floors with aligned stairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFloorDungeon {
    pub seed: u64,
    pub options: Options,
    /// Floors, bottom of the stack first
    pub floors: Vec<Dungeon>,
    /// Stair positions shared by every floor
    pub stair_positions: Vec<(usize, usize)>,
}

impl MultiFloorDungeon {
    pub fn floor(&self, index: usize) -> Option<&Dungeon> {
        self.floors.get(index)
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}

/// Result of the top-level entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Generated {
    Single(Dungeon),
    Multi(MultiFloorDungeon),
}

impl Generated {
    /// Every floor, in order
    pub fn floors(&self) -> Vec<&Dungeon> {
        match self {
            Generated::Single(dungeon) => vec![dungeon],
            Generated::Multi(stack) => stack.floors.iter().collect(),
        }
    }
}

/// Seed for floor `floor` of a stack
pub fn floor_seed(seed: u64, floor: usize) -> u64 {
    seed.wrapping_add(floor as u64)
}

/// Generate one floor, or a stack when `floors > 1`
pub fn generate(opts: &Options) -> Generated {
    if opts.floors <= 1 {
        Generated::Single(generate_floor(opts))
    } else {
        Generated::Multi(generate_floors(opts))
    }
}

/// Generate `opts.floors` floors (at least one) with aligned stairs
pub fn generate_floors(opts: &Options) -> MultiFloorDungeon {
    let opts = opts.normalized();
    let count = opts.floors;

    let first = build_floor(&opts, floor_seed(opts.seed, 0), Some(0), StairPlan::FirstFloor);
    let stair_positions = first.stair_positions();
    let mut floors = Vec::with_capacity(count);
    floors.push(first);

    for floor in 1..count {
        let plan = StairPlan::Fixed {
            positions: &stair_positions,
            floor,
            floors: count,
        };
        let dungeon = build_floor(&opts, floor_seed(opts.seed, floor), Some(floor), plan);
        if dungeon.stairs().len() < stair_positions.len() {
            tracing::warn!(
                floor,
                placed = dungeon.stairs().len(),
                expected = stair_positions.len(),
                "stairs missing on floor"
            );
        }
        floors.push(dungeon);
    }

    tracing::info!(seed = opts.seed, floors = floors.len(), stairs = stair_positions.len(), "stack generated");
    MultiFloorDungeon {
        seed: opts.seed,
        options: opts,
        floors,
        stair_positions,
    }
}
