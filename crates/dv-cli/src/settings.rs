//! Option resolution for the command line
//!
//! Precedence: explicit flags, then the JSON config file, then defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dv_core::{CorridorLayout, DungeonLayout, Options, RoomLayout};
use strum::{Display, EnumString, VariantNames};

/// Output format for generated dungeons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Text map
    #[default]
    Ascii,
    /// Serialized model
    Json,
}

/// Values given on the command line; `None` leaves the lower layer alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub n_rows: Option<usize>,
    pub n_cols: Option<usize>,
    pub dungeon_layout: Option<DungeonLayout>,
    pub room_min: Option<usize>,
    pub room_max: Option<usize>,
    pub room_layout: Option<RoomLayout>,
    pub corridor_layout: Option<CorridorLayout>,
    pub remove_deadends: Option<u32>,
    pub add_stairs: Option<usize>,
    pub floors: Option<usize>,
}

impl Overrides {
    /// Write every set value into `opts`
    pub fn apply(&self, opts: &mut Options) {
        if let Some(seed) = self.seed {
            opts.seed = seed;
        }
        if let Some(n_rows) = self.n_rows {
            opts.n_rows = n_rows;
        }
        if let Some(n_cols) = self.n_cols {
            opts.n_cols = n_cols;
        }
        if let Some(layout) = self.dungeon_layout {
            opts.dungeon_layout = layout;
        }
        if let Some(room_min) = self.room_min {
            opts.room_min = room_min;
        }
        if let Some(room_max) = self.room_max {
            opts.room_max = room_max;
        }
        if let Some(layout) = self.room_layout {
            opts.room_layout = layout;
        }
        if let Some(layout) = self.corridor_layout {
            opts.corridor_layout = layout;
        }
        if let Some(percent) = self.remove_deadends {
            opts.remove_deadends = percent;
        }
        if let Some(stairs) = self.add_stairs {
            opts.add_stairs = stairs;
        }
        if let Some(floors) = self.floors {
            opts.floors = floors;
        }
    }
}

/// Load a (possibly partial) options document
pub fn load_config(path: &Path) -> Result<Options> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let opts = Options::from_json(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(opts)
}

/// Resolve the final options from an optional config file and flag overrides
pub fn resolve(config: Option<&Path>, overrides: &Overrides, strict: bool) -> Result<Options> {
    let mut opts = match config {
        Some(path) => load_config(path)?,
        None => Options::default(),
    };
    overrides.apply(&mut opts);
    if strict {
        opts.validate().context("invalid options")?;
    }
    Ok(opts)
}
