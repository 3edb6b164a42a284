//! delve: generate a dungeon and print it
//!
//! Main entry point for the command-line generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dv_cli::{detect_glyph_set, render, resolve, GraphicsMode, OutputFormat, Overrides};
use dv_core::{CorridorLayout, DungeonLayout, RoomLayout};

/// Deterministic dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate rooms, corridors, doors and stairs from a seed", long_about = None)]
struct Args {
    /// Seed (defaults to the current Unix time)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Grid height in cells
    #[arg(long = "rows")]
    rows: Option<usize>,

    /// Grid width in cells
    #[arg(long = "cols")]
    cols: Option<usize>,

    /// Overall shape (none, box, cross, round)
    #[arg(short = 'l', long = "layout", value_parser = DungeonLayout::parse)]
    layout: Option<DungeonLayout>,

    /// Smallest room side in cells
    #[arg(long = "room-min")]
    room_min: Option<usize>,

    /// Largest room side in cells
    #[arg(long = "room-max")]
    room_max: Option<usize>,

    /// Room distribution (packed, scattered)
    #[arg(long = "room-layout", value_parser = RoomLayout::parse)]
    room_layout: Option<RoomLayout>,

    /// Corridor style (labyrinth, bent, straight)
    #[arg(short = 'c', long = "corridors", value_parser = CorridorLayout::parse)]
    corridors: Option<CorridorLayout>,

    /// Dead-end removal chance, 0-100
    #[arg(short = 'd', long = "deadends")]
    deadends: Option<u32>,

    /// Stairs per floor
    #[arg(long = "stairs")]
    stairs: Option<usize>,

    /// Number of floors with aligned stairs
    #[arg(short = 'f', long = "floors")]
    floors: Option<usize>,

    /// JSON options file; flags override its values
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Reject out-of-range options instead of coercing them
    #[arg(long = "strict")]
    strict: bool,

    /// Output format (ascii, json)
    #[arg(long = "format", default_value = "ascii")]
    format: OutputFormat,

    /// Glyphs for text maps (classic, fancy, auto)
    #[arg(long = "graphics", default_value = "auto")]
    graphics: GraphicsMode,

    /// More log output on stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            n_rows: self.rows,
            n_cols: self.cols,
            dungeon_layout: self.layout,
            room_min: self.room_min,
            room_max: self.room_max,
            room_layout: self.room_layout,
            corridor_layout: self.corridors,
            remove_deadends: self.deadends,
            add_stairs: self.stairs,
            floors: self.floors,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let opts = resolve(args.config.as_deref(), &args.overrides(), args.strict)?;
    tracing::info!(seed = opts.seed, floors = opts.floors, "generating");
    let generated = dv_core::generate(&opts);

    match args.format {
        OutputFormat::Ascii => {
            let glyphs = detect_glyph_set(args.graphics);
            print!("{}", render(&generated, glyphs.as_ref()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&generated)?);
        }
    }
    Ok(())
}
