//! dv-cli: command-line front end for the dungeon generator
//!
//! Resolves options from flags and config files and renders the result as
//! a text map or JSON.

pub mod display;
pub mod settings;

pub use display::{detect_glyph_set, render, GlyphSet, GraphicsMode};
pub use settings::{resolve, OutputFormat, Overrides};
