//! Errors for the fallible edges of the crate
//!
//! Generation itself never fails. Parsing layout names, loading an options
//! document, and strict option validation can.

use thiserror::Error;

/// Errors raised while building or checking [`Options`](crate::Options)
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownLayout {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid options document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("room_min ({min}) is larger than room_max ({max})")]
    RoomSizeOrder { min: usize, max: usize },

    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: usize,
        value: usize,
    },

    #[error("{field} is a percentage and must be at most 100, got {value}")]
    Percent { field: &'static str, value: u32 },
}
