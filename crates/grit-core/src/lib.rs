//! Grit Core - Foundational types for the Grit engine
//!
//! This crate provides the types that all other Grit crates depend on:
//! - `Vec2i` - Integer world/screen positions
//! - Chebyshev distance, bearing and segment projection helpers
//! - `LineOfSight` and the Xiaolin Wu sight line used for sound muffling
//! - Error types and Result alias

mod error;
pub mod geometry;
mod line;
mod types;

pub use error::{GritError, Result};
pub use geometry::{chebyshev_distance, closest_point_on_segment, distance_and_bearing};
pub use line::{has_clear_line, LineOfSight, OpenMap, TileGrid};
pub use types::Vec2i;
