//! CLI command implementations

pub mod bench;
pub mod input;
pub mod play;
pub mod sounds;
